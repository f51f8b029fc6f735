pub mod generate;

pub use generate::{GenerateSummary, run_generate};
