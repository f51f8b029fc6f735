pub mod context;
pub mod error;
pub mod generator;
pub mod writer;

pub use context::{EntityContext, ProviderContext, ScaffoldSettings, StubContext};
pub use error::ScaffoldError;
pub use generator::{PlannedStub, ScaffoldGenerator, StubKind, plan_stubs};
pub use writer::write_files;
