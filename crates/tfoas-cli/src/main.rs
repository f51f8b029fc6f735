use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use tfoas_cli::run_generate;
use tfoas_core::config::DEFAULT_CONFIG_PATH;
use tfoas_core::module::GoModule;
use tfoas_core::pipeline::ProcessRunner;

#[derive(Parser)]
#[command(
    name = "tfprovider-oas-gen",
    about = "Terraform provider OAS code generation",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate provider code, API clients and implementation stubs
    Generate {
        /// Configuration file path [default: <repo>/generate/config.yaml]
        #[arg(long)]
        config: Option<PathBuf>,

        /// Path of the repository [default: nearest parent directory with a go.mod]
        #[arg(long)]
        repo: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { config, repo } => cmd_generate(config, repo),
    }
}

fn cmd_generate(config: Option<PathBuf>, repo: Option<PathBuf>) -> Result<()> {
    let module = match repo {
        Some(root) => GoModule::open(&root),
        None => {
            let cwd = env::current_dir().context("reading current directory")?;
            GoModule::discover(&cwd)
        }
    }
    .context("locating go module")?;

    let config_path = config.unwrap_or_else(|| module.root.join(DEFAULT_CONFIG_PATH));
    log::info!(
        "module {} at {}, config {}",
        module.name,
        module.root.display(),
        config_path.display()
    );

    let summary = run_generate(&module, &config_path, &mut ProcessRunner, |invocation, output| {
        eprintln!("{} stage: {}", invocation.stage, output.status);
        println!("{}", output.output);
    })
    .context("error generating")?;

    for path in &summary.written {
        eprintln!("  wrote {}", path.display());
    }
    eprintln!(
        "Generated {} implementation stubs in {}",
        summary.written.len(),
        summary.paths.provider_root.display()
    );
    Ok(())
}
