use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tfoas_core::CodeGenerator;
use tfoas_core::config;
use tfoas_core::module::GoModule;
use tfoas_core::paths::{self, RunPaths};
use tfoas_core::pipeline::{self, StageInvocation, StageOutput, StageRunner, Toolchain};
use tfoas_core::spec;
use tfoas_core::split;
use tfoas_scaffold::{ScaffoldGenerator, ScaffoldSettings, write_files};

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct GenerateSummary {
    pub paths: RunPaths,
    /// Implementation stubs written under the provider root, in render order.
    pub written: Vec<PathBuf>,
}

/// Run the whole generation for `module` using the config at `config_path`:
/// normalize the config, write the sub-configurations, run the three stages
/// through `runner`, then render the implementation stubs.
///
/// `report` receives the output of every stage that ran, including a failing one.
pub fn run_generate<R, F>(
    module: &GoModule,
    config_path: &Path,
    runner: &mut R,
    report: F,
) -> Result<GenerateSummary>
where
    R: StageRunner + ?Sized,
    F: FnMut(&StageInvocation, &StageOutput),
{
    let generator = ScaffoldGenerator::new().context("loading stub templates")?;

    let mut cfg = config::load_config(config_path).context("loading configuration")?;
    cfg.normalize(&module.root);
    cfg.create_client_output_dir(&module.root)
        .context("creating output dir for openapi clients")?;

    let base = cfg.generator.base.clone();
    let run_paths = RunPaths::new(&module.root, config_path, &base);
    split::write_sub_configs(&cfg, &run_paths).context("writing generator configs")?;

    let client_output = cfg.client_output(&module.root);
    let tools = Toolchain::from_overrides(&cfg.generator.tools);
    let stages = pipeline::plan_stages(
        &tools,
        &run_paths,
        &cfg.generator.oas_path,
        &client_output,
    );
    pipeline::run_stages(runner, &stages, report).context("running generation pipeline")?;

    let provider_spec =
        spec::load_spec(&run_paths.spec_artifact).context("reading provider spec")?;

    let settings = ScaffoldSettings {
        clients: paths::client_import_path(&module.name, &module.root, &base),
        provider_root: paths::go_import_path(&module.name, &module.root, &run_paths.provider_root)
            .unwrap_or_else(|| {
                paths::join_import_path(
                    &module.name,
                    &format!("{base}/{}", paths::PROVIDER_DIR_NAME),
                )
            }),
    };
    log::debug!("client import path: {}", settings.clients);

    let files = generator
        .generate(&provider_spec, &settings)
        .context("rendering implementation stubs")?;
    let written = write_files(&run_paths.provider_root, &files)
        .context("writing implementation stubs")?;

    Ok(GenerateSummary {
        paths: run_paths,
        written,
    })
}
