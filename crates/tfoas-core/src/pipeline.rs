use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::ToolOverrides;
use crate::error::PipelineError;
use crate::paths::RunPaths;

const SPEC_TOOL: &str =
    "github.com/hashicorp/terraform-plugin-codegen-openapi/cmd/tfplugingen-openapi@latest";
const FRAMEWORK_TOOL: &str =
    "github.com/hashicorp/terraform-plugin-codegen-framework/cmd/tfplugingen-framework@latest";
const CLIENT_TOOL: &str = "github.com/deepmap/oapi-codegen/v2/cmd/oapi-codegen@latest";

/// One of the three external generation steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// OpenAPI document → provider spec JSON.
    Spec,
    /// Provider spec → terraform-plugin-framework code.
    Framework,
    /// OpenAPI document → Go API client.
    Client,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Spec, Stage::Framework, Stage::Client];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spec => "spec",
            Self::Framework => "framework",
            Self::Client => "client",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A command prefix: the program plus the leading arguments that select the tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolCommand {
    fn go_run(package: &str) -> Self {
        Self {
            program: "go".to_string(),
            args: vec!["run".to_string(), package.to_string()],
        }
    }

    /// Build from `[program, args...]`; `None` for an empty list.
    pub fn from_parts(parts: &[String]) -> Option<Self> {
        let (program, args) = parts.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

/// The commands used for each stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub spec: ToolCommand,
    pub framework: ToolCommand,
    pub client: ToolCommand,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            spec: ToolCommand::go_run(SPEC_TOOL),
            framework: ToolCommand::go_run(FRAMEWORK_TOOL),
            client: ToolCommand::go_run(CLIENT_TOOL),
        }
    }
}

impl Toolchain {
    /// Defaults with any configured overrides applied.
    pub fn from_overrides(overrides: &ToolOverrides) -> Self {
        let defaults = Self::default();
        let pick = |custom: &Option<Vec<String>>, fallback: ToolCommand| {
            custom
                .as_deref()
                .and_then(ToolCommand::from_parts)
                .unwrap_or(fallback)
        };
        Self {
            spec: pick(&overrides.spec, defaults.spec),
            framework: pick(&overrides.framework, defaults.framework),
            client: pick(&overrides.client, defaults.client),
        }
    }

    pub fn command(&self, stage: Stage) -> &ToolCommand {
        match stage {
            Stage::Spec => &self.spec,
            Stage::Framework => &self.framework,
            Stage::Client => &self.client,
        }
    }
}

/// A fully resolved stage command and the artifact it must produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageInvocation {
    pub stage: Stage,
    pub program: String,
    pub args: Vec<OsString>,
    pub artifact: PathBuf,
}

impl StageInvocation {
    fn new(stage: Stage, tools: &Toolchain, artifact: &Path) -> Self {
        let command = tools.command(stage);
        Self {
            stage,
            program: command.program.clone(),
            args: command.args.iter().map(OsString::from).collect(),
            artifact: artifact.to_path_buf(),
        }
    }

    fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Space-joined command line, for logs.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// Result of running one stage to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutput {
    pub success: bool,
    /// Human-readable exit status, e.g. `exit status: 1`.
    pub status: String,
    /// Everything the tool wrote: all of stdout, then all of stderr. The two
    /// streams are captured separately, so their lines are not interleaved.
    pub output: String,
}

/// Executes stage invocations. The pipeline only depends on this seam, so
/// tests can record invocations instead of spawning processes.
pub trait StageRunner {
    fn run(&mut self, invocation: &StageInvocation) -> io::Result<StageOutput>;
}

/// Runs stages as child processes, blocking until each exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl StageRunner for ProcessRunner {
    fn run(&mut self, invocation: &StageInvocation) -> io::Result<StageOutput> {
        let result = Command::new(&invocation.program)
            .args(&invocation.args)
            .output()?;

        let mut output = String::from_utf8_lossy(&result.stdout).into_owned();
        output.push_str(&String::from_utf8_lossy(&result.stderr));

        Ok(StageOutput {
            success: result.status.success(),
            status: result.status.to_string(),
            output,
        })
    }
}

/// Build the three invocations in execution order. The spec artifact written
/// by the first stage is the input of the second; `client_output` is where the
/// client stage is configured to write.
pub fn plan_stages(
    tools: &Toolchain,
    paths: &RunPaths,
    oas_path: &Path,
    client_output: &Path,
) -> Vec<StageInvocation> {
    vec![
        StageInvocation::new(Stage::Spec, tools, &paths.spec_artifact)
            .arg("generate")
            .arg("--config")
            .arg(&paths.framework_config)
            .arg("--output")
            .arg(&paths.spec_artifact)
            .arg(oas_path),
        StageInvocation::new(Stage::Framework, tools, &paths.provider_root)
            .arg("generate")
            .arg("all")
            .arg("--input")
            .arg(&paths.spec_artifact)
            .arg("--output")
            .arg(&paths.provider_root),
        StageInvocation::new(Stage::Client, tools, client_output)
            .arg("--config")
            .arg(&paths.client_config)
            .arg(oas_path),
    ]
}

/// Run `stages` in order, stopping at the first failure. `report` sees every
/// stage's output, successful or not.
pub fn run_stages<R, F>(
    runner: &mut R,
    stages: &[StageInvocation],
    mut report: F,
) -> Result<(), PipelineError>
where
    R: StageRunner + ?Sized,
    F: FnMut(&StageInvocation, &StageOutput),
{
    for invocation in stages {
        log::info!("running {} stage: {}", invocation.stage, invocation.command_line());

        let output = runner
            .run(invocation)
            .map_err(|source| PipelineError::Launch {
                stage: invocation.stage,
                source,
            })?;
        report(invocation, &output);

        if !output.success {
            return Err(PipelineError::Stage {
                stage: invocation.stage,
                status: output.status,
                output: output.output,
            });
        }
        log::debug!("{} stage finished", invocation.stage);
    }
    Ok(())
}
