// ABOUTME: Container CLI collaborator boundary.
// ABOUTME: ContainerCli trait plus the docker subprocess implementation.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

/// Exit code of a container CLI invocation. Nonzero means failure; callers
/// never parse command output, only the status.
pub type ExitCode = i32;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to launch {command}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
}

/// One build invocation for a pipeline stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildRequest {
    /// `KEY=VALUE` pairs forwarded as --build-arg.
    pub build_args: Vec<String>,
    /// References offered as layer-cache sources.
    pub cache_from: Vec<String>,
    /// Build-definition path; omitted means default discovery.
    pub dockerfile: Option<PathBuf>,
    /// The reference the built image is tagged as.
    pub tag: String,
    /// The stage to build.
    pub target: String,
    /// Build context directory.
    pub context: String,
}

/// The narrow interface the pipeline drives. Implemented by the docker
/// subprocess wrapper in production and by scripted mocks in tests.
#[async_trait]
pub trait ContainerCli: Send + Sync {
    async fn pull(&self, reference: &str) -> Result<ExitCode, CliError>;

    async fn build(&self, request: &BuildRequest) -> Result<ExitCode, CliError>;

    async fn tag(&self, source: &str, dest: &str) -> Result<ExitCode, CliError>;

    async fn push(&self, reference: &str) -> Result<ExitCode, CliError>;

    /// `run --rm {flags} {image} {command}`, used by the check helper.
    async fn run(&self, flags: &str, image: &str, command: &str) -> Result<ExitCode, CliError>;
}

/// Shells out to the `docker` binary, inheriting its stdout/stderr so the
/// CI log carries the tool's own output.
pub struct DockerCommand {
    program: String,
    quiet: bool,
}

impl DockerCommand {
    pub fn new(quiet: bool) -> Self {
        Self {
            program: "docker".to_string(),
            quiet,
        }
    }

    async fn exec(&self, args: Vec<String>) -> Result<ExitCode, CliError> {
        tracing::debug!("{} {}", self.program, args.join(" "));

        let status = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|source| CliError::Spawn {
                command: self.program.clone(),
                source,
            })?;

        // A process killed by a signal has no code; report it as a failure.
        Ok(status.code().unwrap_or(-1))
    }
}

#[async_trait]
impl ContainerCli for DockerCommand {
    async fn pull(&self, reference: &str) -> Result<ExitCode, CliError> {
        let mut args = vec!["pull".to_string()];
        if self.quiet {
            args.push("--quiet".to_string());
        }
        args.push(reference.to_string());
        self.exec(args).await
    }

    async fn build(&self, request: &BuildRequest) -> Result<ExitCode, CliError> {
        let mut args = vec!["build".to_string()];
        if self.quiet {
            args.push("--quiet".to_string());
        }
        for build_arg in &request.build_args {
            args.push("--build-arg".to_string());
            args.push(build_arg.clone());
        }
        for target in &request.cache_from {
            args.push("--cache-from".to_string());
            args.push(target.clone());
        }
        if let Some(dockerfile) = &request.dockerfile {
            args.push("--file".to_string());
            args.push(dockerfile.display().to_string());
        }
        args.push("--tag".to_string());
        args.push(request.tag.clone());
        args.push("--target".to_string());
        args.push(request.target.clone());
        args.push(request.context.clone());
        self.exec(args).await
    }

    async fn tag(&self, source: &str, dest: &str) -> Result<ExitCode, CliError> {
        self.exec(vec![
            "tag".to_string(),
            source.to_string(),
            dest.to_string(),
        ])
        .await
    }

    async fn push(&self, reference: &str) -> Result<ExitCode, CliError> {
        let mut args = vec!["push".to_string()];
        if self.quiet {
            args.push("--quiet".to_string());
        }
        args.push(reference.to_string());
        self.exec(args).await
    }

    async fn run(&self, flags: &str, image: &str, command: &str) -> Result<ExitCode, CliError> {
        let mut args = vec!["run".to_string(), "--rm".to_string()];
        args.extend(flags.split_whitespace().map(str::to_string));
        args.push(image.to_string());
        args.extend(command.split_whitespace().map(str::to_string));
        self.exec(args).await
    }
}
