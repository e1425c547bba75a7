// ABOUTME: Error types for the build pipeline.
// ABOUTME: Any of these aborts the remainder of the invocation.

use thiserror::Error;

use crate::docker::CliError;

/// Fatal pipeline failures. Cache-pull misses are not errors and never
/// appear here; they are swallowed by the fallback loop.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("docker build failed for stage {stage} (exit code {code})")]
    BuildFailed { stage: String, code: i32 },

    #[error("docker push failed for {reference} (exit code {code})")]
    PushFailed { reference: String, code: i32 },

    #[error("docker tag failed for {reference} (exit code {code})")]
    TagFailed { reference: String, code: i32 },

    #[error("could not invoke container CLI: {0}")]
    Cli(#[from] CliError),

    #[error("invalid pipeline configuration: {0}")]
    Config(String),
}

/// Error kind for branching without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineErrorKind {
    BuildFailed,
    PushFailed,
    TagFailed,
    Cli,
    Config,
}

impl PipelineError {
    pub fn kind(&self) -> PipelineErrorKind {
        match self {
            PipelineError::BuildFailed { .. } => PipelineErrorKind::BuildFailed,
            PipelineError::PushFailed { .. } => PipelineErrorKind::PushFailed,
            PipelineError::TagFailed { .. } => PipelineErrorKind::TagFailed,
            PipelineError::Cli(_) => PipelineErrorKind::Cli,
            PipelineError::Config(_) => PipelineErrorKind::Config,
        }
    }
}
