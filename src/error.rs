// ABOUTME: Application-wide error type for skala.
// ABOUTME: Unifies pipeline, check, and input errors for the entry point.

use snafu::Snafu;

use crate::check::CheckError;
use crate::config::InputError;
use crate::context::ContextError;
use crate::pipeline::PipelineError;

/// Anything that can end an invocation. All of these surface as a failure
/// message plus a nonzero exit, never a silent crash.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("{source}"))]
    Pipeline { source: PipelineError },

    #[snafu(display("{source}"))]
    Check { source: CheckError },

    #[snafu(display("invalid inputs: {source}"))]
    Inputs { source: InputError },

    #[snafu(display("could not resolve CI context: {source}"))]
    Context { source: ContextError },

    #[snafu(display("could not record outputs: {source}"))]
    Outputs { source: std::io::Error },
}

impl From<PipelineError> for Error {
    fn from(source: PipelineError) -> Self {
        Error::Pipeline { source }
    }
}

impl From<CheckError> for Error {
    fn from(source: CheckError) -> Self {
        Error::Check { source }
    }
}

impl From<InputError> for Error {
    fn from(source: InputError) -> Self {
        Error::Inputs { source }
    }
}

impl From<ContextError> for Error {
    fn from(source: ContextError) -> Self {
        Error::Context { source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
