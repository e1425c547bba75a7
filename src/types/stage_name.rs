// ABOUTME: Validated build-stage identifier.
// ABOUTME: Stage names are Dockerfile targets and must not contain ':' or '/'.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StageNameError {
    #[error("stage name cannot be empty")]
    Empty,

    #[error("invalid character in stage name: '{0}'")]
    InvalidChar(char),
}

/// A named target within a multi-target build definition.
///
/// Unique within one pipeline invocation. A `:` would collide with the tag
/// separator once the stage is embedded in an image reference, and a `/`
/// with the path separator, so both are rejected up front.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StageName(String);

impl StageName {
    pub fn new(value: &str) -> Result<Self, StageNameError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(StageNameError::Empty);
        }

        for c in value.chars() {
            if c == ':' || c == '/' || c.is_whitespace() {
                return Err(StageNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
