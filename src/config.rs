// ABOUTME: Typed action inputs for the build and check subcommands.
// ABOUTME: Reads INPUT_* variables the way the runner publishes them.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::{Repository, StageName, StageNameError};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("missing required input: {0}")]
    Missing(String),

    #[error("invalid boolean for input {name}: {value}")]
    InvalidBool { name: String, value: String },

    #[error("invalid stage name in input {name}: {source}")]
    InvalidStage { name: String, source: StageNameError },
}

/// Declared inputs, keyed by their lowercase input names.
///
/// The runner publishes each input as `INPUT_<NAME>` with spaces replaced
/// by underscores and the name uppercased; this undoes that mangling so
/// lookups use the names the action metadata declares.
#[derive(Debug, Clone, Default)]
pub struct InputSource {
    values: HashMap<String, String>,
}

impl InputSource {
    pub fn from_env() -> Self {
        let values = env::vars()
            .filter_map(|(key, value)| {
                key.strip_prefix("INPUT_")
                    .map(|name| (name.to_lowercase(), value))
            })
            .collect();
        Self { values }
    }

    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// A trimmed, non-empty value for the input, if declared.
    fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn require(&self, name: &str) -> Result<&str, InputError> {
        self.get(name)
            .ok_or_else(|| InputError::Missing(name.to_string()))
    }

    /// Missing means false; anything other than true/false is an error.
    fn get_bool(&self, name: &str) -> Result<bool, InputError> {
        match self.get(name) {
            None => Ok(false),
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(InputError::InvalidBool {
                    name: name.to_string(),
                    value: value.to_string(),
                }),
            },
        }
    }

    fn stage(&self, name: &str) -> Result<StageName, InputError> {
        StageName::new(self.require(name)?).map_err(|source| InputError::InvalidStage {
            name: name.to_string(),
            source,
        })
    }
}

/// Inputs consumed by the `build` subcommand.
#[derive(Debug, Clone)]
pub struct BuildInputs {
    /// Comma-separated base stage names, in build order. May be empty.
    pub stages: String,
    pub server_stage: StageName,
    /// Empty or absent means the test-environment build is skipped.
    pub testenv_stage: Option<StageName>,
    pub repository: Repository,
    /// Build-definition path; absent means default discovery.
    pub dockerfile: Option<PathBuf>,
    /// Build context directory handed to the container CLI.
    pub context: String,
    /// `KEY=VALUE` pairs forwarded as --build-arg.
    pub build_args: Vec<String>,
    pub custom_tag: Option<String>,
    pub tag_latest_on_default: bool,
    pub quiet: bool,
}

impl BuildInputs {
    pub fn parse(source: &InputSource) -> Result<Self, InputError> {
        let testenv_stage = match source.get("testenv-stage") {
            None => None,
            Some(value) => {
                Some(
                    StageName::new(value).map_err(|source| InputError::InvalidStage {
                        name: "testenv-stage".to_string(),
                        source,
                    })?,
                )
            }
        };

        Ok(Self {
            stages: source.get("stages").unwrap_or_default().to_string(),
            server_stage: source.stage("server-stage")?,
            testenv_stage,
            repository: Repository::new(source.require("repository")?),
            dockerfile: source.get("dockerfile").map(PathBuf::from),
            context: source.get("context").unwrap_or(".").to_string(),
            build_args: split_list(source.get("build-args").unwrap_or_default()),
            custom_tag: source.get("custom-tag").map(str::to_string),
            tag_latest_on_default: source.get_bool("tag-latest-on-default")?,
            quiet: source.get_bool("quiet")?,
        })
    }
}

/// Inputs consumed by the `check` subcommand.
#[derive(Debug, Clone)]
pub struct CheckInputs {
    pub token: String,
    /// Name of the check run created against the commit.
    pub name: String,
    pub image: String,
    pub command: String,
    pub flags: String,
}

impl CheckInputs {
    pub fn parse(source: &InputSource) -> Result<Self, InputError> {
        Ok(Self {
            token: source.require("token")?.to_string(),
            name: source.require("name")?.to_string(),
            image: source.require("image")?.to_string(),
            command: source.get("command").unwrap_or_default().to_string(),
            flags: source.get("flags").unwrap_or_default().to_string(),
        })
    }
}

/// Split a newline- or comma-separated list input, dropping empty entries.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(['\n', ','])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
