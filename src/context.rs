// ABOUTME: Invocation context captured from the CI environment.
// ABOUTME: Resolves run tags, commit hashes, and default-branch state.

use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::types::RunTag;

/// Events that run against a synthetic merge commit. For these the head sha
/// recorded in the event payload identifies the commit that actually
/// triggered the run; the ambient sha points at the merge commit and leads
/// to confusing mismatches when used as a build identifier.
const PULL_REQUEST_EVENTS: &[&str] = &[
    "pull_request",
    "pull_request_review",
    "pull_request_review_comment",
];

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("missing required environment variable: {0}")]
    MissingEnv(String),

    #[error("malformed {0}: {1}")]
    Malformed(&'static str, String),

    #[error("could not read event payload {path}: {source}")]
    PayloadRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not parse event payload {path}: {source}")]
    PayloadParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Everything the pipeline needs to know about the triggering CI event,
/// captured once at startup. Core logic never reads process-wide state
/// directly, which keeps every decision reproducible in tests.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    pub ref_name: String,
    pub event_name: String,
    pub sha: String,
    pub repo_owner: String,
    pub repo_name: String,
    pub buildkit: bool,
    pub payload: EventPayload,
}

/// The subset of the webhook event payload the pipeline cares about.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    #[serde(rename = "ref", default)]
    pub git_ref: Option<String>,

    #[serde(default)]
    pub repository: Option<RepositoryInfo>,

    #[serde(default)]
    pub pull_request: Option<PullRequestInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryInfo {
    #[serde(default)]
    pub default_branch: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestInfo {
    pub head: CommitPointer,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitPointer {
    pub sha: String,
}

impl EventPayload {
    pub fn from_file(path: &Path) -> Result<Self, ContextError> {
        let content = std::fs::read_to_string(path).map_err(|source| ContextError::PayloadRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ContextError::PayloadParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl InvocationContext {
    /// Capture the context from the standard runner environment.
    pub fn from_env() -> Result<Self, ContextError> {
        let ref_name = require_env("GITHUB_REF")?;
        let event_name = require_env("GITHUB_EVENT_NAME")?;
        let sha = require_env("GITHUB_SHA")?;
        let repository = require_env("GITHUB_REPOSITORY")?;
        let (repo_owner, repo_name) = repository
            .split_once('/')
            .ok_or_else(|| ContextError::Malformed("GITHUB_REPOSITORY", repository.clone()))?;

        let buildkit = env::var("DOCKER_BUILDKIT").is_ok_and(|v| v == "1");

        let payload = match env::var_os("GITHUB_EVENT_PATH") {
            Some(path) => EventPayload::from_file(Path::new(&path))?,
            None => EventPayload::default(),
        };

        Ok(Self {
            ref_name,
            event_name,
            sha,
            repo_owner: repo_owner.to_string(),
            repo_name: repo_name.to_string(),
            buildkit,
            payload,
        })
    }

    /// The tag identifying everything built by this invocation.
    pub fn run_tag(&self) -> RunTag {
        RunTag::derive(&self.ref_name, self.buildkit)
    }

    /// Whether the triggering push landed on the repository's default
    /// branch. Gates `latest`-tag promotion.
    pub fn is_default_branch(&self) -> bool {
        let default_branch = self
            .payload
            .repository
            .as_ref()
            .and_then(|r| r.default_branch.as_deref());
        match (default_branch, self.payload.git_ref.as_deref()) {
            (Some(branch), Some(git_ref)) => git_ref == format!("refs/heads/{branch}"),
            _ => false,
        }
    }

    /// The commit hash that identifies this run's source: the PR head for
    /// pull-request-family events, the event sha otherwise.
    pub fn commit_hash(&self) -> String {
        if PULL_REQUEST_EVENTS.contains(&self.event_name.as_str()) {
            if let Some(pr) = &self.payload.pull_request {
                return pr.head.sha.clone();
            }
        }
        self.sha.clone()
    }
}

fn require_env(name: &str) -> Result<String, ContextError> {
    env::var(name).map_err(|_| ContextError::MissingEnv(name.to_string()))
}
