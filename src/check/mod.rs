// ABOUTME: Commit status check reporting via the checks API.
// ABOUTME: One check per invocation, created at start and resolved at end.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::config::CheckInputs;
use crate::docker::ContainerCli;

/// Terminal conclusion for a check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conclusion {
    Success,
    Failure,
    Neutral,
    ActionRequired,
    Cancelled,
    Skipped,
    Stale,
    TimedOut,
}

impl Conclusion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Conclusion::Success => "success",
            Conclusion::Failure => "failure",
            Conclusion::Neutral => "neutral",
            Conclusion::ActionRequired => "action_required",
            Conclusion::Cancelled => "cancelled",
            Conclusion::Skipped => "skipped",
            Conclusion::Stale => "stale",
            Conclusion::TimedOut => "timed_out",
        }
    }
}

/// Identifier assigned by the checks API at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckId(pub u64);

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("invalid API token: {0}")]
    Auth(String),

    #[error("checks API request failed: {0}")]
    Api(String),

    #[error("check command failed (exit code {0})")]
    CommandFailed(i32),

    #[error("could not invoke container CLI: {0}")]
    Cli(String),
}

/// The narrow surface the helper needs from the checks API: create exactly
/// once at invocation start, update exactly once at the end.
#[async_trait]
pub trait CheckReporter: Send + Sync {
    async fn create(&self, name: &str, head_sha: &str) -> Result<CheckId, CheckError>;

    async fn update(&self, id: CheckId, conclusion: Conclusion) -> Result<(), CheckError>;
}

/// Reporter backed by octocrab against a single repository.
pub struct GithubChecks {
    client: octocrab::Octocrab,
    owner: String,
    repo: String,
}

#[derive(Debug, Deserialize)]
struct CreatedCheck {
    id: u64,
}

impl GithubChecks {
    pub fn new(token: &str, owner: &str, repo: &str) -> Result<Self, CheckError> {
        let client = octocrab::Octocrab::builder()
            .personal_token(token.to_string())
            .build()
            .map_err(|e| CheckError::Auth(e.to_string()))?;
        Ok(Self {
            client,
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

#[async_trait]
impl CheckReporter for GithubChecks {
    async fn create(&self, name: &str, head_sha: &str) -> Result<CheckId, CheckError> {
        let route = format!("/repos/{}/{}/check-runs", self.owner, self.repo);
        let body = serde_json::json!({ "name": name, "head_sha": head_sha });
        let created: CreatedCheck = self
            .client
            .post(route, Some(&body))
            .await
            .map_err(|e| CheckError::Api(e.to_string()))?;
        Ok(CheckId(created.id))
    }

    async fn update(&self, id: CheckId, conclusion: Conclusion) -> Result<(), CheckError> {
        tracing::debug!("updating check {} to {}", id.0, conclusion.as_str());
        let route = format!("/repos/{}/{}/check-runs/{}", self.owner, self.repo, id.0);
        let body = serde_json::json!({
            "status": "completed",
            "conclusion": conclusion.as_str(),
        });
        let _: serde_json::Value = self
            .client
            .patch(route, Some(&body))
            .await
            .map_err(|e| CheckError::Api(e.to_string()))?;
        Ok(())
    }
}

/// Drive one containerized check: create the check run against the commit,
/// execute the command, and resolve the check with the terminal conclusion
/// regardless of outcome.
pub async fn run_check<C: ContainerCli, R: CheckReporter>(
    cli: &C,
    reporter: &R,
    inputs: &CheckInputs,
    head_sha: &str,
) -> Result<(), CheckError> {
    let id = reporter.create(&inputs.name, head_sha).await?;
    tracing::debug!("created check run {}", id.0);

    match cli.run(&inputs.flags, &inputs.image, &inputs.command).await {
        Ok(0) => {
            reporter.update(id, Conclusion::Success).await?;
            Ok(())
        }
        Ok(code) => {
            reporter.update(id, Conclusion::Failure).await?;
            Err(CheckError::CommandFailed(code))
        }
        Err(e) => {
            reporter.update(id, Conclusion::Failure).await?;
            Err(CheckError::Cli(e.to_string()))
        }
    }
}
