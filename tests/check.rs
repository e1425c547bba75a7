// ABOUTME: Integration tests for the check helper flow.
// ABOUTME: Verifies create-once/update-once semantics with a mock reporter.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use skala::check::{CheckError, CheckId, CheckReporter, Conclusion, run_check};
use skala::config::{CheckInputs, InputSource};
use skala::docker::{BuildRequest, CliError, ContainerCli, ExitCode};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Created { name: String, head_sha: String },
    Ran { flags: String, image: String, command: String },
    Updated { id: u64, conclusion: Conclusion },
}

/// Records reporter and CLI activity in one shared log so ordering across
/// both collaborators is observable.
#[derive(Default)]
struct Harness {
    events: Mutex<Vec<Event>>,
    run_exit: ExitCode,
}

impl Harness {
    fn with_exit(run_exit: ExitCode) -> Self {
        Self {
            run_exit,
            ..Default::default()
        }
    }

    fn record(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl CheckReporter for Harness {
    async fn create(&self, name: &str, head_sha: &str) -> Result<CheckId, CheckError> {
        self.record(Event::Created {
            name: name.to_string(),
            head_sha: head_sha.to_string(),
        });
        Ok(CheckId(7))
    }

    async fn update(&self, id: CheckId, conclusion: Conclusion) -> Result<(), CheckError> {
        self.record(Event::Updated {
            id: id.0,
            conclusion,
        });
        Ok(())
    }
}

#[async_trait]
impl ContainerCli for Harness {
    async fn pull(&self, _: &str) -> Result<ExitCode, CliError> {
        unreachable!("the check helper never pulls")
    }

    async fn build(&self, _: &BuildRequest) -> Result<ExitCode, CliError> {
        unreachable!("the check helper never builds")
    }

    async fn tag(&self, _: &str, _: &str) -> Result<ExitCode, CliError> {
        unreachable!("the check helper never tags")
    }

    async fn push(&self, _: &str) -> Result<ExitCode, CliError> {
        unreachable!("the check helper never pushes")
    }

    async fn run(&self, flags: &str, image: &str, command: &str) -> Result<ExitCode, CliError> {
        self.record(Event::Ran {
            flags: flags.to_string(),
            image: image.to_string(),
            command: command.to_string(),
        });
        Ok(self.run_exit)
    }
}

fn inputs() -> CheckInputs {
    CheckInputs::parse(&InputSource::from_map(HashMap::from([
        ("token".to_string(), "t0ken".to_string()),
        ("name".to_string(), "integration".to_string()),
        ("image".to_string(), "example.com/acme/app/testenv:abc123".to_string()),
        ("command".to_string(), "cargo test".to_string()),
        ("flags".to_string(), "--network host".to_string()),
    ])))
    .unwrap()
}

#[tokio::test]
async fn successful_command_resolves_the_check_as_success() {
    let harness = Harness::with_exit(0);

    run_check(&harness, &harness, &inputs(), "abc123")
        .await
        .unwrap();

    assert_eq!(
        harness.events(),
        [
            Event::Created {
                name: "integration".to_string(),
                head_sha: "abc123".to_string(),
            },
            Event::Ran {
                flags: "--network host".to_string(),
                image: "example.com/acme/app/testenv:abc123".to_string(),
                command: "cargo test".to_string(),
            },
            Event::Updated {
                id: 7,
                conclusion: Conclusion::Success,
            },
        ]
    );
}

#[tokio::test]
async fn failing_command_resolves_the_check_as_failure() {
    let harness = Harness::with_exit(2);

    let err = run_check(&harness, &harness, &inputs(), "abc123")
        .await
        .unwrap_err();

    assert!(matches!(err, CheckError::CommandFailed(2)));
    assert!(matches!(
        harness.events().last(),
        Some(Event::Updated {
            conclusion: Conclusion::Failure,
            ..
        })
    ));
}

#[test]
fn conclusions_serialize_to_api_values() {
    assert_eq!(Conclusion::Success.as_str(), "success");
    assert_eq!(Conclusion::ActionRequired.as_str(), "action_required");
    assert_eq!(Conclusion::TimedOut.as_str(), "timed_out");
    assert_eq!(Conclusion::Stale.as_str(), "stale");
}
