// ABOUTME: Stage enumeration from declared inputs.
// ABOUTME: Base stages drive build order; all stages drive cache lookups.

use crate::config::BuildInputs;
use crate::types::{StageName, StageNameError};

/// The declared base stages in build order. Entries are trimmed and empty
/// entries dropped, so a trailing comma or an entirely empty input is fine.
pub fn base_stages(inputs: &BuildInputs) -> Result<Vec<StageName>, StageNameError> {
    inputs
        .stages
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(StageName::new)
        .collect()
}

/// Every stage that may have a published image: the base stages, the server
/// stage, and the test-environment stage when configured. Used only to
/// enumerate cache targets, never as a build order.
pub fn all_stages(inputs: &BuildInputs) -> Result<Vec<StageName>, StageNameError> {
    let mut stages = base_stages(inputs)?;
    stages.push(inputs.server_stage.clone());
    if let Some(testenv) = &inputs.testenv_stage {
        stages.push(testenv.clone());
    }
    Ok(stages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Repository;

    fn inputs(stages: &str, testenv: Option<&str>) -> BuildInputs {
        BuildInputs {
            stages: stages.to_string(),
            server_stage: StageName::new("server").unwrap(),
            testenv_stage: testenv.map(|s| StageName::new(s).unwrap()),
            repository: Repository::new("example.com/acme/app"),
            dockerfile: None,
            context: ".".to_string(),
            build_args: vec![],
            custom_tag: None,
            tag_latest_on_default: false,
            quiet: false,
        }
    }

    #[test]
    fn base_stages_trim_and_drop_empties() {
        let parsed = base_stages(&inputs(" base , deps ,, ", None)).unwrap();
        let names: Vec<_> = parsed.iter().map(StageName::as_str).collect();
        assert_eq!(names, ["base", "deps"]);
    }

    #[test]
    fn empty_input_yields_no_base_stages() {
        assert!(base_stages(&inputs("", None)).unwrap().is_empty());
    }

    #[test]
    fn order_is_preserved() {
        let parsed = base_stages(&inputs("deps,base,tools", None)).unwrap();
        let names: Vec<_> = parsed.iter().map(StageName::as_str).collect();
        assert_eq!(names, ["deps", "base", "tools"]);
    }

    #[test]
    fn invalid_name_is_an_error() {
        assert!(base_stages(&inputs("base,web:1", None)).is_err());
    }

    #[test]
    fn all_stages_appends_server_then_testenv() {
        let parsed = all_stages(&inputs("base", Some("testenv"))).unwrap();
        let names: Vec<_> = parsed.iter().map(StageName::as_str).collect();
        assert_eq!(names, ["base", "server", "testenv"]);
    }

    #[test]
    fn all_stages_without_testenv() {
        let parsed = all_stages(&inputs("base", None)).unwrap();
        let names: Vec<_> = parsed.iter().map(StageName::as_str).collect();
        assert_eq!(names, ["base", "server"]);
    }
}
