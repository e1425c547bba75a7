// ABOUTME: Integration tests for action input parsing.
// ABOUTME: Covers required inputs, booleans, and env-sourced values.

use std::collections::HashMap;

use skala::config::*;

fn source(pairs: &[(&str, &str)]) -> InputSource {
    InputSource::from_map(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>(),
    )
}

fn minimal() -> Vec<(&'static str, &'static str)> {
    vec![
        ("stages", "base,deps"),
        ("server-stage", "server"),
        ("repository", "example.com:5000/acme/app"),
    ]
}

mod build_inputs {
    use super::*;

    #[test]
    fn parse_minimal() {
        let inputs = BuildInputs::parse(&source(&minimal())).unwrap();
        assert_eq!(inputs.stages, "base,deps");
        assert_eq!(inputs.server_stage.as_str(), "server");
        assert_eq!(inputs.testenv_stage, None);
        assert_eq!(inputs.repository.as_str(), "example.com:5000/acme/app");
        assert_eq!(inputs.dockerfile, None);
        assert_eq!(inputs.context, ".");
        assert!(inputs.build_args.is_empty());
        assert!(!inputs.tag_latest_on_default);
        assert!(!inputs.quiet);
    }

    #[test]
    fn missing_repository_is_a_typed_error() {
        let mut pairs = minimal();
        pairs.retain(|(k, _)| *k != "repository");
        let err = BuildInputs::parse(&source(&pairs)).unwrap_err();
        assert!(matches!(err, InputError::Missing(name) if name == "repository"));
    }

    #[test]
    fn missing_server_stage_is_a_typed_error() {
        let mut pairs = minimal();
        pairs.retain(|(k, _)| *k != "server-stage");
        let err = BuildInputs::parse(&source(&pairs)).unwrap_err();
        assert!(matches!(err, InputError::Missing(name) if name == "server-stage"));
    }

    #[test]
    fn blank_testenv_stage_means_skipped() {
        let mut pairs = minimal();
        pairs.push(("testenv-stage", "   "));
        let inputs = BuildInputs::parse(&source(&pairs)).unwrap();
        assert_eq!(inputs.testenv_stage, None);
    }

    #[test]
    fn testenv_stage_is_trimmed() {
        let mut pairs = minimal();
        pairs.push(("testenv-stage", " testenv "));
        let inputs = BuildInputs::parse(&source(&pairs)).unwrap();
        assert_eq!(inputs.testenv_stage.unwrap().as_str(), "testenv");
    }

    #[test]
    fn invalid_server_stage_is_a_typed_error() {
        let mut pairs = minimal();
        pairs.retain(|(k, _)| *k != "server-stage");
        pairs.push(("server-stage", "web:1"));
        let err = BuildInputs::parse(&source(&pairs)).unwrap_err();
        assert!(matches!(err, InputError::InvalidStage { name, .. } if name == "server-stage"));
    }

    #[test]
    fn booleans_accept_runner_forms() {
        let mut pairs = minimal();
        pairs.push(("tag-latest-on-default", "True"));
        pairs.push(("quiet", "false"));
        let inputs = BuildInputs::parse(&source(&pairs)).unwrap();
        assert!(inputs.tag_latest_on_default);
        assert!(!inputs.quiet);
    }

    #[test]
    fn malformed_boolean_is_a_typed_error() {
        let mut pairs = minimal();
        pairs.push(("quiet", "yes"));
        let err = BuildInputs::parse(&source(&pairs)).unwrap_err();
        assert!(matches!(err, InputError::InvalidBool { name, .. } if name == "quiet"));
    }

    #[test]
    fn build_args_split_on_newlines_and_commas() {
        let mut pairs = minimal();
        pairs.push(("build-args", "A=1\nB=2, C=3\n"));
        let inputs = BuildInputs::parse(&source(&pairs)).unwrap();
        assert_eq!(inputs.build_args, ["A=1", "B=2", "C=3"]);
    }
}

mod check_inputs {
    use super::*;

    #[test]
    fn parse_full() {
        let inputs = CheckInputs::parse(&source(&[
            ("token", "t0ken"),
            ("name", "integration"),
            ("image", "example.com/acme/app/testenv:abc123"),
            ("command", "cargo test"),
            ("flags", "--network host"),
        ]))
        .unwrap();
        assert_eq!(inputs.name, "integration");
        assert_eq!(inputs.command, "cargo test");
    }

    #[test]
    fn command_and_flags_default_to_empty() {
        let inputs = CheckInputs::parse(&source(&[
            ("token", "t0ken"),
            ("name", "integration"),
            ("image", "app"),
        ]))
        .unwrap();
        assert_eq!(inputs.command, "");
        assert_eq!(inputs.flags, "");
    }

    #[test]
    fn missing_token_is_a_typed_error() {
        let err =
            CheckInputs::parse(&source(&[("name", "integration"), ("image", "app")])).unwrap_err();
        assert!(matches!(err, InputError::Missing(name) if name == "token"));
    }
}

mod env_source {
    use super::*;

    #[test]
    fn reads_mangled_input_variables() {
        temp_env::with_vars(
            [
                ("INPUT_STAGES", Some("base")),
                ("INPUT_SERVER-STAGE", Some("server")),
                ("INPUT_REPOSITORY", Some("example.com/acme/app")),
                ("INPUT_TAG-LATEST-ON-DEFAULT", Some("true")),
            ],
            || {
                let inputs = BuildInputs::parse(&InputSource::from_env()).unwrap();
                assert_eq!(inputs.stages, "base");
                assert_eq!(inputs.server_stage.as_str(), "server");
                assert!(inputs.tag_latest_on_default);
            },
        );
    }
}
