//! Integration tests for resolving a full command line into configured tasks.

use taskline::args::{ArgumentError, ConfigureError};
use taskline::catalog::{BoundValue, DeclaredTarget};
use taskline::config::{Config, ConfigError};
use taskline::{run, RunError};

const CONFIG: &str = r#"
[[targets]]
name = "test"
project = ":app"
[[targets.options]]
name = "tests"
description = "Only run tests matching this filter"
[[targets.options]]
name = "forks"
type = "integer"

[[targets]]
name = "test"
project = ":lib"
[[targets.options]]
name = "tests"
[[targets.options]]
name = "forks"
type = "integer"

[[targets]]
name = "clean"
[[targets.options]]
name = "all"
type = "flag"

[[targets]]
name = "deploy"
project = ":app"
[[targets.options]]
name = "env"
type = "choice"
choices = ["staging", "production"]

[[targets]]
name = "assemble"
[[targets.options]]
name = "project-dir"
"#;

fn config() -> Config {
    let config: Config = toml::from_str(CONFIG).unwrap();
    config.validate().unwrap();
    config
}

fn lines(configured: &[DeclaredTarget]) -> Vec<String> {
    configured.iter().map(DeclaredTarget::command_line).collect()
}

#[test]
fn bare_name_selects_every_matching_task() {
    let configured = run(&config(), &["test", "--tests", "Foo*", "clean"]).unwrap();

    assert_eq!(
        lines(&configured),
        [":app:test --tests=Foo*", ":lib:test --tests=Foo*", ":clean"]
    );
}

#[test]
fn chained_task_receives_its_own_options() {
    let configured = run(&config(), &["test", "--forks", "2", "clean", "--all"]).unwrap();

    assert_eq!(
        lines(&configured),
        [":app:test --forks=2", ":lib:test --forks=2", ":clean --all"]
    );
    assert_eq!(configured[0].value("forks"), Some(&BoundValue::Integer(2)));
    assert_eq!(configured[2].value("all"), Some(&BoundValue::Flag(true)));
}

#[test]
fn scoped_name_selects_one_task() {
    let configured = run(&config(), &[":lib:test", "--tests", "Bar"]).unwrap();
    assert_eq!(lines(&configured), [":lib:test --tests=Bar"]);
}

#[test]
fn task_path_after_earlier_task_selects_one_task() {
    let configured = run(&config(), &["clean", ":app:test", "--tests", "X"]).unwrap();
    assert_eq!(lines(&configured), [":clean", ":app:test --tests=X"]);
}

#[test]
fn colon_prefixed_value_is_not_a_task_path() {
    let configured = run(&config(), &["assemble", "--project-dir", ":app", "clean"]).unwrap();

    assert_eq!(lines(&configured), [":assemble --project-dir=:app", ":clean"]);
    assert_eq!(
        configured[0].value("project-dir"),
        Some(&BoundValue::Text(":app".to_string()))
    );
}

#[test]
fn colon_prefixed_leftover_still_selects_a_task() {
    let configured = run(&config(), &["assemble", ":lib:test", "--forks", "1"]).unwrap();
    assert_eq!(lines(&configured), [":assemble", ":lib:test --forks=1"]);
}

#[test]
fn same_named_tasks_with_different_options_are_rejected() {
    let config: Config = toml::from_str(
        r#"
        [[targets]]
        name = "test"
        project = ":app"
        [[targets.options]]
        name = "tests"

        [[targets]]
        name = "test"
        project = ":lib"

        [[targets]]
        name = "clean"
        "#,
    )
    .unwrap();

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
    assert!(err.to_string().contains("':app:test' and ':lib:test'"));
}

#[test]
fn choice_values_keep_declared_spelling() {
    let configured = run(&config(), &["deploy", "--env=PRODUCTION"]).unwrap();
    assert_eq!(lines(&configured), [":app:deploy --env=production"]);
}

#[test]
fn no_tokens_configure_nothing() {
    let tokens: [&str; 0] = [];
    assert!(run(&config(), &tokens).unwrap().is_empty());
}

#[test]
fn unknown_task_is_reported() {
    let err = run(&config(), &["clean", "publish"]).unwrap_err();
    assert!(matches!(&err, RunError::TargetNotFound { request } if request == "publish"));
    assert_eq!(err.to_string(), "Task 'publish' not found.");
}

#[test]
fn unknown_scoped_task_is_reported_by_path() {
    let err = run(&config(), &[":lib:deploy"]).unwrap_err();
    assert_eq!(err.to_string(), "Task ':lib:deploy' not found.");
}

#[test]
fn missing_value_aborts_the_run() {
    let err = run(&config(), &["test", "--tests"]).unwrap_err();
    assert!(matches!(
        err,
        RunError::Configure(ConfigureError::Parse {
            ref target,
            source: ArgumentError::MissingValue { .. },
        }) if target == ":app:test"
    ));
}

#[test]
fn conversion_failure_aborts_the_run() {
    let err = run(&config(), &["test", "--forks", "many"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Problem configuring option 'forks' on task ':app:test' from command line."
    );
}

#[test]
fn option_for_a_task_that_lacks_it_fails() {
    let err = run(&config(), &["clean", "--tests", "X"]).unwrap_err();
    assert!(matches!(
        err,
        RunError::Configure(ConfigureError::Parse {
            source: ArgumentError::UnknownOption { .. },
            ..
        })
    ));
}
