use std::error::Error;
use std::fs;

use taskrun::cli::CliArgs;
use taskrun::input::load_tasks;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn manifest_tasks_keep_declaration_order() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Tasks.toml");
    fs::write(
        &path,
        r#"
[[task]]
name = "zeta"
duration = 2

[[task]]
name = "alpha"
duration = 5
after = ["zeta"]
"#,
    )?;

    let records = load_tasks(&path)?;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "zeta");
    assert_eq!(records[0].duration, 2);
    assert!(records[0].after.is_empty());
    assert_eq!(records[1].name, "alpha");
    assert_eq!(records[1].after, vec!["zeta".to_string()]);
    Ok(())
}

#[test]
fn empty_manifest_is_rejected() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Tasks.toml");
    fs::write(&path, "# no tasks here\n")?;

    let err = load_tasks(&path).unwrap_err();
    assert!(err.to_string().contains("no tasks found"));
    Ok(())
}

#[test]
fn unknown_keys_are_rejected() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Tasks.toml");
    fs::write(
        &path,
        r#"
[[task]]
name = "a"
duration = 1
priority = 3
"#,
    )?;

    assert!(load_tasks(&path).is_err());
    Ok(())
}

#[test]
fn missing_file_reports_the_path() -> TestResult {
    let err = load_tasks("/definitely/not/here/Tasks.toml").unwrap_err();
    assert!(format!("{err:#}").contains("Tasks.toml"));
    Ok(())
}

#[tokio::test]
async fn validate_mode_succeeds_end_to_end() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Tasks.toml");
    fs::write(
        &path,
        r#"
[[task]]
name = "build"
duration = 2

[[task]]
name = "test"
duration = 5
after = ["build"]
"#,
    )?;

    let args = CliArgs {
        task_file: path.to_string_lossy().into_owned(),
        validate: true,
        run: false,
        log_level: None,
    };
    taskrun::run(args).await?;
    Ok(())
}

#[tokio::test]
async fn validate_mode_fails_on_missing_dependency() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Tasks.toml");
    fs::write(
        &path,
        r#"
[[task]]
name = "build"
duration = 2
after = ["ghost"]
"#,
    )?;

    let args = CliArgs {
        task_file: path.to_string_lossy().into_owned(),
        validate: true,
        run: false,
        log_level: None,
    };
    let err = taskrun::run(args).await.unwrap_err();
    assert!(err.to_string().contains("validation failed"));
    Ok(())
}
