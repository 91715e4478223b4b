//! Integration tests for the `example run` command.
use meritsplit::cli::example::handle_example_run_command;
use meritsplit::settings::Settings;
use tempfile::tempdir;

/// An integration test for the `example run` command.
#[test]
fn test_handle_example_run_command() {
    unsafe { std::env::set_var("MERITSPLIT_LOG_LEVEL", "off") };

    let tempdir = tempdir().unwrap();
    let output_dir = tempdir.path().join("results");
    handle_example_run_command("kr", Some(&output_dir), Some(Settings::default())).unwrap();

    assert!(output_dir.join("hourly_production_by_source.csv").is_file());
    assert!(output_dir.join("metadata.toml").is_file());
}
