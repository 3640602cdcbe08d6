use std::fs;

use crate::cli_tests::errxml;
use crate::common::{TestSource, assert_contains, init_test_logging};

#[test]
fn test_show_config_defaults() {
    init_test_logging();
    crate::test_log!("TEST START: test_show_config_defaults");

    let output = errxml().arg("--show-config").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_contains(&stdout, "marker");
    assert_contains(&stdout, "\"ERROR_BASE+\"");
    assert_contains(&stdout, "156384712");
    assert_contains(&stdout, "# default");
    crate::test_log!("TEST PASS: test_show_config_defaults");
}

#[test]
fn test_show_config_reports_environment_source() {
    init_test_logging();

    let output = errxml()
        .arg("--show-config")
        .env("ERRXML_MARKER", "NN_HAUSNUMERO+")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_contains(&stdout, "\"NN_HAUSNUMERO+\"");
    assert_contains(&stdout, "environment (ERRXML_MARKER)");
}

#[test]
fn test_show_config_json() {
    init_test_logging();

    let source = TestSource::new("");
    let config = source.path("errxml.toml");
    fs::write(&config, "lookup_fn = \"my_strerror\"\n").unwrap();

    let output = errxml()
        .args(["--show-config", "--format", "json", "--code-base", "7"])
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();

    assert!(output.status.success(), "errxml failed: {:?}", output);
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["lookup_fn"]["value"], "my_strerror");
    assert_eq!(value["lookup_fn"]["source"], "file");
    assert_eq!(value["code_base"]["value"], 7);
    assert_eq!(value["code_base"]["source"], "cli");
    assert_eq!(value["marker"]["source"], "default");
}

#[test]
fn test_config_file_drives_generation() {
    init_test_logging();

    let source = TestSource::new("case ETERM: return NN_HAUSNUMERO + 53;\n");
    let config = source.path("errxml.toml");
    fs::write(
        &config,
        "marker = \"NN_HAUSNUMERO+\"\nloose_spacing = true\ncode_base = 0\n",
    )
    .unwrap();

    let output = errxml()
        .arg(&source.source)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();

    assert!(output.status.success(), "errxml failed: {:?}", output);
    assert_contains(
        &String::from_utf8_lossy(&output.stdout),
        "code=\\\"53\\\">ETERM: %s</nierror>",
    );
}

#[test]
fn test_invalid_environment_value_fails() {
    init_test_logging();

    let source = TestSource::labview();
    let output = errxml()
        .arg(&source.source)
        .env("ERRXML_CODE_BASE", "not-a-number")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_contains(&stderr, "Failed to resolve configuration");
    assert_contains(&stderr, "ERRXML_CODE_BASE");
}

#[test]
fn test_invalid_config_file_fails() {
    init_test_logging();

    let source = TestSource::labview();
    let config = source.path("errxml.toml");
    fs::write(&config, "unknown_key = 1\n").unwrap();

    let output = errxml()
        .arg(&source.source)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert_contains(
        &String::from_utf8_lossy(&output.stderr),
        "Failed to parse config file",
    );
}
