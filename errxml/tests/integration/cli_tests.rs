use std::fs;
use std::process::{Command, Output};

use crate::common::{TestSource, assert_contains, assert_not_contains, init_test_logging};

const ENV_VARS: &[&str] = &[
    "ERRXML_MARKER",
    "ERRXML_CODE_BASE",
    "ERRXML_LOOKUP_FN",
    "ERRXML_INCLUDE",
    "ERRXML_COMMENT",
    "ERRXML_LOOSE_SPACING",
    "ERRXML_LOG_LEVEL",
    "ERRXML_LOG_FORMAT",
];

pub fn errxml() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_errxml"));
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn run(cmd: &mut Command) -> Output {
    cmd.output().expect("Failed to run errxml")
}

fn printf_lines(stdout: &str) -> Vec<&str> {
    stdout
        .lines()
        .filter(|l| l.trim_start().starts_with("printf("))
        .collect()
}

#[test]
fn test_help_includes_description() {
    init_test_logging();
    crate::test_log!("TEST START: test_help_includes_description");

    let output = run(errxml().arg("--help"));

    assert!(output.status.success(), "errxml --help failed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_contains(&stdout, "LabVIEW error-code XML");
    assert_contains(&stdout, "--loose-spacing");
    crate::test_log!("TEST PASS: test_help_includes_description");
}

#[test]
fn test_generates_program_for_labview_switch() {
    init_test_logging();
    crate::test_log!("TEST START: test_generates_program_for_labview_switch");

    let source = TestSource::labview();
    let output = run(errxml().arg(&source.source));

    assert!(output.status.success(), "errxml failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_contains(&stdout, "#include <stdio.h>\n#include <nanomsg/nn.h>\nvoid main()\n{\n");
    assert_contains(
        &stdout,
        "puts(\"<?xml version=\\\"1.0\\\" encoding=\\\"ISO-8859-1\\\"?><nidocument>\");",
    );
    assert_contains(
        &stdout,
        "puts(\"<nicomment>NANOMSG library error codes</nicomment>\");",
    );
    assert_contains(&stdout, "puts(\"</nidocument>\");\n}\n");

    let entries = printf_lines(&stdout);
    assert_eq!(entries.len(), 5, "unexpected entries: {entries:?}");
    let expected = [
        ("ENOTSUP", 156_384_713),
        ("EPROTONOSUPPORT", 156_384_714),
        ("ETIMEDOUT", 156_384_735),
        ("ETERM", 156_384_765),
        ("EFSM", 156_384_766),
    ];
    for (line, (name, code)) in entries.iter().zip(expected) {
        assert_contains(
            line,
            &format!("<nierror code=\\\"{code}\\\">{name}: %s</nierror>\\n\", nn_strerror({name}));"),
        );
    }
    assert_not_contains(&stdout, "ECRIT");
    crate::test_log!("TEST PASS: test_generates_program_for_labview_switch");
}

#[test]
fn test_default_input_is_read_from_working_directory() {
    init_test_logging();

    let source = TestSource::labview();
    let output = run(errxml().current_dir(source.dir.path()));

    assert!(output.status.success(), "errxml failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(printf_lines(&stdout).len(), 5);
}

#[test]
fn test_missing_input_fails_with_message() {
    init_test_logging();

    let dir = tempfile::tempdir().unwrap();
    let output = run(errxml().current_dir(dir.path()));

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "no program expected on failure");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_contains(&stderr, "Cannot read input file nanomsg_labview.c");
}

#[test]
fn test_missing_input_does_not_create_output_file() {
    init_test_logging();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("errors.c");
    let output = run(errxml()
        .arg(dir.path().join("missing.c"))
        .arg("--output")
        .arg(&out));

    assert!(!output.status.success());
    assert!(!out.exists(), "output file should not be created");
}

#[test]
fn test_empty_input_emits_header_and_footer_only() {
    init_test_logging();

    let source = TestSource::new("");
    let output = run(errxml().arg(&source.source));

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(printf_lines(&stdout).is_empty());
    assert_contains(&stdout, "<nidocument>");
    assert_contains(&stdout, "</nidocument>");
}

#[test]
fn test_output_is_identical_across_runs() {
    init_test_logging();

    let source = TestSource::labview();
    let first = run(errxml().arg(&source.source));
    let second = run(errxml().arg(&source.source));

    assert!(first.status.success() && second.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_output_flag_writes_file() {
    init_test_logging();

    let source = TestSource::labview();
    let out = source.path("errors.c");
    let output = run(errxml().arg(&source.source).arg("-o").arg(&out));

    assert!(output.status.success(), "errxml failed: {:?}", output);
    assert!(output.stdout.is_empty());
    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(printf_lines(&written).len(), 5);

    let to_stdout = run(errxml().arg(&source.source));
    assert_eq!(written.as_bytes(), to_stdout.stdout.as_slice());
}

#[test]
fn test_json_format_lists_entries() {
    init_test_logging();

    let source = TestSource::new(
        "    case ETIMEDOUT: ... ERROR_BASE+5\ncase EAGAIN: ... ERROR_BASE+11\ncase EAGAIN: ... ERROR_BASE+11\n",
    );
    let output = run(errxml().arg(&source.source).args(["--format", "json"]));

    assert!(output.status.success(), "errxml failed: {:?}", output);
    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["name"], "ETIMEDOUT");
    assert_eq!(entries[0]["offset"], 5);
    assert_eq!(entries[0]["code"], 156_384_717u64);
    assert_eq!(entries[1]["code"], 156_384_723u64);
    assert_eq!(entries[1], entries[2]);
}

#[test]
fn test_historical_marker_flag() {
    init_test_logging();

    let source = TestSource::new(
        "case ENOTSUP: return NN_HAUSNUMERO+1;\ncase EFSM: return ERROR_BASE+54;\n",
    );
    let output = run(errxml()
        .arg(&source.source)
        .args(["--marker", "NN_HAUSNUMERO+"]));

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let entries = printf_lines(&stdout);
    assert_eq!(entries.len(), 1);
    assert_contains(entries[0], "ENOTSUP");
}

#[test]
fn test_loose_spacing_flag() {
    init_test_logging();

    let source = TestSource::new("\t\tcase EINVAL:\t\treturn ERROR_BASE + 14;\n");

    let strict = run(errxml().arg(&source.source));
    assert!(strict.status.success());
    assert!(printf_lines(&String::from_utf8_lossy(&strict.stdout)).is_empty());

    let loose = run(errxml().arg(&source.source).arg("--loose-spacing"));
    assert!(loose.status.success());
    let stdout = String::from_utf8_lossy(&loose.stdout);
    let entries = printf_lines(&stdout);
    assert_eq!(entries.len(), 1);
    assert_contains(entries[0], "code=\\\"156384726\\\"");
}

#[test]
fn test_template_flags() {
    init_test_logging();

    let source = TestSource::new("case EFSM: return ERROR_BASE+54;\n");
    let output = run(errxml().arg(&source.source).args([
        "--code-base",
        "1000",
        "--lookup-fn",
        "my_strerror",
        "--include",
        "mylib/err.h",
        "--comment",
        "MYLIB error codes",
    ]));

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_contains(&stdout, "#include <mylib/err.h>");
    assert_contains(&stdout, "<nicomment>MYLIB error codes</nicomment>");
    assert_contains(&stdout, "code=\\\"1054\\\">EFSM: %s</nierror>\\n\", my_strerror(EFSM));");
}

#[test]
fn test_empty_marker_is_rejected() {
    init_test_logging();

    let source = TestSource::labview();
    let output = run(errxml().arg(&source.source).args(["--marker", ""]));

    assert!(!output.status.success());
    assert_contains(
        &String::from_utf8_lossy(&output.stderr),
        "marker must not be empty",
    );
}
