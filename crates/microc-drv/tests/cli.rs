//! End-to-end CLI tests: argument handling, stage selection, and error
//! reporting as observed from outside the process.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn microc() -> Command {
    Command::cargo_bin("microc").unwrap()
}

fn source_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".c").unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn help_flag_prints_usage_and_succeeds() {
    microc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("usage: microc"));
}

#[test]
fn missing_input_file_is_a_cli_error() {
    microc()
        .assert()
        .failure()
        .stderr(predicate::str::contains("no input file given"));
}

#[test]
fn nonexistent_source_path_is_reported() {
    microc()
        .arg("/no/such/file.c")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn lex_stage_prints_the_token_stream_to_stdout() {
    let file = source_file("int main() { return 0; }");
    microc()
        .arg("--lex")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("int main ( ) { return 0 ; }"));
}

#[test]
fn parse_stage_prints_an_s_expression_tree() {
    let file = source_file("int main() { return 0; }");
    microc()
        .arg("--parse")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("(top-level (function main"));
}

#[test]
fn default_stage_emits_intel_syntax_assembly() {
    let file = source_file("int main() { return 0; }");
    microc()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("\t.intel_syntax noprefix"));
}

#[test]
fn dash_o_writes_assembly_to_a_file_instead_of_stdout() {
    let file = source_file("int main() { return 0; }");
    let out = NamedTempFile::new().unwrap();
    microc()
        .arg(file.path())
        .arg("-o")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    let written = std::fs::read_to_string(out.path()).unwrap();
    assert!(written.starts_with("\t.intel_syntax noprefix"));
}

#[test]
fn syntax_error_fails_with_a_diagnostic_naming_a_byte_offset() {
    let file = source_file("int main() { return }");
    microc()
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("at byte"));
}

#[test]
fn undeclared_identifier_fails_with_a_semantic_diagnostic() {
    let file = source_file("int main() { return x; }");
    microc()
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("undeclared identifier"));
}

#[test]
fn unknown_flag_is_rejected() {
    microc()
        .arg("--bogus")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized option"));
}

#[test]
fn verbose_flag_does_not_break_a_successful_compile() {
    let file = source_file("int main() { return 0; }");
    microc()
        .arg(file.path())
        .arg("--verbose")
        .assert()
        .success();
}
