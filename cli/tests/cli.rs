use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn wisp() -> Command {
  Command::cargo_bin("wisp").expect("wisp binary should build")
}

fn script(contents: &str) -> tempfile::NamedTempFile {
  let mut file = tempfile::NamedTempFile::new().expect("failed to create temp script");
  write!(file, "{contents}").expect("failed to write temp script");
  file
}

#[test]
fn runs_an_arithmetic_expression_and_prints_the_result() {
  let file = script("print 1 + 2 * 3;");
  wisp().arg(file.path()).assert().success().stdout(predicate::str::contains("7"));
}

#[test]
fn concatenates_string_literals() {
  let file = script("print \"foo\" + \"bar\";");
  wisp().arg(file.path()).assert().success().stdout(predicate::str::contains("foobar"));
}

#[test]
fn defines_and_reads_a_global_variable() {
  let file = script("let x = 40; print x + 2;");
  wisp().arg(file.path()).assert().success().stdout(predicate::str::contains("42"));
}

#[test]
fn reports_a_parse_error_with_exit_code_65() {
  let file = script("1 +;");
  wisp().arg(file.path()).assert().code(65).stderr(predicate::str::contains("Error"));
}

#[test]
fn reports_a_runtime_type_error_with_exit_code_70() {
  let file = script("print 1 + \"a\";");
  wisp().arg(file.path()).assert().code(70).stderr(predicate::str::contains("Operands are not both strings or both numbers"));
}

#[test]
fn reports_an_undefined_variable_with_exit_code_70() {
  let file = script("print missing;");
  wisp().arg(file.path()).assert().code(70).stderr(predicate::str::contains("has not been defined"));
}

#[test]
fn no_arguments_starts_a_repl_that_exits_cleanly_at_eof() {
  wisp().write_stdin("").assert().success().stdout(predicate::str::starts_with("> "));
}

#[test]
fn too_many_arguments_is_a_usage_error() {
  wisp().arg("a").arg("b").assert().code(64).stderr(predicate::str::contains("no path specified"));
}

#[test]
fn nonexistent_file_is_an_io_error() {
  wisp().arg("/no/such/path/does-not-exist.wisp").assert().code(74);
}

#[test]
fn falsey_values_short_circuit_negation_consistently() {
  let file = script("print !none; print !false; print !0;");
  wisp().arg(file.path()).assert().success().stdout(predicate::str::contains("true\ntrue\nfalse"));
}

#[test]
fn repl_session_shares_globals_across_lines() {
  wisp()
    .write_stdin("let x = 42;\nprint x;\n")
    .assert()
    .success()
    .stdout(predicate::str::contains("42"))
    .stderr(predicate::str::is_empty());
}
