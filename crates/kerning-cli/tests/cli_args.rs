use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("kerning").unwrap()
}

#[test]
fn help_flag_prints_usage_with_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("layout"))
        .stdout(predicate::str::contains("hyphenate"));
}

#[test]
fn render_subcommand_help() {
    cmd()
        .args(["render", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FILE"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--font"));
}

#[test]
fn layout_subcommand_help() {
    cmd()
        .args(["layout", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--format"))
        .stdout(predicate::str::contains("--columns"));
}

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn render_requires_output() {
    cmd()
        .args(["render", "essay.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output"));
}

#[test]
fn invalid_format_value() {
    cmd()
        .args(["layout", "essay.txt", "--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
