//! CLI help output specs

use crate::prelude::*;

#[test]
fn tw_help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("defer")
        .stdout_has("schedule")
        .stdout_has("unschedule")
        .stdout_has("worker");
}

#[test]
fn tw_defer_help_shows_hints() {
    cli()
        .args(&["defer", "--help"])
        .passes()
        .stdout_has("--reply")
        .stdout_has("--guarantee")
        .stdout_has("--retry");
}

#[test]
fn tw_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}

#[test]
fn tw_unknown_command_is_usage_error() {
    cli().args(&["frobnicate"]).fails_with(2).stdout_empty();
}
