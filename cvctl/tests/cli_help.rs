use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn help_mentions_the_session_flags() {
    let mut cmd = cargo_bin_cmd!("cvctl");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--viewport"))
        .stdout(predicate::str::contains("--api-key"));
}

#[test]
fn missing_api_key_fails_with_guidance() {
    let mut cmd = cargo_bin_cmd!("cvctl");
    cmd.env_remove("TMDB_API_KEY")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("TMDB_API_KEY"));
}
