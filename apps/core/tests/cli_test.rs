use assert_cmd::Command;
use predicates::prelude::*;

fn querycraft(config_dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("querycraft").unwrap();
    cmd.arg("--config")
        .arg(config_dir.path().join("config.json"));
    cmd
}

#[test]
fn compose_prints_query_in_filter_order() {
    let dir = tempfile::tempdir().unwrap();
    querycraft(&dir)
        .args(["compose", "cats", "-f", "site:wikipedia.org", "-f", "-ads"])
        .assert()
        .success()
        .stdout("cats site:wikipedia.org -ads\n");
}

#[test]
fn compose_html_highlights_operators() {
    let dir = tempfile::tempdir().unwrap();
    querycraft(&dir)
        .args(["compose", "--html", "-f", "intitle:rust"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<span class=\"qc-operator\">intitle:</span>",
        ));
}

#[test]
fn empty_compose_prints_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    querycraft(&dir)
        .arg("compose")
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("Enter a search term"));
}

#[test]
fn url_uses_configured_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{ search_endpoint: "https://search.example.net/s" }"#,
    )
    .unwrap();

    querycraft(&dir)
        .args(["url", "rust", "-f", "or:tokio|smol"])
        .assert()
        .success()
        .stdout("https://search.example.net/s?q=rust+%28tokio+OR+smol%29\n");
}

#[test]
fn simple_builds_google_url() {
    let dir = tempfile::tempdir().unwrap();
    querycraft(&dir)
        .args(["simple", "term", "--filetype", "pdf", "--site", "example.com"])
        .assert()
        .success()
        .stdout("https://www.google.com/search?q=term+filetype%3Apdf+site%3Aexample.com\n");
}

#[test]
fn unknown_filter_kind_exits_with_usage_code() {
    let dir = tempfile::tempdir().unwrap();
    querycraft(&dir)
        .args(["compose", "x", "-f", "colour:red"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown filter kind 'colour'"));
}

#[test]
fn init_config_writes_defaults() {
    let dir = tempfile::tempdir().unwrap();
    querycraft(&dir).arg("init-config").assert().success();

    let written = std::fs::read_to_string(dir.path().join("config.json")).unwrap();
    assert!(written.contains("https://www.google.com/search"));
}

#[test]
fn log_file_is_written_next_to_explicit_config() {
    let dir = tempfile::tempdir().unwrap();
    querycraft(&dir)
        .args(["compose", "cats"])
        .assert()
        .success();

    assert!(dir.path().join("logs").join("querycraft.log").exists());
}

#[test]
fn unusable_log_dir_is_reported_and_command_still_runs() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("logs"), b"not a directory").unwrap();
    querycraft(&dir)
        .args(["compose", "cats"])
        .assert()
        .success()
        .stdout("cats\n")
        .stderr(predicate::str::contains("file logging unavailable"));
}
