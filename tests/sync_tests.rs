//! Integration tests for sync and the interactive shell

#![allow(deprecated)]

use predicates::prelude::*;
use tempfile::TempDir;

mod common;
use common::{add, init_book, quotebook_cmd, serve_json};

const POSTS: &str = r#"[
    {"userId": 1, "id": 1, "title": "B", "body": "..."},
    {"userId": 1, "id": 2, "title": "C", "body": "..."},
    {"userId": 1, "id": 3, "title": "D", "body": "..."}
]"#;

#[test]
fn test_sync_unreachable_remote_keeps_local() {
    let temp = TempDir::new().unwrap();
    init_book(temp.path());
    add(temp.path(), "x", "A");

    quotebook_cmd()
        .current_dir(temp.path())
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Could not reach the server"))
        .stdout(predicate::str::contains("Quotes already up to date."));

    quotebook_cmd()
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout("1. A (x)\n");
}

#[test]
fn test_sync_remote_wins() {
    let temp = TempDir::new().unwrap();
    init_book(temp.path());
    add(temp.path(), "x", "A");
    add(temp.path(), "y", "B");

    quotebook_cmd()
        .current_dir(temp.path())
        .args(["config", "fetch_limit", "2"])
        .assert()
        .success();

    let url = serve_json(POSTS, 1);
    quotebook_cmd()
        .current_dir(temp.path())
        .env("QUOTEBOOK_REMOTE_URL", &url)
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Quotes synced with server!"));

    quotebook_cmd()
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout("1. B (Server)\n2. C (Server)\n3. A (x)\n");
}

#[test]
fn test_shell_session_script() {
    let temp = TempDir::new().unwrap();
    init_book(temp.path());

    quotebook_cmd()
        .current_dir(temp.path())
        .arg("shell")
        .write_stdin("add Zen Be water.\nadd Art Less is more.\nfilter Art\nlast\ncategories\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Be water. (Zen)"))
        .stdout(predicate::str::contains("Last Quote:\nLess is more.\nCategory: Art"))
        .stdout(predicate::str::contains("* Art"));
}

#[test]
fn test_last_quote_does_not_outlive_session() {
    let temp = TempDir::new().unwrap();
    init_book(temp.path());
    add(temp.path(), "x", "A");

    quotebook_cmd()
        .current_dir(temp.path())
        .arg("shell")
        .write_stdin("filter x\nlast\nfilter nothing\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Last Quote:\nA\nCategory: x"));

    // the new session starts on an empty selection, so nothing is shown
    quotebook_cmd()
        .current_dir(temp.path())
        .arg("shell")
        .write_stdin("last\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("No quotes in this category."))
        .stdout(predicate::str::contains("No last quote available."));
}
