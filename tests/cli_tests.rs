mod common;

use common::{sample_geometry_path, temp_ranking};
use regex::Regex;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn keyrank(args: &[&str], stdin: Option<&str>) -> Output {
    let geometry = sample_geometry_path();
    let mut child = Command::new(env!("CARGO_BIN_EXE_keyrank"))
        .arg("-g")
        .arg(&geometry)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute binary");

    {
        let mut pipe = child.stdin.take().unwrap();
        if let Some(input) = stdin {
            pipe.write_all(input.as_bytes()).unwrap();
        }
    }
    child.wait_with_output().unwrap()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_auto_sort_places_requested_count() {
    let t = temp_ranking();
    let out = keyrank(
        &["sort", path_str(&t.path), "--auto", "-n", "5", "--lengths", "1"],
        None,
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let content = fs::read_to_string(&t.path).unwrap();
    assert_eq!(content.lines().count(), 5);
    assert!(stdout(&out).contains("Placed 5 ngrams this session; 5 of 30 ranked."));

    // A second run continues where the first stopped
    let out = keyrank(
        &["sort", path_str(&t.path), "--auto", "-n", "3", "--lengths", "1"],
        None,
    );
    assert!(out.status.success());
    assert_eq!(fs::read_to_string(&t.path).unwrap().lines().count(), 8);
}

#[test]
fn test_interactive_sort_from_stdin() {
    let t = temp_ranking();
    let out = keyrank(&["sort", path_str(&t.path), "--lengths", "1"], Some("h\nq\n"));
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    // q (index 0) goes in first; w (index 1) was answered easier than it
    assert_eq!(fs::read_to_string(&t.path).unwrap(), "1\n0\n");
    assert!(stdout(&out).contains("Placed 2 ngrams this session; 2 of 30 ranked."));
}

#[test]
fn test_interactive_sort_stops_at_end_of_input() {
    let t = temp_ranking();
    fs::write(&t.path, "0\n").unwrap();
    let out = keyrank(&["sort", path_str(&t.path), "--lengths", "1"], Some(""));
    assert!(out.status.success());
    assert_eq!(fs::read_to_string(&t.path).unwrap(), "0\n");
}

#[test]
fn test_view_json_and_table() {
    let t = temp_ranking();
    fs::write(&t.path, "13\n13,12\n0,10,20\n").unwrap();

    let out = keyrank(&["view", path_str(&t.path), "--json"], None);
    assert!(out.status.success());
    let rows: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1]["rank"], 1);
    assert_eq!(rows[1]["facts"]["symbols"], "fd");
    assert_eq!(rows[2]["facts"]["isSameFingerBigram"], true);

    let out = keyrank(&["view", path_str(&t.path), "--goto", "fd", "-l", "1"], None);
    assert!(out.status.success());
    let text = stdout(&out);
    let row = Regex::new(r"\|\s+1\s+\|\s+13,12\s+\|\s+fd\s+\|").unwrap();
    assert!(row.is_match(&text), "{}", text);
    assert!(text.contains("1 of 3 ranked ngrams shown"));
}

#[test]
fn test_view_huge_limit_shows_rest() {
    let t = temp_ranking();
    fs::write(&t.path, "13\n13,12\n0,10,20\n").unwrap();
    let out = keyrank(
        &["view", path_str(&t.path), "--goto", "fd", "--limit", "18446744073709551615"],
        None,
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout(&out).contains("2 of 3 ranked ngrams shown"));
}

#[test]
fn test_view_goto_missing_ngram_fails() {
    let t = temp_ranking();
    fs::write(&t.path, "13\n").unwrap();
    let out = keyrank(&["view", path_str(&t.path), "--goto", "j"], None);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_check_reports_progress() {
    let t = temp_ranking();
    fs::write(&t.path, "0\n1\n").unwrap();
    let out = keyrank(&["check", path_str(&t.path), "--lengths", "1"], None);
    assert!(out.status.success());

    let text = stdout(&out);
    let ranked = Regex::new(r"Ranked\s+\|\s+2 of 30").unwrap();
    assert!(ranked.is_match(&text), "{}", text);
}

#[test]
fn test_foreign_ranking_fails_check() {
    let t = temp_ranking();
    fs::write(&t.path, "0\n99\n").unwrap();
    let out = keyrank(&["check", path_str(&t.path)], None);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).contains("rank 1:"));
}

#[test]
fn test_corrupt_store_exits_with_error() {
    let t = temp_ranking();
    fs::write(&t.path, "0\nnot,a,number\n").unwrap();
    let out = keyrank(&["sort", path_str(&t.path), "--auto"], None);
    assert_eq!(out.status.code(), Some(1));
    // Nothing was rewritten
    assert_eq!(fs::read_to_string(&t.path).unwrap(), "0\nnot,a,number\n");
}

#[test]
fn test_settings_file_and_flag_override() {
    let t = temp_ranking();
    let settings = t.dir.path().join("settings.json");
    fs::write(&settings, r#"{ "ngrams": { "lengths": "2" } }"#).unwrap();

    // From the file: bigrams only, 2 * 15 * 15 candidates
    let out = keyrank(
        &["--config", path_str(&settings), "check", path_str(&t.path)],
        None,
    );
    assert!(out.status.success());
    assert!(stdout(&out).contains("0 of 450"));

    let out = keyrank(
        &["--config", path_str(&settings), "check", path_str(&t.path), "--lengths", "1"],
        None,
    );
    assert!(out.status.success());
    assert!(stdout(&out).contains("0 of 30"));
}
