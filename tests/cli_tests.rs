//! CLI integration tests for the offline subcommands

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

const SAMPLE_TRACK: &str = "\
1
00:00:00,000 --> 00:00:01,000
Hola mundo

2
00:00:01,000 --> 00:00:04,000
esto es una prueba
";

fn write_sample(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("voz.srt");
    fs::write(&path, SAMPLE_TRACK).unwrap();
    path
}

#[test]
fn scenes_prints_merged_scene_listing() {
    let dir = tempfile::tempdir().unwrap();
    let srt = write_sample(&dir);

    Command::cargo_bin("shortforge")
        .unwrap()
        .args(["scenes", "--input"])
        .arg(&srt)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Hola mundo esto es una prueba",
        ));
}

#[test]
fn scenes_json_emits_machine_readable_output() {
    let dir = tempfile::tempdir().unwrap();
    let srt = write_sample(&dir);

    Command::cargo_bin("shortforge")
        .unwrap()
        .args(["scenes", "--json", "--input"])
        .arg(&srt)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"start\""))
        .stdout(predicate::str::contains("\"text\""));
}

#[test]
fn cues_writes_word_level_track() {
    let dir = tempfile::tempdir().unwrap();
    let srt = write_sample(&dir);
    let out = dir.path().join("voz_words.srt");

    Command::cargo_bin("shortforge")
        .unwrap()
        .args(["cues", "--input"])
        .arg(&srt)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let rendered = fs::read_to_string(&out).unwrap();
    assert!(rendered.starts_with("1\n00:00:00,000 --> 00:00:00,500\nHola\n"));
    // One cue per word
    assert_eq!(rendered.matches("-->").count(), 6);
}

#[test]
fn wrap_keeps_lines_short() {
    let dir = tempfile::tempdir().unwrap();
    let srt = write_sample(&dir);

    let assert = Command::cargo_bin("shortforge")
        .unwrap()
        .args(["wrap", "--max-chars", "12", "--input"])
        .arg(&srt)
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("esto es una\nprueba"));
}

#[test]
fn missing_input_fails_with_clear_error() {
    Command::cargo_bin("shortforge")
        .unwrap()
        .args(["scenes", "--input", "no_such_file.srt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}
