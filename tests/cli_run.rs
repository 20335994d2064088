use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::prelude::*;
use std::path::{Path, PathBuf};

const COURSE_SCRIPT: &str = r#"[
    { "op": "create_module", "name": "Week 1" },
    { "op": "create_module", "name": "Week 2" },
    { "op": "add_link", "to": "1", "title": "Course overview", "url": "https://example.com/overview" },
    { "op": "add_file", "to": "2", "title": "Lecture notes", "file_name": "notes.pdf", "file_type": "application/pdf", "file_data": "JVBERi0xLjQ=" },
    { "op": "add_link", "title": "Office hours", "url": "https://example.com/hours" }
]"#;

fn write_script(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn syllabus(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("syllabus").unwrap();
    cmd.current_dir(dir);
    cmd
}

#[test]
fn run_prints_course_with_refs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let script = write_script(temp_dir.path(), "course.json", COURSE_SCRIPT);

    syllabus(temp_dir.path())
        .arg("run")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Outline"))
        .stdout(predicate::str::contains("Week 1"))
        .stdout(predicate::str::contains("1.1"))
        .stdout(predicate::str::contains("https://example.com/overview"))
        .stdout(predicate::str::contains("notes.pdf (8 bytes)"))
        .stdout(predicate::str::contains("Independent items"))
        .stdout(predicate::str::contains("i1"));
}

#[test]
fn search_filters_the_course() {
    let temp_dir = tempfile::tempdir().unwrap();
    let script = write_script(temp_dir.path(), "course.json", COURSE_SCRIPT);

    syllabus(temp_dir.path())
        .arg("run")
        .arg(&script)
        .arg("--search")
        .arg("NOTES")
        .assert()
        .success()
        .stdout(predicate::str::contains("Lecture notes"))
        .stdout(predicate::str::contains("Week 2"))
        .stdout(predicate::str::contains("Week 1").not())
        .stdout(predicate::str::contains("Office hours").not());
}

#[test]
fn search_without_matches_reports_no_results() {
    let temp_dir = tempfile::tempdir().unwrap();
    let script = write_script(temp_dir.path(), "course.json", COURSE_SCRIPT);

    syllabus(temp_dir.path())
        .args(["run", script.to_str().unwrap(), "-s", "zzzz999"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results found for \"zzzz999\"."))
        .stdout(predicate::str::contains("Empty course").not());
}

#[test]
fn empty_script_reports_empty_course() {
    let temp_dir = tempfile::tempdir().unwrap();
    let script = write_script(temp_dir.path(), "empty.json", "[]");

    syllabus(temp_dir.path())
        .arg("run")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Empty course."));
}

#[test]
fn drag_moves_item_between_modules() {
    let temp_dir = tempfile::tempdir().unwrap();
    let script = write_script(
        temp_dir.path(),
        "drag.json",
        r#"[
            { "op": "create_module", "name": "Week 1" },
            { "op": "create_module", "name": "Week 2" },
            { "op": "add_link", "to": "1", "title": "Course overview", "url": "https://example.com/overview" },
            { "op": "drag", "source": "1.1", "drop": ["2", "canvas"] }
        ]"#,
    );

    syllabus(temp_dir.path())
        .args(["outline", "--verbose", script.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dropped item into a module"))
        .stdout(predicate::str::contains("Add items to this module"))
        .stdout(predicate::str::contains("1 item"));
}

#[test]
fn failing_step_exits_with_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let script = write_script(
        temp_dir.path(),
        "bad.json",
        r#"[
            { "op": "create_module", "name": "Week 1" },
            { "op": "add_link", "to": "1", "title": "   ", "url": "https://example.com" }
        ]"#,
    );

    syllabus(temp_dir.path())
        .arg("run")
        .arg(&script)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Step 2 failed"));
}

#[test]
fn malformed_script_exits_with_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let script = write_script(temp_dir.path(), "broken.json", "{ not json");

    syllabus(temp_dir.path())
        .arg("run")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn config_can_hide_outline_and_urls() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_dir = temp_dir.path().join("conf");
    std::fs::create_dir(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("syllabus.json"),
        r#"{ "show_outline": false, "show_urls": false }"#,
    )
    .unwrap();
    let script = write_script(temp_dir.path(), "course.json", COURSE_SCRIPT);

    syllabus(temp_dir.path())
        .arg("--config")
        .arg(&config_dir)
        .arg("run")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Course overview"))
        .stdout(predicate::str::contains("Outline").not())
        .stdout(predicate::str::contains("https://example.com/overview").not());
}

#[test]
fn unsupported_log_level_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(
        temp_dir.path().join("syllabus.json"),
        r#"{ "log_level": "shouty" }"#,
    )
    .unwrap();
    let script = write_script(temp_dir.path(), "course.json", "[]");

    syllabus(temp_dir.path())
        .arg("run")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported log level"));
}
