//! CLI integration tests: argument handling, exit codes and report text.

use assert_cmd::Command;
use predicates::prelude::*;

#[path = "../common/mod.rs"]
mod common;

use common::{class_jar, ClassBuilder, Op, ACC_PUBLIC};

fn deadjar() -> Command {
    Command::cargo_bin("deadjar").unwrap()
}

fn sample_jar(dir: &std::path::Path) -> std::path::PathBuf {
    let mut a = ClassBuilder::new("com.example.A", "java.lang.Object");
    a.add_method(
        ACC_PUBLIC,
        "run",
        "()V",
        &[
            Op::InvokeVirtual("com.example.B", "foo", "()V"),
            Op::Return,
        ],
    );
    let mut b = ClassBuilder::new("com.example.B", "java.lang.Object");
    b.add_method(ACC_PUBLIC, "foo", "()V", &[Op::Return]);
    b.add_method(ACC_PUBLIC, "unusedHelper", "()V", &[Op::Return]);

    class_jar(
        dir,
        "sample.jar",
        &[("com.example.A", a.build()), ("com.example.B", b.build())],
    )
}

#[test]
fn test_no_arguments_prints_usage_and_fails() {
    deadjar()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_missing_archive_fails() {
    deadjar()
        .arg("/no/such/archive.jar")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist or is not a file"));
}

#[test]
fn test_reports_referenced_and_dead_members() {
    let dir = tempfile::tempdir().unwrap();
    let jar = sample_jar(dir.path());

    deadjar()
        .arg(&jar)
        .assert()
        .success()
        .stdout(predicate::str::contains("com.example.B"))
        .stdout(predicate::str::contains("used by: com.example.A"))
        .stdout(predicate::str::contains("never used"))
        .stdout(predicate::str::contains("Summary: 2 classes analyzed"));
}

#[test]
fn test_missing_archive_does_not_stop_remaining_ones() {
    let dir = tempfile::tempdir().unwrap();
    let jar = sample_jar(dir.path());

    deadjar()
        .arg("/no/such/archive.jar")
        .arg(&jar)
        .assert()
        .failure()
        .stdout(predicate::str::contains("com.example.B"));
}

#[test]
fn test_exclude_flag_hides_namespace() {
    let dir = tempfile::tempdir().unwrap();

    let mut app = ClassBuilder::new("com.example.App", "java.lang.Object");
    app.add_method(ACC_PUBLIC, "ping", "()V", &[Op::Return]);
    let mut other = ClassBuilder::new("com.other.Widget", "java.lang.Object");
    other.add_method(ACC_PUBLIC, "draw", "()V", &[Op::Return]);

    let jar = class_jar(
        dir.path(),
        "mixed.jar",
        &[
            ("com.example.App", app.build()),
            ("com.other.Widget", other.build()),
        ],
    );

    deadjar()
        .arg(&jar)
        .args(["--exclude", "com.other."])
        .assert()
        .success()
        .stdout(predicate::str::contains("com.example.App"))
        .stdout(predicate::str::contains("com.other.Widget").not())
        .stdout(predicate::str::contains("Summary: 1 classes analyzed"));
}

#[test]
fn test_corrupt_entry_warns_but_succeeds() {
    let dir = tempfile::tempdir().unwrap();

    let mut good = ClassBuilder::new("com.example.Good", "java.lang.Object");
    good.add_method(ACC_PUBLIC, "fine", "()V", &[Op::Return]);
    let jar = class_jar(
        dir.path(),
        "corrupt.jar",
        &[
            ("com.example.Broken", b"garbage".to_vec()),
            ("com.example.Good", good.build()),
        ],
    );

    deadjar()
        .arg(&jar)
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning"))
        .stderr(predicate::str::contains("com/example/Broken.class"))
        .stdout(predicate::str::contains("com.example.Good"));
}

#[test]
fn test_config_file_is_honored() {
    let dir = tempfile::tempdir().unwrap();

    let mut app = ClassBuilder::new("com.example.App", "java.lang.Object");
    app.add_method(ACC_PUBLIC, "ping", "()V", &[Op::Return]);
    let mut vendor = ClassBuilder::new("com.vendor.Lib", "java.lang.Object");
    vendor.add_method(ACC_PUBLIC, "init", "()V", &[Op::Return]);

    let jar = class_jar(
        dir.path(),
        "configured.jar",
        &[
            ("com.example.App", app.build()),
            ("com.vendor.Lib", vendor.build()),
        ],
    );

    let config_path = dir.path().join("deadjar.yml");
    std::fs::write(
        &config_path,
        "excluded_prefixes:\n  - \"java.\"\n  - \"com.vendor.\"\n",
    )
    .unwrap();

    deadjar()
        .arg(&jar)
        .args(["--config", config_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("com.example.App"))
        .stdout(predicate::str::contains("com.vendor.Lib").not());
}
