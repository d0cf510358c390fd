//! Integration tests for the deadjar analysis pipeline.
//!
//! Each test synthesizes real class file bytes, packs them into a jar and
//! runs the full two-pass analysis against it.

use deadjar::{ArchiveAnalyzer, ArchiveReport, ClassArchive, Config};
use std::path::Path;

#[path = "../common/mod.rs"]
mod common;

use common::{class_jar, ClassBuilder, Op, ACC_PRIVATE, ACC_PUBLIC};

fn analyze(jar: &Path, config: &Config) -> ArchiveReport {
    let mut archive = ClassArchive::open(jar).expect("open archive");
    let analysis = ArchiveAnalyzer::new(config).analyze(&mut archive);
    ArchiveReport::build(jar, &analysis, config)
}

fn class_report<'a>(report: &'a ArchiveReport, name: &str) -> &'a deadjar::report::ClassReport {
    report
        .classes
        .iter()
        .find(|c| c.name == name)
        .unwrap_or_else(|| panic!("class {name} missing from report"))
}

#[test]
fn test_end_to_end_referenced_and_dead_members() {
    let dir = tempfile::tempdir().unwrap();

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
    b.add_method(ACC_PRIVATE, "bar", "()V", &[Op::Return]);
    b.add_method(ACC_PUBLIC, "unusedHelper", "()V", &[Op::Return]);

    let jar = class_jar(
        dir.path(),
        "sample.jar",
        &[("com.example.A", a.build()), ("com.example.B", b.build())],
    );

    let report = analyze(&jar, &Config::default());

    let b_report = class_report(&report, "com.example.B");
    assert_eq!(b_report.super_name.as_deref(), Some("java.lang.Object"));

    let foo = b_report.methods.iter().find(|m| m.sig.name == "foo").unwrap();
    assert!(foo.is_referenced());
    assert_eq!(foo.referenced_by, vec!["com.example.A"]);

    // Private members are invisible to the whole analysis
    assert!(b_report.methods.iter().all(|m| m.sig.name != "bar"));

    let unused = b_report
        .methods
        .iter()
        .find(|m| m.sig.name == "unusedHelper")
        .unwrap();
    assert!(!unused.is_referenced());

    // Aggregates count accessible members only: A.run, B.foo,
    // B.unusedHelper
    assert_eq!(report.totals.classes, 2);
    assert_eq!(report.totals.methods, 3);
    assert_eq!(report.totals.referenced_methods, 1);
}

#[test]
fn test_self_reference_marks_member_referenced() {
    let dir = tempfile::tempdir().unwrap();

    let mut c = ClassBuilder::new("com.example.C", "java.lang.Object");
    c.add_method(
        ACC_PUBLIC,
        "caller",
        "()V",
        &[
            Op::InvokeVirtual("com.example.C", "helper", "()V"),
            Op::Return,
        ],
    );
    c.add_method(ACC_PUBLIC, "helper", "()V", &[Op::Return]);

    let jar = class_jar(dir.path(), "self.jar", &[("com.example.C", c.build())]);
    let report = analyze(&jar, &Config::default());

    let helper = class_report(&report, "com.example.C")
        .methods
        .iter()
        .find(|m| m.sig.name == "helper")
        .unwrap();
    assert!(helper.is_referenced());
    assert_eq!(helper.referenced_by, vec!["com.example.C"]);
}

#[test]
fn test_instantiation_registers_zero_arg_constructor() {
    let dir = tempfile::tempdir().unwrap();

    // A constructs B through its one-argument constructor; the analysis
    // still attributes the use to the zero-argument constructor key
    let mut a = ClassBuilder::new("com.example.A", "java.lang.Object");
    a.add_method(
        ACC_PUBLIC,
        "make",
        "()V",
        &[
            Op::New("com.example.B"),
            Op::InvokeSpecial("com.example.B", "<init>", "(I)V"),
            Op::Return,
        ],
    );

    let mut b = ClassBuilder::new("com.example.B", "java.lang.Object");
    b.add_method(ACC_PUBLIC, "<init>", "()V", &[Op::Return]);
    b.add_method(ACC_PUBLIC, "<init>", "(I)V", &[Op::Return]);

    let jar = class_jar(
        dir.path(),
        "ctor.jar",
        &[("com.example.A", a.build()), ("com.example.B", b.build())],
    );
    let report = analyze(&jar, &Config::default());
    let b_report = class_report(&report, "com.example.B");

    let no_arg = b_report
        .methods
        .iter()
        .find(|m| m.sig.name == "<init>" && m.sig.descriptor == "()V")
        .unwrap();
    assert!(no_arg.is_referenced());
    assert_eq!(no_arg.referenced_by, vec!["com.example.A"]);

    // The constructor overload actually invoked stays unreferenced: the
    // invokespecial on <init> is skipped, only the instantiate edge counts
    let one_arg = b_report
        .methods
        .iter()
        .find(|m| m.sig.name == "<init>" && m.sig.descriptor == "(I)V")
        .unwrap();
    assert!(!one_arg.is_referenced());
}

#[test]
fn test_field_reads_and_writes_count_as_references() {
    let dir = tempfile::tempdir().unwrap();

    let mut a = ClassBuilder::new("com.example.A", "java.lang.Object");
    a.add_method(
        ACC_PUBLIC,
        "touch",
        "()V",
        &[
            Op::GetField("com.example.B", "count", "I"),
            Op::PutStatic("com.example.B", "total", "J"),
            Op::Return,
        ],
    );

    let mut b = ClassBuilder::new("com.example.B", "java.lang.Object");
    b.add_field(ACC_PUBLIC, "count", "I");
    b.add_field(ACC_PUBLIC, "total", "J");
    b.add_field(ACC_PUBLIC, "untouched", "F");

    let jar = class_jar(
        dir.path(),
        "fields.jar",
        &[("com.example.A", a.build()), ("com.example.B", b.build())],
    );
    let report = analyze(&jar, &Config::default());
    let b_report = class_report(&report, "com.example.B");

    let field = |name: &str| b_report.fields.iter().find(|f| f.sig.name == name).unwrap();
    assert!(field("count").is_referenced());
    assert!(field("total").is_referenced());
    assert!(!field("untouched").is_referenced());

    assert_eq!(b_report.referenced_fields(), 2);
    assert_eq!(b_report.dead_fields(), 1);
}

#[test]
fn test_excluded_classes_are_omitted_but_their_references_count() {
    let dir = tempfile::tempdir().unwrap();

    let mut app = ClassBuilder::new("com.example.App", "java.lang.Object");
    app.add_method(ACC_PUBLIC, "ping", "()V", &[Op::Return]);

    // A class under an excluded namespace that references App.ping
    let mut util = ClassBuilder::new("java.util.Thing", "java.lang.Object");
    util.add_method(
        ACC_PUBLIC,
        "poke",
        "()V",
        &[
            Op::InvokeVirtual("com.example.App", "ping", "()V"),
            Op::Return,
        ],
    );

    let jar = class_jar(
        dir.path(),
        "excluded.jar",
        &[
            ("com.example.App", app.build()),
            ("java.util.Thing", util.build()),
        ],
    );
    let report = analyze(&jar, &Config::default());

    // Exclusion applies to reporting, not to edge collection
    assert_eq!(report.totals.classes, 1);
    assert!(report.classes.iter().all(|c| c.name != "java.util.Thing"));

    let ping = class_report(&report, "com.example.App")
        .methods
        .iter()
        .find(|m| m.sig.name == "ping")
        .unwrap();
    assert_eq!(ping.referenced_by, vec!["java.util.Thing"]);
}

#[test]
fn test_referencer_lists_are_lexical_and_stable() {
    let dir = tempfile::tempdir().unwrap();

    let mut classes = Vec::new();
    for caller in ["Zeta", "Alpha", "Mid", "Omega", "Beta"] {
        let name = format!("com.example.{caller}");
        let mut builder = ClassBuilder::new(&name, "java.lang.Object");
        builder.add_method(
            ACC_PUBLIC,
            "go",
            "()V",
            &[
                Op::InvokeVirtual("com.example.B", "foo", "()V"),
                Op::Return,
            ],
        );
        classes.push((name, builder.build()));
    }
    let mut b = ClassBuilder::new("com.example.B", "java.lang.Object");
    b.add_method(ACC_PUBLIC, "foo", "()V", &[Op::Return]);
    classes.push(("com.example.B".to_string(), b.build()));

    let named: Vec<(&str, Vec<u8>)> = classes
        .iter()
        .map(|(name, bytes)| (name.as_str(), bytes.clone()))
        .collect();
    let jar = class_jar(dir.path(), "many.jar", &named);

    let first = analyze(&jar, &Config::default());
    let foo = class_report(&first, "com.example.B")
        .methods
        .iter()
        .find(|m| m.sig.name == "foo")
        .unwrap();
    assert_eq!(
        foo.referenced_by,
        vec![
            "com.example.Alpha",
            "com.example.Beta",
            "com.example.Mid",
            "com.example.Omega",
            "com.example.Zeta",
        ]
    );

    // Re-running over the unmodified archive reproduces the
    // classification exactly
    let second = analyze(&jar, &Config::default());
    let again = class_report(&second, "com.example.B")
        .methods
        .iter()
        .find(|m| m.sig.name == "foo")
        .unwrap();
    assert_eq!(foo.referenced_by, again.referenced_by);
}

#[test]
fn test_corrupt_entry_is_skipped_and_rest_analyzed() {
    let dir = tempfile::tempdir().unwrap();

    let mut good = ClassBuilder::new("com.example.Good", "java.lang.Object");
    good.add_method(ACC_PUBLIC, "fine", "()V", &[Op::Return]);

    let jar = class_jar(
        dir.path(),
        "corrupt.jar",
        &[
            ("com.example.Broken", b"not a class file".to_vec()),
            ("com.example.Good", good.build()),
        ],
    );
    let report = analyze(&jar, &Config::default());

    assert_eq!(report.totals.classes, 1);
    assert_eq!(report.classes[0].name, "com.example.Good");
}

#[test]
fn test_archives_are_analyzed_independently() {
    let dir = tempfile::tempdir().unwrap();

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

    let first_jar = class_jar(
        dir.path(),
        "first.jar",
        &[("com.example.A", a.build()), ("com.example.B", b.build())],
    );

    // The second archive declares B.foo but holds no caller; state from
    // the first analysis must not leak into it
    let mut b_alone = ClassBuilder::new("com.example.B", "java.lang.Object");
    b_alone.add_method(ACC_PUBLIC, "foo", "()V", &[Op::Return]);
    let second_jar = class_jar(
        dir.path(),
        "second.jar",
        &[("com.example.B", b_alone.build())],
    );

    let config = Config::default();
    let first = analyze(&first_jar, &config);
    let second = analyze(&second_jar, &config);

    assert!(class_report(&first, "com.example.B").methods[0].is_referenced());
    let foo = class_report(&second, "com.example.B")
        .methods
        .iter()
        .find(|m| m.sig.name == "foo")
        .unwrap();
    assert!(!foo.is_referenced());
}
