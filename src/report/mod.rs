mod terminal;

pub use terminal::TerminalReporter;

use crate::config::Config;
use crate::graph::{ArchiveAnalysis, MemberSig, ReferenceGraph};
use std::path::{Path, PathBuf};

/// Classification of one declared member: referenced iff at least one
/// class's bytecode uses it
#[derive(Debug, Clone)]
pub struct MemberReport {
    pub sig: MemberSig,

    /// Referencing classes in lexical order; empty means dead
    pub referenced_by: Vec<String>,
}

impl MemberReport {
    pub fn is_referenced(&self) -> bool {
        !self.referenced_by.is_empty()
    }
}

/// Usage report for one class of the archive
#[derive(Debug, Clone)]
pub struct ClassReport {
    pub name: String,
    pub super_name: Option<String>,
    pub methods: Vec<MemberReport>,
    pub fields: Vec<MemberReport>,
}

impl ClassReport {
    pub fn referenced_methods(&self) -> usize {
        self.methods.iter().filter(|m| m.is_referenced()).count()
    }

    pub fn referenced_fields(&self) -> usize {
        self.fields.iter().filter(|f| f.is_referenced()).count()
    }

    pub fn dead_methods(&self) -> usize {
        self.methods.len() - self.referenced_methods()
    }

    pub fn dead_fields(&self) -> usize {
        self.fields.len() - self.referenced_fields()
    }
}

/// Archive-wide totals over the analyzed (non-excluded) classes
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchiveTotals {
    pub classes: usize,
    pub methods: usize,
    pub referenced_methods: usize,
    pub fields: usize,
    pub referenced_fields: usize,
}

impl ArchiveTotals {
    pub fn dead_methods(&self) -> usize {
        self.methods - self.referenced_methods
    }

    pub fn dead_fields(&self) -> usize {
        self.fields - self.referenced_fields
    }
}

/// The full usage report for one archive, ready for rendering.
///
/// Building the report reads the registry and graphs without mutating
/// them; classes under an excluded namespace prefix appear neither in the
/// per-class sections nor in the totals.
#[derive(Debug, Clone)]
pub struct ArchiveReport {
    pub archive_path: PathBuf,
    pub classes: Vec<ClassReport>,
    pub totals: ArchiveTotals,
}

impl ArchiveReport {
    pub fn build(archive_path: &Path, analysis: &ArchiveAnalysis, config: &Config) -> Self {
        let mut classes = Vec::new();
        let mut totals = ArchiveTotals::default();

        for info in analysis.registry.classes() {
            if config.is_excluded(&info.name) {
                continue;
            }

            let methods = classify(&info.name, &info.methods, &analysis.method_refs);
            let fields = classify(&info.name, &info.fields, &analysis.field_refs);

            let report = ClassReport {
                name: info.name.clone(),
                super_name: info.super_name.clone(),
                methods,
                fields,
            };

            totals.classes += 1;
            totals.methods += report.methods.len();
            totals.referenced_methods += report.referenced_methods();
            totals.fields += report.fields.len();
            totals.referenced_fields += report.referenced_fields();
            classes.push(report);
        }

        Self {
            archive_path: archive_path.to_path_buf(),
            classes,
            totals,
        }
    }
}

fn classify<'a>(
    owner: &str,
    members: impl IntoIterator<Item = &'a MemberSig>,
    graph: &ReferenceGraph,
) -> Vec<MemberReport> {
    members
        .into_iter()
        .map(|sig| {
            let referenced_by = graph
                .referencers(&sig.key_for(owner))
                .map(|classes| classes.iter().cloned().collect())
                .unwrap_or_default();
            MemberReport {
                sig: sig.clone(),
                referenced_by,
            }
        })
        .collect()
}
