mod scanner;
mod table;

pub use scanner::ReferenceScanner;
pub use table::SymbolTableBuilder;

use crate::archive::ClassArchive;
use crate::classfile::ClassFileDecoder;
use crate::config::Config;
use crate::graph::ArchiveAnalysis;
use colored::Colorize;
use tracing::{debug, info};

/// Runs the two analysis passes over one archive.
///
/// The declaration pass completes before the reference pass starts, so
/// every class that decodes successfully has a registry entry by the time
/// references are resolved against it. A fresh [`ArchiveAnalysis`] is
/// built per archive and nothing is carried over between archives.
pub struct ArchiveAnalyzer<'a> {
    config: &'a Config,
}

impl<'a> ArchiveAnalyzer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Analyze one archive: pass 1 builds the symbol table, pass 2 scans
    /// method bodies for references.
    ///
    /// An entry that fails to decode is reported as a warning and
    /// contributes nothing; the rest of the archive is still analyzed.
    pub fn analyze(&self, archive: &mut ClassArchive) -> ArchiveAnalysis {
        let mut analysis = ArchiveAnalysis::new();
        let entries = archive.class_entries();
        info!(
            "Analyzing {} class entries in {}",
            entries.len(),
            archive.path().display()
        );

        // Pass 1: declarations only, method bodies skipped entirely
        let declaration_decoder = ClassFileDecoder::new().with_code_scan(false);
        for entry_name in &entries {
            debug!("Declaration pass: {entry_name}");
            let mut builder = SymbolTableBuilder::new(&mut analysis);
            let outcome = archive
                .read_entry(entry_name, |stream| {
                    declaration_decoder.decode(stream, &mut builder)
                })
                .map_err(|e| e.to_string())
                .and_then(|decode| decode.map_err(|e| e.to_string()));

            if let Err(reason) = outcome {
                // Roll back whatever the partial decode inserted
                let started = builder.current_class().map(str::to_string);
                if let Some(class_name) = started {
                    analysis.registry.remove(&class_name);
                }
                warn_entry(entry_name, &reason);
            }
        }

        // Pass 2: full decode with instruction scanning
        let code_decoder = ClassFileDecoder::new();
        for entry_name in &entries {
            debug!("Reference pass: {entry_name}");
            let mut scanner = ReferenceScanner::new(&mut analysis, self.config);
            let outcome = archive
                .read_entry(entry_name, |stream| code_decoder.decode(stream, &mut scanner))
                .map_err(|e| e.to_string())
                .and_then(|decode| decode.map_err(|e| e.to_string()));

            if let Err(reason) = outcome {
                warn_entry(entry_name, &reason);
            }
        }

        info!(
            "Registry: {} classes, {} referenced methods, {} referenced fields",
            analysis.registry.len(),
            analysis.method_refs.referenced_member_count(),
            analysis.field_refs.referenced_member_count()
        );
        analysis
    }
}

fn warn_entry(entry_name: &str, reason: &str) {
    eprintln!(
        "{}: skipping entry {}: {}",
        "Warning".yellow(),
        entry_name,
        reason
    );
}
