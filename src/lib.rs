//! deadjar - Dead member detection for compiled JAR archives
//!
//! This library analyzes the class files packaged in a JAR and reports,
//! per class, which non-private methods and fields are actually referenced
//! by bytecode anywhere in the archive versus never referenced at all.
//!
//! # Architecture
//!
//! The analysis pipeline consists of:
//! 1. **Archive Reading** - Enumerate `.class` entries of the JAR
//! 2. **Decoding** - Decode each class file into declaration and
//!    instruction events
//! 3. **Symbol Table** - First pass over declarations builds the class
//!    registry of accessible members
//! 4. **Reference Scan** - Second pass over method bodies builds the
//!    member reference graphs
//! 5. **Reporting** - Cross-reference the registry against the graphs and
//!    print per-class and archive-wide usage statistics

pub mod archive;
pub mod classfile;
pub mod config;
pub mod graph;
pub mod analysis;
pub mod report;

pub use archive::ClassArchive;
pub use classfile::{ClassEventSink, ClassFileDecoder, DecodeError, InstructionEvent};
pub use config::Config;
pub use graph::{ArchiveAnalysis, ClassInfo, ClassRegistry, MemberKey, MemberSig, ReferenceGraph};
pub use analysis::{ArchiveAnalyzer, ReferenceScanner, SymbolTableBuilder};
pub use report::{ArchiveReport, TerminalReporter};
