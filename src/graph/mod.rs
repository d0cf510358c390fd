// Graph module - some lookup methods reserved for future use
#![allow(dead_code)]

mod symbol;

pub use symbol::{ClassInfo, MemberKey, MemberSig};

use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Registry of the classes declared in one archive, keyed by FQN.
///
/// Built by the first pass, read-only afterward. Ordered so that reports
/// iterate classes deterministically.
#[derive(Debug, Default)]
pub struct ClassRegistry {
    classes: BTreeMap<String, ClassInfo>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a class, replacing any previous entry with the same FQN
    pub fn insert(&mut self, info: ClassInfo) {
        self.classes.insert(info.name.clone(), info);
    }

    pub fn get(&self, class_name: &str) -> Option<&ClassInfo> {
        self.classes.get(class_name)
    }

    pub fn get_mut(&mut self, class_name: &str) -> Option<&mut ClassInfo> {
        self.classes.get_mut(class_name)
    }

    /// Remove a class, e.g. to roll back the partial contribution of an
    /// entry whose decoding failed midway
    pub fn remove(&mut self, class_name: &str) -> Option<ClassInfo> {
        self.classes.remove(class_name)
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.classes.contains_key(class_name)
    }

    /// Iterate classes in FQN order
    pub fn classes(&self) -> impl Iterator<Item = &ClassInfo> {
        self.classes.values()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// One of the two per-archive reference graphs: member key to the set of
/// classes whose bytecode uses that member.
///
/// Edges are deduplicated per (key, referencing class) pair; only presence
/// is tracked, not multiplicity. A key with no entry is, by definition,
/// unreferenced. Referencing-class sets are ordered so truncated listings
/// are stable across runs.
#[derive(Debug, Default)]
pub struct ReferenceGraph {
    edges: HashMap<MemberKey, BTreeSet<String>>,
}

impl ReferenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `referencing_class` uses the member identified by `key`
    pub fn record(&mut self, key: MemberKey, referencing_class: impl Into<String>) {
        self.edges
            .entry(key)
            .or_default()
            .insert(referencing_class.into());
    }

    /// The classes referencing this member, if any
    pub fn referencers(&self, key: &MemberKey) -> Option<&BTreeSet<String>> {
        self.edges.get(key)
    }

    pub fn is_referenced(&self, key: &MemberKey) -> bool {
        self.edges.get(key).map(|s| !s.is_empty()).unwrap_or(false)
    }

    /// Number of distinct members with at least one recorded edge
    pub fn referenced_member_count(&self) -> usize {
        self.edges.len()
    }

    /// Total number of recorded (member, referencing class) edges
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(|s| s.len()).sum()
    }
}

/// The full analysis state for one archive: the class registry plus the
/// method and field reference graphs.
///
/// Constructed empty at the start of each archive's analysis and dropped
/// after its report is emitted, so no state can leak between archives.
#[derive(Debug, Default)]
pub struct ArchiveAnalysis {
    pub registry: ClassRegistry,
    pub method_refs: ReferenceGraph,
    pub field_refs: ReferenceGraph,
}

impl ArchiveAnalysis {
    pub fn new() -> Self {
        Self::default()
    }
}
