use crate::classfile::{self, ClassEventSink};
use crate::graph::{ArchiveAnalysis, ClassInfo};

/// First pass: consumes declaration events and populates the class
/// registry with each class's non-private members.
///
/// Private members are filtered at insertion, so they never become
/// visible to the reference lookup or the report.
pub struct SymbolTableBuilder<'a> {
    analysis: &'a mut ArchiveAnalysis,
    current: Option<String>,
}

impl<'a> SymbolTableBuilder<'a> {
    pub fn new(analysis: &'a mut ArchiveAnalysis) -> Self {
        Self {
            analysis,
            current: None,
        }
    }

    /// The class this builder has been filling, if a class declaration
    /// was seen. Used to roll back a partially-decoded entry.
    pub fn current_class(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

impl ClassEventSink for SymbolTableBuilder<'_> {
    fn class_declared(&mut self, name: &str, super_name: Option<&str>) {
        self.analysis
            .registry
            .insert(ClassInfo::new(name, super_name.map(str::to_string)));
        self.current = Some(name.to_string());
    }

    fn field_declared(&mut self, name: &str, descriptor: &str, access_flags: u16) {
        if classfile::is_private(access_flags) {
            return;
        }
        if let Some(class_name) = self.current.as_deref() {
            if let Some(info) = self.analysis.registry.get_mut(class_name) {
                info.add_field(name, descriptor);
            }
        }
    }

    fn method_declared(&mut self, name: &str, descriptor: &str, access_flags: u16) {
        if classfile::is_private(access_flags) {
            return;
        }
        if let Some(class_name) = self.current.as_deref() {
            if let Some(info) = self.analysis.registry.get_mut(class_name) {
                info.add_method(name, descriptor);
            }
        }
    }
}
