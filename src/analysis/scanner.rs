use crate::classfile::{
    ClassEventSink, InstructionEvent, CONSTRUCTOR_NAME, NO_ARG_VOID_DESCRIPTOR,
    STATIC_INITIALIZER_NAME,
};
use crate::config::Config;
use crate::graph::{ArchiveAnalysis, MemberKey};

/// Second pass: consumes instruction events and records member-usage
/// edges in the method and field reference graphs.
///
/// Every edge is attributed to the class whose bytecode contains the
/// instruction. Self-references are recorded like any other edge; a class
/// keeping one of its own members alive is still usage. Edges may target
/// members with no registry entry (standard-library calls and the like);
/// those simply go unused during reporting.
pub struct ReferenceScanner<'a> {
    analysis: &'a mut ArchiveAnalysis,
    config: &'a Config,
    current: Option<String>,
}

impl<'a> ReferenceScanner<'a> {
    pub fn new(analysis: &'a mut ArchiveAnalysis, config: &'a Config) -> Self {
        Self {
            analysis,
            config,
            current: None,
        }
    }
}

impl ClassEventSink for ReferenceScanner<'_> {
    fn class_declared(&mut self, name: &str, _super_name: Option<&str>) {
        self.current = Some(name.to_string());
    }

    fn instruction(&mut self, event: InstructionEvent) {
        let Some(current) = self.current.clone() else {
            return;
        };

        match event {
            InstructionEvent::Invoke {
                owner,
                name,
                descriptor,
            } => {
                if self.config.is_object_class(&owner) {
                    return;
                }
                // Constructor and static-initializer invocations are
                // covered by the instantiate edge instead
                if name == CONSTRUCTOR_NAME || name == STATIC_INITIALIZER_NAME {
                    return;
                }
                self.analysis
                    .method_refs
                    .record(MemberKey::new(owner, name, descriptor), current);
            }
            InstructionEvent::FieldRead {
                owner,
                name,
                descriptor,
            }
            | InstructionEvent::FieldWrite {
                owner,
                name,
                descriptor,
            } => {
                if self.config.is_object_class(&owner) {
                    return;
                }
                self.analysis
                    .field_refs
                    .record(MemberKey::new(owner, name, descriptor), current);
            }
            InstructionEvent::Instantiate { class_name } => {
                // Construction registers against the zero-argument
                // constructor key regardless of the overload actually
                // invoked afterwards
                self.analysis.method_refs.record(
                    MemberKey::new(class_name, CONSTRUCTOR_NAME, NO_ARG_VOID_DESCRIPTOR),
                    current,
                );
            }
        }
    }
}
