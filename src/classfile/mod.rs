//! Class file decoding.
//!
//! One decode pass over a class file's binary form produces an ordered
//! stream of events: a single class declaration, the declared fields and
//! methods, and, per method body, the member-access instructions found in
//! its code. Consumers implement [`ClassEventSink`] and receive the events
//! as they are decoded; the rest of the crate never touches the binary
//! format directly.
//!
//! Debug attributes (line numbers, local variable tables) and stack map
//! frames are never decoded.

mod constant_pool;
mod decoder;
mod opcodes;

pub use decoder::ClassFileDecoder;

use thiserror::Error;

/// Method name of an instance constructor in the class file format
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Method name of a static initializer in the class file format
pub const STATIC_INITIALIZER_NAME: &str = "<clinit>";

/// Descriptor of a zero-argument void method, i.e. a no-arg constructor
pub const NO_ARG_VOID_DESCRIPTOR: &str = "()V";

/// ACC_PRIVATE access flag bit, shared by field and method flags
pub const ACC_PRIVATE: u16 = 0x0002;

/// Check whether a field or method access-flags word marks it private
pub fn is_private(access_flags: u16) -> bool {
    access_flags & ACC_PRIVATE != 0
}

/// A member-access instruction found in a method body.
///
/// Owner and instantiated class names are dot-normalized; descriptors are
/// verbatim from the constant pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstructionEvent {
    /// invokevirtual / invokespecial / invokestatic / invokeinterface
    Invoke {
        owner: String,
        name: String,
        descriptor: String,
    },

    /// getstatic / getfield
    FieldRead {
        owner: String,
        name: String,
        descriptor: String,
    },

    /// putstatic / putfield
    FieldWrite {
        owner: String,
        name: String,
        descriptor: String,
    },

    /// new
    Instantiate { class_name: String },
}

/// Receiver for the event stream of one decoded class file.
///
/// Events arrive in file order: `class_declared` first, then every
/// declared field, then every declared method, each method immediately
/// followed by the instruction events of its body (when code scanning is
/// enabled). All methods default to no-ops so a sink only overrides the
/// events it cares about.
pub trait ClassEventSink {
    fn class_declared(&mut self, _name: &str, _super_name: Option<&str>) {}

    fn field_declared(&mut self, _name: &str, _descriptor: &str, _access_flags: u16) {}

    fn method_declared(&mut self, _name: &str, _descriptor: &str, _access_flags: u16) {}

    fn instruction(&mut self, _event: InstructionEvent) {}
}

/// Failure while decoding one class file entry.
///
/// Always recoverable at the archive level: the offending entry's
/// contribution is dropped and analysis continues with the next entry.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read class file bytes: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of class file data")]
    Truncated,

    #[error("bad magic number 0x{0:08X}")]
    BadMagic(u32),

    #[error("unknown constant pool tag {0}")]
    UnknownConstantTag(u8),

    #[error("constant pool index {0} out of range")]
    BadConstantIndex(u16),

    #[error("constant pool entry {index} is not a {expected}")]
    WrongConstantType { index: u16, expected: &'static str },

    #[error("malformed UTF-8 in constant pool entry {0}")]
    InvalidUtf8(u16),

    #[error("unknown opcode 0x{0:02X} in method body")]
    UnknownOpcode(u8),
}
