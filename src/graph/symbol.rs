use std::fmt;

/// Identifies one declared member within an archive's namespace:
/// owning class, member name, and type descriptor.
///
/// For methods the descriptor encodes parameter and return types
/// (e.g. `(ILjava/lang/String;)V`); for fields it encodes the value type
/// (e.g. `Ljava/util/List;`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberKey {
    /// Dot-normalized FQN of the declaring/owning class
    pub owner: String,

    /// Member name
    pub name: String,

    /// Type descriptor, verbatim from the class file
    pub descriptor: String,
}

impl MemberKey {
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }
}

impl fmt::Display for MemberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} {}", self.owner, self.name, self.descriptor)
    }
}

/// A member as declared within its own class: name plus descriptor
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberSig {
    pub name: String,
    pub descriptor: String,
}

impl MemberSig {
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }

    /// The archive-wide key for this member when declared by `owner`
    pub fn key_for(&self, owner: &str) -> MemberKey {
        MemberKey::new(owner, self.name.clone(), self.descriptor.clone())
    }
}

impl fmt::Display for MemberSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.descriptor)
    }
}

/// One class's externally-visible surface, as recorded by the first pass.
///
/// Private members are never inserted; they are invisible to the rest of
/// the analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInfo {
    /// Dot-normalized fully qualified class name
    pub name: String,

    /// Dot-normalized superclass name, absent only for the root type
    pub super_name: Option<String>,

    /// Declared non-private methods
    pub methods: std::collections::BTreeSet<MemberSig>,

    /// Declared non-private fields
    pub fields: std::collections::BTreeSet<MemberSig>,
}

impl ClassInfo {
    pub fn new(name: impl Into<String>, super_name: Option<String>) -> Self {
        Self {
            name: name.into(),
            super_name,
            methods: std::collections::BTreeSet::new(),
            fields: std::collections::BTreeSet::new(),
        }
    }

    pub fn add_method(&mut self, name: impl Into<String>, descriptor: impl Into<String>) {
        self.methods.insert(MemberSig::new(name, descriptor));
    }

    pub fn add_field(&mut self, name: impl Into<String>, descriptor: impl Into<String>) {
        self.fields.insert(MemberSig::new(name, descriptor));
    }
}
