use super::DecodeError;
use crate::classfile::decoder::ByteReader;

// Constant pool tags, JVMS table 4.4-B
const TAG_UTF8: u8 = 1;
const TAG_INTEGER: u8 = 3;
const TAG_FLOAT: u8 = 4;
const TAG_LONG: u8 = 5;
const TAG_DOUBLE: u8 = 6;
const TAG_CLASS: u8 = 7;
const TAG_STRING: u8 = 8;
const TAG_FIELDREF: u8 = 9;
const TAG_METHODREF: u8 = 10;
const TAG_INTERFACE_METHODREF: u8 = 11;
const TAG_NAME_AND_TYPE: u8 = 12;
const TAG_METHOD_HANDLE: u8 = 15;
const TAG_METHOD_TYPE: u8 = 16;
const TAG_DYNAMIC: u8 = 17;
const TAG_INVOKE_DYNAMIC: u8 = 18;
const TAG_MODULE: u8 = 19;
const TAG_PACKAGE: u8 = 20;

/// One parsed constant pool entry. Payloads the analysis never resolves
/// (numbers, strings, handles) are parsed past but not retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Constant {
    Utf8(String),
    Class {
        name_index: u16,
    },
    FieldRef {
        class_index: u16,
        name_and_type_index: u16,
    },
    MethodRef {
        class_index: u16,
        name_and_type_index: u16,
    },
    InterfaceMethodRef {
        class_index: u16,
        name_and_type_index: u16,
    },
    NameAndType {
        name_index: u16,
        descriptor_index: u16,
    },
    /// Integer, Float, String, MethodHandle, MethodType, Dynamic,
    /// InvokeDynamic, Module, Package
    Other,
    /// The phantom second slot occupied by a Long or Double entry
    Unusable,
}

/// The constant pool of one class file, indexed 1..count as in the format
#[derive(Debug)]
pub(crate) struct ConstantPool {
    entries: Vec<Constant>,
}

impl ConstantPool {
    /// Parse `constant_pool_count` and the entries that follow it
    pub(crate) fn parse(r: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        let count = r.read_u16()?;
        let mut entries = Vec::with_capacity(count as usize);

        // Slot 0 is unused in the format; keep indices aligned
        entries.push(Constant::Unusable);

        let mut index = 1u16;
        while index < count {
            let tag = r.read_u8()?;
            let (entry, slots) = match tag {
                TAG_UTF8 => {
                    let len = r.read_u16()? as usize;
                    let bytes = r.read_bytes(len)?;
                    let text = std::str::from_utf8(bytes)
                        .map_err(|_| DecodeError::InvalidUtf8(index))?
                        .to_string();
                    (Constant::Utf8(text), 1)
                }
                TAG_INTEGER | TAG_FLOAT => {
                    r.skip(4)?;
                    (Constant::Other, 1)
                }
                TAG_LONG | TAG_DOUBLE => {
                    r.skip(8)?;
                    (Constant::Other, 2)
                }
                TAG_CLASS => {
                    let name_index = r.read_u16()?;
                    (Constant::Class { name_index }, 1)
                }
                TAG_STRING | TAG_METHOD_TYPE | TAG_MODULE | TAG_PACKAGE => {
                    r.skip(2)?;
                    (Constant::Other, 1)
                }
                TAG_FIELDREF => {
                    let class_index = r.read_u16()?;
                    let name_and_type_index = r.read_u16()?;
                    (
                        Constant::FieldRef {
                            class_index,
                            name_and_type_index,
                        },
                        1,
                    )
                }
                TAG_METHODREF => {
                    let class_index = r.read_u16()?;
                    let name_and_type_index = r.read_u16()?;
                    (
                        Constant::MethodRef {
                            class_index,
                            name_and_type_index,
                        },
                        1,
                    )
                }
                TAG_INTERFACE_METHODREF => {
                    let class_index = r.read_u16()?;
                    let name_and_type_index = r.read_u16()?;
                    (
                        Constant::InterfaceMethodRef {
                            class_index,
                            name_and_type_index,
                        },
                        1,
                    )
                }
                TAG_NAME_AND_TYPE => {
                    let name_index = r.read_u16()?;
                    let descriptor_index = r.read_u16()?;
                    (
                        Constant::NameAndType {
                            name_index,
                            descriptor_index,
                        },
                        1,
                    )
                }
                TAG_METHOD_HANDLE => {
                    r.skip(3)?;
                    (Constant::Other, 1)
                }
                TAG_DYNAMIC | TAG_INVOKE_DYNAMIC => {
                    r.skip(4)?;
                    (Constant::Other, 1)
                }
                other => return Err(DecodeError::UnknownConstantTag(other)),
            };

            entries.push(entry);
            if slots == 2 {
                entries.push(Constant::Unusable);
            }
            index += slots;
        }

        Ok(Self { entries })
    }

    fn get(&self, index: u16) -> Result<&Constant, DecodeError> {
        self.entries
            .get(index as usize)
            .filter(|_| index > 0)
            .ok_or(DecodeError::BadConstantIndex(index))
    }

    /// Resolve a Utf8 entry
    pub(crate) fn utf8(&self, index: u16) -> Result<&str, DecodeError> {
        match self.get(index)? {
            Constant::Utf8(text) => Ok(text),
            _ => Err(DecodeError::WrongConstantType {
                index,
                expected: "Utf8",
            }),
        }
    }

    /// Resolve a Class entry to its dot-normalized name
    pub(crate) fn class_name(&self, index: u16) -> Result<String, DecodeError> {
        match self.get(index)? {
            Constant::Class { name_index } => Ok(normalize_class_name(self.utf8(*name_index)?)),
            _ => Err(DecodeError::WrongConstantType {
                index,
                expected: "Class",
            }),
        }
    }

    /// Resolve a Fieldref, Methodref or InterfaceMethodref entry to
    /// (dot-normalized owner, member name, descriptor)
    pub(crate) fn member_ref(&self, index: u16) -> Result<(String, &str, &str), DecodeError> {
        let (class_index, name_and_type_index) = match self.get(index)? {
            Constant::FieldRef {
                class_index,
                name_and_type_index,
            }
            | Constant::MethodRef {
                class_index,
                name_and_type_index,
            }
            | Constant::InterfaceMethodRef {
                class_index,
                name_and_type_index,
            } => (*class_index, *name_and_type_index),
            _ => {
                return Err(DecodeError::WrongConstantType {
                    index,
                    expected: "Fieldref or Methodref",
                })
            }
        };

        let owner = self.class_name(class_index)?;
        let (name_index, descriptor_index) = match self.get(name_and_type_index)? {
            Constant::NameAndType {
                name_index,
                descriptor_index,
            } => (*name_index, *descriptor_index),
            _ => {
                return Err(DecodeError::WrongConstantType {
                    index: name_and_type_index,
                    expected: "NameAndType",
                })
            }
        };

        Ok((owner, self.utf8(name_index)?, self.utf8(descriptor_index)?))
    }
}

/// Internal (slash-separated) binary name to dot-separated FQN
pub(crate) fn normalize_class_name(internal: &str) -> String {
    internal.replace('/', ".")
}
