use super::constant_pool::ConstantPool;
use super::opcodes::{
    self, GETFIELD, GETSTATIC, IINC, INVOKEDYNAMIC, INVOKEINTERFACE, INVOKESPECIAL, INVOKESTATIC,
    INVOKEVIRTUAL, LOOKUPSWITCH, NEW, PUTFIELD, PUTSTATIC, TABLESWITCH, WIDE,
};
use super::{ClassEventSink, DecodeError, InstructionEvent};
use std::io::Read;

const MAGIC: u32 = 0xCAFE_BABE;
const CODE_ATTRIBUTE: &str = "Code";

/// Cursor over a class file's bytes. All reads are bounds-checked and a
/// short read surfaces as [`DecodeError::Truncated`].
pub(crate) struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let byte = *self.bytes.get(self.pos).ok_or(DecodeError::Truncated)?;
        self.pos += 1;
        Ok(byte)
    }

    pub(crate) fn read_u16(&mut self) -> Result<u16, DecodeError> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub(crate) fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub(crate) fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let end = self.pos.checked_add(len).ok_or(DecodeError::Truncated)?;
        let slice = self.bytes.get(self.pos..end).ok_or(DecodeError::Truncated)?;
        self.pos = end;
        Ok(slice)
    }

    pub(crate) fn skip(&mut self, len: usize) -> Result<(), DecodeError> {
        self.read_bytes(len).map(|_| ())
    }
}

/// Decoder for one class file's binary form.
///
/// Performs exactly one decode pass per invocation, delivering declaration
/// and instruction events to the supplied sink in file order. The
/// declaration pass of an analysis disables code scanning entirely via
/// [`with_code_scan`](Self::with_code_scan).
#[derive(Debug, Clone)]
pub struct ClassFileDecoder {
    scan_code: bool,
}

impl ClassFileDecoder {
    pub fn new() -> Self {
        Self { scan_code: true }
    }

    /// Enable or disable decoding of method bodies
    pub fn with_code_scan(mut self, scan_code: bool) -> Self {
        self.scan_code = scan_code;
        self
    }

    /// Decode one class file from a byte stream
    pub fn decode<R: Read>(
        &self,
        mut reader: R,
        sink: &mut dyn ClassEventSink,
    ) -> Result<(), DecodeError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.decode_bytes(&bytes, sink)
    }

    /// Decode one class file already held in memory
    pub fn decode_bytes(
        &self,
        bytes: &[u8],
        sink: &mut dyn ClassEventSink,
    ) -> Result<(), DecodeError> {
        let mut r = ByteReader::new(bytes);

        let magic = r.read_u32()?;
        if magic != MAGIC {
            return Err(DecodeError::BadMagic(magic));
        }
        // minor_version, major_version
        r.skip(4)?;

        let pool = ConstantPool::parse(&mut r)?;

        // class access_flags are not needed by the analysis
        r.skip(2)?;
        let this_class = r.read_u16()?;
        let super_class = r.read_u16()?;

        let class_name = pool.class_name(this_class)?;
        let super_name = if super_class == 0 {
            None
        } else {
            Some(pool.class_name(super_class)?)
        };
        sink.class_declared(&class_name, super_name.as_deref());

        let interface_count = r.read_u16()? as usize;
        r.skip(interface_count * 2)?;

        let field_count = r.read_u16()?;
        for _ in 0..field_count {
            let access_flags = r.read_u16()?;
            let name = pool.utf8(r.read_u16()?)?;
            let descriptor = pool.utf8(r.read_u16()?)?;
            sink.field_declared(name, descriptor, access_flags);
            skip_attributes(&mut r)?;
        }

        let method_count = r.read_u16()?;
        for _ in 0..method_count {
            let access_flags = r.read_u16()?;
            let name = pool.utf8(r.read_u16()?)?;
            let descriptor = pool.utf8(r.read_u16()?)?;
            sink.method_declared(name, descriptor, access_flags);

            let attribute_count = r.read_u16()?;
            for _ in 0..attribute_count {
                let attr_name_index = r.read_u16()?;
                let attr_len = r.read_u32()? as usize;
                if self.scan_code && pool.utf8(attr_name_index)? == CODE_ATTRIBUTE {
                    let attr = r.read_bytes(attr_len)?;
                    self.scan_code_attribute(attr, &pool, sink)?;
                } else {
                    r.skip(attr_len)?;
                }
            }
        }

        // Trailing class attributes carry nothing the analysis needs
        Ok(())
    }

    fn scan_code_attribute(
        &self,
        attr: &[u8],
        pool: &ConstantPool,
        sink: &mut dyn ClassEventSink,
    ) -> Result<(), DecodeError> {
        let mut r = ByteReader::new(attr);
        // max_stack, max_locals
        r.skip(4)?;
        let code_len = r.read_u32()? as usize;
        let code = r.read_bytes(code_len)?;
        // exception table and nested attributes are not decoded
        self.scan_code(code, pool, sink)
    }

    /// Walk a method body emitting one event per member-access instruction
    fn scan_code(
        &self,
        code: &[u8],
        pool: &ConstantPool,
        sink: &mut dyn ClassEventSink,
    ) -> Result<(), DecodeError> {
        let mut pc = 0usize;
        while pc < code.len() {
            let opcode = code[pc];
            match opcode {
                GETSTATIC | GETFIELD => {
                    let (owner, name, descriptor) = member_at(code, pc + 1, pool)?;
                    sink.instruction(InstructionEvent::FieldRead {
                        owner,
                        name,
                        descriptor,
                    });
                    pc += 3;
                }
                PUTSTATIC | PUTFIELD => {
                    let (owner, name, descriptor) = member_at(code, pc + 1, pool)?;
                    sink.instruction(InstructionEvent::FieldWrite {
                        owner,
                        name,
                        descriptor,
                    });
                    pc += 3;
                }
                INVOKEVIRTUAL | INVOKESPECIAL | INVOKESTATIC => {
                    let (owner, name, descriptor) = member_at(code, pc + 1, pool)?;
                    sink.instruction(InstructionEvent::Invoke {
                        owner,
                        name,
                        descriptor,
                    });
                    pc += 3;
                }
                INVOKEINTERFACE => {
                    let (owner, name, descriptor) = member_at(code, pc + 1, pool)?;
                    sink.instruction(InstructionEvent::Invoke {
                        owner,
                        name,
                        descriptor,
                    });
                    // index, count byte, zero byte
                    pc += 5;
                }
                INVOKEDYNAMIC => {
                    // No owner class; produces no reference event
                    pc += 5;
                }
                NEW => {
                    let index = code_u16(code, pc + 1)?;
                    sink.instruction(InstructionEvent::Instantiate {
                        class_name: pool.class_name(index)?,
                    });
                    pc += 3;
                }
                TABLESWITCH => {
                    // Operands start 4-byte aligned relative to the code base
                    let operands = (pc + 4) & !3;
                    let low = code_i32(code, operands + 4)?;
                    let high = code_i32(code, operands + 8)?;
                    if high < low {
                        return Err(DecodeError::Truncated);
                    }
                    let count = (high as i64 - low as i64 + 1) as usize;
                    pc = operands + 12 + count * 4;
                }
                LOOKUPSWITCH => {
                    let operands = (pc + 4) & !3;
                    let npairs = code_i32(code, operands + 4)?;
                    if npairs < 0 {
                        return Err(DecodeError::Truncated);
                    }
                    pc = operands + 8 + npairs as usize * 8;
                }
                WIDE => {
                    let modified = *code.get(pc + 1).ok_or(DecodeError::Truncated)?;
                    pc += if modified == IINC { 6 } else { 4 };
                }
                other => {
                    let width =
                        opcodes::operand_width(other).ok_or(DecodeError::UnknownOpcode(other))?;
                    pc += 1 + width;
                }
            }
        }
        Ok(())
    }
}

impl Default for ClassFileDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Skip over an attribute table: count, then (name index, length, bytes)
fn skip_attributes(r: &mut ByteReader<'_>) -> Result<(), DecodeError> {
    let count = r.read_u16()?;
    for _ in 0..count {
        r.skip(2)?;
        let len = r.read_u32()? as usize;
        r.skip(len)?;
    }
    Ok(())
}

fn code_u16(code: &[u8], at: usize) -> Result<u16, DecodeError> {
    let end = at.checked_add(2).ok_or(DecodeError::Truncated)?;
    let bytes = code.get(at..end).ok_or(DecodeError::Truncated)?;
    Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
}

fn code_i32(code: &[u8], at: usize) -> Result<i32, DecodeError> {
    let end = at.checked_add(4).ok_or(DecodeError::Truncated)?;
    let bytes = code.get(at..end).ok_or(DecodeError::Truncated)?;
    Ok(i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn member_at(
    code: &[u8],
    at: usize,
    pool: &ConstantPool,
) -> Result<(String, String, String), DecodeError> {
    let index = code_u16(code, at)?;
    let (owner, name, descriptor) = pool.member_ref(index)?;
    Ok((owner, name.to_string(), descriptor.to_string()))
}
