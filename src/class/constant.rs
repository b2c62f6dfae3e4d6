//! The constant pool: a sequence of tagged variants, indexed 1..count-1, with Long/Double each
//! consuming two slots. There is no untyped pointer indirection here — every accessor matches on
//! tag and fails loudly on mismatch.
use crate::error::ParseError;
use crate::reader::ClassReader;
use std::fmt;
use std::ops::Index;

/// CONSTANT_Utf8
pub const TAG_UTF8: u8 = 1;
/// CONSTANT_Integer
pub const TAG_INTEGER: u8 = 3;
/// CONSTANT_Float
pub const TAG_FLOAT: u8 = 4;
/// CONSTANT_Long
pub const TAG_LONG: u8 = 5;
/// CONSTANT_Double
pub const TAG_DOUBLE: u8 = 6;
/// CONSTANT_Class
pub const TAG_CLASS: u8 = 7;
/// CONSTANT_String
pub const TAG_STRING: u8 = 8;
/// CONSTANT_Fieldref
pub const TAG_FIELDREF: u8 = 9;
/// CONSTANT_Methodref
pub const TAG_METHODREF: u8 = 10;
/// CONSTANT_InterfaceMethodref
pub const TAG_INTERFACE_METHODREF: u8 = 11;
/// CONSTANT_NameAndType
pub const TAG_NAME_AND_TYPE: u8 = 12;

/// A single constant pool entry.
///
/// `Empty` is not itself a class-file tag; it is the filler slot that follows every `Long` and
/// `Double` entry, and it is also what sits at the conceptually invalid index 0. Dereferencing it
/// is always a bug, so it is represented rather than left undefined.
#[derive(Debug, Clone, PartialEq)]
pub enum CpEntry {
    Empty,
    Utf8(String),
    Integer(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    Class { name_index: u16 },
    String { string_index: u16 },
    Fieldref { class_index: u16, name_and_type_index: u16 },
    Methodref { class_index: u16, name_and_type_index: u16 },
    InterfaceMethodref { class_index: u16, name_and_type_index: u16 },
    NameAndType { name_index: u16, descriptor_index: u16 },
}

impl CpEntry {
    pub fn tag(&self) -> Option<u8> {
        match self {
            CpEntry::Empty => None,
            CpEntry::Utf8(_) => Some(TAG_UTF8),
            CpEntry::Integer(_) => Some(TAG_INTEGER),
            CpEntry::Float(_) => Some(TAG_FLOAT),
            CpEntry::Long(_) => Some(TAG_LONG),
            CpEntry::Double(_) => Some(TAG_DOUBLE),
            CpEntry::Class { .. } => Some(TAG_CLASS),
            CpEntry::String { .. } => Some(TAG_STRING),
            CpEntry::Fieldref { .. } => Some(TAG_FIELDREF),
            CpEntry::Methodref { .. } => Some(TAG_METHODREF),
            CpEntry::InterfaceMethodref { .. } => Some(TAG_INTERFACE_METHODREF),
            CpEntry::NameAndType { .. } => Some(TAG_NAME_AND_TYPE),
        }
    }

    fn read(index: u16, reader: &mut ClassReader) -> Result<Self, ParseError> {
        let tag = reader.read_u8()?;
        Ok(match tag {
            TAG_UTF8 => {
                let length = reader.read_u16()?;
                CpEntry::Utf8(reader.read_modified_utf8(length)?.text)
            }
            TAG_INTEGER => CpEntry::Integer(reader.read_i32()?),
            TAG_FLOAT => CpEntry::Float(reader.read_f32()?),
            TAG_LONG => CpEntry::Long(reader.read_i64()?),
            TAG_DOUBLE => CpEntry::Double(reader.read_f64()?),
            TAG_CLASS => CpEntry::Class {
                name_index: reader.read_u16()?,
            },
            TAG_STRING => CpEntry::String {
                string_index: reader.read_u16()?,
            },
            TAG_FIELDREF => CpEntry::Fieldref {
                class_index: reader.read_u16()?,
                name_and_type_index: reader.read_u16()?,
            },
            TAG_METHODREF => CpEntry::Methodref {
                class_index: reader.read_u16()?,
                name_and_type_index: reader.read_u16()?,
            },
            TAG_INTERFACE_METHODREF => CpEntry::InterfaceMethodref {
                class_index: reader.read_u16()?,
                name_and_type_index: reader.read_u16()?,
            },
            TAG_NAME_AND_TYPE => CpEntry::NameAndType {
                name_index: reader.read_u16()?,
                descriptor_index: reader.read_u16()?,
            },
            other => return Err(ParseError::BadTag { index, tag: other }),
        })
    }
}

/// The pool itself, 1-indexed to match the class file format (slot 0 does not exist).
#[derive(Debug, Clone, Default)]
pub struct ConstantPool {
    entries: Vec<CpEntry>,
}

impl ConstantPool {
    /// Decodes `constant_pool_count - 1` logical entries, expanding to `constant_pool_count - 1`
    /// vector slots with an `Empty` filler following every `Long`/`Double` (P2).
    pub fn read(reader: &mut ClassReader) -> Result<Self, ParseError> {
        let count = reader.read_u16()?;
        let mut entries = Vec::with_capacity(count as usize);

        let mut index = 1u16;
        while index < count {
            let entry = CpEntry::read(index, reader)?;
            let wide = matches!(entry, CpEntry::Long(_) | CpEntry::Double(_));
            trace!("constant pool {}/{}: {:?}", index, count - 1, entry);
            entries.push(entry);
            if wide {
                entries.push(CpEntry::Empty);
                index += 2;
            } else {
                index += 1;
            }
        }

        Ok(ConstantPool { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Non-panicking lookup, used while validating cross-references during loading.
    pub fn get(&self, index: u16) -> Option<&CpEntry> {
        (index as usize).checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// Validates that `index` refers to an in-bounds, non-filler entry whose tag matches one of
    /// `expected`. Returns `BadCrossReference` otherwise; used by the loader to reject malformed
    /// cross-references instead of panicking mid-parse.
    pub fn check_tag(&self, index: u16, expected: &[u8]) -> Result<(), ParseError> {
        match self.get(index).and_then(CpEntry::tag) {
            Some(tag) if expected.contains(&tag) => Ok(()),
            _ => Err(ParseError::BadCrossReference { index }),
        }
    }

    pub fn utf8(&self, index: u16) -> &str {
        match self.get(index) {
            Some(CpEntry::Utf8(text)) => text,
            other => panic!("expected Utf8 constant at index {}, found {:?}", index, other),
        }
    }

    pub fn class_name(&self, index: u16) -> &str {
        match self.get(index) {
            Some(CpEntry::Class { name_index }) => self.utf8(*name_index),
            other => panic!("expected Class constant at index {}, found {:?}", index, other),
        }
    }

    pub fn name_and_type(&self, index: u16) -> (&str, &str) {
        match self.get(index) {
            Some(CpEntry::NameAndType { name_index, descriptor_index }) => {
                (self.utf8(*name_index), self.utf8(*descriptor_index))
            }
            other => panic!(
                "expected NameAndType constant at index {}, found {:?}",
                index, other
            ),
        }
    }
}

impl Index<u16> for ConstantPool {
    type Output = CpEntry;

    fn index(&self, index: u16) -> &Self::Output {
        self.get(index)
            .expect("index is a valid position in constant pool")
    }
}

impl fmt::Display for CpEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
