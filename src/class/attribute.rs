//! Class file attributes.
//!
//! `Code` and `InnerClasses` are decoded structurally because the interpreter and the related-class
//! accessors need their contents; `SourceFile`, `LineNumberTable`, `Exceptions`, and `ConstantValue`
//! are decoded because they cost nothing beyond the `Raw` skip path already required. Everything
//! else falls through to `Raw`.
use crate::class::constant::{ConstantPool, TAG_UTF8};
use crate::error::ParseError;
use crate::reader::ClassReader;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionTableEntry {
    pub start_pc: u16,
    pub end_pc: u16,
    pub handler_pc: u16,
    /// Constant pool index of the caught class, or 0 for a catch-all (`finally`).
    pub catch_type: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CodeAttribute {
    pub max_stack: u16,
    pub max_locals: u16,
    pub code: Vec<u8>,
    pub exception_table: Vec<ExceptionTableEntry>,
    pub attributes: Vec<AttributeInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerClassEntry {
    pub inner_class_info_index: u16,
    pub outer_class_info_index: u16,
    pub inner_name_index: u16,
    pub inner_class_access_flags: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerClassesAttribute {
    pub classes: Vec<InnerClassEntry>,
    /// Flattened list of constant-pool indices for every class related to this class through an
    /// `InnerClasses` entry: each entry contributes its inner index, plus its outer index when
    /// present. A dynamic `Vec`, not the fixed-size array the original decoder used (which
    /// silently overflowed past 16 entries).
    pub related_class_info_indexes: Vec<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineNumberEntry {
    pub start_pc: u16,
    pub line_number: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeInfo {
    Code(CodeAttribute),
    InnerClasses(InnerClassesAttribute),
    SourceFile { sourcefile_index: u16 },
    LineNumberTable(Vec<LineNumberEntry>),
    Exceptions { exception_index_table: Vec<u16> },
    ConstantValue { constantvalue_index: u16 },
    Raw { name_index: u16, length: u32, bytes: Vec<u8> },
}

impl AttributeInfo {
    pub fn read(reader: &mut ClassReader, pool: &ConstantPool) -> Result<Self, ParseError> {
        let name_index = reader.read_u16()?;
        pool.check_tag(name_index, &[TAG_UTF8])?;
        let length = reader.read_u32()?;
        let name = pool.utf8(name_index);

        Ok(match name {
            "Code" => AttributeInfo::Code(Self::read_code(reader, pool)?),
            "InnerClasses" => AttributeInfo::InnerClasses(Self::read_inner_classes(reader)?),
            "SourceFile" => AttributeInfo::SourceFile {
                sourcefile_index: reader.read_u16()?,
            },
            "LineNumberTable" => AttributeInfo::LineNumberTable(Self::read_line_numbers(reader)?),
            "Exceptions" => AttributeInfo::Exceptions {
                exception_index_table: Self::read_u16_list(reader)?,
            },
            "ConstantValue" => AttributeInfo::ConstantValue {
                constantvalue_index: reader.read_u16()?,
            },
            other => {
                debug!("unrecognized attribute {:?}, skipping {} bytes", other, length);
                AttributeInfo::Raw {
                    name_index,
                    length,
                    bytes: reader.read_bytes(length as usize)?,
                }
            }
        })
    }

    fn read_code(reader: &mut ClassReader, pool: &ConstantPool) -> Result<CodeAttribute, ParseError> {
        let max_stack = reader.read_u16()?;
        let max_locals = reader.read_u16()?;
        let code_length = reader.read_u32()?;
        let code = reader.read_bytes(code_length as usize)?;

        let exception_table_length = reader.read_u16()?;
        let mut exception_table = Vec::with_capacity(exception_table_length as usize);
        for _ in 0..exception_table_length {
            exception_table.push(ExceptionTableEntry {
                start_pc: reader.read_u16()?,
                end_pc: reader.read_u16()?,
                handler_pc: reader.read_u16()?,
                catch_type: reader.read_u16()?,
            });
        }

        let attributes_count = reader.read_u16()?;
        let mut attributes = Vec::with_capacity(attributes_count as usize);
        for _ in 0..attributes_count {
            attributes.push(AttributeInfo::read(reader, pool)?);
        }

        Ok(CodeAttribute {
            max_stack,
            max_locals,
            code,
            exception_table,
            attributes,
        })
    }

    fn read_inner_classes(reader: &mut ClassReader) -> Result<InnerClassesAttribute, ParseError> {
        let number_of_classes = reader.read_u16()?;
        let mut classes = Vec::with_capacity(number_of_classes as usize);
        let mut related_class_info_indexes = Vec::new();

        for _ in 0..number_of_classes {
            let inner_class_info_index = reader.read_u16()?;
            let outer_class_info_index = reader.read_u16()?;
            let inner_name_index = reader.read_u16()?;
            let inner_class_access_flags = reader.read_u16()?;

            related_class_info_indexes.push(inner_class_info_index);
            if outer_class_info_index != 0 {
                related_class_info_indexes.push(outer_class_info_index);
            }

            classes.push(InnerClassEntry {
                inner_class_info_index,
                outer_class_info_index,
                inner_name_index,
                inner_class_access_flags,
            });
        }

        Ok(InnerClassesAttribute {
            classes,
            related_class_info_indexes,
        })
    }

    fn read_line_numbers(reader: &mut ClassReader) -> Result<Vec<LineNumberEntry>, ParseError> {
        let count = reader.read_u16()?;
        let mut entries = Vec::with_capacity(count as usize);
        for _ in 0..count {
            entries.push(LineNumberEntry {
                start_pc: reader.read_u16()?,
                line_number: reader.read_u16()?,
            });
        }
        Ok(entries)
    }

    fn read_u16_list(reader: &mut ClassReader) -> Result<Vec<u16>, ParseError> {
        let count = reader.read_u16()?;
        let mut entries = Vec::with_capacity(count as usize);
        for _ in 0..count {
            entries.push(reader.read_u16()?);
        }
        Ok(entries)
    }
}
