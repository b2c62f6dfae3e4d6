//! `load(bytes) -> ClassInfo | ParseError`: the class-file loader's single entry point.
use crate::class::attribute::AttributeInfo;
use crate::class::class_file::{AccessFlags, ClassInfo, FieldInfo, MethodInfo};
use crate::class::constant::{ConstantPool, TAG_CLASS};
use crate::error::ParseError;
use crate::reader::ClassReader;

const CLASS_MAGIC: u32 = 0xCAFE_BABE;

/// Decodes a complete class file from `bytes`. Either a fully resolved [`ClassInfo`] is returned,
/// or a [`ParseError`] describing why the buffer is not a valid class file; partial parses are
/// never exposed.
pub fn load(bytes: &[u8]) -> Result<ClassInfo, ParseError> {
    let mut reader = ClassReader::new(bytes);

    let magic = reader.read_u32()?;
    if magic != CLASS_MAGIC {
        return Err(ParseError::BadMagic(magic));
    }

    let minor_version = reader.read_u16()?;
    let major_version = reader.read_u16()?;
    debug!("loading class file version {}.{}", major_version, minor_version);

    let constant_pool = ConstantPool::read(&mut reader)?;

    let access_flags_bits = reader.read_u16()?;
    let access_flags = AccessFlags::from_bits_truncate(access_flags_bits);

    let this_class = reader.read_u16()?;
    constant_pool.check_tag(this_class, &[TAG_CLASS])?;

    let super_class = reader.read_u16()?;
    if super_class != 0 {
        constant_pool.check_tag(super_class, &[TAG_CLASS])?;
    }

    let interfaces_count = reader.read_u16()?;
    let mut interfaces = Vec::with_capacity(interfaces_count as usize);
    for _ in 0..interfaces_count {
        let index = reader.read_u16()?;
        constant_pool.check_tag(index, &[TAG_CLASS])?;
        interfaces.push(index);
    }

    let fields = read_members(&mut reader, &constant_pool)?;
    let methods = read_members(&mut reader, &constant_pool)?;

    let attributes_count = reader.read_u16()?;
    let mut attributes = Vec::with_capacity(attributes_count as usize);
    for _ in 0..attributes_count {
        attributes.push(AttributeInfo::read(&mut reader, &constant_pool)?);
    }

    info!(
        "loaded class {} ({} fields, {} methods)",
        constant_pool.class_name(this_class),
        fields.len(),
        methods.len()
    );

    Ok(ClassInfo {
        minor_version,
        major_version,
        constant_pool,
        access_flags,
        this_class,
        super_class,
        interfaces,
        fields,
        methods,
        attributes,
    })
}

/// Fields and methods share an identical shape: access_flags, name_index, descriptor_index, then
/// an attribute list. A u16 count prefixes both the field list and the method list.
fn read_members<T>(
    reader: &mut ClassReader,
    pool: &ConstantPool,
) -> Result<Vec<T>, ParseError>
where
    T: FromMemberFields,
{
    let count = reader.read_u16()?;
    let mut members = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let access_flags = AccessFlags::from_bits_truncate(reader.read_u16()?);
        let name_index = reader.read_u16()?;
        let descriptor_index = reader.read_u16()?;
        let attributes_count = reader.read_u16()?;
        let mut attributes = Vec::with_capacity(attributes_count as usize);
        for _ in 0..attributes_count {
            attributes.push(AttributeInfo::read(reader, pool)?);
        }
        members.push(T::from_fields(access_flags, name_index, descriptor_index, attributes));
    }
    Ok(members)
}

trait FromMemberFields {
    fn from_fields(
        access_flags: AccessFlags,
        name_index: u16,
        descriptor_index: u16,
        attributes: Vec<AttributeInfo>,
    ) -> Self;
}

impl FromMemberFields for FieldInfo {
    fn from_fields(
        access_flags: AccessFlags,
        name_index: u16,
        descriptor_index: u16,
        attributes: Vec<AttributeInfo>,
    ) -> Self {
        FieldInfo {
            access_flags,
            name_index,
            descriptor_index,
            attributes,
        }
    }
}

impl FromMemberFields for MethodInfo {
    fn from_fields(
        access_flags: AccessFlags,
        name_index: u16,
        descriptor_index: u16,
        attributes: Vec<AttributeInfo>,
    ) -> Self {
        MethodInfo {
            access_flags,
            name_index,
            descriptor_index,
            attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds the minimal well-formed class file used across these tests: no fields, no methods,
    /// no interfaces, a constant pool with just the two Utf8/Class entries needed for this_class.
    fn minimal_class_bytes(super_present: bool) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&CLASS_MAGIC.to_be_bytes());
        bytes.extend_from_slice(&[0x00, 0x00]); // minor
        bytes.extend_from_slice(&[0x00, 0x34]); // major (52 = Java 8)

        // constant pool: #1 Utf8 "Foo", #2 Class -> #1, #3 Utf8 "java/lang/Object", #4 Class -> #3
        bytes.extend_from_slice(&[0x00, 0x05]); // constant_pool_count = 5
        bytes.push(1); // Utf8
        bytes.extend_from_slice(&[0x00, 0x03]);
        bytes.extend_from_slice(b"Foo");
        bytes.push(7); // Class
        bytes.extend_from_slice(&[0x00, 0x01]);
        bytes.push(1); // Utf8
        bytes.extend_from_slice(&[0x00, 0x10]);
        bytes.extend_from_slice(b"java/lang/Object");
        bytes.push(7); // Class
        bytes.extend_from_slice(&[0x00, 0x03]);

        bytes.extend_from_slice(&[0x00, 0x21]); // access_flags = PUBLIC | SUPER
        bytes.extend_from_slice(&[0x00, 0x02]); // this_class = #2
        if super_present {
            bytes.extend_from_slice(&[0x00, 0x04]); // super_class = #4
        } else {
            bytes.extend_from_slice(&[0x00, 0x00]); // super_class = 0
        }
        bytes.extend_from_slice(&[0x00, 0x00]); // interfaces_count
        bytes.extend_from_slice(&[0x00, 0x00]); // fields_count
        bytes.extend_from_slice(&[0x00, 0x00]); // methods_count
        bytes.extend_from_slice(&[0x00, 0x00]); // attributes_count
        bytes
    }

    #[test]
    fn empty_class_round_trips_names() {
        let bytes = minimal_class_bytes(true);
        let class = load(&bytes).unwrap();
        assert_eq!(class.class_name(), "Foo");
        assert_eq!(class.super_class_name(), Some("java/lang/Object"));
        assert_eq!(class.interfaces_count(), 0);
    }

    #[test]
    fn zero_super_class_is_none() {
        let bytes = minimal_class_bytes(false);
        let class = load(&bytes).unwrap();
        assert_eq!(class.super_class_name(), None);
    }

    #[test]
    fn bad_magic_is_rejected() {
        let mut bytes = minimal_class_bytes(true);
        bytes[0] = 0x00;
        assert_eq!(load(&bytes).unwrap_err(), ParseError::BadMagic(0x00FE_BABE));
    }

    #[test]
    fn truncated_header_is_rejected() {
        let bytes = [0xCA, 0xFE, 0xBA];
        assert_eq!(load(&bytes).unwrap_err(), ParseError::Truncated);
    }
}
