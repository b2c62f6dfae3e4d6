//! The parsed class file itself: header fields, constant pool, access flags, and the
//! field/method/attribute lists. Produced once by [`crate::class::load`] and immutable thereafter.
use crate::class::attribute::AttributeInfo;
use crate::class::constant::ConstantPool;

bitflags! {
    pub struct AccessFlags: u16 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const SUPER = 0x0020;
        const SYNCHRONIZED = 0x0020;
        const VOLATILE = 0x0040;
        const BRIDGE = 0x0040;
        const TRANSIENT = 0x0080;
        const VARARGS = 0x0080;
        const NATIVE = 0x0100;
        const INTERFACE = 0x0200;
        const ABSTRACT = 0x0400;
        const STRICT = 0x0800;
        const SYNTHETIC = 0x1000;
        const ANNOTATION = 0x2000;
        const ENUM = 0x4000;
        const MODULE = 0x8000;
    }
}

#[derive(Debug, Clone)]
pub struct FieldInfo {
    pub access_flags: AccessFlags,
    pub name_index: u16,
    pub descriptor_index: u16,
    pub attributes: Vec<AttributeInfo>,
}

#[derive(Debug, Clone)]
pub struct MethodInfo {
    pub access_flags: AccessFlags,
    pub name_index: u16,
    pub descriptor_index: u16,
    pub attributes: Vec<AttributeInfo>,
}

impl MethodInfo {
    /// Convenience accessor for the interpreter: most methods have exactly one `Code` attribute.
    pub fn code(&self) -> Option<&crate::class::attribute::CodeAttribute> {
        self.attributes.iter().find_map(|attr| match attr {
            AttributeInfo::Code(code) => Some(code),
            _ => None,
        })
    }
}

/// A fully resolved class file.
#[derive(Debug, Clone)]
pub struct ClassInfo {
    pub minor_version: u16,
    pub major_version: u16,
    pub constant_pool: ConstantPool,
    pub access_flags: AccessFlags,
    pub this_class: u16,
    pub super_class: u16,
    pub interfaces: Vec<u16>,
    pub fields: Vec<FieldInfo>,
    pub methods: Vec<MethodInfo>,
    pub attributes: Vec<AttributeInfo>,
}

impl ClassInfo {
    /// `get_class_name` from the external interface.
    pub fn class_name(&self) -> &str {
        self.constant_pool.class_name(self.this_class)
    }

    /// `get_super_class_name`; `None` when `super_class == 0` (only `java/lang/Object` itself).
    pub fn super_class_name(&self) -> Option<&str> {
        if self.super_class == 0 {
            None
        } else {
            Some(self.constant_pool.class_name(self.super_class))
        }
    }

    /// `get_interfaces_count`.
    pub fn interfaces_count(&self) -> usize {
        self.interfaces.len()
    }

    /// `get_interface_name(i)`.
    pub fn interface_name(&self, i: usize) -> &str {
        self.constant_pool.class_name(self.interfaces[i])
    }

    fn inner_classes(&self) -> Option<&crate::class::attribute::InnerClassesAttribute> {
        self.attributes.iter().find_map(|attr| match attr {
            AttributeInfo::InnerClasses(inner) => Some(inner),
            _ => None,
        })
    }

    /// `get_related_class_count`, derived from the `InnerClasses` attribute if present.
    pub fn related_class_count(&self) -> usize {
        self.inner_classes()
            .map(|inner| inner.related_class_info_indexes.len())
            .unwrap_or(0)
    }

    /// `get_related_class_name(i)`.
    pub fn related_class_name(&self, i: usize) -> &str {
        let inner = self
            .inner_classes()
            .expect("related_class_name called without an InnerClasses attribute");
        self.constant_pool
            .class_name(inner.related_class_info_indexes[i])
    }

    pub fn field(&self, name: &str, descriptor: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|f| {
            self.constant_pool.utf8(f.name_index) == name
                && self.constant_pool.utf8(f.descriptor_index) == descriptor
        })
    }

    pub fn method(&self, name: &str, descriptor: &str) -> Option<&MethodInfo> {
        self.methods.iter().find(|m| {
            self.constant_pool.utf8(m.name_index) == name
                && self.constant_pool.utf8(m.descriptor_index) == descriptor
        })
    }
}
