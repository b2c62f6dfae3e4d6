pub mod attribute;
pub mod class_file;
pub mod constant;
mod load;

pub use attribute::{AttributeInfo, CodeAttribute, ExceptionTableEntry, InnerClassesAttribute};
pub use class_file::{AccessFlags, ClassInfo, FieldInfo, MethodInfo};
pub use constant::{ConstantPool, CpEntry};
pub use load::load;
