//! Error types for the class loader and interpreter.
//!
//! Neither type reaches for an error-derive crate; both are plain enums with hand-written
//! `Display` impls, matching the house style of the class-parsing code this crate grew out of.
use std::fmt;

/// Raised by [`crate::class::load`] when a class file cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Fewer bytes remained in the buffer than the format required.
    Truncated,
    /// The four-byte magic number was not `0xCAFEBABE`.
    BadMagic(u32),
    /// A constant pool tag byte did not match any known `CONSTANT_*` kind.
    BadTag { index: u16, tag: u8 },
    /// A constant pool index referenced an entry of the wrong kind, or index 0 / a filler slot.
    BadCrossReference { index: u16 },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Truncated => write!(f, "class file truncated"),
            ParseError::BadMagic(magic) => write!(f, "bad magic number: {:#010x}", magic),
            ParseError::BadTag { index, tag } => {
                write!(f, "unknown constant pool tag {} at index {}", tag, index)
            }
            ParseError::BadCrossReference { index } => {
                write!(f, "bad cross-reference to constant pool index {}", index)
            }
        }
    }
}

impl std::error::Error for ParseError {}

impl From<std::io::Error> for ParseError {
    fn from(_: std::io::Error) -> Self {
        ParseError::Truncated
    }
}

/// Raised by the interpreter when it detects its own bug rather than a guest program error.
///
/// The interpreter trusts bytecode as pre-verified (see the crate's design notes); these variants
/// exist so a host running in debug mode can catch a broken frame instead of corrupting memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecError {
    /// The operand stack exceeded its 256-cell capacity.
    StackOverflow,
    /// A pop was attempted on an empty operand stack.
    StackUnderflow,
    /// A load or store referenced a locals slot outside `0..max_locals`.
    LocalIndexOutOfBounds { index: u16, max_locals: u16 },
    /// `pop_frame` was called with no frame on the context.
    NoCurrentFrame,
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecError::StackOverflow => write!(f, "operand stack overflow"),
            ExecError::StackUnderflow => write!(f, "operand stack underflow"),
            ExecError::LocalIndexOutOfBounds { index, max_locals } => write!(
                f,
                "local variable index {} out of bounds (max_locals = {})",
                index, max_locals
            ),
            ExecError::NoCurrentFrame => write!(f, "no current frame"),
        }
    }
}

impl std::error::Error for ExecError {}
