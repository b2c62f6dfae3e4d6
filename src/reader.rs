//! Big-endian primitive decoding and Modified-UTF-8 string decoding over a byte cursor.
//!
//! Binary format fidelity is paramount here: every read is bit-exact and independent of host
//! endianness, following the `byteorder` convention this lineage of class-file parsers leans on
//! rather than hand-rolled shifts for the primitive cases.
use crate::error::ParseError;
use byteorder::{BigEndian, ReadBytesExt};
use std::io::Cursor;

/// A moving-position view over a class file's bytes.
pub struct ClassReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> ClassReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        ClassReader {
            cursor: Cursor::new(bytes),
        }
    }

    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    pub fn remaining(&self) -> u64 {
        (self.cursor.get_ref().len() as u64).saturating_sub(self.cursor.position())
    }

    pub fn read_u8(&mut self) -> Result<u8, ParseError> {
        self.cursor.read_u8().map_err(|_| ParseError::Truncated)
    }

    pub fn read_i8(&mut self) -> Result<i8, ParseError> {
        self.cursor.read_i8().map_err(|_| ParseError::Truncated)
    }

    pub fn read_u16(&mut self) -> Result<u16, ParseError> {
        self.cursor
            .read_u16::<BigEndian>()
            .map_err(|_| ParseError::Truncated)
    }

    pub fn read_i16(&mut self) -> Result<i16, ParseError> {
        self.cursor
            .read_i16::<BigEndian>()
            .map_err(|_| ParseError::Truncated)
    }

    pub fn read_u32(&mut self) -> Result<u32, ParseError> {
        self.cursor
            .read_u32::<BigEndian>()
            .map_err(|_| ParseError::Truncated)
    }

    pub fn read_i32(&mut self) -> Result<i32, ParseError> {
        self.cursor
            .read_i32::<BigEndian>()
            .map_err(|_| ParseError::Truncated)
    }

    pub fn read_u64(&mut self) -> Result<u64, ParseError> {
        self.cursor
            .read_u64::<BigEndian>()
            .map_err(|_| ParseError::Truncated)
    }

    pub fn read_i64(&mut self) -> Result<i64, ParseError> {
        self.cursor
            .read_i64::<BigEndian>()
            .map_err(|_| ParseError::Truncated)
    }

    pub fn read_f32(&mut self) -> Result<f32, ParseError> {
        self.cursor
            .read_f32::<BigEndian>()
            .map_err(|_| ParseError::Truncated)
    }

    pub fn read_f64(&mut self) -> Result<f64, ParseError> {
        self.cursor
            .read_f64::<BigEndian>()
            .map_err(|_| ParseError::Truncated)
    }

    /// Consumes `count` raw bytes, advancing the cursor. Used for `Raw` attribute skipping.
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>, ParseError> {
        if self.remaining() < count as u64 {
            return Err(ParseError::Truncated);
        }
        let mut buf = vec![0u8; count];
        std::io::Read::read_exact(&mut self.cursor, &mut buf).map_err(|_| ParseError::Truncated)?;
        Ok(buf)
    }

    /// Decodes `length` bytes of Modified-UTF-8 into a UTF-16 code-unit sequence and, for
    /// convenience at host-facing boundaries, an owned `String` decoded via `cesu8`.
    pub fn read_modified_utf8(&mut self, length: u16) -> Result<ModifiedUtf8, ParseError> {
        let bytes = self.read_bytes(length as usize)?;
        decode_modified_utf8(&bytes)
    }
}

/// The result of decoding a Modified-UTF-8 byte sequence: the raw UTF-16 code units (the
/// boundary representation described by the external interface) plus an owned `String` rendering
/// for ergonomic use inside the loader and by host accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifiedUtf8 {
    pub code_units: Vec<u16>,
    pub text: String,
}

/// Decodes the three forms this crate supports (1-, 2-, and 3-byte), per the non-goal that
/// excludes full Modified-UTF-8 conformance (supplementary characters via 6-byte surrogate pairs
/// are not handled). The `text` rendering is produced by `cesu8::from_java_cesu8`, matching how
/// the teacher's own `Constant::Utf8` decoding reaches for that crate rather than hand-rolling a
/// decoder on top of the standard library; `code_units` is derived separately since the external
/// interface specifies a UTF-16 code-unit sequence as the boundary representation and `cesu8` only
/// hands back a `str`.
pub fn decode_modified_utf8(bytes: &[u8]) -> Result<ModifiedUtf8, ParseError> {
    let code_units = decode_code_units(bytes)?;
    let text = cesu8::from_java_cesu8(bytes)
        .map_err(|_| ParseError::Truncated)?
        .into_owned();
    Ok(ModifiedUtf8 { code_units, text })
}

fn decode_code_units(bytes: &[u8]) -> Result<Vec<u16>, ParseError> {
    let mut code_units = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let x = bytes[i];
        let unit = if x & 0x80 == 0 {
            i += 1;
            x as u16
        } else if x & 0xE0 == 0xC0 {
            let y = *bytes.get(i + 1).ok_or(ParseError::Truncated)?;
            i += 2;
            (((x & 0x1F) as u16) << 6) | ((y & 0x3F) as u16)
        } else if x & 0xF0 == 0xE0 {
            let y = *bytes.get(i + 1).ok_or(ParseError::Truncated)?;
            let z = *bytes.get(i + 2).ok_or(ParseError::Truncated)?;
            i += 3;
            (((x & 0x0F) as u16) << 12) | (((y & 0x3F) as u16) << 6) | ((z & 0x3F) as u16)
        } else {
            return Err(ParseError::Truncated);
        };
        code_units.push(unit);
    }
    Ok(code_units)
}
