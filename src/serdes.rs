use std::io;
use std::io::{Cursor, Read, Write};
use super::result::{Error, Result};

/// An object that may be serialized and deserialized
pub trait Serializable<T> {
    /// Reads the object from serialized form
    fn read(reader: &mut dyn Read) -> Result<T>
    where
        Self: Sized;

    /// Writes the object to serialized form
    fn write(&self, writer: &mut dyn Write) -> io::Result<()>;
}

/// Reads an object that must span the whole of `bytes`
pub fn decode_exact<T: Serializable<T>>(bytes: &[u8]) -> Result<T> {
    let mut cursor = Cursor::new(bytes);
    let value = T::read(&mut cursor)?;
    let consumed = cursor.position() as usize;
    if consumed != bytes.len() {
        let msg = format!("{} trailing bytes", bytes.len() - consumed);
        return Err(Error::BadData(msg));
    }
    Ok(value)
}

/// Reads an object that must span the whole of `bytes`, or None if it can't be read
///
/// Used by the template decoders, which fall back instead of failing.
pub fn decode_lenient<T: Serializable<T>>(bytes: &[u8]) -> Option<T> {
    match decode_exact(bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            trace!("Template payload rejected: {}", e);
            None
        }
    }
}

/// Writes an object into a fresh buffer
pub fn encode<T: Serializable<T>>(value: &T) -> Vec<u8> {
    let mut v = Vec::new();
    // Writes into a Vec never fail
    let _ = value.write(&mut v);
    v
}
