use digest::Digest;
use hex;
use ripemd::Ripemd160;
use std::fmt;
use std::io;
use std::io::{Read, Write};
use super::hash256::sha256;
use super::result::{Error, Result};
use super::serdes::Serializable;

/// 160-bit hash for public key and script addresses
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hash160(pub [u8; 20]);

impl Hash160 {
    /// Reads a hash from a slice that must be exactly 20 bytes long
    pub fn from_slice(bytes: &[u8]) -> Result<Hash160> {
        if bytes.len() != 20 {
            let msg = format!("Hash160 must be 20 bytes, got {}", bytes.len());
            return Err(Error::BadData(msg));
        }
        let mut hash160 = [0; 20];
        hash160.copy_from_slice(bytes);
        Ok(Hash160(hash160))
    }

    /// Converts a string of 40 hex characters into a hash
    pub fn decode(s: &str) -> Result<Hash160> {
        Hash160::from_slice(&hex::decode(s)?)
    }
}

impl Serializable<Hash160> for Hash160 {
    fn read(reader: &mut dyn Read) -> Result<Hash160> {
        let mut bytes = [0; 20];
        reader.read_exact(&mut bytes)?;
        Ok(Hash160(bytes))
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        writer.write_all(&self.0)
    }
}

/// Hashes a data array once with SHA256 and again with RIPEMD160
pub fn hash160(data: &[u8]) -> Hash160 {
    let sha256 = sha256(data);
    let mut ripemd160 = Ripemd160::new();
    ripemd160.update(sha256.as_bytes());
    let mut hash160 = [0; 20];
    hash160.copy_from_slice(&ripemd160.finalize());
    Hash160(hash160)
}

impl fmt::Debug for Hash160 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
