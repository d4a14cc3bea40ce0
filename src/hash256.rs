use hex;
use ring::digest::{digest, SHA256};
use std::fmt;

/// 256-bit hash
///
/// It is interpreted as a single little-endian number for display.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    /// Converts the hash into a hex string
    pub fn encode(&self) -> String {
        let mut r = self.0.clone();
        r.reverse();
        hex::encode(r)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Hashes a data array once using SHA256
pub fn sha256(data: &[u8]) -> Hash256 {
    let sha256 = digest(&SHA256, data);
    let mut hash256 = [0; 32];
    hash256.clone_from_slice(sha256.as_ref());
    Hash256(hash256)
}

/// Hashes a data array twice using SHA256
pub fn sha256d(data: &[u8]) -> Hash256 {
    let sha256 = digest(&SHA256, &data);
    let sha256d = digest(&SHA256, sha256.as_ref());
    let mut hash256 = [0; 32];
    hash256.clone_from_slice(sha256d.as_ref());
    Hash256(hash256)
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}
