//! Public keys and DER signatures as they appear inside scripts

use byteorder::ReadBytesExt;
use hex;
use secp256k1::ecdsa::Signature;
use secp256k1::PublicKey;
use std::fmt;
use std::io;
use std::io::{Read, Write};
use super::hash160::{hash160, Hash160};
use super::result::{Error, Result};
use super::serdes::Serializable;

/// First byte of a DER encoded signature
pub const DER_SEQUENCE_TAG: u8 = 0x30;

/// Largest DER signature body
const MAX_DER_BODY: u8 = 70;

/// Public key together with the form it is serialized in
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PubKey {
    key: PublicKey,
    compressed: bool,
}

impl PubKey {
    /// Wraps a key that serializes in 33 byte compressed form
    pub fn compressed(key: PublicKey) -> PubKey {
        PubKey { key, compressed: true }
    }

    /// Wraps a key that serializes in 65 byte uncompressed form
    pub fn uncompressed(key: PublicKey) -> PubKey {
        PubKey { key, compressed: false }
    }

    /// Parses a 33 byte compressed or 65 byte uncompressed key
    pub fn from_slice(bytes: &[u8]) -> Result<PubKey> {
        let compressed = match (bytes.len(), bytes.first().copied()) {
            (33, Some(0x02)) | (33, Some(0x03)) => true,
            (65, Some(0x04)) => false,
            _ => {
                let msg = format!("Not a serialized public key: {}", hex::encode(bytes));
                return Err(Error::BadData(msg));
            }
        };
        let key = PublicKey::from_slice(bytes)?;
        Ok(PubKey { key, compressed })
    }

    /// Serializes the key in its own form
    pub fn to_bytes(&self) -> Vec<u8> {
        if self.compressed {
            self.key.serialize().to_vec()
        } else {
            self.key.serialize_uncompressed().to_vec()
        }
    }

    pub fn key(&self) -> &PublicKey {
        &self.key
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// Hash160 of the serialized key, as used by pay-to-pubkey-hash
    pub fn hash160(&self) -> Hash160 {
        hash160(&self.to_bytes())
    }
}

impl fmt::Debug for PubKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&hex::encode(self.to_bytes()))
    }
}

/// Reads one DER signature and leaves the reader after its last byte
pub fn read_der_signature(reader: &mut dyn Read) -> Result<Signature> {
    let tag = reader.read_u8()?;
    if tag != DER_SEQUENCE_TAG {
        return Err(Error::BadData(format!("Bad DER sequence tag {:#04x}", tag)));
    }
    let len = reader.read_u8()?;
    if len > MAX_DER_BODY {
        return Err(Error::BadData(format!("DER signature body too long: {}", len)));
    }
    let mut der = vec![0; 2 + len as usize];
    der[0] = tag;
    der[1] = len;
    reader.read_exact(&mut der[2..])?;
    Ok(Signature::from_der(&der)?)
}

/// Writes a signature in DER form
pub fn write_der_signature(sig: &Signature, writer: &mut dyn Write) -> io::Result<()> {
    writer.write_all(&sig.serialize_der())
}

impl Serializable<PubKey> for PubKey {
    fn read(reader: &mut dyn Read) -> Result<PubKey> {
        let prefix = reader.read_u8()?;
        let mut bytes = match prefix {
            0x02 | 0x03 => vec![0; 33],
            0x04 => vec![0; 65],
            _ => return Err(Error::BadData(format!("Bad public key prefix {:#04x}", prefix))),
        };
        bytes[0] = prefix;
        reader.read_exact(&mut bytes[1..])?;
        PubKey::from_slice(&bytes)
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        writer.write_all(&self.to_bytes())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::serdes::decode_exact;
    use secp256k1::{Message, Secp256k1, SecretKey};
    use std::io::Cursor;

    /// Compressed key for the secret [n; 32]
    pub fn test_pubkey(n: u8) -> PubKey {
        let secp = Secp256k1::new();
        let secret = SecretKey::from_slice(&[n; 32]).unwrap();
        PubKey::compressed(PublicKey::from_secret_key(&secp, &secret))
    }

    /// Signature by the secret [n; 32] over the message [m; 32]
    pub fn test_signature(n: u8, m: u8) -> Signature {
        let secp = Secp256k1::new();
        let secret = SecretKey::from_slice(&[n; 32]).unwrap();
        let message = Message::from_slice(&[m; 32]).unwrap();
        secp.sign_ecdsa(&message, &secret)
    }

    #[test]
    fn test_pubkey_forms() {
        let g = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
        let g_full = "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";
        let short = PubKey::from_slice(&hex::decode(g).unwrap()).unwrap();
        let long = PubKey::from_slice(&hex::decode(g_full).unwrap()).unwrap();
        assert!(short.is_compressed());
        assert!(!long.is_compressed());
        assert_eq!(short.key(), long.key());
        assert_ne!(short, long);
        assert_eq!(hex::encode(short.to_bytes()), g);
        assert_eq!(hex::encode(long.to_bytes()), g_full);
        assert_eq!(format!("{:?}", short.hash160()), "751e76e8199196d454941c45d1b3a323f1433bd6");
    }

    #[test]
    fn test_pubkey_rejects() {
        assert!(PubKey::from_slice(&[]).is_err());
        assert!(PubKey::from_slice(&[0x02; 32]).is_err());
        let mut hybrid = hex::decode("0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8").unwrap();
        hybrid[0] = 0x06;
        assert!(PubKey::from_slice(&hybrid).is_err());
        // x coordinate past the field prime
        let mut off_curve = vec![0x02];
        off_curve.extend_from_slice(&[0xff; 32]);
        assert!(PubKey::from_slice(&off_curve).is_err());
    }

    #[test]
    fn test_pubkey_read() {
        let key = test_pubkey(1);
        let mut bytes = key.to_bytes();
        assert_eq!(decode_exact::<PubKey>(&bytes).unwrap(), key);
        bytes.push(0);
        assert!(decode_exact::<PubKey>(&bytes).is_err());
    }

    #[test]
    fn test_der_signature() {
        let sig = test_signature(1, 2);
        let mut v = Vec::new();
        write_der_signature(&sig, &mut v).unwrap();
        assert_eq!(v[0], DER_SEQUENCE_TAG);
        v.extend_from_slice(&[9, 9]);
        let mut cursor = Cursor::new(&v[..]);
        assert_eq!(read_der_signature(&mut cursor).unwrap(), sig);
        assert_eq!(cursor.position() as usize, v.len() - 2);
    }

    #[test]
    fn test_der_signature_rejects() {
        let mut der = test_signature(1, 2).serialize_der().to_vec();
        der[0] = 0x31;
        assert!(read_der_signature(&mut Cursor::new(&der[..])).is_err());
        let der = test_signature(1, 2).serialize_der().to_vec();
        assert!(read_der_signature(&mut Cursor::new(&der[..der.len() - 1])).is_err());
        assert!(read_der_signature(&mut Cursor::new(&[0x30, 0x02, 0x00, 0x00][..])).is_err());
    }
}
