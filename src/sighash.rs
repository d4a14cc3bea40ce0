//! Signature hash types and signatures that carry them

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use secp256k1::ecdsa::Signature;
use std::fmt;
use std::io;
use std::io::{Read, Write};
use super::keys::{read_der_signature, write_der_signature};
use super::result::{Error, Result};
use super::serdes::{decode_exact, encode, Serializable};

/// Signs all of the outputs
pub const SIGHASH_ALL: u32 = 0x01;
/// Sign none of the outputs so that they may be spent anywhere
pub const SIGHASH_NONE: u32 = 0x02;
/// Sign only the output paired with the the input
pub const SIGHASH_SINGLE: u32 = 0x03;
/// Sign only the input so others may inputs to the transaction
pub const SIGHASH_ANYONECANPAY: u32 = 0x80;

/// Which parts of the spending transaction a signature commits to
///
/// On the wire the tag is a 4 byte big-endian word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SigHash {
    All,
    None,
    Single,
    AllAnyoneCanPay,
    NoneAnyoneCanPay,
    SingleAnyoneCanPay,
}

impl SigHash {
    /// Returns the wire value of the tag
    pub fn to_u32(self) -> u32 {
        match self {
            SigHash::All => SIGHASH_ALL,
            SigHash::None => SIGHASH_NONE,
            SigHash::Single => SIGHASH_SINGLE,
            SigHash::AllAnyoneCanPay => SIGHASH_ALL | SIGHASH_ANYONECANPAY,
            SigHash::NoneAnyoneCanPay => SIGHASH_NONE | SIGHASH_ANYONECANPAY,
            SigHash::SingleAnyoneCanPay => SIGHASH_SINGLE | SIGHASH_ANYONECANPAY,
        }
    }

    /// Converts a wire value to a tag
    pub fn from_u32(word: u32) -> Result<SigHash> {
        match word {
            x if x == SIGHASH_ALL => Ok(SigHash::All),
            x if x == SIGHASH_NONE => Ok(SigHash::None),
            x if x == SIGHASH_SINGLE => Ok(SigHash::Single),
            x if x == SIGHASH_ALL | SIGHASH_ANYONECANPAY => Ok(SigHash::AllAnyoneCanPay),
            x if x == SIGHASH_NONE | SIGHASH_ANYONECANPAY => Ok(SigHash::NoneAnyoneCanPay),
            x if x == SIGHASH_SINGLE | SIGHASH_ANYONECANPAY => Ok(SigHash::SingleAnyoneCanPay),
            _ => Err(Error::UnknownSigHash(word)),
        }
    }

    /// Returns whether other inputs may be added to the transaction
    pub fn is_anyone_can_pay(self) -> bool {
        self.to_u32() & SIGHASH_ANYONECANPAY != 0
    }

    /// Returns the tag without the anyone-can-pay modifier
    pub fn base(self) -> SigHash {
        match self {
            SigHash::All | SigHash::AllAnyoneCanPay => SigHash::All,
            SigHash::None | SigHash::NoneAnyoneCanPay => SigHash::None,
            SigHash::Single | SigHash::SingleAnyoneCanPay => SigHash::Single,
        }
    }
}

impl Serializable<SigHash> for SigHash {
    fn read(reader: &mut dyn Read) -> Result<SigHash> {
        SigHash::from_u32(reader.read_u32::<BigEndian>()?)
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        writer.write_u32::<BigEndian>(self.to_u32())
    }
}

/// DER signature followed by the sighash type it was made with
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TxSignature {
    pub signature: Signature,
    pub sighash: SigHash,
}

impl TxSignature {
    pub fn new(signature: Signature, sighash: SigHash) -> TxSignature {
        TxSignature { signature, sighash }
    }

    /// Parses a signature that must span all of `bytes`
    pub fn from_bytes(bytes: &[u8]) -> Result<TxSignature> {
        decode_exact(bytes)
    }

    /// Signature bytes immediately followed by the sighash word
    pub fn to_bytes(&self) -> Vec<u8> {
        encode(self)
    }
}

impl Serializable<TxSignature> for TxSignature {
    fn read(reader: &mut dyn Read) -> Result<TxSignature> {
        let signature = read_der_signature(reader)?;
        let sighash = SigHash::read(reader)?;
        Ok(TxSignature { signature, sighash })
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        write_der_signature(&self.signature, writer)?;
        self.sighash.write(writer)
    }
}

impl fmt::Debug for TxSignature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TxSignature")
            .field("signature", &hex::encode(self.signature.serialize_der().to_vec()))
            .field("sighash", &self.sighash)
            .finish()
    }
}
