//! Locking script templates
//!
//! Every script decodes to some [`ScriptOutput`]. Scripts that don't match one of
//! the standard shapes, or whose keys and hashes don't parse, are kept whole as
//! [`ScriptOutput::NonStandard`].

use super::address::Address;
use super::hash160::Hash160;
use super::keys::PubKey;
use super::result::Result;
use super::script::op_codes::*;
use super::script::{Script, ScriptOp};
use super::serdes::decode_lenient;

/// Required signature count of a two key multisig
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MultiSig2 {
    OneOfTwo,
    TwoOfTwo,
}

impl MultiSig2 {
    pub fn required(self) -> u8 {
        match self {
            MultiSig2::OneOfTwo => 1,
            MultiSig2::TwoOfTwo => 2,
        }
    }

    pub fn from_required(n: u8) -> Option<MultiSig2> {
        match n {
            1 => Some(MultiSig2::OneOfTwo),
            2 => Some(MultiSig2::TwoOfTwo),
            _ => None,
        }
    }

    fn op(self) -> u8 {
        match self {
            MultiSig2::OneOfTwo => OP_1,
            MultiSig2::TwoOfTwo => OP_2,
        }
    }

    fn from_op(op: u8) -> Option<MultiSig2> {
        op_to_small_int(op).and_then(MultiSig2::from_required)
    }
}

/// Required signature count of a three key multisig
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MultiSig3 {
    OneOfThree,
    TwoOfThree,
    ThreeOfThree,
}

impl MultiSig3 {
    pub fn required(self) -> u8 {
        match self {
            MultiSig3::OneOfThree => 1,
            MultiSig3::TwoOfThree => 2,
            MultiSig3::ThreeOfThree => 3,
        }
    }

    pub fn from_required(n: u8) -> Option<MultiSig3> {
        match n {
            1 => Some(MultiSig3::OneOfThree),
            2 => Some(MultiSig3::TwoOfThree),
            3 => Some(MultiSig3::ThreeOfThree),
            _ => None,
        }
    }

    fn op(self) -> u8 {
        match self {
            MultiSig3::OneOfThree => OP_1,
            MultiSig3::TwoOfThree => OP_2,
            MultiSig3::ThreeOfThree => OP_3,
        }
    }

    fn from_op(op: u8) -> Option<MultiSig3> {
        op_to_small_int(op).and_then(MultiSig3::from_required)
    }
}

/// Intent of a locking script
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScriptOutput {
    /// Pay to a public key
    PayPk(PubKey),
    /// Pay to the hash160 of a public key
    PayPkHash(Hash160),
    /// 1-of-1 multisig
    PayMulSig1(PubKey),
    /// Multisig over two keys
    PayMulSig2(MultiSig2, PubKey, PubKey),
    /// Multisig over three keys
    PayMulSig3(MultiSig3, PubKey, PubKey, PubKey),
    /// Pay to the hash160 of a redeem script
    PayScriptHash(Hash160),
    /// Any other script, unchanged
    NonStandard(Script),
}

impl ScriptOutput {
    /// Builds the locking script
    pub fn encode(&self) -> Script {
        let mut s = Script::new();
        match self {
            ScriptOutput::PayPk(key) => {
                s.append_data(&key.to_bytes());
                s.append(OP_CHECKSIG);
            }
            ScriptOutput::PayPkHash(hash) => {
                s.append(OP_DUP);
                s.append(OP_HASH160);
                s.append_data(&hash.0);
                s.append(OP_EQUALVERIFY);
                s.append(OP_CHECKSIG);
            }
            ScriptOutput::PayMulSig1(key) => {
                s.append(OP_1);
                s.append_data(&key.to_bytes());
                s.append(OP_1);
                s.append(OP_CHECKMULTISIG);
            }
            ScriptOutput::PayMulSig2(required, k1, k2) => {
                s.append(required.op());
                s.append_data(&k1.to_bytes());
                s.append_data(&k2.to_bytes());
                s.append(OP_2);
                s.append(OP_CHECKMULTISIG);
            }
            ScriptOutput::PayMulSig3(required, k1, k2, k3) => {
                s.append(required.op());
                s.append_data(&k1.to_bytes());
                s.append_data(&k2.to_bytes());
                s.append_data(&k3.to_bytes());
                s.append(OP_3);
                s.append(OP_CHECKMULTISIG);
            }
            ScriptOutput::PayScriptHash(hash) => {
                s.append(OP_HASH160);
                s.append_data(&hash.0);
                s.append(OP_EQUAL);
            }
            ScriptOutput::NonStandard(script) => s.append_script(script),
        }
        s
    }

    /// Recognizes a locking script, falling back to NonStandard
    pub fn decode(script: &Script) -> ScriptOutput {
        match match_standard(script.ops()) {
            Some(output) => output,
            None => {
                trace!("Non-standard output script {:?}", script);
                ScriptOutput::NonStandard(script.clone())
            }
        }
    }

    /// Serialized locking script
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode().to_bytes()
    }

    /// Recognizes a serialized locking script
    ///
    /// Only fails when the bytes are not a well-formed sequence of op-codes.
    pub fn from_bytes(bytes: &[u8]) -> Result<ScriptOutput> {
        Ok(ScriptOutput::decode(&Script::from_bytes(bytes)?))
    }

    pub fn is_standard(&self) -> bool {
        !matches!(self, ScriptOutput::NonStandard(_))
    }

    /// Address the output pays to, when it pays to a single key or script hash
    pub fn recipient(&self) -> Option<Address> {
        match self {
            ScriptOutput::PayPk(key) => Some(Address::pubkey_hash(key.hash160())),
            ScriptOutput::PayPkHash(hash) => Some(Address::pubkey_hash(*hash)),
            ScriptOutput::PayScriptHash(hash) => Some(Address::script_hash(*hash)),
            _ => None,
        }
    }
}

/// Matches the standard shapes in priority order
fn match_standard(ops: &[ScriptOp]) -> Option<ScriptOutput> {
    use crate::script::ScriptOp::{Code, Push};
    let output = match ops {
        [Push(key), Code(OP_CHECKSIG)] => ScriptOutput::PayPk(decode_lenient(key.data())?),
        [Code(OP_DUP), Code(OP_HASH160), Push(hash), Code(OP_EQUALVERIFY), Code(OP_CHECKSIG)] => {
            ScriptOutput::PayPkHash(decode_lenient(hash.data())?)
        }
        [Code(OP_1), Push(key), Code(OP_1), Code(OP_CHECKMULTISIG)] => {
            ScriptOutput::PayMulSig1(decode_lenient(key.data())?)
        }
        [Code(m), Push(k1), Push(k2), Code(OP_2), Code(OP_CHECKMULTISIG)] => ScriptOutput::PayMulSig2(
            MultiSig2::from_op(*m)?,
            decode_lenient(k1.data())?,
            decode_lenient(k2.data())?,
        ),
        [Code(m), Push(k1), Push(k2), Push(k3), Code(OP_3), Code(OP_CHECKMULTISIG)] => {
            ScriptOutput::PayMulSig3(
                MultiSig3::from_op(*m)?,
                decode_lenient(k1.data())?,
                decode_lenient(k2.data())?,
                decode_lenient(k3.data())?,
            )
        }
        [Code(OP_HASH160), Push(hash), Code(OP_EQUAL)] => {
            ScriptOutput::PayScriptHash(decode_lenient(hash.data())?)
        }
        _ => return None,
    };
    Some(output)
}
