//! Unlocking script templates

use super::address::Address;
use super::keys::{PubKey, DER_SEQUENCE_TAG};
use super::result::Result;
use super::script::Script;
use super::serdes::decode_lenient;
use super::sighash::TxSignature;

/// Intent of an unlocking script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptInput {
    /// Spends a pay-to-pubkey or 1-of-1 multisig output
    SpendPk(TxSignature),
    /// Spends a pay-to-pubkey-hash output by revealing the key
    SpendPkHash(TxSignature, PubKey),
    /// Two signatures for a multisig output
    SpendMulSig2(TxSignature, TxSignature),
    /// Three signatures for a multisig output
    SpendMulSig3(TxSignature, TxSignature, TxSignature),
    /// Any other script, unchanged
    NonStandard(Script),
}

impl ScriptInput {
    /// Builds the unlocking script, which only pushes data
    pub fn encode(&self) -> Script {
        let mut s = Script::new();
        match self {
            ScriptInput::SpendPk(sig) => s.append_data(&sig.to_bytes()),
            ScriptInput::SpendPkHash(sig, key) => {
                s.append_data(&sig.to_bytes());
                s.append_data(&key.to_bytes());
            }
            ScriptInput::SpendMulSig2(sig1, sig2) => {
                s.append_data(&sig1.to_bytes());
                s.append_data(&sig2.to_bytes());
            }
            ScriptInput::SpendMulSig3(sig1, sig2, sig3) => {
                s.append_data(&sig1.to_bytes());
                s.append_data(&sig2.to_bytes());
                s.append_data(&sig3.to_bytes());
            }
            ScriptInput::NonStandard(script) => s.append_script(script),
        }
        s
    }

    /// Recognizes an unlocking script, falling back to NonStandard
    pub fn decode(script: &Script) -> ScriptInput {
        match script.pushes().and_then(|pushes| match_standard(&pushes)) {
            Some(input) => input,
            None => {
                trace!("Non-standard input script {:?}", script);
                ScriptInput::NonStandard(script.clone())
            }
        }
    }

    /// Serialized unlocking script
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode().to_bytes()
    }

    /// Recognizes a serialized unlocking script
    ///
    /// Only fails when the bytes are not a well-formed sequence of op-codes.
    pub fn from_bytes(bytes: &[u8]) -> Result<ScriptInput> {
        Ok(ScriptInput::decode(&Script::from_bytes(bytes)?))
    }

    pub fn is_standard(&self) -> bool {
        !matches!(self, ScriptInput::NonStandard(_))
    }

    /// Signatures carried by the script in order
    pub fn signatures(&self) -> Vec<TxSignature> {
        match self {
            ScriptInput::SpendPk(sig) => vec![*sig],
            ScriptInput::SpendPkHash(sig, _) => vec![*sig],
            ScriptInput::SpendMulSig2(sig1, sig2) => vec![*sig1, *sig2],
            ScriptInput::SpendMulSig3(sig1, sig2, sig3) => vec![*sig1, *sig2, *sig3],
            ScriptInput::NonStandard(_) => vec![],
        }
    }

    /// Address of the key revealed by a pay-to-pubkey-hash spend
    pub fn sender(&self) -> Option<Address> {
        match self {
            ScriptInput::SpendPkHash(_, key) => Some(Address::pubkey_hash(key.hash160())),
            _ => None,
        }
    }
}

/// Guesses whether a push holds a signature rather than a public key
///
/// DER signatures start with 0x30 while keys start with 0x02, 0x03 or 0x04. This
/// is a heuristic: nothing in the protocol stops other data from starting with 0x30.
pub fn looks_like_der_signature(data: &[u8]) -> bool {
    data.first() == Some(&DER_SEQUENCE_TAG)
}

/// Matches the standard shapes by number of pushes
fn match_standard(pushes: &[&[u8]]) -> Option<ScriptInput> {
    let input = match pushes {
        [sig] => ScriptInput::SpendPk(decode_lenient(sig)?),
        [sig, second] => {
            let sig: TxSignature = decode_lenient(sig)?;
            if looks_like_der_signature(second) {
                ScriptInput::SpendMulSig2(sig, decode_lenient(second)?)
            } else {
                ScriptInput::SpendPkHash(sig, decode_lenient(second)?)
            }
        }
        [sig1, sig2, sig3] => ScriptInput::SpendMulSig3(
            decode_lenient(sig1)?,
            decode_lenient(sig2)?,
            decode_lenient(sig3)?,
        ),
        _ => return None,
    };
    Some(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::tests::{test_pubkey, test_signature};
    use crate::script::op_codes::*;
    use crate::sighash::SigHash;

    fn sig(n: u8, sighash: SigHash) -> TxSignature {
        TxSignature::new(test_signature(n, n + 100), sighash)
    }

    fn standard_inputs() -> Vec<ScriptInput> {
        vec![
            ScriptInput::SpendPk(sig(1, SigHash::All)),
            ScriptInput::SpendPkHash(sig(2, SigHash::SingleAnyoneCanPay), test_pubkey(2)),
            ScriptInput::SpendMulSig2(sig(1, SigHash::None), sig(2, SigHash::AllAnyoneCanPay)),
            ScriptInput::SpendMulSig3(sig(1, SigHash::All), sig(2, SigHash::Single), sig(3, SigHash::NoneAnyoneCanPay)),
        ]
    }

    #[test]
    fn test_standard_round_trip() {
        for input in standard_inputs() {
            assert!(input.is_standard());
            let script = input.encode();
            assert!(script.pushes().is_some());
            assert_eq!(ScriptInput::decode(&script), input);
            assert_eq!(ScriptInput::from_bytes(&input.to_bytes()).unwrap(), input);
        }
    }

    #[test]
    fn test_push_layout() {
        let (s, key) = (sig(4, SigHash::All), test_pubkey(4));
        let script = ScriptInput::SpendPkHash(s, key).encode();
        assert_eq!(script.pushes().unwrap(), vec![&s.to_bytes()[..], &key.to_bytes()[..]]);
    }

    #[test]
    fn test_bad_signature() {
        let mut bad = sig(1, SigHash::All).to_bytes();
        let n = bad.len();
        bad[n - 1] = 0x04;

        let mut one = Script::new();
        one.append_data(&bad);
        assert_eq!(ScriptInput::decode(&one), ScriptInput::NonStandard(one.clone()));

        let mut first_bad = Script::new();
        first_bad.append_data(&bad);
        first_bad.append_data(&test_pubkey(1).to_bytes());
        assert_eq!(ScriptInput::decode(&first_bad), ScriptInput::NonStandard(first_bad.clone()));

        let mut second_bad = Script::new();
        second_bad.append_data(&sig(1, SigHash::All).to_bytes());
        second_bad.append_data(&bad);
        assert!(!ScriptInput::decode(&second_bad).is_standard());

        let mut third_bad = Script::new();
        third_bad.append_data(&sig(1, SigHash::All).to_bytes());
        third_bad.append_data(&sig(2, SigHash::All).to_bytes());
        third_bad.append_data(&bad);
        assert!(!ScriptInput::decode(&third_bad).is_standard());
    }

    #[test]
    fn test_bad_pubkey() {
        let mut s = Script::new();
        s.append_data(&sig(1, SigHash::All).to_bytes());
        s.append_data(&[0x02; 20]);
        assert_eq!(ScriptInput::decode(&s), ScriptInput::NonStandard(s.clone()));
    }

    #[test]
    fn test_second_push_sniffed() {
        // A 0x30 first byte is always taken as a signature, so a payload that
        // doesn't parse as one never gets tried as a public key
        let mut not_a_sig = test_pubkey(1).to_bytes();
        not_a_sig[0] = 0x30;
        let mut s = Script::new();
        s.append_data(&sig(1, SigHash::All).to_bytes());
        s.append_data(&not_a_sig);
        assert_eq!(ScriptInput::decode(&s), ScriptInput::NonStandard(s.clone()));

        assert!(looks_like_der_signature(&sig(1, SigHash::All).to_bytes()));
        assert!(!looks_like_der_signature(&test_pubkey(1).to_bytes()));
        assert!(!looks_like_der_signature(&[]));
    }

    #[test]
    fn test_other_shapes() {
        let s1 = sig(1, SigHash::All).to_bytes();

        let mut with_op = Script::new();
        with_op.append(OP_0);
        with_op.append_data(&s1);
        with_op.append_data(&s1);

        let mut four = Script::new();
        for _ in 0..4 {
            four.append_data(&s1);
        }

        let mut not_push = Script::new();
        not_push.append_data(&s1);
        not_push.append(OP_CHECKSIG);

        for s in vec![Script::new(), with_op, four, not_push] {
            let input = ScriptInput::decode(&s);
            assert_eq!(input, ScriptInput::NonStandard(s.clone()));
            assert_eq!(input.encode(), s);
            assert!(input.signatures().is_empty());
        }
    }

    #[test]
    fn test_real_spend_one_byte_hash_type() {
        // P2PKH spend from a real transaction, whose signature ends in a single
        // hash-type byte rather than a 4 byte word
        let bytes = hex::decode("48304502210090298a2bf23e5640396400e4afea95c872b7da1a90abba35da7aab3d1299627702206196a592a5a2d99f5dfba4830965e97ca5ae7359a1e72ae2f712dde60a80db9b41210347fa53577cf93729ac48b1bc44df12d3dd9b88c2d9991abe84000e94728e9a26").unwrap();
        let input = ScriptInput::from_bytes(&bytes).unwrap();
        assert!(!input.is_standard());
        assert_eq!(input.to_bytes(), bytes);
    }

    #[test]
    fn test_signatures_and_sender() {
        let (s1, s2) = (sig(1, SigHash::All), sig(2, SigHash::None));
        let key = test_pubkey(2);
        assert_eq!(ScriptInput::SpendMulSig2(s1, s2).signatures(), vec![s1, s2]);
        assert_eq!(ScriptInput::SpendPkHash(s2, key).signatures(), vec![s2]);
        assert_eq!(
            ScriptInput::SpendPkHash(s2, key).sender(),
            Some(Address::pubkey_hash(key.hash160()))
        );
        assert_eq!(ScriptInput::SpendPk(s1).sender(), None);
    }
}
