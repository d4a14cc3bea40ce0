//! Pay-to-script-hash spends and addresses

use super::address::Address;
use super::hash160::hash160;
use super::input::ScriptInput;
use super::output::ScriptOutput;
use super::script::{Script, ScriptOp};
use super::serdes::decode_lenient;

/// Unlocking script of a pay-to-script-hash spend together with the redeem script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptHashInput {
    pub input: ScriptInput,
    pub redeem: ScriptOutput,
}

impl ScriptHashInput {
    pub fn new(input: ScriptInput, redeem: ScriptOutput) -> ScriptHashInput {
        ScriptHashInput { input, redeem }
    }

    /// Input op-codes followed by one push of the serialized redeem script
    pub fn encode(&self) -> Script {
        let mut s = self.input.encode();
        s.append_data(&self.redeem.to_bytes());
        s
    }

    /// Splits off the trailing redeem script push
    ///
    /// Returns None when there are fewer than two op-codes, when the last one isn't
    /// a push, or when the pushed bytes aren't a well-formed script. The input and
    /// redeem parts themselves always decode, possibly to NonStandard.
    pub fn decode(script: &Script) -> Option<ScriptHashInput> {
        let (last, rest) = match script.ops().split_last() {
            Some(split) if script.len() >= 2 => split,
            _ => {
                debug!("Script hash spend needs at least 2 op-codes, got {}", script.len());
                return None;
            }
        };
        let redeem_bytes = match last {
            ScriptOp::Push(push) => push.data(),
            ScriptOp::Code(op) => {
                debug!("Script hash spend ends with op-code {} instead of a push", op);
                return None;
            }
        };
        let redeem: Script = decode_lenient(redeem_bytes)?;
        let input = ScriptInput::decode(&Script(rest.to_vec()));
        Some(ScriptHashInput { input, redeem: ScriptOutput::decode(&redeem) })
    }

    /// Pay-to-script-hash address the spend redeems
    pub fn sender(&self) -> Address {
        script_addr(&self.redeem)
    }
}

/// Pay-to-script-hash address of a redeem script
///
/// The serialized script is hashed with SHA256 and the digest again with RIPEMD160.
pub fn script_addr(redeem: &ScriptOutput) -> Address {
    Address::script_hash(hash160(&redeem.to_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::AddressType;
    use crate::hash256::sha256;
    use ripemd::{Digest, Ripemd160};
    use crate::keys::tests::{test_pubkey, test_signature};
    use crate::network::Network;
    use crate::output::MultiSig2;
    use crate::script::op_codes::*;
    use crate::sighash::{SigHash, TxSignature};

    fn multisig_spend() -> ScriptHashInput {
        let sig1 = TxSignature::new(test_signature(1, 9), SigHash::All);
        let sig2 = TxSignature::new(test_signature(2, 9), SigHash::All);
        let redeem = ScriptOutput::PayMulSig2(MultiSig2::TwoOfTwo, test_pubkey(1), test_pubkey(2));
        ScriptHashInput::new(ScriptInput::SpendMulSig2(sig1, sig2), redeem)
    }

    #[test]
    fn test_layout() {
        let spend = multisig_spend();
        let script = spend.encode();
        assert_eq!(script.len(), 3);
        assert_eq!(&script.ops()[..2], spend.input.encode().ops());
        assert_eq!(script.ops()[2].push_data().unwrap(), &spend.redeem.to_bytes()[..]);
    }

    #[test]
    fn test_round_trip() {
        let spend = multisig_spend();
        assert_eq!(ScriptHashInput::decode(&spend.encode()), Some(spend));
    }

    #[test]
    fn test_non_standard_parts() {
        let mut input = Script::new();
        input.append(OP_0);
        input.append_data(&[1, 2, 3]);
        let mut redeem = Script::new();
        redeem.append(OP_NOP);
        redeem.append(OP_1);
        let spend = ScriptHashInput::new(
            ScriptInput::NonStandard(input.clone()),
            ScriptOutput::NonStandard(redeem.clone()),
        );
        let decoded = ScriptHashInput::decode(&spend.encode()).unwrap();
        assert_eq!(decoded.input, ScriptInput::NonStandard(input));
        assert_eq!(decoded.redeem, ScriptOutput::NonStandard(redeem));
    }

    #[test]
    fn test_input_re_decoded() {
        // A non-standard input that happens to look like a standard one comes back standard
        let sig = TxSignature::new(test_signature(1, 9), SigHash::All);
        let mut looks_standard = Script::new();
        looks_standard.append_data(&sig.to_bytes());
        let spend = ScriptHashInput::new(
            ScriptInput::NonStandard(looks_standard.clone()),
            ScriptOutput::PayPk(test_pubkey(1)),
        );
        let decoded = ScriptHashInput::decode(&spend.encode()).unwrap();
        assert_eq!(decoded.input, ScriptInput::decode(&looks_standard));
        assert_eq!(decoded.input, ScriptInput::SpendPk(sig));
        assert_eq!(decoded.redeem, spend.redeem);
    }

    #[test]
    fn test_decode_failures() {
        assert_eq!(ScriptHashInput::decode(&Script::new()), None);

        let mut one = Script::new();
        one.append_data(&ScriptOutput::PayPk(test_pubkey(1)).to_bytes());
        assert_eq!(ScriptHashInput::decode(&one), None);

        let mut ends_with_op = Script::new();
        ends_with_op.append_data(&[1, 2]);
        ends_with_op.append(OP_CHECKSIG);
        assert_eq!(ScriptHashInput::decode(&ends_with_op), None);

        let mut malformed_redeem = Script::new();
        malformed_redeem.append_data(&[1, 2]);
        malformed_redeem.append_data(&[OP_PUSH + 10, 1]);
        assert_eq!(ScriptHashInput::decode(&malformed_redeem), None);
    }

    #[test]
    fn test_script_addr() {
        let redeem = multisig_spend().redeem;
        let addr = script_addr(&redeem);
        assert_eq!(addr.addr_type, AddressType::P2SH);
        let digest = Ripemd160::digest(sha256(&redeem.to_bytes()).as_bytes());
        assert_eq!(&addr.hash160.0[..], &digest[..]);
        assert_eq!(script_addr(&redeem), addr);

        // Same bytes, different variant
        let same_bytes = ScriptOutput::NonStandard(redeem.encode());
        assert_eq!(script_addr(&same_bytes), addr);

        assert_eq!(multisig_spend().sender(), addr);
        assert_ne!(script_addr(&ScriptOutput::PayPk(test_pubkey(1))), addr);
    }

    #[test]
    fn test_script_addr_pays_back() {
        let redeem = ScriptOutput::PayMulSig1(test_pubkey(3));
        let addr = script_addr(&redeem);
        let output = ScriptOutput::PayScriptHash(addr.hash160);
        assert_eq!(output.recipient(), Some(addr));
        let encoded = addr.encode(Network::Mainnet);
        assert!(encoded.starts_with('3'));
        assert_eq!(Address::decode(&encoded, Network::Mainnet).unwrap(), addr);
    }
}
