//! Address encoding and decoding

use super::hash160::Hash160;
use super::legacyaddr::{legacyaddr_decode, legacyaddr_encode};
use super::network::Network;
use super::result::Result;

/// Address type which is either P2PKH or P2SH
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressType {
    /// Pay-to-public-key-hash address
    P2PKH,
    /// Pay-to-script-hash address
    P2SH,
}

/// Hash160 tagged with what it is the hash of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    pub addr_type: AddressType,
    pub hash160: Hash160,
}

impl Address {
    /// Address paying to the holder of a public key with this hash
    pub fn pubkey_hash(hash160: Hash160) -> Address {
        Address { addr_type: AddressType::P2PKH, hash160 }
    }

    /// Address paying to a redeem script with this hash
    pub fn script_hash(hash160: Hash160) -> Address {
        Address { addr_type: AddressType::P2SH, hash160 }
    }

    /// Base58check string for the network
    pub fn encode(&self, network: Network) -> String {
        legacyaddr_encode(&self.hash160, self.addr_type, network)
    }

    /// Parses a base58check string for the network
    pub fn decode(input: &str, network: Network) -> Result<Address> {
        let (hash160, addr_type) = legacyaddr_decode(input, network)?;
        Ok(Address { addr_type, hash160 })
    }
}
