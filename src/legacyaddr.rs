use super::address::AddressType;
use super::network::Network;
use super::hash160::Hash160;
use super::hash256::sha256d;
use super::result::{Error, Result};

/// Converts a public key or script hash to its legacy address
pub fn legacyaddr_encode(hash160: &Hash160, addr_type: AddressType, network: Network) -> String {
    let mut v = Vec::with_capacity(1 + hash160.0.len() + 4);
    v.push(match addr_type {
        AddressType::P2PKH => network.legacyaddr_pubkeyhash_flag(),
        AddressType::P2SH => network.legacyaddr_script_flag(),
    });
    v.extend_from_slice(&hash160.0);
    let checksum = sha256d(&v).0;
    v.extend_from_slice(&checksum[..4]);
    bs58::encode(v).into_string()
}

/// Decodes a legacy address to a public key or script hash
pub fn legacyaddr_decode(input: &str, network: Network) -> Result<(Hash160, AddressType)> {
    // Make sure addr is at least some minimum to verify checksum and addr type
    let v = bs58::decode(input).into_vec()?;
    if v.len() < 6 {
        let msg = format!("Base58 address not long enough: {}", v.len());
        return Err(Error::BadData(msg));
    }

    // Verify checksum
    let v0 = &v[0..v.len() - 4];
    let v1 = &v[v.len() - 4..v.len()];
    let cs = sha256d(v0).0;
    if v1 != &cs[..4] {
        let msg = format!("Bad checksum: {:?} != {:?}", &cs[..4], v1);
        return Err(Error::BadData(msg));
    }

    // Extract address type
    let addr_type_byte = v0[0];
    let addr_type = if addr_type_byte == network.legacyaddr_pubkeyhash_flag() {
        AddressType::P2PKH
    } else if addr_type_byte == network.legacyaddr_script_flag() {
        AddressType::P2SH
    } else {
        let msg = format!("Unknown address type {}", addr_type_byte);
        return Err(Error::BadData(msg));
    };

    // Extract hash160 address and return
    let hash160 = Hash160::from_slice(&v0[1..])?;
    Ok((hash160, addr_type))
}
