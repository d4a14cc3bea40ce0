//! Standard locking and unlocking script templates
//!
//! Converts between the typed intent of a script (pay-to-pubkey, pay-to-pubkey-hash,
//! multisig, pay-to-script-hash) and the op-codes that express it. Decoding a
//! template never fails: anything unrecognized comes back as `NonStandard`.

#[macro_use]
extern crate log;

pub mod address;
pub mod hash160;
pub mod hash256;
pub mod input;
pub mod keys;
pub mod legacyaddr;
pub mod network;
pub mod output;
pub mod p2sh;
pub mod result;
pub mod script;
pub mod serdes;
pub mod sighash;

pub use address::{Address, AddressType};
pub use hash160::{hash160, Hash160};
pub use input::ScriptInput;
pub use keys::PubKey;
pub use network::Network;
pub use output::{MultiSig2, MultiSig3, ScriptOutput};
pub use p2sh::{script_addr, ScriptHashInput};
pub use result::{Error, Result};
pub use script::{Script, ScriptOp};
pub use serdes::Serializable;
pub use sighash::{SigHash, TxSignature};
