use crate::base58;
use crate::keys::PublicKey;
use std::fmt;
use tiny_keccak::{Hasher, Keccak};

/// Network prefix byte of a TRON mainnet address.
pub const ADDRESS_PREFIX: u8 = 0x41;

/// Raw TRON address length: prefix byte plus 20 hash bytes.
pub const ADDRESS_LEN: usize = 21;

fn keccak256(data: &[u8]) -> [u8; 32] {
    // Ethereum-flavored Keccak (padding byte 0x01), not NIST SHA3-256
    let mut hasher = Keccak::v256();
    let mut hash = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut hash);
    hash
}

/// A 21-byte TRON address: `0x41 || keccak256(uncompressed_pub[1..65])[12..32]`.
///
/// `Display` renders the standard Base58Check form beginning with `T`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TronAddress {
    data: [u8; ADDRESS_LEN],
}

impl TronAddress {
    pub fn new(data: [u8; ADDRESS_LEN]) -> Self {
        TronAddress { data }
    }

    /// Derives the address from a public key: Keccak-256 over the 64 bytes
    /// of curve point (the uncompressed encoding minus its 0x04 tag), then
    /// the last 20 hash bytes behind the network prefix.
    pub fn derive_from_public_key(key: &PublicKey) -> Self {
        let uncompressed = key.uncompressed();
        let hash = keccak256(&uncompressed[1..]);

        let mut data = [0u8; ADDRESS_LEN];
        data[0] = ADDRESS_PREFIX;
        data[1..].copy_from_slice(&hash[12..]);
        TronAddress { data }
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.data
    }

    /// Lowercase hex of the 21 raw bytes, e.g. `41…`.
    pub fn hex(&self) -> String {
        hex::encode(self.data)
    }
}

impl fmt::Display for TronAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", base58::encode_check(&self.data))
    }
}
