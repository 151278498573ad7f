use crate::error::{Result, WalletError};
use sha2::{Digest, Sha256};

const CHECKSUM_LEN: usize = 4;

fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    // First 4 bytes of SHA256(SHA256(payload))
    let hash1 = Sha256::digest(payload);
    let hash2 = Sha256::digest(hash1);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&hash2[..CHECKSUM_LEN]);
    out
}

/// Base58Check encode: Base58(payload || first4(SHA256(SHA256(payload))))
pub fn encode_check(payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum(payload));
    bs58::encode(data).into_string()
}

/// Base58Check decode, verifying the trailing checksum and that the payload
/// has exactly `expected_len` bytes.
pub fn decode_check(encoded: &str, expected_len: usize) -> Result<Vec<u8>> {
    let data = bs58::decode(encoded)
        .into_vec()
        .map_err(|_| WalletError::MalformedExtended)?;

    if data.len() != expected_len + CHECKSUM_LEN {
        return Err(WalletError::MalformedExtended);
    }

    let (payload, check) = data.split_at(data.len() - CHECKSUM_LEN);
    if check != checksum(payload) {
        return Err(WalletError::MalformedExtended);
    }

    Ok(payload.to_vec())
}
