use crate::base58;
use crate::bip32::{HDNode, KeyMaterial};
use crate::error::{Result, WalletError};
use secp256k1::{PublicKey, SecretKey};
use zeroize::Zeroize;

/// Version prefix of a mainnet extended private key ("xprv").
pub const VERSION_PRIVATE: u32 = 0x0488_ADE4;
/// Version prefix of a mainnet extended public key ("xpub").
pub const VERSION_PUBLIC: u32 = 0x0488_B21E;

/// Serialized extended-key payload length, before the Base58Check framing.
pub const PAYLOAD_LEN: usize = 78;

/// Serializes a node into the textual extended-key form.
///
/// Layout (all integers big-endian): 4-byte version, 1-byte depth, 4-byte
/// parent fingerprint, 4-byte child number, 32-byte chain code, 33 bytes of
/// key material (`0x00 || ser256(k)` private, compressed point public), the
/// whole wrapped in Base58Check.
pub fn serialize(node: &HDNode, parent_fingerprint: u32, public: bool) -> Result<String> {
    let mut buf = [0u8; PAYLOAD_LEN];
    let version = if public { VERSION_PUBLIC } else { VERSION_PRIVATE };
    buf[0..4].copy_from_slice(&version.to_be_bytes());
    buf[4] = node.depth();
    buf[5..9].copy_from_slice(&parent_fingerprint.to_be_bytes());
    buf[9..13].copy_from_slice(&node.child_num().to_be_bytes());
    buf[13..45].copy_from_slice(node.chain_code());
    if public {
        buf[45..].copy_from_slice(&node.compressed_public());
    } else {
        let key = node
            .private_key()
            .ok_or(WalletError::CryptoFailure("no private key to serialize"))?;
        buf[45] = 0x00;
        buf[46..].copy_from_slice(&key.to_bytes());
    }

    let encoded = base58::encode_check(&buf);
    buf.zeroize();
    Ok(encoded)
}

/// Decodes the textual extended-key form back into a node.
///
/// The stored parent fingerprint is read past and dropped: BIP32 treats it
/// as display metadata and nothing downstream needs it. A private payload
/// yields a node with the public key not yet materialized; a public payload
/// yields a public-only node.
pub fn deserialize(extended: &str) -> Result<HDNode> {
    let mut buf = base58::decode_check(extended, PAYLOAD_LEN)?;

    let version = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let depth = buf[4];
    let child_num = u32::from_be_bytes([buf[9], buf[10], buf[11], buf[12]]);
    let mut chain_code = [0u8; 32];
    chain_code.copy_from_slice(&buf[13..45]);

    let key = match version {
        VERSION_PUBLIC => PublicKey::from_slice(&buf[45..])
            .map(KeyMaterial::Public)
            .map_err(|_| WalletError::MalformedExtended),
        VERSION_PRIVATE if buf[45] != 0x00 => Err(WalletError::MalformedExtended),
        VERSION_PRIVATE => SecretKey::from_slice(&buf[46..])
            .map(|secret| KeyMaterial::Private {
                secret,
                public: None,
            })
            .map_err(|_| WalletError::MalformedExtended),
        _ => Err(WalletError::MalformedExtended),
    };
    buf.zeroize();

    Ok(HDNode::from_parts(key?, chain_code, depth, child_num))
}
