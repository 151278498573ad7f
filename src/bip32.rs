use crate::error::{Result, WalletError};
use crate::keys;
use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use secp256k1::{PublicKey, SecretKey, SECP256K1};
use sha2::{Digest, Sha256, Sha512};
use zeroize::Zeroize;

type HmacSha512 = Hmac<Sha512>;

/// High bit of a child index marks hardened derivation.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// BIP32 HMAC key for master key generation.
const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

fn hmac_sha512(key: &[u8], data: &[u8]) -> Result<[u8; 64]> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|_| WalletError::CryptoFailure("HMAC init failed"))?;
    mac.update(data);
    let mut out = [0u8; 64];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}

/// Key material carried by a node.
///
/// A private-bearing node caches its compressed public key once
/// materialized; a public-only node has no private half at all, so hardened
/// and private derivation are rejected by construction rather than by
/// inspecting byte sentinels.
#[derive(Clone, Debug)]
pub enum KeyMaterial {
    Private {
        secret: SecretKey,
        public: Option<PublicKey>,
    },
    Public(PublicKey),
}

/// A BIP32 node: key material, chain code, and position in the tree.
///
/// Derivation never mutates the parent; both CKD variants hand back a fresh
/// child node.
#[derive(Clone, Debug)]
pub struct HDNode {
    key: KeyMaterial,
    chain_code: [u8; 32],
    depth: u8,
    child_num: u32,
}

impl HDNode {
    /// Master node from a seed, per BIP32:
    /// `I = HMAC-SHA512(Key = "Bitcoin seed", Data = seed)`, private key from
    /// I[0..32] and chain code from I[32..64].
    ///
    /// Accepts the BIP32 seed range of 16 to 64 bytes so the published test
    /// vectors (16-byte seeds) stay expressible.
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        if seed.len() < 16 || seed.len() > 64 {
            return Err(WalletError::CryptoFailure("seed must be 16 to 64 bytes"));
        }

        let mut i = hmac_sha512(MASTER_HMAC_KEY, seed)?;
        let secret = SecretKey::from_slice(&i[..32]);
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&i[32..]);
        i.zeroize();

        let secret = match secret {
            Ok(secret) => secret,
            Err(_) => {
                chain_code.zeroize();
                return Err(WalletError::CryptoFailure("master key outside scalar range"));
            }
        };

        Ok(HDNode {
            key: KeyMaterial::Private {
                secret,
                public: None,
            },
            chain_code,
            depth: 0,
            child_num: 0,
        })
    }

    pub(crate) fn from_parts(key: KeyMaterial, chain_code: [u8; 32], depth: u8, child_num: u32) -> Self {
        HDNode {
            key,
            chain_code,
            depth,
            child_num,
        }
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn child_num(&self) -> u32 {
        self.child_num
    }

    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// Caches the compressed public key on a private-bearing node. No-op if
    /// already materialized or if the node is public-only.
    pub fn fill_public_key(&mut self) {
        if let KeyMaterial::Private { secret, public } = &mut self.key {
            if public.is_none() {
                *public = Some(secret.public_key(SECP256K1));
            }
        }
    }

    fn public_point(&self) -> PublicKey {
        match &self.key {
            KeyMaterial::Private { secret, public } => match public {
                Some(point) => *point,
                None => secret.public_key(SECP256K1),
            },
            KeyMaterial::Public(point) => *point,
        }
    }

    pub fn public_key(&self) -> keys::PublicKey {
        keys::PublicKey::from_point(self.public_point())
    }

    /// SEC1 compressed public key; computed on the fly when not yet cached.
    pub fn compressed_public(&self) -> [u8; 33] {
        self.public_point().serialize()
    }

    /// The node's private key, or `None` on a public-only node.
    pub fn private_key(&self) -> Option<keys::PrivateKey> {
        match &self.key {
            KeyMaterial::Private { secret, .. } => Some(keys::PrivateKey::from_secret_key(*secret)),
            KeyMaterial::Public(_) => None,
        }
    }

    /// First four bytes of `RIPEMD160(SHA256(compressed_pub))`, big-endian.
    pub fn fingerprint(&self) -> u32 {
        let digest = Ripemd160::digest(Sha256::digest(self.compressed_public()));
        u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
    }

    /// Private child key derivation (CKDpriv).
    ///
    /// `index` is the raw 32-bit child number; the high bit selects hardened
    /// derivation. Fails with `InvalidDerivedKey` when IL falls outside the
    /// scalar range or the tweaked key degenerates to zero.
    pub fn private_ckd(&self, index: u32) -> Result<HDNode> {
        let secret = match &self.key {
            KeyMaterial::Private { secret, .. } => secret,
            KeyMaterial::Public(_) => {
                return Err(WalletError::CryptoFailure(
                    "private derivation requires a private key",
                ))
            }
        };

        let mut data = [0u8; 37];
        if index & HARDENED_OFFSET != 0 {
            // Hardened: data = 0x00 || ser256(parent_key) || ser32(index)
            data[0] = 0x00;
            data[1..33].copy_from_slice(&secret.secret_bytes());
        } else {
            // Normal: data = serP(parent_pubkey) || ser32(index)
            data[..33].copy_from_slice(&self.compressed_public());
        }
        data[33..].copy_from_slice(&index.to_be_bytes());

        let mut i = hmac_sha512(&self.chain_code, &data)?;
        data.zeroize();

        // child_key = (parse256(IL) + parent_key) mod n; IL must be a valid
        // scalar and the sum must not be zero.
        let child = SecretKey::from_slice(&i[..32])
            .and_then(|il| il.add_tweak(&(*secret).into()));
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&i[32..]);
        i.zeroize();

        let child = match child {
            Ok(child) => child,
            Err(_) => {
                chain_code.zeroize();
                return Err(WalletError::InvalidDerivedKey);
            }
        };

        Ok(HDNode {
            key: KeyMaterial::Private {
                secret: child,
                public: None,
            },
            chain_code,
            depth: self.depth + 1,
            child_num: index,
        })
    }

    /// Public child key derivation (CKDpub), non-hardened indices only.
    ///
    /// The child is public-only: it carries the tweaked point and no private
    /// half.
    pub fn public_ckd(&self, index: u32) -> Result<HDNode> {
        if index & HARDENED_OFFSET != 0 {
            return Err(WalletError::HardenedFromPublic);
        }

        let parent = self.public_point();
        let mut data = [0u8; 37];
        data[..33].copy_from_slice(&parent.serialize());
        data[33..].copy_from_slice(&index.to_be_bytes());

        let mut i = hmac_sha512(&self.chain_code, &data)?;

        // child_point = parent_point + IL*G; fails on IL outside the scalar
        // range or on the point at infinity.
        let child = SecretKey::from_slice(&i[..32])
            .and_then(|il| parent.add_exp_tweak(SECP256K1, &il.into()));
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&i[32..]);
        i.zeroize();

        let child = match child {
            Ok(child) => child,
            Err(_) => {
                chain_code.zeroize();
                return Err(WalletError::InvalidDerivedKey);
            }
        };

        Ok(HDNode {
            key: KeyMaterial::Public(child),
            chain_code,
            depth: self.depth + 1,
            child_num: index,
        })
    }
}
