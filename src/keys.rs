use crate::error::{Result, WalletError};
use secp256k1::{SecretKey, SECP256K1};

/// A secp256k1 private key, guaranteed non-zero and below the group order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrivateKey {
    inner: SecretKey,
}

impl PrivateKey {
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self> {
        let inner = SecretKey::from_slice(bytes)
            .map_err(|_| WalletError::CryptoFailure("invalid private key scalar"))?;
        Ok(PrivateKey { inner })
    }

    pub(crate) fn from_secret_key(inner: SecretKey) -> Self {
        PrivateKey { inner }
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.inner.secret_bytes()
    }

    /// Projects the key onto the curve: `G * k` in compressed form.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            inner: self.inner.public_key(SECP256K1),
        }
    }
}

/// A secp256k1 public key held in SEC1 compressed form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey {
    inner: secp256k1::PublicKey,
}

impl PublicKey {
    pub fn from_bytes(bytes: &[u8; 33]) -> Result<Self> {
        let inner = secp256k1::PublicKey::from_slice(bytes)
            .map_err(|_| WalletError::CryptoFailure("invalid compressed public key"))?;
        Ok(PublicKey { inner })
    }

    pub(crate) fn from_point(inner: secp256k1::PublicKey) -> Self {
        PublicKey { inner }
    }

    /// 33-byte SEC1 compressed encoding, leading byte 0x02 or 0x03.
    pub fn compressed(&self) -> [u8; 33] {
        self.inner.serialize()
    }

    /// 65-byte SEC1 uncompressed encoding, `0x04 || X || Y`.
    pub fn uncompressed(&self) -> [u8; 65] {
        self.inner.serialize_uncompressed()
    }
}
