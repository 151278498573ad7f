use crate::bip32::{HDNode, HARDENED_OFFSET};
use crate::derivation_path::{DerivationPath, DerivationPathIndex, PURPOSE_BIP44};
use crate::error::{Result, WalletError};
use crate::extended_key;
use crate::keys::{PrivateKey, PublicKey};
use zeroize::Zeroize;

/// Seed length required by the wallet.
pub const SEED_LEN: usize = 64;

/// Seed-rooted wallet façade over the BIP32 node tree.
///
/// Holds the 64-byte seed and re-derives from the root on every call; nodes
/// are never cached, so identical inputs always walk the same tree.
#[derive(Clone)]
pub struct HDWallet {
    seed: [u8; SEED_LEN],
}

fn private_key_of(node: &HDNode) -> Result<PrivateKey> {
    node.private_key()
        .ok_or(WalletError::CryptoFailure("node has no private key"))
}

impl HDWallet {
    pub fn new(seed: [u8; SEED_LEN]) -> Self {
        HDWallet { seed }
    }

    /// Builds a wallet from a byte slice, requiring exactly 64 bytes.
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        if seed.len() != SEED_LEN {
            return Err(WalletError::CryptoFailure("seed must be exactly 64 bytes"));
        }
        let mut data = [0u8; SEED_LEN];
        data.copy_from_slice(seed);
        Ok(HDWallet { seed: data })
    }

    fn root_node(&self) -> Result<HDNode> {
        HDNode::from_seed(&self.seed)
    }

    fn node_at(&self, path: &DerivationPath) -> Result<HDNode> {
        let mut node = self.root_node()?;
        for index in path.indices() {
            node = node.private_ckd(index.derivation_index())?;
        }
        Ok(node)
    }

    /// Private key of the master node.
    pub fn root_key(&self) -> Result<PrivateKey> {
        private_key_of(&self.root_node()?)
    }

    /// Private key at `path`, applying one private CKD per component.
    pub fn key_at(&self, path: &DerivationPath) -> Result<PrivateKey> {
        private_key_of(&self.node_at(path)?)
    }

    /// Derives `m/44'/coin'`, captures that node's fingerprint, then takes
    /// one more hardened step to `account'`. The fingerprint is what the
    /// account-level extended key serializes as its parent.
    fn account_node(&self, coin: u32, account: u32) -> Result<(HDNode, u32)> {
        let path = DerivationPath::new(vec![
            DerivationPathIndex::hardened(PURPOSE_BIP44),
            DerivationPathIndex::hardened(coin),
        ]);
        let node = self.node_at(&path)?;
        let fingerprint = node.fingerprint();
        let node = node.private_ckd(account | HARDENED_OFFSET)?;
        Ok((node, fingerprint))
    }

    /// Extended private key ("xprv…") for the account `m/44'/coin'/account'`.
    pub fn extended_private_account(&self, coin: u32, account: u32) -> Result<String> {
        let (node, fingerprint) = self.account_node(coin, account)?;
        extended_key::serialize(&node, fingerprint, false)
    }

    /// Extended public key ("xpub…") for the account `m/44'/coin'/account'`.
    pub fn extended_public_account(&self, coin: u32, account: u32) -> Result<String> {
        let (mut node, fingerprint) = self.account_node(coin, account)?;
        node.fill_public_key();
        extended_key::serialize(&node, fingerprint, true)
    }

    /// Public key under an account-level extended key.
    ///
    /// Only the change and address components of `path` are consumed: the
    /// extended key already encodes the account subtree. A private extended
    /// input is projected to its public point before the public CKDs, so the
    /// result matches the all-private derivation of the same path.
    pub fn public_key_from_extended(extended: &str, path: &DerivationPath) -> Result<PublicKey> {
        let mut node = extended_key::deserialize(extended)?;
        node.fill_public_key();
        let node = node.public_ckd(path.change())?;
        let node = node.public_ckd(path.address())?;
        Ok(node.public_key())
    }

    /// Private key under an account-level extended key; the input must be an
    /// extended private key.
    ///
    /// As with [`HDWallet::public_key_from_extended`], only the change and
    /// address components of `path` are consumed.
    pub fn private_key_from_extended(extended: &str, path: &DerivationPath) -> Result<PrivateKey> {
        let node = extended_key::deserialize(extended)?;
        if node.private_key().is_none() {
            return Err(WalletError::MalformedExtended);
        }
        let node = node.private_ckd(path.change())?;
        let node = node.private_ckd(path.address())?;
        private_key_of(&node)
    }
}

impl Drop for HDWallet {
    fn drop(&mut self) {
        self.seed.zeroize();
    }
}
