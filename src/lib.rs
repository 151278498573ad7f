pub mod base58;
pub mod bip32;
pub mod derivation_path;
pub mod error;
pub mod extended_key;
pub mod hd_wallet;
pub mod keys;
pub mod tron;

pub use derivation_path::{DerivationPath, DerivationPathIndex};
pub use error::{Result, WalletError};
pub use hd_wallet::HDWallet;
pub use keys::{PrivateKey, PublicKey};
pub use tron::TronAddress;
