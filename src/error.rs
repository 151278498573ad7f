use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    InvalidPath(String),
    MalformedExtended,
    HardenedFromPublic,
    InvalidDerivedKey,
    CryptoFailure(&'static str),
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletError::InvalidPath(path) => {
                write!(f, "Invalid derivation path: {}", path)
            }
            WalletError::MalformedExtended => {
                write!(f, "Malformed extended key")
            }
            WalletError::HardenedFromPublic => {
                write!(f, "Public derivation does not support hardened indexes")
            }
            WalletError::InvalidDerivedKey => {
                write!(f, "Derived key is outside the valid scalar range")
            }
            WalletError::CryptoFailure(msg) => write!(f, "Crypto failure: {}", msg),
        }
    }
}

impl std::error::Error for WalletError {}

pub type Result<T> = std::result::Result<T, WalletError>;
