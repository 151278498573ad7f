use crate::bip32::HARDENED_OFFSET;
use crate::error::{Result, WalletError};
use std::fmt;
use std::str::FromStr;

/// BIP44 purpose constant, first component of `m/44'/coin'/account'/...`.
pub const PURPOSE_BIP44: u32 = 44;

/// A single component of a derivation path.
///
/// `value` is the raw child number (always below 2^31); the hardened flag is
/// folded into the high bit only when the index is handed to key derivation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DerivationPathIndex {
    value: u32,
    hardened: bool,
}

impl DerivationPathIndex {
    pub fn new(value: u32, hardened: bool) -> Self {
        debug_assert!(value < HARDENED_OFFSET);
        DerivationPathIndex { value, hardened }
    }

    pub fn hardened(value: u32) -> Self {
        Self::new(value, true)
    }

    pub fn normal(value: u32) -> Self {
        Self::new(value, false)
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn is_hardened(&self) -> bool {
        self.hardened
    }

    /// The 32-bit index used for child key derivation: the raw value with
    /// the high bit set when hardened.
    pub fn derivation_index(&self) -> u32 {
        if self.hardened {
            self.value | HARDENED_OFFSET
        } else {
            self.value
        }
    }
}

impl FromStr for DerivationPathIndex {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self> {
        let (digits, hardened) = match s.strip_suffix('\'').or_else(|| s.strip_suffix('h')) {
            Some(rest) => (rest, true),
            None => (s, false),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(WalletError::InvalidPath(s.to_string()));
        }

        let value: u32 = digits
            .parse()
            .map_err(|_| WalletError::InvalidPath(s.to_string()))?;
        if value >= HARDENED_OFFSET {
            return Err(WalletError::InvalidPath(s.to_string()));
        }

        Ok(DerivationPathIndex { value, hardened })
    }
}

impl fmt::Display for DerivationPathIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hardened {
            write!(f, "{}'", self.value)
        } else {
            write!(f, "{}", self.value)
        }
    }
}

/// An ordered sequence of derivation indices, e.g. `m/44'/195'/0'/0/0`.
///
/// The BIP44 accessors read positions 0..5 as purpose / coin / account /
/// change / address and yield 0 for components the path does not have.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DerivationPath {
    indices: Vec<DerivationPathIndex>,
}

impl DerivationPath {
    pub fn new(indices: Vec<DerivationPathIndex>) -> Self {
        DerivationPath { indices }
    }

    /// Builds the standard five-component BIP44 path
    /// `m/44'/coin'/account'/change/address`.
    pub fn bip44(coin: u32, account: u32, change: u32, address: u32) -> Self {
        DerivationPath {
            indices: vec![
                DerivationPathIndex::hardened(PURPOSE_BIP44),
                DerivationPathIndex::hardened(coin),
                DerivationPathIndex::hardened(account),
                DerivationPathIndex::normal(change),
                DerivationPathIndex::normal(address),
            ],
        }
    }

    pub fn indices(&self) -> &[DerivationPathIndex] {
        &self.indices
    }

    fn component(&self, position: usize) -> u32 {
        self.indices.get(position).map_or(0, |i| i.value())
    }

    pub fn purpose(&self) -> u32 {
        self.component(0)
    }

    pub fn coin(&self) -> u32 {
        self.component(1)
    }

    pub fn account(&self) -> u32 {
        self.component(2)
    }

    pub fn change(&self) -> u32 {
        self.component(3)
    }

    pub fn address(&self) -> u32 {
        self.component(4)
    }
}

impl FromStr for DerivationPath {
    type Err = WalletError;

    /// Parses a textual path. The grammar is total: a leading `m` or `M`,
    /// then zero or more `/component` groups where each component is a
    /// nonempty decimal run below 2^31 with at most one trailing `'` or `h`
    /// hardened marker. Anything else fails; parsing never partially
    /// succeeds.
    fn from_str(s: &str) -> Result<Self> {
        let mut components = s.split('/');
        match components.next() {
            Some("m") | Some("M") => {}
            _ => return Err(WalletError::InvalidPath(s.to_string())),
        }

        let indices = components
            .map(DerivationPathIndex::from_str)
            .collect::<Result<Vec<_>>>()?;

        Ok(DerivationPath { indices })
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for index in &self.indices {
            write!(f, "/{}", index)?;
        }
        Ok(())
    }
}
