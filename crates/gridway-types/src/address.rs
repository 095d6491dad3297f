//! Address types for gridway
//!
//! Both address kinds are 20-byte identities whose canonical text form is
//! bech32 with a kind-specific human-readable prefix. Decoding checks the
//! checksum, the prefix and the payload length; nothing is truncated or
//! defaulted on failure.

use bech32::primitives::decode::CheckedHrpstring;
use bech32::{Bech32, Hrp};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length of every address payload
pub const ADDRESS_LEN: usize = 20;

/// Human-readable prefix for account addresses
pub const ACCOUNT_PREFIX: &str = "cosmos";

/// Human-readable prefix for validator operator addresses
pub const VALIDATOR_PREFIX: &str = "cosmosvaloper";

/// Address decoding errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("decoding bech32 address failed: must provide an address")]
    Empty,

    #[error("decoding bech32 failed: {0}")]
    Bech32(String),

    #[error("invalid bech32 prefix; expected {expected}, got {actual}")]
    InvalidPrefix { expected: &'static str, actual: String },

    #[error("invalid address length; expected {ADDRESS_LEN} bytes, got {0}")]
    InvalidLength(usize),
}

fn encode(hrp: &'static str, bytes: &[u8; ADDRESS_LEN]) -> String {
    // Both prefixes are compile-time constants known to be valid
    let hrp = Hrp::parse_unchecked(hrp);
    bech32::encode::<Bech32>(hrp, bytes).expect("20-byte payload always fits bech32")
}

fn decode(s: &str, expected: &'static str) -> Result<[u8; ADDRESS_LEN], AddressError> {
    if s.trim().is_empty() {
        return Err(AddressError::Empty);
    }

    // Only the original bech32 checksum is canonical; bech32m is rejected
    let checked =
        CheckedHrpstring::new::<Bech32>(s).map_err(|e| AddressError::Bech32(e.to_string()))?;
    let hrp = checked.hrp();
    if hrp.to_lowercase() != expected {
        return Err(AddressError::InvalidPrefix {
            expected,
            actual: hrp.to_string(),
        });
    }

    let data: Vec<u8> = checked.byte_iter().collect();
    data.as_slice()
        .try_into()
        .map_err(|_| AddressError::InvalidLength(data.len()))
}

/// Account address - 20 bytes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccAddress([u8; ADDRESS_LEN]);

/// Validator operator address - 20 bytes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValAddress([u8; ADDRESS_LEN]);

impl AccAddress {
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub fn to_bech32(&self) -> String {
        encode(ACCOUNT_PREFIX, &self.0)
    }

    pub fn from_bech32(s: &str) -> Result<Self, AddressError> {
        decode(s, ACCOUNT_PREFIX).map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl ValAddress {
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub fn to_bech32(&self) -> String {
        encode(VALIDATOR_PREFIX, &self.0)
    }

    pub fn from_bech32(s: &str) -> Result<Self, AddressError> {
        decode(s, VALIDATOR_PREFIX).map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

/// The operator's own account shares the validator's bytes
impl From<ValAddress> for AccAddress {
    fn from(val: ValAddress) -> Self {
        Self(val.0)
    }
}

impl fmt::Display for AccAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bech32())
    }
}

impl fmt::Display for ValAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bech32())
    }
}

impl FromStr for AccAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bech32(s)
    }
}

impl FromStr for ValAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bech32(s)
    }
}

// JSON carries addresses in their bech32 form
macro_rules! bech32_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_bech32())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::from_bech32(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

bech32_serde!(AccAddress);
bech32_serde!(ValAddress);
