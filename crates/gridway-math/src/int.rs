//! Arbitrary precision integer type

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Arbitrary precision signed integer, encoded as a decimal string in JSON
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Int(BigInt);

impl Serialize for Int {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Int {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.trim()
            .parse::<BigInt>()
            .map(Int)
            .map_err(serde::de::Error::custom)
    }
}

impl Int {
    pub fn from_u64(n: u64) -> Self {
        Self(BigInt::from(n))
    }

    pub(crate) fn from_i128(n: i128) -> Self {
        Self(BigInt::from(n))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }
}

impl FromStr for Int {
    type Err = num_bigint::ParseBigIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(BigInt::from_str(s)?))
    }
}

impl fmt::Display for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_json_is_string() {
        let n = Int::from_u64(1_000_000);
        assert_eq!(serde_json::to_string(&n).unwrap(), "\"1000000\"");

        let back: Int = serde_json::from_str("\"1000000\"").unwrap();
        assert_eq!(back, n);
    }

    #[test]
    fn test_int_rejects_garbage() {
        assert!(serde_json::from_str::<Int>("\"12ab\"").is_err());
        assert!(serde_json::from_str::<Int>("12").is_err());
    }

    #[test]
    fn test_int_sign() {
        assert!(!Int::from_i128(-3).is_positive());
        assert!(Int::from_u64(3).is_positive());
        assert!(Int::from_u64(0).is_zero());
    }
}
