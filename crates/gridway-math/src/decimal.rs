//! Fixed-point decimal type used for gas prices

use crate::int::Int;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;
use std::str::FromStr;

/// Fixed-point decimal backed by `rust_decimal`, encoded as a string in JSON
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dec(Decimal);

impl Dec {
    pub fn from_u64(n: u64) -> Self {
        Self(Decimal::from(n))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    pub fn checked_mul(&self, other: Self) -> Option<Self> {
        self.0.checked_mul(other.0).map(Self)
    }

    /// Round towards positive infinity and convert to an integer
    pub fn ceil_int(&self) -> Int {
        let mut ceiled = self.0.ceil();
        // Integral after `ceil`, so dropping the scale is exact
        ceiled.rescale(0);
        Int::from_i128(ceiled.mantissa())
    }
}

impl FromStr for Dec {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Decimal::from_str(s)?))
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Mul for Dec {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Self(self.0 * other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_int_rounds_up() {
        let price: Dec = "0.025".parse().unwrap();
        let fee = price * Dec::from_u64(200_001);
        assert_eq!(fee.ceil_int(), Int::from_u64(5001));
    }

    #[test]
    fn test_ceil_int_exact() {
        let price: Dec = "0.5".parse().unwrap();
        let fee = price * Dec::from_u64(10);
        assert_eq!(fee.ceil_int(), Int::from_u64(5));
    }

    #[test]
    fn test_ceil_int_large_and_negative() {
        let big: Dec = "79228162514264337593543950.2".parse().unwrap();
        assert_eq!(
            big.ceil_int(),
            "79228162514264337593543951".parse::<Int>().unwrap()
        );

        let negative: Dec = "-1.5".parse().unwrap();
        assert_eq!(negative.ceil_int(), "-1".parse::<Int>().unwrap());
    }

    #[test]
    fn test_sign_helpers_ignore_zero() {
        let zero: Dec = "0.000".parse().unwrap();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!"-0.1".parse::<Dec>().unwrap().is_positive());
    }
}
