//! Coin and DecCoin collections used for fees and gas prices

use crate::decimal::Dec;
use crate::int::Int;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoinError {
    #[error("invalid denomination:: {0}")]
    InvalidDenom(String),

    #[error("amount must be positive for denom {0}")]
    NonPositiveAmount(String),

    #[error("duplicate denomination:: {0}")]
    DuplicateDenom(String),

    #[error("denominations must be sorted: {0} after {1}")]
    Unsorted(String, String),
}

/// A single coin with denomination and integer amount
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: Int,
}

impl Coin {
    /// Create a new coin, validating denomination and amount
    pub fn new(denom: impl Into<String>, amount: Int) -> Result<Self, CoinError> {
        let coin = Self {
            denom: denom.into(),
            amount,
        };
        coin.validate()?;
        Ok(coin)
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    fn validate(&self) -> Result<(), CoinError> {
        if !is_valid_denom(&self.denom) {
            return Err(CoinError::InvalidDenom(self.denom.clone()));
        }
        if !self.amount.is_positive() {
            return Err(CoinError::NonPositiveAmount(self.denom.clone()));
        }
        Ok(())
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// A collection of coins.
///
/// Deserialization keeps the caller's order and amounts untouched so that
/// request validation can report what was actually sent; use
/// [`Coins::validate`] before trusting the contents.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coins(Vec<Coin>);

impl Coins {
    /// Build a sorted collection, dropping zero coins and rejecting duplicates
    pub fn new(mut coins: Vec<Coin>) -> Result<Self, CoinError> {
        coins.retain(|c| !c.is_zero());
        coins.sort_by(|a, b| a.denom.cmp(&b.denom));
        let coins = Self(coins);
        coins.validate()?;
        Ok(coins)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Coin] {
        &self.0
    }

    /// Check denominations, positivity, ordering and uniqueness
    pub fn validate(&self) -> Result<(), CoinError> {
        for coin in &self.0 {
            coin.validate()?;
        }
        check_sorted_unique(self.0.iter().map(|c| c.denom.as_str()))
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", s.join(","))
    }
}

/// A coin with a decimal amount, such as a gas price
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecCoin {
    pub denom: String,
    pub amount: Dec,
}

impl DecCoin {
    pub fn new(denom: impl Into<String>, amount: Dec) -> Result<Self, CoinError> {
        let coin = Self {
            denom: denom.into(),
            amount,
        };
        coin.validate()?;
        Ok(coin)
    }

    fn validate(&self) -> Result<(), CoinError> {
        if !is_valid_denom(&self.denom) {
            return Err(CoinError::InvalidDenom(self.denom.clone()));
        }
        if !self.amount.is_positive() {
            return Err(CoinError::NonPositiveAmount(self.denom.clone()));
        }
        Ok(())
    }
}

impl fmt::Display for DecCoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// A collection of decimal coins
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecCoins(Vec<DecCoin>);

impl DecCoins {
    pub fn new(mut coins: Vec<DecCoin>) -> Result<Self, CoinError> {
        coins.retain(|c| !c.amount.is_zero());
        coins.sort_by(|a, b| a.denom.cmp(&b.denom));
        let coins = Self(coins);
        coins.validate()?;
        Ok(coins)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[DecCoin] {
        &self.0
    }

    pub fn validate(&self) -> Result<(), CoinError> {
        for coin in &self.0 {
            coin.validate()?;
        }
        check_sorted_unique(self.0.iter().map(|c| c.denom.as_str()))
    }
}

fn check_sorted_unique<'a>(denoms: impl Iterator<Item = &'a str>) -> Result<(), CoinError> {
    let mut prev: Option<&str> = None;
    for denom in denoms {
        if let Some(p) = prev {
            if p == denom {
                return Err(CoinError::DuplicateDenom(denom.to_string()));
            }
            if p > denom {
                return Err(CoinError::Unsorted(denom.to_string(), p.to_string()));
            }
        }
        prev = Some(denom);
    }
    Ok(())
}

/// Denominations match `[a-z][a-z0-9]{2,15}`
fn is_valid_denom(denom: &str) -> bool {
    let bytes = denom.as_bytes();
    if !(3..=16).contains(&bytes.len()) || !bytes[0].is_ascii_lowercase() {
        return false;
    }
    bytes[1..]
        .iter()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin(denom: &str, amount: u64) -> Coin {
        Coin {
            denom: denom.to_string(),
            amount: Int::from_u64(amount),
        }
    }

    #[test]
    fn test_coins_json_shape() {
        let coins = Coins::new(vec![coin("stake", 50)]).unwrap();
        let json = serde_json::to_value(&coins).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "denom": "stake", "amount": "50" }])
        );
    }

    #[test]
    fn test_coins_new_sorts_and_drops_zero() {
        let coins = Coins::new(vec![coin("uatom", 1), coin("stake", 0), coin("atom", 2)]).unwrap();
        let denoms: Vec<_> = coins.as_slice().iter().map(|c| c.denom.as_str()).collect();
        assert_eq!(denoms, vec!["atom", "uatom"]);
    }

    #[test]
    fn test_coins_validate_rejects_bad_input() {
        let dup: Coins = serde_json::from_value(serde_json::json!([
            { "denom": "stake", "amount": "1" },
            { "denom": "stake", "amount": "2" }
        ]))
        .unwrap();
        assert_eq!(
            dup.validate(),
            Err(CoinError::DuplicateDenom("stake".to_string()))
        );

        let unsorted: Coins = serde_json::from_value(serde_json::json!([
            { "denom": "uatom", "amount": "1" },
            { "denom": "atom", "amount": "2" }
        ]))
        .unwrap();
        assert!(matches!(unsorted.validate(), Err(CoinError::Unsorted(_, _))));

        let zero: Coins =
            serde_json::from_value(serde_json::json!([{ "denom": "stake", "amount": "0" }]))
                .unwrap();
        assert!(matches!(
            zero.validate(),
            Err(CoinError::NonPositiveAmount(_))
        ));

        assert!(Coin::new("1bad", Int::from_u64(1)).is_err());
    }

    #[test]
    fn test_denom_rule() {
        for denom in ["stake", "uatom", "abc", "a123456789012345"] {
            assert!(is_valid_denom(denom), "{denom}");
        }
        for denom in ["", "A", "ab", "Stake", "1bad", "ibc/27394FB0", "u-atom", "a1234567890123456"] {
            assert!(!is_valid_denom(denom), "{denom}");
        }
    }

    #[test]
    fn test_dec_coins_parse_decimal_strings() {
        let prices: DecCoins =
            serde_json::from_value(serde_json::json!([{ "denom": "stake", "amount": "0.025" }]))
                .unwrap();
        assert!(prices.validate().is_ok());
        assert_eq!(prices.as_slice()[0].amount, "0.025".parse().unwrap());

        let negative: DecCoins =
            serde_json::from_value(serde_json::json!([{ "denom": "stake", "amount": "-1.5" }]))
                .unwrap();
        assert!(negative.validate().is_err());
    }
}
