//! Common envelope attached to every write request

use gridway_math::{CoinError, Coins, DecCoins};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Structural faults in a [`BaseReq`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("chain-id required but not specified")]
    MissingChainId,

    #[error("name or address required but not specified")]
    MissingFrom,

    #[error("cannot provide both fees and gas prices")]
    FeesAndGasPrices,

    #[error("invalid fees or gas prices provided: {0}")]
    InvalidFees(#[from] CoinError),
}

/// Transaction-construction parameters shared by all write endpoints.
///
/// Every field is optional on the wire; `null` and missing values decode to
/// the zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseReq {
    #[serde(deserialize_with = "null_as_default")]
    pub from: String,
    #[serde(deserialize_with = "null_as_default")]
    pub memo: String,
    #[serde(deserialize_with = "null_as_default")]
    pub chain_id: String,
    #[serde(serialize_with = "u64_as_string", deserialize_with = "u64_from_json")]
    pub account_number: u64,
    #[serde(serialize_with = "u64_as_string", deserialize_with = "u64_from_json")]
    pub sequence: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub fees: Coins,
    #[serde(deserialize_with = "null_as_default")]
    pub gas_prices: DecCoins,
    #[serde(deserialize_with = "null_as_default")]
    pub gas: String,
    #[serde(deserialize_with = "null_as_default")]
    pub gas_adjustment: String,
    #[serde(deserialize_with = "null_as_default")]
    pub generate_only: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub simulate: bool,
}

impl BaseReq {
    /// Trim surrounding whitespace from every text field
    pub fn sanitize(self) -> Self {
        Self {
            from: self.from.trim().to_string(),
            memo: self.memo.trim().to_string(),
            chain_id: self.chain_id.trim().to_string(),
            gas: self.gas.trim().to_string(),
            gas_adjustment: self.gas_adjustment.trim().to_string(),
            ..self
        }
    }

    /// Structural checks; chain context and fee checks are skipped when the
    /// request only generates or simulates
    pub fn validate_basic(&self) -> Result<(), ValidationError> {
        if !self.generate_only && !self.simulate {
            if self.chain_id.is_empty() {
                return Err(ValidationError::MissingChainId);
            }
            if !self.fees.is_empty() && !self.gas_prices.is_empty() {
                return Err(ValidationError::FeesAndGasPrices);
            }
            self.fees.validate()?;
            self.gas_prices.validate()?;
        }

        if self.from.is_empty() {
            return Err(ValidationError::MissingFrom);
        }

        Ok(())
    }
}

/// Body accepted by every withdrawal endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawRewardsReq {
    #[serde(default, deserialize_with = "null_as_default")]
    pub base_req: BaseReq,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn u64_as_string<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string())
}

// Amino JSON writes 64-bit integers as strings; plain numbers are accepted too
fn u64_from_json<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(u64),
        Text(String),
    }

    match Option::<Repr>::deserialize(deserializer)? {
        None => Ok(0),
        Some(Repr::Number(n)) => Ok(n),
        Some(Repr::Text(s)) if s.trim().is_empty() => Ok(0),
        Some(Repr::Text(s)) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
