//! Unsigned transaction generation for generate-only requests

use crate::base_req::BaseReq;
use crate::broadcast::{BroadcastError, TxBroadcaster};
use axum::http::StatusCode;
use gridway_math::{Coin, CoinError, Coins, Dec, DecCoins};
use gridway_types::{SdkMsg, StdFee, StdTx};
use thiserror::Error;
use tracing::debug;

/// Gas limit used when the request leaves `gas` empty
pub const DEFAULT_GAS_LIMIT: u64 = 200_000;

/// Multiplier applied to simulated gas when `gas_adjustment` is empty
pub const DEFAULT_GAS_ADJUSTMENT: f64 = 1.0;

/// Value of `gas` requesting a simulation
pub const GAS_AUTO: &str = "auto";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerateError {
    #[error("couldn't parse number: {0}")]
    GasAdjustment(String),

    #[error("gas must be either integer or {GAS_AUTO}: {0}")]
    Gas(String),

    #[error("gas adjustment must be a positive float")]
    NegativeGasAdjustment,

    #[error("cannot provide both fees and gas prices")]
    FeesAndGasPrices,

    #[error("invalid fees: {0}")]
    InvalidFees(#[from] CoinError),

    #[error("fee for {0} overflows")]
    FeeOverflow(String),

    #[error("gas estimation failed: {0}")]
    Simulation(BroadcastError),
}

impl GenerateError {
    pub fn status(&self) -> StatusCode {
        match self {
            GenerateError::Simulation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// Requested gas limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasSetting {
    /// Simulate, then scale the estimate by the adjustment
    Auto,
    Fixed(u64),
}

impl GasSetting {
    pub fn parse(gas: &str) -> Result<Self, GenerateError> {
        match gas {
            "" => Ok(GasSetting::Fixed(DEFAULT_GAS_LIMIT)),
            GAS_AUTO => Ok(GasSetting::Auto),
            other => other
                .parse()
                .map(GasSetting::Fixed)
                .map_err(|_| GenerateError::Gas(other.to_string())),
        }
    }
}

pub fn parse_gas_adjustment(s: &str) -> Result<f64, GenerateError> {
    if s.is_empty() {
        return Ok(DEFAULT_GAS_ADJUSTMENT);
    }
    s.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .ok_or_else(|| GenerateError::GasAdjustment(s.to_string()))
}

/// Fee is either given verbatim or derived as `ceil(price * gas)` per denom
pub fn compute_fees(fees: &Coins, gas_prices: &DecCoins, gas: u64) -> Result<Coins, GenerateError> {
    if !fees.is_empty() && !gas_prices.is_empty() {
        return Err(GenerateError::FeesAndGasPrices);
    }
    if gas_prices.is_empty() {
        return Ok(fees.clone());
    }

    let gas = Dec::from_u64(gas);
    let coins = gas_prices
        .as_slice()
        .iter()
        .map(|price| {
            let amount = price
                .amount
                .checked_mul(gas)
                .ok_or_else(|| GenerateError::FeeOverflow(price.denom.clone()))?;
            Ok(Coin {
                denom: price.denom.clone(),
                amount: amount.ceil_int(),
            })
        })
        .collect::<Result<Vec<_>, GenerateError>>()?;

    Ok(Coins::new(coins)?)
}

/// Build the unsigned transaction for `msgs`, simulating gas when asked
pub async fn generate_std_tx(
    base_req: &BaseReq,
    msgs: &[Box<dyn SdkMsg>],
    simulator: &dyn TxBroadcaster,
) -> Result<StdTx, GenerateError> {
    let adjustment = parse_gas_adjustment(&base_req.gas_adjustment)?;

    let gas = match GasSetting::parse(&base_req.gas)? {
        GasSetting::Fixed(gas) => gas,
        GasSetting::Auto => {
            if adjustment < 0.0 {
                return Err(GenerateError::NegativeGasAdjustment);
            }
            let estimate = simulator
                .simulate(base_req, msgs)
                .await
                .map_err(GenerateError::Simulation)?;
            let adjusted = (estimate as f64 * adjustment) as u64;
            debug!("simulated gas {} adjusted to {}", estimate, adjusted);
            adjusted
        }
    };

    let fee = StdFee::new(compute_fees(&base_req.fees, &base_req.gas_prices, gas)?, gas);
    Ok(StdTx::unsigned(msgs, fee, base_req.memo.clone()))
}
