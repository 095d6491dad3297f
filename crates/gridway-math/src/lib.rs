//! Mathematical types for gridway
//!
//! Integer and decimal amounts plus the coin collections that request
//! envelopes carry as fees and gas prices.

pub mod coin;
pub mod decimal;
pub mod int;

pub use coin::{Coin, CoinError, Coins, DecCoin, DecCoins};
pub use decimal::Dec;
pub use int::Int;
