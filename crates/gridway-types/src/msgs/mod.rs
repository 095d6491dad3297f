//! Message types grouped by module

pub mod distribution;

pub use distribution::{MsgWithdrawDelegatorReward, MsgWithdrawValidatorCommission};
