//! REST gateway for distribution reward withdrawals
//!
//! Three endpoints share one pipeline that decodes the request envelope,
//! validates it, resolves the path addresses, builds the withdrawal messages
//! and either returns them as an unsigned transaction or hands them to a
//! signing service for broadcast.

pub mod base_req;
pub mod broadcast;
pub mod config;
pub mod dispatch;
pub mod distribution;
pub mod error;
pub mod pipeline;
pub mod policy;
pub mod querier;
pub mod resolve;
pub mod rest;
pub mod tx_builder;

pub use base_req::{BaseReq, ValidationError, WithdrawRewardsReq};
pub use broadcast::{BroadcastError, RemoteBroadcaster, TxBroadcaster};
pub use config::{ConfigError, GatewayConfig, LogConfig};
pub use dispatch::DispatchOutcome;
pub use distribution::{
    MessageBuilder, WithdrawDelegationReward, WithdrawDelegatorRewards, WithdrawValidatorRewards,
};
pub use error::{BuildError, ErrorResponse, RestError};
pub use policy::{BuildErrorKind, Endpoint, PolicyPreset, StatusOverride, StatusPolicy};
pub use querier::{DistributionQuerier, LcdQuerier, QueryError};
pub use resolve::{AddressDecodeError, PathVars};
pub use rest::{create_rest_router, RestGatewayConfig, RestGatewayState};
