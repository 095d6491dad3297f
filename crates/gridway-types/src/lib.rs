//! Core types for gridway
//!
//! Address types, stateless message validation and the amino-JSON
//! transaction shapes shared by the REST layer.

pub mod address;
pub mod error;
pub mod msgs;
pub mod tx;

pub use address::{AccAddress, AddressError, ValAddress};
pub use error::{IsSdkError, SdkError};
pub use msgs::{MsgWithdrawDelegatorReward, MsgWithdrawValidatorCommission};
pub use tx::{Amino, SdkMsg, StdFee, StdTx};
