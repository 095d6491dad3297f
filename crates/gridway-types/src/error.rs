//! Error handling for gridway

use thiserror::Error;

/// Errors raised by stateless message validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SdkError {
    #[error("delegator address is nil")]
    NilDelegatorAddress,

    #[error("validator address is nil")]
    NilValidatorAddress,
}

/// Trait for errors that carry a module codespace and numeric code
pub trait IsSdkError {
    /// The module's codespace (e.g., "distr")
    fn codespace(&self) -> &'static str;

    /// The numeric error code within the codespace
    fn code(&self) -> u32;
}

impl IsSdkError for SdkError {
    fn codespace(&self) -> &'static str {
        match self {
            SdkError::NilDelegatorAddress | SdkError::NilValidatorAddress => "distr",
        }
    }

    fn code(&self) -> u32 {
        match self {
            SdkError::NilDelegatorAddress | SdkError::NilValidatorAddress => 103,
        }
    }
}
