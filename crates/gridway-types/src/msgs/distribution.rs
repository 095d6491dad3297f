//! Distribution module message types

use crate::{
    address::{AccAddress, ValAddress},
    error::SdkError,
    tx::SdkMsg,
};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Router key of the distribution module
pub const ROUTER_KEY: &str = "distr";

/// Withdraw the rewards a delegator has accrued with one validator.
///
/// An address is nil only when it is absent; any decoded address,
/// including the all-zero one, is a real address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgWithdrawDelegatorReward {
    pub delegator_address: Option<AccAddress>,
    pub validator_address: Option<ValAddress>,
}

impl MsgWithdrawDelegatorReward {
    pub fn new(delegator_address: AccAddress, validator_address: ValAddress) -> Self {
        Self {
            delegator_address: Some(delegator_address),
            validator_address: Some(validator_address),
        }
    }
}

// Nil addresses render as the empty string
fn bech32_or_empty<T: ToString>(addr: &Option<T>) -> String {
    addr.as_ref().map(T::to_string).unwrap_or_default()
}

impl SdkMsg for MsgWithdrawDelegatorReward {
    fn route(&self) -> &'static str {
        ROUTER_KEY
    }

    fn msg_type(&self) -> &'static str {
        "withdraw_delegator_reward"
    }

    fn amino_type(&self) -> &'static str {
        "cosmos-sdk/MsgWithdrawDelegationReward"
    }

    fn validate_basic(&self) -> Result<(), SdkError> {
        if self.delegator_address.is_none() {
            return Err(SdkError::NilDelegatorAddress);
        }
        if self.validator_address.is_none() {
            return Err(SdkError::NilValidatorAddress);
        }
        Ok(())
    }

    fn get_signers(&self) -> Vec<AccAddress> {
        self.delegator_address.into_iter().collect()
    }

    fn amino_value(&self) -> serde_json::Value {
        serde_json::json!({
            "delegator_address": bech32_or_empty(&self.delegator_address),
            "validator_address": bech32_or_empty(&self.validator_address),
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Withdraw the commission a validator has accrued
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgWithdrawValidatorCommission {
    pub validator_address: Option<ValAddress>,
}

impl MsgWithdrawValidatorCommission {
    pub fn new(validator_address: ValAddress) -> Self {
        Self {
            validator_address: Some(validator_address),
        }
    }
}

impl SdkMsg for MsgWithdrawValidatorCommission {
    fn route(&self) -> &'static str {
        ROUTER_KEY
    }

    fn msg_type(&self) -> &'static str {
        "withdraw_validator_commission"
    }

    fn amino_type(&self) -> &'static str {
        "cosmos-sdk/MsgWithdrawValidatorCommission"
    }

    fn validate_basic(&self) -> Result<(), SdkError> {
        if self.validator_address.is_none() {
            return Err(SdkError::NilValidatorAddress);
        }
        Ok(())
    }

    // The operator signs with the account sharing the validator's bytes
    fn get_signers(&self) -> Vec<AccAddress> {
        self.validator_address.map(AccAddress::from).into_iter().collect()
    }

    fn amino_value(&self) -> serde_json::Value {
        serde_json::json!({
            "validator_address": bech32_or_empty(&self.validator_address),
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
