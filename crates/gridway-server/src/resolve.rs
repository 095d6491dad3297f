//! Path variable resolution into typed addresses

use gridway_types::{AccAddress, AddressError, ValAddress};
use std::collections::HashMap;
use thiserror::Error;

/// Named path variables captured by the router
pub type PathVars = HashMap<String, String>;

pub const DELEGATOR_ADDR_VAR: &str = "delegatorAddr";
pub const VALIDATOR_ADDR_VAR: &str = "validatorAddr";

/// A path variable that is not a canonical address of the expected kind
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {var}: {source}")]
pub struct AddressDecodeError {
    pub var: &'static str,
    #[source]
    pub source: AddressError,
}

fn path_var<'a>(vars: &'a PathVars, name: &str) -> &'a str {
    // An absent variable decodes like an empty one and is rejected
    vars.get(name).map(String::as_str).unwrap_or_default()
}

/// Decode `{delegatorAddr}` as an account address
pub fn resolve_account_address(vars: &PathVars) -> Result<AccAddress, AddressDecodeError> {
    AccAddress::from_bech32(path_var(vars, DELEGATOR_ADDR_VAR)).map_err(|source| {
        AddressDecodeError {
            var: DELEGATOR_ADDR_VAR,
            source,
        }
    })
}

/// Decode `{validatorAddr}` as a validator operator address
pub fn resolve_validator_address(vars: &PathVars) -> Result<ValAddress, AddressDecodeError> {
    ValAddress::from_bech32(path_var(vars, VALIDATOR_ADDR_VAR)).map_err(|source| {
        AddressDecodeError {
            var: VALIDATOR_ADDR_VAR,
            source,
        }
    })
}
