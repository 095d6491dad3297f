//! HTTP status policy for message-building failures
//!
//! Building can fail because the backend query failed or because a built
//! message did not pass its own validation. The status each endpoint reports
//! for each kind is looked up in a table; the legacy preset keeps the
//! validator endpoint answering 400 for both.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// The three withdrawal endpoints sharing the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    /// `POST /distribution/delegators/{delegatorAddr}/rewards`
    DelegatorRewards,
    /// `POST /distribution/delegators/{delegatorAddr}/rewards/{validatorAddr}`
    DelegationReward,
    /// `POST /distribution/validators/{validatorAddr}/rewards`
    ValidatorRewards,
}

impl Endpoint {
    pub const ALL: [Endpoint; 3] = [
        Endpoint::DelegatorRewards,
        Endpoint::DelegationReward,
        Endpoint::ValidatorRewards,
    ];
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Endpoint::DelegatorRewards => "delegator_rewards",
            Endpoint::DelegationReward => "delegation_reward",
            Endpoint::ValidatorRewards => "validator_rewards",
        };
        f.write_str(name)
    }
}

/// Fault class of a message-building failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildErrorKind {
    /// The backend query behind the builder failed
    Query,
    /// A built message failed its own stateless validation
    InvalidMsg,
}

/// Named starting points for the policy table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyPreset {
    /// Historic mapping: the validator endpoint answers 400 for every build failure
    #[default]
    Legacy,
    /// Backend failures are 500 on every endpoint
    Consistent,
}

/// A single table entry supplied by configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusOverride {
    pub endpoint: Endpoint,
    pub kind: BuildErrorKind,
    pub status: u16,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PolicyError {
    #[error("status {status} for {endpoint}/{kind:?} is not a 4xx or 5xx code")]
    NotAnErrorStatus {
        endpoint: Endpoint,
        kind: BuildErrorKind,
        status: u16,
    },
}

/// Maps `(endpoint, failure kind)` to the status written to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPolicy {
    table: BTreeMap<(Endpoint, BuildErrorKind), StatusCode>,
}

impl StatusPolicy {
    pub fn preset(preset: PolicyPreset) -> Self {
        match preset {
            PolicyPreset::Legacy => Self::legacy(),
            PolicyPreset::Consistent => Self::consistent(),
        }
    }

    pub fn legacy() -> Self {
        Self::consistent().with(
            Endpoint::ValidatorRewards,
            BuildErrorKind::Query,
            StatusCode::BAD_REQUEST,
        )
    }

    pub fn consistent() -> Self {
        let mut table = BTreeMap::new();
        for endpoint in Endpoint::ALL {
            table.insert(
                (endpoint, BuildErrorKind::Query),
                StatusCode::INTERNAL_SERVER_ERROR,
            );
            table.insert((endpoint, BuildErrorKind::InvalidMsg), StatusCode::BAD_REQUEST);
        }
        Self { table }
    }

    /// Replace one entry
    pub fn with(mut self, endpoint: Endpoint, kind: BuildErrorKind, status: StatusCode) -> Self {
        self.table.insert((endpoint, kind), status);
        self
    }

    /// Start from a preset and apply configured overrides
    pub fn from_config(
        preset: PolicyPreset,
        overrides: &[StatusOverride],
    ) -> Result<Self, PolicyError> {
        let mut policy = Self::preset(preset);
        for o in overrides {
            let status = StatusCode::from_u16(o.status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .ok_or(PolicyError::NotAnErrorStatus {
                    endpoint: o.endpoint,
                    kind: o.kind,
                    status: o.status,
                })?;
            policy = policy.with(o.endpoint, o.kind, status);
        }
        Ok(policy)
    }

    pub fn status_for(&self, endpoint: Endpoint, kind: BuildErrorKind) -> StatusCode {
        self.table
            .get(&(endpoint, kind))
            .copied()
            .unwrap_or(match kind {
                BuildErrorKind::Query => StatusCode::INTERNAL_SERVER_ERROR,
                BuildErrorKind::InvalidMsg => StatusCode::BAD_REQUEST,
            })
    }
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self::legacy()
    }
}
