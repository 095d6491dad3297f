//! Shared request pipeline for the withdrawal endpoints
//!
//! decode -> sanitize -> validate -> resolve -> build -> dispatch, stopping at
//! the first failure. Only the resolve and build steps differ per endpoint.

use crate::base_req::WithdrawRewardsReq;
use crate::broadcast::TxBroadcaster;
use crate::dispatch::{dispatch, DispatchOutcome};
use crate::distribution::MessageBuilder;
use crate::error::RestError;
use crate::policy::StatusPolicy;
use crate::querier::DistributionQuerier;
use crate::resolve::PathVars;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Decode a JSON request body
pub fn decode_request<T: DeserializeOwned>(body: &[u8]) -> Result<T, RestError> {
    serde_json::from_slice(body).map_err(|e| RestError::Decode(e.to_string()))
}

/// Collaborators and policy a pipeline run needs
pub struct PipelineContext<'a> {
    pub policy: &'a StatusPolicy,
    pub querier: &'a dyn DistributionQuerier,
    pub broadcaster: &'a dyn TxBroadcaster,
}

/// Run one request through the pipeline with `builder` as the message step
pub async fn run<B: MessageBuilder>(
    builder: &B,
    ctx: PipelineContext<'_>,
    vars: &PathVars,
    body: &[u8],
) -> Result<DispatchOutcome, RestError> {
    let endpoint = builder.endpoint();

    let req: WithdrawRewardsReq = decode_request(body)?;
    let base_req = req.base_req.sanitize();
    base_req.validate_basic()?;

    let addrs = builder.resolve(vars)?;
    debug!("{}: path addresses resolved", endpoint);

    let msgs = builder
        .build(addrs, ctx.querier)
        .await
        .map_err(|error| RestError::Build {
            endpoint,
            status: ctx.policy.status_for(endpoint, error.kind()),
            error,
        })?;
    debug!("{}: built {} message(s)", endpoint, msgs.len());

    dispatch(base_req, msgs, ctx.broadcaster).await
}
