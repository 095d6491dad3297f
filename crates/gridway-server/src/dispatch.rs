//! Final pipeline step: emit the unsigned transaction or hand off for signing

use crate::base_req::BaseReq;
use crate::broadcast::TxBroadcaster;
use crate::error::RestError;
use crate::tx_builder::generate_std_tx;
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use gridway_types::{Amino, SdkMsg, StdTx};
use tracing::{debug, info};

/// Successful terminal states of a request
#[derive(Debug)]
pub enum DispatchOutcome {
    Generated(Amino<StdTx>),
    Broadcast(serde_json::Value),
}

impl IntoResponse for DispatchOutcome {
    fn into_response(self) -> Response {
        match self {
            DispatchOutcome::Generated(tx) => Json(tx).into_response(),
            DispatchOutcome::Broadcast(result) => Json(result).into_response(),
        }
    }
}

/// Consume the messages exactly once, on the branch `generate_only` selects
pub async fn dispatch(
    base_req: BaseReq,
    msgs: Vec<Box<dyn SdkMsg>>,
    broadcaster: &dyn TxBroadcaster,
) -> Result<DispatchOutcome, RestError> {
    if base_req.generate_only {
        debug!("generating unsigned tx with {} message(s)", msgs.len());
        let tx = generate_std_tx(&base_req, &msgs, broadcaster).await?;
        return Ok(DispatchOutcome::Generated(tx.into_amino()));
    }

    info!(
        "broadcasting {} message(s) signed by {}",
        msgs.len(),
        base_req.from
    );
    let result = broadcaster.sign_and_broadcast(base_req, msgs).await?;
    Ok(DispatchOutcome::Broadcast(result))
}
