//! Sign-and-broadcast collaborator
//!
//! Key resolution, signing and network submission happen behind
//! [`TxBroadcaster`]. The REST layer hands over the validated envelope and
//! the built messages and relays whatever comes back.

use crate::base_req::BaseReq;
use async_trait::async_trait;
use axum::http::StatusCode;
use gridway_types::{Amino, SdkMsg};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BroadcastError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Backend(String),
}

impl BroadcastError {
    pub fn status(&self) -> StatusCode {
        match self {
            BroadcastError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            BroadcastError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            BroadcastError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[async_trait]
pub trait TxBroadcaster: Send + Sync {
    /// Sign the messages with the key named by `base_req.from` and submit
    async fn sign_and_broadcast(
        &self,
        base_req: BaseReq,
        msgs: Vec<Box<dyn SdkMsg>>,
    ) -> Result<serde_json::Value, BroadcastError>;

    /// Estimate the gas the messages would consume
    async fn simulate(
        &self,
        base_req: &BaseReq,
        msgs: &[Box<dyn SdkMsg>],
    ) -> Result<u64, BroadcastError>;
}

/// Payload sent to the signing service
#[derive(Debug, Serialize, Deserialize)]
pub struct SignRequest {
    pub base_req: BaseReq,
    pub msgs: Vec<Amino<serde_json::Value>>,
}

impl SignRequest {
    pub fn new(base_req: BaseReq, msgs: &[Box<dyn SdkMsg>]) -> Self {
        Self {
            base_req,
            msgs: msgs.iter().map(|m| Amino::from_msg(m.as_ref())).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SimulateResponse {
    gas_estimate: String,
}

#[derive(Debug, Deserialize)]
struct RemoteError {
    error: String,
}

/// Forwards to an external signing service that holds the keys
#[derive(Clone)]
pub struct RemoteBroadcaster {
    client: reqwest::Client,
    signer_url: String,
}

impl RemoteBroadcaster {
    pub fn new(signer_url: impl Into<String>, timeout: Duration) -> Result<Self, BroadcastError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BroadcastError::Backend(e.to_string()))?;

        Ok(Self {
            client,
            signer_url: signer_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn post(&self, path: &str, request: &SignRequest) -> Result<String, BroadcastError> {
        let url = format!("{}{}", self.signer_url, path);
        debug!("forwarding {} message(s) to {}", request.msgs.len(), url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| BroadcastError::Backend(format!("signer unreachable: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BroadcastError::Backend(e.to_string()))?;

        if status.is_success() {
            return Ok(body);
        }

        let message = serde_json::from_str::<RemoteError>(&body)
            .map(|e| e.error)
            .unwrap_or(body);
        Err(match status.as_u16() {
            400 => BroadcastError::InvalidRequest(message),
            401 | 403 => BroadcastError::Unauthorized(message),
            _ => BroadcastError::Backend(message),
        })
    }
}

#[async_trait]
impl TxBroadcaster for RemoteBroadcaster {
    async fn sign_and_broadcast(
        &self,
        base_req: BaseReq,
        msgs: Vec<Box<dyn SdkMsg>>,
    ) -> Result<serde_json::Value, BroadcastError> {
        let request = SignRequest::new(base_req, &msgs);
        let body = self.post("/txs/sign_and_broadcast", &request).await?;
        serde_json::from_str(&body).map_err(|e| BroadcastError::Backend(e.to_string()))
    }

    async fn simulate(
        &self,
        base_req: &BaseReq,
        msgs: &[Box<dyn SdkMsg>],
    ) -> Result<u64, BroadcastError> {
        let request = SignRequest::new(base_req.clone(), msgs);
        let body = self.post("/txs/simulate", &request).await?;
        let response: SimulateResponse =
            serde_json::from_str(&body).map_err(|e| BroadcastError::Backend(e.to_string()))?;
        response
            .gas_estimate
            .parse()
            .map_err(|_| BroadcastError::Backend(format!("bad gas estimate {}", response.gas_estimate)))
    }
}
