//! Error responses for the withdrawal endpoints

use crate::base_req::ValidationError;
use crate::broadcast::BroadcastError;
use crate::policy::{BuildErrorKind, Endpoint};
use crate::querier::QueryError;
use crate::resolve::AddressDecodeError;
use crate::tx_builder::GenerateError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gridway_types::{IsSdkError, SdkError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

/// Failure while turning resolved addresses into messages
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("{0}")]
    Query(#[from] QueryError),

    #[error("{}", sdk_error_json(.0))]
    InvalidMsg(SdkError),
}

impl BuildError {
    pub fn kind(&self) -> BuildErrorKind {
        match self {
            BuildError::Query(_) => BuildErrorKind::Query,
            BuildError::InvalidMsg(_) => BuildErrorKind::InvalidMsg,
        }
    }
}

impl From<SdkError> for BuildError {
    fn from(err: SdkError) -> Self {
        BuildError::InvalidMsg(err)
    }
}

// ABCI-style error text: codespace, code and message as a JSON object
fn sdk_error_json(err: &SdkError) -> String {
    serde_json::json!({
        "codespace": err.codespace(),
        "code": err.code(),
        "message": err.to_string(),
    })
    .to_string()
}

/// Every way a withdrawal request can fail, in pipeline order
#[derive(Error, Debug)]
pub enum RestError {
    #[error("failed to decode JSON payload: {0}")]
    Decode(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    AddressDecode(#[from] AddressDecodeError),

    #[error("{error}")]
    Build {
        endpoint: Endpoint,
        status: StatusCode,
        error: BuildError,
    },

    #[error("{0}")]
    Generate(#[from] GenerateError),

    #[error("{0}")]
    Broadcast(#[from] BroadcastError),
}

impl RestError {
    pub fn status(&self) -> StatusCode {
        match self {
            RestError::Decode(_) | RestError::Validation(_) | RestError::AddressDecode(_) => {
                StatusCode::BAD_REQUEST
            }
            RestError::Build { status, .. } => *status,
            RestError::Generate(e) => e.status(),
            RestError::Broadcast(e) => e.status(),
        }
    }
}

/// Error body written for every failed request
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("request failed with {}: {}", status, self);
        } else {
            warn!("request rejected with {}: {}", status, self);
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridway_types::AddressError;

    #[test]
    fn test_invalid_msg_text_carries_code() {
        let err = BuildError::from(SdkError::NilValidatorAddress);
        assert_eq!(err.kind(), BuildErrorKind::InvalidMsg);

        let text: serde_json::Value = serde_json::from_str(&err.to_string()).unwrap();
        assert_eq!(text["codespace"], "distr");
        assert_eq!(text["code"], 103);
        assert_eq!(text["message"], "validator address is nil");
    }

    #[test]
    fn test_status_per_stage() {
        assert_eq!(
            RestError::Decode("eof".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RestError::from(ValidationError::MissingFrom).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RestError::from(AddressDecodeError {
                var: "delegatorAddr",
                source: AddressError::Empty,
            })
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RestError::Build {
                endpoint: Endpoint::DelegatorRewards,
                status: StatusCode::BAD_GATEWAY,
                error: BuildError::Query(QueryError::Transport("refused".to_string())),
            }
            .status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            RestError::from(BroadcastError::Unauthorized("no key".to_string())).status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = RestError::from(ValidationError::MissingChainId).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.code, 400);
        assert_eq!(body.error, "chain-id required but not specified");
    }
}
