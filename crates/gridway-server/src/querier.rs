//! Chain-state queries needed to build withdrawal messages

use async_trait::async_trait;
use gridway_types::{AccAddress, ValAddress};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("query transport error: {0}")]
    Transport(String),

    #[error("query failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("couldn't decode query response: {0}")]
    Decode(String),
}

/// Read access to distribution state
#[async_trait]
pub trait DistributionQuerier: Send + Sync {
    /// Validators the delegator currently has a delegation with
    async fn delegator_validators(
        &self,
        delegator: &AccAddress,
    ) -> Result<Vec<ValAddress>, QueryError>;
}

/// Light-client REST node response; older nodes return the bare list
#[derive(Deserialize)]
#[serde(untagged)]
enum ValidatorsResponse {
    Bare(Option<Vec<ValAddress>>),
    Wrapped { result: Option<Vec<ValAddress>> },
}

impl ValidatorsResponse {
    fn into_inner(self) -> Vec<ValAddress> {
        match self {
            ValidatorsResponse::Bare(v) | ValidatorsResponse::Wrapped { result: v } => {
                v.unwrap_or_default()
            }
        }
    }
}

/// Queries a node's REST interface over HTTP
#[derive(Clone)]
pub struct LcdQuerier {
    client: reqwest::Client,
    node_url: String,
}

impl LcdQuerier {
    pub fn new(node_url: impl Into<String>, timeout: Duration) -> Result<Self, QueryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QueryError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            node_url: node_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl DistributionQuerier for LcdQuerier {
    async fn delegator_validators(
        &self,
        delegator: &AccAddress,
    ) -> Result<Vec<ValAddress>, QueryError> {
        let url = format!(
            "{}/distribution/delegators/{}/validators",
            self.node_url, delegator
        );
        debug!("querying delegator validators at {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| QueryError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| QueryError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(QueryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str::<ValidatorsResponse>(&body)
            .map(ValidatorsResponse::into_inner)
            .map_err(|e| QueryError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path, http::StatusCode, routing::get, Json, Router};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_response_shapes() {
        let val = ValAddress::new([3u8; 20]);
        let bare = format!("[\"{val}\"]");
        let wrapped = format!("{{\"height\":\"10\",\"result\":[\"{val}\"]}}");

        for body in [bare, wrapped] {
            let parsed: ValidatorsResponse = serde_json::from_str(&body).unwrap();
            assert_eq!(parsed.into_inner(), vec![val]);
        }

        let null: ValidatorsResponse = serde_json::from_str("null").unwrap();
        assert!(null.into_inner().is_empty());
    }

    #[tokio::test]
    async fn test_lcd_querier_against_local_node() {
        let val = ValAddress::new([3u8; 20]);
        let router = Router::new().route(
            "/distribution/delegators/:addr/validators",
            get(move |Path(_addr): Path<String>| async move {
                Json(serde_json::json!({ "height": "1", "result": [val] }))
            }),
        );
        let url = serve(router).await;

        let querier = LcdQuerier::new(url, Duration::from_secs(5)).unwrap();
        let delegator = AccAddress::new([1u8; 20]);
        let validators = querier.delegator_validators(&delegator).await.unwrap();
        assert_eq!(validators, vec![val]);
    }

    #[tokio::test]
    async fn test_lcd_querier_reports_node_errors() {
        let router = Router::new().route(
            "/distribution/delegators/:addr/validators",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "store unavailable") }),
        );
        let url = serve(router).await;

        let querier = LcdQuerier::new(url, Duration::from_secs(5)).unwrap();
        let err = querier
            .delegator_validators(&AccAddress::new([1u8; 20]))
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::Status { status: 500, .. }));
    }
}
