//! REST gateway for the distribution withdrawal endpoints

use crate::broadcast::TxBroadcaster;
use crate::dispatch::DispatchOutcome;
use crate::distribution::{
    WithdrawDelegationReward, WithdrawDelegatorRewards, WithdrawValidatorRewards,
};
use crate::error::RestError;
use crate::pipeline::{self, PipelineContext};
use crate::policy::StatusPolicy;
use crate::querier::DistributionQuerier;
use crate::resolve::PathVars;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, Method},
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

/// Default request body limit
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// REST gateway configuration
#[derive(Debug, Clone)]
pub struct RestGatewayConfig {
    /// Largest accepted request body
    pub max_body_bytes: usize,
    /// Answer CORS preflight requests from any origin
    pub enable_cors: bool,
}

impl Default for RestGatewayConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            enable_cors: true,
        }
    }
}

/// Immutable state shared by every request
pub struct RestGatewayState {
    config: RestGatewayConfig,
    policy: StatusPolicy,
    querier: Arc<dyn DistributionQuerier>,
    broadcaster: Arc<dyn TxBroadcaster>,
}

impl RestGatewayState {
    pub fn new(
        config: RestGatewayConfig,
        policy: StatusPolicy,
        querier: Arc<dyn DistributionQuerier>,
        broadcaster: Arc<dyn TxBroadcaster>,
    ) -> Self {
        Self {
            config,
            policy,
            querier,
            broadcaster,
        }
    }

    pub fn policy(&self) -> &StatusPolicy {
        &self.policy
    }

    fn context(&self) -> PipelineContext<'_> {
        PipelineContext {
            policy: &self.policy,
            querier: self.querier.as_ref(),
            broadcaster: self.broadcaster.as_ref(),
        }
    }
}

async fn withdraw_delegator_rewards(
    State(state): State<Arc<RestGatewayState>>,
    Path(vars): Path<PathVars>,
    body: Bytes,
) -> Result<DispatchOutcome, RestError> {
    pipeline::run(&WithdrawDelegatorRewards, state.context(), &vars, &body).await
}

async fn withdraw_delegation_reward(
    State(state): State<Arc<RestGatewayState>>,
    Path(vars): Path<PathVars>,
    body: Bytes,
) -> Result<DispatchOutcome, RestError> {
    pipeline::run(&WithdrawDelegationReward, state.context(), &vars, &body).await
}

async fn withdraw_validator_rewards(
    State(state): State<Arc<RestGatewayState>>,
    Path(vars): Path<PathVars>,
    body: Bytes,
) -> Result<DispatchOutcome, RestError> {
    pipeline::run(&WithdrawValidatorRewards, state.context(), &vars, &body).await
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "gridway-lcd",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create the REST router with its middleware stack
pub fn create_rest_router(state: Arc<RestGatewayState>) -> Router {
    let max_body_bytes = state.config.max_body_bytes;
    let enable_cors = state.config.enable_cors;

    let router = Router::new()
        .route(
            "/distribution/delegators/:delegatorAddr/rewards",
            post(withdraw_delegator_rewards),
        )
        .route(
            "/distribution/delegators/:delegatorAddr/rewards/:validatorAddr",
            post(withdraw_delegation_reward),
        )
        .route(
            "/distribution/validators/:validatorAddr/rewards",
            post(withdraw_validator_rewards),
        )
        .route("/health", get(health_check))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        );

    let router = if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
            .expose_headers([header::CONTENT_TYPE])
            .max_age(Duration::from_secs(86400));
        router.layer(cors)
    } else {
        router
    };

    router
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .with_state(state)
}
