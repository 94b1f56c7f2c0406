use axum::{
    Router,
    extract::{Json, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::core::{
    EngineConfig, NaturalTimelineResult, RiskProfileReturns, accelerate, build_plan,
    natural_timeline, project, reverse, timeline_with_cash_flows, timeline_with_return,
};

mod cli;
mod error;
mod payload;

pub use cli::{Cli, Command, ConfigArgs, run_cli};
pub use error::ApiError;

use payload::{ApiRequest, GoalPayload, api_request_from_payload};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TimelineResponse {
    natural: NaturalTimelineResult,
    accelerated: NaturalTimelineResult,
    with_cash_flows: NaturalTimelineResult,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RiskProfilesResponse {
    returns: RiskProfileReturns,
    max_years: u32,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub fn router(config: EngineConfig) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/risk-profiles", get(risk_profiles_handler))
        .route("/api/plan", post(plan_handler))
        .route("/api/timeline", post(timeline_handler))
        .route("/api/accelerate", post(accelerate_handler))
        .route("/api/reverse", post(reverse_handler))
        .route("/api/projections", post(projections_handler))
        .fallback(not_found_handler)
        .with_state(config)
}

pub async fn run_http_server(port: u16, config: EngineConfig) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, max_years = config.max_years, "B2A planning API listening");

    axum::serve(listener, router(config)).await
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn risk_profiles_handler(State(config): State<EngineConfig>) -> Response {
    json_response(
        StatusCode::OK,
        RiskProfilesResponse {
            returns: config.risk_returns,
            max_years: config.max_years,
        },
    )
}

async fn not_found_handler() -> Response {
    json_response(
        StatusCode::NOT_FOUND,
        serde_json::json!({ "error": "Not found" }),
    )
}

async fn plan_handler(
    State(config): State<EngineConfig>,
    payload: Result<Json<GoalPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let request = validated(payload, &config, "plan")?;
    let plan = build_plan(&request.plan, &config);
    info!(
        effective_return = plan.effective_return,
        natural_years = plan.natural_timeline.years,
        accelerated_years = plan.accelerated_timeline.years,
        achievable = plan.requirements.is_achievable_with_cash_flows,
        "plan computed"
    );
    Ok(json_response(StatusCode::OK, plan))
}

async fn timeline_handler(
    State(config): State<EngineConfig>,
    payload: Result<Json<GoalPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let request = validated(payload, &config, "timeline")?;
    let inputs = &request.plan.inputs;
    let annual_return = request.resolved_return(&config);

    let response = TimelineResponse {
        natural: natural_timeline(inputs, &config.risk_returns, config.max_years),
        accelerated: timeline_with_return(
            inputs.current_wealth,
            inputs.target_wealth,
            annual_return,
            config.max_years,
        ),
        with_cash_flows: timeline_with_cash_flows(
            inputs.current_wealth,
            inputs.target_wealth,
            annual_return,
            &request.plan.cash_flows,
            config.max_years,
        ),
    };
    Ok(json_response(StatusCode::OK, response))
}

async fn accelerate_handler(
    State(config): State<EngineConfig>,
    payload: Result<Json<GoalPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let request = validated(payload, &config, "accelerate")?;
    let inputs = &request.plan.inputs;
    let result = accelerate(
        inputs.current_wealth,
        inputs.target_wealth,
        inputs.desired_timeline_years,
        request.resolved_return(&config),
        &request.plan.cash_flows,
    );
    Ok(json_response(StatusCode::OK, result))
}

async fn reverse_handler(
    State(config): State<EngineConfig>,
    payload: Result<Json<GoalPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let request = validated(payload, &config, "reverse")?;
    let inputs = &request.plan.inputs;
    let Some(retirement_age) = request.plan.desired_retirement_age else {
        let err = ApiError::invalid("desiredRetirementAge", "is required");
        warn!(endpoint = "reverse", error = %err, "rejected request");
        return Err(err);
    };
    let result = reverse(
        inputs.current_wealth,
        inputs.target_wealth,
        inputs.current_age,
        retirement_age,
        request.resolved_return(&config),
        &request.plan.cash_flows,
    );
    Ok(json_response(StatusCode::OK, result))
}

async fn projections_handler(
    State(config): State<EngineConfig>,
    payload: Result<Json<GoalPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let request = validated(payload, &config, "projections")?;
    let inputs = &request.plan.inputs;
    let projections = project(
        inputs.current_wealth,
        inputs.desired_timeline_years,
        request.resolved_return(&config),
        &request.plan.cash_flows,
        config.optimistic_bonus,
        config.pessimistic_penalty,
    );
    Ok(json_response(StatusCode::OK, projections))
}

fn validated(
    payload: Result<Json<GoalPayload>, JsonRejection>,
    config: &EngineConfig,
    endpoint: &'static str,
) -> Result<ApiRequest, ApiError> {
    payload
        .map_err(ApiError::from)
        .and_then(|Json(payload)| api_request_from_payload(payload, config))
        .inspect_err(|err| warn!(endpoint, error = %err, "rejected request"))
}

pub(crate) fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}
