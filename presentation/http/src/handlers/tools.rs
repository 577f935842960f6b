//! Standalone AI tool handlers: test advisor, writing grader, scenario generator

use crate::models::{AdvisorRequest, GraderRequest};
use crate::{handle_gateway_error, prompts, ApiResult, AppState};
use axum::extract::State;
use axum::response::Json;
use medstat_core::prelude::*;

/// Recommend a statistical test for the described comparison
pub async fn advise_test(
    State(state): State<AppState>,
    Json(body): Json<AdvisorRequest>,
) -> ApiResult<GenerationOutput> {
    match state.gateway.generate(prompts::advisor_request(&body)).await {
        Ok(output) => Ok(Json(output)),
        Err(e) => Err(handle_gateway_error(e)),
    }
}

/// Review one section of a student manuscript
pub async fn grade_writing(
    State(state): State<AppState>,
    Json(body): Json<GraderRequest>,
) -> ApiResult<GenerationOutput> {
    match state.gateway.generate(prompts::grader_request(&body)).await {
        Ok(output) => Ok(Json(output)),
        Err(e) => Err(handle_gateway_error(e)),
    }
}

/// Invent a practice research scenario; takes no input
pub async fn generate_scenario(State(state): State<AppState>) -> ApiResult<GenerationOutput> {
    match state.gateway.generate(prompts::scenario_request()).await {
        Ok(output) => Ok(Json(output)),
        Err(e) => Err(handle_gateway_error(e)),
    }
}
