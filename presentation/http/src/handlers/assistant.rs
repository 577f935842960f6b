//! Grounded chat handlers: general course assistant and ethics chatbot

use crate::models::AssistantRequest;
use crate::{handle_gateway_error, prompts, ApiResult, AppState};
use axum::extract::State;
use axum::response::Json;
use medstat_core::prelude::*;

/// Grounded Q&A over the whole curriculum
pub async fn answer_query(
    State(state): State<AppState>,
    Json(body): Json<AssistantRequest>,
) -> ApiResult<GenerationOutput> {
    match state.gateway.generate(prompts::assistant_request(&body.query)).await {
        Ok(output) => Ok(Json(output)),
        Err(e) => Err(handle_gateway_error(e)),
    }
}

/// Grounded chat restricted to research ethics
pub async fn ethics_chat(
    State(state): State<AppState>,
    Json(body): Json<AssistantRequest>,
) -> ApiResult<GenerationOutput> {
    match state.gateway.generate(prompts::ethics_request(&body.query)).await {
        Ok(output) => Ok(Json(output)),
        Err(e) => Err(handle_gateway_error(e)),
    }
}
