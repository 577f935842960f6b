//! Quiz generation handler

use crate::models::QuizRequest;
use crate::{handle_gateway_error, prompts, ApiResult, AppState};
use axum::extract::State;
use axum::response::Json;
use medstat_core::prelude::*;
use tracing::debug;

/// Generate a 20-question multiple-choice quiz for a chapter
pub async fn generate_quiz(
    State(state): State<AppState>,
    Json(body): Json<QuizRequest>,
) -> ApiResult<GenerationOutput> {
    let chapter_id = body.chapter_id.unwrap_or_else(|| "1".to_string());
    let chapter_title = state
        .catalog
        .chapter_title(&chapter_id)
        .unwrap_or("the curriculum as a whole");

    debug!("generating quiz for chapter {}", chapter_id);

    match state.gateway.generate(prompts::quiz_request(chapter_title)).await {
        Ok(output) => Ok(Json(output)),
        Err(e) => Err(handle_gateway_error(e)),
    }
}
