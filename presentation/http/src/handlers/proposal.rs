//! Proposal-builder handler

use crate::models::{ErrorBody, ProposalRequest};
use crate::prompts::ProposalStep;
use crate::{handle_gateway_error, ApiResult, AppState};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use medstat_core::prelude::*;
use tracing::{debug, warn};

/// Run one step of the proposal-builder flow
pub async fn proposal_step(
    State(state): State<AppState>,
    Json(body): Json<ProposalRequest>,
) -> ApiResult<GenerationOutput> {
    let Some(step) = ProposalStep::parse(&body.step) else {
        warn!("rejected unknown proposal step: {}", body.step);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: format!("unknown proposal step: {}", body.step),
            }),
        ));
    };

    debug!("running proposal step {:?}", step);

    match state.gateway.generate(step.to_request(&body.context)).await {
        Ok(output) => Ok(Json(output)),
        Err(e) => Err(handle_gateway_error(e)),
    }
}
