//! Course catalog handlers

use crate::models::{ChapterView, ErrorBody};
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use medstat_core::prelude::*;

/// List all module groups with their chapters
pub async fn list_modules(State(state): State<AppState>) -> Json<Vec<CourseModule>> {
    Json(state.catalog.modules().to_vec())
}

/// Look up one chapter by id
pub async fn get_chapter(
    State(state): State<AppState>,
    Path(chapter_id): Path<String>,
) -> Result<Json<ChapterView>, (StatusCode, Json<ErrorBody>)> {
    match state.catalog.chapter(&chapter_id) {
        Some((module, chapter)) => Ok(Json(ChapterView::new(module, chapter))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorBody {
                error: format!("chapter not found: {}", chapter_id),
            }),
        )),
    }
}
