//! Request and response bodies for the HTTP API

use medstat_core::prelude::*;
use serde::{Deserialize, Serialize};

/// Error body mirrored to the client alongside the mapped HTTP status
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Body of a quiz request
#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    /// Chapter to quiz on; defaults to chapter 1
    #[serde(rename = "chapterId")]
    pub chapter_id: Option<String>,
}

/// Body of a proposal-builder request
#[derive(Debug, Deserialize)]
pub struct ProposalRequest {
    pub step: String,
    #[serde(default)]
    pub context: ProposalContext,
}

/// Prior-step context carried through the proposal-builder flow.
///
/// Every field is optional; a step reads only the fields it needs.
#[derive(Debug, Default, Deserialize)]
pub struct ProposalContext {
    pub problem: Option<String>,
    pub title: Option<String>,
    pub general: Option<String>,
    pub specific: Option<String>,
    pub methods: Option<String>,
}

impl ProposalContext {
    pub fn problem(&self) -> &str {
        self.problem.as_deref().unwrap_or("")
    }

    pub fn title_or_placeholder(&self) -> &str {
        self.title.as_deref().unwrap_or("not decided yet")
    }

    pub fn general(&self) -> &str {
        self.general.as_deref().unwrap_or("")
    }

    pub fn specific(&self) -> &str {
        self.specific.as_deref().unwrap_or("")
    }

    pub fn methods(&self) -> &str {
        self.methods.as_deref().unwrap_or("")
    }
}

/// Body of a statistical-test advisor request
#[derive(Debug, Deserialize)]
pub struct AdvisorRequest {
    pub goal: String,
    pub groups: String,
    #[serde(rename = "varType")]
    pub var_type: String,
    pub dist: String,
}

/// Body of a writing-grader request
#[derive(Debug, Deserialize)]
pub struct GraderRequest {
    pub section: String,
    pub text: String,
}

/// Body of an assistant or ethics-chat request
#[derive(Debug, Deserialize)]
pub struct AssistantRequest {
    pub query: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// A chapter as exposed to the frontend
#[derive(Debug, Serialize)]
pub struct ChapterView {
    pub id: String,
    pub title: String,
    pub video_url: String,
    pub download_url: String,
    pub content_slug: String,
}

impl ChapterView {
    pub fn new(module: &CourseModule, chapter: &Chapter) -> Self {
        Self {
            id: chapter.id.clone(),
            title: chapter.title.clone(),
            video_url: chapter.video_url.clone(),
            download_url: module.download_url.clone(),
            content_slug: CourseCatalog::content_slug(&chapter.id),
        }
    }
}
