//! Gemini generateContent API wire models.
//!
//! Every nested field on the response side is optional: absence collapses into
//! a malformed-response failure in the gateway rather than a deserialization
//! error or a panic.

use serde::{Deserialize, Serialize};

/// Gemini generateContent request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Content,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// A block of prompt content
#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

impl Content {
    /// Wrap a single text fragment
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// One fragment of request content
#[derive(Debug, Serialize)]
pub struct Part {
    pub text: String,
}

/// Tool declaration attached when grounding is requested
#[derive(Debug, Serialize)]
pub struct Tool {
    pub google_search: serde_json::Value,
}

impl Tool {
    /// The web-search tool, declared with an empty config object
    pub fn google_search() -> Self {
        Self {
            google_search: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

/// Generation configuration, present only in structured-data mode
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: serde_json::Value,
}

/// Gemini generateContent response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

/// One proposed response from the model
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
    pub grounding_metadata: Option<GroundingMetadata>,
}

/// Content of a candidate
#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

/// One fragment of candidate content
#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

/// Feedback attached when the prompt itself was rejected
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

/// Web-grounding metadata on a candidate
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_attributions: Vec<GroundingAttribution>,
}

/// A single attribution; only entries with a `web` source become citations
#[derive(Debug, Deserialize)]
pub struct GroundingAttribution {
    pub web: Option<WebSource>,
}

/// A web source backing an attribution
#[derive(Debug, Deserialize)]
pub struct WebSource {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serialization_minimal() {
        let request = GenerateContentRequest {
            contents: vec![Content::from_text("question")],
            system_instruction: Content::from_text("framing"),
            tools: None,
            generation_config: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{"parts": [{"text": "question"}]}],
                "systemInstruction": {"parts": [{"text": "framing"}]}
            })
        );
    }

    #[test]
    fn test_request_serialization_with_tools_and_schema() {
        let request = GenerateContentRequest {
            contents: vec![Content::from_text("question")],
            system_instruction: Content::from_text("framing"),
            tools: Some(vec![Tool::google_search()]),
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: json!({"type": "ARRAY"}),
            }),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["tools"], json!([{"google_search": {}}]));
        assert_eq!(
            value["generationConfig"],
            json!({"responseMimeType": "application/json", "responseSchema": {"type": "ARRAY"}})
        );
    }

    #[test]
    fn test_response_deserialization_tolerates_absence() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.candidates.is_empty());
        assert!(response.prompt_feedback.is_none());

        let response: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": [{"finishReason": "SAFETY"}]})).unwrap();
        let candidate = &response.candidates[0];
        assert!(candidate.content.is_none());
        assert_eq!(candidate.finish_reason.as_deref(), Some("SAFETY"));
    }

    #[test]
    fn test_grounding_metadata_deserialization() {
        let metadata: GroundingMetadata = serde_json::from_value(json!({
            "groundingAttributions": [
                {"web": {"uri": "https://example.com", "title": "Example"}},
                {"retrievedContext": {"uri": "ignored"}}
            ]
        }))
        .unwrap();

        assert_eq!(metadata.grounding_attributions.len(), 2);
        assert!(metadata.grounding_attributions[0].web.is_some());
        assert!(metadata.grounding_attributions[1].web.is_none());
    }
}
