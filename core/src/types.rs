//! Core types for generation requests and results

use serde::{Deserialize, Serialize};

/// A single request to the generation gateway.
///
/// Built fresh by the route handler for every inbound call and never mutated
/// after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The user-facing question or instruction
    pub user_query: String,
    /// System framing, sent upstream separately from the user content
    pub system_instruction: String,
    /// Whether the model may consult web search and cite sources
    #[serde(default)]
    pub use_grounding: bool,
    /// Schema the model output must conform to, if structured output is wanted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<serde_json::Value>,
}

impl GenerationRequest {
    /// Create a new plain-text generation request
    pub fn new(user_query: impl Into<String>, system_instruction: impl Into<String>) -> Self {
        Self {
            user_query: user_query.into(),
            system_instruction: system_instruction.into(),
            use_grounding: false,
            output_schema: None,
        }
    }

    /// Allow the model to use web search and attach citations
    pub fn with_grounding(mut self) -> Self {
        self.use_grounding = true;
        self
    }

    /// Constrain the model output to the given schema
    pub fn with_schema(mut self, schema: serde_json::Value) -> Self {
        self.output_schema = Some(schema);
        self
    }
}

/// A web citation attached to a grounded response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub uri: String,
    pub title: String,
}

/// Successful result of a generation call.
///
/// Serializes to the wire shapes the frontend expects: `{"data": ...}` for
/// structured output, `{"text": ..., "sources": [...]}` otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenerationOutput {
    /// Parsed structured data, returned when the request carried a schema
    Structured { data: serde_json::Value },
    /// Free text plus zero or more citations, in upstream order
    Text { text: String, sources: Vec<SourceRef> },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_builders() {
        let request = GenerationRequest::new("query", "instruction");
        assert!(!request.use_grounding);
        assert!(request.output_schema.is_none());

        let request = GenerationRequest::new("query", "instruction").with_grounding();
        assert!(request.use_grounding);

        let request =
            GenerationRequest::new("query", "instruction").with_schema(json!({"type": "ARRAY"}));
        assert_eq!(request.output_schema, Some(json!({"type": "ARRAY"})));
    }

    #[test]
    fn test_text_output_wire_shape() {
        let output = GenerationOutput::Text {
            text: "answer".to_string(),
            sources: vec![SourceRef {
                uri: "https://example.com".to_string(),
                title: "Example".to_string(),
            }],
        };

        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(
            value,
            json!({
                "text": "answer",
                "sources": [{"uri": "https://example.com", "title": "Example"}]
            })
        );
    }

    #[test]
    fn test_structured_output_wire_shape() {
        let output = GenerationOutput::Structured {
            data: json!([{"question": "Q1"}]),
        };

        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value, json!({"data": [{"question": "Q1"}]}));
    }
}
