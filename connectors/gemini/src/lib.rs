//! Gemini connector for the MedStat generation gateway

use async_trait::async_trait;
use medstat_core::prelude::*;
use reqwest::Client;
use tracing::{debug, error, warn};

mod config;
mod models;

pub use config::GeminiConfig;
use models::*;

/// Gemini implementation of [`GenerationGateway`]
pub struct GeminiGateway {
    client: Client,
    config: GeminiConfig,
}

/// Failure of a single upstream attempt, before retry classification
#[derive(Debug)]
enum AttemptError {
    /// Connection error or timeout; no HTTP response was received
    Transport(String),
    /// Non-200 HTTP response from the upstream API
    Upstream { status: u16, body: String },
    /// A 200 response whose body was not valid JSON
    Decode(String),
}

impl AttemptError {
    /// Retry policy as a pure function of the failure kind: transport
    /// failures and upstream 5xx are retryable, everything else is terminal.
    fn is_retryable(&self) -> bool {
        match self {
            AttemptError::Transport(_) => true,
            AttemptError::Upstream { status, .. } => *status >= 500,
            AttemptError::Decode(_) => false,
        }
    }

    /// Convert a terminal attempt failure into the gateway error it surfaces as
    fn into_gateway_error(self) -> GatewayError {
        match self {
            AttemptError::Transport(_) => GatewayError::TransportExhausted,
            AttemptError::Upstream { status, body } => {
                GatewayError::UpstreamStatus { status, body }
            }
            AttemptError::Decode(detail) => GatewayError::MalformedUpstreamResponse(detail),
        }
    }
}

impl GeminiGateway {
    /// Create a new Gemini gateway
    pub fn new(config: GeminiConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ConfigError::Invalid(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Build the upstream request body.
    ///
    /// User query and system instruction stay separate fields; the upstream
    /// API distinguishes system framing from user content.
    fn build_payload(&self, request: &GenerationRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::from_text(&request.user_query)],
            system_instruction: Content::from_text(&request.system_instruction),
            tools: request.use_grounding.then(|| vec![Tool::google_search()]),
            generation_config: request.output_schema.clone().map(|schema| GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema,
            }),
        }
    }

    /// Issue one upstream attempt and decode the body on success
    async fn attempt(
        &self,
        url: &str,
        payload: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AttemptError> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| AttemptError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(AttemptError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| AttemptError::Decode(format!("response body is not valid JSON: {}", e)))
    }

    /// Normalize a decoded 200 response into a gateway outcome
    fn interpret_response(
        &self,
        response: GenerateContentResponse,
        wants_structured: bool,
    ) -> Result<GenerationOutput, GatewayError> {
        let Some(candidate) = response.candidates.into_iter().next() else {
            if let Some(reason) = response
                .prompt_feedback
                .and_then(|feedback| feedback.block_reason)
            {
                warn!("prompt rejected upstream: {}", reason);
                return Err(GatewayError::UpstreamBlocked(reason));
            }
            return Err(GatewayError::MalformedUpstreamResponse(
                "no candidates in response".to_string(),
            ));
        };

        let Candidate {
            content,
            finish_reason,
            grounding_metadata,
        } = candidate;

        let Some(content) = content else {
            if finish_reason.as_deref() == Some("SAFETY") {
                warn!("candidate withheld for safety");
                return Err(GatewayError::UpstreamSafetyBlock("SAFETY".to_string()));
            }
            return Err(GatewayError::MalformedUpstreamResponse(
                "candidate has no content".to_string(),
            ));
        };

        let text = content
            .parts
            .into_iter()
            .next()
            .and_then(|part| part.text)
            .ok_or_else(|| {
                GatewayError::MalformedUpstreamResponse("no content text".to_string())
            })?;

        // Attributions without a web entry are skipped, not an error.
        let sources: Vec<SourceRef> = grounding_metadata
            .map(|metadata| {
                metadata
                    .grounding_attributions
                    .into_iter()
                    .filter_map(|attribution| attribution.web)
                    .map(|web| SourceRef {
                        uri: web.uri,
                        title: web.title,
                    })
                    .collect()
            })
            .unwrap_or_default();

        if wants_structured {
            let data = serde_json::from_str(&text).map_err(|e| {
                error!("failed to parse structured response: {}", e);
                GatewayError::ResponseParseFailure(e.to_string())
            })?;
            return Ok(GenerationOutput::Structured { data });
        }

        Ok(GenerationOutput::Text { text, sources })
    }
}

#[async_trait]
impl GenerationGateway for GeminiGateway {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationOutput, GatewayError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            warn!("generation request rejected: no API credential configured");
            return Err(GatewayError::CredentialMissing);
        };

        let payload = self.build_payload(&request);
        let url = format!("{}?key={}", self.config.request_url(), api_key);
        let wants_structured = request.output_schema.is_some();

        debug!(
            "calling Gemini model {} (grounding: {}, structured: {})",
            self.config.model, request.use_grounding, wants_structured
        );

        for attempt in 1..=self.config.max_attempts {
            match self.attempt(&url, &payload).await {
                Ok(response) => return self.interpret_response(response, wants_structured),
                Err(failure) if failure.is_retryable() => {
                    warn!(
                        "attempt {}/{} failed: {:?}",
                        attempt, self.config.max_attempts, failure
                    );
                }
                Err(failure) => {
                    error!("terminal upstream failure: {:?}", failure);
                    return Err(failure.into_gateway_error());
                }
            }
        }

        error!(
            "giving up after {} attempts against {}",
            self.config.max_attempts, self.config.model
        );
        Err(GatewayError::TransportExhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GENERATE_PATH: &str = "/models/test-model:generateContent";

    fn test_gateway(server: &MockServer) -> GeminiGateway {
        let config = GeminiConfig::new(Some("test-key".to_string()))
            .with_model("test-model")
            .with_api_base(server.uri());
        GeminiGateway::new(config).unwrap()
    }

    fn text_body(text: &str) -> serde_json::Value {
        json!({
            "candidates": [{"content": {"parts": [{"text": text}]}}]
        })
    }

    #[test]
    fn test_retry_classification() {
        assert!(AttemptError::Transport("timeout".to_string()).is_retryable());
        assert!(AttemptError::Upstream { status: 500, body: String::new() }.is_retryable());
        assert!(AttemptError::Upstream { status: 503, body: String::new() }.is_retryable());
        assert!(!AttemptError::Upstream { status: 400, body: String::new() }.is_retryable());
        assert!(!AttemptError::Upstream { status: 429, body: String::new() }.is_retryable());
        assert!(!AttemptError::Decode("bad json".to_string()).is_retryable());
    }

    #[tokio::test]
    async fn test_missing_credential_makes_no_network_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let config = GeminiConfig::new(None)
            .with_model("test-model")
            .with_api_base(server.uri());
        let gateway = GeminiGateway::new(config).unwrap();

        let error = gateway
            .generate(GenerationRequest::new("query", "instruction"))
            .await
            .unwrap_err();

        assert!(matches!(error, GatewayError::CredentialMissing));
        assert_eq!(error.status_code(), 500);
    }

    #[tokio::test]
    async fn test_plain_success_yields_text_and_no_sources() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(query_param("key", "test-key"))
            .and(body_partial_json(json!({
                "contents": [{"parts": [{"text": "query"}]}],
                "systemInstruction": {"parts": [{"text": "instruction"}]}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_body("X")))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = test_gateway(&server);
        let output = gateway
            .generate(GenerationRequest::new("query", "instruction"))
            .await
            .unwrap();

        match output {
            GenerationOutput::Text { text, sources } => {
                assert_eq!(text, "X");
                assert!(sources.is_empty());
            }
            other => panic!("expected text output, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_grounding_request_declares_search_tool() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(body_partial_json(json!({"tools": [{"google_search": {}}]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_body("grounded")))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = test_gateway(&server);
        let output = gateway
            .generate(GenerationRequest::new("query", "instruction").with_grounding())
            .await
            .unwrap();

        assert!(matches!(output, GenerationOutput::Text { .. }));
    }

    #[tokio::test]
    async fn test_structured_success_parses_schema_output() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(body_partial_json(json!({
                "generationConfig": {"responseMimeType": "application/json"}
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(text_body(r#"[{"question": "Q1"}]"#)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let gateway = test_gateway(&server);
        let request = GenerationRequest::new("query", "instruction")
            .with_schema(json!({"type": "ARRAY"}));
        let output = gateway.generate(request).await.unwrap();

        match output {
            GenerationOutput::Structured { data } => {
                assert_eq!(data, json!([{"question": "Q1"}]));
            }
            other => panic!("expected structured output, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unparseable_structured_output_fails_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_body("not json")))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = test_gateway(&server);
        let request = GenerationRequest::new("query", "instruction")
            .with_schema(json!({"type": "ARRAY"}));
        let error = gateway.generate(request).await.unwrap_err();

        assert!(matches!(error, GatewayError::ResponseParseFailure(_)));
        assert_eq!(error.status_code(), 500);
    }

    #[tokio::test]
    async fn test_server_errors_are_retried_until_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_body("eventually")))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = test_gateway(&server);
        let output = gateway
            .generate(GenerationRequest::new("query", "instruction"))
            .await
            .unwrap();

        match output {
            GenerationOutput::Text { text, .. } => assert_eq!(text, "eventually"),
            other => panic!("expected text output, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_exhausted_retries_report_unreachable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&server)
            .await;

        let gateway = test_gateway(&server);
        let error = gateway
            .generate(GenerationRequest::new("query", "instruction"))
            .await
            .unwrap_err();

        assert!(matches!(error, GatewayError::TransportExhausted));
        assert!(error.to_string().contains("could not reach AI"));
        assert_eq!(error.status_code(), 502);
    }

    #[tokio::test]
    async fn test_client_error_fails_fast_with_upstream_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = test_gateway(&server);
        let error = gateway
            .generate(GenerationRequest::new("query", "instruction"))
            .await
            .unwrap_err();

        match &error {
            GatewayError::UpstreamStatus { status, body } => {
                assert_eq!(*status, 400);
                assert_eq!(body, "bad request");
            }
            other => panic!("expected upstream status error, got {:?}", other),
        }
        assert_eq!(error.status_code(), 400);
    }

    #[tokio::test]
    async fn test_blocked_prompt_surfaces_block_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "promptFeedback": {"blockReason": "OTHER"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = test_gateway(&server);
        let error = gateway
            .generate(GenerationRequest::new("query", "instruction"))
            .await
            .unwrap_err();

        assert!(matches!(error, GatewayError::UpstreamBlocked(_)));
        assert!(error.to_string().contains("OTHER"));
        assert_eq!(error.status_code(), 400);
    }

    #[tokio::test]
    async fn test_safety_block_surfaces_as_bad_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"finishReason": "SAFETY"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = test_gateway(&server);
        let error = gateway
            .generate(GenerationRequest::new("query", "instruction"))
            .await
            .unwrap_err();

        assert!(matches!(error, GatewayError::UpstreamSafetyBlock(_)));
        assert!(error.to_string().contains("safety"));
        assert_eq!(error.status_code(), 400);
    }

    #[tokio::test]
    async fn test_candidate_without_text_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": []}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = test_gateway(&server);
        let error = gateway
            .generate(GenerationRequest::new("query", "instruction"))
            .await
            .unwrap_err();

        assert!(matches!(error, GatewayError::MalformedUpstreamResponse(_)));
        assert_eq!(error.status_code(), 500);
    }

    #[tokio::test]
    async fn test_sources_keep_order_and_skip_entries_without_web() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {"parts": [{"text": "cited answer"}]},
                    "groundingMetadata": {
                        "groundingAttributions": [
                            {"web": {"uri": "https://first.example", "title": "First"}},
                            {"retrievedContext": {"uri": "not-a-web-source"}},
                            {"web": {"uri": "https://second.example", "title": "Second"}}
                        ]
                    }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = test_gateway(&server);
        let output = gateway
            .generate(GenerationRequest::new("query", "instruction").with_grounding())
            .await
            .unwrap();

        match output {
            GenerationOutput::Text { sources, .. } => {
                assert_eq!(sources.len(), 2);
                assert_eq!(sources[0].uri, "https://first.example");
                assert_eq!(sources[1].title, "Second");
            }
            other => panic!("expected text output, got {:?}", other),
        }
    }
}
