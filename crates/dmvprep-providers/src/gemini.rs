//! Gemini API generation client.
//!
//! One structured-output call per quiz: the prompt and a declared response
//! schema go out, a JSON quiz comes back. No retries, no caching; every
//! failure aborts the attempt and surfaces as a single typed error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use dmvprep_core::error::GenerateError;
use dmvprep_core::model::{QuizConfig, QuizData};
use dmvprep_core::prompt::build_prompt;
use dmvprep_core::traits::QuizGenerator;

use crate::credentials::{clean_key, resolve_api_key};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const MAX_OUTPUT_TOKENS: u32 = 12_000;
/// Requests at or above this count trade thinking depth for latency.
const LARGE_REQUEST_COUNT: u32 = 50;
const SYSTEM_INSTRUCTION: &str = "You are a California DMV examiner. Ensure strict accuracy to \
    the 2025 Handbook. For sign questions, YOU MUST use the 'STABLE ASSET URLS' provided in the \
    handbook context whenever possible. Only use real Wikimedia Commons links. Do not \
    hallucinate URLs.";

/// Gemini-backed quiz generator.
pub struct GeminiGenerator {
    base_url: String,
    model: String,
    api_key_override: Option<String>,
    thinking_budget: Option<u32>,
    client: reqwest::Client,
}

impl GeminiGenerator {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: DEFAULT_MODEL.to_string(),
            api_key_override: None,
            thinking_budget: None,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Use a fixed key instead of reading the environment.
    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key_override = Some(key.to_string());
        self
    }

    /// Opt in to an explicit thinking budget. Omitted from the request by
    /// default, leaving the model on its own defaults.
    pub fn with_thinking_budget(mut self, budget: u32) -> Self {
        self.thinking_budget = Some(budget);
        self
    }

    fn resolve_key(&self) -> Result<String, GenerateError> {
        let key = match &self.api_key_override {
            Some(raw) => clean_key(raw),
            None => resolve_api_key(),
        };
        key.ok_or(GenerateError::CredentialsMissing)
    }

    fn effective_thinking_budget(&self, question_count: u32) -> Option<u32> {
        let budget = self.thinking_budget?;
        if question_count >= LARGE_REQUEST_COUNT {
            Some(budget / 2)
        } else {
            Some(budget)
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// The output shape declared to the model; mirrors [`QuizData`].
fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "quizTitle": {"type": "STRING"},
            "totalQuestions": {"type": "INTEGER"},
            "questions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "questionId": {"type": "STRING"},
                        "difficulty": {"type": "STRING", "enum": ["easy", "medium", "hard"]},
                        "question": {"type": "STRING"},
                        "options": {"type": "ARRAY", "items": {"type": "STRING"}},
                        "correctAnswer": {"type": "STRING"},
                        "questionImageUrl": {"type": "STRING", "nullable": true},
                        "optionImageUrls": {
                            "type": "ARRAY",
                            "items": {"type": "STRING"},
                            "nullable": true
                        }
                    },
                    "required": [
                        "questionId",
                        "difficulty",
                        "question",
                        "options",
                        "correctAnswer"
                    ]
                }
            }
        },
        "required": ["quizTitle", "totalQuestions", "questions"]
    })
}

/// Auth failures arrive with inconsistent wording across deployments.
fn is_auth_error(message: &str) -> bool {
    [
        "401",
        "UNAUTHENTICATED",
        "CREDENTIALS_MISSING",
        "API keys are not supported",
    ]
    .iter()
    .any(|marker| message.contains(marker))
}

#[async_trait]
impl QuizGenerator for GeminiGenerator {
    fn name(&self) -> &str {
        "gemini"
    }

    #[instrument(skip_all, fields(model = %self.model, count = config.question_count))]
    async fn generate(
        &self,
        config: &QuizConfig,
        seen_hashes: &[String],
    ) -> Result<QuizData, GenerateError> {
        let api_key = self.resolve_key()?;
        let prompt = build_prompt(config, seen_hashes);

        let body = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: Content {
                parts: vec![Part {
                    text: SYSTEM_INSTRUCTION.to_string(),
                }],
            },
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
                max_output_tokens: MAX_OUTPUT_TOKENS,
                thinking_config: self
                    .effective_thinking_budget(config.question_count)
                    .map(|thinking_budget| ThinkingConfig { thinking_budget }),
            },
        };

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerateError::RemoteService(format!("network error: {e}")))?;

        let status = response.status().as_u16();
        if status == 401 {
            return Err(GenerateError::AuthenticationFailed);
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            if is_auth_error(&message) {
                return Err(GenerateError::AuthenticationFailed);
            }
            return Err(GenerateError::RemoteService(format!(
                "API error (HTTP {status}): {message}"
            )));
        }

        let api_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::InvalidResponseShape(e.to_string()))?;

        let text: String = api_response
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| {
                c.parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();
        if text.is_empty() {
            return Err(GenerateError::EmptyResponse);
        }

        let quiz: QuizData =
            serde_json::from_str(&text).map_err(|e| GenerateError::InvalidResponseShape(e.to_string()))?;
        for warning in quiz.lint() {
            tracing::warn!("generator output: {warning}");
        }
        Ok(quiz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmvprep_core::model::{Difficulty, Focus, Style};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config() -> QuizConfig {
        QuizConfig {
            difficulty: Difficulty::Mix,
            style: Style::Mixed,
            focus: Focus::Mix,
            question_count: 2,
        }
    }

    fn quiz_json() -> String {
        serde_json::json!({
            "quizTitle": "CA DMV Practice Test",
            "totalQuestions": 1,
            "questions": [{
                "questionId": "u_1",
                "difficulty": "medium",
                "question": "What does this sign mean?",
                "options": ["Stop", "Yield"],
                "correctAnswer": "Yield"
            }]
        })
        .to_string()
    }

    fn generator(server: &MockServer) -> GeminiGenerator {
        GeminiGenerator::new(Some(server.uri())).with_api_key("test-key")
    }

    #[tokio::test]
    async fn successful_generation() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": quiz_json()}]}}]
        });

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-3-flash-preview:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let quiz = generator(&server).generate(&config(), &[]).await.unwrap();
        assert_eq!(quiz.quiz_title, "CA DMV Practice Test");
        assert_eq!(quiz.questions.len(), 1);
        assert_eq!(quiz.questions[0].correct_answer, "Yield");
    }

    #[tokio::test]
    async fn missing_credential_fails_before_any_request() {
        let server = MockServer::start().await;
        let generator = GeminiGenerator::new(Some(server.uri())).with_api_key("undefined");

        let err = generator.generate(&config(), &[]).await.unwrap_err();
        assert!(matches!(err, GenerateError::CredentialsMissing));
        assert_eq!(server.received_requests().await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn http_401_is_an_authentication_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&server)
            .await;

        let err = generator(&server).generate(&config(), &[]).await.unwrap_err();
        assert!(matches!(err, GenerateError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn auth_marker_in_error_body_is_an_authentication_failure() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {
                "code": 400,
                "message": "API keys are not supported by this API.",
                "status": "INVALID_ARGUMENT"
            }
        });

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(&error_body))
            .mount(&server)
            .await;

        let err = generator(&server).generate(&config(), &[]).await.unwrap_err();
        assert!(matches!(err, GenerateError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn other_api_errors_pass_through_with_their_message() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE"}
        });

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_json(&error_body))
            .mount(&server)
            .await;

        let err = generator(&server).generate(&config(), &[]).await.unwrap_err();
        match err {
            GenerateError::RemoteService(msg) => {
                assert!(msg.contains("HTTP 503"));
                assert!(msg.contains("The model is overloaded."));
            }
            other => panic!("expected RemoteService, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn no_candidates_is_an_empty_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})),
            )
            .mount(&server)
            .await;

        let err = generator(&server).generate(&config(), &[]).await.unwrap_err();
        assert!(matches!(err, GenerateError::EmptyResponse));
    }

    #[tokio::test]
    async fn non_quiz_text_is_an_invalid_shape() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "I cannot produce JSON today."}]}}]
        });

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let err = generator(&server).generate(&config(), &[]).await.unwrap_err();
        assert!(matches!(err, GenerateError::InvalidResponseShape(_)));
    }

    #[tokio::test]
    async fn request_carries_prompt_schema_and_avoid_list() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": quiz_json()}]}}]
        });

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let seen = vec!["2p".to_string(), "-1h".to_string()];
        generator(&server).generate(&config(), &seen).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();

        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("these hashes: [2p, -1h]"));
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(
            body["generationConfig"]["responseSchema"]["properties"]["questions"]["items"]
                ["properties"]["difficulty"]["enum"],
            serde_json::json!(["easy", "medium", "hard"])
        );
        assert!(body["generationConfig"].get("thinkingConfig").is_none());
        assert!(body["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("California DMV examiner"));
    }

    #[tokio::test]
    async fn thinking_budget_is_halved_for_large_requests() {
        let generator = GeminiGenerator::new(None).with_thinking_budget(4096);
        assert_eq!(generator.effective_thinking_budget(10), Some(4096));
        assert_eq!(generator.effective_thinking_budget(75), Some(2048));

        let bare = GeminiGenerator::new(None);
        assert_eq!(bare.effective_thinking_budget(75), None);
    }
}
