use async_trait::async_trait;
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::services::{CompletionRequest, LanguageModelService};

pub struct OpenAiClient {
    http: Client,
    api_key: String,
    api_base: String,
    model: String,
    temperature: f32,
}

impl OpenAiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: Client::new(),
            api_key: config.api_key.clone(),
            api_base: config.api_base.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }

    fn completions_endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl LanguageModelService for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> AppResult<String> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: self.temperature,
        };

        debug!(model = %self.model, prompt_len = request.user.len(), "requesting chat completion");

        let response = self
            .http
            .post(self.completions_endpoint())
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|err| AppError::LanguageModel(format!("failed to call OpenAI: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::LanguageModel(format!(
                "OpenAI responded with {status}: {body}"
            )));
        }

        let payload: ChatCompletionResponse = response.json().await.map_err(|err| {
            AppError::LanguageModel(format!("failed to parse OpenAI response: {err}"))
        })?;

        payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| AppError::LanguageModel("No content received from OpenAI".to_string()))
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::{MODEL, TEMPERATURE};

    fn client_for(server: &MockServer) -> OpenAiClient {
        OpenAiClient::new(&AppConfig {
            api_key: "sk-test".to_string(),
            api_base: format!("{}/v1", server.uri()),
            model: MODEL.to_string(),
            temperature: TEMPERATURE,
            workspace_root: PathBuf::from("."),
        })
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            system: "You are a technical writer.".to_string(),
            user: "Summarize these changes.".to_string(),
        }
    }

    fn completion(content: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        }))
    }

    #[tokio::test]
    async fn returns_first_choice_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4-turbo-preview",
                "messages": [
                    { "role": "system", "content": "You are a technical writer." },
                    { "role": "user", "content": "Summarize these changes." }
                ]
            })))
            .respond_with(completion(json!("## Changelog\n- Added things")))
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server).complete(&request()).await.unwrap();
        assert_eq!(text, "## Changelog\n- Added things");
    }

    #[tokio::test]
    async fn empty_content_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(completion(json!("")))
            .mount(&server)
            .await;

        let err = client_for(&server).complete(&request()).await.unwrap_err();
        match err {
            AppError::LanguageModel(message) => assert!(message.contains("No content")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn null_content_and_missing_choices_are_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(completion(serde_json::Value::Null))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.complete(&request()).await.is_err());
        assert!(client.complete(&request()).await.is_err());
    }

    #[tokio::test]
    async fn error_status_includes_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let err = client_for(&server).complete(&request()).await.unwrap_err();
        match err {
            AppError::LanguageModel(message) => {
                assert!(message.contains("401"), "{message}");
                assert!(message.contains("invalid api key"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
