//! Translation through an OpenAI-compatible chat completions endpoint.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::error::TranslateError;

const PROVIDER: &str = "OpenAI";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const MAX_TOKENS: u32 = 4000;
const TEMPERATURE: f32 = 0.1;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

pub struct OpenAiProvider {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl OpenAiProvider {
    pub fn new(endpoint: &str, api_key: &str, model: &str) -> Result<Self, TranslateError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| TranslateError::Http {
                url: endpoint.to_string(),
                source,
            })?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.endpoint.trim_end_matches('/')
        )
    }

    pub async fn complete(&self, system: &str, user: &str) -> Result<String, TranslateError> {
        let url = self.url();
        let body = build_request(&self.model, system, user);

        debug!(%url, model = %self.model, "sending chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|source| TranslateError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|source| TranslateError::Http {
            url: url.clone(),
            source,
        })?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &text));
        }

        parse_completion(&text)
    }
}

fn build_request<'a>(model: &'a str, system: &'a str, user: &'a str) -> ChatCompletionRequest<'a> {
    ChatCompletionRequest {
        model,
        messages: vec![
            Message {
                role: "system",
                content: system,
            },
            Message {
                role: "user",
                content: user,
            },
        ],
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
    }
}

fn api_error(status: u16, body: &str) -> TranslateError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| format!("request failed with status {status}"));
    TranslateError::Api {
        provider: PROVIDER,
        status,
        message,
    }
}

fn parse_completion(body: &str) -> Result<String, TranslateError> {
    let response: ChatCompletionResponse =
        serde_json::from_str(body).map_err(|e| TranslateError::Api {
            provider: PROVIDER,
            status: 200,
            message: format!("malformed response: {e}"),
        })?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.is_empty())
        .ok_or(TranslateError::EmptyResponse(PROVIDER))
}
