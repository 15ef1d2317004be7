//! HTTP Wizard Client - talks to a remote wizard backend over JSON.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpWizardConfig::new("https://wizard.example.com")
//!     .with_api_key("secret")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let client = HttpWizardClient::new(config)?;
//! let wizard = WizardController::with_services(Arc::new(client));
//! ```
//!
//! # Status mapping
//!
//! - 408, 429, 5xx: `ServiceError::Unavailable`
//! - any other non-2xx: `ServiceError::Status` with the service's error message
//! - undecodable body: `ServiceError::InvalidResponse`

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

use crate::adapters::http::wizard::{
    GeneratePromptRequest, GeneratePromptResponse, GenerateQuestionsRequest,
    GenerateQuestionsResponse,
};
use crate::config::ServicesConfig;
use crate::domain::wizard::{CleanedAnswers, Question, Suggestion, SuggestionRequest};
use crate::ports::{AnswerSuggester, PromptGenerator, QuestionGenerator, ServiceError};

/// Configuration for the HTTP wizard client.
#[derive(Debug, Clone)]
pub struct HttpWizardConfig {
    /// Bearer token, if the backend wants one.
    api_key: Option<Secret<String>>,
    /// Base URL the endpoint paths are joined onto.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl HttpWizardConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_key: None,
            base_url: base_url.into(),
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&ServicesConfig> for HttpWizardConfig {
    fn from(config: &ServicesConfig) -> Self {
        Self {
            api_key: config
                .api_key
                .as_ref()
                .filter(|k| !k.expose_secret().is_empty())
                .cloned(),
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
        }
    }
}

/// Wizard services reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpWizardClient {
    config: HttpWizardConfig,
    client: Client,
}

impl HttpWizardClient {
    pub fn new(config: HttpWizardConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ServiceError::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ServiceError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path);
        tracing::debug!(%url, "Calling wizard service");

        let mut request = self.client.post(&url).json(body);
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key.expose_secret());
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_for_status(status.as_u16(), &body));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| ServiceError::invalid_response(e.to_string()))
    }

    fn transport_error(&self, err: reqwest::Error) -> ServiceError {
        if err.is_timeout() {
            ServiceError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else {
            ServiceError::network(err.to_string())
        }
    }
}

/// Maps a non-2xx response onto a `ServiceError`.
pub(crate) fn error_for_status(status: u16, body: &str) -> ServiceError {
    let message = error_message(body);
    match status {
        408 | 429 | 500..=599 => ServiceError::unavailable(format!("{status}: {message}")),
        _ => ServiceError::status(status, message),
    }
}

/// Pulls the message out of `{"error": ...}` or `{"detail": ...}` bodies.
fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };

    match value.get("error").or_else(|| value.get("detail")) {
        Some(serde_json::Value::String(message)) => message.clone(),
        Some(other) => other.to_string(),
        None => body.to_string(),
    }
}

#[async_trait]
impl QuestionGenerator for HttpWizardClient {
    async fn generate_questions(&self, idea: &str) -> Result<Vec<Question>, ServiceError> {
        let request = GenerateQuestionsRequest {
            description: idea.to_string(),
        };
        let response: GenerateQuestionsResponse =
            self.post_json("generate-questions", &request).await?;
        Ok(response.into_questions())
    }
}

#[async_trait]
impl AnswerSuggester for HttpWizardClient {
    async fn suggest_answer(&self, request: SuggestionRequest) -> Result<Suggestion, ServiceError> {
        let expected = request.question.id.clone();
        let suggestion: Suggestion = self.post_json("suggest-answer", &request).await?;

        if suggestion.id != expected {
            tracing::warn!(
                %expected,
                returned = %suggestion.id,
                "Suggestion answered a different question id"
            );
        }
        Ok(suggestion)
    }
}

#[async_trait]
impl PromptGenerator for HttpWizardClient {
    async fn generate_prompt(
        &self,
        idea: &str,
        answers: &CleanedAnswers,
    ) -> Result<String, ServiceError> {
        let request = GeneratePromptRequest {
            idea: idea.to_string(),
            parameters: answers.clone(),
        };
        let response: GeneratePromptResponse = self.post_json("generate-prompt", &request).await?;
        Ok(response.prompt)
    }
}
