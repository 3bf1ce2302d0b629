use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::OnboardConfig;
use crate::errors::{OnboardError, OnboardResult};
use crate::greeting::{Greeting, GreetingSource};
use crate::session::ChatTransport;
use crate::types::{
    AssistantReply, ChatRequest, ChatResponse, GreetingRequest, GreetingResponse, Message,
};

/// HTTP client for the onboarding assistant backend
#[derive(Debug, Clone)]
pub struct OnboardClient {
    client: Client,
    base_url: String,
}

impl OnboardClient {
    /// Create a new client against the configured base URL
    pub fn new(config: &OnboardConfig) -> Self {
        Self::with_base_url(config.api_base_url())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/api/{}", self.base_url, endpoint)
    }

    /// Sends the full conversation log and returns the assistant's reply
    #[instrument(skip(self, messages), fields(count = messages.len()))]
    pub async fn send_chat(&self, messages: &[Message]) -> OnboardResult<AssistantReply> {
        let url = self.api_url("chat");

        let response = self
            .client
            .post(&url)
            .json(&ChatRequest { messages })
            .send()
            .await
            .map_err(|e| OnboardError::RequestError(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.map_err(|e| {
                OnboardError::ResponseError(format!("Failed to read error response: {}", e))
            })?;

            return Err(OnboardError::HttpError {
                status_code: status.as_u16(),
                message: format!("Chat request failed: {}", error_body),
            });
        }

        let body = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| OnboardError::ParsingError(format!("Failed to parse response: {}", e)))?;

        if !body.success {
            return Err(OnboardError::ApiError(
                body.error
                    .unwrap_or_else(|| "Failed to send message".to_string()),
            ));
        }

        body.response.ok_or_else(|| {
            OnboardError::ResponseError("No response payload in successful reply".to_string())
        })
    }

    /// Fetches the proactive greeting for an employee
    #[instrument(skip(self))]
    pub async fn greeting(&self, employee_id: &str) -> OnboardResult<Greeting> {
        let url = self.api_url("greeting");

        let response = self
            .client
            .post(&url)
            .json(&GreetingRequest { employee_id })
            .send()
            .await
            .map_err(|e| OnboardError::RequestError(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.map_err(|e| {
                OnboardError::ResponseError(format!("Failed to read error response: {}", e))
            })?;

            return Err(OnboardError::HttpError {
                status_code: status.as_u16(),
                message: format!("Greeting request failed: {}", error_body),
            });
        }

        let body = response
            .json::<GreetingResponse>()
            .await
            .map_err(|e| OnboardError::ParsingError(format!("Failed to parse response: {}", e)))?;

        if !body.success {
            return Err(OnboardError::ApiError(
                body.error
                    .unwrap_or_else(|| "Failed to fetch greeting".to_string()),
            ));
        }

        let text = body.greeting.ok_or_else(|| {
            OnboardError::ResponseError("No greeting text in successful reply".to_string())
        })?;

        Ok(Greeting {
            text,
            urgent_tasks_count: body.urgent_tasks_count,
        })
    }

    /// Probes `GET {base}/api/health`. Used at startup to warn early when
    /// the backend is unreachable; never fatal.
    pub async fn check_health(&self) -> bool {
        match self.client.get(self.api_url("health")).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(error = %e, "health probe failed");
                false
            }
        }
    }
}

#[async_trait]
impl ChatTransport for OnboardClient {
    async fn send(&self, messages: &[Message]) -> OnboardResult<AssistantReply> {
        self.send_chat(messages).await
    }
}

#[async_trait]
impl GreetingSource for OnboardClient {
    async fn fetch_greeting(&self, employee_id: &str) -> OnboardResult<Greeting> {
        self.greeting(employee_id).await
    }
}
