//! HTTP implementation of the meal backend

use super::types::*;
use super::{BackendError, MealBackend};
use crate::config::Config;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

const SUGGESTIONS_PATH: &str = "get-suggestions";
const RECIPE_PATH: &str = "get-recipe";
const FOLLOW_UP_PATH: &str = "ask-followup";

/// Meal backend reached over JSON/HTTP
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &Config) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| BackendError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn post<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, BackendError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = self.endpoint(path);
        tracing::debug!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| BackendError::from_transport(&e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| BackendError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(BackendError::from_status(status, &text));
        }

        serde_json::from_str(&text)
            .map_err(|e| BackendError::malformed(format!("Failed to parse response: {e} - body: {text}")))
    }
}

#[async_trait]
impl MealBackend for HttpBackend {
    async fn suggest(&self, request: &SuggestionRequest) -> Result<SuggestionResponse, BackendError> {
        self.post(SUGGESTIONS_PATH, request).await
    }

    async fn recipe(&self, request: &RecipeRequest) -> Result<RecipeResponse, BackendError> {
        self.post(RECIPE_PATH, request).await
    }

    async fn follow_up(&self, request: &FollowUpRequest) -> Result<FollowUpResponse, BackendError> {
        self.post(FOLLOW_UP_PATH, request).await
    }
}
