//! Meal generation backend
//!
//! The backend is an opaque remote service exposing three contracts:
//! meal suggestions, full recipes and follow-up questions. Every call is a
//! single round trip; failures are returned, never retried here.

pub mod error;
mod http;
mod types;

pub use error::BackendError;
pub use http::HttpBackend;
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for meal backends
#[async_trait]
pub trait MealBackend: Send + Sync {
    /// Suggestion contract: ingredients in, meal ideas out
    async fn suggest(&self, request: &SuggestionRequest) -> Result<SuggestionResponse, BackendError>;

    /// Recipe contract: one meal expanded into a recipe, continuing `conversation_history`
    async fn recipe(&self, request: &RecipeRequest) -> Result<RecipeResponse, BackendError>;

    /// Follow-up contract: a question about the current recipe
    async fn follow_up(&self, request: &FollowUpRequest) -> Result<FollowUpResponse, BackendError>;
}

#[async_trait]
impl<T: MealBackend + ?Sized> MealBackend for Arc<T> {
    async fn suggest(&self, request: &SuggestionRequest) -> Result<SuggestionResponse, BackendError> {
        (**self).suggest(request).await
    }

    async fn recipe(&self, request: &RecipeRequest) -> Result<RecipeResponse, BackendError> {
        (**self).recipe(request).await
    }

    async fn follow_up(&self, request: &FollowUpRequest) -> Result<FollowUpResponse, BackendError> {
        (**self).follow_up(request).await
    }
}

/// Logging wrapper for meal backends
pub struct LoggingBackend<B> {
    inner: B,
}

impl<B: MealBackend> LoggingBackend<B> {
    pub fn new(inner: B) -> Self {
        Self { inner }
    }
}

fn log_outcome<T>(
    contract: &'static str,
    start: std::time::Instant,
    result: &Result<T, BackendError>,
    detail: impl FnOnce(&T) -> usize,
) {
    let duration = start.elapsed();
    match result {
        Ok(response) => {
            tracing::info!(
                contract,
                duration_ms = %duration.as_millis(),
                items = detail(response),
                "Backend request completed"
            );
        }
        Err(e) => {
            tracing::error!(
                contract,
                duration_ms = %duration.as_millis(),
                kind = e.kind.as_str(),
                error = %e.message,
                "Backend request failed"
            );
        }
    }
}

#[async_trait]
impl<B: MealBackend> MealBackend for LoggingBackend<B> {
    async fn suggest(&self, request: &SuggestionRequest) -> Result<SuggestionResponse, BackendError> {
        let start = std::time::Instant::now();
        let result = self.inner.suggest(request).await;
        log_outcome("suggest", start, &result, |r| r.meals.len());
        result
    }

    async fn recipe(&self, request: &RecipeRequest) -> Result<RecipeResponse, BackendError> {
        let start = std::time::Instant::now();
        let result = self.inner.recipe(request).await;
        log_outcome("recipe", start, &result, |r| r.conversation_history.len());
        result
    }

    async fn follow_up(&self, request: &FollowUpRequest) -> Result<FollowUpResponse, BackendError> {
        let start = std::time::Instant::now();
        let result = self.inner.follow_up(request).await;
        log_outcome("follow_up", start, &result, |r| r.conversation_history.len());
        result
    }
}
