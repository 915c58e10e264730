//! Mock backend for testing
//!
//! Lets the session runtime be exercised end to end without network I/O.

use crate::backend::*;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

// ============================================================================
// Mock Backend
// ============================================================================

/// Mock backend that returns queued responses and records every request
#[derive(Default)]
pub struct MockBackend {
    suggestions: Mutex<VecDeque<Result<SuggestionResponse, BackendError>>>,
    recipes: Mutex<VecDeque<Result<RecipeResponse, BackendError>>>,
    follow_ups: Mutex<VecDeque<Result<FollowUpResponse, BackendError>>>,
    pub suggestion_requests: Mutex<Vec<SuggestionRequest>>,
    pub recipe_requests: Mutex<Vec<RecipeRequest>>,
    pub follow_up_requests: Mutex<Vec<FollowUpRequest>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_suggestions(&self, meals: Vec<Meal>) {
        self.suggestions
            .lock()
            .unwrap()
            .push_back(Ok(SuggestionResponse { meals }));
    }

    pub fn queue_suggestions_error(&self, error: BackendError) {
        self.suggestions.lock().unwrap().push_back(Err(error));
    }

    pub fn queue_recipe(&self, recipe: &str, history: Vec<ConversationTurn>) {
        self.recipes.lock().unwrap().push_back(Ok(RecipeResponse {
            recipe: recipe.to_string(),
            conversation_history: history,
        }));
    }

    pub fn queue_recipe_error(&self, error: BackendError) {
        self.recipes.lock().unwrap().push_back(Err(error));
    }

    pub fn queue_follow_up(&self, response: &str, history: Vec<ConversationTurn>) {
        self.follow_ups.lock().unwrap().push_back(Ok(FollowUpResponse {
            response: response.to_string(),
            conversation_history: history,
        }));
    }

    pub fn queue_follow_up_error(&self, error: BackendError) {
        self.follow_ups.lock().unwrap().push_back(Err(error));
    }

    pub fn request_count(&self) -> usize {
        self.suggestion_requests.lock().unwrap().len()
            + self.recipe_requests.lock().unwrap().len()
            + self.follow_up_requests.lock().unwrap().len()
    }
}

fn next<T>(queue: &Mutex<VecDeque<Result<T, BackendError>>>) -> Result<T, BackendError> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(BackendError::network("No mock response queued")))
}

#[async_trait]
impl MealBackend for MockBackend {
    async fn suggest(&self, request: &SuggestionRequest) -> Result<SuggestionResponse, BackendError> {
        self.suggestion_requests.lock().unwrap().push(request.clone());
        next(&self.suggestions)
    }

    async fn recipe(&self, request: &RecipeRequest) -> Result<RecipeResponse, BackendError> {
        self.recipe_requests.lock().unwrap().push(request.clone());
        next(&self.recipes)
    }

    async fn follow_up(&self, request: &FollowUpRequest) -> Result<FollowUpResponse, BackendError> {
        self.follow_up_requests.lock().unwrap().push(request.clone());
        next(&self.follow_ups)
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn meal(name: &str) -> Meal {
    Meal {
        name: name.to_string(),
        description: format!("A quick {name}"),
        prep_time: "10 min".to_string(),
        cook_time: "15 min".to_string(),
        servings: Servings::Count(2),
        ingredients_used: vec!["broccoli".to_string(), "rice".to_string()],
        additional_needed: vec!["soy sauce".to_string()],
    }
}

pub fn turn(role: &str, text: &str) -> ConversationTurn {
    ConversationTurn::new(serde_json::json!({ "role": role, "parts": [{ "text": text }] }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{ConversationSession, SessionEvent};
    use crate::backend::error::BackendErrorKind;
    use crate::state_machine::transition::{
        FOLLOW_UP_FAILED_MESSAGE, RECIPE_FAILED_MESSAGE, SUGGESTIONS_FAILED_MESSAGE,
    };
    use crate::state_machine::{FollowUpPrompt, Phase, SessionContext, SessionState, TransitionError};
    use std::sync::Arc;
    use tokio::sync::broadcast;

    fn session_with(backend: &Arc<MockBackend>) -> ConversationSession<Arc<MockBackend>> {
        ConversationSession::with_context(SessionContext::new("test-session"), Arc::clone(backend))
    }

    fn drain(rx: &mut broadcast::Receiver<SessionEvent>) -> Vec<SessionEvent> {
        let mut events = vec![];
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn phases(events: &[SessionEvent]) -> Vec<Phase> {
        events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::PhaseChanged { phase } => Some(*phase),
                SessionEvent::Notice { .. } => None,
            })
            .collect()
    }

    /// Session sitting in `RecipeShown` for "Veggie Stir Fry"
    async fn session_with_recipe(
        backend: &Arc<MockBackend>,
        history: Vec<ConversationTurn>,
    ) -> ConversationSession<Arc<MockBackend>> {
        let mut session = session_with(backend);
        session.add_ingredient("Broccoli");
        session.add_ingredient("rice");
        backend.queue_suggestions(vec![meal("Veggie Stir Fry"), meal("Fried Rice")]);
        session.request_suggestions().await.unwrap();
        backend.queue_recipe("Chop. Stir. Fry.", history);
        session.select_meal("Veggie Stir Fry").await.unwrap();
        session
    }

    #[tokio::test]
    async fn test_mock_backend_defaults_to_error() {
        let backend = MockBackend::new();
        let err = backend
            .suggest(&SuggestionRequest { ingredients: vec![] })
            .await
            .unwrap_err();
        assert_eq!(err.kind, BackendErrorKind::Network);
        assert_eq!(backend.request_count(), 1);
    }

    #[tokio::test]
    async fn test_suggestions_flow() {
        let backend = Arc::new(MockBackend::new());
        let mut session = session_with(&backend);
        let mut rx = session.subscribe();

        session.add_ingredient("Tomato");
        session.add_ingredient("tomato ");
        session.add_ingredient(" Basil");
        backend.queue_suggestions(vec![meal("Bruschetta")]);

        session.request_suggestions().await.unwrap();

        assert_eq!(session.phase(), Phase::Suggested);
        assert_eq!(session.state().meals().unwrap()[0].name, "Bruschetta");
        assert!(session.state().history().is_empty());
        assert_eq!(
            backend.suggestion_requests.lock().unwrap()[0].ingredients,
            vec!["tomato".to_string(), "basil".to_string()]
        );
        assert_eq!(
            phases(&drain(&mut rx)),
            vec![Phase::Suggesting, Phase::Suggested]
        );
    }

    #[tokio::test]
    async fn test_empty_ingredients_is_guard_violation() {
        let backend = Arc::new(MockBackend::new());
        let mut session = session_with(&backend);
        let mut rx = session.subscribe();

        let result = session.request_suggestions().await;

        assert_eq!(result.unwrap_err(), TransitionError::NoIngredients);
        assert_eq!(session.phase(), Phase::Collecting);
        assert_eq!(backend.request_count(), 0);
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn test_suggestion_failure_then_reset() {
        let backend = Arc::new(MockBackend::new());
        let mut session = session_with(&backend);
        session.add_ingredient("egg");
        backend.queue_suggestions_error(BackendError::server_error("HTTP 503"));

        session.request_suggestions().await.unwrap();

        assert_eq!(session.phase(), Phase::Error);
        assert_eq!(session.state().error_message(), Some(SUGGESTIONS_FAILED_MESSAGE));

        session.reset().unwrap();
        session.reset().unwrap();
        assert_eq!(session.state(), &SessionState::Collecting);
        assert_eq!(session.ingredients().list(), ["egg"]);
    }

    #[tokio::test]
    async fn test_select_meal_shows_recipe_with_backend_history() {
        let backend = Arc::new(MockBackend::new());
        let mut session = session_with(&backend);
        session.add_ingredient("broccoli");
        backend.queue_suggestions(vec![meal("Veggie Stir Fry"), meal("Fried Rice")]);
        session.request_suggestions().await.unwrap();
        let mut rx = session.subscribe();

        let returned = vec![
            turn("user", "Give me the recipe for Veggie Stir Fry"),
            turn("model", "Chop. Stir. Fry."),
        ];
        backend.queue_recipe("Chop. Stir. Fry.", returned.clone());
        session.select_meal("Veggie Stir Fry").await.unwrap();

        assert_eq!(session.phase(), Phase::RecipeShown);
        assert_eq!(session.state().active_meal_name(), Some("Veggie Stir Fry"));
        assert_eq!(session.state().recipe_text(), Some("Chop. Stir. Fry."));
        assert_eq!(session.state().history(), returned.as_slice());
        assert_eq!(
            phases(&drain(&mut rx)),
            vec![Phase::RecipeLoading, Phase::RecipeShown]
        );

        let request = &backend.recipe_requests.lock().unwrap()[0];
        assert_eq!(request.meal_name, "Veggie Stir Fry");
        assert_eq!(request.ingredients, vec!["broccoli".to_string()]);
        assert!(request.conversation_history.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_meal_rejected_without_request() {
        let backend = Arc::new(MockBackend::new());
        let mut session = session_with(&backend);
        session.add_ingredient("egg");
        backend.queue_suggestions(vec![meal("Omelette")]);
        session.request_suggestions().await.unwrap();

        let result = session.select_meal("Pancakes").await;

        assert_eq!(
            result.unwrap_err(),
            TransitionError::UnknownMeal("Pancakes".to_string())
        );
        assert_eq!(session.phase(), Phase::Suggested);
        assert!(backend.recipe_requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recipe_failure_goes_to_error() {
        let backend = Arc::new(MockBackend::new());
        let mut session = session_with(&backend);
        session.add_ingredient("egg");
        backend.queue_suggestions(vec![meal("Omelette")]);
        session.request_suggestions().await.unwrap();
        backend.queue_recipe_error(BackendError::timeout("Request timeout"));

        session.select_meal("Omelette").await.unwrap();

        assert_eq!(session.phase(), Phase::Error);
        assert_eq!(session.state().error_message(), Some(RECIPE_FAILED_MESSAGE));
        assert!(session.state().history().is_empty());
    }

    #[tokio::test]
    async fn test_follow_up_replaces_recipe_and_history() {
        let backend = Arc::new(MockBackend::new());
        let first = vec![turn("user", "recipe"), turn("model", "Chop. Stir. Fry.")];
        let mut session = session_with_recipe(&backend, first.clone()).await;

        let mut second = first.clone();
        second.push(turn("user", FollowUpPrompt::Simpler.question()));
        second.push(turn("model", "Use frozen vegetables."));
        backend.queue_follow_up("Use frozen vegetables.", second.clone());

        session.ask_prompt(FollowUpPrompt::Simpler).await.unwrap();

        assert_eq!(session.phase(), Phase::RecipeShown);
        assert_eq!(session.state().active_meal_name(), Some("Veggie Stir Fry"));
        assert_eq!(session.state().recipe_text(), Some("Use frozen vegetables."));
        assert_eq!(session.state().history(), second.as_slice());

        let request = &backend.follow_up_requests.lock().unwrap()[0];
        assert_eq!(request.question, "Can you make this recipe simpler?");
        assert_eq!(request.conversation_history, first);
    }

    #[tokio::test]
    async fn test_follow_up_failure_preserves_recipe() {
        let backend = Arc::new(MockBackend::new());
        let history = vec![turn("user", "recipe"), turn("model", "Chop. Stir. Fry.")];
        let mut session = session_with_recipe(&backend, history).await;
        let before = session.state().clone();
        let mut rx = session.subscribe();

        backend.queue_follow_up_error(BackendError::server_error("HTTP 500"));
        session.ask_prompt(FollowUpPrompt::Tips).await.unwrap();

        assert_eq!(session.state(), &before);
        assert_eq!(
            drain(&mut rx),
            vec![
                SessionEvent::PhaseChanged {
                    phase: Phase::FollowUpLoading
                },
                SessionEvent::PhaseChanged {
                    phase: Phase::RecipeShown
                },
                SessionEvent::Notice {
                    message: FOLLOW_UP_FAILED_MESSAGE.to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_history_round_trips_across_turns() {
        let backend = Arc::new(MockBackend::new());
        let mut received = vec![turn("user", "recipe"), turn("model", "r")];
        let mut session = session_with_recipe(&backend, received.clone()).await;

        let mut sent_expectations = vec![];
        for (i, prompt) in FollowUpPrompt::ALL.into_iter().enumerate() {
            sent_expectations.push(received.clone());
            let mut next = received.clone();
            next.push(turn("user", prompt.question()));
            next.push(turn("model", &format!("answer {i}")));
            backend.queue_follow_up(&format!("answer {i}"), next.clone());
            session.ask_prompt(prompt).await.unwrap();
            received = next;
        }

        let sent: Vec<_> = backend
            .follow_up_requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.conversation_history.clone())
            .collect();
        assert_eq!(sent, sent_expectations);
        assert_eq!(session.state().history(), received.as_slice());
    }

    #[tokio::test]
    async fn test_new_suggestions_start_new_conversation() {
        let backend = Arc::new(MockBackend::new());
        let mut session =
            session_with_recipe(&backend, vec![turn("user", "recipe"), turn("model", "r")]).await;

        session.reset().unwrap();
        assert!(session.state().history().is_empty());

        backend.queue_suggestions(vec![meal("Fried Rice")]);
        session.request_suggestions().await.unwrap();
        backend.queue_recipe("Fry the rice.", vec![turn("model", "Fry the rice.")]);
        session.select_meal("Fried Rice").await.unwrap();

        let requests = backend.recipe_requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests[1].conversation_history.is_empty());
    }

    #[tokio::test]
    async fn test_follow_up_before_recipe_rejected() {
        let backend = Arc::new(MockBackend::new());
        let mut session = session_with(&backend);

        let result = session.ask_follow_up("Any tips?").await;

        assert_eq!(result.unwrap_err(), TransitionError::NoRecipe);
        assert_eq!(session.phase(), Phase::Collecting);
        assert_eq!(backend.request_count(), 0);
    }

    #[tokio::test]
    async fn test_suggest_again_requires_reset() {
        let backend = Arc::new(MockBackend::new());
        let mut session = session_with(&backend);
        session.add_ingredient("egg");
        backend.queue_suggestions(vec![meal("Omelette")]);
        session.request_suggestions().await.unwrap();

        let result = session.request_suggestions().await;

        assert!(matches!(result, Err(TransitionError::InvalidTransition(_))));
        assert_eq!(backend.suggestion_requests.lock().unwrap().len(), 1);
    }
}
