//! Conversation session runtime
//!
//! Owns the ingredient set and the session state, runs the pure state
//! machine, and executes the effects it asks for against a `MealBackend`.
//! Trigger methods take `&mut self`, so at most one backend call is ever in
//! flight per session.

#[cfg(test)]
pub mod testing;

use crate::backend::{FollowUpRequest, MealBackend, RecipeRequest, SuggestionRequest};
use crate::ingredients::IngredientSet;
use crate::state_machine::{
    transition, Effect, Event, FollowUpPrompt, Phase, SessionContext, SessionState,
    TransitionError,
};
use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Notifications for front ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The session moved to a new phase
    PhaseChanged { phase: Phase },
    /// A failure that left the shown content as it was
    Notice { message: String },
}

/// A single user's meal planning conversation
pub struct ConversationSession<B: MealBackend> {
    context: SessionContext,
    state: SessionState,
    ingredients: IngredientSet,
    backend: B,
    events_tx: broadcast::Sender<SessionEvent>,
}

impl<B: MealBackend> ConversationSession<B> {
    pub fn new(backend: B) -> Self {
        Self::with_context(SessionContext::generate(), backend)
    }

    pub fn with_context(context: SessionContext, backend: B) -> Self {
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        tracing::info!(session_id = %context.session_id, "Starting session");
        Self {
            context,
            state: SessionState::default(),
            ingredients: IngredientSet::new(),
            backend,
            events_tx,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events_tx.subscribe()
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn ingredients(&self) -> &IngredientSet {
        &self.ingredients
    }

    pub fn add_ingredient(&mut self, raw: &str) -> bool {
        let added = self.ingredients.add(raw);
        if !added {
            tracing::debug!(session_id = %self.context.session_id, input = raw, "Ingredient ignored");
        }
        added
    }

    pub fn remove_ingredient(&mut self, name: &str) -> bool {
        self.ingredients.remove(name)
    }

    /// Ask the backend for meal ideas from the current ingredients
    pub async fn request_suggestions(&mut self) -> Result<(), TransitionError> {
        let ingredients = self.ingredients.to_vec();
        self.process_event(Event::RequestSuggestions { ingredients })
            .await
    }

    /// Ask for the full recipe of one of the suggested meals
    pub async fn select_meal(&mut self, meal_name: &str) -> Result<(), TransitionError> {
        let ingredients = self.ingredients.to_vec();
        self.process_event(Event::SelectMeal {
            meal_name: meal_name.to_string(),
            ingredients,
        })
        .await
    }

    /// Ask a question about the recipe on screen
    pub async fn ask_follow_up(&mut self, question: &str) -> Result<(), TransitionError> {
        self.process_event(Event::AskFollowUp {
            question: question.to_string(),
        })
        .await
    }

    pub async fn ask_prompt(&mut self, prompt: FollowUpPrompt) -> Result<(), TransitionError> {
        self.ask_follow_up(prompt.question()).await
    }

    /// Drop the shown payload and the conversation history. Ingredients are kept.
    pub fn reset(&mut self) -> Result<(), TransitionError> {
        self.apply(Event::Reset).map(|_| ())
    }

    /// Run an event to completion, feeding backend results back in until
    /// no effects remain.
    async fn process_event(&mut self, event: Event) -> Result<(), TransitionError> {
        let mut events_to_process = vec![event];

        while let Some(current_event) = events_to_process.pop() {
            for effect in self.apply(current_event)? {
                if effect.is_request() {
                    tracing::debug!(session_id = %self.context.session_id, ?effect, "Calling backend");
                }
                if let Some(generated_event) = self.execute_effect(effect).await {
                    events_to_process.push(generated_event);
                }
            }
        }

        Ok(())
    }

    /// Pure transition plus state replacement. A rejected event leaves the
    /// state untouched.
    fn apply(&mut self, event: Event) -> Result<Vec<Effect>, TransitionError> {
        let result = match transition(&self.state, &self.context, event) {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(
                    session_id = %self.context.session_id,
                    phase = %self.state.phase(),
                    error = %e,
                    "Transition rejected"
                );
                return Err(e);
            }
        };

        let old_phase = self.state.phase();
        self.state = result.new_state;
        let new_phase = self.state.phase();

        if old_phase != new_phase {
            tracing::info!(
                session_id = %self.context.session_id,
                from = %old_phase,
                to = %new_phase,
                history_len = self.state.history().len(),
                "Phase changed"
            );
            let _ = self
                .events_tx
                .send(SessionEvent::PhaseChanged { phase: new_phase });
        }

        Ok(result.effects)
    }

    async fn execute_effect(&self, effect: Effect) -> Option<Event> {
        match effect {
            Effect::RequestSuggestions { ingredients } => {
                let request = SuggestionRequest { ingredients };
                Some(match self.backend.suggest(&request).await {
                    Ok(response) => Event::SuggestionsReceived {
                        meals: response.meals,
                    },
                    Err(e) => {
                        tracing::warn!(session_id = %self.context.session_id, error = %e, "Suggestions unavailable");
                        Event::SuggestionsFailed
                    }
                })
            }

            Effect::RequestRecipe {
                meal_name,
                ingredients,
                history,
            } => {
                let request = RecipeRequest {
                    meal_name,
                    ingredients,
                    conversation_history: history,
                };
                Some(match self.backend.recipe(&request).await {
                    Ok(response) => Event::RecipeReceived {
                        recipe: response.recipe,
                        history: response.conversation_history,
                    },
                    Err(e) => {
                        tracing::warn!(session_id = %self.context.session_id, error = %e, "Recipe unavailable");
                        Event::RecipeFailed
                    }
                })
            }

            Effect::RequestFollowUp { question, history } => {
                let request = FollowUpRequest {
                    question,
                    conversation_history: history,
                };
                Some(match self.backend.follow_up(&request).await {
                    Ok(response) => Event::FollowUpAnswered {
                        response: response.response,
                        history: response.conversation_history,
                    },
                    Err(e) => {
                        tracing::warn!(session_id = %self.context.session_id, error = %e, "Follow-up failed");
                        Event::FollowUpFailed
                    }
                })
            }

            Effect::NotifyFailure { message } => {
                let _ = self.events_tx.send(SessionEvent::Notice { message });
                None
            }
        }
    }
}
