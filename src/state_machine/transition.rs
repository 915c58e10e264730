//! Pure state transition function
//!
//! Given the same state and event this always produces the same result, with
//! no I/O. A rejected event (`Err`) leaves the caller's state untouched.

use super::state::Phase;
use super::{Effect, Event, SessionContext, SessionState};
use thiserror::Error;

pub const SUGGESTIONS_FAILED_MESSAGE: &str = "Failed to get suggestions. Please try again.";
pub const RECIPE_FAILED_MESSAGE: &str = "Failed to get recipe. Please try again.";
pub const FOLLOW_UP_FAILED_MESSAGE: &str = "Failed to process follow-up. Please try again.";

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// A trigger whose precondition does not hold
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Add at least one ingredient first")]
    NoIngredients,
    #[error("No meal named {0:?} in the current suggestions")]
    UnknownMeal(String),
    #[error("No recipe is shown to ask about")]
    NoRecipe,
    #[error("Still waiting for the backend ({0})")]
    Busy(Phase),
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
pub fn transition(
    state: &SessionState,
    _context: &SessionContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    // Single flight: no user trigger is accepted while a call is outstanding
    if state.phase().is_loading() && event.is_user_trigger() {
        return Err(TransitionError::Busy(state.phase()));
    }

    match (state, event) {
        // ============================================================
        // Suggestions
        // ============================================================

        (SessionState::Collecting, Event::RequestSuggestions { ingredients }) => {
            if ingredients.is_empty() {
                return Err(TransitionError::NoIngredients);
            }
            Ok(TransitionResult::new(SessionState::Suggesting)
                .with_effect(Effect::RequestSuggestions { ingredients }))
        }

        // A new batch of meals starts a new conversation; any prior history is gone
        (SessionState::Suggesting, Event::SuggestionsReceived { meals }) => {
            Ok(TransitionResult::new(SessionState::Suggested { meals }))
        }

        (SessionState::Suggesting, Event::SuggestionsFailed) => {
            Ok(TransitionResult::new(SessionState::Error {
                message: SUGGESTIONS_FAILED_MESSAGE.to_string(),
            }))
        }

        // ============================================================
        // Recipe
        // ============================================================

        (SessionState::Suggested { meals }, Event::SelectMeal { meal_name, ingredients }) => {
            if !meals.iter().any(|meal| meal.name == meal_name) {
                return Err(TransitionError::UnknownMeal(meal_name));
            }
            let history = state.history().to_vec();
            Ok(TransitionResult::new(SessionState::RecipeLoading {
                meal_name: meal_name.clone(),
                history: history.clone(),
            })
            .with_effect(Effect::RequestRecipe {
                meal_name,
                ingredients,
                history,
            }))
        }

        (SessionState::RecipeLoading { meal_name, .. }, Event::RecipeReceived { recipe, history }) => {
            Ok(TransitionResult::new(SessionState::RecipeShown {
                meal_name: meal_name.clone(),
                recipe,
                history,
            }))
        }

        (SessionState::RecipeLoading { .. }, Event::RecipeFailed) => {
            Ok(TransitionResult::new(SessionState::Error {
                message: RECIPE_FAILED_MESSAGE.to_string(),
            }))
        }

        // ============================================================
        // Follow-up questions
        // ============================================================

        (
            SessionState::RecipeShown {
                meal_name,
                recipe,
                history,
            },
            Event::AskFollowUp { question },
        ) => Ok(TransitionResult::new(SessionState::FollowUpLoading {
            meal_name: meal_name.clone(),
            recipe: recipe.clone(),
            history: history.clone(),
            question: question.clone(),
        })
        .with_effect(Effect::RequestFollowUp {
            question,
            history: history.clone(),
        })),

        (_, Event::AskFollowUp { .. }) => Err(TransitionError::NoRecipe),

        (
            SessionState::FollowUpLoading { meal_name, .. },
            Event::FollowUpAnswered { response, history },
        ) => Ok(TransitionResult::new(SessionState::RecipeShown {
            meal_name: meal_name.clone(),
            recipe: response,
            history,
        })),

        // The answer is supplementary: keep what is already on screen
        (
            SessionState::FollowUpLoading {
                meal_name,
                recipe,
                history,
                ..
            },
            Event::FollowUpFailed,
        ) => Ok(TransitionResult::new(SessionState::RecipeShown {
            meal_name: meal_name.clone(),
            recipe: recipe.clone(),
            history: history.clone(),
        })
        .with_effect(Effect::NotifyFailure {
            message: FOLLOW_UP_FAILED_MESSAGE.to_string(),
        })),

        // ============================================================
        // Reset
        // ============================================================

        (
            SessionState::Collecting
            | SessionState::Suggested { .. }
            | SessionState::RecipeShown { .. }
            | SessionState::Error { .. },
            Event::Reset,
        ) => Ok(TransitionResult::new(SessionState::Collecting)),

        // ============================================================
        // Invalid Transitions
        // ============================================================

        (state, event) => Err(TransitionError::InvalidTransition(format!(
            "No transition from {} with event {}",
            state.phase(),
            event_name(&event)
        ))),
    }
}

fn event_name(event: &Event) -> &'static str {
    match event {
        Event::RequestSuggestions { .. } => "request_suggestions",
        Event::SelectMeal { .. } => "select_meal",
        Event::AskFollowUp { .. } => "ask_follow_up",
        Event::Reset => "reset",
        Event::SuggestionsReceived { .. } => "suggestions_received",
        Event::SuggestionsFailed => "suggestions_failed",
        Event::RecipeReceived { .. } => "recipe_received",
        Event::RecipeFailed => "recipe_failed",
        Event::FollowUpAnswered { .. } => "follow_up_answered",
        Event::FollowUpFailed => "follow_up_failed",
    }
}
