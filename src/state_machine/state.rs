//! Session state types

use crate::backend::{ConversationTurn, Meal};
use std::fmt;

/// Fieldless view of the session state, for gating triggers in a front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Collecting,
    Suggesting,
    Suggested,
    RecipeLoading,
    RecipeShown,
    FollowUpLoading,
    Error,
}

impl Phase {
    /// A remote call is in flight; user triggers are refused
    pub fn is_loading(self) -> bool {
        matches!(
            self,
            Phase::Suggesting | Phase::RecipeLoading | Phase::FollowUpLoading
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Collecting => "collecting",
            Phase::Suggesting => "suggesting",
            Phase::Suggested => "suggested",
            Phase::RecipeLoading => "recipe_loading",
            Phase::RecipeShown => "recipe_shown",
            Phase::FollowUpLoading => "follow_up_loading",
            Phase::Error => "error",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session state. Each variant carries exactly the payload that is valid
/// in that phase.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// Gathering ingredients, nothing shown
    #[default]
    Collecting,

    /// Suggestion request in flight
    Suggesting,

    /// Meal ideas on screen
    Suggested { meals: Vec<Meal> },

    /// Recipe request in flight
    RecipeLoading {
        meal_name: String,
        /// History sent with the request
        history: Vec<ConversationTurn>,
    },

    /// Recipe (or latest follow-up answer) on screen
    RecipeShown {
        meal_name: String,
        recipe: String,
        history: Vec<ConversationTurn>,
    },

    /// Follow-up request in flight. Keeps the shown recipe and history so a
    /// failure can restore them untouched.
    FollowUpLoading {
        meal_name: String,
        recipe: String,
        history: Vec<ConversationTurn>,
        question: String,
    },

    /// Suggestion or recipe request failed
    Error { message: String },
}

impl SessionState {
    pub fn phase(&self) -> Phase {
        match self {
            SessionState::Collecting => Phase::Collecting,
            SessionState::Suggesting => Phase::Suggesting,
            SessionState::Suggested { .. } => Phase::Suggested,
            SessionState::RecipeLoading { .. } => Phase::RecipeLoading,
            SessionState::RecipeShown { .. } => Phase::RecipeShown,
            SessionState::FollowUpLoading { .. } => Phase::FollowUpLoading,
            SessionState::Error { .. } => Phase::Error,
        }
    }

    /// Conversation history valid in this state, empty where none exists
    pub fn history(&self) -> &[ConversationTurn] {
        match self {
            SessionState::RecipeLoading { history, .. }
            | SessionState::RecipeShown { history, .. }
            | SessionState::FollowUpLoading { history, .. } => history,
            _ => &[],
        }
    }

    /// Meal list, present only in `Suggested`
    pub fn meals(&self) -> Option<&[Meal]> {
        match self {
            SessionState::Suggested { meals } => Some(meals),
            _ => None,
        }
    }

    /// Meal whose recipe has been requested or is shown
    pub fn active_meal_name(&self) -> Option<&str> {
        match self {
            SessionState::RecipeLoading { meal_name, .. }
            | SessionState::RecipeShown { meal_name, .. }
            | SessionState::FollowUpLoading { meal_name, .. } => Some(meal_name),
            _ => None,
        }
    }

    /// Latest recipe or follow-up answer
    pub fn recipe_text(&self) -> Option<&str> {
        match self {
            SessionState::RecipeShown { recipe, .. }
            | SessionState::FollowUpLoading { recipe, .. } => Some(recipe),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SessionState::Error { message } => Some(message),
            _ => None,
        }
    }
}

/// Per-session immutable context
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub session_id: String,
}

impl SessionContext {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
        }
    }

    /// Context with a fresh random id
    pub fn generate() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }
}
