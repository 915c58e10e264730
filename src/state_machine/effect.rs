//! Effects produced by state transitions

use crate::backend::ConversationTurn;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Call the suggestion contract
    RequestSuggestions { ingredients: Vec<String> },

    /// Call the recipe contract
    RequestRecipe {
        meal_name: String,
        ingredients: Vec<String>,
        history: Vec<ConversationTurn>,
    },

    /// Call the follow-up contract
    RequestFollowUp {
        question: String,
        history: Vec<ConversationTurn>,
    },

    /// Tell the user about a failure that did not change what is shown
    NotifyFailure { message: String },
}

impl Effect {
    /// Whether this effect performs a remote call
    pub fn is_request(&self) -> bool {
        !matches!(self, Effect::NotifyFailure { .. })
    }
}
