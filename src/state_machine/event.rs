//! Events that can occur in a session

use crate::backend::{ConversationTurn, Meal};

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // User events
    RequestSuggestions {
        ingredients: Vec<String>,
    },
    SelectMeal {
        meal_name: String,
        ingredients: Vec<String>,
    },
    AskFollowUp {
        question: String,
    },
    Reset,

    // Backend events
    SuggestionsReceived {
        meals: Vec<Meal>,
    },
    SuggestionsFailed,
    RecipeReceived {
        recipe: String,
        history: Vec<ConversationTurn>,
    },
    RecipeFailed,
    FollowUpAnswered {
        response: String,
        history: Vec<ConversationTurn>,
    },
    FollowUpFailed,
}

impl Event {
    /// Events originating from the user, as opposed to backend completions
    pub fn is_user_trigger(&self) -> bool {
        matches!(
            self,
            Event::RequestSuggestions { .. }
                | Event::SelectMeal { .. }
                | Event::AskFollowUp { .. }
                | Event::Reset
        )
    }
}

/// The canned follow-up questions offered next to a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUpPrompt {
    Substitutes,
    Simpler,
    Tips,
}

impl FollowUpPrompt {
    pub const ALL: [FollowUpPrompt; 3] = [
        FollowUpPrompt::Substitutes,
        FollowUpPrompt::Simpler,
        FollowUpPrompt::Tips,
    ];

    /// Question text sent to the backend
    pub fn question(self) -> &'static str {
        match self {
            FollowUpPrompt::Substitutes => {
                "Can you suggest substitutes for any ingredients I might not have?"
            }
            FollowUpPrompt::Simpler => "Can you make this recipe simpler?",
            FollowUpPrompt::Tips => "Any tips to make this taste better?",
        }
    }

    /// Short label for a button or menu entry
    pub fn label(self) -> &'static str {
        match self {
            FollowUpPrompt::Substitutes => "Suggest substitutes",
            FollowUpPrompt::Simpler => "Make it simpler",
            FollowUpPrompt::Tips => "Cooking tips",
        }
    }
}
