//! Wire types for the three backend contracts

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::fmt;

/// One entry of the backend-owned conversation history.
///
/// Kept as the raw JSON text the backend sent, so the next request carries
/// exactly those bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationTurn(Box<RawValue>);

impl ConversationTurn {
    #[cfg(test)]
    pub fn new(value: serde_json::Value) -> Self {
        Self(serde_json::value::to_raw_value(&value).expect("JSON value serializes"))
    }
}

impl PartialEq for ConversationTurn {
    fn eq(&self, other: &Self) -> bool {
        self.0.get() == other.0.get()
    }
}

/// Servings as sent by the backend, a display value only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Servings {
    Count(u64),
    Text(String),
    /// Any other JSON value, shown as sent
    Other(serde_json::Value),
}

impl fmt::Display for Servings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Servings::Count(n) => write!(f, "{n}"),
            Servings::Text(s) => f.write_str(s),
            Servings::Other(serde_json::Value::Null) => f.write_str("?"),
            Servings::Other(v) => write!(f, "{v}"),
        }
    }
}

/// A meal idea from a suggestion batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    pub description: String,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: Servings,
    pub ingredients_used: Vec<String>,
    #[serde(default)]
    pub additional_needed: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub meals: Vec<Meal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    pub meal_name: String,
    pub ingredients: Vec<String>,
    pub conversation_history: Vec<ConversationTurn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    pub recipe: String,
    pub conversation_history: Vec<ConversationTurn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpRequest {
    pub question: String,
    pub conversation_history: Vec<ConversationTurn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpResponse {
    pub response: String,
    pub conversation_history: Vec<ConversationTurn>,
}
