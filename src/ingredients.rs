//! Ingredient set manager
//!
//! Holds the ingredients the user has declared available. Entries are
//! normalized (trimmed, lower-cased) on the way in, kept in insertion order,
//! and never duplicated. Rejected input is a silent no-op.


/// Normalize raw user input into the canonical ingredient form.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Ordered, deduplicated set of normalized ingredient names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientSet {
    items: Vec<String>,
}

impl IngredientSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an ingredient. Returns `false` when the normalized value is empty
    /// or already present, in which case the set is unchanged.
    pub fn add(&mut self, raw: &str) -> bool {
        let name = normalize(raw);
        if name.is_empty() || self.contains(&name) {
            return false;
        }
        self.items.push(name);
        true
    }

    /// Remove an ingredient by name. Returns `false` if nothing matched.
    pub fn remove(&mut self, name: &str) -> bool {
        let name = normalize(name);
        let before = self.items.len();
        self.items.retain(|item| *item != name);
        self.items.len() != before
    }

    pub fn list(&self) -> &[String] {
        &self.items
    }

    pub fn contains(&self, name: &str) -> bool {
        let name = normalize(name);
        self.items.iter().any(|item| *item == name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Snapshot of the current list, as sent to the backend
    pub fn to_vec(&self) -> Vec<String> {
        self.items.clone()
    }
}
