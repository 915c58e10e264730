//! Text rendering of the session payload

use crate::backend::Meal;
use crate::ingredients::IngredientSet;
use crate::state_machine::{FollowUpPrompt, Phase, SessionState};
use crossterm::style::Stylize;
use std::fmt::Write;

pub fn banner() -> String {
    format!(
        "{}\n{}\n",
        "Make a Meal".bold().dark_yellow(),
        "Transform your ingredients into delicious meals".dim()
    )
}

pub fn help() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Commands:".bold());
    for (usage, what) in [
        ("add <a, b, ...>", "add ingredients"),
        ("remove <name>", "remove an ingredient"),
        ("list", "show your ingredients"),
        ("suggest", "get meal suggestions"),
        ("pick <number|name>", "get the full recipe for a meal"),
        ("ask <question>", "ask about the current recipe"),
        ("show", "show the current screen again"),
        ("reset", "start over (ingredients are kept)"),
        ("quit", "leave"),
    ] {
        let _ = writeln!(out, "  {usage:<20} {what}");
    }
    for prompt in FollowUpPrompt::ALL {
        let _ = writeln!(out, "  {:<20} {}", keyword(prompt), prompt.label().to_lowercase());
    }
    out
}

/// Prompt keyword for a canned question
pub fn keyword(prompt: FollowUpPrompt) -> &'static str {
    match prompt {
        FollowUpPrompt::Substitutes => "subs",
        FollowUpPrompt::Simpler => "simpler",
        FollowUpPrompt::Tips => "tips",
    }
}

/// Indicator shown while a request is in flight
pub fn loading_message(phase: Phase) -> Option<&'static str> {
    match phase {
        Phase::Suggesting => Some("Finding meals..."),
        Phase::RecipeLoading => Some("Fetching the recipe..."),
        Phase::FollowUpLoading => Some("Asking the chef..."),
        _ => None,
    }
}

pub fn ingredients(set: &IngredientSet) -> String {
    if set.is_empty() {
        return "No ingredients yet. Try `add chicken, tomatoes, onions`.".dim().to_string();
    }
    format!(
        "{} {}",
        format!("Your ingredients ({}):", set.len()).bold(),
        set.list().join(", ")
    )
}

pub fn meals(meals: &[Meal]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Suggested Meals".bold().dark_yellow());
    if meals.is_empty() {
        let _ = writeln!(out, "No meals came back. Type `reset` and try other ingredients.");
        return out;
    }
    for (i, meal) in meals.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}. {}", i + 1, meal.name.as_str().bold());
        let _ = writeln!(out, "   {}", meal.description);
        let _ = writeln!(
            out,
            "   {} prep, {} cook | Serves {}",
            meal.prep_time, meal.cook_time, meal.servings
        );
        let _ = writeln!(
            out,
            "   Using your ingredients: {}",
            meal.ingredients_used.join(", ").green()
        );
        if !meal.additional_needed.is_empty() {
            let _ = writeln!(
                out,
                "   You'll also need: {}",
                meal.additional_needed.join(", ").yellow()
            );
        }
    }
    let _ = writeln!(out);
    let _ = write!(out, "{}", "Type `pick <number>` for the full recipe.".dim());
    out
}

pub fn recipe(meal_name: &str, text: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", meal_name.bold().dark_yellow());
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", text.trim_end());
    let _ = writeln!(out);
    let labels: Vec<String> = FollowUpPrompt::ALL
        .iter()
        .map(|prompt| format!("{} ({})", prompt.label(), keyword(*prompt)))
        .collect();
    let _ = write!(
        out,
        "{} {}, or `ask <question>`",
        "Quick questions:".bold(),
        labels.join(", ")
    );
    out
}

pub fn error(message: &str) -> String {
    format!("{}\nType `reset` to try again.", message.red())
}

/// The active payload of the current state
pub fn state(state: &SessionState, set: &IngredientSet) -> String {
    if let Some(message) = loading_message(state.phase()) {
        return message.to_string();
    }
    match (
        state.meals(),
        state.active_meal_name().zip(state.recipe_text()),
        state.error_message(),
    ) {
        (Some(list), _, _) => meals(list),
        (_, Some((name, text)), _) => recipe(name, text),
        (_, _, Some(message)) => error(message),
        _ => ingredients(set),
    }
}
