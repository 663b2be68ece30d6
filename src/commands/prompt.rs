//! Terminal prompts shared by the meal commands.

use dialoguer::{Input, Select};

pub const IMAGE_PROMPT: &str = "Enter the path to the image of your meal";
pub const DESCRIPTION_PROMPT: &str = "Enter a description of your meal";
pub const UPDATE_PROMPT: &str =
    "Enter your update (e.g., \"I also had a diet Mountain Dew\" or \"I only ate 1/2 of my potatoes\")";

/// Asks the user to pick one of `items`, returning its index.
pub fn select<T: ToString>(prompt: &str, items: &[T]) -> dialoguer::Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
}

/// Reads one line of free text.
pub fn text(prompt: &str) -> dialoguer::Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
}

/// Uses `value` when given, otherwise asks for it.
pub fn text_or_prompt(value: &Option<String>, prompt: &str) -> dialoguer::Result<String> {
    match value {
        Some(v) => Ok(v.clone()),
        None => text(prompt),
    }
}
