// Thin wrappers over dialoguer prompts used by every menu.

use std::fmt::{Debug, Display};
use std::str::FromStr;

use anyhow::Result;
use dialoguer::{Confirm, Input, Select};

use super::output::print_error;
use crate::api::split_list;

/// Keyboard-navigable list; returns the selected index.
pub fn choose(title: &str, items: &[&str]) -> Result<usize> {
    Ok(Select::new()
        .with_prompt(title)
        .items(items)
        .default(0)
        .interact()?)
}

/// Pick one of `values` and return it as an owned string.
pub fn choose_value(title: &str, values: &[&str]) -> Result<String> {
    let idx = choose(title, values)?;
    Ok(values[idx].to_string())
}

/// Required free text.
pub fn text(prompt: &str) -> Result<String> {
    let value: String = Input::new().with_prompt(prompt).interact_text()?;
    Ok(value.trim().to_string())
}

/// Free text with a prefilled default.
pub fn text_or(prompt: &str, default: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;
    Ok(value.trim().to_string())
}

/// Free text, prefilled only when a default exists.
pub fn text_with(prompt: &str, default: Option<&str>) -> Result<String> {
    match default {
        Some(default) => text_or(prompt, default),
        None => text(prompt),
    }
}

/// Optional free text; an empty answer is `None`.
pub fn optional(prompt: &str) -> Result<Option<String>> {
    let value: String = Input::new()
        .with_prompt(format!("{} (optional)", prompt))
        .allow_empty(true)
        .interact_text()?;
    let value = value.trim();
    Ok((!value.is_empty()).then(|| value.to_string()))
}

/// Parsed value; dialoguer re-asks until it parses.
pub fn number<T>(prompt: &str) -> Result<T>
where
    T: Clone + FromStr + Display,
    T::Err: Debug + Display,
{
    Ok(Input::<T>::new().with_prompt(prompt).interact_text()?)
}

pub fn number_or<T>(prompt: &str, default: T) -> Result<T>
where
    T: Clone + FromStr + Display,
    T::Err: Debug + Display,
{
    Ok(Input::<T>::new()
        .with_prompt(prompt)
        .default(default)
        .interact_text()?)
}

/// Optional parsed value. Empty answers are `None`; anything that does
/// not parse is reported and asked again.
pub fn optional_number<T: FromStr>(prompt: &str) -> Result<Option<T>> {
    loop {
        match parse_optional(optional(prompt)?.as_deref()) {
            Ok(value) => return Ok(value),
            Err(msg) => print_error(&msg),
        }
    }
}

fn parse_optional<T: FromStr>(answer: Option<&str>) -> std::result::Result<Option<T>, String> {
    match answer {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| format!("'{}' is not a valid number; leave it empty to skip", raw)),
    }
}

/// Comma separated list.
pub fn list(prompt: &str) -> Result<Vec<String>> {
    Ok(split_list(&text(&format!("{} (comma separated)", prompt))?))
}

pub fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new().with_prompt(prompt).default(default).interact()?)
}

/// Yes / no / leave unchanged.
pub fn tri_state(prompt: &str) -> Result<Option<bool>> {
    let idx = choose(prompt, &["Leave unchanged", "Enable", "Disable"])?;
    Ok(match idx {
        1 => Some(true),
        2 => Some(false),
        _ => None,
    })
}
