// Terminal output helpers: tagged status lines, pretty JSON and spinners.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use crossterm::style::Stylize;
use crossterm::{cursor, execute, terminal};
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

use crate::api::{display_json, ApiResult};

pub fn print_info(msg: &str) {
    println!("{} {}", "[INFO]".blue(), msg);
}

pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green(), msg);
}

pub fn print_error(msg: &str) {
    println!("{} {}", "[ERROR]".red(), msg);
}

pub fn print_header(msg: &str) {
    println!("\n{}", format!("=== {} ===", msg).magenta().bold());
}

/// Pretty-print JSON in cyan.
pub fn pretty_print(value: &Value) {
    let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    println!("{}", text.cyan());
}

/// Print the outcome of any API call. Failures are shown, never raised.
pub fn show(result: &ApiResult) {
    if let Err(err) = result {
        tracing::warn!(error = %err, "API call failed");
    }
    pretty_print(&display_json(result));
}

pub fn clear_screen() {
    let mut out = io::stdout();
    // A terminal that refuses to clear just keeps scrolling.
    if execute!(out, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0)).is_err() {
        println!();
    }
    let _ = out.flush();
}

/// Wait for Enter before redrawing the menu.
pub fn pause() -> Result<()> {
    let _: String = Input::new()
        .with_prompt("Press ENTER to continue")
        .allow_empty(true)
        .interact_text()?;
    Ok(())
}

pub fn spinner(msg: &str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(msg.to_string());
    Ok(spinner)
}

/// Run one blocking call behind a ticking spinner.
pub fn with_spinner<T>(msg: &str, call: impl FnOnce() -> T) -> Result<T> {
    let spinner = spinner(msg)?;
    spinner.enable_steady_tick(Duration::from_millis(100));
    let out = call();
    spinner.finish_and_clear();
    Ok(out)
}

/// Spin while `call` runs, then print its outcome.
pub fn run_call(msg: &str, call: impl FnOnce() -> ApiResult) -> Result<()> {
    let result = with_spinner(msg, call)?;
    show(&result);
    Ok(())
}
