// UI layer: interactive menus built on `dialoguer`.
//
// Each sub-menu lives in its own module and talks to the gateway only
// through `ApiClient`. API failures are printed and the loop continues;
// only terminal I/O errors end the session.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::style::Stylize;

use crate::api::ApiClient;
use crate::config::Settings;
use crate::supervisor::ServerSupervisor;

mod account;
mod automation;
mod channels;
mod contacts;
mod groups;
mod instances;
mod messages;
pub mod output;
pub mod prompt;
pub mod qr;
mod sync;

use output::{clear_screen, pause, print_error, print_header, print_info, print_success};

/// How many server log lines the log view shows.
const LOG_VIEW_LINES: usize = 30;

const ACTIVE_INSTANCE_FILE: &str = ".kerokero_instance";

/// Let the user pick local (spawned) or remote mode. Only asked when no
/// remote URL was configured up front.
pub fn choose_mode(settings: &mut Settings) -> Result<()> {
    if !settings.spawn_server {
        return Ok(());
    }
    let local = format!("Launch local server ({})", settings.server_dir.display());
    let idx = prompt::choose("Server mode", &[local.as_str(), "Connect to a remote server"])?;
    if idx == 1 {
        settings.base_url = prompt::text_or("Server URL", &settings.base_url)?;
        settings.spawn_server = false;
    }
    Ok(())
}

/// Ask for the API key, prefilled with the resolved one. A different
/// answer overrides every other source.
pub fn prompt_api_key(resolved: &str) -> Result<String> {
    prompt::text_or("API key", resolved)
}

/// Start the gateway and wait for its health check behind a spinner.
/// Returns `false` (after stopping the child) when startup failed.
pub fn start_server(supervisor: &mut ServerSupervisor, timeout: Duration) -> Result<bool> {
    print_info("Starting Kero-Kero server (go run cmd/server/main.go)...");
    if let Err(e) = supervisor.start() {
        print_error(&format!("Could not start the server: {}", e));
        return Ok(false);
    }

    let spinner = output::spinner("Waiting for health check...")?;
    let ready = supervisor.wait_for_health_with(timeout, |_| spinner.tick());
    spinner.finish_and_clear();

    if ready {
        print_success("Server ready!");
        return Ok(true);
    }

    if supervisor.is_running() {
        print_error("Timed out waiting for the server.");
    } else {
        print_error("The server exited during startup.");
    }
    for line in supervisor.recent_logs(20) {
        println!("{}", line.dark_grey());
    }
    supervisor.stop();
    Ok(false)
}

/// Main interactive menu. Blocks until the user picks "Exit".
pub fn main_menu(api: &ApiClient, supervisor: Option<&ServerSupervisor>) -> Result<()> {
    let mut active = initial_instance(api);

    loop {
        clear_screen();
        print_header("KERO-KERO CLI TESTER");
        let shown = active.as_deref().unwrap_or("none");
        println!("Server: {}", api.base_url().cyan());
        println!("Active instance: {}\n", shown.cyan());

        let items = [
            "Instances (connection / QR)",
            "Messaging",
            "Contacts",
            "Groups",
            "Automation & business",
            "Privacy, calls & webhook",
            "Presence, status & newsletters",
            "History sync",
            "Change active instance",
            "Server logs",
            "Exit",
        ];
        let selection = prompt::choose("Main menu", &items)?;
        match selection {
            0 => instances::menu(api, &mut active)?,
            1..=7 => {
                let Some(iid) = active.clone() else {
                    print_error("Select an instance first!");
                    pause()?;
                    continue;
                };
                match selection {
                    1 => messages::menu(api, &iid)?,
                    2 => contacts::menu(api, &iid)?,
                    3 => groups::menu(api, &iid)?,
                    4 => automation::menu(api, &iid)?,
                    5 => account::menu(api, &iid)?,
                    6 => channels::menu(api, &iid)?,
                    _ => sync::menu(api, &iid)?,
                }
            }
            8 => {
                if let Some(iid) = select_instance(api)? {
                    persist_active_instance(&iid);
                    active = Some(iid);
                }
            }
            9 => {
                show_logs(supervisor);
                pause()?;
            }
            _ => break,
        }
    }
    Ok(())
}

/// Pick the starting instance: the only one the server knows, else the
/// one remembered from the last session if it still exists.
fn initial_instance(api: &ApiClient) -> Option<String> {
    let remembered = load_active_instance();
    match api.list_instances() {
        Ok(list) if list.len() == 1 => Some(list[0].instance_id.clone()),
        Ok(list) => remembered.filter(|id| list.iter().any(|i| &i.instance_id == id)),
        Err(e) => {
            tracing::debug!(error = %e, "Could not list instances at startup");
            remembered
        }
    }
}

fn select_instance(api: &ApiClient) -> Result<Option<String>> {
    let listed = output::with_spinner("Loading instances...", || api.list_instances())?;
    let ids: Vec<String> = match listed {
        Ok(list) => list.into_iter().map(|i| i.instance_id).collect(),
        Err(e) => {
            print_error(&format!("Could not list instances: {}", e));
            Vec::new()
        }
    };

    let mut items: Vec<&str> = ids.iter().map(String::as_str).collect();
    items.push("Type an instance ID");
    items.push("Cancel");
    let idx = prompt::choose("Active instance", &items)?;
    if idx < ids.len() {
        Ok(Some(ids[idx].clone()))
    } else if idx == ids.len() {
        Ok(Some(prompt::text("Instance ID")?))
    } else {
        Ok(None)
    }
}

fn show_logs(supervisor: Option<&ServerSupervisor>) {
    let Some(supervisor) = supervisor else {
        print_info("Remote mode: no local server logs are captured.");
        return;
    };
    print_header("SERVER LOGS");
    let lines = supervisor.recent_logs(LOG_VIEW_LINES);
    if lines.is_empty() {
        print_info("No output captured yet.");
    }
    for line in lines {
        println!("{}", line);
    }
}

fn active_instance_path() -> PathBuf {
    let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.join(ACTIVE_INSTANCE_FILE)
}

/// Remember the active instance for the next session. Best effort.
fn persist_active_instance(instance_id: &str) {
    if let Err(e) = std::fs::write(active_instance_path(), instance_id) {
        tracing::warn!(error = %e, "Could not persist active instance");
    }
}

fn load_active_instance() -> Option<String> {
    let data = std::fs::read_to_string(active_instance_path()).ok()?;
    let id = data.trim();
    (!id.is_empty()).then(|| id.to_string())
}
