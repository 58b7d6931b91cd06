// Entrypoint for the Kero-Kero CLI tester.
// - Resolve settings, optionally launch a local gateway, then hand an API
//   client to the menu loop.
// - The local gateway is stopped on every exit path (explicitly, and by
//   `ServerSupervisor`'s `Drop` if the menu errors out).

use clap::Parser;

use kerokero_cli::api::{ApiClient, ApiConfig};
use kerokero_cli::cli::Cli;
use kerokero_cli::config::Settings;
use kerokero_cli::logger;
use kerokero_cli::supervisor::{ServerCommand, ServerSupervisor, DEFAULT_STARTUP_TIMEOUT};
use kerokero_cli::ui;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init_logging();

    let mut settings = Settings::resolve(&cli)?;
    ui::choose_mode(&mut settings)?;

    let mut supervisor = None;
    if settings.spawn_server {
        let mut local = ServerSupervisor::new(
            ServerCommand::go_run(&settings.server_dir),
            &settings.base_url,
        );
        if !ui::start_server(&mut local, DEFAULT_STARTUP_TIMEOUT)? {
            return Ok(());
        }
        supervisor = Some(local);
    }

    let api_key = match &cli.api_key {
        Some(key) => key.clone(),
        None => ui::prompt_api_key(&settings.api_key)?,
    };
    let api = ApiClient::new(ApiConfig::new(settings.base_url.clone(), api_key))?;
    tracing::info!(base_url = %api.base_url(), local = supervisor.is_some(), "Session started");

    let outcome = ui::main_menu(&api, supervisor.as_ref());

    if let Some(mut local) = supervisor {
        ui::output::print_info("Stopping local server...");
        local.stop();
    }
    outcome
}
