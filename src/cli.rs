// Command-line flags. Every flag is optional: anything not given on the
// command line is resolved from the environment, the server's `.env` file
// or an interactive prompt (see `config::Settings`).

use std::path::PathBuf;

use clap::Parser;

/// Interactive tester for the Kero-Kero WhatsApp gateway API.
#[derive(Debug, Default, Parser)]
#[command(name = "kerokero-cli", version, about)]
pub struct Cli {
    /// Base URL of an already running gateway. Implies `--no-spawn`.
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// API key sent in the `X-API-Key` header. Overrides `.env` and
    /// `KEROKERO_API_KEY`.
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Directory holding the gateway sources and its `.env` file.
    #[arg(long, value_name = "DIR")]
    pub server_dir: Option<PathBuf>,

    /// Do not launch a local server; talk to whatever listens on the URL.
    #[arg(long)]
    pub no_spawn: bool,
}
