// Startup configuration: where the gateway lives, which key to send and
// whether a local server should be launched.
//
// The API key is resolved once, last writer wins:
//   DEFAULT_API_KEY -> `API_KEY=` in `<server dir>/.env`
//   -> `KEROKERO_API_KEY` -> `--api-key` (or the interactive prompt).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cli::Cli;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_API_KEY: &str = "kero-kero-api-key";
// Header names must be lowercase for `HeaderMap::insert`; HTTP ignores case.
pub const API_KEY_HEADER: &str = "x-api-key";
pub const ENV_FILE_NAME: &str = ".env";
pub const URL_ENV_VAR: &str = "KEROKERO_URL";
pub const API_KEY_ENV_VAR: &str = "KEROKERO_API_KEY";

/// Resolved startup settings. Built once in `main`, then read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub api_key: String,
    pub server_dir: PathBuf,
    /// Launch the gateway as a child process before opening the menu.
    /// When set, the shell still lets the user switch to a remote URL.
    pub spawn_server: bool,
}

impl Settings {
    /// Resolve settings from flags, the process environment and the
    /// current directory.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        Ok(Self::resolve_with(cli, &cwd, |name| std::env::var(name).ok()))
    }

    /// Same as [`Settings::resolve`] with the environment lookup and the
    /// fallback directory injected.
    pub fn resolve_with<F>(cli: &Cli, cwd: &Path, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_dir = cli.server_dir.clone().unwrap_or_else(|| cwd.to_path_buf());
        let remote_url = cli.url.clone().or_else(|| env(URL_ENV_VAR));
        let api_key = resolve_api_key(
            read_env_file_key(&server_dir),
            env(API_KEY_ENV_VAR),
            cli.api_key.clone(),
        );
        Settings {
            spawn_server: remote_url.is_none() && !cli.no_spawn,
            base_url: remote_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key,
            server_dir,
        }
    }
}

/// Apply the key precedence chain. Later sources replace earlier ones;
/// values are never merged.
pub fn resolve_api_key(
    file_key: Option<String>,
    env_key: Option<String>,
    override_key: Option<String>,
) -> String {
    [file_key, env_key, override_key]
        .into_iter()
        .flatten()
        .filter(|key| !key.is_empty())
        .last()
        .unwrap_or_else(|| DEFAULT_API_KEY.to_string())
}

/// Read `API_KEY=` from `<dir>/.env`. A missing or unreadable file is
/// not an error.
pub fn read_env_file_key(dir: &Path) -> Option<String> {
    let path = dir.join(ENV_FILE_NAME);
    let file = File::open(&path).ok()?;
    let key = parse_api_key(BufReader::new(file));
    if key.is_some() {
        tracing::debug!(path = %path.display(), "API key loaded from env file");
    }
    key
}

/// Scan key-value lines for `API_KEY=...`. The first matching line wins.
pub fn parse_api_key<R: BufRead>(reader: R) -> Option<String> {
    reader
        .lines()
        .map_while(|line| line.ok())
        .find_map(|line| {
            let value = line.trim_start().strip_prefix("API_KEY=")?;
            Some(unquote(value.trim()).to_string())
        })
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
