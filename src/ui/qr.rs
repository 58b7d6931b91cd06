// QR pairing artifact: decode the base64 PNG the gateway returns, write
// it next to the user and hand it to the platform image viewer.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub const QR_FILENAME: &str = "current_qr.png";

/// Viewers tried in order; the first one found on PATH is used.
const VIEWERS: &[&str] = &["xdg-open", "open"];

/// Decode `encoded` and write it to `path`. Tolerates a
/// `data:image/png;base64,` prefix.
pub fn save_qr_image(encoded: &str, path: &Path) -> Result<()> {
    let payload = encoded
        .split_once("base64,")
        .map(|(_, data)| data)
        .unwrap_or(encoded)
        .trim();
    let bytes = STANDARD
        .decode(payload)
        .context("QR payload is not valid base64")?;
    fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Look `program` up on PATH.
pub fn find_on_path(program: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

/// Open `path` with the first available viewer. Returns `false` when no
/// viewer is installed or it failed to launch.
pub fn open_image(path: &Path) -> bool {
    let Some(viewer) = VIEWERS.iter().find_map(|name| find_on_path(name)) else {
        return false;
    };
    match Command::new(&viewer)
        .arg(path)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(status) => status.success(),
        Err(e) => {
            tracing::warn!(viewer = %viewer.display(), error = %e, "Failed to launch image viewer");
            false
        }
    }
}
