// History sync: start it, follow it with a progress bar, or cancel it.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use super::output::{
    pause, pretty_print, print_error, print_header, print_info, print_success, run_call, show,
};
use super::prompt;
use crate::api::{ApiClient, ApiResponse, SyncOptions, SyncProgress};

const PROGRESS_POLL_INTERVAL: Duration = Duration::from_secs(1);
/// Give up following after this many polls; the sync keeps running.
const MAX_PROGRESS_POLLS: u32 = 120;

const ITEMS: &[&str] = &[
    "Start sync and follow",
    "Show progress",
    "Cancel sync",
    "Back",
];

pub fn menu(api: &ApiClient, iid: &str) -> Result<()> {
    loop {
        print_header(&format!("HISTORY SYNC ({})", iid));
        match prompt::choose("Option", ITEMS)? {
            0 => start_and_follow(api, iid)?,
            1 => run_call("Loading...", || api.sync_progress(iid))?,
            2 => {
                if prompt::confirm("Cancel the running sync?", false)? {
                    run_call("Cancelling...", || api.cancel_sync(iid))?;
                }
            }
            _ => return Ok(()),
        }
        pause()?;
    }
}

fn start_and_follow(api: &ApiClient, iid: &str) -> Result<()> {
    let defaults = SyncOptions::default();
    let options = SyncOptions {
        messages_per_chat: prompt::number_or("Messages per chat", defaults.messages_per_chat)?,
        max_chats: prompt::number_or("Max chats (0 = all)", defaults.max_chats)?,
        advanced: prompt::confirm("Advanced sync (media metadata)?", defaults.advanced)?,
    };

    let started = api.start_sync(iid, &options);
    match &started {
        Ok(resp) if resp.is_success() => print_success("Sync started."),
        _ => {
            show(&started);
            return Ok(());
        }
    }

    let bar = ProgressBar::new(0);
    bar.set_style(ProgressStyle::with_template(
        "{spinner} [{bar:40}] {pos}/{len} chats {msg}",
    )?);

    let mut last = SyncProgress::default();
    for _ in 0..MAX_PROGRESS_POLLS {
        thread::sleep(PROGRESS_POLL_INTERVAL);
        let polled = api
            .sync_progress(iid)
            .and_then(ApiResponse::ensure_success)
            .and_then(|resp| resp.data::<SyncProgress>());
        let progress = match polled {
            Ok(progress) => progress,
            Err(e) => {
                bar.abandon();
                print_error(&format!("Could not read sync progress: {}", e));
                return Ok(());
            }
        };
        bar.set_length(progress.total_chats);
        bar.set_position(progress.processed_chats);
        bar.set_message(format!(
            "{} msgs, {}",
            progress.synced_messages, progress.status
        ));
        let finished = progress.is_finished();
        last = progress;
        if finished {
            break;
        }
    }
    bar.finish_and_clear();

    match last.status.as_str() {
        "completed" => print_success(&format!(
            "Sync completed: {} chats, {} messages.",
            last.processed_chats, last.synced_messages
        )),
        "failed" => print_error(&format!(
            "Sync failed: {}",
            last.error.as_deref().unwrap_or("unknown error")
        )),
        "cancelled" => print_info("Sync cancelled."),
        _ => print_info("Still running; check back with \"Show progress\"."),
    }
    if let Ok(value) = serde_json::to_value(&last) {
        pretty_print(&value);
    }
    Ok(())
}
