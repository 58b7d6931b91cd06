// Privacy, call handling and webhook configuration.

use anyhow::Result;

use super::output::{pause, print_header, run_call};
use super::prompt;
use crate::api::*;

const ITEMS: &[&str] = &[
    "Show privacy settings",
    "Update privacy setting",
    "Show call settings",
    "Update call settings",
    "Show webhook",
    "Set webhook",
    "Delete webhook",
    "Back",
];

const PRIVACY_CATEGORIES: &[&str] = &[
    "last_seen",
    "profile_photo",
    "status",
    "read_receipts",
    "groups",
    "default_timer",
];

const PRIVACY_AUDIENCES: &[&str] = &["all", "contacts", "contact_blacklist", "none"];

pub fn menu(api: &ApiClient, iid: &str) -> Result<()> {
    loop {
        print_header(&format!("PRIVACY, CALLS & WEBHOOK ({})", iid));
        match prompt::choose("Option", ITEMS)? {
            0 => run_call("Loading...", || api.get_privacy(iid))?,
            1 => {
                let category = prompt::choose_value("Category", PRIVACY_CATEGORIES)?;
                let value = match category.as_str() {
                    "read_receipts" => {
                        prompt::confirm("Send read receipts?", true)?.to_string()
                    }
                    "default_timer" => prompt::text("Timer (e.g. 24h, 7d, 90d, off)")?,
                    _ => prompt::choose_value("Who can see it", PRIVACY_AUDIENCES)?,
                };
                let req = PrivacyUpdateRequest { category, value };
                run_call("Updating...", || api.update_privacy(iid, &req))?;
            }
            2 => run_call("Loading...", || api.get_call_settings(iid))?,
            3 => {
                let auto_reject = prompt::confirm("Reject incoming calls automatically?", false)?;
                let auto_reply_enabled = prompt::confirm("Reply with a message on reject?", false)?;
                let settings = CallSettings {
                    auto_reject,
                    auto_reply_enabled,
                    auto_reply_message: if auto_reply_enabled {
                        prompt::text("Reply message")?
                    } else {
                        String::new()
                    },
                    reject_delay: prompt::number_or("Seconds before rejecting", 0)?,
                };
                run_call("Saving...", || api.update_call_settings(iid, &settings))?;
            }
            4 => run_call("Loading...", || api.get_webhook(iid))?,
            5 => {
                let req = WebhookRequest {
                    url: prompt::text("Webhook URL")?,
                    events: split_list(&prompt::text_or(
                        "Events, comma separated",
                        "message,status,receipt",
                    )?),
                    secret: prompt::optional("Signing secret")?,
                    enabled: prompt::confirm("Enabled?", true)?,
                };
                run_call("Saving...", || api.set_webhook(iid, &req))?;
            }
            6 => {
                if prompt::confirm("Remove the webhook?", false)? {
                    run_call("Deleting...", || api.delete_webhook(iid))?;
                }
            }
            _ => return Ok(()),
        }
        pause()?;
    }
}
