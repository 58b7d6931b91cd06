// Presence indicators, status posts and newsletters (channels).

use anyhow::Result;

use super::output::{pause, print_header, run_call};
use super::prompt;
use crate::api::*;

const ITEMS: &[&str] = &[
    "Start typing / recording",
    "Stop presence",
    "Timed presence",
    "Set online / offline",
    "Publish status",
    "Status privacy",
    "List newsletters",
    "Create newsletter",
    "Newsletter info",
    "Follow newsletter",
    "Unfollow newsletter",
    "Send to newsletter",
    "Back",
];

pub fn menu(api: &ApiClient, iid: &str) -> Result<()> {
    loop {
        print_header(&format!("PRESENCE, STATUS & NEWSLETTERS ({})", iid));
        match prompt::choose("Option", ITEMS)? {
            op @ (0 | 2) => {
                let req = PresenceRequest {
                    phone: prompt::text("Chat phone")?,
                    kind: prompt::choose_value("Type", &["typing", "recording"])?,
                    duration: if op == 2 {
                        Some(prompt::number_or("Duration in ms (100-120000)", 3000)?)
                    } else {
                        None
                    },
                };
                if op == 0 {
                    run_call("Starting...", || api.start_presence(iid, &req))?;
                } else {
                    run_call("Starting...", || api.timed_presence(iid, &req))?;
                }
            }
            1 => {
                let phone = prompt::text("Chat phone")?;
                run_call("Stopping...", || api.stop_presence(iid, &phone))?;
            }
            3 => {
                let status = prompt::choose_value("Status", &["available", "unavailable"])?;
                run_call("Updating...", || api.set_presence_status(iid, &status))?;
            }
            4 => {
                let req = status_post()?;
                run_call("Publishing...", || api.publish_status(iid, &req))?;
            }
            5 => run_call("Loading...", || api.status_privacy(iid))?,
            6 => run_call("Loading...", || api.list_newsletters(iid))?,
            7 => {
                let req = CreateNewsletterRequest {
                    name: prompt::text("Name")?,
                    description: prompt::optional("Description")?.unwrap_or_default(),
                };
                run_call("Creating...", || api.create_newsletter(iid, &req))?;
            }
            8 => {
                let jid = prompt::text("Newsletter JID")?;
                run_call("Loading...", || api.newsletter_info(iid, &jid))?;
            }
            9 => {
                let jid = prompt::text("Newsletter JID")?;
                run_call("Following...", || api.follow_newsletter(iid, &jid))?;
            }
            10 => {
                let jid = prompt::text("Newsletter JID")?;
                run_call("Unfollowing...", || api.unfollow_newsletter(iid, &jid))?;
            }
            11 => {
                let jid = prompt::text("Newsletter JID")?;
                let kind = prompt::choose_value("Type", &["text", "image", "video"])?;
                let media_url = if kind == "text" {
                    None
                } else {
                    Some(prompt::text("Media URL")?)
                };
                let req = NewsletterMessageRequest {
                    jid,
                    message: prompt::text("Text / caption")?,
                    kind,
                    media_url,
                };
                run_call("Sending...", || api.send_newsletter_message(iid, &req))?;
            }
            _ => return Ok(()),
        }
        pause()?;
    }
}

fn status_post() -> Result<PublishStatusRequest> {
    let kind = prompt::choose_value("Type", &["text", "image", "video"])?;
    if kind == "text" {
        return Ok(PublishStatusRequest {
            kind,
            content: Some(prompt::text("Text")?),
            background_color: prompt::optional("Background color (#RRGGBB)")?,
            text_color: prompt::optional("Text color (#RRGGBB)")?,
            font: prompt::optional_number("Font (1-10)")?,
            ..Default::default()
        });
    }
    Ok(PublishStatusRequest {
        kind,
        media_url: Some(prompt::text("Media URL")?),
        caption: prompt::optional("Caption")?,
        ..Default::default()
    })
}
