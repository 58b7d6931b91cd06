use anyhow::Result;

use super::output::{pause, print_header, run_call};
use super::prompt;
use crate::api::*;

const ITEMS: &[&str] = &[
    "Plain text",
    "Text with typing indicator",
    "Image (URL)",
    "Video (URL)",
    "Audio (URL)",
    "Document (URL)",
    "Location",
    "Contact (vCard)",
    "Poll",
    "Vote in poll",
    "React",
    "Edit",
    "Revoke (delete for everyone)",
    "Mark as read",
    "Back",
];

pub fn menu(api: &ApiClient, iid: &str) -> Result<()> {
    loop {
        print_header(&format!("MESSAGING (instance: {})", iid));
        let op = prompt::choose("Option", ITEMS)?;
        if op == ITEMS.len() - 1 {
            return Ok(());
        }
        // Mark-as-read addresses a chat JID, everything else a phone.
        if op == 13 {
            let req = MarkAsReadRequest {
                message_id: prompt::text("Message ID")?,
                chat_jid: prompt::text("Chat JID (5215512345678@s.whatsapp.net)")?,
                sender_jid: prompt::text("Sender JID")?,
                timestamp: prompt::number("Message timestamp (unix seconds)")?,
            };
            run_call("Marking...", || api.mark_read(iid, &req))?;
            pause()?;
            continue;
        }

        let phone = prompt::text("Recipient (phone: 521...)")?;
        match op {
            0 => {
                let req = SendTextRequest {
                    phone,
                    message: prompt::text("Message")?,
                };
                run_call("Sending...", || api.send_text(iid, &req))?;
            }
            1 => {
                let req = SendTextWithTypingRequest {
                    phone,
                    message: prompt::text("Message")?,
                    typing_duration: prompt::optional_number("Typing duration in ms")?,
                };
                run_call("Typing...", || api.send_text_with_typing(iid, &req))?;
            }
            2 | 3 => {
                let req = SendMediaRequest {
                    phone,
                    media_url: prompt::text("Media URL")?,
                    caption: prompt::optional("Caption")?,
                    file_name: None,
                };
                if op == 2 {
                    run_call("Sending image...", || api.send_image(iid, &req))?;
                } else {
                    run_call("Sending video...", || api.send_video(iid, &req))?;
                }
            }
            4 => {
                let req = SendMediaRequest {
                    phone,
                    media_url: prompt::text("Audio URL")?,
                    ..Default::default()
                };
                run_call("Sending audio...", || api.send_audio(iid, &req))?;
            }
            5 => {
                let req = SendMediaRequest {
                    phone,
                    media_url: prompt::text("Document URL")?,
                    file_name: Some(prompt::text("File name")?),
                    caption: prompt::optional("Caption")?,
                };
                run_call("Sending document...", || api.send_document(iid, &req))?;
            }
            6 => {
                let req = SendLocationRequest {
                    phone,
                    latitude: prompt::number("Latitude")?,
                    longitude: prompt::number("Longitude")?,
                    name: prompt::optional("Place name")?,
                    address: prompt::optional("Address")?,
                };
                run_call("Sending location...", || api.send_location(iid, &req))?;
            }
            7 => {
                let req = SendContactRequest {
                    phone,
                    display_name: prompt::text("Display name")?,
                    vcard: prompt::text("vCard data")?,
                };
                run_call("Sending contact...", || api.send_contact(iid, &req))?;
            }
            8 => {
                let req = CreatePollRequest {
                    phone,
                    question: prompt::text("Question")?,
                    options: prompt::list("Options (2-12)")?,
                    selectable_count: prompt::optional_number("Selectable answers (0 = single)")?,
                };
                run_call("Sending poll...", || api.send_poll(iid, &req))?;
            }
            9 => {
                let req = VotePollRequest {
                    phone,
                    message_id: prompt::text("Poll message ID")?,
                    option_names: prompt::list("Options to vote for")?,
                };
                run_call("Voting...", || api.vote_poll(iid, &req))?;
            }
            10 => {
                let req = ReactionRequest {
                    phone,
                    message_id: prompt::text("Message ID")?,
                    emoji: prompt::optional("Emoji (empty removes the reaction)")?
                        .unwrap_or_default(),
                };
                run_call("Reacting...", || api.react(iid, &req))?;
            }
            11 => {
                let req = EditMessageRequest {
                    phone,
                    message_id: prompt::text("Message ID")?,
                    new_text: prompt::text("New text")?,
                };
                run_call("Editing...", || api.edit(iid, &req))?;
            }
            _ => {
                let req = MessageRefRequest {
                    phone,
                    message_id: prompt::text("Message ID")?,
                };
                run_call("Revoking...", || api.revoke(iid, &req))?;
            }
        }
        pause()?;
    }
}
