use anyhow::Result;

use super::output::{pause, print_header, print_info, run_call};
use super::prompt;
use crate::api::*;

const ITEMS: &[&str] = &[
    "Bulk message",
    "Schedule message",
    "Show auto-reply",
    "Configure auto-reply",
    "Business profile",
    "Create label",
    "Assign / remove label",
    "Show auto-label rules",
    "Set auto-label rules",
    "Back",
];

pub fn menu(api: &ApiClient, iid: &str) -> Result<()> {
    loop {
        print_header(&format!("AUTOMATION & BUSINESS ({})", iid));
        match prompt::choose("Option", ITEMS)? {
            0 => {
                let req = BulkMessageRequest {
                    phones: prompt::list("Recipients")?,
                    message: prompt::text("Message")?,
                    media_url: prompt::optional("Media URL")?,
                    min_delay: prompt::optional_number("Min delay between sends (ms)")?,
                    max_delay: prompt::optional_number("Max delay between sends (ms)")?,
                };
                run_call("Queueing...", || api.bulk_message(iid, &req))?;
            }
            1 => {
                let delay: i64 = prompt::number_or("Send in how many seconds", 60)?;
                let req = ScheduleMessageRequest {
                    phone: prompt::text("Phone")?,
                    message: prompt::text("Message")?,
                    execute_at: chrono::Utc::now().timestamp() + delay,
                };
                run_call("Scheduling...", || api.schedule_message(iid, &req))?;
            }
            2 => run_call("Loading...", || api.get_auto_reply(iid))?,
            3 => {
                let enabled = prompt::confirm("Enable auto-reply?", true)?;
                let config = AutoReplyConfig {
                    enabled,
                    message: if enabled {
                        prompt::text("Reply message")?
                    } else {
                        String::new()
                    },
                    trigger_keywords: if enabled {
                        split_list(&prompt::optional("Trigger keywords, comma separated")?.unwrap_or_default())
                    } else {
                        Vec::new()
                    },
                    match_type: if enabled {
                        Some(prompt::choose_value("Match type", &["contains", "exact", "startswith"])?)
                    } else {
                        None
                    },
                };
                run_call("Saving...", || api.set_auto_reply(iid, &config))?;
            }
            4 => run_call("Loading...", || api.business_profile(iid))?,
            5 => {
                let req = CreateLabelRequest {
                    name: prompt::text("Label name")?,
                    color: prompt::number_or("Color (0-19)", 0)?,
                };
                run_call("Creating...", || api.create_label(iid, &req))?;
            }
            6 => {
                let req = LabelActionRequest {
                    label_id: prompt::text("Label ID")?,
                    chat_jid: prompt::text("Chat JID")?,
                    action: prompt::choose_value("Action", &["add", "remove"])?,
                };
                run_call("Applying...", || api.assign_label(iid, &req))?;
            }
            7 => run_call("Loading...", || api.get_auto_label_rules(iid))?,
            8 => {
                let mut rules = Vec::new();
                loop {
                    rules.push(AutoLabelRule {
                        label_id: prompt::text("Label ID")?,
                        keywords: prompt::list("Keywords")?,
                    });
                    if !prompt::confirm("Add another rule?", false)? {
                        break;
                    }
                }
                print_info(&format!("Replacing rule set with {} rule(s)", rules.len()));
                run_call("Saving...", || api.set_auto_label_rules(iid, &rules))?;
            }
            _ => return Ok(()),
        }
        pause()?;
    }
}
