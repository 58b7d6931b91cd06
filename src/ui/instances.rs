use std::path::Path;

use anyhow::Result;
use crossterm::style::Stylize;

use super::output::{
    pause, pretty_print, print_error, print_header, print_info, run_call, show, with_spinner,
};
use super::prompt;
use super::qr::{open_image, save_qr_image, QR_FILENAME};
use crate::api::{ApiClient, CreateInstanceRequest};

const ITEMS: &[&str] = &[
    "List instances",
    "Create new",
    "Delete instance",
    "Connect / show QR",
    "Disconnect",
    "Detailed status",
    "Instance details",
    "Back",
];

pub fn menu(api: &ApiClient, active: &mut Option<String>) -> Result<()> {
    loop {
        print_header("INSTANCE MANAGEMENT");
        match prompt::choose("Option", ITEMS)? {
            0 => list(api)?,
            1 => {
                let req = CreateInstanceRequest {
                    instance_id: prompt::text("New instance ID")?,
                    webhook_url: prompt::optional("Webhook URL")?,
                    sync_history: prompt::confirm("Sync chat history on connect?", false)?,
                };
                let result = with_spinner("Creating...", || api.create_instance(&req))?;
                show(&result);
                if active.is_none() && result.as_ref().is_ok_and(|r| r.is_success()) {
                    *active = Some(req.instance_id);
                }
            }
            2 => {
                let iid = prompt::text("Instance ID to delete")?;
                if prompt::confirm(&format!("Really delete '{}'?", iid), false)? {
                    run_call("Deleting...", || api.delete_instance(&iid))?;
                    if active.as_deref() == Some(iid.as_str()) {
                        *active = None;
                    }
                }
            }
            3 => connect(api, &prompt::text_with("Instance ID", active.as_deref())?)?,
            4 => {
                let iid = prompt::text_with("Instance ID", active.as_deref())?;
                run_call("Disconnecting...", || api.disconnect_instance(&iid))?;
            }
            5 => {
                let iid = prompt::text_with("Instance ID", active.as_deref())?;
                run_call("Fetching status...", || api.get_status(&iid))?;
            }
            6 => {
                let iid = prompt::text_with("Instance ID", active.as_deref())?;
                run_call("Fetching instance...", || api.get_instance(&iid))?;
            }
            _ => return Ok(()),
        }
        pause()?;
    }
}

fn list(api: &ApiClient) -> Result<()> {
    match with_spinner("Loading instances...", || api.list_instances())? {
        Ok(list) if list.is_empty() => print_info("No instances yet."),
        Ok(list) => {
            for instance in list {
                let name = instance.name.unwrap_or_default();
                let id = format!("{:<20}", instance.instance_id);
                println!("  {} {:<14} {}", id.cyan(), instance.status, name);
            }
        }
        Err(e) => {
            print_error(&format!("Could not list instances: {}", e));
            pretty_print(&e.to_display_json());
        }
    }
    Ok(())
}

/// Connect, then fetch the QR code and open it when pairing is pending.
fn connect(api: &ApiClient, iid: &str) -> Result<()> {
    run_call("Connecting...", || api.connect_instance(iid))?;

    let result = with_spinner("Fetching QR...", || api.get_qr(iid))?;
    let qr = result
        .as_ref()
        .ok()
        .and_then(|resp| resp.str_field("qr_code"))
        .filter(|code| !code.is_empty());
    let Some(code) = qr else {
        show(&result);
        return Ok(());
    };

    let path = Path::new(QR_FILENAME);
    match save_qr_image(code, path) {
        Ok(()) => {
            print_info(&format!("QR saved to {}", QR_FILENAME));
            if !open_image(path) {
                print_info("No image viewer found; open the file manually.");
            }
        }
        Err(e) => print_error(&format!("Could not save the QR image: {:#}", e)),
    }
    Ok(())
}
