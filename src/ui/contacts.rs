use anyhow::Result;

use super::output::{pause, print_header, run_call};
use super::prompt;
use crate::api::ApiClient;

const ITEMS: &[&str] = &[
    "List contacts",
    "Contact info",
    "About / status text",
    "Check numbers",
    "Profile picture",
    "Block contact",
    "Unblock contact",
    "Blocklist",
    "Subscribe to presence",
    "Back",
];

pub fn menu(api: &ApiClient, iid: &str) -> Result<()> {
    loop {
        print_header(&format!("CONTACTS ({})", iid));
        match prompt::choose("Option", ITEMS)? {
            0 => run_call("Loading contacts...", || api.list_contacts(iid))?,
            1 => {
                let phone = prompt::text("Phone")?;
                run_call("Loading...", || api.contact_info(iid, &phone))?;
            }
            2 => {
                let phone = prompt::text("Phone")?;
                run_call("Loading...", || api.contact_about(iid, &phone))?;
            }
            3 => {
                let phones = prompt::list("Numbers")?;
                run_call("Checking...", || api.check_contacts(iid, phones))?;
            }
            4 => {
                let phone = prompt::text("Phone")?;
                run_call("Loading...", || api.profile_picture(iid, &phone))?;
            }
            5 => {
                let phone = prompt::text("Phone")?;
                run_call("Blocking...", || api.block_contact(iid, &phone))?;
            }
            6 => {
                let phone = prompt::text("Phone")?;
                run_call("Unblocking...", || api.unblock_contact(iid, &phone))?;
            }
            7 => run_call("Loading blocklist...", || api.blocklist(iid))?,
            8 => {
                let phone = prompt::text("Phone")?;
                run_call("Subscribing...", || api.subscribe_presence(iid, &phone))?;
            }
            _ => return Ok(()),
        }
        pause()?;
    }
}
