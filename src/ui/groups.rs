use anyhow::Result;

use super::output::{pause, print_header, run_call};
use super::prompt;
use crate::api::{ApiClient, CreateGroupRequest, GroupSettingsRequest, UpdateGroupRequest};

const ITEMS: &[&str] = &[
    "List groups",
    "Group info",
    "Create group",
    "Rename / describe",
    "Invite link",
    "Revoke invite link",
    "Join by invite code",
    "Leave group",
    "Add participants",
    "Promote to admin",
    "Group settings",
    "Back",
];

pub fn menu(api: &ApiClient, iid: &str) -> Result<()> {
    loop {
        print_header(&format!("GROUPS ({})", iid));
        match prompt::choose("Option", ITEMS)? {
            0 => run_call("Loading groups...", || api.list_groups(iid))?,
            1 => {
                let gid = prompt::text("Group ID")?;
                run_call("Loading...", || api.group_info(iid, &gid))?;
            }
            2 => {
                let req = CreateGroupRequest {
                    name: prompt::text("Name")?,
                    participants: prompt::list("Participants")?,
                };
                run_call("Creating...", || api.create_group(iid, &req))?;
            }
            3 => {
                let gid = prompt::text("Group ID")?;
                let req = UpdateGroupRequest {
                    name: prompt::optional("New name")?,
                    description: prompt::optional("New description")?,
                };
                run_call("Updating...", || api.update_group(iid, &gid, &req))?;
            }
            4 => {
                let gid = prompt::text("Group ID")?;
                run_call("Loading...", || api.group_invite(iid, &gid))?;
            }
            5 => {
                let gid = prompt::text("Group ID")?;
                run_call("Revoking...", || api.revoke_group_invite(iid, &gid))?;
            }
            6 => {
                let code = prompt::text("Invite code")?;
                run_call("Joining...", || api.join_group(iid, &code))?;
            }
            7 => {
                let gid = prompt::text("Group ID")?;
                run_call("Leaving...", || api.leave_group(iid, &gid))?;
            }
            8 => {
                let gid = prompt::text("Group ID")?;
                let participants = prompt::list("Participants")?;
                run_call("Adding...", || api.add_participants(iid, &gid, participants))?;
            }
            9 => {
                let gid = prompt::text("Group ID")?;
                let participants = prompt::list("Participants")?;
                run_call("Promoting...", || api.promote_admins(iid, &gid, participants))?;
            }
            10 => {
                let gid = prompt::text("Group ID")?;
                let req = GroupSettingsRequest {
                    is_locked: prompt::tri_state("Only admins edit group info")?,
                    is_announce: prompt::tri_state("Only admins send messages")?,
                    is_ephemeral: prompt::tri_state("Disappearing messages")?,
                    disappearing_timer: prompt::optional_number("Disappearing timer in seconds")?,
                };
                run_call("Updating...", || api.update_group_settings(iid, &gid, &req))?;
            }
            _ => return Ok(()),
        }
        pause()?;
    }
}
