use super::*;

fn groups_path(instance_id: &str, suffix: &str) -> String {
    instance_path(instance_id, &format!("/groups{}", suffix))
}

fn group_path(instance_id: &str, group_id: &str, suffix: &str) -> String {
    groups_path(instance_id, &format!("/{}{}", segment(group_id), suffix))
}

impl ApiClient {
    pub fn list_groups(&self, instance_id: &str) -> ApiResult {
        self.get(&groups_path(instance_id, ""))
    }

    pub fn create_group(&self, instance_id: &str, req: &CreateGroupRequest) -> ApiResult {
        self.post(&groups_path(instance_id, ""), req)
    }

    pub fn group_info(&self, instance_id: &str, group_id: &str) -> ApiResult {
        self.get(&group_path(instance_id, group_id, ""))
    }

    /// Rename and/or change the description.
    pub fn update_group(
        &self,
        instance_id: &str,
        group_id: &str,
        req: &UpdateGroupRequest,
    ) -> ApiResult {
        self.put(&group_path(instance_id, group_id, ""), req)
    }

    pub fn group_invite(&self, instance_id: &str, group_id: &str) -> ApiResult {
        self.get(&group_path(instance_id, group_id, "/invite"))
    }

    pub fn revoke_group_invite(&self, instance_id: &str, group_id: &str) -> ApiResult {
        self.post_empty(&group_path(instance_id, group_id, "/invite/revoke"))
    }

    /// Join through an invite code (the part after `chat.whatsapp.com/`).
    pub fn join_group(&self, instance_id: &str, invite_code: &str) -> ApiResult {
        let body = JoinGroupRequest {
            invite_code: invite_code.to_string(),
        };
        self.post(&groups_path(instance_id, "/join"), &body)
    }

    pub fn leave_group(&self, instance_id: &str, group_id: &str) -> ApiResult {
        self.post_empty(&group_path(instance_id, group_id, "/leave"))
    }

    pub fn add_participants(
        &self,
        instance_id: &str,
        group_id: &str,
        participants: Vec<String>,
    ) -> ApiResult {
        let body = ParticipantsRequest { participants };
        self.post(&group_path(instance_id, group_id, "/participants"), &body)
    }

    pub fn promote_admins(
        &self,
        instance_id: &str,
        group_id: &str,
        participants: Vec<String>,
    ) -> ApiResult {
        let body = ParticipantsRequest { participants };
        self.post(&group_path(instance_id, group_id, "/admins"), &body)
    }

    pub fn update_group_settings(
        &self,
        instance_id: &str,
        group_id: &str,
        req: &GroupSettingsRequest,
    ) -> ApiResult {
        self.put(&group_path(instance_id, group_id, "/settings"), req)
    }
}
