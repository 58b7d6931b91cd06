// Messaging endpoints under `/instances/{id}/messages/...`.

use super::*;

fn message_path(instance_id: &str, kind: &str) -> String {
    instance_path(instance_id, &format!("/messages/{}", kind))
}

impl ApiClient {
    pub fn send_text(&self, instance_id: &str, req: &SendTextRequest) -> ApiResult {
        self.post(&message_path(instance_id, "text"), req)
    }

    pub fn send_text_with_typing(
        &self,
        instance_id: &str,
        req: &SendTextWithTypingRequest,
    ) -> ApiResult {
        self.post(&message_path(instance_id, "text-with-typing"), req)
    }

    pub fn send_image(&self, instance_id: &str, req: &SendMediaRequest) -> ApiResult {
        self.post(&message_path(instance_id, "image"), req)
    }

    pub fn send_video(&self, instance_id: &str, req: &SendMediaRequest) -> ApiResult {
        self.post(&message_path(instance_id, "video"), req)
    }

    pub fn send_audio(&self, instance_id: &str, req: &SendMediaRequest) -> ApiResult {
        self.post(&message_path(instance_id, "audio"), req)
    }

    pub fn send_document(&self, instance_id: &str, req: &SendMediaRequest) -> ApiResult {
        self.post(&message_path(instance_id, "document"), req)
    }

    pub fn send_location(&self, instance_id: &str, req: &SendLocationRequest) -> ApiResult {
        self.post(&message_path(instance_id, "location"), req)
    }

    pub fn send_contact(&self, instance_id: &str, req: &SendContactRequest) -> ApiResult {
        self.post(&message_path(instance_id, "contact"), req)
    }

    pub fn send_poll(&self, instance_id: &str, req: &CreatePollRequest) -> ApiResult {
        self.post(&message_path(instance_id, "poll"), req)
    }

    pub fn vote_poll(&self, instance_id: &str, req: &VotePollRequest) -> ApiResult {
        self.post(&message_path(instance_id, "poll/vote"), req)
    }

    pub fn react(&self, instance_id: &str, req: &ReactionRequest) -> ApiResult {
        self.post(&message_path(instance_id, "react"), req)
    }

    /// Delete a sent message for everyone.
    pub fn revoke(&self, instance_id: &str, req: &MessageRefRequest) -> ApiResult {
        self.post(&message_path(instance_id, "revoke"), req)
    }

    pub fn edit(&self, instance_id: &str, req: &EditMessageRequest) -> ApiResult {
        self.post(&message_path(instance_id, "edit"), req)
    }

    pub fn mark_read(&self, instance_id: &str, req: &MarkAsReadRequest) -> ApiResult {
        self.post(&message_path(instance_id, "mark-read"), req)
    }
}
