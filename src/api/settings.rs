// Account-level settings and side channels: privacy, calls, presence,
// status posts, newsletters, history sync and the webhook.

use super::*;

fn newsletter_path(instance_id: &str, jid: &str, suffix: &str) -> String {
    instance_path(instance_id, &format!("/newsletters/{}{}", segment(jid), suffix))
}

impl ApiClient {
    pub fn get_privacy(&self, instance_id: &str) -> ApiResult {
        self.get(&instance_path(instance_id, "/privacy"))
    }

    pub fn update_privacy(&self, instance_id: &str, req: &PrivacyUpdateRequest) -> ApiResult {
        self.put(&instance_path(instance_id, "/privacy"), req)
    }

    pub fn get_call_settings(&self, instance_id: &str) -> ApiResult {
        self.get(&instance_path(instance_id, "/calls/settings"))
    }

    pub fn update_call_settings(&self, instance_id: &str, settings: &CallSettings) -> ApiResult {
        self.put(&instance_path(instance_id, "/calls/settings"), settings)
    }

    pub fn start_presence(&self, instance_id: &str, req: &PresenceRequest) -> ApiResult {
        self.post(&instance_path(instance_id, "/presence/start"), req)
    }

    pub fn stop_presence(&self, instance_id: &str, phone: &str) -> ApiResult {
        let body = PhoneRequest { phone: phone.to_string() };
        self.post(&instance_path(instance_id, "/presence/stop"), &body)
    }

    /// Presence that the gateway clears by itself after `duration` ms.
    pub fn timed_presence(&self, instance_id: &str, req: &PresenceRequest) -> ApiResult {
        self.post(&instance_path(instance_id, "/presence/timed"), req)
    }

    pub fn set_presence_status(&self, instance_id: &str, status: &str) -> ApiResult {
        let body = PresenceStatusRequest {
            status: status.to_string(),
        };
        self.post(&instance_path(instance_id, "/presence/status"), &body)
    }

    pub fn publish_status(&self, instance_id: &str, req: &PublishStatusRequest) -> ApiResult {
        self.post(&instance_path(instance_id, "/status"), req)
    }

    pub fn status_privacy(&self, instance_id: &str) -> ApiResult {
        self.get(&instance_path(instance_id, "/status/privacy"))
    }

    pub fn list_newsletters(&self, instance_id: &str) -> ApiResult {
        self.get(&instance_path(instance_id, "/newsletters"))
    }

    pub fn create_newsletter(&self, instance_id: &str, req: &CreateNewsletterRequest) -> ApiResult {
        self.post(&instance_path(instance_id, "/newsletters"), req)
    }

    pub fn newsletter_info(&self, instance_id: &str, jid: &str) -> ApiResult {
        self.get(&newsletter_path(instance_id, jid, ""))
    }

    pub fn follow_newsletter(&self, instance_id: &str, jid: &str) -> ApiResult {
        self.post_empty(&newsletter_path(instance_id, jid, "/follow"))
    }

    pub fn unfollow_newsletter(&self, instance_id: &str, jid: &str) -> ApiResult {
        self.post_empty(&newsletter_path(instance_id, jid, "/unfollow"))
    }

    pub fn send_newsletter_message(
        &self,
        instance_id: &str,
        req: &NewsletterMessageRequest,
    ) -> ApiResult {
        self.post(&instance_path(instance_id, "/newsletters/send"), req)
    }

    /// Kick off a background history sync.
    pub fn start_sync(&self, instance_id: &str, options: &SyncOptions) -> ApiResult {
        self.post(&instance_path(instance_id, "/sync"), options)
    }

    pub fn sync_progress(&self, instance_id: &str) -> ApiResult {
        self.get(&instance_path(instance_id, "/sync/progress"))
    }

    pub fn cancel_sync(&self, instance_id: &str) -> ApiResult {
        self.delete(&instance_path(instance_id, "/sync"))
    }

    pub fn get_webhook(&self, instance_id: &str) -> ApiResult {
        self.get(&instance_path(instance_id, "/webhook"))
    }

    pub fn set_webhook(&self, instance_id: &str, req: &WebhookRequest) -> ApiResult {
        self.post(&instance_path(instance_id, "/webhook"), req)
    }

    pub fn delete_webhook(&self, instance_id: &str) -> ApiResult {
        self.delete(&instance_path(instance_id, "/webhook"))
    }
}
