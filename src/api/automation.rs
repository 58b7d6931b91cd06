// Automation (bulk send, scheduling, auto-reply) and business tools
// (labels, auto-label rules).

use super::*;

impl ApiClient {
    /// Fan one message out to many recipients; the gateway paces the
    /// sends between `min_delay` and `max_delay`.
    pub fn bulk_message(&self, instance_id: &str, req: &BulkMessageRequest) -> ApiResult {
        self.post(&instance_path(instance_id, "/automation/bulk-message"), req)
    }

    pub fn schedule_message(&self, instance_id: &str, req: &ScheduleMessageRequest) -> ApiResult {
        self.post(&instance_path(instance_id, "/automation/schedule-message"), req)
    }

    pub fn get_auto_reply(&self, instance_id: &str) -> ApiResult {
        self.get(&instance_path(instance_id, "/automation/auto-reply"))
    }

    pub fn set_auto_reply(&self, instance_id: &str, config: &AutoReplyConfig) -> ApiResult {
        self.post(&instance_path(instance_id, "/automation/auto-reply"), config)
    }

    pub fn business_profile(&self, instance_id: &str) -> ApiResult {
        self.get(&instance_path(instance_id, "/business/profile"))
    }

    pub fn create_label(&self, instance_id: &str, req: &CreateLabelRequest) -> ApiResult {
        self.post(&instance_path(instance_id, "/business/labels"), req)
    }

    pub fn assign_label(&self, instance_id: &str, req: &LabelActionRequest) -> ApiResult {
        self.post(&instance_path(instance_id, "/business/labels/assign"), req)
    }

    pub fn get_auto_label_rules(&self, instance_id: &str) -> ApiResult {
        self.get(&instance_path(instance_id, "/business/autolabel/rules"))
    }

    /// Replaces the whole rule set.
    pub fn set_auto_label_rules(&self, instance_id: &str, rules: &[AutoLabelRule]) -> ApiResult {
        self.post(&instance_path(instance_id, "/business/autolabel/rules"), rules)
    }
}
