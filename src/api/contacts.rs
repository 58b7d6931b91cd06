use super::*;

fn contacts_path(instance_id: &str, suffix: &str) -> String {
    instance_path(instance_id, &format!("/contacts{}", suffix))
}

fn contact_path(instance_id: &str, phone: &str, suffix: &str) -> String {
    contacts_path(instance_id, &format!("/{}{}", segment(phone), suffix))
}

impl ApiClient {
    pub fn list_contacts(&self, instance_id: &str) -> ApiResult {
        self.get(&contacts_path(instance_id, ""))
    }

    /// Which of `phones` are registered on WhatsApp.
    pub fn check_contacts(&self, instance_id: &str, phones: Vec<String>) -> ApiResult {
        self.post(&contacts_path(instance_id, "/check"), &PhonesRequest { phones })
    }

    pub fn contact_info(&self, instance_id: &str, phone: &str) -> ApiResult {
        self.get(&contact_path(instance_id, phone, ""))
    }

    pub fn contact_about(&self, instance_id: &str, phone: &str) -> ApiResult {
        self.get(&contact_path(instance_id, phone, "/about"))
    }

    pub fn profile_picture(&self, instance_id: &str, phone: &str) -> ApiResult {
        self.get(&contact_path(instance_id, phone, "/profile-picture"))
    }

    pub fn block_contact(&self, instance_id: &str, phone: &str) -> ApiResult {
        let body = PhoneRequest { phone: phone.to_string() };
        self.post(&contacts_path(instance_id, "/block"), &body)
    }

    pub fn unblock_contact(&self, instance_id: &str, phone: &str) -> ApiResult {
        let body = PhoneRequest { phone: phone.to_string() };
        self.post(&contacts_path(instance_id, "/unblock"), &body)
    }

    pub fn blocklist(&self, instance_id: &str) -> ApiResult {
        self.get(&contacts_path(instance_id, "/blocklist"))
    }

    pub fn subscribe_presence(&self, instance_id: &str, phone: &str) -> ApiResult {
        let body = PhoneRequest { phone: phone.to_string() };
        self.post(&contacts_path(instance_id, "/presence/subscribe"), &body)
    }
}
