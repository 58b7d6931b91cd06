// Request payloads and the few response shapes the shell reads. Field
// names mirror the gateway's JSON.

use serde::{Deserialize, Serialize};

/// One gateway instance as returned by `GET /instances`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Instance {
    pub instance_id: String,
    #[serde(default)]
    pub jid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub sync_history: bool,
}

/// Progress of a history sync (`GET .../sync/progress`).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncProgress {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub total_chats: u64,
    #[serde(default)]
    pub processed_chats: u64,
    #[serde(default)]
    pub total_messages: u64,
    #[serde(default)]
    pub synced_messages: u64,
    #[serde(default)]
    pub current_chat: String,
    #[serde(default)]
    pub error: Option<String>,
}

impl SyncProgress {
    pub fn is_finished(&self) -> bool {
        matches!(self.status.as_str(), "completed" | "failed" | "cancelled")
    }
}

// -- Instances --

#[derive(Serialize, Debug)]
pub struct CreateInstanceRequest {
    pub instance_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    pub sync_history: bool,
}

// -- Messages --

#[derive(Serialize, Debug)]
pub struct SendTextRequest {
    pub phone: String,
    pub message: String,
}

#[derive(Serialize, Debug)]
pub struct SendTextWithTypingRequest {
    pub phone: String,
    pub message: String,
    /// Milliseconds; the gateway derives one from the text length if absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typing_duration: Option<u32>,
}

/// Image, video, audio and document messages share this body.
#[derive(Serialize, Debug, Default)]
pub struct SendMediaRequest {
    pub phone: String,
    pub media_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct SendLocationRequest {
    pub phone: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct SendContactRequest {
    pub phone: String,
    pub display_name: String,
    pub vcard: String,
}

#[derive(Serialize, Debug)]
pub struct CreatePollRequest {
    pub phone: String,
    pub question: String,
    pub options: Vec<String>,
    /// 0 means single choice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selectable_count: Option<u32>,
}

#[derive(Serialize, Debug)]
pub struct VotePollRequest {
    pub phone: String,
    pub message_id: String,
    pub option_names: Vec<String>,
}

#[derive(Serialize, Debug)]
pub struct ReactionRequest {
    pub phone: String,
    pub message_id: String,
    /// Empty string removes the reaction.
    pub emoji: String,
}

#[derive(Serialize, Debug)]
pub struct MessageRefRequest {
    pub phone: String,
    pub message_id: String,
}

#[derive(Serialize, Debug)]
pub struct EditMessageRequest {
    pub phone: String,
    pub message_id: String,
    pub new_text: String,
}

#[derive(Serialize, Debug)]
pub struct MarkAsReadRequest {
    pub message_id: String,
    pub chat_jid: String,
    pub sender_jid: String,
    pub timestamp: i64,
}

// -- Contacts --

#[derive(Serialize, Debug)]
pub struct PhonesRequest {
    pub phones: Vec<String>,
}

#[derive(Serialize, Debug)]
pub struct PhoneRequest {
    pub phone: String,
}

// -- Groups --

#[derive(Serialize, Debug)]
pub struct CreateGroupRequest {
    pub name: String,
    pub participants: Vec<String>,
}

#[derive(Serialize, Debug, Default)]
pub struct UpdateGroupRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct ParticipantsRequest {
    pub participants: Vec<String>,
}

#[derive(Serialize, Debug)]
pub struct JoinGroupRequest {
    pub invite_code: String,
}

/// Only the fields that are `Some` are changed.
#[derive(Serialize, Debug, Default)]
pub struct GroupSettingsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_announce: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_ephemeral: Option<bool>,
    /// Seconds, 0 disables disappearing messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disappearing_timer: Option<i64>,
}

// -- Automation & business --

#[derive(Serialize, Debug)]
pub struct BulkMessageRequest {
    pub phones: Vec<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    /// Milliseconds between recipients.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_delay: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_delay: Option<u32>,
}

#[derive(Serialize, Debug)]
pub struct ScheduleMessageRequest {
    pub phone: String,
    pub message: String,
    /// Unix timestamp, seconds.
    pub execute_at: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoReplyConfig {
    pub enabled: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trigger_keywords: Vec<String>,
    /// `contains`, `exact` or `startswith`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_type: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct CreateLabelRequest {
    pub name: String,
    /// Palette index, usually 0-19.
    pub color: i32,
}

#[derive(Serialize, Debug)]
pub struct LabelActionRequest {
    pub label_id: String,
    pub chat_jid: String,
    /// `add` or `remove`.
    pub action: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AutoLabelRule {
    pub keywords: Vec<String>,
    pub label_id: String,
}

// -- Privacy, calls, presence, status posts --

#[derive(Serialize, Debug)]
pub struct PrivacyUpdateRequest {
    /// `last_seen`, `profile_photo`, `status`, `read_receipts`, `groups`
    /// or `default_timer`.
    pub category: String,
    pub value: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CallSettings {
    pub auto_reject: bool,
    pub auto_reply_enabled: bool,
    pub auto_reply_message: String,
    /// Seconds before rejecting.
    pub reject_delay: u32,
}

#[derive(Serialize, Debug)]
pub struct PresenceRequest {
    pub phone: String,
    /// `typing` or `recording`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Milliseconds, timed presence only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

#[derive(Serialize, Debug)]
pub struct PresenceStatusRequest {
    /// `available` or `unavailable`.
    pub status: String,
}

#[derive(Serialize, Debug, Default)]
pub struct PublishStatusRequest {
    /// `text`, `image` or `video`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<i32>,
}

// -- Newsletters, sync, webhook --

#[derive(Serialize, Debug)]
pub struct CreateNewsletterRequest {
    pub name: String,
    pub description: String,
}

#[derive(Serialize, Debug)]
pub struct NewsletterMessageRequest {
    pub jid: String,
    pub message: String,
    /// `text`, `image` or `video`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    pub messages_per_chat: u32,
    /// 0 syncs every chat.
    pub max_chats: u32,
    pub advanced: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            messages_per_chat: 50,
            max_chats: 20,
            advanced: false,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct WebhookRequest {
    pub url: String,
    /// `message`, `status`, `receipt`, ...
    pub events: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    pub enabled: bool,
}

/// Split a comma separated prompt answer into trimmed, non-empty items.
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}
