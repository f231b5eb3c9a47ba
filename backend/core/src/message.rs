use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which side of the conversation produced a turn.
///
/// The visible thread has exactly two sides — there is no system or tool
/// role; persona instructions travel out-of-band in the session spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Model,
}

/// One conversational turn in the companion thread.
///
/// The history is an append-only ordered sequence of these; nothing edits
/// or deletes a turn once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub text: String,
    /// Base64 image payload attached by the user, if any. Carried in the
    /// schema but not consulted by the mood rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Build a user turn with a fresh id and the current instant.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::User,
            text: text.into(),
            image: None,
            timestamp: Utc::now(),
        }
    }

    /// Build a model turn with a fresh id and the current instant.
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::Model,
            text: text.into(),
            image: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_serialization_roundtrip() {
        let msg = Message::user("Oi, tudo bem?");
        let json = serde_json::to_string(&msg).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(msg, back);
    }

    #[test]
    fn test_image_field_omitted_when_absent() {
        let msg = Message::model("Oi!");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(!json.contains("image"));

        let with_image = Message::user("olha essa foto").with_image("aGVsbG8=");
        let json = serde_json::to_string(&with_image).unwrap();
        assert!(json.contains("\"image\":\"aGVsbG8=\""));
    }

    #[test]
    fn test_role_tags_are_snake_case() {
        let json = serde_json::to_string(&Role::User).unwrap();
        assert_eq!(json, "\"user\"");
        let json = serde_json::to_string(&Role::Model).unwrap();
        assert_eq!(json, "\"model\"");
    }

    #[test]
    fn test_fresh_ids_never_collide_in_sequence() {
        let a = Message::user("a");
        let b = Message::user("b");
        assert_ne!(a.id, b.id);
        assert!(b.timestamp >= a.timestamp);
    }
}
