use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Venue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn display_name(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Assistant => "Sports Assistant",
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Assistant => write!(f, "assistant"),
        }
    }
}

/// One entry in a chat transcript. Fields are private so a message cannot be
/// edited once it has been appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    id: Uuid,
    sender: Sender,
    text: String,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    venues: Vec<Venue>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text.into(), Vec::new())
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text.into(), Vec::new())
    }

    pub fn assistant_with_venues(text: impl Into<String>, venues: Vec<Venue>) -> Self {
        Self::new(Sender::Assistant, text.into(), venues)
    }

    fn new(sender: Sender, text: String, venues: Vec<Venue>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            text,
            created_at: Utc::now(),
            venues,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    pub fn has_venues(&self) -> bool {
        !self.venues.is_empty()
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    /// Short clock time shown next to the sender name.
    pub fn time_label(&self) -> String {
        self.created_at
            .with_timezone(&chrono::Local)
            .format("%H:%M")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_display() {
        assert_eq!(Sender::User.to_string(), "user");
        assert_eq!(Sender::Assistant.to_string(), "assistant");
        assert_eq!(Sender::Assistant.display_name(), "Sports Assistant");
    }

    #[test]
    fn test_message_constructors() {
        let user = Message::user("Find cricket venues in Mumbai");
        assert!(user.is_user());
        assert_eq!(user.text(), "Find cricket venues in Mumbai");
        assert!(!user.has_venues());

        let reply = Message::assistant("Hello");
        assert_eq!(reply.sender(), Sender::Assistant);
        assert_ne!(user.id(), reply.id());
    }

    #[test]
    fn test_sender_serializes_snake_case() {
        let json = serde_json::to_string(&Sender::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }
}
