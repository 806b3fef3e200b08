//! Chat turns exchanged with a provider

use serde::{Deserialize, Serialize};

/// Who authored a turn
///
/// System instructions are not a turn; they travel in
/// [`CompletionRequest::system`](crate::CompletionRequest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One plain-text chat turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// The content, or `None` for an empty turn
    pub fn text(&self) -> Option<&str> {
        Some(self.content.as_str()).filter(|content| !content.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_turn_has_no_text() {
        assert_eq!(Message::assistant("").text(), None);
        assert_eq!(Message::user("AAPL news").text(), Some("AAPL news"));
    }

    #[test]
    fn test_role_wire_names() {
        let value = serde_json::to_value(Message::assistant("{}")).unwrap();
        assert_eq!(value["role"], "assistant");
        assert_eq!(Role::User.as_str(), "user");
    }
}
