//! OpenAI chat history to Gemini `contents` mapping.
//!
//! The mapping is one content per message, in order. Gemini has no system or
//! assistant roles in `contents`, so `system` becomes `user` and `assistant`
//! becomes `model`.

use crate::gemini::{BackendRole, Content, GenerateContentRequest, Part};
use crate::models::{ChatMessage, Role};

impl From<&Role> for BackendRole {
    fn from(role: &Role) -> Self {
        match role {
            Role::Assistant => BackendRole::Model,
            Role::System | Role::User | Role::Other(_) => BackendRole::User,
        }
    }
}

impl From<&ChatMessage> for Content {
    fn from(message: &ChatMessage) -> Self {
        Content {
            role: BackendRole::from(&message.role),
            parts: vec![Part {
                text: message.content.clone(),
            }],
        }
    }
}

/// Builds the backend request for a full chat history.
pub fn map_messages(messages: &[ChatMessage]) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: messages.iter().map(Content::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn message(role: Role, content: &str) -> ChatMessage {
        ChatMessage {
            role,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_maps_roles_and_preserves_order() {
        let messages = vec![
            message(Role::System, "You are terse."),
            message(Role::User, "Hi"),
            message(Role::Assistant, "Hello."),
            message(Role::User, "What is 2+2?"),
        ];

        let request = map_messages(&messages);

        assert_eq!(request.contents.len(), messages.len());
        let mapped: Vec<(BackendRole, &str)> = request
            .contents
            .iter()
            .map(|c| (c.role, c.parts[0].text.as_str()))
            .collect();
        assert_eq!(
            mapped,
            vec![
                (BackendRole::User, "You are terse."),
                (BackendRole::User, "Hi"),
                (BackendRole::Model, "Hello."),
                (BackendRole::User, "What is 2+2?"),
            ]
        );
    }

    #[test]
    fn test_each_content_has_exactly_one_part() {
        let request = map_messages(&[message(Role::User, "line one\nline two")]);
        assert_eq!(request.contents[0].parts.len(), 1);
        assert_eq!(request.contents[0].parts[0].text, "line one\nline two");
    }

    #[test]
    fn test_consecutive_user_messages_are_not_merged() {
        let request = map_messages(&[message(Role::User, "a"), message(Role::User, "b")]);
        assert_eq!(request.contents.len(), 2);
    }

    #[test]
    fn test_unknown_roles_map_to_user() {
        let request = map_messages(&[message(Role::Other("tool".to_string()), "42")]);
        assert_eq!(request.contents[0].role, BackendRole::User);
    }

    #[test]
    fn test_empty_history_maps_to_empty_contents() {
        let request = map_messages(&[]);
        assert!(request.contents.is_empty());
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "contents": [] })
        );
    }
}
