//! Fashion chat — replays the conversation and asks the model for the next reply.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::ai_client::prompts::STYLIST_PERSONA;
use crate::ai_client::{
    AiError, Content, GenerateContentRequest, GenerativeModel, Part, TEXT_MODEL,
};
use crate::assistant::prompts::{CHAT_REGIONAL_CONTEXT, CHAT_SYSTEM_TEMPLATE};

pub const EMPTY_REPLY: &str = "I'm having trouble analyzing that right now. Try asking again.";
pub const NETWORK_ERROR_REPLY: &str = "Network error. Please check your connection or API key.";
pub const GREETING: &str = "Hello! I'm Styllen. Are you looking for an outfit for a specific occasion, or do you need advice on a current trend?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// One turn of history as the view layer sends it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

fn system_instruction() -> String {
    CHAT_SYSTEM_TEMPLATE
        .replace("{persona}", STYLIST_PERSONA)
        .replace("{regional_context}", CHAT_REGIONAL_CONTEXT)
}

pub fn build_chat_request(history: &[ChatTurn], message: &str) -> GenerateContentRequest {
    let mut contents: Vec<Content> = history
        .iter()
        .map(|turn| Content::with_role(turn.role.as_str(), vec![Part::text(turn.text.clone())]))
        .collect();
    contents.push(Content::with_role("user", vec![Part::text(message)]));

    GenerateContentRequest {
        system_instruction: None,
        contents,
    }
    .with_system_instruction(&system_instruction())
}

/// Produces the assistant's reply. Failures come back as a fixed reply
/// text, never as an error.
pub async fn generate_fashion_advice(
    ai: &dyn GenerativeModel,
    history: &[ChatTurn],
    message: &str,
) -> ChatMessage {
    let request = build_chat_request(history, message);

    let text = match ai.generate_text(TEXT_MODEL, &request).await {
        Ok(text) => {
            info!("Chat reply generated ({} turns of history)", history.len());
            text
        }
        Err(AiError::EmptyContent) => EMPTY_REPLY.to_string(),
        Err(e) => {
            warn!("Chat error: {e}");
            NETWORK_ERROR_REPLY.to_string()
        }
    };

    ChatMessage::new(Role::Model, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai_client::testing::ScriptedModel;

    fn history() -> Vec<ChatTurn> {
        vec![
            ChatTurn {
                role: Role::Model,
                text: GREETING.to_string(),
            },
            ChatTurn {
                role: Role::User,
                text: "Something for a Diwali party".to_string(),
            },
            ChatTurn {
                role: Role::Model,
                text: "A silk kurta in deep maroon.".to_string(),
            },
        ]
    }

    #[test]
    fn test_request_replays_history_then_message() {
        let request = build_chat_request(&history(), "What shoes?");

        let roles: Vec<_> = request
            .contents
            .iter()
            .map(|c| c.role.as_deref().unwrap())
            .collect();
        assert_eq!(roles, vec!["model", "user", "model", "user"]);
        assert_eq!(
            request.contents[3].parts[0].text.as_deref(),
            Some("What shoes?")
        );

        let system = request.system_instruction.unwrap();
        let system_text = system.parts[0].text.as_deref().unwrap();
        assert!(system_text.starts_with(STYLIST_PERSONA));
        assert!(system_text.contains("Context: The user is in Hyderabad (warm climate)."));
        assert!(!system_text.contains("Location:"));
    }

    #[tokio::test]
    async fn test_reply_is_model_message() {
        let ai = ScriptedModel::new().reply_text(TEXT_MODEL, "Tan mojaris.");
        let reply = generate_fashion_advice(&ai, &history(), "What shoes?").await;
        assert_eq!(reply.role, Role::Model);
        assert_eq!(reply.text, "Tan mojaris.");
    }

    #[tokio::test]
    async fn test_empty_reply_uses_placeholder() {
        let ai = ScriptedModel::new().reply_text(TEXT_MODEL, "   ");
        let reply = generate_fashion_advice(&ai, &[], "Hi").await;
        assert_eq!(reply.text, EMPTY_REPLY);
    }

    #[tokio::test]
    async fn test_failure_uses_network_error_text() {
        let ai = ScriptedModel::new().fail(TEXT_MODEL);
        let reply = generate_fashion_advice(&ai, &[], "Hi").await;
        assert_eq!(reply.text, NETWORK_ERROR_REPLY);
    }

    #[test]
    fn test_turn_roles_deserialize_lowercase() {
        let turn: ChatTurn = serde_json::from_str(r#"{"role":"model","text":"hey"}"#).unwrap();
        assert_eq!(turn.role, Role::Model);
    }
}
