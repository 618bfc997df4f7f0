//! Process-local chat history

use super::ConversationStore;
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use workout_buddy_shared::types::{ChatMessage, Role};
use workout_buddy_shared::UserId;

struct Conversation {
    user_id: UserId,
    messages: Vec<ChatMessage>,
}

/// Conversation store kept in memory; lost on restart
#[derive(Default)]
pub struct InMemoryConversationStore {
    conversations: RwLock<HashMap<String, Conversation>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn append(
        &self,
        conversation_id: &str,
        user_id: &UserId,
        role: Role,
        content: &str,
        metadata: serde_json::Value,
    ) -> Result<()> {
        let mut conversations = self.conversations.write().await;
        let conversation = conversations
            .entry(conversation_id.to_string())
            .or_insert_with(|| Conversation {
                user_id: user_id.clone(),
                messages: Vec::new(),
            });

        if &conversation.user_id != user_id {
            anyhow::bail!("conversation {} belongs to another user", conversation_id);
        }

        conversation.messages.push(ChatMessage {
            role,
            content: content.to_string(),
            metadata,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn history(&self, conversation_id: &str, user_id: &UserId) -> Result<Vec<ChatMessage>> {
        let conversations = self.conversations.read().await;
        Ok(conversations
            .get(conversation_id)
            .filter(|c| &c.user_id == user_id)
            .map(|c| c.messages.clone())
            .unwrap_or_default())
    }

    async fn clear(&self, conversation_id: &str, user_id: &UserId) -> Result<bool> {
        let mut conversations = self.conversations.write().await;
        let owned = conversations
            .get(conversation_id)
            .is_some_and(|c| &c.user_id == user_id);
        if owned {
            conversations.remove(conversation_id);
        }
        Ok(owned)
    }
}
