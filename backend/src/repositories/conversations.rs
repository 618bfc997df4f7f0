//! Conversation repository
//!
//! Chat history lives in the `conversations` and `conversation_messages`
//! tables created by this service's migrations.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use workout_buddy_shared::types::{ChatMessage, Role};
use workout_buddy_shared::UserId;

/// Stored chat message
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MessageRecord {
    pub id: i64,
    pub role: String,
    pub content: String,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl From<MessageRecord> for ChatMessage {
    fn from(record: MessageRecord) -> Self {
        ChatMessage {
            role: Role::from_stored(&record.role),
            content: record.content,
            metadata: record.metadata,
            created_at: record.created_at,
        }
    }
}

/// Conversation repository
pub struct ConversationRepository;

impl ConversationRepository {
    /// Append a message, creating the conversation on first use
    ///
    /// A conversation id already owned by another user is left untouched
    /// and the message is rejected.
    pub async fn append(
        pool: &PgPool,
        conversation_id: &str,
        user_id: &UserId,
        role: Role,
        content: &str,
        metadata: serde_json::Value,
    ) -> Result<()> {
        let mut tx = pool.begin().await?;

        let owner: (String,) = sqlx::query_as(
            r#"
            INSERT INTO conversations (id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET updated_at = NOW()
            RETURNING user_id
            "#,
        )
        .bind(conversation_id)
        .bind(user_id.as_str())
        .fetch_one(&mut *tx)
        .await?;

        if owner.0 != user_id.as_str() {
            anyhow::bail!("conversation {} belongs to another user", conversation_id);
        }

        sqlx::query(
            r#"
            INSERT INTO conversation_messages (conversation_id, role, content, metadata)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(conversation_id)
        .bind(role.as_str())
        .bind(content)
        .bind(metadata)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Messages of a conversation, oldest first
    pub async fn get_messages(
        pool: &PgPool,
        conversation_id: &str,
        user_id: &UserId,
    ) -> Result<Vec<MessageRecord>> {
        let records = sqlx::query_as::<_, MessageRecord>(
            r#"
            SELECT m.id, m.role, m.content, m.metadata, m.created_at
            FROM conversation_messages m
            JOIN conversations c ON c.id = m.conversation_id
            WHERE c.id = $1 AND c.user_id = $2
            ORDER BY m.id ASC
            "#,
        )
        .bind(conversation_id)
        .bind(user_id.as_str())
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Delete a conversation and its messages; returns whether it existed
    pub async fn delete(pool: &PgPool, conversation_id: &str, user_id: &UserId) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM conversations
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(conversation_id)
        .bind(user_id.as_str())
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_into_message() {
        let record = MessageRecord {
            id: 1,
            role: "assistant".to_string(),
            content: "Keep it up!".to_string(),
            metadata: serde_json::json!({"tools_used": ["get_fitness_data"]}),
            created_at: Utc::now(),
        };
        let message = ChatMessage::from(record);
        assert_eq!(message.role, Role::Assistant);
        assert_eq!(message.content, "Keep it up!");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn test_append_and_delete_against_database() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = PgPool::connect(&url).await.unwrap();
        let user = UserId::parse("repo-test-user").unwrap();
        let conversation = uuid::Uuid::new_v4().to_string();

        ConversationRepository::append(
            &pool,
            &conversation,
            &user,
            Role::User,
            "hello",
            serde_json::json!({}),
        )
        .await
        .unwrap();

        let messages = ConversationRepository::get_messages(&pool, &conversation, &user)
            .await
            .unwrap();
        assert_eq!(messages.len(), 1);

        assert!(ConversationRepository::delete(&pool, &conversation, &user)
            .await
            .unwrap());
    }
}
