//! The fitness coach
//!
//! A chat turn loads the history and the user context the message asks
//! for, optionally researches the topic, and asks the language model. With
//! no model configured the coach answers from keyword replies.

pub mod canned;
pub mod context;
pub mod prompt;

use crate::clients::LanguageModel;
use crate::config::CoachConfig;
use crate::error::ApiError;
use crate::reply::Reply;
use crate::services::ResearchService;
use crate::store::{ConversationStore, FitnessDataStore};
use crate::telemetry;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;
use workout_buddy_shared::format::truncate_chars;
use workout_buddy_shared::types::{
    ChatHistoryResponse, ChatRequest, ChatResponse, ClearHistoryResponse, Role,
};
use workout_buddy_shared::workout::{compile_sources, Source};
use workout_buddy_shared::UserId;

use canned::{canned_reply, MOCK_TOOL};
use context::ContextNeeds;
use prompt::{build_prompt, SYSTEM_PROMPT};

/// Apology sent when a chat turn cannot be answered
pub const CHAT_UNAVAILABLE: &str = "I'm having trouble right now. Please try again in a moment.";

pub const RESEARCH_TOOL: &str = "web_research";

/// Characters of the message used as a research query
const RESEARCH_QUERY_CHARS: usize = 200;

/// A successful answer before it is stored
#[derive(Debug, Clone)]
struct Answer {
    text: String,
    sources: Vec<Source>,
    tools_used: Vec<String>,
}

/// Coach over the data store, chat history and external clients
#[derive(Clone)]
pub struct FitnessCoach {
    store: Arc<dyn FitnessDataStore>,
    conversations: Arc<dyn ConversationStore>,
    llm: Option<Arc<dyn LanguageModel>>,
    research: ResearchService,
    config: CoachConfig,
}

impl FitnessCoach {
    pub fn new(
        store: Arc<dyn FitnessDataStore>,
        conversations: Arc<dyn ConversationStore>,
        llm: Option<Arc<dyn LanguageModel>>,
        research: ResearchService,
        config: CoachConfig,
    ) -> Self {
        if llm.is_none() {
            warn!("No language model configured - coach will use canned responses");
        }
        Self {
            store,
            conversations,
            llm,
            research,
            config,
        }
    }

    pub fn llm_configured(&self) -> bool {
        self.llm.is_some()
    }

    /// Answer one message; failures become an apology with `error` set
    pub async fn chat(
        &self,
        request: &ChatRequest,
        today: NaiveDate,
    ) -> Result<ChatResponse, ApiError> {
        request.validate()?;
        telemetry::coach_request("chat");

        let user_id = &request.user_id;
        let conversation_id = request
            .conversation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        info!(
            user_id = %user_id,
            conversation_id = %conversation_id,
            message = %truncate_chars(&request.message, 50),
            "Chat request"
        );

        let reply = self
            .respond(user_id, &conversation_id, &request.message, today)
            .await;

        let response = match reply {
            Reply::Complete(answer) => {
                self.persist(&conversation_id, user_id, &request.message, &answer)
                    .await;
                ChatResponse {
                    message: answer.text,
                    sources: answer.sources,
                    tools_used: answer.tools_used,
                    conversation_id,
                    error: None,
                }
            }
            Reply::Degraded { message, reason } => {
                telemetry::coach_degraded("chat");
                ChatResponse {
                    message,
                    sources: Vec::new(),
                    tools_used: Vec::new(),
                    conversation_id,
                    error: Some(reason),
                }
            }
        };
        Ok(response)
    }

    async fn respond(
        &self,
        user_id: &UserId,
        conversation_id: &str,
        message: &str,
        today: NaiveDate,
    ) -> Reply<Answer> {
        let needs = ContextNeeds::from_message(message);
        let loaded = tokio::try_join!(
            context::gather(self.store.as_ref(), user_id, needs, today),
            self.conversations.history(conversation_id, user_id),
        );
        let (context, history) = match loaded {
            Ok(loaded) => loaded,
            Err(e) => {
                error!(user_id = %user_id, error = %e, "Failed to build chat context");
                return Reply::degraded(CHAT_UNAVAILABLE, e);
            }
        };

        let Some(llm) = self.llm.as_ref() else {
            return Reply::Complete(Answer {
                text: canned_reply(message, &context.summary),
                sources: Vec::new(),
                tools_used: vec![MOCK_TOOL.to_string()],
            });
        };

        let mut tools_used = context.tools_used();
        let research = if needs.research {
            self.research
                .research_topic(
                    &truncate_chars(message, RESEARCH_QUERY_CHARS),
                    "exercise science evidence",
                )
                .await
        } else {
            Vec::new()
        };
        if !research.is_empty() {
            tools_used.push(RESEARCH_TOOL.to_string());
        }

        let prompt = build_prompt(
            message,
            &context,
            &history,
            self.config.history_window,
            &research,
        );

        match llm.generate(SYSTEM_PROMPT, &prompt).await {
            Ok(text) => Reply::Complete(Answer {
                text,
                sources: compile_sources(&research),
                tools_used,
            }),
            Err(e) => {
                error!(user_id = %user_id, provider = llm.name(), error = %e, "Generation failed");
                Reply::degraded(CHAT_UNAVAILABLE, e)
            }
        }
    }

    async fn persist(
        &self,
        conversation_id: &str,
        user_id: &UserId,
        message: &str,
        answer: &Answer,
    ) {
        let saved = async {
            self.conversations
                .append(
                    conversation_id,
                    user_id,
                    Role::User,
                    message,
                    serde_json::json!({}),
                )
                .await?;
            self.conversations
                .append(
                    conversation_id,
                    user_id,
                    Role::Assistant,
                    &answer.text,
                    serde_json::json!({
                        "tools_used": answer.tools_used,
                        "sources": answer.sources,
                    }),
                )
                .await
        }
        .await;

        if let Err(e) = saved {
            warn!(conversation_id, error = %e, "Failed to save chat turn");
        }
    }

    pub async fn history(
        &self,
        conversation_id: &str,
        user_id: &UserId,
    ) -> Result<ChatHistoryResponse, ApiError> {
        let messages = self
            .conversations
            .history(conversation_id, user_id)
            .await
            .map_err(ApiError::Internal)?;
        Ok(ChatHistoryResponse {
            conversation_id: conversation_id.to_string(),
            user_id: user_id.clone(),
            messages,
        })
    }

    pub async fn clear(
        &self,
        conversation_id: &str,
        user_id: &UserId,
    ) -> Result<ClearHistoryResponse, ApiError> {
        let deleted = self
            .conversations
            .clear(conversation_id, user_id)
            .await
            .map_err(ApiError::Internal)?;
        info!(conversation_id, user_id = %user_id, deleted, "Chat history cleared");
        Ok(ClearHistoryResponse {
            success: true,
            message: if deleted {
                "Chat history cleared".to_string()
            } else {
                "No chat history found".to_string()
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{ClientError, SearchProvider};
    use crate::store::{FixtureDataStore, InMemoryConversationStore};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use workout_buddy_shared::workout::ResearchResult;

    #[derive(Default)]
    struct RecordingModel {
        prompts: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl LanguageModel for RecordingModel {
        async fn generate(&self, _system: &str, prompt: &str) -> Result<String, ClientError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.fail {
                return Err(ClientError::EmptyResponse("recording"));
            }
            Ok("Keep it up!".to_string())
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    struct OneHit;

    #[async_trait]
    impl SearchProvider for OneHit {
        async fn search(&self, _query: &str) -> Result<Vec<ResearchResult>, ClientError> {
            Ok(vec![ResearchResult {
                title: "Recovery science".to_string(),
                snippet: "Sleep matters".to_string(),
                link: "https://www.nih.gov/recovery".to_string(),
            }])
        }

        fn name(&self) -> &'static str {
            "one-hit"
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn request(message: &str, conversation_id: Option<&str>) -> ChatRequest {
        ChatRequest {
            user_id: UserId::parse("1").unwrap(),
            message: message.to_string(),
            conversation_id: conversation_id.map(str::to_string),
        }
    }

    fn coach(
        store: FixtureDataStore,
        llm: Option<Arc<dyn LanguageModel>>,
        research: ResearchService,
    ) -> FitnessCoach {
        FitnessCoach::new(
            Arc::new(store),
            Arc::new(InMemoryConversationStore::new()),
            llm,
            research,
            CoachConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_canned_reply_without_model() {
        let coach = coach(FixtureDataStore::new(today()), None, ResearchService::default());
        let response = coach
            .chat(&request("How am I doing?", None), today())
            .await
            .unwrap();

        assert!(response.message.contains("8,300/day"));
        assert_eq!(response.tools_used, vec![MOCK_TOOL]);
        assert!(response.error.is_none());
        assert!(Uuid::parse_str(&response.conversation_id).is_ok());
    }

    #[tokio::test]
    async fn test_turns_are_stored_and_replayed() {
        let model = Arc::new(RecordingModel::default());
        let llm: Arc<dyn LanguageModel> = model.clone();
        let coach = coach(FixtureDataStore::new(today()), Some(llm), ResearchService::default());

        coach
            .chat(&request("first question", Some("c1")), today())
            .await
            .unwrap();
        let response = coach
            .chat(&request("second question", Some("c1")), today())
            .await
            .unwrap();
        assert_eq!(response.message, "Keep it up!");
        assert_eq!(response.conversation_id, "c1");

        let prompts = model.prompts.lock().unwrap();
        assert!(!prompts[0].contains("## Conversation History"));
        assert!(prompts[1].contains("**User**: first question"));
        assert!(prompts[1].contains("**Assistant**: Keep it up!"));
        drop(prompts);

        let user = UserId::parse("1").unwrap();
        let history = coach.history("c1", &user).await.unwrap();
        assert_eq!(history.messages.len(), 4);
        assert_eq!(history.messages[0].role, Role::User);

        let cleared = coach.clear("c1", &user).await.unwrap();
        assert!(cleared.success);
        assert!(coach.history("c1", &user).await.unwrap().messages.is_empty());
    }

    #[tokio::test]
    async fn test_research_adds_sources() {
        let search: Arc<dyn SearchProvider> = Arc::new(OneHit);
        let model: Arc<dyn LanguageModel> = Arc::new(RecordingModel::default());
        let coach = coach(
            FixtureDataStore::new(today()),
            Some(model),
            ResearchService::new(Some(search)),
        );
        let response = coach
            .chat(&request("What does research say about recovery?", None), today())
            .await
            .unwrap();
        assert!(response.tools_used.contains(&RESEARCH_TOOL.to_string()));
        assert_eq!(response.sources.len(), 1);
        assert_eq!(response.sources[0].url, "https://www.nih.gov/recovery");
    }

    #[tokio::test]
    async fn test_model_failure_degrades() {
        let model: Arc<dyn LanguageModel> = Arc::new(RecordingModel {
            fail: true,
            ..Default::default()
        });
        let coach = coach(FixtureDataStore::new(today()), Some(model), ResearchService::default());
        let response = coach.chat(&request("hello", Some("c2")), today()).await.unwrap();

        assert_eq!(response.message, CHAT_UNAVAILABLE);
        assert!(response.error.unwrap().contains("no content"));
        let user = UserId::parse("1").unwrap();
        assert!(coach.history("c2", &user).await.unwrap().messages.is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_degrades() {
        let user = UserId::parse("1").unwrap();
        let coach = coach(
            FixtureDataStore::new(today()).with_failing_user(user),
            None,
            ResearchService::default(),
        );
        let response = coach.chat(&request("hello", None), today()).await.unwrap();
        assert_eq!(response.message, CHAT_UNAVAILABLE);
        assert!(response.error.is_some());
    }

    #[tokio::test]
    async fn test_empty_message_rejected() {
        let coach = coach(FixtureDataStore::new(today()), None, ResearchService::default());
        let err = coach.chat(&request("", None), today()).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidField { ref field, .. } if field == "message"));
    }
}
