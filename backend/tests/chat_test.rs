//! Integration tests for the chat endpoints

mod common;

use axum::http::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const APOLOGY: &str = "I'm having trouble right now. Please try again in a moment.";

fn gemini_reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
    }))
}

// ============================================================================
// Canned responses (no API key)
// ============================================================================

#[tokio::test]
async fn test_chat_without_api_key_uses_canned_reply() {
    let app = common::TestApp::new();

    let (status, body) = app
        .post_json("/chat", json!({"user_id": 1, "message": "How am I doing?"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("This Week's Stats"));
    assert_eq!(body["tools_used"], json!(["mock_response"]));
    assert!(body["conversation_id"].as_str().is_some());
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_chat_history_round_trip() {
    let app = common::TestApp::new();

    let (_, body) = app
        .post_json(
            "/chat",
            json!({"user_id": "7", "message": "workout ideas?", "conversation_id": "conv-1"}),
        )
        .await;
    assert_eq!(body["conversation_id"], "conv-1");

    let (status, history) = app.get_json("/chat/history/conv-1?user_id=7").await;
    assert_eq!(status, StatusCode::OK);
    let messages = history["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[0]["content"], "workout ideas?");
    assert_eq!(messages[1]["role"], "assistant");
    assert_eq!(messages[1]["metadata"]["tools_used"], json!(["mock_response"]));

    let (_, other_user) = app.get_json("/chat/history/conv-1?user_id=8").await;
    assert!(other_user["messages"].as_array().unwrap().is_empty());

    let (status, body) = app
        .delete("/chat/history?user_id=7&conversation_id=conv-1")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"success\":true"));

    let (_, history) = app.get_json("/chat/history/conv-1?user_id=7").await;
    assert!(history["messages"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_chat_rejects_empty_message() {
    let app = common::TestApp::new();

    let (status, body) = app
        .post_json("/chat", json!({"user_id": 1, "message": ""}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "message");
}

#[tokio::test]
async fn test_chat_degrades_when_store_fails() {
    let app = common::TestApp::new();

    let (status, body) = app
        .post_json(
            "/chat",
            json!({"user_id": common::FAILING_USER, "message": "hello"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], APOLOGY);
    assert!(body["error"].as_str().unwrap().contains("unavailable"));
}

// ============================================================================
// Gemini
// ============================================================================

#[tokio::test]
async fn test_chat_with_gemini() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-pro:generateContent"))
        .and(body_string_contains("## User Context"))
        .and(body_string_contains("Average Steps: 8,300/day"))
        .respond_with(gemini_reply("You averaged 8,300 steps. Nice work!"))
        .expect(1)
        .mount(&server)
        .await;

    let app = common::TestApp::builder().gemini(&server.uri()).build();
    let (status, body) = app
        .post_json("/chat", json!({"user_id": 1, "message": "How am I doing?"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "You averaged 8,300 steps. Nice work!");
    assert_eq!(body["tools_used"], json!(["fitness_summary"]));
}

#[tokio::test]
async fn test_chat_prompt_carries_goals_and_history() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("**Goals**"))
        .and(body_string_contains("**User**: first"))
        .respond_with(gemini_reply("Goal check"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(gemini_reply("Hello"))
        .mount(&server)
        .await;

    let app = common::TestApp::builder().gemini(&server.uri()).build();
    app.post_json(
        "/chat",
        json!({"user_id": 1, "message": "first", "conversation_id": "c"}),
    )
    .await;
    let (_, body) = app
        .post_json(
            "/chat",
            json!({"user_id": 1, "message": "what about my goal?", "conversation_id": "c"}),
        )
        .await;

    assert_eq!(body["message"], "Goal check");
    assert!(body["tools_used"]
        .as_array()
        .unwrap()
        .contains(&json!("goal_progress")));
}

#[tokio::test]
async fn test_chat_with_research_sources() {
    let gemini = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("## Research"))
        .respond_with(gemini_reply("Sleep is key for recovery."))
        .mount(&gemini)
        .await;

    let serper = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organic": [
                {"title": "Blog", "link": "https://blog.example.com/recovery", "snippet": "tips"},
                {"title": "Recovery review", "link": "https://pubmed.ncbi.nlm.nih.gov/42", "snippet": "sleep"}
            ]
        })))
        .mount(&serper)
        .await;

    let app = common::TestApp::builder()
        .gemini(&gemini.uri())
        .serper(&serper.uri())
        .build();
    let (status, body) = app
        .post_json(
            "/chat",
            json!({"user_id": 1, "message": "Best recovery science?"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Sleep is key for recovery.");
    assert_eq!(body["sources"][0]["url"], "https://pubmed.ncbi.nlm.nih.gov/42");
    assert!(body["tools_used"]
        .as_array()
        .unwrap()
        .contains(&json!("web_research")));
}

#[tokio::test]
async fn test_chat_degrades_when_gemini_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&server)
        .await;

    let app = common::TestApp::builder().gemini(&server.uri()).build();
    let (status, body) = app
        .post_json(
            "/chat",
            json!({"user_id": 1, "message": "hi", "conversation_id": "broken"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], APOLOGY);
    assert!(body["error"].as_str().unwrap().contains("500"));
    assert_eq!(body["conversation_id"], "broken");

    let (_, history) = app.get_json("/chat/history/broken?user_id=1").await;
    assert!(history["messages"].as_array().unwrap().is_empty());
}

// ============================================================================
// Database-backed history
// ============================================================================

#[tokio::test]
#[ignore = "requires database"]
async fn test_chat_history_persists_in_database() {
    let (app, pool) = common::TestApp::with_database().await;
    let conversation_id = format!("it-{}", uuid::Uuid::new_v4());

    let (status, _) = app
        .post_json(
            "/chat",
            json!({"user_id": "42", "message": "hello", "conversation_id": conversation_id}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, history) = app
        .get_json(&format!("/chat/history/{}?user_id=42", conversation_id))
        .await;
    assert_eq!(history["messages"].as_array().unwrap().len(), 2);

    app.delete(&format!(
        "/chat/history?user_id=42&conversation_id={}",
        conversation_id
    ))
    .await;
    let remaining: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM conversation_messages WHERE conversation_id = $1",
    )
    .bind(&conversation_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(remaining, 0);
}
