//! Integration tests for the insights endpoints

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_weekly_insights() {
    let app = common::TestApp::new();

    let (status, body) = app
        .post_json("/insights", json!({"user_id": 1, "period": "week"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["period"], "week");
    assert_eq!(body["days_analyzed"], 7);
    assert_eq!(body["stats"]["average"], 8300);
    assert!(!body["insights"].as_array().unwrap().is_empty());
    assert!(body["summary"].as_str().unwrap().contains("8,300"));
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_unknown_period_falls_back_to_week() {
    let app = common::TestApp::new();

    let (status, body) = app
        .post_json("/insights", json!({"user_id": "1", "period": "fortnight"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["period"], "week");
    assert_eq!(body["days_analyzed"], 7);
}

#[tokio::test]
async fn test_insights_degrade_when_store_fails() {
    let app = common::TestApp::new();

    let (status, body) = app
        .post_json("/insights", json!({"user_id": common::FAILING_USER}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["insights"], json!(["Unable to generate insights at this time"]));
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_insights_for_new_user() {
    let app = common::TestApp::new();

    let (status, body) = app
        .post_json(
            "/insights",
            json!({"user_id": common::EMPTY_USER, "period": "month"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["days_analyzed"], 0);
    assert!(body["stats"].is_null());
}

#[tokio::test]
async fn test_daily_insight() {
    let app = common::TestApp::new();

    let (status, body) = app.get_json("/insights/daily?user_id=1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["today_steps"], 8000);
    assert_eq!(body["weekly_average"], 8300);
    assert!(body["motivation"].is_string());
}

#[tokio::test]
async fn test_trends_default_window() {
    let app = common::TestApp::new();

    let (status, body) = app.get_json("/insights/trends?user_id=1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["days_analyzed"], 30);
    assert_eq!(body["trend"], "decreasing");
}

#[tokio::test]
async fn test_trends_rejects_zero_days() {
    let app = common::TestApp::new();

    let (status, body) = app.get_json("/insights/trends?user_id=1&days=0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "days");
}

#[tokio::test]
async fn test_weekly_breakdown() {
    let app = common::TestApp::new();

    let (status, body) = app
        .get_json("/insights/weekly-breakdown?user_id=1&days=14")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["days"].as_array().unwrap().len(), 7);
    assert!(body["best_day"].is_string());
}

#[tokio::test]
async fn test_streak_with_custom_goal() {
    let app = common::TestApp::new();

    let (status, body) = app
        .get_json("/insights/streak?user_id=1&days=10&goal_steps=8000")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_streak"], 10);
    assert_eq!(body["goal_steps"], 8000);
    assert!(body["motivation"].is_string());
}

#[tokio::test]
async fn test_streak_default_goal_is_missed() {
    let app = common::TestApp::new();

    let (status, body) = app.get_json("/insights/streak?user_id=1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["goal_steps"], 10000);
    assert_eq!(body["current_streak"], 0);
}

#[tokio::test]
async fn test_compare_periods() {
    let app = common::TestApp::new();

    let (status, body) = app
        .post_json("/insights/compare", json!({"user_id": 1, "period_days": 30}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current"]["label"], "This Month");
    assert_eq!(body["previous"]["label"], "Last Month");
}

#[tokio::test]
async fn test_compare_rejects_long_period() {
    let app = common::TestApp::new();

    let (status, body) = app
        .post_json("/insights/compare", json!({"user_id": 1, "period_days": 400}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "period_days");
}
