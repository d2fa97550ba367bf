//! Integration tests for the persisted profile / analysis / history stores

mod common;

use common::{analysis, sample_profile, FailingStore, TestApp};
use proptest::prelude::*;
use serde_json::json;
use skinglow_client::config::AppConfig;
use skinglow_client::services::MAX_HISTORY_ENTRIES;
use skinglow_client::state::AppState;
use skinglow_client::storage::{KeyValueStore, MemoryStore, ANALYSIS_KEY, SCORE_HISTORY_KEY, USER_KEY};
use skinglow_shared::{Diet, Gender, HistoryContext, UserProfile};
use std::sync::Arc;

#[tokio::test]
async fn test_profile_survives_restart() {
    let app = TestApp::new().await;
    app.state.profile().save(sample_profile()).await;

    let restarted = app.restart().await;
    assert_eq!(restarted.profile().current().await, Some(sample_profile()));
    assert_eq!(restarted.profile().load().await, Some(sample_profile()));
}

#[tokio::test]
async fn test_analysis_replacement_not_merge() {
    let app = TestApp::new().await;
    let first = analysis(json!({
        "skin_type": "dry",
        "skin_tone": "fair",
        "overall_condition": "fair",
        "score": 62,
        "visible_issues": ["flaky patches"],
        "health": {"daily_habits": ["drink water"], "routine": []}
    }));
    let second = analysis(json!({"skin_type": "combination", "score": 70}));

    app.state.analysis().set(first).await;
    app.state.analysis().set(second.clone()).await;

    let restarted = app.restart().await;
    let cached = restarted.analysis().current().await.unwrap();
    assert_eq!(cached, second);
    assert!(cached.visible_issues.is_none());
    assert!(cached.health.is_none());
}

#[tokio::test]
async fn test_history_cap_keeps_most_recent() {
    let app = TestApp::new().await;
    for score in 1..=35 {
        app.state.history().append(score, HistoryContext::default()).await;
    }

    let restarted = app.restart().await;
    let entries = restarted.history().entries().await;
    assert_eq!(entries.len(), MAX_HISTORY_ENTRIES);
    assert_eq!(entries.first().map(|e| e.score), Some(6));
    assert_eq!(entries.last().map(|e| e.score), Some(35));
}

#[tokio::test]
async fn test_both_score_shapes_recorded() {
    let app = TestApp::new().await;

    app.state.analysis().set(analysis(json!({"score": 72}))).await;
    app.state
        .analysis()
        .set(analysis(json!({"score": {"total": 72, "label": "Good"}})))
        .await;

    let scores: Vec<i64> = app.state.history().entries().await.iter().map(|e| e.score).collect();
    assert_eq!(scores, vec![72, 72]);
}

#[tokio::test]
async fn test_no_score_no_history() {
    let app = TestApp::new().await;
    app.state.analysis().set(analysis(json!({"score": 50}))).await;

    app.state
        .analysis()
        .set(analysis(json!({"skin_type": "normal", "recommendations": ["spf"]})))
        .await;
    app.state
        .analysis()
        .set(analysis(json!({"score": {"label": "unknown"}})))
        .await;

    assert_eq!(app.state.history().entries().await.len(), 1);
}

#[tokio::test]
async fn test_clear_analysis_keeps_history_after_reload() {
    let app = TestApp::new().await;
    app.state.analysis().set(analysis(json!({"score": 81}))).await;
    app.state.analysis().set(analysis(json!({"score": 84}))).await;

    app.state.analysis().clear().await;
    assert!(app.store().get(ANALYSIS_KEY).await.unwrap().is_none());

    let restarted = app.restart().await;
    assert!(restarted.analysis().current().await.is_none());
    let scores: Vec<i64> = restarted.history().load().await.iter().map(|e| e.score).collect();
    assert_eq!(scores, vec![81, 84]);
}

#[tokio::test]
async fn test_corrupt_payloads_load_as_empty() {
    let app = TestApp::new().await;
    let store = app.store();
    store.set(USER_KEY, "definitely not json").await.unwrap();
    store.set(ANALYSIS_KEY, "\"oily\"").await.unwrap();
    store.set(SCORE_HISTORY_KEY, r#"{"oops": true}"#).await.unwrap();

    let restarted = app.restart().await;
    assert_eq!(restarted.profile().current().await, None);
    assert_eq!(restarted.analysis().current().await, None);
    assert!(restarted.history().entries().await.is_empty());
}

#[tokio::test]
async fn test_schema_invalid_profile_is_unset() {
    let storage = Arc::new(MemoryStore::with_records([(
        USER_KEY,
        r#"{"age": 25, "gender": "robot", "height_cm": 165, "weight_kg": 58, "diet": "vegetarian"}"#,
    )]));
    let state = AppState::init(storage, AppConfig::default()).await;
    assert_eq!(state.profile().load().await, None);
}

#[tokio::test]
async fn test_storage_failures_are_swallowed() {
    let state = AppState::init(Arc::new(FailingStore), AppConfig::default()).await;

    assert_eq!(state.profile().load().await, None);
    state.profile().save(sample_profile()).await;
    // Write failed, but the in-memory snapshot still moved forward
    assert_eq!(state.profile().current().await, Some(sample_profile()));

    let entry = state.analysis().set(analysis(json!({"score": 77}))).await;
    assert_eq!(entry.map(|e| e.score), Some(77));
    assert_eq!(state.history().entries().await.len(), 1);

    state.analysis().clear().await;
    state.history().clear().await;
    assert!(state.snapshot().await.history.is_empty());
}

#[tokio::test]
async fn test_onboarding_and_first_analysis_scenario() {
    let app = TestApp::new().await;
    let profile = UserProfile {
        age: 25,
        gender: Gender::Female,
        height_cm: 165,
        weight_kg: 58,
        diet: Diet::Vegetarian,
        ethnicity: None,
    };

    app.state.profile().save(profile.clone()).await;
    assert_eq!(app.state.profile().load().await, Some(profile));

    let payload = json!({
        "skin_type": "oily",
        "score": 80,
        "food": {"eat_more": ["leafy greens"], "limit": ["fried food"]}
    });
    app.state.analysis().set(analysis(payload.clone())).await;

    let cached = app.state.analysis().load().await.unwrap();
    assert_eq!(serde_json::to_value(&cached).unwrap(), payload);

    let history = app.state.history().load().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].score, 80);
    assert_eq!(history[0].skin_type.as_deref(), Some("oily"));

    let raw = app.store().get(SCORE_HISTORY_KEY).await.unwrap().unwrap();
    let persisted: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted[0]["score"], 80);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_history_is_suffix_of_appended_scores(scores in prop::collection::vec(0i64..=100, 0..70)) {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        let kept = runtime.block_on(async {
            let state = AppState::new(Arc::new(MemoryStore::new()), AppConfig::default());
            for score in &scores {
                state.history().append(*score, HistoryContext::default()).await;
            }
            state.history().entries().await
        });

        let expected_len = scores.len().min(MAX_HISTORY_ENTRIES);
        prop_assert_eq!(kept.len(), expected_len);
        let kept_scores: Vec<i64> = kept.iter().map(|e| e.score).collect();
        prop_assert_eq!(&kept_scores[..], &scores[scores.len() - expected_len..]);
    }
}
