//! API Integration Tests
//!
//! Run against an in-memory primary store and a scratch fallback file. The
//! PostgreSQL-backed test additionally needs DATABASE_URL.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use chrono::{Duration, Utc};
use integration_tests::{
    assert_json, assert_status, database_url, fixtures::*, PostgresTestServer, TestServer,
};
use mood_core::{FallbackStore, MoodRecord};
use reqwest::StatusCode;
use serde_json::Value;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");

    assert!(response.headers().contains_key("x-request-id"));
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_follows_primary_store() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/health/ready").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");

    server.moods.set_failing(true);
    let response = server.get("/health/ready").await.unwrap();
    let body: Value = assert_json(response, StatusCode::SERVICE_UNAVAILABLE)
        .await
        .unwrap();
    assert_eq!(body["status"], "not_ready");
}

// ============================================================================
// Submission Tests
// ============================================================================

#[tokio::test]
async fn test_submit_mood_to_primary_store() {
    let server = TestServer::start().await.unwrap();
    let body = MoodBody::new("😄").country("it").reason("Good weather!");

    let response = server.post("/api/mood", &body).await.unwrap();
    let submitted: SubmitResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert!(submitted.ok);
    assert_eq!(submitted.source, "primary-store");

    let records = server.moods.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].emoji, "😄");
    assert_eq!(records[0].country.as_deref(), Some("IT"));
    assert_eq!(records[0].reason.as_deref(), Some("Good weather!"));
}

#[tokio::test]
async fn test_sixth_submission_is_rate_limited() {
    let server = TestServer::start().await.unwrap();
    let device = unique_device();

    for _ in 0..5 {
        let response = server
            .post("/api/mood", &MoodBody::new("😐").device(&device))
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server
        .post("/api/mood", &MoodBody::new("😐").device(&device))
        .await
        .unwrap();
    assert_eq!(response.headers()["retry-after"], "86400");

    let envelope: ErrorEnvelope = assert_json(response, StatusCode::TOO_MANY_REQUESTS)
        .await
        .unwrap();
    assert_eq!(envelope.error.code, "RATE_LIMIT_EXCEEDED");
    let details = envelope.error.details.unwrap();
    assert_eq!(details["limit"], 5);
    assert_eq!(details["current"], 5);
    assert_eq!(details["retryAfterHours"], 24);

    assert_eq!(server.moods.records().len(), 5);

    // Another device from the same address has its own allowance
    let response = server.post("/api/mood", &MoodBody::new("😐")).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

#[tokio::test]
async fn test_rate_limit_keys_on_forwarded_address() {
    let server = TestServer::start_with_limit(1).await.unwrap();
    let device = unique_device();

    let first = server
        .post_from("/api/mood", "203.0.113.7", &MoodBody::new("😄").device(&device))
        .await
        .unwrap();
    assert_status(first, StatusCode::CREATED).await.unwrap();

    let again = server
        .post_from("/api/mood", "203.0.113.7, 10.0.0.1", &MoodBody::new("😄").device(&device))
        .await
        .unwrap();
    assert_status(again, StatusCode::TOO_MANY_REQUESTS).await.unwrap();

    let other = server
        .post_from("/api/mood", "198.51.100.4", &MoodBody::new("😄").device(&device))
        .await
        .unwrap();
    assert_status(other, StatusCode::CREATED).await.unwrap();
}

#[tokio::test]
async fn test_invalid_bodies_are_rejected_without_counting() {
    let server = TestServer::start_with_limit(1).await.unwrap();

    let response = server
        .post_raw("/api/mood", "application/json", "{not json")
        .await
        .unwrap();
    let envelope: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(envelope.error.code, "INVALID_PAYLOAD");

    let response = server
        .post_raw("/api/mood", "application/json", r#"{"label":"happy"}"#)
        .await
        .unwrap();
    let envelope: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(envelope.error.code, "INVALID_PAYLOAD");

    let response = server.post("/api/mood", &MoodBody::new("   ")).await.unwrap();
    let envelope: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(envelope.error.code, "INVALID_PAYLOAD");
    assert!(!envelope.error.message.is_empty());

    let response = server
        .post_raw(
            "/api/mood",
            "application/json",
            r#"{"emoji":"😄","latitude":123.0}"#,
        )
        .await
        .unwrap();
    let envelope: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(envelope.error.code, "VALIDATION_ERROR");

    assert!(server.moods.records().is_empty());

    // The single daily slot is still available
    let response = server.post("/api/mood", &MoodBody::new("😄")).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

#[tokio::test]
async fn test_primary_failure_lands_in_fallback_file() {
    let server = TestServer::start().await.unwrap();
    server.moods.set_failing(true);

    let response = server
        .post("/api/mood", &MoodBody::new("😢").country("US"))
        .await
        .unwrap();
    let submitted: SubmitResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(submitted.source, "fallback-file");

    let stored = server.fallback.load_all().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].emoji, "😢");
    assert!(server.scratch().file("moods.json").exists());
}

// ============================================================================
// Statistics Tests
// ============================================================================

#[tokio::test]
async fn test_stats_aggregates_and_filters() {
    let server = TestServer::start().await.unwrap();
    for (emoji, country) in [("😄", "IT"), ("😄", "IT"), ("😢", "IT"), ("😢", "US")] {
        let response = server
            .post("/api/mood", &MoodBody::new(emoji).country(country))
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }
    server
        .moods
        .seed([MoodRecord::new("😴", Utc::now() - Duration::days(3)).with_country("FR")]);

    let response = server.get("/api/stats?timeRange=day").await.unwrap();
    let stats: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stats["total"], 4);
    assert_eq!(stats["timeRange"], "day");
    assert_eq!(stats["byCountry"]["IT"], 3);
    assert_eq!(stats["byCountryMood"]["IT"]["😄"], 2);
    assert_eq!(stats["byContinent"]["Europe"], 3);
    assert_eq!(stats["dominantByCountry"]["IT"], "😄");
    assert!(stats.get("error").is_none());

    let trending = stats["trending"].as_array().unwrap();
    assert!(trending.iter().any(|t| t["emoji"] == "😄" && t["current"] == 2));

    let response = server.get("/api/stats?country=us").await.unwrap();
    let stats: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stats["total"], 1);
    assert_eq!(stats["timeRange"], "all");
    assert_eq!(stats["byMood"]["😢"], 1);

    let response = server.get("/api/stats").await.unwrap();
    let stats: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stats["total"], 5);
}

#[tokio::test]
async fn test_stats_debug_output() {
    let server = TestServer::start().await.unwrap();
    server.moods.seed([
        MoodRecord::new("😄", Utc::now()).with_country("IT"),
        MoodRecord::new("😢", Utc::now()).with_country("DE"),
    ]);

    let response = server.get("/api/stats?debug=1").await.unwrap();
    let stats: Value = assert_json(response, StatusCode::OK).await.unwrap();

    let debug = &stats["__debug"];
    assert_eq!(debug["countriesPresent"].as_array().unwrap().len(), 2);
    assert_eq!(debug["sampleFirst"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_stats_degrade_when_store_unavailable() {
    let server = TestServer::start().await.unwrap();
    server.moods.set_failing(true);

    let response = server.get("/api/stats?timeRange=week").await.unwrap();
    let stats: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stats["total"], 0);
    assert_eq!(stats["timeRange"], "week");
    assert!(stats["error"].is_string());

    let response = server.get("/api/stats/reasons").await.unwrap();
    let reasons: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(reasons["total"], 0);
    assert!(reasons["global"].as_array().unwrap().is_empty());
    assert!(reasons["error"].is_string());
}

#[tokio::test]
async fn test_reasons_ranking() {
    let server = TestServer::start().await.unwrap();
    for (reason, country) in [
        ("Good weather!", "IT"),
        ("good weather", "IT"),
        ("Late night", "US"),
    ] {
        let response = server
            .post("/api/mood", &MoodBody::new("😄").country(country).reason(reason))
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }
    server.moods.seed([MoodRecord::new("😄", Utc::now())]);

    let response = server.get("/api/stats/reasons?timeRange=day").await.unwrap();
    let reasons: Value = assert_json(response, StatusCode::OK).await.unwrap();

    // Records without a reason still count towards the total
    assert_eq!(reasons["total"], 4);
    assert_eq!(reasons["timeRange"], "day");
    assert_eq!(reasons["global"][0]["phrase"], "good weather");
    assert_eq!(reasons["global"][0]["count"], 2);
    assert_eq!(reasons["global"][1]["phrase"], "late night");
    assert_eq!(reasons["byCountry"]["IT"][0]["count"], 2);
    assert_eq!(reasons["byCountry"]["US"][0]["phrase"], "late night");
}

// ============================================================================
// Migration Tests
// ============================================================================

#[tokio::test]
async fn test_migrate_imports_fallback_entries() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/api/migrate").await.unwrap();
    let status: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(status["existing"], 0);
    assert!(status["hint"].is_string());

    let response = server.post("/api/migrate", &serde_json::json!({})).await.unwrap();
    let empty: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(empty["ok"], false);
    assert_eq!(empty["reason"], "Local file empty");

    server.moods.set_failing(true);
    for emoji in ["😄", "😢"] {
        let response = server.post("/api/mood", &MoodBody::new(emoji)).await.unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }
    server.moods.set_failing(false);

    let response = server.get("/api/migrate?run=1").await.unwrap();
    let imported: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(imported["ok"], true);
    assert_eq!(imported["inserted"], 2);
    assert_eq!(server.moods.records().len(), 2);

    let response = server.post("/api/migrate", &serde_json::json!({})).await.unwrap();
    let skipped: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(skipped["skipped"], true);
    assert_eq!(skipped["existing"], 2);
}

#[tokio::test]
async fn test_migrate_reports_store_failure() {
    let server = TestServer::start().await.unwrap();
    server.moods.set_failing(true);

    let response = server.get("/api/migrate").await.unwrap();
    let envelope: ErrorEnvelope = assert_json(response, StatusCode::INTERNAL_SERVER_ERROR)
        .await
        .unwrap();
    assert_eq!(envelope.error.code, "DATABASE_ERROR");
}

// ============================================================================
// PostgreSQL-backed Tests
// ============================================================================

#[tokio::test]
async fn test_postgres_backed_submission() {
    let Some(url) = database_url() else {
        return;
    };

    let server = PostgresTestServer::start(&url).await.unwrap();
    let response = server
        .client
        .post(server.url("/api/mood"))
        .json(&MoodBody::new("🤩").country("NL"))
        .send()
        .await
        .unwrap();
    let submitted: SubmitResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(submitted.source, "primary-store");

    let response = server
        .client
        .get(server.url("/health/ready"))
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}
