//! API integration tests
//!
//! Each test spawns the full HTTP application on an ephemeral port with
//! in-memory storage and fake upstream APIs, then talks to it over HTTP.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;
use stockbot_core::UpstreamError;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/health").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_health_ready_tracks_store() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/health/ready").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    server.harness.users.set_unavailable(true);
    let response = server.get("/health/ready").await.unwrap();
    assert_status(response, StatusCode::SERVICE_UNAVAILABLE).await.unwrap();
}

#[tokio::test]
async fn test_callback_probe() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/callback").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.text().await.unwrap(), "OK");
}

// ============================================================================
// Signature Tests
// ============================================================================

#[tokio::test]
async fn test_missing_signature_is_unauthorized() {
    let server = TestServer::start().await.unwrap();
    let body = serde_json::to_vec(&webhook(vec![follow_event("U1", "R1")])).unwrap();

    let response = server.deliver_raw(body, None).await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();

    assert_eq!(error.error.code, "INVALID_SIGNATURE");
    assert!(server.harness.users.get("U1").is_none());
    assert!(server.harness.messaging.replies().is_empty());
}

#[tokio::test]
async fn test_tampered_body_is_unauthorized() {
    let server = TestServer::start().await.unwrap();
    let original = serde_json::to_vec(&webhook(vec![follow_event("U1", "R1")])).unwrap();
    let signature = stockbot_common::SignatureVerifier::new(integration_tests::TEST_CHANNEL_SECRET)
        .sign(&original);

    let tampered = serde_json::to_vec(&webhook(vec![follow_event("U2", "R1")])).unwrap();
    let response = server.deliver_raw(tampered, Some(&signature)).await.unwrap();

    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert!(server.harness.users.get("U2").is_none());
}

#[tokio::test]
async fn test_signed_non_webhook_is_acknowledged() {
    let server = TestServer::start().await.unwrap();
    let response = server.deliver(&json!({"hello": "world"})).await.unwrap();

    let report: DispatchReport = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(report, DispatchReport::default());
}

// ============================================================================
// Conversation Tests
// ============================================================================

#[tokio::test]
async fn test_follow_then_manage_watchlist() {
    let server = TestServer::start().await.unwrap();
    server.harness.messaging.set_profile("U1", "Alice");

    // Follow
    let response = server.deliver(&webhook(vec![follow_event("U1", "R-follow")])).await.unwrap();
    let report: DispatchReport = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(report, DispatchReport { handled: 1, ignored: 0, failed: 0 });

    let user = server.harness.users.get("U1").unwrap();
    assert_eq!(user.display_name.as_deref(), Some("Alice"));
    assert!(user.is_active);
    assert_eq!(user.reply_count, 0);

    // Add two codes and list them in one batch
    let response = server
        .deliver(&webhook(vec![
            text_event("U1", &reply_token(), "加入庫存:9999"),
            text_event("U1", &reply_token(), "加入庫存：2330"),
            text_event("U1", &reply_token(), "加入庫存:2330"),
            text_event("U1", &reply_token(), "我的庫存"),
        ]))
        .await
        .unwrap();
    let report: DispatchReport = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(report.handled, 4);

    let texts = server.harness.messaging.reply_texts();
    assert!(texts[0].starts_with("歡迎加入！Alice"));
    assert_eq!(texts[1], "成功加入股票 9999 到庫存！");
    assert_eq!(texts[2], "成功加入股票 2330 到庫存！");
    assert_eq!(texts[3], "您已經加入過股票 2330。");
    assert_eq!(texts[4], "您的庫存有以下股票代號：\n2330\n9999");
    assert_eq!(server.harness.watchlist.len(), 2);
    assert_eq!(server.harness.users.get("U1").unwrap().reply_count, 4);

    // Remove one that is present and one that is not
    let response = server
        .deliver(&webhook(vec![
            text_event("U1", &reply_token(), "刪除庫存:9999"),
            text_event("U1", &reply_token(), "刪除庫存:1101"),
        ]))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let texts = server.harness.messaging.reply_texts();
    assert_eq!(texts[5], "成功刪除股票 9999 從您的庫存！");
    assert_eq!(texts[6], "您的庫存中沒有找到股票 1101，無法刪除。");
    assert_eq!(server.harness.watchlist.len(), 1);
}

#[tokio::test]
async fn test_unfollowed_user_cannot_edit_watchlist() {
    let server = TestServer::start().await.unwrap();
    server.harness.users.insert_user("U1", Some("Bob"), true);

    let response = server
        .deliver(&webhook(vec![
            unfollow_event("U1"),
            text_event("U1", &reply_token(), "加入庫存:2330"),
        ]))
        .await
        .unwrap();
    let report: DispatchReport = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(report.handled, 2);
    assert!(!server.harness.users.get("U1").unwrap().is_active);
    assert_eq!(server.harness.messaging.reply_texts(), ["無法找到您的帳號，請再試一次。"]);
    assert_eq!(server.harness.watchlist.len(), 0);
}

#[tokio::test]
async fn test_quote_lookup_over_http() {
    let server = TestServer::start().await.unwrap();
    server
        .harness
        .market
        .set_quote("2330", &quote_document("台積電", "2330", "105.50", "100.00"));

    let response = server
        .deliver(&webhook(vec![text_event("U1", &reply_token(), "2330")]))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let texts = server.harness.messaging.reply_texts();
    assert_eq!(texts.len(), 1);
    let lines: Vec<&str> = texts[0].lines().collect();
    assert_eq!(lines[0], "台積電（2330）");
    assert_eq!(lines[1], "成交價：105.50 漲跌幅：+5.50%");
}

#[tokio::test]
async fn test_upstream_outage_uses_fallback_text() {
    let server = TestServer::start().await.unwrap();
    server.harness.market.fail_with(UpstreamError::Timeout);

    let response = server
        .deliver(&webhook(vec![text_event("U1", &reply_token(), "0050")]))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    assert_eq!(
        server.harness.messaging.reply_texts(),
        ["無法取得股票資訊，請稍後再試。"]
    );
}

#[tokio::test]
async fn test_unsupported_events_are_ignored() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .deliver(&webhook(vec![
            sticker_event("U1", &reply_token()),
            json!({"type": "join", "replyToken": "R-join", "source": {"type": "group", "groupId": "G1"}}),
        ]))
        .await
        .unwrap();
    let report: DispatchReport = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(report, DispatchReport { handled: 0, ignored: 2, failed: 0 });
    assert!(server.harness.messaging.replies().is_empty());
}

#[tokio::test]
async fn test_store_outage_still_answers_200() {
    let server = TestServer::start().await.unwrap();
    server.harness.users.insert_user("U1", None, true);
    server.harness.watchlist.set_unavailable(true);

    let response = server
        .deliver(&webhook(vec![text_event("U1", &reply_token(), "我的庫存")]))
        .await
        .unwrap();
    let report: DispatchReport = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(report.failed, 1);
    assert!(server.harness.messaging.replies().is_empty());
}

// ============================================================================
// Operator Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_reply_counter_endpoint() {
    let server = TestServer::start().await.unwrap();
    server.harness.users.insert_user("U1", None, true);

    for expected in 1..=3 {
        let response = server.post_empty("/api/countreplytimes/reply/U1").await.unwrap();
        let body: ReplyCountResponse = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(body.line_user_id, "U1");
        assert_eq!(body.reply_count, expected);
    }

    let response = server.post_empty("/api/countreplytimes/reply/U404").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_receiver_endpoint() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/api/externalapi/receive/1234").await.unwrap();
    let body: MessageBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.message, "接收到的四位數字是: 1234");

    for bad in ["123", "12345", "abcd"] {
        let response = server
            .get(&format!("/api/externalapi/receive/{bad}"))
            .await
            .unwrap();
        let body: MessageBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
        assert_eq!(body.message, "無效的四位數字");
    }
}
