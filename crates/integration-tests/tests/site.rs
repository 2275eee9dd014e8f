//! Public pages, health checks and response headers.

#![allow(clippy::unwrap_used)]

use bistro_integration_tests::TestApp;

#[tokio::test]
async fn test_public_pages() {
    let app = TestApp::spawn().await;
    let browser = TestApp::browser();

    let home = app.page(&browser, "/").await;
    assert!(home.contains("Bistro"));
    assert!(home.contains(r#"href="/login""#));

    let menu = app.page(&browser, "/menu").await;
    assert!(menu.contains("Margherita Pizza"));
    assert!(menu.contains("$11.50"));
}

#[tokio::test]
async fn test_nav_reflects_session() {
    let app = TestApp::spawn().await;
    let browser = TestApp::browser();
    app.signup(&browser, "Alice", "alice@example.com", "pw").await;

    let home = app.page(&browser, "/").await;
    assert!(home.contains(r#"href="/logout""#));
    assert!(!home.contains(r#"href="/login""#));
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::spawn().await;
    let browser = TestApp::browser();

    assert_eq!(app.page(&browser, "/health").await, "ok");
    assert_eq!(app.get(&browser, "/health/ready").await.status(), 200);
}

#[tokio::test]
async fn test_security_and_request_id_headers() {
    let app = TestApp::spawn().await;
    let response = app.get(&TestApp::browser(), "/menu").await;

    let headers = response.headers();
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert!(headers.get("content-security-policy").is_some());
    assert!(headers.get("x-request-id").is_some());
}

#[tokio::test]
async fn test_stylesheet_is_served() {
    let app = TestApp::spawn().await;
    let response = app.get(&TestApp::browser(), "/static/css/main.css").await;

    assert_eq!(response.status(), 200);
    assert!(response.text().await.unwrap().contains("--accent"));
}
