//! Profile editing.

#![allow(clippy::unwrap_used)]

use bistro_integration_tests::{TestApp, location};

#[tokio::test]
async fn test_update_profile() {
    let app = TestApp::spawn().await;
    let browser = TestApp::browser();
    app.signup(&browser, "Alice", "alice@example.com", "old").await;

    let response = app
        .post_form(
            &browser,
            "/profile",
            &[
                ("fullname", "Alice Smith"),
                ("email", "alice.smith@example.com"),
                ("password", "new"),
            ],
        )
        .await;
    assert_eq!(location(&response), "/profile");

    let body = app.page(&browser, "/profile").await;
    assert!(body.contains("Profile updated successfully."));
    assert!(body.contains("Alice Smith"));
    assert!(body.contains("alice.smith@example.com"));

    let response = app
        .login(&TestApp::browser(), "alice.smith@example.com", "new")
        .await;
    assert_eq!(location(&response), "/order");
}

#[tokio::test]
async fn test_blank_password_keeps_current_one() {
    let app = TestApp::spawn().await;
    let browser = TestApp::browser();
    app.signup(&browser, "Alice", "alice@example.com", "keep").await;

    app.post_form(
        &browser,
        "/profile",
        &[
            ("fullname", "Alice"),
            ("email", "alice@example.com"),
            ("password", ""),
        ],
    )
    .await;

    let response = app
        .login(&TestApp::browser(), "alice@example.com", "keep")
        .await;
    assert_eq!(location(&response), "/order");
}

#[tokio::test]
async fn test_email_collision_leaves_profile_unchanged() {
    let app = TestApp::spawn().await;
    let alice = TestApp::browser();
    app.signup(&alice, "Alice", "alice@example.com", "pw").await;
    app.signup(&TestApp::browser(), "Bob", "bob@example.com", "pw")
        .await;

    let response = app
        .post_form(
            &alice,
            "/profile",
            &[
                ("fullname", "Not Alice"),
                ("email", "bob@example.com"),
                ("password", ""),
            ],
        )
        .await;
    assert_eq!(location(&response), "/profile");

    let body = app.page(&alice, "/profile").await;
    assert!(body.contains("Email already in use."));

    let (fullname, email): (String, String) =
        sqlx::query_as("SELECT fullname, email FROM users WHERE id = ?")
            .bind(app.user_id("alice@example.com").await)
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_eq!(fullname, "Alice");
    assert_eq!(email, "alice@example.com");
}
