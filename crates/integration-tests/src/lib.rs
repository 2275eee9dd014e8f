//! Integration tests for Bistro.
//!
//! Each test spawns the full application on an ephemeral port over its own
//! temporary `SQLite` database and drives it over HTTP with `reqwest`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bistro-integration-tests
//! ```

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use bistro_web::config::{BistroConfig, BootstrapAccount};
use bistro_web::state::AppState;
use reqwest::{Client, Response, redirect::Policy};
use sqlx::SqlitePool;
use tempfile::TempDir;

/// A running application with its own database.
pub struct TestApp {
    pub base_url: String,
    /// Direct handle on the application's database.
    pub pool: SqlitePool,
    _db_dir: TempDir,
}

impl TestApp {
    /// Spawn the application with default configuration.
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    /// Spawn the application with a bootstrap account configured.
    pub async fn spawn_with_bootstrap(email: &str, password: &str) -> Self {
        let account = BootstrapAccount {
            email: bistro_core::Email::parse(email).unwrap(),
            fullname: "Test User".to_string(),
            password: secrecy::SecretString::from(password),
        };
        Self::spawn_with(move |config| config.bootstrap = Some(account)).await
    }

    /// Spawn the application after adjusting its configuration.
    pub async fn spawn_with(configure: impl FnOnce(&mut BistroConfig)) -> Self {
        let db_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let database_url = format!("sqlite://{}", db_dir.path().join("bistro.db").display());

        let mut config = BistroConfig::local(&database_url);
        configure(&mut config);

        let pool = bistro_web::init_database(&config)
            .await
            .expect("Failed to initialize database");
        let app = bistro_web::build_app(AppState::new(config, pool.clone()))
            .await
            .expect("Failed to build app");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            base_url: format!("http://{addr}"),
            pool,
            _db_dir: db_dir,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// A fresh browser: own cookie jar, redirects not followed.
    #[must_use]
    pub fn browser() -> Client {
        Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .expect("Failed to create HTTP client")
    }

    pub async fn get(&self, client: &Client, path: &str) -> Response {
        client.get(self.url(path)).send().await.unwrap()
    }

    pub async fn post_form(&self, client: &Client, path: &str, form: &[(&str, &str)]) -> Response {
        client.post(self.url(path)).form(form).send().await.unwrap()
    }

    pub async fn signup(
        &self,
        client: &Client,
        fullname: &str,
        email: &str,
        password: &str,
    ) -> Response {
        self.post_form(
            client,
            "/signup",
            &[("fullname", fullname), ("email", email), ("password", password)],
        )
        .await
    }

    pub async fn login(&self, client: &Client, email: &str, password: &str) -> Response {
        self.post_form(client, "/login", &[("email", email), ("password", password)])
            .await
    }

    /// Body of `path`, asserting a 200.
    pub async fn page(&self, client: &Client, path: &str) -> String {
        let response = self.get(client, path).await;
        assert_eq!(response.status(), 200, "GET {path}");
        response.text().await.unwrap()
    }

    pub async fn user_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    pub async fn user_id(&self, email: &str) -> i64 {
        sqlx::query_scalar("SELECT id FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}

/// The `Location` header of a redirect.
#[must_use]
pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}
