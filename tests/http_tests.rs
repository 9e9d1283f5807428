mod harness;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use harness::recording_notifier::RecordingNotifier;
use harness::seed;
use harness::temp_db::TempDb;
use seafood_api::adapter::inbound::http::{router, AppState};
use seafood_api::adapter::outbound::sqlite::{SqliteAccountStore, SqliteReportReader};
use seafood_api::application::AccountService;
use seafood_api::infrastructure::config::auth::AuthConfig;
use seafood_api::port::Event;

struct TestApp {
    db: TempDb,
    notifier: RecordingNotifier,
    router: Router,
}

impl TestApp {
    fn new() -> Self {
        Self::with_base_path("")
    }

    fn with_base_path(base_path: &str) -> Self {
        let db = TempDb::create();
        let notifier = RecordingNotifier::new();
        let auth = AuthConfig {
            bcrypt_cost: 4,
            ..AuthConfig::default()
        };
        let accounts = AccountService::new(
            Arc::new(SqliteAccountStore::new(db.pool().clone())),
            Arc::new(notifier.clone()),
            &auth,
            "test-signing-secret",
        );
        let reports = Arc::new(SqliteReportReader::new(db.pool().clone()));
        let state = AppState {
            accounts: Arc::new(accounts),
            market_prices: reports.clone(),
            landings: reports.clone(),
            feeds: reports,
        };
        Self {
            db,
            notifier,
            router: router(state, base_path),
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    async fn json(&self, request: Request<Body>) -> (StatusCode, Value) {
        let (status, body) = self.send(request).await;
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, value)
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.json(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.json(builder.body(Body::empty()).unwrap()).await
    }

    async fn signup(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .post(
                "/signup",
                json!({"email": email, "password": password, "name": "Ana"}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["token"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn root_serves_the_welcome_text() {
    let app = TestApp::new();
    let (status, body) = app
        .send(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"Welcome to Seafood AI!");
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() {
    let app = TestApp::new();

    for uri in ["/profile", "/market-prices", "/landings", "/market-signals", "/quotas"] {
        let (status, body) = app.get(uri, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["error"], "Authorization header required");
    }

    let (status, body) = app.get("/market-prices", Some("not.a-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn signup_login_and_profile() {
    let app = TestApp::new();
    let token = app.signup("ana@example.com", "hunter22").await;

    let (status, profile) = app.get("/profile", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["email"], "ana@example.com");
    assert_eq!(profile["name"], "Ana");
    assert!(profile.get("password_hash").is_none());

    let (status, body) = app
        .post(
            "/signup",
            json!({"email": "ana@example.com", "password": "another1", "name": "Ana"}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email already exists");

    let (status, body) = app
        .post("/login", json!({"email": "ana@example.com", "password": "wrong-pass"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");

    let (status, body) = app
        .post("/login", json!({"email": "ana@example.com", "password": "hunter22"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "ana@example.com");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    assert!(matches!(app.notifier.events()[0], Event::UserRegistered(_)));
}

#[tokio::test]
async fn malformed_account_requests_are_bad_requests() {
    let app = TestApp::new();

    let (status, body) = app.post("/signup", json!({"email": "ana@example.com"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = app
        .post(
            "/signup",
            json!({"email": "ana@example.com", "password": "123", "name": "Ana"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Password must be at least 6 characters");

    let (status, _) = app
        .json(
            Request::builder()
                .method(Method::POST)
                .uri("/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn password_reset_round_trip() {
    let app = TestApp::new();
    app.signup("ana@example.com", "hunter22").await;

    let (status, unknown) = app
        .post("/forgot-password", json!({"email": "nobody@example.com"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, known) = app
        .post("/forgot-password", json!({"email": "ana@example.com"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unknown, known);
    assert_eq!(
        known["message"],
        "If the email exists, a reset link has been sent"
    );

    let link = app
        .notifier
        .events()
        .into_iter()
        .find_map(|event| match event {
            Event::PasswordResetRequested(request) => Some(request.reset_link),
            _ => None,
        })
        .expect("reset requested event");
    let token = link
        .split_once("token=")
        .map(|(_, token)| token.to_string())
        .unwrap();
    assert!(link.starts_with("http://localhost:3000/reset-password?token="));

    let (status, body) = app
        .post("/reset-password", json!({"token": "bogus", "password": "newpass1"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid or expired reset token");

    let (status, body) = app
        .post("/reset-password", json!({"token": token, "password": "newpass1"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Password reset successfully");

    let (status, body) = app
        .post("/reset-password", json!({"token": token, "password": "newpass2"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Reset token has already been used");

    let (status, _) = app
        .post("/login", json!({"email": "ana@example.com", "password": "hunter22"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = app
        .post("/login", json!({"email": "ana@example.com", "password": "newpass1"}))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn market_prices_tolerate_junk_paging() {
    let app = TestApp::new();
    seed::priced_group(
        app.db.pool(),
        "Hake",
        "Spain",
        &[("2024-06-01", 12.0), ("2025-06-01", 15.0)],
    );
    let token = app.signup("ana@example.com", "hunter22").await;

    let (status, body) = app
        .get("/market-prices?page=abc&page_size=-5&species=hak", Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["page_size"], 20);
    assert_eq!(body["total_count"], 1);
    assert_eq!(body["total_pages"], 1);
    let row = &body["data"][0];
    assert_eq!(row["species_sku"], "Hake");
    assert_eq!(row["origin"], "Spain");
    assert_eq!(row["price"], 15.0);
    assert_eq!(row["price_unit"], "kg");
    assert_eq!(row["yoy"], 25.0);
}

#[tokio::test]
async fn landings_and_feeds_over_http() {
    let app = TestApp::new();
    let pool = app.db.pool();
    let port = seed::landing_port(pool, "Alaska");
    let name = seed::landing_name(pool, "POLLOCK, WALLEYE");
    seed::landing(pool, 2023, port, name, (Some(10.0), None, Some(0.5)));
    seed::market_signal(pool, "Pollock prices steady", "2025-02-01");
    seed::quota(pool, "2025-02-01", "Pollock", 33.3);
    let token = app.signup("ana@example.com", "hunter22").await;

    let (status, body) = app.get("/landings?year=2023&region=alas", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_count"], 1);
    assert_eq!(body["data"][0]["dollars"], 0.0);

    let (status, body) = app.get("/market-signals?limit=junk", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["published_date"], "February 1, 2025");

    let (status, body) = app.get("/quotas", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["remaining_quota"], "33.30%");
}

#[tokio::test]
async fn routes_nest_under_the_base_path() {
    let app = TestApp::with_base_path("/api/v1/");
    let (status, _) = app
        .post("/api/v1/login", json!({"email": "x@y.z", "password": "whatever"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .post("/login", json!({"email": "x@y.z", "password": "whatever"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
