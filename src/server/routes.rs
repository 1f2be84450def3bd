//! Axum route handlers.
//!
//! # Routes
//!
//! - `GET  /health`, `GET /healthz` — liveness probes
//! - `POST /register`               — create an account
//! - `POST /login`                  — exchange credentials for a bearer token
//! - `POST /logout`                 — end the current session
//! - `GET  /dashboard`              — per-user counters
//! - `GET  /chat`, `POST /chat`     — conversation history / send a message
//! - `GET  /journal`, `POST /journal`
//! - `GET  /mood`, `POST /mood`     — mood history / today's reading
//! - `GET  /profile`
//! - `GET  /resources`              — crisis hotlines
//!
//! Everything except health, register, login and resources requires
//! `Authorization: Bearer <token>`.

use axum::{
    extract::{FromRequest, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::state::AppState;
use crate::auth::{hash_password, verify_password, AuthUser, SessionToken};
use crate::error::{AppError, Result};
use crate::storage::chat::CHAT_HISTORY_LIMIT;
use crate::storage::mood::MOOD_HISTORY_LIMIT;
use crate::storage::{Database, MoodReading, MoodWrite, NewJournalEntry};
use crate::support::{CRISIS_NOTICE, CRISIS_RESOURCES};

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/healthz", get(healthz_handler))
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/logout", post(logout_handler))
        .route("/dashboard", get(dashboard_handler))
        .route("/chat", get(chat_history_handler).post(send_message_handler))
        .route("/journal", get(list_journal_handler).post(add_journal_handler))
        .route("/mood", get(list_mood_handler).post(add_mood_handler))
        .route("/profile", get(profile_handler))
        .route("/resources", get(resources_handler))
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// `Json` whose rejections render as [`AppError`] JSON bodies.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
struct AppJson<T>(T);

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RegisterRequest {
    username: String,
    email: String,
    password: String,
}

/// `username` may also be the account's email address.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SendMessageRequest {
    message: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct JournalRequest {
    title: String,
    content: String,
    mood_rating: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MoodRequest {
    mood_score: Option<i64>,
    energy_level: Option<i64>,
    anxiety_level: Option<i64>,
    sleep_hours: Option<f64>,
    notes: Option<String>,
}

fn check_scale(name: &str, value: Option<i64>) -> Result<()> {
    match value {
        Some(v) if !(1..=10).contains(&v) => Err(AppError::validation(format!(
            "{name} must be between 1 and 10."
        ))),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

/// GET /health — liveness probe.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": "mindcare",
    }))
}

/// GET /healthz — plain-text probe for load balancers.
async fn healthz_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK!")
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// POST /register
async fn register_handler(
    State(db): State<Database>,
    AppJson(body): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    let username = body.username.trim();
    let email = body.email.trim();
    if username.is_empty() || email.is_empty() || body.password.is_empty() {
        return Err(AppError::validation("All fields are required."));
    }

    let password_hash = hash_password(&body.password)?;
    let user = db.create_user(username, email, &password_hash, Utc::now()).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Registration successful! Please log in.",
            "user": user,
        })),
    ))
}

/// POST /login
async fn login_handler(
    State(db): State<Database>,
    AppJson(body): AppJson<LoginRequest>,
) -> Result<Json<Value>> {
    let login = body.username.trim();
    if login.is_empty() || body.password.is_empty() {
        return Err(AppError::validation(
            "Please enter both username and password.",
        ));
    }

    let user = db
        .find_user_by_login(login)
        .await?
        .filter(|user| verify_password(&body.password, &user.password_hash))
        .ok_or_else(|| AppError::unauthorized("Invalid username or password."))?;

    let now = Utc::now();
    db.prune_expired_sessions(now).await?;
    let session = SessionToken::generate();
    db.create_session(&session.digest, user.id, now).await?;
    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(serde_json::json!({
        "message": format!("Welcome back, {}!", user.username),
        "token": session.token,
        "user": user,
    })))
}

/// POST /logout
async fn logout_handler(State(db): State<Database>, auth: AuthUser) -> Result<Json<Value>> {
    db.delete_session(&auth.token_digest).await?;
    tracing::info!(user_id = auth.user.id, "User logged out");
    Ok(Json(serde_json::json!({ "message": "You have been logged out." })))
}

/// GET /profile
async fn profile_handler(auth: AuthUser) -> Json<Value> {
    Json(serde_json::json!({ "user": auth.user }))
}

/// GET /dashboard
async fn dashboard_handler(State(db): State<Database>, auth: AuthUser) -> Result<Json<Value>> {
    let stats = db.dashboard_stats(&auth.user, Utc::now()).await?;
    Ok(Json(serde_json::json!({ "stats": stats })))
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

/// GET /chat — the latest turns, oldest first.
async fn chat_history_handler(State(db): State<Database>, auth: AuthUser) -> Result<Json<Value>> {
    let messages = db.recent_chat_turns(auth.user.id, CHAT_HISTORY_LIMIT).await?;
    Ok(Json(serde_json::json!({ "messages": messages })))
}

/// POST /chat — run the message through the response selector and store
/// both turns.
async fn send_message_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(body): AppJson<SendMessageRequest>,
) -> Result<Json<Value>> {
    let message = body.message.trim();
    if message.is_empty() {
        return Err(AppError::validation("Please enter a message."));
    }

    let response = state.selector.select_response(message).await;
    let source = response.source;
    let (reply, is_crisis) = response.into_parts();

    let (user_turn, assistant_turn) = state
        .db
        .record_exchange(auth.user.id, message, &reply, is_crisis, Utc::now())
        .await?;

    if is_crisis {
        tracing::warn!(user_id = auth.user.id, "Crisis resources provided");
    }

    Ok(Json(serde_json::json!({
        "user_message": user_turn,
        "assistant_message": assistant_turn,
        "is_crisis": is_crisis,
        "source": source,
        "notice": is_crisis.then_some(CRISIS_NOTICE),
    })))
}

// ---------------------------------------------------------------------------
// Journal
// ---------------------------------------------------------------------------

/// GET /journal — all entries, newest first.
async fn list_journal_handler(State(db): State<Database>, auth: AuthUser) -> Result<Json<Value>> {
    let entries = db.journal_entries(auth.user.id).await?;
    Ok(Json(serde_json::json!({ "entries": entries })))
}

/// POST /journal
async fn add_journal_handler(
    State(db): State<Database>,
    auth: AuthUser,
    AppJson(body): AppJson<JournalRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    let content = body.content.trim();
    if content.is_empty() {
        return Err(AppError::validation(
            "Please write something in your journal entry.",
        ));
    }
    check_scale("Mood rating", body.mood_rating)?;

    let now = Utc::now();
    let title = match body.title.trim() {
        "" => format!("Journal Entry - {}", now.format("%B %d, %Y")),
        title => title.to_string(),
    };

    let entry = db
        .add_journal_entry(
            auth.user.id,
            NewJournalEntry {
                title,
                content: content.to_string(),
                mood_rating: body.mood_rating,
            },
            now,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Journal entry saved successfully!",
            "entry": entry,
        })),
    ))
}

// ---------------------------------------------------------------------------
// Mood tracking
// ---------------------------------------------------------------------------

/// GET /mood — recent entries, newest first.
async fn list_mood_handler(State(db): State<Database>, auth: AuthUser) -> Result<Json<Value>> {
    let entries = db.recent_mood_entries(auth.user.id, MOOD_HISTORY_LIMIT).await?;
    Ok(Json(serde_json::json!({ "entries": entries })))
}

/// POST /mood — create or replace today's entry.
async fn add_mood_handler(
    State(db): State<Database>,
    auth: AuthUser,
    AppJson(body): AppJson<MoodRequest>,
) -> Result<Json<Value>> {
    let mood_score = match body.mood_score {
        Some(score) if score != 0 => score,
        _ => return Err(AppError::validation("Please select your mood score.")),
    };
    check_scale("Mood score", Some(mood_score))?;
    check_scale("Energy level", body.energy_level)?;
    check_scale("Anxiety level", body.anxiety_level)?;
    if let Some(hours) = body.sleep_hours {
        if !(0.0..=24.0).contains(&hours) {
            return Err(AppError::validation("Sleep hours must be between 0 and 24."));
        }
    }

    let reading = MoodReading {
        mood_score,
        energy_level: body.energy_level,
        anxiety_level: body.anxiety_level,
        sleep_hours: body.sleep_hours,
        notes: body.notes.filter(|n| !n.trim().is_empty()),
    };
    let (entry, write) = db.upsert_daily_mood(auth.user.id, reading, Utc::now()).await?;

    let message = match write {
        MoodWrite::Created => "Mood entry saved successfully!",
        MoodWrite::Updated => "Today's mood entry updated!",
    };
    Ok(Json(serde_json::json!({
        "message": message,
        "status": write,
        "entry": entry,
    })))
}

// ---------------------------------------------------------------------------
// Static content
// ---------------------------------------------------------------------------

/// GET /resources
async fn resources_handler() -> Json<Value> {
    Json(serde_json::json!({ "resources": CRISIS_RESOURCES }))
}

async fn not_found_handler() -> AppError {
    AppError::NotFound("Page not found.".into())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LlmSettings;
    use crate::llm::OpenAiCompatibleGenerator;
    use crate::support::{FallbackCategory, FallbackTable, ResponseSelector, CRISIS_RESPONSE};
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use std::sync::Arc;
    use tower::ServiceExt;

    /// App with an in-memory database and no generation credential, so
    /// every non-crisis reply comes from the fallback table.
    fn test_app() -> Router {
        let db = Database::open_in_memory().unwrap();
        let generator = OpenAiCompatibleGenerator::new(&LlmSettings::default()).unwrap();
        let selector = ResponseSelector::new(Arc::new(generator));
        app_router(AppState::new(db, selector))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn register_and_login(app: &Router, username: &str) -> String {
        let (status, _) = send(
            app,
            Method::POST,
            "/register",
            None,
            Some(serde_json::json!({
                "username": username,
                "email": format!("{username}@example.com"),
                "password": "s3cret-pass",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, json) = send(
            app,
            Method::POST,
            "/login",
            None,
            Some(serde_json::json!({"username": username, "password": "s3cret-pass"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        json["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = test_app();
        let (status, json) = send(&app, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], crate::VERSION);
        assert_eq!(json["service"], "mindcare");
    }

    #[tokio::test]
    async fn test_healthz_endpoint() {
        let app = test_app();
        let response = app
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 64).await.unwrap();
        assert_eq!(&body[..], b"OK!");
    }

    #[tokio::test]
    async fn test_register_login_profile() {
        let app = test_app();
        let token = register_and_login(&app, "robin").await;

        let (status, json) = send(&app, Method::GET, "/profile", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["user"]["username"], "robin");
        assert!(json["user"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_malformed_body_gets_json_error() {
        let app = test_app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"username": 5"#))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(json["error"].is_string());

        let (status, json) = send(
            &app,
            Method::POST,
            "/register",
            None,
            Some(serde_json::json!({"username": 5, "email": "a@b.c", "password": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("username"));
    }

    #[tokio::test]
    async fn test_register_requires_all_fields() {
        let app = test_app();
        let (status, json) = send(
            &app,
            Method::POST,
            "/register",
            None,
            Some(serde_json::json!({"username": "robin", "password": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "All fields are required.");
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let app = test_app();
        register_and_login(&app, "robin").await;

        let (status, json) = send(
            &app,
            Method::POST,
            "/register",
            None,
            Some(serde_json::json!({
                "username": "robin",
                "email": "new@example.com",
                "password": "pw",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(json["error"].as_str().unwrap().starts_with("Username already exists"));
    }

    #[tokio::test]
    async fn test_login_by_email_and_bad_password() {
        let app = test_app();
        register_and_login(&app, "robin").await;

        let (status, json) = send(
            &app,
            Method::POST,
            "/login",
            None,
            Some(serde_json::json!({"username": "robin@example.com", "password": "s3cret-pass"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Welcome back, robin!");

        let (status, json) = send(
            &app,
            Method::POST,
            "/login",
            None,
            Some(serde_json::json!({"username": "robin", "password": "nope"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"], "Invalid username or password.");
    }

    #[tokio::test]
    async fn test_personal_routes_require_login() {
        let app = test_app();
        for uri in ["/dashboard", "/chat", "/journal", "/mood", "/profile"] {
            let (status, json) = send(&app, Method::GET, uri, None, None).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
            assert_eq!(json["error"], crate::auth::LOGIN_REQUIRED);
        }

        let (status, _) = send(&app, Method::GET, "/dashboard", Some("forged"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_logout_revokes_token() {
        let app = test_app();
        let token = register_and_login(&app, "robin").await;

        let (status, _) = send(&app, Method::POST, "/logout", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, Method::GET, "/profile", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_crisis_message_is_flagged_and_stored() {
        let app = test_app();
        let token = register_and_login(&app, "robin").await;

        let (status, json) = send(
            &app,
            Method::POST,
            "/chat",
            Some(&token),
            Some(serde_json::json!({"message": "  I want to kill myself  "})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["is_crisis"], true);
        assert_eq!(json["notice"], CRISIS_NOTICE);
        assert_eq!(json["assistant_message"]["message_text"], CRISIS_RESPONSE);
        assert_eq!(json["user_message"]["message_text"], "I want to kill myself");

        let (_, history) = send(&app, Method::GET, "/chat", Some(&token), None).await;
        let messages = history["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["is_user_message"], true);
        assert_eq!(messages[0]["is_crisis"], false);
        assert_eq!(messages[1]["is_user_message"], false);
        assert_eq!(messages[1]["is_crisis"], true);
    }

    #[tokio::test]
    async fn test_non_crisis_message_uses_fallback_without_credential() {
        let app = test_app();
        let token = register_and_login(&app, "robin").await;

        let (status, json) = send(
            &app,
            Method::POST,
            "/chat",
            Some(&token),
            Some(serde_json::json!({"message": "I'm really anxious about my test tomorrow"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["is_crisis"], false);
        assert!(json["notice"].is_null());
        assert_eq!(json["source"]["category"], "anxiety");
        assert_eq!(
            json["assistant_message"]["message_text"],
            FallbackTable::default().reply(FallbackCategory::Anxiety)
        );
        assert_eq!(json["assistant_message"]["is_crisis"], false);
    }

    #[tokio::test]
    async fn test_empty_chat_message_rejected() {
        let app = test_app();
        let token = register_and_login(&app, "robin").await;

        let (status, json) = send(
            &app,
            Method::POST,
            "/chat",
            Some(&token),
            Some(serde_json::json!({"message": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Please enter a message.");

        let (_, history) = send(&app, Method::GET, "/chat", Some(&token), None).await;
        assert!(history["messages"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_journal_defaults_title_and_validates() {
        let app = test_app();
        let token = register_and_login(&app, "robin").await;

        let (status, json) = send(
            &app,
            Method::POST,
            "/journal",
            Some(&token),
            Some(serde_json::json!({"content": "Today was okay.", "mood_rating": 6})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(json["entry"]["title"]
            .as_str()
            .unwrap()
            .starts_with("Journal Entry - "));

        let (status, _) = send(
            &app,
            Method::POST,
            "/journal",
            Some(&token),
            Some(serde_json::json!({"title": "Empty", "content": "  "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            Method::POST,
            "/journal",
            Some(&token),
            Some(serde_json::json!({"content": "x", "mood_rating": 11})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, list) = send(&app, Method::GET, "/journal", Some(&token), None).await;
        assert_eq!(list["entries"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_mood_same_day_updates() {
        let app = test_app();
        let token = register_and_login(&app, "robin").await;

        let (status, json) = send(
            &app,
            Method::POST,
            "/mood",
            Some(&token),
            Some(serde_json::json!({"mood_score": 3, "sleep_hours": 6.5})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "created");

        let (_, json) = send(
            &app,
            Method::POST,
            "/mood",
            Some(&token),
            Some(serde_json::json!({"mood_score": 7, "notes": "better"})),
        )
        .await;
        assert_eq!(json["status"], "updated");
        assert_eq!(json["message"], "Today's mood entry updated!");

        let (_, list) = send(&app, Method::GET, "/mood", Some(&token), None).await;
        let entries = list["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["mood_score"], 7);
        assert!(entries[0]["sleep_hours"].is_null());
    }

    #[tokio::test]
    async fn test_mood_validation() {
        let app = test_app();
        let token = register_and_login(&app, "robin").await;

        for body in [
            serde_json::json!({}),
            serde_json::json!({"mood_score": 0}),
            serde_json::json!({"mood_score": 12}),
            serde_json::json!({"mood_score": 5, "anxiety_level": -1}),
            serde_json::json!({"mood_score": 5, "sleep_hours": 30.0}),
        ] {
            let (status, _) = send(&app, Method::POST, "/mood", Some(&token), Some(body.clone())).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        }
    }

    #[tokio::test]
    async fn test_dashboard_reflects_activity() {
        let app = test_app();
        let token = register_and_login(&app, "robin").await;

        send(
            &app,
            Method::POST,
            "/chat",
            Some(&token),
            Some(serde_json::json!({"message": "hi there"})),
        )
        .await;
        send(
            &app,
            Method::POST,
            "/mood",
            Some(&token),
            Some(serde_json::json!({"mood_score": 9})),
        )
        .await;

        let (status, json) = send(&app, Method::GET, "/dashboard", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["stats"]["total_chats"], 1);
        assert_eq!(json["stats"]["total_journal_entries"], 0);
        assert_eq!(json["stats"]["recent_mood"], 9);
        assert_eq!(json["stats"]["days_active"], 1);
    }

    #[tokio::test]
    async fn test_resources_are_public() {
        let app = test_app();
        let (status, json) = send(&app, Method::GET, "/resources", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["resources"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let app = test_app();
        let (status, json) = send(&app, Method::GET, "/nope", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Page not found.");
    }
}
