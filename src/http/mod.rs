//! # HTTP Layer
//!
//! Thin glue between axum and the core: the shared [`AppState`], the route
//! table, the bearer-token guard, and the single place where [`Error`]
//! variants map to status codes. Handlers validate input, call into the
//! auth and store layers, and shape JSON responses; no business logic
//! lives here.

pub mod handlers;

use crate::auth::SessionStore;
use crate::config::StorageConfig;
use crate::error::{Error, Result};
use crate::model::User;
use crate::store::{ProblemStore, UserStore};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

/// Shared application state: both stores behind `Arc`, plus the session
/// table. Cloning is cheap; every clone works on the same files.
#[derive(Clone)]
pub struct AppState {
    pub problems: Arc<ProblemStore>,
    pub users: Arc<UserStore>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: &StorageConfig) -> Result<Self> {
        Ok(Self {
            problems: Arc::new(ProblemStore::open(config)?),
            users: Arc::new(UserStore::open(config)?),
            sessions: SessionStore::new(),
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/login", post(handlers::login))
        .route("/signup", post(handlers::signup))
        .route("/logout", post(handlers::logout))
        .route("/api/user", get(handlers::current_user))
        .route("/api/user/password", put(handlers::change_password))
        .route(
            "/api/problems",
            get(handlers::get_problems).post(handlers::create_problem),
        )
        .route(
            "/api/problems/{id}",
            get(handlers::get_problem)
                .put(handlers::update_problem)
                .delete(handlers::delete_problem),
        )
        .route("/api/statistics", get(handlers::get_statistics))
        .route("/api/export", get(handlers::export_problems))
        .with_state(state)
}

/// Extracts the opaque session token from `Authorization: Bearer <token>`.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<Uuid> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    Uuid::parse_str(token.trim()).ok()
}

/// The login guard: resolves the presented token to an existing user.
///
/// Missing or unknown tokens are an authentication failure. A token whose
/// user has since disappeared is discarded and reported as not found,
/// matching the profile endpoint's contract.
pub(crate) fn require_user(state: &AppState, headers: &HeaderMap) -> Result<User> {
    let token = bearer_token(headers).ok_or(Error::AuthRequired)?;
    let user_id = state.sessions.resolve(&token).ok_or(Error::AuthRequired)?;
    match state.users.get_by_id(&user_id) {
        Some(user) => Ok(user),
        None => {
            state.sessions.revoke(&token);
            Err(Error::UserNotFound)
        }
    }
}

impl Error {
    fn status(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::UsernameTaken | Error::EmailTaken => {
                StatusCode::BAD_REQUEST
            }
            Error::AuthRequired | Error::InvalidCredentials | Error::WrongPassword => {
                StatusCode::UNAUTHORIZED
            }
            Error::ProblemNotFound | Error::UserNotFound => StatusCode::NOT_FOUND,
            Error::Io(_) | Error::Serialization(_) | Error::PasswordHash(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
            // internal details stay out of the response body
            return (status, Json(json!({ "error": "Internal server error" }))).into_response();
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
