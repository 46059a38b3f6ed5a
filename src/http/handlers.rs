use super::{bearer_token, require_user, AppState};
use crate::auth;
use crate::error::{Error, Result};
use crate::model::{Problem, ProblemPatch, UserProfile};
use crate::store::OwnedProblem;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

// Request bodies use Option/defaulted fields so that a missing field is a
// 400 with a message, not a deserialization rejection.

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateProblemRequest {
    pub problem: Option<String>,
    pub solution: Option<String>,
    pub category: Option<String>,
}

pub(crate) async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>> {
    let user = auth::login(&state.users, &request.username, &request.password)?;
    let token = state.sessions.create(&user.id);
    info!(username = %user.username, "login");
    Ok(Json(json!({
        "message": "Login successful",
        "token": token,
        "user": { "id": user.id, "username": user.username },
    })))
}

pub(crate) async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse> {
    let user = auth::signup(
        &state.users,
        &request.username,
        &request.email,
        &request.password,
    )?;
    // signup implies login
    let token = state.sessions.create(&user.id);
    info!(username = %user.username, "signup");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Signup successful",
            "token": token,
            "user": { "id": user.id, "username": user.username },
        })),
    ))
}

pub(crate) async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Json<Value> {
    if let Some(token) = bearer_token(&headers) {
        state.sessions.revoke(&token);
    }
    Json(json!({ "message": "Logout successful" }))
}

pub(crate) async fn current_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UserProfile>> {
    let user = require_user(&state, &headers)?;
    Ok(Json(UserProfile::from(&user)))
}

pub(crate) async fn change_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<Value>> {
    let user = require_user(&state, &headers)?;
    auth::change_password(
        &state.users,
        &user,
        &request.current_password,
        &request.new_password,
    )?;
    info!(username = %user.username, "password changed");
    Ok(Json(json!({ "message": "Password changed successfully" })))
}

pub(crate) async fn get_problems(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<OwnedProblem>>> {
    let user = require_user(&state, &headers)?;
    Ok(Json(state.problems.get_user_problems(&user.id)))
}

pub(crate) async fn create_problem(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateProblemRequest>,
) -> Result<impl IntoResponse> {
    let user = require_user(&state, &headers)?;
    let (Some(problem), Some(solution)) = (request.problem, request.solution) else {
        return Err(Error::validation("Problem and solution are required"));
    };

    let record = Problem::new(problem, solution, request.category);
    let row = state.problems.save_user_problem(record, &user.id)?;
    Ok((StatusCode::CREATED, Json(row)))
}

pub(crate) async fn get_problem(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let user = require_user(&state, &headers)?;
    let row = state
        .problems
        .get_user_problem(&id, &user.id)
        .ok_or(Error::ProblemNotFound)?;
    Ok(Json(row))
}

pub(crate) async fn update_problem(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(patch): Json<ProblemPatch>,
) -> Result<impl IntoResponse> {
    let user = require_user(&state, &headers)?;
    let row = state
        .problems
        .update_user_problem(&id, &user.id, &patch)?
        .ok_or(Error::ProblemNotFound)?;
    Ok(Json(row))
}

pub(crate) async fn delete_problem(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let user = require_user(&state, &headers)?;
    if !state.problems.delete_user_problem(&id, &user.id)? {
        return Err(Error::ProblemNotFound);
    }
    Ok(Json(json!({ "message": "Problem deleted successfully" })))
}

pub(crate) async fn get_statistics(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let user = require_user(&state, &headers)?;
    Ok(Json(state.problems.get_user_statistics(&user.id)))
}

/// Streams the caller's records as a downloadable JSON file. A user with
/// no records gets a valid empty array.
pub(crate) async fn export_problems(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let user = require_user(&state, &headers)?;
    let rows = state.problems.get_user_problems(&user.id);
    let body = serde_json::to_string_pretty(&rows)?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=problems_export.json",
            ),
        ],
        body,
    ))
}
