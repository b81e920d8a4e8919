//! Session API handlers
//!
//! - POST /api/auth/register - Create an account and start a session
//! - POST /api/auth/login - Start a session
//! - POST /api/auth/logout - End the session

use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use xsslab_auth::MaybeAuth;
use xsslab_common::{
    validation::{validate_login, validate_register},
    Envelope, Error, RepositoryError, Result, Validate, ValidatedJson, ValidationResult,
};

use crate::api::middleware::AccountsState;
use crate::domain::entities::{User, UserProfile};

const INVALID_CREDENTIALS: &str = "Invalid username or password";
const USERNAME_TAKEN: &str = "Username already exists";

/// Request body for registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> ValidationResult {
        validate_register(
            self.username.as_deref(),
            self.password.as_deref(),
            self.name.as_deref(),
        )
    }
}

/// Request body for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Validate for LoginRequest {
    fn validate(&self) -> ValidationResult {
        validate_login(self.username.as_deref(), self.password.as_deref())
    }
}

/// `user` payload of register and login responses
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: UserProfile,
}

/// Build a response that also starts a session for `user`
fn with_session(
    state: &AccountsState,
    status: StatusCode,
    user: &User,
    message: &str,
) -> Result<Response> {
    let token = state.auth.issue_token(&user.uuid, &user.username)?;
    let cookie = state.auth.session_cookie(&token);

    let body = Envelope::ok(SessionResponse {
        user: user.profile(),
    })
    .with_message(message);

    Ok((status, [(SET_COOKIE, cookie)], Json(body)).into_response())
}

/// Register a new user
///
/// **POST /api/auth/register**
///
/// Returns 201 with the session cookie set, 409 if the username is taken.
pub async fn register(
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<Response> {
    let username = request.username.unwrap_or_default();
    let password = request.password.unwrap_or_default();
    let name = request.name.unwrap_or_default();

    let existing = state
        .users
        .find_by_username(&username)
        .await
        .map_err(|e| Error::failed("Registration failed", e))?;
    if existing.is_some() {
        return Err(Error::Conflict(USERNAME_TAKEN.to_string()));
    }

    let user = User::new(username, &password, name);

    // The UNIQUE index still catches a concurrent registration of the same name
    match state.users.create(&user).await {
        Ok(()) => {}
        Err(RepositoryError::AlreadyExists) => {
            return Err(Error::Conflict(USERNAME_TAKEN.to_string()))
        }
        Err(e) => return Err(Error::failed("Registration failed", e)),
    }

    tracing::info!(user_uuid = %user.uuid, username = %user.username, "User registered");

    with_session(&state, StatusCode::CREATED, &user, "Registration successful")
}

/// Log in with username and password
///
/// **POST /api/auth/login**
///
/// Unknown usernames and wrong passwords get the same 401.
pub async fn login(
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Response> {
    let username = request.username.unwrap_or_default();
    let password = request.password.unwrap_or_default();

    let user = state
        .users
        .find_by_username(&username)
        .await
        .map_err(|e| Error::failed("Login failed", e))?;

    let Some(user) = user.filter(|u| u.check_password(&password)) else {
        tracing::debug!(username = %username, "Login rejected");
        return Err(Error::Authentication(INVALID_CREDENTIALS.to_string()));
    };

    state
        .users
        .touch_last_login(&user.uuid, chrono::Utc::now().timestamp())
        .await
        .map_err(|e| Error::failed("Login failed", e))?;

    tracing::info!(user_uuid = %user.uuid, "User logged in");

    with_session(&state, StatusCode::OK, &user, "Login successful")
}

/// End the session
///
/// **POST /api/auth/logout**
///
/// Always succeeds; the cookie is cleared with the same attributes it was set with.
pub async fn logout(
    MaybeAuth(session): MaybeAuth,
    State(state): State<AccountsState>,
) -> impl IntoResponse {
    if let Some(user) = session {
        tracing::info!(user_uuid = %user.uuid, "User logged out");
    }

    (
        [(SET_COOKIE, state.auth.clear_cookie())],
        Json(Envelope::message("Logout successful")),
    )
}
