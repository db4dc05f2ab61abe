use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{AppError, AuthError};
use crate::AppState;

use super::User;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: User,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub is_authenticated: bool,
    pub user: User,
}

/// Value of the session cookie, if the request carries one.
pub fn session_token(req: &HttpRequest, state: &AppState) -> Option<String> {
    req.cookie(&state.config.auth.cookie_name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// Resolves the session cookie to a user, for handlers behind login.
pub async fn require_user(req: &HttpRequest, state: &AppState) -> Result<User, AppError> {
    let token = session_token(req, state);
    state.auth_service.current_user(token.as_deref()).await
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

pub async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (Some(email), Some(password)) = (non_empty(&req.email), non_empty(&req.password)) else {
        return Err(AppError::ValidationError("Email and password are required".into()));
    };

    info!("Received login request for email: {}", email);
    let Some(user) = state.auth_service.authenticate(email, password) else {
        warn!("Login failed for email: {}", email);
        return Err(AuthError::InvalidCredentials.into());
    };

    let token = state.auth_service.create_session(&user.id).await?;
    info!("Login successful for email: {}", email);

    let auth = &state.config.auth;
    let cookie = Cookie::build(auth.cookie_name.clone(), token)
        .http_only(true)
        .path("/")
        .same_site(SameSite::Strict)
        .secure(auth.secure_cookie)
        .max_age(CookieDuration::seconds(state.auth_service.session_ttl().num_seconds()))
        .finish();

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(LoginResponse { success: true, user }))
}

pub async fn logout(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    if let Some(token) = session_token(&req, &state) {
        state.auth_service.end_session(&token).await?;
        info!("Session ended");
    }

    let mut removal = Cookie::build(state.config.auth.cookie_name.clone(), "")
        .path("/")
        .finish();
    removal.make_removal();

    Ok(HttpResponse::Ok().cookie(removal).json(serde_json::json!({
        "success": true,
        "message": "Successfully logged out"
    })))
}

pub async fn me(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = require_user(&req, &state).await?;
    Ok(HttpResponse::Ok().json(MeResponse {
        is_authenticated: true,
        user,
    }))
}
