use actix_web::{web, HttpRequest, HttpResponse};

use super::StoreSettings;
use crate::auth::handlers::require_user;
use crate::error::AppError;
use crate::AppState;

pub async fn get_settings(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require_user(&req, &state).await?;
    let settings = state.preferences.get().await;
    Ok(HttpResponse::Ok().json(settings.masked()))
}

pub async fn update_settings(
    req: HttpRequest,
    body: web::Json<StoreSettings>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require_user(&req, &state).await?;
    let updated = state.preferences.update(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated.masked()))
}
