use thiserror::Error;
use actix_web::{ResponseError, HttpResponse, http::StatusCode};
use serde_json::json;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    AuthError(#[from] AuthError),

    #[error("Catalog error: {0}")]
    CatalogError(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        // Internal causes stay in the server log.
        let message = if status.is_server_error() {
            error!(error = %self, "Request failed with an internal error");
            "An unexpected error occurred".to_string()
        } else {
            self.to_string()
        };
        let response = json!({
            "error": {
                "status": status.as_u16(),
                "message": message
            }
        });
        HttpResponse::build(status).json(response)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::AuthError(e) => match e {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::NotAuthenticated => StatusCode::UNAUTHORIZED,
                AuthError::InvalidSession => StatusCode::UNAUTHORIZED,
                AuthError::UserNotFound => StatusCode::NOT_FOUND,
            },
            AppError::CatalogError(e) => match e {
                CatalogError::UnsupportedUrl(_) => StatusCode::NOT_FOUND,
                CatalogError::ProductNotFound(_) => StatusCode::NOT_FOUND,
                CatalogError::ExtractionFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
                CatalogError::ImportFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Invalid session")]
    InvalidSession,

    #[error("User not found")]
    UserNotFound,
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Unable to extract product data, check that the URL is valid: {0}")]
    UnsupportedUrl(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Storefront import failed: {0}")]
    ImportFailed(String),

    #[error("Product {0} not found")]
    ProductNotFound(String),
}
