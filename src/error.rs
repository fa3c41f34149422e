//! Handler-level error mapping onto HTTP status codes.

use poem::http::StatusCode;

pub fn not_found(what: &str) -> poem::Error {
    poem::Error::from_string(format!("{what} not found"), StatusCode::NOT_FOUND)
}

pub fn forbidden(msg: &str) -> poem::Error {
    poem::Error::from_string(msg.to_string(), StatusCode::FORBIDDEN)
}

/// Field-level validation failure; no partial writes have happened.
pub fn invalid(errors: &validator::ValidationErrors) -> poem::Error {
    let body = serde_json::to_string(errors).unwrap_or_else(|_| "invalid input".to_string());
    poem::Error::from_string(body, StatusCode::UNPROCESSABLE_ENTITY)
}

/// A single out-of-band field error, rendered in the same shape as
/// [`invalid`].
pub fn invalid_field(field: &str, message: &str) -> poem::Error {
    let mut errors = serde_json::Map::new();
    errors.insert(
        field.to_string(),
        serde_json::json!([{ "code": "invalid", "message": message }]),
    );
    poem::Error::from_string(
        serde_json::Value::Object(errors).to_string(),
        StatusCode::UNPROCESSABLE_ENTITY,
    )
}

/// Persistence failures, slug unique-constraint collisions included, are not
/// caught or retried here.
pub fn db_error(e: sea_orm::DbErr) -> poem::Error {
    tracing::error!(error = %e, "database error");
    poem::Error::from_string(e.to_string(), StatusCode::INTERNAL_SERVER_ERROR)
}

pub fn internal(e: impl std::fmt::Display) -> poem::Error {
    poem::Error::from_string(e.to_string(), StatusCode::INTERNAL_SERVER_ERROR)
}
