use axum::http::StatusCode;

/// Common trait for all custom error types in the application
pub trait AppError: std::error::Error + Send + Sync + 'static {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Get a user-friendly error message
    fn user_message(&self) -> String;

    /// Get the error code for client-side handling
    fn error_code(&self) -> &'static str;
}

/// Macro to implement IntoResponse for all AppError types
/// This provides consistent HTTP response formatting
macro_rules! impl_into_response {
    ($error_type:ty) => {
        impl axum::response::IntoResponse for $error_type {
            fn into_response(self) -> axum::response::Response {
                use crate::errors::AppError;
                use axum::{http::StatusCode, response::Json};
                use serde_json::json;

                let status = self.status_code();
                if status == StatusCode::INTERNAL_SERVER_ERROR {
                    tracing::error!("{}: {}", self.error_code(), self);
                } else {
                    tracing::warn!("{}: {}", self.error_code(), self);
                }

                let body = Json(json!({
                    "error": self.user_message(),
                    "code": self.error_code(),
                    "status": status.as_u16()
                }));

                (status, body).into_response()
            }
        }
    };
}

// Re-export the macro for use in other modules
pub(crate) use impl_into_response;

// Submodules for endpoint-specific errors
pub mod scan;
