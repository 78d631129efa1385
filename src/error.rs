use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub struct TraceError {
    pub status: StatusCode,
    pub message: HttpErrorResponse,
}

/// Body of every non-success response: `{"error": "<message>"}`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HttpErrorResponse {
    pub(crate) error: String,
}

impl From<String> for HttpErrorResponse {
    fn from(message: String) -> Self {
        HttpErrorResponse { error: message }
    }
}

impl From<&str> for HttpErrorResponse {
    fn from(message: &str) -> Self {
        HttpErrorResponse {
            error: message.to_string(),
        }
    }
}

impl TraceError {
    pub fn new(status: StatusCode, message: impl Into<HttpErrorResponse>) -> Self {
        TraceError {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for TraceError {
    fn into_response(self) -> Response {
        (self.status, Json(self.message)).into_response()
    }
}

pub type TraceResult<T, E = TraceError> = Result<T, E>;

#[macro_export]
macro_rules! bail_trace {
    ($error_message:expr) => {
        return Err($crate::error::TraceError::new(
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            $error_message,
        ))
    };
    ($status:expr, $error_message:expr) => {
        return Err($crate::error::TraceError::new($status, $error_message))
    };
    ($status:expr, $fmt:expr $(, $arg:expr)+) => {
        return Err($crate::error::TraceError::new($status, format!($fmt $(, $arg)+)))
    };
}

#[macro_export]
macro_rules! exit_err {
    ($code:expr, $fmt:expr $(, $arg:expr)*) => {{
        tracing::error!($fmt $(, $arg)*);
        std::process::exit($code);
    }};
}
