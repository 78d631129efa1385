use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Deserializer, Serialize};

use crate::engine::ProcessOutcome;
use crate::error::TraceError;

/// Body of `POST /check`. Absent or `null` texts are empty strings.
#[derive(Deserialize, Debug, Default, PartialEq)]
pub struct SimilarityRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text1: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text2: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum SimilarityResponse {
    Ok {
        similarity: String,
    },
    Error {
        #[serde(rename = "error")]
        message: String,
        #[serde(skip)]
        status: u16,
    },
}

/// Maps every engine outcome onto exactly one response.
pub fn interpret(outcome: ProcessOutcome) -> SimilarityResponse {
    match outcome {
        ProcessOutcome::Success(raw) => SimilarityResponse::Ok {
            similarity: raw.trim().to_string(),
        },
        ProcessOutcome::Failure { stderr, .. } => SimilarityResponse::Error {
            message: stderr,
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        },
    }
}

impl IntoResponse for SimilarityResponse {
    fn into_response(self) -> Response {
        match self {
            ok @ SimilarityResponse::Ok { .. } => (StatusCode::OK, Json(ok)).into_response(),
            SimilarityResponse::Error { message, status } => {
                let status =
                    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                TraceError::new(status, message).into_response()
            }
        }
    }
}
