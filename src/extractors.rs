use async_trait::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;

use crate::bail_trace;
use crate::error::{TraceError, TraceResult};

/// `Json<T>` whose rejections keep axum's status but use the `{"error": ...}` body.
pub(crate) struct JsonBody<T>(pub(crate) T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = TraceError;

    async fn from_request(req: Request, state: &S) -> TraceResult<Self> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => bail_trace!(rejection.status(), rejection.body_text()),
        }
    }
}
