use axum::extract::State;
use tracing::debug;

use crate::api::AppState;
use crate::extractors::JsonBody;
use crate::task::similarity::{interpret, SimilarityRequest, SimilarityResponse};

#[axum_macros::debug_handler]
#[tracing::instrument(level = "info", skip_all)]
pub(crate) async fn handle_check_request(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SimilarityRequest>,
) -> SimilarityResponse {
    debug!(
        text1_bytes = req.text1.len(),
        text2_bytes = req.text2.len(),
        "Evaluating similarity"
    );
    interpret(state.engine.evaluate(&req.text1, &req.text2).await)
}
