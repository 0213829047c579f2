use crate::capture;
use crate::dto::{CaptureStartedResponse, CaptureStoppedResponse};
use crate::error::ApiResult;
use crate::state::SharedState;
use axum::extract::State;
use axum::Json;

pub async fn start_collection(State(state): State<SharedState>) -> ApiResult<Json<CaptureStartedResponse>> {
    let (capture_id, filename) = capture::start(&state).await?;
    Ok(Json(CaptureStartedResponse { capture_id, filename }))
}

pub async fn stop_collection(State(state): State<SharedState>) -> ApiResult<Json<CaptureStoppedResponse>> {
    let (capture_id, local_path) = capture::stop(&state).await?;
    Ok(Json(CaptureStoppedResponse {
        capture_id,
        local_path: local_path.display().to_string(),
    }))
}
