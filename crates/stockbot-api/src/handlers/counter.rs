//! Reply counter endpoint for operators

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use stockbot_service::ReplyCounterService;

use crate::response::ApiResult;
use crate::state::AppState;

/// Counter value after an increment
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyCountResponse {
    pub line_user_id: String,
    pub reply_count: i32,
}

/// Add one to a user's reply counter
///
/// POST /api/countreplytimes/reply/:line_user_id
pub async fn increment_reply_count(
    State(state): State<AppState>,
    Path(line_user_id): Path<String>,
) -> ApiResult<Json<ReplyCountResponse>> {
    let service = ReplyCounterService::new(state.service_context());
    let reply_count = service.increment(&line_user_id).await?;

    Ok(Json(ReplyCountResponse {
        line_user_id,
        reply_count,
    }))
}
