//! Four-digit receiver endpoint

use axum::{extract::Path, http::StatusCode, Json};
use tracing::info;

use crate::response::MessageBody;

/// Whether `id` is exactly four ASCII digits
pub fn is_four_digits(id: &str) -> bool {
    id.len() == 4 && id.bytes().all(|b| b.is_ascii_digit())
}

/// Accept a four-digit number
///
/// GET /api/externalapi/receive/:id
pub async fn receive(Path(id): Path<String>) -> (StatusCode, Json<MessageBody>) {
    if is_four_digits(&id) {
        info!(id = %id, "Four-digit number received");
        (
            StatusCode::OK,
            Json(MessageBody::new(format!("接收到的四位數字是: {id}"))),
        )
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(MessageBody::new("無效的四位數字")),
        )
    }
}
