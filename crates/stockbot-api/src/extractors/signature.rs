//! Signed webhook body extractor
//!
//! Buffers the raw body and checks it against the `x-line-signature` header
//! before any JSON parsing happens.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRef, FromRequest, Request},
};
use stockbot_common::{AppError, SIGNATURE_HEADER};

use crate::response::ApiError;
use crate::state::AppState;

/// Raw request body whose signature has been verified
#[derive(Debug, Clone)]
pub struct SignedBody(pub Bytes);

#[async_trait]
impl<S> FromRequest<S> for SignedBody
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let signature = req
            .headers()
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_body(e.body_text()))?;

        let app_state = AppState::from_ref(state);
        if !app_state.verifier().verify(&body, signature.as_deref()) {
            tracing::warn!(
                has_header = signature.is_some(),
                bytes = body.len(),
                "Webhook signature rejected"
            );
            return Err(AppError::InvalidSignature.into());
        }

        Ok(Self(body))
    }
}
