//! Axum extractors for request handling

mod signature;

pub use signature::SignedBody;
