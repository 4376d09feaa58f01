//! Inbound request authentication

mod signature;

pub use signature::{SignatureVerifier, SIGNATURE_HEADER};
