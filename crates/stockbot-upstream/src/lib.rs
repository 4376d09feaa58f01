//! # stockbot-upstream
//!
//! reqwest-backed implementations of the outbound ports defined in
//! `stockbot-core::traits`:
//!
//! - [`LineClient`] for [`MessagingApi`](stockbot_core::MessagingApi)
//! - [`TwseClient`] for [`MarketDataApi`](stockbot_core::MarketDataApi)
//! - [`GeminiClient`] for [`TextGenerator`](stockbot_core::TextGenerator)
//!
//! Every client owns one `reqwest::Client` built with a bounded timeout.
//! Transport failures, non-2xx statuses and undecodable bodies all surface
//! as [`UpstreamError`](stockbot_core::UpstreamError).

mod gemini;
mod http;
mod line;
mod twse;

pub use gemini::GeminiClient;
pub use http::build_client;
pub use line::LineClient;
pub use twse::TwseClient;
