//! TWSE market information (MIS) quote client

use async_trait::async_trait;
use reqwest::Client;
use stockbot_common::MarketConfig;
use stockbot_core::{MarketDataApi, StockCode, UpstreamResult};
use tracing::instrument;

use crate::http::{build_client, join_url, send_for_text};

/// Fetches raw `getStockInfo.jsp` documents for listed (`tse`) stocks
#[derive(Clone)]
pub struct TwseClient {
    client: Client,
    base_url: String,
}

impl TwseClient {
    pub fn new(config: &MarketConfig, timeout: std::time::Duration) -> UpstreamResult<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: config.api_base_url.clone(),
        })
    }

    fn channel(code: &StockCode) -> String {
        format!("tse_{code}.tw")
    }
}

#[async_trait]
impl MarketDataApi for TwseClient {
    #[instrument(skip(self), fields(code = %code))]
    async fn fetch_quote(&self, code: &StockCode) -> UpstreamResult<String> {
        let request = self
            .client
            .get(join_url(&self.base_url, "stock/api/getStockInfo.jsp"))
            .query(&[("ex_ch", Self::channel(code))]);

        send_for_text(request).await
    }
}
