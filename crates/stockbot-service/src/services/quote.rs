//! Quote lookup and formatting
//!
//! Decodes a TWSE MIS `getStockInfo.jsp` document into a [`QuoteSnapshot`]
//! and renders it as the multi-line chat text. Decoding fails closed: any
//! shape problem yields `None` and the caller answers with the fixed
//! "quote unavailable" text.

use serde::Deserialize;
use stockbot_core::StockCode;
use tracing::{instrument, warn};

use super::context::ServiceContext;
use super::messages;

/// Depth of the order book shown to users
pub const LADDER_DEPTH: usize = 5;

const PLACEHOLDER: &str = "-";

#[derive(Debug, Deserialize)]
struct MisResponse {
    #[serde(rename = "msgArray", default)]
    msg_array: Vec<MisQuote>,
}

/// One `msgArray` element; every field is optional on the wire
#[derive(Debug, Default, Deserialize)]
struct MisQuote {
    /// Short name
    n: Option<String>,
    /// Full name
    nf: Option<String>,
    /// Code
    c: Option<String>,
    /// Last trade price
    z: Option<String>,
    /// Accumulated volume
    v: Option<String>,
    /// Ask prices, `_`-delimited
    a: Option<String>,
    /// Ask sizes
    f: Option<String>,
    /// Bid prices
    b: Option<String>,
    /// Bid sizes
    g: Option<String>,
    /// Previous close
    y: Option<String>,
}

/// One price level of the order book
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub price: Option<f64>,
    pub size: Option<String>,
}

/// A decoded quote
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteSnapshot {
    pub name: String,
    pub code: String,
    pub last: Option<f64>,
    pub previous_close: Option<f64>,
    pub volume: Option<String>,
    pub asks: Vec<Level>,
    pub bids: Vec<Level>,
}

impl QuoteSnapshot {
    /// Decode the first quote of a MIS document; `None` when absent or malformed
    pub fn parse(body: &str) -> Option<Self> {
        let response: MisResponse = serde_json::from_str(body).ok()?;
        let quote = response.msg_array.into_iter().next()?;

        let name = non_blank(quote.n)
            .or_else(|| non_blank(quote.nf))
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        let code = non_blank(quote.c).unwrap_or_else(|| PLACEHOLDER.to_string());

        Some(Self {
            name,
            code,
            last: quote.z.as_deref().and_then(parse_price),
            previous_close: quote.y.as_deref().and_then(parse_price),
            volume: non_blank(quote.v),
            asks: ladder(quote.a.as_deref(), quote.f.as_deref()),
            bids: ladder(quote.b.as_deref(), quote.g.as_deref()),
        })
    }

    /// Change against the previous close in percent, rounded to two decimals
    pub fn change_percent(&self) -> Option<f64> {
        let last = self.last?;
        let previous = self.previous_close?;
        if previous.abs() < f64::EPSILON {
            return None;
        }
        Some(((last - previous) / previous * 100.0 * 100.0).round() / 100.0)
    }

    /// Render the chat text
    pub fn render(&self) -> String {
        let change = self
            .change_percent()
            .map_or_else(|| PLACEHOLDER.to_string(), |pct| format!("{pct:+.2}%"));

        let mut lines = vec![
            format!("{}（{}）", self.name, self.code),
            format!("成交價：{} 漲跌幅：{change}", price_text(self.last)),
            format!("成交量：{}", self.volume.as_deref().unwrap_or(PLACEHOLDER)),
            "賣價 / 賣量 | 買價 / 買量".to_string(),
        ];
        lines.extend((0..LADDER_DEPTH).map(|depth| {
            let ask = self.asks.get(depth);
            let bid = self.bids.get(depth);
            format!(
                "{} / {} | {} / {}",
                price_text(ask.and_then(|l| l.price)),
                ask.and_then(|l| l.size.as_deref()).unwrap_or(PLACEHOLDER),
                price_text(bid.and_then(|l| l.price)),
                bid.and_then(|l| l.size.as_deref()).unwrap_or(PLACEHOLDER),
            )
        }));
        lines.join("\n")
    }
}

/// Format a quote document for chat, or `None` when it cannot be decoded
pub fn format_quote(body: &str) -> Option<String> {
    QuoteSnapshot::parse(body).map(|snapshot| snapshot.render())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != PLACEHOLDER)
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|p| p.is_finite())
}

fn price_text(price: Option<f64>) -> String {
    price.map_or_else(|| PLACEHOLDER.to_string(), |p| format!("{p:.2}"))
}

fn split_levels(raw: Option<&str>) -> Vec<&str> {
    raw.unwrap_or_default()
        .split('_')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(LADDER_DEPTH)
        .collect()
}

fn ladder(prices: Option<&str>, sizes: Option<&str>) -> Vec<Level> {
    let prices = split_levels(prices);
    let sizes = split_levels(sizes);
    let depth = prices.len().max(sizes.len());

    (0..depth)
        .map(|i| Level {
            price: prices.get(i).and_then(|p| parse_price(p)),
            size: sizes.get(i).map(|s| (*s).to_string()),
        })
        .collect()
}

/// Quote lookup service
pub struct QuoteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> QuoteService<'a> {
    /// Create a new QuoteService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Fetch and format a quote; any failure becomes the fixed fallback text
    #[instrument(skip(self), fields(code = %code))]
    pub async fn lookup(&self, code: &StockCode) -> String {
        let body = match self.ctx.market_data().fetch_quote(code).await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "Market data request failed");
                return messages::QUOTE_UNAVAILABLE.to_string();
            }
        };

        format_quote(&body).unwrap_or_else(|| {
            warn!("Market data response could not be decoded");
            messages::QUOTE_UNAVAILABLE.to_string()
        })
    }
}
