//! Watchlist model -> entity mapper

use stockbot_core::entities::WatchlistEntry;

use crate::models::WatchlistEntryModel;

impl From<WatchlistEntryModel> for WatchlistEntry {
    fn from(model: WatchlistEntryModel) -> Self {
        WatchlistEntry {
            id: model.id,
            user_id: model.user_id,
            stock_code: model.stock_code,
            exchange: model.exchange,
            alias_name: model.alias_name,
            created_at: model.created_at,
        }
    }
}
