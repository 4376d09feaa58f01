//! Fixed user-facing texts (Traditional Chinese)

use stockbot_core::StockCode;

pub const QUOTE_UNAVAILABLE: &str = "無法取得股票資訊，請稍後再試。";
pub const INVALID_STOCK_CODE: &str = "股票代號必須是四位以上數字，請重新輸入。";
pub const GREETING: &str = "哈囉，我是你的股票小幫手 📈";
pub const UNIDENTIFIED_USER: &str = "無法識別您的帳號，請再試一次。";
pub const UNKNOWN_USER: &str = "無法找到您的帳號，請再試一次。";
pub const WATCHLIST_HEADER: &str = "您的庫存有以下股票代號：";
pub const WATCHLIST_EMPTY: &str = "您的庫存目前沒有任何股票。";
pub const AI_MISSING_CODE: &str = "請在 ai 後面輸入股票代號，例如：ai 2330";
pub const AI_UNAVAILABLE: &str = "目前無法取得 AI 分析，請稍後再試。";

pub fn added(code: &StockCode) -> String {
    format!("成功加入股票 {code} 到庫存！")
}

pub fn already_added(code: &StockCode) -> String {
    format!("您已經加入過股票 {code}。")
}

pub fn removed(code: &StockCode) -> String {
    format!("成功刪除股票 {code} 從您的庫存！")
}

pub fn not_in_watchlist(code: &StockCode) -> String {
    format!("您的庫存中沒有找到股票 {code}，無法刪除。")
}

pub fn welcome(display_name: &str) -> String {
    format!("歡迎加入！{display_name}\n輸入四碼股票代號（例：2330）可查價。")
}

pub fn watchlist(codes: &[String]) -> String {
    if codes.is_empty() {
        return WATCHLIST_EMPTY.to_string();
    }
    format!("{WATCHLIST_HEADER}\n{}", codes.join("\n"))
}

pub fn ai_prompt(code: &str) -> String {
    format!("請以台灣股市分析師的角度，用繁體中文在150字以內簡短分析股票代號 {code} 的近期走勢、基本面與風險。")
}
