// Adapters layer: 對外部系統的具體實作（HTTP 參考資料服務、終端機確認）

pub mod http;
pub mod terminal;
