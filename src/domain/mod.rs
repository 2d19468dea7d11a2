// Domain layer: 實體模型與對外介面（ports），不依賴具體的 HTTP 或終端實作。

pub mod model;
pub mod ports;
