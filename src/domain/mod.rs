// Domain layer: 語言資料模型與介面 (ports)，不依賴外部 I/O。

pub mod model;
pub mod ports;
