// Adapters layer: 與外部世界互動的具體實作（終端機輸入、檔案匯出）。

pub mod export;
pub mod prompter;
