use crate::utils::error::Result;

/// 互動輸入來源：終端機或預先寫好的答案
pub trait Prompter {
    /// 顯示提示並讀取一行回答（不含換行）。輸入結束時回傳 `LangError::InputClosed`。
    fn ask(&mut self, prompt: &str) -> Result<String>;
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        (**self).ask(prompt)
    }
}
