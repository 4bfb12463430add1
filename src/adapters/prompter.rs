use crate::domain::ports::Prompter;
use crate::utils::error::{LangError, Result};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// 從標準輸入讀取回答
#[derive(Debug, Default)]
pub struct ConsolePrompter;

impl ConsolePrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for ConsolePrompter {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(LangError::InputClosed);
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// 預先準備好的回答，用於非互動模式與測試
#[derive(Debug, Default, Clone)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// 每行一個回答
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        tracing::debug!(
            "Loaded {} scripted answers from {}",
            content.lines().count(),
            path.as_ref().display()
        );
        Ok(Self::new(content.lines()))
    }

    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        self.asked.push(prompt.trim().to_string());
        self.answers.pop_front().ok_or(LangError::InputClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    #[test]
    fn test_scripted_answers_in_order() {
        let mut prompter = ScriptedPrompter::new(["a", "x"]);
        assert_eq!(prompter.ask("first? ").unwrap(), "a");
        assert_eq!(prompter.ask("second? ").unwrap(), "x");
        assert!(matches!(prompter.ask("third? "), Err(LangError::InputClosed)));
        assert_eq!(prompter.asked(), ["first?", "second?", "third?"]);
    }

    #[test]
    fn test_from_file_keeps_blank_lines() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "c\n\nn").unwrap();

        let mut prompter = ScriptedPrompter::from_file(file.path()).unwrap();
        assert_eq!(prompter.remaining(), 3);
        assert_eq!(prompter.ask("").unwrap(), "c");
        assert_eq!(prompter.ask("").unwrap(), "");
        assert_eq!(prompter.ask("").unwrap(), "n");
    }
}
