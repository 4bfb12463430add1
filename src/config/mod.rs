pub mod toml_config;

use crate::core::game::GameSettings;
use crate::core::language::Language;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_positive_number, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use toml_config::LanguageConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "lang-creator")]
#[command(about = "Build a small constructed language from phonology, morphology and syntax rules")]
pub struct CliConfig {
    /// Path to a TOML language file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Seed for reproducible word and sentence generation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of words generated in level 1
    #[arg(long)]
    pub words: Option<usize>,

    /// Number of sentences in the final showcase
    #[arg(long)]
    pub sentences: Option<usize>,

    /// Read answers from a file (one per line) instead of the terminal
    #[arg(long)]
    pub answers: Option<String>,

    /// Write the finished language to a JSON file
    #[arg(long)]
    pub export: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 載入語言設定並套用命令列覆蓋
    pub fn load(&self) -> Result<(Language, GameSettings)> {
        let file_config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading language file: {}", path);
                LanguageConfig::from_file(path)?
            }
            None => LanguageConfig::default(),
        };
        file_config.validate()?;

        let language = file_config.build_language();
        let mut settings = file_config.game_settings();

        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if let Some(words) = self.words {
            settings.words_per_round = words;
        }
        if let Some(sentences) = self.sentences {
            settings.showcase.sentences = sentences;
        }

        settings.validate()?;
        tracing::debug!("Game settings: {:?}", settings);
        Ok((language, settings))
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validate_path("config", path)?;
        }
        if let Some(path) = &self.answers {
            validate_path("answers", path)?;
        }
        if let Some(path) = &self.export {
            validate_path("export", path)?;
        }
        if let Some(words) = self.words {
            validate_positive_number("words", words, 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_cli_flags() {
        let config = CliConfig::parse_from([
            "lang-creator",
            "--seed",
            "7",
            "--words",
            "3",
            "--answers",
            "answers.txt",
            "-v",
        ]);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.words, Some(3));
        assert_eq!(config.answers.as_deref(), Some("answers.txt"));
        assert!(config.verbose);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_words_is_invalid() {
        let config = CliConfig {
            words: Some(0),
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[game]\nwords_per_round = 9\nseed = 1\n\n[showcase]\nsentences = 4\n").unwrap();

        let config = CliConfig {
            config: Some(file.path().to_string_lossy().to_string()),
            seed: Some(5),
            sentences: Some(1),
            ..CliConfig::default()
        };

        let (language, settings) = config.load().unwrap();
        assert_eq!(language.name, "Español");
        assert_eq!(settings.words_per_round, 9);
        assert_eq!(settings.seed, Some(5));
        assert_eq!(settings.showcase.sentences, 1);
    }
}
