use crate::core::composer::ShowcaseSettings;
use crate::core::game::GameSettings;
use crate::core::language::{Language, DEFAULT_CORPUS, DEFAULT_NAME};
use crate::core::morphology::Morphology;
use crate::core::phonology::{
    Phonology, SyllablePattern, DEFAULT_MAX_ATTEMPTS, MAX_CONSONANT_LEN, MAX_VOWEL_LEN,
};
use crate::core::syntax::{QuestionMarker, Syntax, WordOrder};
use crate::domain::model::MorphologyRule;
use crate::utils::error::{LangError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_segment, validate_unique_names,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageConfig {
    pub language: Option<LanguageInfo>,
    pub phonology: Option<PhonologyConfig>,
    pub morphology: Option<MorphologyConfig>,
    pub syntax: Option<SyntaxConfig>,
    pub showcase: Option<ShowcaseSettings>,
    pub game: Option<GameConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageInfo {
    pub name: String,
    pub description: Option<String>,
    pub corpus: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhonologyConfig {
    pub consonants: Option<Vec<String>>,
    pub vowels: Option<Vec<String>>,
    pub syllable_patterns: Option<Vec<SyllablePattern>>,
    pub clusters: Option<Vec<String>>,
    pub final_consonants: Option<Vec<String>>,
    pub max_attempts: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MorphologyConfig {
    pub rules: Vec<MorphologyRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntaxConfig {
    pub word_order: Option<WordOrder>,
    pub question_marker: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub words_per_round: Option<usize>,
    pub sample_sentences: Option<usize>,
    pub seed: Option<u64>,
}

impl LanguageConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LangError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LangError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LANG_NAME})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LangError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(info) = &self.language {
            validate_non_empty_string("language.name", &info.name)?;
        }

        if let Some(phonology) = &self.phonology {
            for consonant in phonology.consonants.iter().flatten() {
                validate_segment(consonant, MAX_CONSONANT_LEN)?;
            }
            for vowel in phonology.vowels.iter().flatten() {
                validate_segment(vowel, MAX_VOWEL_LEN)?;
            }
            if matches!(&phonology.consonants, Some(c) if c.is_empty()) {
                return Err(LangError::EmptyInventory {
                    inventory: "consonant".to_string(),
                });
            }
            if matches!(&phonology.vowels, Some(v) if v.is_empty()) {
                return Err(LangError::EmptyInventory {
                    inventory: "vowel".to_string(),
                });
            }
            if matches!(&phonology.syllable_patterns, Some(p) if p.is_empty()) {
                return Err(LangError::EmptyInventory {
                    inventory: "syllable pattern".to_string(),
                });
            }
            if let Some(attempts) = phonology.max_attempts {
                validate_positive_number("phonology.max_attempts", attempts, 1)?;
            }
        }

        if let Some(morphology) = &self.morphology {
            validate_unique_names(
                "morphology.rules",
                morphology.rules.iter().map(|r| r.name.as_str()),
            )?;
            for rule in &morphology.rules {
                validate_non_empty_string("morphology.rules.name", &rule.name)?;
            }
        }

        if let Some(showcase) = &self.showcase {
            showcase.validate()?;
        }

        if let Some(words) = self.game.as_ref().and_then(|g| g.words_per_round) {
            validate_positive_number("game.words_per_round", words, 1)?;
        }

        Ok(())
    }

    /// 依配置建立語言，未設定的部分使用西班牙語預設值
    pub fn build_language(&self) -> Language {
        let mut language = Language::default();

        if let Some(info) = &self.language {
            language.name = info.name.clone();
            language.description = info.description.clone().unwrap_or_default();
            language.corpus = info
                .corpus
                .clone()
                .unwrap_or_else(|| DEFAULT_CORPUS.to_string());
        }

        if let Some(config) = &self.phonology {
            let defaults = Phonology::default();
            language.phonology = Phonology {
                consonants: config
                    .consonants
                    .as_ref()
                    .map(|c| c.iter().cloned().collect())
                    .unwrap_or(defaults.consonants),
                vowels: config
                    .vowels
                    .as_ref()
                    .map(|v| v.iter().cloned().collect())
                    .unwrap_or(defaults.vowels),
                syllable_patterns: config
                    .syllable_patterns
                    .clone()
                    .unwrap_or(defaults.syllable_patterns),
                clusters: config.clusters.clone().unwrap_or(defaults.clusters),
                final_consonants: config
                    .final_consonants
                    .as_ref()
                    .map(|f| f.iter().cloned().collect())
                    .unwrap_or(defaults.final_consonants),
                max_attempts: config.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS),
            };
        }

        // 沒有設定規則時，第二關才登錄預設詞綴
        if let Some(config) = &self.morphology {
            language.morphology = Morphology::with_rules(config.rules.clone());
        }

        if let Some(config) = &self.syntax {
            language.syntax = Syntax::new(
                config.word_order.unwrap_or_default(),
                config
                    .question_marker
                    .as_deref()
                    .map(QuestionMarker::parse)
                    .unwrap_or_default(),
            );
        }

        language
    }

    pub fn game_settings(&self) -> GameSettings {
        let defaults = GameSettings::default();
        let game = self.game.as_ref();
        GameSettings {
            words_per_round: game
                .and_then(|g| g.words_per_round)
                .unwrap_or(defaults.words_per_round),
            sample_sentences: game
                .and_then(|g| g.sample_sentences)
                .unwrap_or(defaults.sample_sentences),
            seed: game.and_then(|g| g.seed),
            showcase: self.showcase.clone().unwrap_or(defaults.showcase),
        }
    }

    pub fn language_name(&self) -> &str {
        self.language
            .as_ref()
            .map(|l| l.name.as_str())
            .unwrap_or(DEFAULT_NAME)
    }
}

impl Validate for LanguageConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RuleType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FULL_CONFIG: &str = r#"
[language]
name = "Toki Sol"
description = "A sunny test language"

[phonology]
consonants = ["t", "k", "s", "n"]
vowels = ["a", "i", "u"]
syllable_patterns = ["CV", "V"]
final_consonants = ["n"]
max_attempts = 500

[[morphology.rules]]
name = "plural"
type = "plural"
meaning = "more than one"

[[morphology.rules]]
name = "redup"
type = "reduplication"

[syntax]
word_order = "SOV"
question_marker = "?"

[showcase]
sentences = 2
question_chance = 0.5

[game]
words_per_round = 5
seed = 99
"#;

    #[test]
    fn test_parse_full_config() {
        let config = LanguageConfig::from_toml_str(FULL_CONFIG).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.language_name(), "Toki Sol");

        let language = config.build_language();
        assert_eq!(language.phonology.consonants.len(), 4);
        assert_eq!(language.phonology.pattern_list(), vec!["CV", "V"]);
        assert_eq!(language.phonology.max_attempts, 500);
        assert_eq!(language.morphology.rules().len(), 2);
        assert_eq!(language.morphology.rules()[1].rule_type, RuleType::Reduplication);
        assert_eq!(language.syntax.word_order, WordOrder::Sov);
        assert_eq!(language.syntax.yes_no_question("a", "b", ""), "a b?");

        let settings = config.game_settings();
        assert_eq!(settings.words_per_round, 5);
        assert_eq!(settings.sample_sentences, 3);
        assert_eq!(settings.seed, Some(99));
        assert_eq!(settings.showcase.sentences, 2);
        assert_eq!(settings.showcase.plural_chance, 0.3);
        assert_eq!(settings.showcase.question_chance, 0.5);
    }

    #[test]
    fn test_empty_config_uses_spanish_defaults() {
        let config = LanguageConfig::from_toml_str("").unwrap();
        let language = config.build_language();
        assert_eq!(language, Language::default());
        assert_eq!(config.game_settings(), GameSettings::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LANG_CREATOR_TEST_NAME", "Lengua Nueva");

        let config = LanguageConfig::from_toml_str(
            "[language]\nname = \"${LANG_CREATOR_TEST_NAME}\"\n",
        )
        .unwrap();
        assert_eq!(config.language_name(), "Lengua Nueva");

        std::env::remove_var("LANG_CREATOR_TEST_NAME");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let bad_pattern = "[phonology]\nsyllable_patterns = [\"CXV\"]\n";
        assert!(LanguageConfig::from_toml_str(bad_pattern).is_err());

        let bad_order = "[syntax]\nword_order = \"OVS\"\n";
        assert!(LanguageConfig::from_toml_str(bad_order).is_err());

        let long_consonant = LanguageConfig::from_toml_str("[phonology]\nconsonants = [\"tch\"]\n")
            .unwrap();
        assert!(long_consonant.validate().is_err());

        let no_vowels = LanguageConfig::from_toml_str("[phonology]\nvowels = []\n").unwrap();
        assert!(matches!(
            no_vowels.validate(),
            Err(LangError::EmptyInventory { .. })
        ));

        let bad_chance =
            LanguageConfig::from_toml_str("[showcase]\nplural_chance = 2.0\n").unwrap();
        assert!(bad_chance.validate().is_err());

        let duplicate = LanguageConfig::from_toml_str(
            "[[morphology.rules]]\nname = \"a\"\ntype = \"prefix\"\n\n[[morphology.rules]]\nname = \"a\"\ntype = \"suffix\"\n",
        )
        .unwrap();
        assert!(duplicate.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(FULL_CONFIG.as_bytes()).unwrap();

        let config = LanguageConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.language_name(), "Toki Sol");
    }
}
