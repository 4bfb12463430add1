use crate::core::language::Language;
use crate::domain::model::WordClass;
use crate::utils::error::Result;
use crate::utils::validation::{validate_probability, Validate};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const PLURAL_RULE: &str = "plural";
pub const NEGATION_RULE: &str = "in_prefix";
pub const INFINITIVE_RULE: &str = "ar_suffix";
pub const ADVERB_RULE: &str = "mente_suffix";

/// 最終展示的造句機率
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseSettings {
    pub sentences: usize,
    pub plural_chance: f64,
    pub negation_chance: f64,
    pub infinitive_chance: f64,
    pub adverb_chance: f64,
    pub question_chance: f64,
}

impl Default for ShowcaseSettings {
    fn default() -> Self {
        Self {
            sentences: 6,
            plural_chance: 0.3,
            negation_chance: 0.3,
            infinitive_chance: 0.3,
            adverb_chance: 0.3,
            question_chance: 0.2,
        }
    }
}

impl Validate for ShowcaseSettings {
    fn validate(&self) -> Result<()> {
        validate_probability("showcase.plural_chance", self.plural_chance)?;
        validate_probability("showcase.negation_chance", self.negation_chance)?;
        validate_probability("showcase.infinitive_chance", self.infinitive_chance)?;
        validate_probability("showcase.adverb_chance", self.adverb_chance)?;
        validate_probability("showcase.question_chance", self.question_chance)?;
        Ok(())
    }
}

/// 結合構詞與句法造出展示句
pub struct SentenceComposer<'a> {
    language: &'a Language,
    settings: &'a ShowcaseSettings,
}

impl<'a> SentenceComposer<'a> {
    pub fn new(language: &'a Language, settings: &'a ShowcaseSettings) -> Self {
        Self { language, settings }
    }

    /// 沒有名詞或動詞時回傳 None；機率超出 [0, 1] 時回傳錯誤
    pub fn compose<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Option<String>> {
        self.settings.validate()?;
        let vocabulary = &self.language.vocabulary;
        let (Some(subject), Some(verb)) = (
            vocabulary.choose(WordClass::Noun, rng),
            vocabulary.choose(WordClass::Verb, rng),
        ) else {
            return Ok(None);
        };

        let mut object = if vocabulary.count(WordClass::Noun) > 1 {
            vocabulary
                .choose(WordClass::Noun, rng)
                .unwrap_or_default()
                .to_string()
        } else {
            String::new()
        };

        let mut subject = subject.to_string();
        if rng.gen_bool(self.settings.plural_chance) {
            subject = self.inflect(&subject, PLURAL_RULE)?;
        }
        if !object.is_empty() && rng.gen_bool(self.settings.plural_chance) {
            object = self.inflect(&object, PLURAL_RULE)?;
        }

        let mut verb = verb.to_string();
        if rng.gen_bool(self.settings.negation_chance) {
            verb = self.inflect(&verb, NEGATION_RULE)?;
        } else if rng.gen_bool(self.settings.infinitive_chance) {
            verb = self.inflect(&verb, INFINITIVE_RULE)?;
        }

        if !vocabulary.is_empty(WordClass::Adjective) && rng.gen_bool(self.settings.adverb_chance) {
            if let Some(adjective) = vocabulary.choose(WordClass::Adjective, rng) {
                let adverb = self.inflect(adjective, ADVERB_RULE)?;
                object = format!("{} {}", adverb, object).trim().to_string();
            }
        }

        let syntax = &self.language.syntax;
        let sentence = if rng.gen_bool(self.settings.question_chance) {
            syntax.yes_no_question(&subject, &verb, &object)
        } else {
            syntax.sentence(&subject, &verb, &object)
        };

        Ok(Some(sentence))
    }

    /// 規則沒有登錄時保持原詞
    fn inflect(&self, word: &str, rule_name: &str) -> Result<String> {
        let morphology = &self.language.morphology;
        if morphology.has_rule(rule_name) {
            morphology.apply(word, rule_name)
        } else {
            Ok(word.to_string())
        }
    }
}
