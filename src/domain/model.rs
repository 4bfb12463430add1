use serde::{Deserialize, Serialize};
use std::fmt;

/// 詞類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordClass {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Unknown,
}

impl WordClass {
    pub const ALL: [WordClass; 5] = [
        WordClass::Noun,
        WordClass::Verb,
        WordClass::Adjective,
        WordClass::Adverb,
        WordClass::Unknown,
    ];

    /// 單字母分類答案：n / v / a / d，其他一律當名詞
    pub fn from_answer(answer: &str) -> Self {
        match answer.trim().to_lowercase().as_str() {
            "v" => WordClass::Verb,
            "a" => WordClass::Adjective,
            "d" => WordClass::Adverb,
            _ => WordClass::Noun,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WordClass::Noun => "noun",
            WordClass::Verb => "verb",
            WordClass::Adjective => "adjective",
            WordClass::Adverb => "adverb",
            WordClass::Unknown => "unknown",
        }
    }
}

impl fmt::Display for WordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleType {
    Prefix,
    Suffix,
    Infix,
    Reduplication,
    Plural,
}

impl RuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleType::Prefix => "prefix",
            RuleType::Suffix => "suffix",
            RuleType::Infix => "infix",
            RuleType::Reduplication => "reduplication",
            RuleType::Plural => "plural",
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 構詞規則
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MorphologyRule {
    pub name: String,
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    #[serde(default)]
    pub marker: String,
    #[serde(default)]
    pub meaning: String,
}

impl MorphologyRule {
    pub fn new(name: &str, rule_type: RuleType, marker: &str, meaning: &str) -> Self {
        Self {
            name: name.to_string(),
            rule_type,
            marker: marker.to_string(),
            meaning: meaning.to_string(),
        }
    }
}

/// 句法規則
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxRule {
    pub name: String,
    pub pattern: String,
    pub description: String,
}

/// 遊戲關卡
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Phonology,
    Morphology,
    Syntax,
    Complete,
}

impl Level {
    pub fn next(self) -> Self {
        match self {
            Level::Phonology => Level::Morphology,
            Level::Morphology => Level::Syntax,
            Level::Syntax | Level::Complete => Level::Complete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_class_from_answer() {
        assert_eq!(WordClass::from_answer("n"), WordClass::Noun);
        assert_eq!(WordClass::from_answer("V"), WordClass::Verb);
        assert_eq!(WordClass::from_answer(" a "), WordClass::Adjective);
        assert_eq!(WordClass::from_answer("d"), WordClass::Adverb);
        assert_eq!(WordClass::from_answer("x"), WordClass::Noun);
        assert_eq!(WordClass::from_answer(""), WordClass::Noun);
    }

    #[test]
    fn test_level_progression() {
        assert_eq!(Level::Phonology.next(), Level::Morphology);
        assert_eq!(Level::Morphology.next(), Level::Syntax);
        assert_eq!(Level::Syntax.next(), Level::Complete);
        assert_eq!(Level::Complete.next(), Level::Complete);
    }

    #[test]
    fn test_rule_deserializes_type_field() {
        let rule: MorphologyRule =
            toml::from_str("name = \"re_prefix\"\ntype = \"prefix\"\nmarker = \"re\"\n").unwrap();
        assert_eq!(rule.rule_type, RuleType::Prefix);
        assert_eq!(rule.meaning, "");
    }
}
