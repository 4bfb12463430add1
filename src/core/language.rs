use crate::core::morphology::Morphology;
use crate::core::phonology::Phonology;
use crate::core::syntax::Syntax;
use crate::core::vocabulary::Vocabulary;
use crate::domain::model::{MorphologyRule, SyntaxRule};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_NAME: &str = "Español";
pub const DEFAULT_CORPUS: &str = "A collection of Spanish short stories from a public digital library";

/// 使用者正在建立的語言
#[derive(Debug, Clone, PartialEq)]
pub struct Language {
    pub name: String,
    pub description: String,
    pub corpus: String,
    pub phonology: Phonology,
    pub morphology: Morphology,
    pub syntax: Syntax,
    pub vocabulary: Vocabulary,
}

impl Default for Language {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            description: String::new(),
            corpus: DEFAULT_CORPUS.to_string(),
            phonology: Phonology::default(),
            morphology: Morphology::new(),
            syntax: Syntax::default(),
            vocabulary: Vocabulary::new(),
        }
    }
}

impl Language {
    pub fn to_export(&self) -> LanguageExport {
        LanguageExport {
            name: self.name.clone(),
            description: self.description.clone(),
            corpus: self.corpus.clone(),
            exported_at: Utc::now(),
            consonants: self.phonology.consonants.iter().cloned().collect(),
            vowels: self.phonology.vowels.iter().cloned().collect(),
            syllable_patterns: self.phonology.pattern_list(),
            morphology: self.morphology.rules().to_vec(),
            word_order: self.syntax.word_order.to_string(),
            question_marker: self.syntax.question_marker.to_string(),
            syntax: self.syntax.rules().to_vec(),
            vocabulary: self.vocabulary.to_map(),
        }
    }
}

/// 匯出成 JSON 的語言快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageExport {
    pub name: String,
    pub description: String,
    pub corpus: String,
    pub exported_at: DateTime<Utc>,
    pub consonants: Vec<String>,
    pub vowels: Vec<String>,
    pub syllable_patterns: Vec<String>,
    pub morphology: Vec<MorphologyRule>,
    pub word_order: String,
    pub question_marker: String,
    pub syntax: Vec<SyntaxRule>,
    pub vocabulary: BTreeMap<String, Vec<String>>,
}
