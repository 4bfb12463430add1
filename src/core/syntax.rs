use crate::domain::model::SyntaxRule;
use crate::utils::error::{LangError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 基本語序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WordOrder {
    #[default]
    Svo,
    Sov,
    Vso,
}

impl WordOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            WordOrder::Svo => "SVO",
            WordOrder::Sov => "SOV",
            WordOrder::Vso => "VSO",
        }
    }

    /// 依語序排列主語、動詞、賓語
    pub fn arrange<'a>(&self, subject: &'a str, verb: &'a str, object: &'a str) -> [&'a str; 3] {
        match self {
            WordOrder::Svo => [subject, verb, object],
            WordOrder::Sov => [subject, object, verb],
            WordOrder::Vso => [verb, subject, object],
        }
    }
}

impl FromStr for WordOrder {
    type Err = LangError;

    /// 接受 "SVO" 等名稱或選單編號 1-3，空字串為 SVO
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "" | "1" | "SVO" => Ok(WordOrder::Svo),
            "2" | "SOV" => Ok(WordOrder::Sov),
            "3" | "VSO" => Ok(WordOrder::Vso),
            _ => Err(LangError::InvalidWordOrder {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for WordOrder {
    type Error = LangError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<WordOrder> for String {
    fn from(order: WordOrder) -> Self {
        order.as_str().to_string()
    }
}

impl fmt::Display for WordOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 疑問標記：第一個字元放句首，其餘放句尾
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct QuestionMarker {
    pub open: String,
    pub close: String,
}

impl Default for QuestionMarker {
    fn default() -> Self {
        Self {
            open: "¿".to_string(),
            close: "?".to_string(),
        }
    }
}

impl QuestionMarker {
    pub fn parse(marker: &str) -> Self {
        let marker = marker.trim();
        let mut chars = marker.chars();
        match (chars.next(), chars.as_str()) {
            (None, _) => Self::default(),
            // 只有一個字元時當作句尾標記
            (Some(only), "") => Self {
                open: String::new(),
                close: only.to_string(),
            },
            (Some(first), rest) => Self {
                open: first.to_string(),
                close: rest.to_string(),
            },
        }
    }

    pub fn wrap(&self, sentence: &str) -> String {
        format!("{}{}{}", self.open, sentence, self.close)
    }
}

impl From<String> for QuestionMarker {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<QuestionMarker> for String {
    fn from(marker: QuestionMarker) -> Self {
        marker.to_string()
    }
}

impl fmt::Display for QuestionMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.open, self.close)
    }
}

/// 句法系統
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Syntax {
    pub word_order: WordOrder,
    pub question_marker: QuestionMarker,
    rules: Vec<SyntaxRule>,
}

impl Syntax {
    pub fn new(word_order: WordOrder, question_marker: QuestionMarker) -> Self {
        Self {
            word_order,
            question_marker,
            rules: Vec::new(),
        }
    }

    pub fn add_rule(&mut self, name: &str, pattern: &str, description: &str) {
        let rule = SyntaxRule {
            name: name.to_string(),
            pattern: pattern.to_string(),
            description: description.to_string(),
        };
        match self.rules.iter_mut().find(|r| r.name == name) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
    }

    pub fn rules(&self) -> &[SyntaxRule] {
        &self.rules
    }

    /// 登錄基本句型與疑問句規則
    pub fn register_default_rules(&mut self) {
        let order = self.word_order.to_string();
        let question = format!("{}+{}", order, self.question_marker);
        self.add_rule("basic_sentence", &order, "basic declarative sentence");
        self.add_rule("question", &question, "yes/no question");
    }

    /// 依語序造句，空的成分不輸出
    pub fn sentence(&self, subject: &str, verb: &str, object: &str) -> String {
        self.word_order
            .arrange(subject.trim(), verb.trim(), object.trim())
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn yes_no_question(&self, subject: &str, verb: &str, object: &str) -> String {
        self.question_marker.wrap(&self.sentence(subject, verb, object))
    }
}
