use crate::utils::error::{LangError, Result};
use crate::utils::validation::validate_segment;
use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub const MAX_CONSONANT_LEN: usize = 2;
pub const MAX_VOWEL_LEN: usize = 3;
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

pub const DEFAULT_CONSONANTS: [&str; 19] = [
    "p", "b", "t", "d", "k", "g", "m", "n", "s", "z", "l", "r", "ñ", "ll", "j", "ch", "f", "v",
    "h",
];
pub const DEFAULT_VOWELS: [&str; 5] = ["a", "e", "i", "o", "u"];
pub const DEFAULT_PATTERNS: [&str; 5] = ["CV", "CVC", "CVV", "V", "CCV"];
pub const DEFAULT_CLUSTERS: [&str; 12] = [
    "pl", "pr", "bl", "br", "fl", "fr", "cl", "cr", "gl", "gr", "tr", "dr",
];
pub const DEFAULT_FINALS: [&str; 6] = ["n", "s", "r", "l", "d", "z"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Consonant,
    Vowel,
}

/// 音節結構，例如 "CVC"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SyllablePattern {
    slots: Vec<Slot>,
}

impl SyllablePattern {
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// 以 CC 開頭的音節從允許的子音群抽取首音
    pub fn has_cluster_onset(&self) -> bool {
        matches!(self.slots.as_slice(), [Slot::Consonant, Slot::Consonant, ..])
    }
}

impl FromStr for SyllablePattern {
    type Err = LangError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(LangError::InvalidPattern {
                pattern: s.to_string(),
                reason: "Pattern cannot be empty".to_string(),
            });
        }

        let slots = trimmed
            .chars()
            .map(|c| match c.to_ascii_uppercase() {
                'C' => Ok(Slot::Consonant),
                'V' => Ok(Slot::Vowel),
                other => Err(LangError::InvalidPattern {
                    pattern: s.to_string(),
                    reason: format!("Unexpected letter '{}'", other),
                }),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { slots })
    }
}

impl TryFrom<String> for SyllablePattern {
    type Error = LangError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<SyllablePattern> for String {
    fn from(pattern: SyllablePattern) -> Self {
        pattern.to_string()
    }
}

impl fmt::Display for SyllablePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.slots {
            let c = match slot {
                Slot::Consonant => 'C',
                Slot::Vowel => 'V',
            };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// 音韻系統
#[derive(Debug, Clone, PartialEq)]
pub struct Phonology {
    pub consonants: BTreeSet<String>,
    pub vowels: BTreeSet<String>,
    pub syllable_patterns: Vec<SyllablePattern>,
    pub clusters: Vec<String>,
    pub final_consonants: BTreeSet<String>,
    pub max_attempts: usize,
}

impl Default for Phonology {
    fn default() -> Self {
        Self {
            consonants: DEFAULT_CONSONANTS.iter().map(|s| s.to_string()).collect(),
            vowels: DEFAULT_VOWELS.iter().map(|s| s.to_string()).collect(),
            syllable_patterns: DEFAULT_PATTERNS
                .iter()
                .map(|p| SyllablePattern {
                    slots: p
                        .chars()
                        .map(|c| if c == 'C' { Slot::Consonant } else { Slot::Vowel })
                        .collect(),
                })
                .collect(),
            clusters: DEFAULT_CLUSTERS.iter().map(|s| s.to_string()).collect(),
            final_consonants: DEFAULT_FINALS.iter().map(|s| s.to_string()).collect(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl Phonology {
    /// 新增子音，已存在時回傳 false
    pub fn add_consonant(&mut self, segment: &str) -> Result<bool> {
        let segment = segment.trim();
        validate_segment(segment, MAX_CONSONANT_LEN)?;
        Ok(self.consonants.insert(segment.to_string()))
    }

    pub fn remove_consonant(&mut self, segment: &str) -> bool {
        self.consonants.remove(segment.trim())
    }

    /// 新增母音，已存在時回傳 false
    pub fn add_vowel(&mut self, segment: &str) -> Result<bool> {
        let segment = segment.trim();
        validate_segment(segment, MAX_VOWEL_LEN)?;
        Ok(self.vowels.insert(segment.to_string()))
    }

    pub fn remove_vowel(&mut self, segment: &str) -> bool {
        self.vowels.remove(segment.trim())
    }

    pub fn pattern_list(&self) -> Vec<String> {
        self.syllable_patterns.iter().map(|p| p.to_string()).collect()
    }

    fn ensure_inventories(&self) -> Result<()> {
        if self.consonants.is_empty() {
            return Err(LangError::EmptyInventory {
                inventory: "consonant".to_string(),
            });
        }
        if self.vowels.is_empty() {
            return Err(LangError::EmptyInventory {
                inventory: "vowel".to_string(),
            });
        }
        if self.syllable_patterns.is_empty() {
            return Err(LangError::EmptyInventory {
                inventory: "syllable pattern".to_string(),
            });
        }
        Ok(())
    }

    pub fn generate_syllable<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String> {
        self.ensure_inventories()?;
        let pattern = self
            .syllable_patterns
            .choose(rng)
            .ok_or_else(|| LangError::EmptyInventory {
                inventory: "syllable pattern".to_string(),
            })?;
        self.fill_pattern(pattern, rng)
    }

    fn fill_pattern<R: Rng + ?Sized>(&self, pattern: &SyllablePattern, rng: &mut R) -> Result<String> {
        let mut syllable = String::new();
        let mut slots = pattern.slots();

        if pattern.has_cluster_onset() {
            if let Some(cluster) = self.clusters.choose(rng) {
                syllable.push_str(cluster);
                slots = &slots[2..];
            }
        }

        for slot in slots {
            let inventory = match slot {
                Slot::Consonant => &self.consonants,
                Slot::Vowel => &self.vowels,
            };
            let segment = inventory
                .iter()
                .choose(rng)
                .ok_or_else(|| LangError::EmptyInventory {
                    inventory: match slot {
                        Slot::Consonant => "consonant".to_string(),
                        Slot::Vowel => "vowel".to_string(),
                    },
                })?;
            syllable.push_str(segment);
        }

        Ok(syllable)
    }

    /// 生成詞語，直到通過音韻限制；`None` 時隨機 1 到 3 個音節
    pub fn generate_word<R: Rng + ?Sized>(
        &self,
        syllable_count: Option<usize>,
        rng: &mut R,
    ) -> Result<String> {
        self.ensure_inventories()?;
        let phonotactics = Phonotactics::new(self)?;
        let count = syllable_count.unwrap_or_else(|| rng.gen_range(1..=3)).max(1);

        for attempt in 1..=self.max_attempts {
            let mut word = String::new();
            for _ in 0..count {
                word.push_str(&self.generate_syllable(rng)?);
            }

            if phonotactics.allows(&word) {
                tracing::debug!("Generated '{}' after {} attempt(s)", word, attempt);
                return Ok(word);
            }
        }

        tracing::warn!(
            "Gave up generating a {}-syllable word after {} attempts",
            count,
            self.max_attempts
        );
        Err(LangError::GenerationExhausted {
            attempts: self.max_attempts,
        })
    }

    pub fn check_word(&self, word: &str) -> Result<bool> {
        Ok(Phonotactics::new(self)?.allows(word))
    }
}

/// 由音韻系統編譯出來的詞語合法性檢查
pub struct Phonotactics {
    consonant_pair: Regex,
    long_vowel_run: Regex,
    vowel_chars: BTreeSet<char>,
    permitted_pairs: BTreeSet<String>,
    final_consonants: BTreeSet<String>,
}

impl Phonotactics {
    pub fn new(phonology: &Phonology) -> Result<Self> {
        let vowel_chars: BTreeSet<char> = phonology.vowels.iter().flat_map(|v| v.chars()).collect();
        if vowel_chars.is_empty() {
            return Err(LangError::EmptyInventory {
                inventory: "vowel".to_string(),
            });
        }

        let class: String = vowel_chars
            .iter()
            .map(|c| regex::escape(&c.to_string()))
            .collect();

        let consonant_pair = Regex::new(&format!("[^{}]{{2}}", class)).map_err(|e| {
            LangError::ConfigValidationError {
                field: "phonology.vowels".to_string(),
                message: format!("Cannot build phonotactic pattern: {}", e),
            }
        })?;
        let long_vowel_run = Regex::new(&format!("[{}]{{3,}}", class)).map_err(|e| {
            LangError::ConfigValidationError {
                field: "phonology.vowels".to_string(),
                message: format!("Cannot build phonotactic pattern: {}", e),
            }
        })?;

        // 子音群只認 clusters 清單，ch、ll 這類雙字母子音也照字元檢查
        let permitted_pairs = phonology.clusters.iter().cloned().collect();

        Ok(Self {
            consonant_pair,
            long_vowel_run,
            vowel_chars,
            permitted_pairs,
            final_consonants: phonology.final_consonants.clone(),
        })
    }

    pub fn allows(&self, word: &str) -> bool {
        if word.is_empty() || word.starts_with("rr") {
            return false;
        }

        if self
            .consonant_pair
            .find_iter(word)
            .any(|m| !self.permitted_pairs.contains(m.as_str()))
        {
            return false;
        }

        if self.long_vowel_run.is_match(word) {
            return false;
        }

        match word.chars().last() {
            Some(last) if !self.vowel_chars.contains(&last) => {
                self.final_consonants.contains(&last.to_string())
            }
            _ => true,
        }
    }
}
