use crate::domain::model::WordClass;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// 依詞類分組的詞彙，每組保留加入順序
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    words: BTreeMap<WordClass, Vec<String>>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, class: WordClass, word: impl Into<String>) {
        self.words.entry(class).or_default().push(word.into());
    }

    pub fn words(&self, class: WordClass) -> &[String] {
        self.words.get(&class).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, class: WordClass) -> usize {
        self.words(class).len()
    }

    pub fn is_empty(&self, class: WordClass) -> bool {
        self.count(class) == 0
    }

    pub fn choose<R: Rng + ?Sized>(&self, class: WordClass, rng: &mut R) -> Option<&str> {
        self.words(class).choose(rng).map(String::as_str)
    }

    /// 取出所有未分類的詞
    pub fn take_unknown(&mut self) -> Vec<String> {
        self.words.remove(&WordClass::Unknown).unwrap_or_default()
    }

    /// 已分類且非空的詞類與數量
    pub fn class_counts(&self) -> Vec<(WordClass, usize)> {
        WordClass::ALL
            .iter()
            .filter(|class| **class != WordClass::Unknown)
            .map(|class| (*class, self.count(*class)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }

    pub fn to_map(&self) -> BTreeMap<String, Vec<String>> {
        self.words
            .iter()
            .filter(|(_, words)| !words.is_empty())
            .map(|(class, words)| (class.to_string(), words.clone()))
            .collect()
    }
}
