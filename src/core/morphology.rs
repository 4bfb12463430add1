use crate::domain::model::{MorphologyRule, RuleType};
use crate::utils::error::{LangError, Result};

const PLURAL_RULE: &str = "plural";
const VOWEL_ENDINGS: [char; 10] = ['a', 'e', 'i', 'o', 'u', 'á', 'é', 'í', 'ó', 'ú'];

/// 構詞系統
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Morphology {
    rules: Vec<MorphologyRule>,
}

impl Morphology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: Vec<MorphologyRule>) -> Self {
        Self { rules }
    }

    /// 西班牙語的預設詞綴
    pub fn spanish() -> Self {
        let mut morphology = Self::new();
        morphology.register_spanish_rules();
        morphology
    }

    pub fn register_spanish_rules(&mut self) {
        let defaults = [
            ("re_prefix", RuleType::Prefix, "re", "again"),
            ("des_prefix", RuleType::Prefix, "des", "negation / reversal"),
            ("in_prefix", RuleType::Prefix, "in", "negation"),
            ("con_prefix", RuleType::Prefix, "con", "together"),
            ("plural_s", RuleType::Suffix, "s", "plural after a vowel"),
            ("plural_es", RuleType::Suffix, "es", "plural after a consonant"),
            ("cion_suffix", RuleType::Suffix, "ción", "action nominalisation"),
            ("mente_suffix", RuleType::Suffix, "mente", "adverb formation"),
            ("ar_suffix", RuleType::Suffix, "ar", "infinitive"),
            ("er_suffix", RuleType::Suffix, "er", "infinitive"),
            ("ir_suffix", RuleType::Suffix, "ir", "infinitive"),
            (PLURAL_RULE, RuleType::Plural, "", "automatic plural"),
        ];

        for (name, rule_type, marker, meaning) in defaults {
            self.add_rule(MorphologyRule::new(name, rule_type, marker, meaning));
        }
    }

    /// 同名規則會被取代
    pub fn add_rule(&mut self, rule: MorphologyRule) {
        match self.rules.iter_mut().find(|r| r.name == rule.name) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
    }

    pub fn rules(&self) -> &[MorphologyRule] {
        &self.rules
    }

    pub fn has_rule(&self, name: &str) -> bool {
        self.rules.iter().any(|r| r.name == name)
    }

    pub fn apply(&self, word: &str, rule_name: &str) -> Result<String> {
        let rule = self
            .rules
            .iter()
            .find(|r| r.name == rule_name)
            .ok_or_else(|| LangError::UnknownRule {
                name: rule_name.to_string(),
            })?;

        if rule.name == PLURAL_RULE {
            return Ok(pluralize(word));
        }

        let result = match rule.rule_type {
            RuleType::Prefix => format!("{}{}", rule.marker, word),
            RuleType::Suffix => format!("{}{}", word, rule.marker),
            RuleType::Infix => infix(word, &rule.marker),
            RuleType::Reduplication => format!("{}{}", word, word),
            RuleType::Plural => pluralize(word),
        };

        tracing::trace!("{} + {} -> {}", word, rule.name, result);
        Ok(result)
    }
}

/// 西班牙語拼寫的複數規則
pub fn pluralize(word: &str) -> String {
    match word.chars().last() {
        None => String::new(),
        Some(last) if VOWEL_ENDINGS.contains(&last) => format!("{}s", word),
        Some('z') => format!("{}ces", &word[..word.len() - 1]),
        Some(_) => format!("{}es", word),
    }
}

/// 中綴插在第一個母音之後，沒有母音就接在詞尾
fn infix(word: &str, marker: &str) -> String {
    match word.char_indices().find(|(_, c)| VOWEL_ENDINGS.contains(c)) {
        Some((idx, c)) => {
            let split = idx + c.len_utf8();
            format!("{}{}{}", &word[..split], marker, &word[split..])
        }
        None => format!("{}{}", word, marker),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("casa"), "casas");
        assert_eq!(pluralize("café"), "cafés");
        assert_eq!(pluralize("luz"), "luces");
        assert_eq!(pluralize("papel"), "papeles");
        assert_eq!(pluralize(""), "");
    }

    #[test]
    fn test_spanish_defaults() {
        let morphology = Morphology::spanish();
        assert_eq!(morphology.rules().len(), 12);
        assert_eq!(morphology.apply("hacer", "re_prefix").unwrap(), "rehacer");
        assert_eq!(morphology.apply("feliz", "in_prefix").unwrap(), "infeliz");
        assert_eq!(morphology.apply("rápida", "mente_suffix").unwrap(), "rápidamente");
        assert_eq!(morphology.apply("cant", "ar_suffix").unwrap(), "cantar");
        assert_eq!(morphology.apply("luz", "plural").unwrap(), "luces");
        assert_eq!(morphology.apply("mar", "plural").unwrap(), "mares");
    }

    #[test]
    fn test_reduplication_and_infix() {
        let mut morphology = Morphology::new();
        morphology.add_rule(MorphologyRule::new("redup", RuleType::Reduplication, "", "intensity"));
        morphology.add_rule(MorphologyRule::new("um", RuleType::Infix, "um", "focus"));

        assert_eq!(morphology.apply("pa", "redup").unwrap(), "papa");
        assert_eq!(morphology.apply("sulat", "um").unwrap(), "suumlat");
        assert_eq!(morphology.apply("str", "um").unwrap(), "strum");
    }

    #[test]
    fn test_unknown_rule() {
        let morphology = Morphology::spanish();
        assert!(matches!(
            morphology.apply("casa", "diminutive"),
            Err(LangError::UnknownRule { .. })
        ));
    }

    #[test]
    fn test_add_rule_replaces_by_name() {
        let mut morphology = Morphology::spanish();
        morphology.add_rule(MorphologyRule::new("re_prefix", RuleType::Prefix, "ri", "again"));
        assert_eq!(morphology.rules().len(), 12);
        assert_eq!(morphology.apply("fare", "re_prefix").unwrap(), "rifare");
    }
}
