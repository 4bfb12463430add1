use crate::core::composer::{SentenceComposer, ShowcaseSettings};
use crate::core::language::Language;
use crate::core::syntax::{QuestionMarker, WordOrder};
use crate::domain::model::{Level, WordClass};
use crate::domain::ports::Prompter;
use crate::utils::error::{LangError, Result};
use crate::utils::validation::{validate_positive_number, Validate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;

const RULE_WIDTH: usize = 60;

#[derive(Debug, Clone, PartialEq)]
pub struct GameSettings {
    pub words_per_round: usize,
    pub sample_sentences: usize,
    pub seed: Option<u64>,
    pub showcase: ShowcaseSettings,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            words_per_round: 15,
            sample_sentences: 3,
            seed: None,
            showcase: ShowcaseSettings::default(),
        }
    }
}

impl Validate for GameSettings {
    fn validate(&self) -> Result<()> {
        validate_positive_number("game.words_per_round", self.words_per_round, 1)?;
        self.showcase.validate()
    }
}

#[derive(Debug, Clone, Copy)]
enum SegmentKind {
    Consonant,
    Vowel,
}

impl SegmentKind {
    fn label(&self) -> &'static str {
        match self {
            SegmentKind::Consonant => "consonant",
            SegmentKind::Vowel => "vowel",
        }
    }
}

/// 語言創造遊戲：音韻、構詞、句法三關，最後展示成果
pub struct GameEngine<P: Prompter, W: Write> {
    language: Language,
    settings: GameSettings,
    level: Level,
    rng: StdRng,
    prompter: P,
    out: W,
}

impl<P: Prompter, W: Write> GameEngine<P, W> {
    pub fn new(language: Language, settings: GameSettings, prompter: P, out: W) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            language,
            settings,
            level: Level::Phonology,
            rng,
            prompter,
            out,
        }
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn into_language(self) -> Language {
        self.language
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// 設定不合法時在開始前就回傳錯誤
    pub fn run(&mut self) -> Result<()> {
        self.settings.validate()?;
        tracing::info!("Starting language creator for '{}'", self.language.name);
        self.display_welcome()?;
        self.pause("\nPress Enter to start...")?;

        if self.level == Level::Phonology {
            self.level_phonology()?;
        }

        if self.level == Level::Morphology {
            self.pause("\nPress Enter for level 2...")?;
            self.level_morphology()?;
        }

        if self.level == Level::Syntax {
            self.pause("\nPress Enter for level 3...")?;
            self.level_syntax()?;
        }

        self.pause("\nPress Enter to see the language you created...")?;
        self.final_showcase()?;

        tracing::info!("Language creator finished");
        Ok(())
    }

    pub fn display_welcome(&mut self) -> Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.out, "{}", rule)?;
        writeln!(self.out, "🌍 Welcome to the Language Creator! 🌍")?;
        writeln!(self.out, "{}", rule)?;
        writeln!(self.out, "You will build a new language in three levels:")?;
        writeln!(self.out, "Level 1: Phonology")?;
        writeln!(self.out, "Level 2: Morphology")?;
        writeln!(self.out, "Level 3: Syntax")?;
        writeln!(self.out, "Source material: {}", self.language.corpus)?;
        writeln!(self.out, "{}", rule)?;
        Ok(())
    }

    /// 第一關：編輯音素，然後生成範例詞
    pub fn level_phonology(&mut self) -> Result<()> {
        writeln!(self.out, "\n🔤 Level 1: Phonology")?;
        writeln!(self.out, "{}", "-".repeat(40))?;
        writeln!(self.out, "Let's set up the sounds of your language!")?;

        self.edit_inventory(SegmentKind::Consonant)?;
        self.edit_inventory(SegmentKind::Vowel)?;

        writeln!(
            self.out,
            "\nSyllable patterns: {}",
            self.language.phonology.pattern_list().join(", ")
        )?;
        writeln!(self.out, "(C = consonant, V = vowel)")?;

        writeln!(self.out, "\n🎲 Some words built from your sound system:")?;
        for i in 1..=self.settings.words_per_round {
            let word = self.language.phonology.generate_word(None, &mut self.rng)?;
            writeln!(self.out, "{}. {}", i, word)?;
            self.language.vocabulary.add(WordClass::Unknown, word);
        }

        tracing::info!(
            "Phonology complete: {} consonants, {} vowels, {} words",
            self.language.phonology.consonants.len(),
            self.language.phonology.vowels.len(),
            self.settings.words_per_round
        );
        writeln!(self.out, "\n✅ Level 1 complete!")?;
        self.level = self.level.next();
        Ok(())
    }

    fn edit_inventory(&mut self, kind: SegmentKind) -> Result<()> {
        let label = kind.label();
        loop {
            let current = match kind {
                SegmentKind::Consonant => &self.language.phonology.consonants,
                SegmentKind::Vowel => &self.language.phonology.vowels,
            };
            let listing = current.iter().map(String::as_str).collect::<Vec<_>>().join(", ");
            writeln!(self.out, "\nCurrent {}s: {}", label, listing)?;

            let choice = self.ask_menu(&format!(
                "\nWould you like to (a) add a {label} (b) remove a {label} (c) continue? "
            ))?;

            match choice.as_str() {
                "a" => {
                    let segment = self.ask_text(&format!("Enter the {} to add: ", label))?;
                    let added = match kind {
                        SegmentKind::Consonant => self.language.phonology.add_consonant(&segment),
                        SegmentKind::Vowel => self.language.phonology.add_vowel(&segment),
                    };
                    match added {
                        Ok(true) => writeln!(self.out, "Added {}: {}", label, segment.trim())?,
                        Ok(false) => writeln!(self.out, "'{}' is already a {}", segment.trim(), label)?,
                        Err(e) => {
                            tracing::warn!("Rejected {} '{}': {}", label, segment, e);
                            writeln!(self.out, "⚠️ {}", e.user_friendly_message())?;
                        }
                    }
                }
                "b" => {
                    let segment = self.ask_text(&format!("Enter the {} to remove: ", label))?;
                    let removed = match kind {
                        SegmentKind::Consonant => self.language.phonology.remove_consonant(&segment),
                        SegmentKind::Vowel => self.language.phonology.remove_vowel(&segment),
                    };
                    if removed {
                        writeln!(self.out, "Removed {}: {}", label, segment.trim())?;
                    } else {
                        writeln!(self.out, "'{}' is not in the inventory", segment.trim())?;
                    }
                }
                "c" => break,
                _ => writeln!(self.out, "Please answer a, b or c")?,
            }
        }
        Ok(())
    }

    /// 第二關：分類詞語並登錄構詞規則
    pub fn level_morphology(&mut self) -> Result<()> {
        writeln!(self.out, "\n🔧 Level 2: Morphology")?;
        writeln!(self.out, "{}", "-".repeat(40))?;
        writeln!(self.out, "First, let's classify the words you generated:")?;

        for word in self.language.vocabulary.take_unknown() {
            writeln!(self.out, "\nWord: {}", word)?;
            let answer =
                self.ask_text("Is this a (n)oun, (v)erb, (a)djective or a(d)verb? ")?;
            let class = WordClass::from_answer(&answer);
            tracing::debug!("Classified '{}' as {}", word, class);
            self.language.vocabulary.add(class, word);
        }

        if self.language.morphology.rules().is_empty() {
            self.language.morphology.register_spanish_rules();
        }

        writeln!(self.out, "\nWord-building rules:")?;
        for rule in self.language.morphology.rules() {
            writeln!(self.out, "   {} ({} '{}')", rule.name, rule.rule_type, rule.marker)?;
        }

        writeln!(self.out, "\n✅ Level 2 complete!")?;
        self.level = self.level.next();
        Ok(())
    }

    /// 第三關：設定語序與疑問標記並造句
    pub fn level_syntax(&mut self) -> Result<()> {
        writeln!(self.out, "\n📝 Level 3: Syntax")?;
        writeln!(self.out, "{}", "-".repeat(40))?;
        writeln!(self.out, "\nChoose the basic word order:")?;
        writeln!(self.out, "1. SVO (subject-verb-object), like English or Chinese")?;
        writeln!(self.out, "2. SOV (subject-object-verb), like Japanese or Korean")?;
        writeln!(self.out, "3. VSO (verb-subject-object), like Irish or Tagalog")?;

        let answer = self.ask_text("Your choice (1-3): ")?;
        if !answer.trim().is_empty() {
            match answer.parse::<WordOrder>() {
                Ok(order) => self.language.syntax.word_order = order,
                Err(e) => {
                    tracing::warn!("{}", e);
                    writeln!(self.out, "⚠️ {}", e.user_friendly_message())?;
                }
            }
        }
        writeln!(self.out, "Word order: {}", self.language.syntax.word_order)?;

        let marker = self.ask_text(&format!(
            "Question marker (default '{}'): ",
            self.language.syntax.question_marker
        ))?;
        if !marker.trim().is_empty() {
            self.language.syntax.question_marker = QuestionMarker::parse(&marker);
        }

        self.language.syntax.register_default_rules();
        self.ensure_core_classes()?;

        writeln!(
            self.out,
            "\n🎨 Sample sentences in {} order:",
            self.language.syntax.word_order
        )?;
        for i in 1..=self.settings.sample_sentences {
            let (subject, verb, object) = self.pick_constituents();
            let syntax = &self.language.syntax;
            let sentence = syntax.sentence(&subject, &verb, &object);
            let question = syntax.question_marker.wrap(&sentence);
            writeln!(self.out, "{}. {}", i, sentence)?;
            writeln!(self.out, "   Question: {}", question)?;
        }

        writeln!(self.out, "\n✅ Level 3 complete!")?;
        self.level = self.level.next();
        Ok(())
    }

    /// 造句前確保至少有一個名詞與一個動詞
    fn ensure_core_classes(&mut self) -> Result<()> {
        for class in [WordClass::Noun, WordClass::Verb] {
            if self.language.vocabulary.is_empty(class) {
                let word = self.language.phonology.generate_word(None, &mut self.rng)?;
                tracing::debug!("No {} yet, generated '{}'", class, word);
                self.language.vocabulary.add(class, word);
            }
        }
        Ok(())
    }

    fn pick_constituents(&mut self) -> (String, String, String) {
        let vocabulary = &self.language.vocabulary;
        let subject = vocabulary
            .choose(WordClass::Noun, &mut self.rng)
            .unwrap_or_default()
            .to_string();
        let verb = vocabulary
            .choose(WordClass::Verb, &mut self.rng)
            .unwrap_or_default()
            .to_string();
        let object = if vocabulary.count(WordClass::Noun) > 1 {
            vocabulary
                .choose(WordClass::Noun, &mut self.rng)
                .unwrap_or_default()
                .to_string()
        } else {
            String::new()
        };
        (subject, verb, object)
    }

    pub fn final_showcase(&mut self) -> Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.out, "\n{}", rule)?;
        writeln!(self.out, "🎉 Congratulations! You created a new language! 🎉")?;
        writeln!(self.out, "{}", rule)?;

        let language = &self.language;
        writeln!(self.out, "\n🔤 Phonology:")?;
        writeln!(
            self.out,
            "   Consonants: {}",
            language.phonology.consonants.iter().cloned().collect::<Vec<_>>().join(", ")
        )?;
        writeln!(
            self.out,
            "   Vowels: {}",
            language.phonology.vowels.iter().cloned().collect::<Vec<_>>().join(", ")
        )?;
        writeln!(
            self.out,
            "   Syllable patterns: {}",
            language.phonology.pattern_list().join(", ")
        )?;

        writeln!(self.out, "\n🔧 Morphology:")?;
        for rule in language.morphology.rules() {
            writeln!(
                self.out,
                "   {}: {} '{}' ({})",
                rule.name, rule.rule_type, rule.marker, rule.meaning
            )?;
        }

        writeln!(self.out, "\n📝 Syntax:")?;
        writeln!(self.out, "   Word order: {}", language.syntax.word_order)?;
        for rule in language.syntax.rules() {
            writeln!(self.out, "   {}: {}", rule.name, rule.pattern)?;
        }

        writeln!(self.out, "\n📚 Vocabulary:")?;
        for (class, count) in language.vocabulary.class_counts() {
            writeln!(self.out, "   {}: {} word(s)", class, count)?;
        }

        writeln!(self.out, "\n🌟 Your language in action:")?;
        let composer = SentenceComposer::new(&self.language, &self.settings.showcase);
        for _ in 0..self.settings.showcase.sentences {
            if let Some(sentence) = composer.compose(&mut self.rng)? {
                writeln!(self.out, "   {}", sentence)?;
            }
        }

        self.level = Level::Complete;
        Ok(())
    }

    fn pause(&mut self, prompt: &str) -> Result<()> {
        self.ask_text(prompt).map(|_| ())
    }

    /// 輸入結束時視為空字串
    fn ask_text(&mut self, prompt: &str) -> Result<String> {
        match self.prompter.ask(prompt) {
            Ok(answer) => Ok(answer),
            Err(LangError::InputClosed) => {
                tracing::debug!("Input closed at prompt {:?}", prompt.trim());
                Ok(String::new())
            }
            Err(e) => Err(e),
        }
    }

    /// 選單輸入結束時視為「繼續」
    fn ask_menu(&mut self, prompt: &str) -> Result<String> {
        match self.prompter.ask(prompt) {
            Ok(answer) => Ok(answer.trim().to_lowercase()),
            Err(LangError::InputClosed) => Ok("c".to_string()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::prompter::ScriptedPrompter;

    fn engine(answers: &[&str]) -> GameEngine<ScriptedPrompter, Vec<u8>> {
        let settings = GameSettings {
            words_per_round: 4,
            seed: Some(11),
            ..GameSettings::default()
        };
        GameEngine::new(
            Language::default(),
            settings,
            ScriptedPrompter::new(answers.iter().copied()),
            Vec::new(),
        )
    }

    fn output(engine: &GameEngine<ScriptedPrompter, Vec<u8>>) -> String {
        String::from_utf8_lossy(&engine.out).to_string()
    }

    #[test]
    fn test_phonology_level_edits_inventory() {
        let mut game = engine(&["a", "x", "b", "h", "a", "tch", "c", "a", "ai", "c"]);
        game.level_phonology().unwrap();

        let phonology = &game.language().phonology;
        assert!(phonology.consonants.contains("x"));
        assert!(!phonology.consonants.contains("h"));
        assert!(!phonology.consonants.contains("tch"));
        assert!(phonology.vowels.contains("ai"));
        assert_eq!(game.language().vocabulary.count(WordClass::Unknown), 4);
        assert_eq!(game.level(), Level::Morphology);
        assert!(output(&game).contains("Added consonant: x"));
    }

    #[test]
    fn test_morphology_level_classifies_words() {
        let mut game = engine(&["c", "c", "n", "v", "a", "zz"]);
        game.level_phonology().unwrap();
        game.level_morphology().unwrap();

        let vocabulary = &game.language().vocabulary;
        assert_eq!(vocabulary.count(WordClass::Unknown), 0);
        assert_eq!(vocabulary.count(WordClass::Noun), 2);
        assert_eq!(vocabulary.count(WordClass::Verb), 1);
        assert_eq!(vocabulary.count(WordClass::Adjective), 1);
        assert_eq!(game.language().morphology.rules().len(), 12);
        assert_eq!(game.level(), Level::Syntax);
    }

    #[test]
    fn test_syntax_level_generates_missing_classes() {
        let mut game = engine(&["3", "?"]);
        game.level = Level::Syntax;
        game.level_syntax().unwrap();

        let language = game.language();
        assert_eq!(language.syntax.word_order, WordOrder::Vso);
        assert_eq!(language.syntax.question_marker.to_string(), "?");
        assert_eq!(language.vocabulary.count(WordClass::Noun), 1);
        assert_eq!(language.vocabulary.count(WordClass::Verb), 1);
        assert_eq!(language.syntax.rules().len(), 2);
        assert!(output(&game).contains("Question: "));
    }

    #[test]
    fn test_invalid_word_order_keeps_default() {
        let mut game = engine(&["7", ""]);
        game.level_syntax().unwrap();
        assert_eq!(game.language().syntax.word_order, WordOrder::Svo);
        assert!(output(&game).contains("not a supported word order"));
    }

    #[test]
    fn test_out_of_range_chance_is_rejected_before_playing() {
        let settings = GameSettings {
            seed: Some(4),
            showcase: ShowcaseSettings {
                plural_chance: 1.5,
                ..ShowcaseSettings::default()
            },
            ..GameSettings::default()
        };
        let mut game = GameEngine::new(
            Language::default(),
            settings,
            ScriptedPrompter::default(),
            Vec::new(),
        );

        assert!(matches!(
            game.run(),
            Err(LangError::InvalidConfigValueError { .. })
        ));
        assert_eq!(game.level(), Level::Phonology);
        assert!(output(&game).is_empty());
    }

    #[test]
    fn test_run_with_borrowed_prompter() {
        let mut prompter = ScriptedPrompter::new(["", "c", "c"]);
        let settings = GameSettings {
            words_per_round: 2,
            seed: Some(8),
            ..GameSettings::default()
        };
        let mut game = GameEngine::new(Language::default(), settings, &mut prompter, Vec::new());
        game.run().unwrap();
        assert_eq!(game.level(), Level::Complete);
        drop(game);

        assert_eq!(prompter.remaining(), 0);
        assert_eq!(prompter.asked()[0], "Press Enter to start...");
    }

    #[test]
    fn test_run_to_completion_on_closed_input() {
        let mut game = engine(&[]);
        game.run().unwrap();
        assert_eq!(game.level(), Level::Complete);

        let text = output(&game);
        assert!(text.contains("Welcome to the Language Creator"));
        assert!(text.contains("Your language in action"));
        // 沒有回答時全部歸為名詞
        assert_eq!(game.language().vocabulary.count(WordClass::Noun), 4);
    }
}
