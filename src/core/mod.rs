pub mod composer;
pub mod game;
pub mod language;
pub mod morphology;
pub mod phonology;
pub mod syntax;
pub mod vocabulary;

pub use crate::domain::model::{Level, MorphologyRule, RuleType, SyntaxRule, WordClass};
pub use crate::domain::ports::Prompter;
pub use crate::utils::error::Result;
