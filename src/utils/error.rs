use thiserror::Error;

#[derive(Error, Debug)]
pub enum LangError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid segment '{segment}': {reason}")]
    InvalidSegment { segment: String, reason: String },

    #[error("Invalid syllable pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("The {inventory} inventory is empty")]
    EmptyInventory { inventory: String },

    #[error("No phonotactically valid word after {attempts} attempts")]
    GenerationExhausted { attempts: usize },

    #[error("Unknown morphology rule: {name}")]
    UnknownRule { name: String },

    #[error("Unknown word order: {value}")]
    InvalidWordOrder { value: String },

    #[error("Input stream closed")]
    InputClosed,
}

/// 錯誤分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Generation,
    Grammar,
    Input,
    System,
}

/// 錯誤嚴重程度，決定 CLI 的退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LangError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LangError::ConfigValidationError { .. }
            | LangError::InvalidConfigValueError { .. }
            | LangError::InvalidPattern { .. }
            | LangError::InvalidWordOrder { .. } => ErrorCategory::Configuration,
            LangError::InvalidSegment { .. }
            | LangError::EmptyInventory { .. }
            | LangError::GenerationExhausted { .. } => ErrorCategory::Generation,
            LangError::UnknownRule { .. } => ErrorCategory::Grammar,
            LangError::InputClosed => ErrorCategory::Input,
            LangError::IoError(_) | LangError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LangError::InputClosed => ErrorSeverity::Low,
            LangError::InvalidSegment { .. } | LangError::UnknownRule { .. } => {
                ErrorSeverity::Medium
            }
            LangError::IoError(_) | LangError::SerializationError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            LangError::IoError(e) => format!("File or terminal access failed: {}", e),
            LangError::SerializationError(e) => format!("Could not write the language export: {}", e),
            LangError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            LangError::InvalidConfigValueError { field, value, reason } => {
                format!("'{}' is not a valid value for '{}' ({})", value, field, reason)
            }
            LangError::InvalidSegment { segment, reason } => {
                format!("The sound '{}' cannot be used: {}", segment, reason)
            }
            LangError::InvalidPattern { pattern, reason } => {
                format!("The syllable pattern '{}' cannot be used: {}", pattern, reason)
            }
            LangError::EmptyInventory { inventory } => {
                format!("Your language has no {} left to build words with", inventory)
            }
            LangError::GenerationExhausted { attempts } => format!(
                "No valid word could be built from this sound system ({} tries)",
                attempts
            ),
            LangError::UnknownRule { name } => format!("There is no word-building rule called '{}'", name),
            LangError::InvalidWordOrder { value } => format!("'{}' is not a supported word order", value),
            LangError::InputClosed => "Input ended before the game finished".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LangError::IoError(_) => "Check that the path exists and is writable",
            LangError::SerializationError(_) => "Retry the export with a different output path",
            LangError::ConfigValidationError { .. } | LangError::InvalidConfigValueError { .. } => {
                "Fix the value in the TOML language file or the command-line flag"
            }
            LangError::InvalidSegment { .. } => "Consonants take at most 2 letters, vowels at most 3",
            LangError::InvalidPattern { .. } => "Syllable patterns may only contain the letters C and V",
            LangError::EmptyInventory { .. } => "Add at least one consonant and one vowel",
            LangError::GenerationExhausted { .. } => {
                "Add vowels, allowed clusters or final consonants so more words are legal"
            }
            LangError::UnknownRule { .. } => "Register the rule in [morphology] before using it",
            LangError::InvalidWordOrder { .. } => "Use one of SVO, SOV or VSO",
            LangError::InputClosed => "Provide more answers in the --answers file",
        }
    }
}

pub type Result<T> = std::result::Result<T, LangError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(ErrorSeverity::Critical > ErrorSeverity::High);
        assert_eq!(LangError::InputClosed.severity(), ErrorSeverity::Low);
        let io = LangError::from(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert_eq!(io.severity(), ErrorSeverity::Critical);
        assert_eq!(io.category(), ErrorCategory::System);
    }

    #[test]
    fn test_user_friendly_message_mentions_rule() {
        let err = LangError::UnknownRule {
            name: "xyz_suffix".to_string(),
        };
        assert!(err.user_friendly_message().contains("xyz_suffix"));
        assert_eq!(err.category(), ErrorCategory::Grammar);
    }
}
