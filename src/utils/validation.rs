use crate::utils::error::{LangError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(LangError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(LangError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(LangError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LangError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN 也會落在這裡
    if !(value >= min && value <= max) {
        return Err(LangError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_probability(field_name: &str, value: f64) -> Result<()> {
    validate_range(field_name, value, 0.0, 1.0)
}

/// 檢查音段：不可為空、不可含空白、長度上限以字元計
pub fn validate_segment(segment: &str, max_chars: usize) -> Result<()> {
    if segment.is_empty() {
        return Err(LangError::InvalidSegment {
            segment: segment.to_string(),
            reason: "Segment cannot be empty".to_string(),
        });
    }

    if segment.chars().any(char::is_whitespace) {
        return Err(LangError::InvalidSegment {
            segment: segment.to_string(),
            reason: "Segment cannot contain whitespace".to_string(),
        });
    }

    let length = segment.chars().count();
    if length > max_chars {
        return Err(LangError::InvalidSegment {
            segment: segment.to_string(),
            reason: format!("Segment has {} letters, at most {} allowed", length, max_chars),
        });
    }

    Ok(())
}

pub fn validate_unique_names<'a, I>(field_name: &str, names: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(LangError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: name.to_string(),
                reason: "Duplicate name".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("game.words_per_round", 15, 1).is_ok());
        assert!(validate_positive_number("game.words_per_round", 0, 1).is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("export", "./out/lang.json").is_ok());
        assert!(validate_path("export", "").is_err());
        assert!(validate_path("export", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_probability() {
        assert!(validate_probability("showcase.plural_chance", 0.3).is_ok());
        assert!(validate_probability("showcase.plural_chance", 1.0).is_ok());
        assert!(validate_probability("showcase.plural_chance", 1.5).is_err());
        assert!(validate_probability("showcase.plural_chance", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_segment() {
        assert!(validate_segment("ch", 2).is_ok());
        assert!(validate_segment("ñ", 1).is_ok());
        assert!(validate_segment("", 2).is_err());
        assert!(validate_segment("tch", 2).is_err());
        assert!(validate_segment("a e", 3).is_err());
    }

    #[test]
    fn test_validate_unique_names() {
        assert!(validate_unique_names("rules", ["a", "b"]).is_ok());
        assert!(validate_unique_names("rules", ["a", "a"]).is_err());
    }
}
