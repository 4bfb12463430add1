use crate::core::language::{Language, LanguageExport};
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// 將語言寫成 JSON 檔
#[derive(Debug, Clone)]
pub struct JsonExporter {
    path: PathBuf,
}

impl JsonExporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn export(&self, language: &Language) -> Result<PathBuf> {
        let snapshot = language.to_export();
        let json = serde_json::to_string_pretty(&snapshot)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.path, json)?;
        tracing::info!("📁 Language exported to {}", self.path.display());
        Ok(self.path.clone())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<LanguageExport> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::WordClass;
    use tempfile::TempDir;

    #[test]
    fn test_export_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("language.json");

        let mut language = Language::default();
        language.vocabulary.add(WordClass::Verb, "tre");

        let written = JsonExporter::new(&path).export(&language).unwrap();
        assert_eq!(written, path);

        let snapshot = JsonExporter::load(&path).unwrap();
        assert_eq!(snapshot.vocabulary["verb"], vec!["tre"]);
        assert_eq!(snapshot.consonants.len(), 19);
    }
}
