//! Sample source files
//!
//!     Small programs for each built-in language live under `hilite-core/samples/<language>/`.
//!     Tests that need realistic input should take it from here rather than inventing
//!     snippets inline, so that every grammar is exercised against the same vetted texts.

use std::fs;
use std::path::{Path, PathBuf};

/// One sample file and the language it is written in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub language: String,
    pub path: PathBuf,
}

impl Sample {
    pub fn source(&self) -> String {
        fs::read_to_string(&self.path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", self.path.display(), e))
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

pub fn samples_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("samples")
}

/// Samples of one language, sorted by file name
pub fn samples_for(language: &str) -> Vec<Sample> {
    let dir = samples_root().join(language);
    let Ok(entries) = fs::read_dir(&dir) else {
        return Vec::new();
    };
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.is_file())
        .collect();
    paths.sort();
    paths
        .into_iter()
        .map(|path| Sample {
            language: language.to_string(),
            path,
        })
        .collect()
}

/// Every sample of every language, sorted by language then file name
pub fn all_samples() -> Vec<Sample> {
    let Ok(entries) = fs::read_dir(samples_root()) else {
        return Vec::new();
    };
    let mut languages: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    languages.sort();
    languages
        .iter()
        .flat_map(|language| samples_for(language))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_language_has_samples() {
        for language in ["go", "kotlin", "swift", "typescript"] {
            assert!(!samples_for(language).is_empty(), "no samples for {}", language);
        }
    }

    #[test]
    fn unknown_language_has_no_samples() {
        assert!(samples_for("cobol").is_empty());
    }
}
