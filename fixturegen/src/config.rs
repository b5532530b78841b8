/// Generator configuration

use crate::case::{default_cases, select_cases, TestCase, GIB};
use crate::error::Result;
use std::path::PathBuf;

/// Settings for a full fixture run
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// Directory the case directories are created in
    pub root_dir: PathBuf,

    /// Replaces every case's file count when set
    pub file_count_override: Option<u64>,

    /// Cases to run, in order
    pub cases: Vec<TestCase>,

    /// End the run before the first case at or above `large_file_threshold`
    pub stop_before_large: bool,

    /// File size that marks a case as large
    pub large_file_threshold: u64,

    /// Draw progress bars when stdout is a terminal
    pub progress: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("/tmp"),
            file_count_override: None,
            cases: default_cases(),
            stop_before_large: false,
            large_file_threshold: GIB,
            progress: true,
        }
    }
}

impl GeneratorConfig {
    pub fn with_root(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            ..Self::default()
        }
    }

    /// Keep only the named cases; an empty list keeps them all
    pub fn only_cases(mut self, names: &[String]) -> Result<Self> {
        if !names.is_empty() {
            self.cases = select_cases(&self.cases, names)?;
        }
        Ok(self)
    }

    pub fn is_large(&self, case: &TestCase) -> bool {
        case.file_size >= self.large_file_threshold
    }

    /// Cases as they will actually run, with the count override applied
    pub fn effective_cases(&self) -> Vec<TestCase> {
        self.cases
            .iter()
            .map(|case| match self.file_count_override {
                Some(count) => case.with_file_count(count),
                None => case.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.root_dir, PathBuf::from("/tmp"));
        assert_eq!(config.cases.len(), 4);
        assert!(!config.stop_before_large);
        assert!(config.is_large(&config.cases[3]));
        assert!(!config.is_large(&config.cases[2]));
    }

    #[test]
    fn test_override_applies_to_every_case() {
        let config = GeneratorConfig {
            file_count_override: Some(2),
            ..GeneratorConfig::default()
        };
        assert!(config.effective_cases().iter().all(|c| c.file_count == 2));
        // Sizes untouched
        assert_eq!(config.effective_cases()[3].file_size, GIB);
    }

    #[test]
    fn test_only_cases() {
        let config = GeneratorConfig::with_root("/x")
            .only_cases(&["case_2".into()])
            .unwrap();
        assert_eq!(config.cases.len(), 1);
        assert_eq!(config.cases[0].name, "case_2");

        assert!(GeneratorConfig::default().only_cases(&["bogus".into()]).is_err());
        assert_eq!(GeneratorConfig::default().only_cases(&[]).unwrap().cases.len(), 4);
    }
}
