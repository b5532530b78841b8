/// Test case table
///
/// A case is a named batch of files sharing one count and one size. The
/// default table mirrors the fixtures downstream backup suites expect.

use crate::error::{FixtureError, Result};
use indicatif::HumanBytes;
use std::fmt;

pub const KIB: u64 = 1024;
pub const MIB: u64 = 1024 * KIB;
pub const GIB: u64 = 1024 * MIB;

/// One named batch of fixtures
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestCase {
    pub name: String,
    pub file_count: u64,
    pub file_size: u64,
}

impl TestCase {
    pub fn new(name: impl Into<String>, file_count: u64, file_size: u64) -> Self {
        Self {
            name: name.into(),
            file_count,
            file_size,
        }
    }

    /// The name becomes a single directory component under the root
    pub fn validate(&self) -> Result<()> {
        validate_case_name(&self.name)
    }

    /// Bytes this case will put on disk
    pub fn total_bytes(&self) -> u64 {
        self.file_count.saturating_mul(self.file_size)
    }

    pub fn with_file_count(&self, file_count: u64) -> Self {
        Self {
            file_count,
            ..self.clone()
        }
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Create {} files of {}",
            self.file_count,
            HumanBytes(self.file_size)
        )
    }
}

pub fn validate_case_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(FixtureError::InvalidCase("empty case name".into()));
    }
    if name == "." || name == ".." {
        return Err(FixtureError::InvalidCase(format!(
            "case name {:?} is not a directory name",
            name
        )));
    }
    if name.contains(['/', '\\', '\0']) {
        return Err(FixtureError::InvalidCase(format!(
            "case name {:?} contains a path separator",
            name
        )));
    }
    Ok(())
}

/// The hardcoded fixture table
pub fn default_cases() -> Vec<TestCase> {
    vec![
        TestCase::new("case_1", 1000, KIB),
        TestCase::new("case_2", 1000 * 1000, KIB),
        TestCase::new("case_3", 10, MIB),
        TestCase::new("case_4", 10, GIB),
    ]
}

/// Look up cases by name, keeping table order
pub fn select_cases(cases: &[TestCase], names: &[String]) -> Result<Vec<TestCase>> {
    if let Some(unknown) = names.iter().find(|n| !cases.iter().any(|c| &c.name == *n)) {
        return Err(FixtureError::InvalidCase(format!("unknown case {:?}", unknown)));
    }
    Ok(cases
        .iter()
        .filter(|c| names.contains(&c.name))
        .cloned()
        .collect())
}
