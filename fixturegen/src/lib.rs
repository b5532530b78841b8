/// Fixture generator for storage and backup test suites
///
/// Creates directories of random files whose names are the SHA-256 of their
/// own content:
/// - `<root>/<case_name>/<sha256-hex>`
/// - one directory per test case, files written sequentially

pub mod case;
pub mod config;
pub mod digest;
pub mod error;
pub mod generator;
pub mod progress;
pub mod runner;

pub use case::{default_cases, TestCase};
pub use config::GeneratorConfig;
pub use digest::{digest_bytes, digest_file, ContentDigest, StreamHasher, EMPTY_DIGEST_HEX};
pub use error::{FixtureError, Result};
pub use generator::{generate, generate_case, CaseReport, FixtureOutcome, GeneratedFile};
pub use runner::{run, RunReport};
