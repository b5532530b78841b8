/// Testing utilities for the fixture generator
/// 
/// Provides:
/// - Random test data generators
/// - On-disk fixture verification

pub mod generators;
pub mod fixtures;

pub use generators::*;
pub use fixtures::*;
