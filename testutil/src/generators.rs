/// Test data generators

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Generate random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen()).collect()
}

/// Generate a random directory-safe case name
pub fn random_case_name() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    format!("case_{}", suffix)
}

/// Strategy for case names accepted by the generator
pub fn case_name_strategy() -> impl proptest::strategy::Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}"
}
