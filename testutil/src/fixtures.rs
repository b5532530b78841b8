/// Checks for generated fixture directories
///
/// These recompute every digest from disk, so they only rely on the
/// directory layout and never on the generator's own report.

use sha2::{Digest, Sha256};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Regular files in `dir`, sorted by path
pub fn list_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("cannot read {}: {}", dir.display(), e))
        .map(|entry| entry.expect("directory entry").path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    files
}

/// Lowercase hex SHA-256 of a file, read in 4 KiB blocks
pub fn sha256_hex_of(path: &Path) -> String {
    let mut file = fs::File::open(path)
        .unwrap_or_else(|e| panic!("cannot open {}: {}", path.display(), e));
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = file.read(&mut buf).expect("read fixture");
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    hex::encode(hasher.finalize())
}

/// Assert every file in `dir` is `expected_size` bytes and named by its own digest
pub fn verify_case_dir(dir: &Path, expected_size: u64) -> Vec<PathBuf> {
    let files = list_files(dir);
    for path in &files {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .expect("utf-8 file name");
        let len = fs::metadata(path).expect("fixture metadata").len();
        assert_eq!(len, expected_size, "{} has wrong size", path.display());
        assert_eq!(name.len(), 64, "{} is not a sha256 name", name);
        assert_eq!(sha256_hex_of(path), name, "{} does not match its content", path.display());
    }
    files
}
