/// Content-addressed fixture generation
///
/// Each fixture goes through the same three steps: random bytes are written
/// under a throwaway UUID name, the file is streamed back through SHA-256,
/// and it is renamed to the hex digest. Nothing is cleaned up on failure; a
/// half-written file stays at its UUID path.

use crate::case::{validate_case_name, TestCase};
use crate::digest::{digest_file, ContentDigest};
use crate::error::{FixtureError, Result};
use crate::progress::CaseProgress;
use rand::RngCore;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Buffer used when writing random payloads
pub const WRITE_CHUNK_SIZE: usize = 64 * 1024;

/// Upper bound on the report's up-front allocation
const MAX_PREALLOCATED_FILES: usize = 1024;

/// A fixture at its final, content-addressed path
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub digest: ContentDigest,
    pub size: u64,
}

/// Outcome of generating one case
#[derive(Clone, Debug)]
pub struct CaseReport {
    pub case: TestCase,
    pub dir: PathBuf,
    pub files: Vec<GeneratedFile>,

    /// Payloads whose digest was already on disk; the existing file was kept
    pub duplicates: u64,
}

/// What happened to one freshly written payload
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FixtureOutcome {
    Created(GeneratedFile),
    Duplicate(ContentDigest),
}

impl CaseReport {
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}

/// Generate `file_count` fixtures of `file_size` bytes under `root/case_name`
pub fn generate(
    root: &Path,
    case_name: &str,
    file_count: u64,
    file_size: u64,
) -> Result<CaseReport> {
    generate_case(root, &TestCase::new(case_name, file_count, file_size), &CaseProgress::hidden())
}

/// Same as [`generate`], ticking `progress` once per finished fixture
pub fn generate_case(root: &Path, case: &TestCase, progress: &CaseProgress) -> Result<CaseReport> {
    validate_case_name(&case.name)?;

    let dir = root.join(&case.name);
    ensure_dir(&dir)?;

    let mut files = Vec::with_capacity(preallocated_files(case.file_count));
    let mut duplicates = 0;
    for _ in 0..case.file_count {
        let outcome = match create_fixture(&dir, case.file_size) {
            Ok(outcome) => outcome,
            Err(e) => {
                progress.abandon();
                return Err(e);
            }
        };
        match outcome {
            FixtureOutcome::Created(file) => {
                debug!("Created {} ({} bytes)", file.path.display(), file.size);
                files.push(file);
            }
            FixtureOutcome::Duplicate(digest) => {
                warn!("{} already exists in {}, keeping it", digest, dir.display());
                duplicates += 1;
            }
        }
        progress.inc();
    }
    progress.finish();

    Ok(CaseReport {
        case: case.clone(),
        dir,
        files,
        duplicates,
    })
}

fn preallocated_files(file_count: u64) -> usize {
    usize::try_from(file_count)
        .unwrap_or(usize::MAX)
        .min(MAX_PREALLOCATED_FILES)
}

/// Create `dir` and any missing parents
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|source| FixtureError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    info!("Created directory {}", dir.display());
    Ok(())
}

/// Write one random fixture into `dir` and move it to its digest name
///
/// An existing regular file under the digest name already holds the same
/// bytes, so it is left alone and the new payload is dropped.
pub fn create_fixture(dir: &Path, size: u64) -> Result<FixtureOutcome> {
    let temp_path = dir.join(Uuid::new_v4().to_string());
    write_random_file(&temp_path, size)?;

    let digest = digest_file(&temp_path)?;
    let final_path = dir.join(digest.to_hex());
    if final_path.is_file() {
        fs::remove_file(&temp_path).map_err(|source| FixtureError::Remove {
            path: temp_path.clone(),
            source,
        })?;
        return Ok(FixtureOutcome::Duplicate(digest));
    }
    fs::rename(&temp_path, &final_path).map_err(|source| FixtureError::Rename {
        from: temp_path.clone(),
        to: final_path.clone(),
        source,
    })?;

    Ok(FixtureOutcome::Created(GeneratedFile {
        path: final_path,
        digest,
        size,
    }))
}

/// Fill a new file with exactly `size` bytes from the thread CSPRNG
pub fn write_random_file(path: &Path, size: u64) -> Result<()> {
    let write_err = |source| FixtureError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(write_err)?;
    let mut rng = rand::thread_rng();
    let mut buf = vec![0u8; WRITE_CHUNK_SIZE];
    let mut remaining = size;
    while remaining > 0 {
        let n = remaining.min(WRITE_CHUNK_SIZE as u64) as usize;
        rng.fill_bytes(&mut buf[..n]);
        file.write_all(&buf[..n]).map_err(write_err)?;
        remaining -= n as u64;
    }
    file.flush().map_err(write_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::{digest_bytes, EMPTY_DIGEST_HEX};

    #[test]
    fn test_write_random_file_exact_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload");
        let size = WRITE_CHUNK_SIZE as u64 * 2 + 5;

        write_random_file(&path, size).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), size);
    }

    #[test]
    fn test_create_fixture_named_by_digest() {
        let dir = tempfile::tempdir().unwrap();
        let file = match create_fixture(dir.path(), 100).unwrap() {
            FixtureOutcome::Created(file) => file,
            other => panic!("unexpected {:?}", other),
        };

        let data = fs::read(&file.path).unwrap();
        assert_eq!(data.len(), 100);
        assert_eq!(digest_bytes(&data), file.digest);
        assert_eq!(file.path.file_name().unwrap().to_str().unwrap(), file.digest.to_hex());
    }

    #[test]
    fn test_zero_size_fixture() {
        let dir = tempfile::tempdir().unwrap();
        let file = match create_fixture(dir.path(), 0).unwrap() {
            FixtureOutcome::Created(file) => file,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(file.digest.to_hex(), EMPTY_DIGEST_HEX);
        assert_eq!(fs::metadata(&file.path).unwrap().len(), 0);

        // Same bytes again: existing file kept, payload dropped
        let again = create_fixture(dir.path(), 0).unwrap();
        assert_eq!(again, FixtureOutcome::Duplicate(file.digest));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_repeated_empty_payloads_counted_once() {
        let dir = tempfile::tempdir().unwrap();
        let report = generate(dir.path(), "z", 3, 0).unwrap();

        let on_disk = fs::read_dir(&report.dir).unwrap().count();
        assert_eq!(on_disk, 1);
        assert_eq!(report.file_count(), on_disk);
        assert_eq!(report.duplicates, 2);
        assert_eq!(report.total_bytes(), 0);
    }

    #[test]
    fn test_preallocation_is_bounded() {
        assert_eq!(preallocated_files(0), 0);
        assert_eq!(preallocated_files(10), 10);
        assert_eq!(preallocated_files(u64::MAX), MAX_PREALLOCATED_FILES);
        assert_eq!(preallocated_files(1_000_000), MAX_PREALLOCATED_FILES);

        // Huge counts must fail on the filesystem, not on allocation
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        fs::write(&blocker, b"x").unwrap();
        let result = std::panic::catch_unwind(|| generate(&blocker, "huge", u64::MAX, 0));
        assert!(matches!(result, Ok(Err(FixtureError::CreateDir { .. }))));
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let report = generate(dir.path(), "case_1", 4, 32).unwrap();

        let names: Vec<String> = fs::read_dir(&report.dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names.len(), 4);
        for name in names {
            assert!(ContentDigest::from_hex(&name).is_ok(), "leftover {}", name);
        }
    }

    #[test]
    fn test_rejects_bad_case_name() {
        let dir = tempfile::tempdir().unwrap();
        let err = generate(dir.path(), "../escape", 1, 1).unwrap_err();
        assert!(matches!(err, FixtureError::InvalidCase(_)));
        assert!(!dir.path().join("..").join("escape").exists());
    }

    #[test]
    fn test_create_dir_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"x").unwrap();

        // A regular file where the root directory should be
        let err = generate(&blocker, "case_1", 1, 1).unwrap_err();
        assert!(matches!(err, FixtureError::CreateDir { .. }));
    }

    #[test]
    fn test_report_totals() {
        let dir = tempfile::tempdir().unwrap();
        let report = generate(dir.path(), "case_1", 3, 10).unwrap();
        assert_eq!(report.file_count(), 3);
        assert_eq!(report.total_bytes(), 30);
        assert_eq!(report.dir, dir.path().join("case_1"));
    }
}
