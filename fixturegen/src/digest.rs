/// Content digests for generated fixtures
///
/// Files are addressed by the lowercase hex SHA-256 of their bytes. Hashing
/// is always streamed through a fixed-size buffer so gigabyte-scale fixtures
/// never have to be held in memory.

use crate::error::{FixtureError, Result};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

pub const DIGEST_SIZE: usize = 32;

/// Length of a digest rendered as hex
pub const DIGEST_HEX_LEN: usize = DIGEST_SIZE * 2;

/// Read buffer used when hashing files
pub const HASH_CHUNK_SIZE: usize = 4096;

/// SHA-256 of the empty byte sequence
pub const EMPTY_DIGEST_HEX: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// SHA-256 output (32 bytes)
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentDigest([u8; DIGEST_SIZE]);

impl ContentDigest {
    pub fn new(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }

    /// Parse a 64-character hex string, as found in a fixture filename
    pub fn from_hex(s: &str) -> Result<Self> {
        if s.len() != DIGEST_HEX_LEN {
            return Err(FixtureError::InvalidDigest(format!(
                "expected {} hex chars, got {}",
                DIGEST_HEX_LEN,
                s.len()
            )));
        }
        let mut bytes = [0u8; DIGEST_SIZE];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| FixtureError::InvalidDigest(e.to_string()))?;
        Ok(Self(bytes))
    }

    /// Lowercase hex, used verbatim as the fixture filename
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentDigest({})", hex::encode(&self.0[..8]))
    }
}

impl AsRef<[u8]> for ContentDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Incremental SHA-256 accumulator
#[derive(Clone, Default)]
pub struct StreamHasher {
    inner: Sha256,
    bytes_seen: u64,
}

impl StreamHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, chunk: &[u8]) {
        self.inner.update(chunk);
        self.bytes_seen += chunk.len() as u64;
    }

    /// Total number of bytes fed so far
    pub fn bytes_seen(&self) -> u64 {
        self.bytes_seen
    }

    pub fn finalize(self) -> ContentDigest {
        ContentDigest::new(self.inner.finalize().into())
    }

    pub fn finalize_hex(self) -> String {
        self.finalize().to_hex()
    }
}

/// Hash an in-memory buffer
pub fn digest_bytes(data: &[u8]) -> ContentDigest {
    let mut hasher = StreamHasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Hash everything a reader yields, `HASH_CHUNK_SIZE` bytes at a time
pub fn digest_reader<R: Read>(mut reader: R) -> io::Result<ContentDigest> {
    let mut hasher = StreamHasher::new();
    let mut buf = [0u8; HASH_CHUNK_SIZE];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize())
}

/// Hash a file on disk without loading it wholesale
pub fn digest_file(path: &Path) -> Result<ContentDigest> {
    let read_err = |source| FixtureError::Read {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(read_err)?;
    digest_reader(file).map_err(read_err)
}
