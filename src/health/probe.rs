//! Probe strategies for the monitored path.
//!
//! # Strategies
//! - `metadata`: statfs on the target; succeeds iff the call succeeds
//! - `read`: read one 512-byte block at a random block-aligned offset
//!
//! # Design Decisions
//! - The strategy is resolved once into a plain `fn` value; the loop never dispatches on names
//! - Probes are blocking calls; callers run them on the blocking pool
//! - Files smaller than one block are an explicit failure, no offset arithmetic is attempted

use std::fmt;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rand::Rng;
use thiserror::Error;

/// Size of the block read by the `read` strategy.
pub const BLOCK_SIZE: u64 = 1 << 9;

/// Signature shared by every probe strategy.
pub type CheckFn = fn(&Path) -> Result<(), ProbeError>;

/// Errors returned by a single probe attempt.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("statfs {} failed: {source}", .path.display())]
    Statfs {
        path: PathBuf,
        #[source]
        source: nix::errno::Errno,
    },

    #[error("{op} {} failed: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is {size} bytes, smaller than one 512-byte block", .path.display())]
    FileTooSmall { path: PathBuf, size: u64 },
}

impl ProbeError {
    fn io(op: &'static str, path: &Path, source: io::Error) -> Self {
        ProbeError::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Closed set of probe strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckMode {
    Metadata,
    Read,
}

impl CheckMode {
    /// The function implementing this strategy.
    pub fn check_fn(self) -> CheckFn {
        match self {
            CheckMode::Metadata => check_metadata,
            CheckMode::Read => check_read,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CheckMode::Metadata => "metadata",
            CheckMode::Read => "read",
        }
    }
}

impl fmt::Display for CheckMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unrecognized strategy name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported check mode `{0}` (expected one of: metadata, stat, read)")]
pub struct UnknownCheckMode(pub String);

impl FromStr for CheckMode {
    type Err = UnknownCheckMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metadata" | "stat" => Ok(CheckMode::Metadata),
            "read" => Ok(CheckMode::Read),
            _ => Err(UnknownCheckMode(s.to_string())),
        }
    }
}

/// A strategy bound to its target path.
#[derive(Clone)]
pub struct Probe {
    mode: CheckMode,
    target: PathBuf,
    check: CheckFn,
}

impl Probe {
    pub fn new(mode: CheckMode, target: impl Into<PathBuf>) -> Self {
        Self {
            mode,
            target: target.into(),
            check: mode.check_fn(),
        }
    }

    /// Bind an arbitrary check function, reported under `mode`.
    #[cfg(test)]
    pub(crate) fn with_check(mode: CheckMode, target: impl Into<PathBuf>, check: CheckFn) -> Self {
        Self {
            mode,
            target: target.into(),
            check,
        }
    }

    /// Run one probe attempt. Blocks on filesystem I/O.
    pub fn run(&self) -> Result<(), ProbeError> {
        (self.check)(&self.target)
    }

    pub fn mode(&self) -> CheckMode {
        self.mode
    }

    pub fn target(&self) -> &Path {
        &self.target
    }
}

impl fmt::Debug for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Probe")
            .field("mode", &self.mode)
            .field("target", &self.target)
            .finish()
    }
}

/// statfs the filesystem holding `path`.
pub fn check_metadata(path: &Path) -> Result<(), ProbeError> {
    nix::sys::statfs::statfs(path)
        .map(|_| ())
        .map_err(|source| ProbeError::Statfs {
            path: path.to_path_buf(),
            source,
        })
}

/// Read one block from a random block-aligned offset of `path`.
pub fn check_read(path: &Path) -> Result<(), ProbeError> {
    let mut file = File::open(path).map_err(|e| ProbeError::io("open", path, e))?;

    let size = file
        .seek(SeekFrom::End(0))
        .map_err(|e| ProbeError::io("seek", path, e))?;

    let blocks = size / BLOCK_SIZE;
    if blocks == 0 {
        return Err(ProbeError::FileTooSmall {
            path: path.to_path_buf(),
            size,
        });
    }

    let offset = rand::thread_rng().gen_range(0..blocks) * BLOCK_SIZE;
    file.seek(SeekFrom::Start(offset))
        .map_err(|e| ProbeError::io("seek", path, e))?;

    let mut buf = [0u8; BLOCK_SIZE as usize];
    file.read_exact(&mut buf)
        .map_err(|e| ProbeError::io("read", path, e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_of(len: usize) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&vec![0xA5; len]).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_parse_check_mode() {
        assert_eq!("metadata".parse::<CheckMode>(), Ok(CheckMode::Metadata));
        assert_eq!("stat".parse::<CheckMode>(), Ok(CheckMode::Metadata));
        assert_eq!("READ".parse::<CheckMode>(), Ok(CheckMode::Read));
        assert_eq!(
            "fsync".parse::<CheckMode>(),
            Err(UnknownCheckMode("fsync".into()))
        );
    }

    #[test]
    fn test_metadata_on_existing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_metadata(dir.path()).is_ok());
    }

    #[test]
    fn test_metadata_on_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let err = check_metadata(&missing).unwrap_err();
        assert!(matches!(err, ProbeError::Statfs { source: nix::errno::Errno::ENOENT, .. }));
    }

    #[test]
    fn test_read_single_block_file() {
        let file = file_of(BLOCK_SIZE as usize);
        assert!(check_read(file.path()).is_ok());
    }

    #[test]
    fn test_read_multi_block_file() {
        let file = file_of(BLOCK_SIZE as usize * 64 + 17);
        for _ in 0..100 {
            assert!(check_read(file.path()).is_ok());
        }
    }

    #[test]
    fn test_read_empty_file_fails() {
        let file = file_of(0);
        let err = check_read(file.path()).unwrap_err();
        assert!(matches!(err, ProbeError::FileTooSmall { size: 0, .. }));
    }

    #[test]
    fn test_read_sub_block_file_fails() {
        let file = file_of(BLOCK_SIZE as usize - 1);
        let err = check_read(file.path()).unwrap_err();
        assert!(matches!(err, ProbeError::FileTooSmall { size: 511, .. }));
    }

    #[test]
    fn test_read_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = check_read(&dir.path().join("gone")).unwrap_err();
        assert!(matches!(err, ProbeError::Io { op: "open", .. }));
    }

    #[test]
    fn test_probe_dispatches_on_mode() {
        let file = file_of(0);
        assert!(Probe::new(CheckMode::Metadata, file.path()).run().is_ok());
        assert!(Probe::new(CheckMode::Read, file.path()).run().is_err());
    }
}
