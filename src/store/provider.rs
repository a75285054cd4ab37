//! Persistence collaborators
//!
//! The store itself only reads and writes byte streams; a
//! [`PersistenceProvider`] decides where those streams come from. The two
//! shipped providers cover the usual cases: a filesystem path with atomic
//! replace-on-save, and an embedded read-only resource whose `save` always
//! fails without touching anything.

use std::fs::File;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Supplies byte sources and sinks for store persistence.
pub trait PersistenceProvider {
    /// Open a byte source for loading.
    fn open_source(&self) -> Result<Box<dyn Read>>;

    /// Open a byte sink for saving. A read-only provider fails with
    /// [`Error::ReadOnlyTarget`] without mutating the underlying resource.
    fn open_sink(&self) -> Result<Box<dyn CommitSink>>;
}

/// A byte sink whose contents only become visible once committed.
pub trait CommitSink: Write {
    /// Finalize the write. Until this succeeds the destination keeps its
    /// previous contents.
    fn commit(self: Box<Self>) -> Result<()>;
}

/// Filesystem-backed provider.
///
/// Saves write to a `.tmp` sibling first and rename it over the
/// destination on commit, so a crash mid-save never leaves a half-written
/// store behind.
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file currently exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl PersistenceProvider for FileProvider {
    fn open_source(&self) -> Result<Box<dyn Read>> {
        Ok(Box::new(File::open(&self.path)?))
    }

    fn open_sink(&self) -> Result<Box<dyn CommitSink>> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let tmp_path = self.tmp_path();
        let file = File::create(&tmp_path)?;
        Ok(Box::new(FileSink {
            file,
            tmp_path,
            final_path: self.path.clone(),
        }))
    }
}

struct FileSink {
    file: File,
    tmp_path: PathBuf,
    final_path: PathBuf,
}

impl Write for FileSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.file.flush()
    }
}

impl CommitSink for FileSink {
    fn commit(self: Box<Self>) -> Result<()> {
        let FileSink {
            file,
            tmp_path,
            final_path,
        } = *self;
        file.sync_all()?;
        drop(file);
        std::fs::rename(&tmp_path, &final_path)?;
        Ok(())
    }
}

/// Read-only provider over an in-memory byte buffer, e.g. a store compiled
/// into the binary or shipped as an asset.
#[derive(Debug, Clone)]
pub struct BytesProvider {
    bytes: Vec<u8>,
}

impl BytesProvider {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

impl PersistenceProvider for BytesProvider {
    fn open_source(&self) -> Result<Box<dyn Read>> {
        Ok(Box::new(Cursor::new(self.bytes.clone())))
    }

    fn open_sink(&self) -> Result<Box<dyn CommitSink>> {
        Err(Error::ReadOnlyTarget)
    }
}
