//! Byte sources for catalog files.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Reads the raw bytes of a catalog file.
///
/// Implemented for [`FsLoader`], [`MemoryLoader`] and any
/// `Fn(&Path) -> io::Result<Vec<u8>>` closure.
pub trait Loader: Send + Sync {
    fn load_message(&self, path: &Path) -> io::Result<Vec<u8>>;
}

impl<F> Loader for F
where
    F: Fn(&Path) -> io::Result<Vec<u8>> + Send + Sync,
{
    fn load_message(&self, path: &Path) -> io::Result<Vec<u8>> {
        self(path)
    }
}

/// Reads catalogs from the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl Loader for FsLoader {
    fn load_message(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// Serves catalogs from memory, e.g. files embedded with `include_bytes!`.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` under `path`.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(path, bytes);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), bytes.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Loader for MemoryLoader {
    fn load_message(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no embedded catalog at {}", path.display()),
            )
        })
    }
}
