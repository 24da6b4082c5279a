//! File stores for decoded data URIs

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

/// Destination for decoded image bytes
pub trait FileStore {
    fn write(&self, path: &Path, bytes: Vec<u8>) -> impl Future<Output = io::Result<()>>;
}

/// Writes to the real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFileStore;

impl FileStore for FsFileStore {
    async fn write(&self, path: &Path, bytes: Vec<u8>) -> io::Result<()> {
        if let Some(dir) = path.parent() {
            smol::fs::create_dir_all(dir).await?;
        }
        smol::fs::write(path, bytes).await
    }
}

/// In-memory store, for hosts without a writable filesystem
#[derive(Debug, Default)]
pub struct MemoryFileStore {
    files: RefCell<HashMap<PathBuf, Vec<u8>>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.borrow().get(path).cloned()
    }

    pub fn len(&self) -> usize {
        self.files.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.borrow().is_empty()
    }
}

impl FileStore for MemoryFileStore {
    async fn write(&self, path: &Path, bytes: Vec<u8>) -> io::Result<()> {
        self.files.borrow_mut().insert(path.to_path_buf(), bytes);
        Ok(())
    }
}
