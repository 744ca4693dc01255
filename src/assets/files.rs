use std::{
    collections::BTreeMap,
    io::{self, Cursor, Read},
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::foundation::error::{SurfaceError, SurfaceResult};

/// Read-only file collaborator the decoder pulls compressed bytes through.
pub trait FileSource {
    /// Open file state.
    type Handle;

    /// Open `name` for reading.
    fn open_for_read(&self, name: &str) -> io::Result<Self::Handle>;

    /// Read up to `buf.len()` bytes; `Ok(0)` means end of file.
    fn read(&self, handle: &mut Self::Handle, buf: &mut [u8]) -> io::Result<usize>;

    /// Release the handle.
    fn close(&self, handle: Self::Handle);
}

/// An open handle that is closed on drop, exposed as [`std::io::Read`] for codecs.
pub(crate) struct FileGuard<'a, F: FileSource> {
    files: &'a F,
    handle: Option<F::Handle>,
    bytes_read: u64,
}

impl<'a, F: FileSource> FileGuard<'a, F> {
    pub(crate) fn open(files: &'a F, name: &str) -> io::Result<Self> {
        let handle = files.open_for_read(name)?;
        Ok(Self {
            files,
            handle: Some(handle),
            bytes_read: 0,
        })
    }

    pub(crate) fn bytes_read(&self) -> u64 {
        self.bytes_read
    }
}

impl<F: FileSource> Read for FileGuard<'_, F> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(handle) = self.handle.as_mut() else {
            return Ok(0);
        };
        let n = self.files.read(handle, buf)?;
        self.bytes_read += n as u64;
        Ok(n)
    }
}

impl<F: FileSource> Drop for FileGuard<'_, F> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.files.close(handle);
        }
    }
}

/// Files under a root directory, addressed by normalized relative paths.
#[derive(Clone, Debug)]
pub struct DirFileSource {
    root: PathBuf,
}

impl DirFileSource {
    /// Serve files below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileSource for DirFileSource {
    type Handle = std::fs::File;

    fn open_for_read(&self, name: &str) -> io::Result<Self::Handle> {
        let rel = normalize_rel_path(name)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
        std::fs::File::open(self.root.join(rel))
    }

    fn read(&self, handle: &mut Self::Handle, buf: &mut [u8]) -> io::Result<usize> {
        handle.read(buf)
    }

    fn close(&self, handle: Self::Handle) {
        drop(handle);
    }
}

/// In-memory files keyed by name.
#[derive(Clone, Debug, Default)]
pub struct MemoryFileSource {
    files: BTreeMap<String, Arc<[u8]>>,
}

impl MemoryFileSource {
    /// Create an empty file set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace `name`.
    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(name.into(), Arc::from(bytes.into()));
    }

    /// Remove `name`, returning whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.files.remove(name).is_some()
    }
}

impl FileSource for MemoryFileSource {
    type Handle = Cursor<Arc<[u8]>>;

    fn open_for_read(&self, name: &str) -> io::Result<Self::Handle> {
        self.files
            .get(name)
            .map(|bytes| Cursor::new(Arc::clone(bytes)))
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no file '{name}'")))
    }

    fn read(&self, handle: &mut Self::Handle, buf: &mut [u8]) -> io::Result<usize> {
        handle.read(buf)
    }

    fn close(&self, handle: Self::Handle) {
        drop(handle);
    }
}

/// Normalize and validate a root-relative file name.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> SurfaceResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(SurfaceError::validation(format!(
            "file names must be relative: '{source}'"
        )));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(SurfaceError::validation(format!(
                "file names must not contain '..': '{source}'"
            )));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(SurfaceError::validation(format!(
            "file name must not be empty: '{source}'"
        )));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/files.rs"]
mod tests;
