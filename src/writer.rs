//! Filesystem capability and the scaffold writer.
//!
//! [`FileSink`] is the only way the generator touches disk. [`LocalFs`] is the
//! real thing, rooted at a target directory; [`MemoryFs`] keeps everything in
//! a map so writer and fetcher logic can be checked without a filesystem.

use log::debug;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::backend::Backend;
use crate::error::ScaffoldError;
use crate::templates;

/// Where scaffold output goes. Paths are relative to the sink's root.
pub trait FileSink {
    /// Create or truncate `path` and return a writer for it.
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write + '_>>;

    /// Create a single directory level. Returns `AlreadyExists` if it is there.
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Absolute location of `path`, for messages.
    fn display_path(&self, path: &Path) -> PathBuf;
}

/// Real filesystem rooted at a directory.
#[derive(Debug, Clone)]
pub struct LocalFs {
    root: PathBuf,
}

impl LocalFs {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl FileSink for LocalFs {
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write + '_>> {
        Ok(Box::new(File::create(self.root.join(path))?))
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        let mut builder = fs::DirBuilder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o755);
        }
        builder.create(self.root.join(path))
    }

    fn display_path(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

/// In-memory filesystem. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: Arc<Mutex<BTreeMap<PathBuf, Vec<u8>>>>,
    dirs: Arc<Mutex<Vec<PathBuf>>>,
    read_only: bool,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that refuses every create, for exercising failure paths.
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    pub fn file(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.files.lock().get(path.as_ref()).cloned()
    }

    pub fn file_names(&self) -> Vec<PathBuf> {
        self.files.lock().keys().cloned().collect()
    }

    pub fn has_dir(&self, path: impl AsRef<Path>) -> bool {
        self.dirs.lock().iter().any(|d| d == path.as_ref())
    }

    fn denied(&self) -> io::Result<()> {
        if self.read_only {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "read-only filesystem",
            ));
        }
        Ok(())
    }
}

struct MemoryFile {
    files: Arc<Mutex<BTreeMap<PathBuf, Vec<u8>>>>,
    path: PathBuf,
}

impl Write for MemoryFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.files
            .lock()
            .entry(self.path.clone())
            .or_default()
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl FileSink for MemoryFs {
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write + '_>> {
        self.denied()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !self.has_dir(parent) {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no such directory: {}", parent.display()),
                ));
            }
        }
        self.files.lock().insert(path.to_path_buf(), Vec::new());
        Ok(Box::new(MemoryFile {
            files: Arc::clone(&self.files),
            path: path.to_path_buf(),
        }))
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        self.denied()?;
        let mut dirs = self.dirs.lock();
        if dirs.iter().any(|d| d == path) {
            return Err(io::Error::from(io::ErrorKind::AlreadyExists));
        }
        dirs.push(path.to_path_buf());
        Ok(())
    }

    fn display_path(&self, path: &Path) -> PathBuf {
        path.to_path_buf()
    }
}

/// Write one file in full, mapping any failure to [`ScaffoldError::FileSystem`].
pub fn write_file(sink: &dyn FileSink, path: &Path, contents: &[u8]) -> Result<(), ScaffoldError> {
    let mut out = sink
        .create(path)
        .map_err(|e| ScaffoldError::file_system(sink.display_path(path), e))?;
    out.write_all(contents)
        .and_then(|_| out.flush())
        .map_err(|e| ScaffoldError::file_system(sink.display_path(path), e))?;
    debug!("wrote {} ({} bytes)", path.display(), contents.len());
    Ok(())
}

/// Write `main.c`, `Makefile`, `sokol.html` and `style.css` for `backend`.
///
/// Stops at the first failure. Files already written stay on disk.
pub fn write_scaffold(sink: &dyn FileSink, backend: Backend) -> Result<Vec<PathBuf>, ScaffoldError> {
    let mut written = Vec::new();
    for file in templates::render_all(backend) {
        let path = Path::new(file.path);
        write_file(sink, path, file.contents.as_bytes())?;
        written.push(sink.display_path(path));
    }
    Ok(written)
}
