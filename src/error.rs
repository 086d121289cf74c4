use std::fmt;
use std::io;
use std::path::PathBuf;

/// Everything that can go wrong while scaffolding a project.
#[derive(Debug)]
pub enum ScaffoldError {
    /// The backend choice could not be read or is not one of the menu entries.
    Input(String),
    /// A generated or downloaded file could not be created or written.
    FileSystem { path: PathBuf, source: io::Error },
    /// The header directory could not be created.
    Directory { path: PathBuf, source: io::Error },
    /// The remote answered with something other than 200 OK.
    RemoteStatus { url: String, status: String },
    /// The request never produced a response (DNS, connect, TLS, ...).
    Request { url: String, message: String },
}

impl ScaffoldError {
    /// Process exit status for this failure class.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Input(_) => 2,
            Self::FileSystem { .. } => 3,
            Self::Directory { .. } => 4,
            Self::RemoteStatus { .. } | Self::Request { .. } => 5,
        }
    }

    pub(crate) fn file_system(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for ScaffoldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(msg) => write!(f, "invalid input: {msg}"),
            Self::FileSystem { path, source } => {
                write!(f, "cannot write {}: {source}", path.display())
            }
            Self::Directory { path, source } => {
                write!(f, "cannot create directory {}: {source}", path.display())
            }
            Self::RemoteStatus { url, status } => {
                write!(f, "failed to download {url}: {status}")
            }
            Self::Request { url, message } => write!(f, "request to {url} failed: {message}"),
        }
    }
}

impl std::error::Error for ScaffoldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } | Self::Directory { source, .. } => Some(source),
            _ => None,
        }
    }
}
