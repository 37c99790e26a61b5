use std::path::PathBuf;

/// Errors from conversation file operations.
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    /// The file does not exist
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but is not a valid conversation record
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Any other read/write failure
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serializing interactions failed
    #[error("failed to serialize conversation: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl MemoryError {
    pub(crate) fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            MemoryError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            MemoryError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Result type for memory file operations.
pub type MemoryResult<T> = Result<T, MemoryError>;
