//! Errors raised while loading a dictionary.

use std::path::PathBuf;

/// Loading a dictionary failed. The network search itself cannot fail.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DictionaryError {
    /// The file could not be opened, inspected or mapped
    #[error("Could not read dictionary {}", .path.display())]
    Io {
        /// Path of the dictionary
        path: PathBuf,
        /// Underlying failure
        source: std::io::Error,
    },

    /// The file is not UTF-8 text
    #[error("Dictionary {} is not valid UTF-8", .path.display())]
    Encoding {
        /// Path of the dictionary
        path: PathBuf,
        /// Position of the first invalid byte
        source: std::str::Utf8Error,
    },

    /// Reading from a stream failed
    #[error("Could not read dictionary stream")]
    Stream(#[from] std::io::Error),
}
