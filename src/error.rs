use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by a single paste invocation
#[derive(Debug, Error)]
pub enum PasteError {
    /// Format selection was asked to choose from an empty offer list
    #[error("clipboard offers no image formats")]
    NoImageOffered,

    /// The chosen offer cannot be used as a request tag or file extension
    #[error("clipboard offered a malformed image type: {0:?}")]
    MalformedOffer(String),

    /// The clipboard utility failed while streaming image bytes
    #[error("failed to retrieve {mime} from the clipboard: {source}")]
    Retrieval {
        mime: String,
        #[source]
        source: anyhow::Error,
    },

    /// Filesystem failure on the target directory or destination file
    #[error("{path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PasteError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PasteError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type PasteResult<T> = std::result::Result<T, PasteError>;
