use std::io;
use std::sync::Arc;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SeqError>;

/// Errors surfaced by the readers, writers and exporters.
///
/// `Clone` so that a stream of `Result<Record>` can be fanned out with
/// [`tee`](crate::seqio::tee).
#[derive(Debug, Clone, Error)]
pub enum SeqError {
    #[error("I/O error: {0}")]
    Io(Arc<io::Error>),

    #[error("{stream} is corrupted at line {line}: {message}")]
    Format {
        stream: String,
        line: usize,
        message: String,
    },

    #[error("export error: {0}")]
    Export(String),
}

impl SeqError {
    pub(crate) fn format(stream: &str, line: usize, message: impl Into<String>) -> Self {
        SeqError::Format {
            stream: stream.to_string(),
            line,
            message: message.into(),
        }
    }

    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            SeqError::Io(err) => Some(err.kind()),
            _ => None,
        }
    }
}

impl From<io::Error> for SeqError {
    fn from(value: io::Error) -> Self {
        SeqError::Io(Arc::new(value))
    }
}
