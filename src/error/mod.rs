use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Input could not be interpreted as an image
    #[error("Failed to decode `{}`: {message}", path.display())]
    Decode { path: PathBuf, message: String },

    /// Zero-area image reached the mip builder
    #[error("Invalid image dimensions {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Existing archive or lump bytes are malformed
    #[error("{0}")]
    Parse(String),

    /// Failure while processing one input of a run
    #[error("Failed to process `{}`", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn decode(path: impl Into<PathBuf>, err: impl ToString) -> Self {
        Error::Decode {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub(crate) fn for_input(self, path: impl Into<PathBuf>) -> Self {
        match self {
            err @ Error::Input { .. } => err,
            err => Error::Input {
                path: path.into(),
                source: Box::new(err),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
