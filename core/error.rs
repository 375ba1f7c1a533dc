use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AppError {
    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output Open Error: Path '{path}', Error: {source}")]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File Read Error: Path '{path}', Error: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File Decode Error: Path '{path}' is not valid UTF-8 text: {source}")]
    FileDecode {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("File Write Error: Path '{path}', Error: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Glob Pattern Error: {0}")]
    Glob(String),
}

impl AppError {
    /// Per-file failures that the merge reports and skips instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AppError::FileRead { .. } | AppError::FileDecode { .. })
    }
}

impl From<globset::Error> for AppError {
    fn from(err: globset::Error) -> Self {
        AppError::Glob(format!("Globset error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_per_file_read_failures_are_recoverable() {
        let read = AppError::FileRead {
            path: PathBuf::from("a.ts"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let decode = AppError::FileDecode {
            path: PathBuf::from("b.ts"),
            source: String::from_utf8(vec![0xff]).unwrap_err(),
        };
        let open = AppError::OutputOpen {
            path: PathBuf::from("out.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(read.is_recoverable());
        assert!(decode.is_recoverable());
        assert!(!open.is_recoverable());
        assert!(!AppError::Glob("bad".to_string()).is_recoverable());
    }
}
