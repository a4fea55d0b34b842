use std::path::PathBuf;

use thiserror::Error;

/// Syntax error found while parsing a document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (line {line}, column {column})")]
pub struct XmlError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML syntax error: {0}")]
    Xml(#[from] XmlError),

    #[error("{}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Settings error: {0}")]
    Settings(String),
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_xml_error_display() {
        let err = AppError::from(XmlError {
            message: "unclosed tag: b".to_string(),
            line: 3,
            column: 7,
        });
        assert_eq!(err.to_string(), "XML syntax error: unclosed tag: b (line 3, column 7)");
    }

    #[test]
    fn test_read_error_names_path() {
        let err = AppError::Read {
            path: PathBuf::from("/tmp/missing.xml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "/tmp/missing.xml: not found");
    }

    #[test]
    fn test_settings_error_display() {
        let err = AppError::Settings("bad interval".to_string());
        assert_eq!(err.to_string(), "Settings error: bad interval");
    }
}
