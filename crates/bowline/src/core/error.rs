//! Error types for diagram processing
//!
//! Layout and drawing cannot fail at runtime; the only failure surface is
//! parse-time syntax rejection (plus IO at the edges of the system).

use thiserror::Error;

/// Errors produced while turning diagram text into a rendering.
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Parse error: {message} at line {line}")]
    ParseError { message: String, line: usize },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create a new parse error.
    pub fn parse_error(message: impl Into<String>, line: usize) -> Self {
        Self::ParseError {
            message: message.into(),
            line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let error = DiagramError::parse_error("unexpected token", 3);
        let message = format!("{}", error);
        assert!(message.contains("Parse error"));
        assert!(message.contains("unexpected token"));
        assert!(message.contains("line 3"));
    }

    #[test]
    fn test_io_error_conversion() {
        use std::io;
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing file");
        let error: DiagramError = io_err.into();
        assert!(format!("{}", error).contains("missing file"));
    }
}
