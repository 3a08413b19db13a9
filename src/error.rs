//! Error types for seqframe

use crate::types::RecordFormat;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for seqframe operations
pub type Result<T> = std::result::Result<T, SeqframeError>;

/// Error types that can occur in seqframe
#[derive(Debug, Error)]
pub enum SeqframeError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input or mate file does not exist
    #[error("File not found: {}", path.display())]
    NotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Malformed compressed stream or invalid text encoding
    #[error("Cannot decode {} at line {line}: {msg}", path.display())]
    Decode {
        /// File being decoded
        path: PathBuf,
        /// Last line that was read successfully plus one
        line: usize,
        /// Underlying decoder message
        msg: String,
    },

    /// Line count is not a multiple of the record arity
    #[error("Malformed {format} input: {line_count} lines is not a multiple of {arity}")]
    MalformedInput {
        /// Format the lines were framed as
        format: RecordFormat,
        /// Total number of lines seen
        line_count: usize,
        /// Lines per record for `format`
        arity: usize,
    },

    /// Paired streams have different record counts
    #[error("Mate files have different record counts: forward={forward}, reverse={reverse}")]
    MateCountMismatch {
        /// Records in the forward (R1) stream
        forward: usize,
        /// Records in the reverse (R2) stream
        reverse: usize,
    },

    /// Column length differs from the table's record count
    #[error("Column '{column}' has {actual} values, table has {expected} records")]
    LengthMismatch {
        /// Column being added
        column: String,
        /// Table record count
        expected: usize,
        /// Number of values supplied
        actual: usize,
    },

    /// Column name already present in the table
    #[error("Column '{0}' already exists")]
    DuplicateColumn(String),

    /// Column name not present in the table
    #[error("Column '{0}' does not exist")]
    MissingColumn(String),

    /// Column holds the wrong kind of values for the requested operation
    #[error("Column '{column}' is not a {expected} column")]
    ColumnType {
        /// Column name
        column: String,
        /// Expected kind ("text" or "numeric")
        expected: &'static str,
    },

    /// Quality character outside the supported Phred+33 range
    #[error("Unknown quality symbol {symbol:?} at position {position}")]
    UnknownSymbol {
        /// Offending character
        symbol: char,
        /// Character position in the quality string
        position: usize,
    },

    /// Table schema does not match the target record format
    #[error("Schema mismatch: expected columns starting with {expected:?}, found {found:?}")]
    SchemaMismatch {
        /// Leading columns required by the target format
        expected: Vec<String>,
        /// Actual table schema
        found: Vec<String>,
    },
}

impl SeqframeError {
    /// Classify an I/O error raised while reading `path`
    ///
    /// Decoder failures from flate2 and invalid UTF-8 from `read_line` surface
    /// as `InvalidData`/`InvalidInput`/`UnexpectedEof`; those become `Decode`.
    pub(crate) fn from_read(err: std::io::Error, path: &std::path::Path, line: usize) -> Self {
        use std::io::ErrorKind;

        match err.kind() {
            ErrorKind::NotFound => SeqframeError::NotFound {
                path: path.to_path_buf(),
            },
            ErrorKind::InvalidData | ErrorKind::InvalidInput | ErrorKind::UnexpectedEof => {
                SeqframeError::Decode {
                    path: path.to_path_buf(),
                    line,
                    msg: err.to_string(),
                }
            }
            _ => SeqframeError::Io(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::Path;

    #[test]
    fn test_read_error_classification() {
        let path = Path::new("reads.fq.gz");

        let header = io::Error::new(io::ErrorKind::InvalidInput, "invalid gzip header");
        let err = SeqframeError::from_read(header, path, 1);
        assert!(matches!(err, SeqframeError::Decode { line: 1, .. }));

        let gone = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err = SeqframeError::from_read(gone, path, 0);
        assert!(matches!(err, SeqframeError::NotFound { .. }));

        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = SeqframeError::from_read(denied, path, 0);
        assert!(matches!(err, SeqframeError::Io(_)));
    }

    #[test]
    fn test_malformed_message() {
        let err = SeqframeError::MalformedInput {
            format: RecordFormat::Fastq,
            line_count: 7,
            arity: 4,
        };
        assert_eq!(err.to_string(), "Malformed FASTQ input: 7 lines is not a multiple of 4");
    }
}
