//! Output destinations for table serialization
//!
//! `DataSink` is the write counterpart to [`DataSource`](crate::io::DataSource).
//! Unlike the source side, a sink never infers compression from its path;
//! writers take an explicit [`OutputCompression`](crate::io::OutputCompression).
//!
//! # Example
//!
//! ```
//! use seqframe::io::DataSink;
//!
//! let sink = DataSink::from_path("cleaned_R1.fastq.gz");
//! assert!(sink.path().is_some());
//!
//! let sink = DataSink::stdout();
//! assert!(sink.path().is_none());
//! ```

use std::path::{Path, PathBuf};

/// Output destination for writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSink {
    /// Write to a local file path (created or truncated)
    Local(PathBuf),

    /// Write to standard output
    Stdout,
}

impl DataSink {
    /// Create a sink from a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self::Local(path.as_ref().to_path_buf())
    }

    /// Create a sink for standard output
    pub fn stdout() -> Self {
        Self::Stdout
    }

    /// File path, if this is a local sink
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Local(path) => Some(path),
            Self::Stdout => None,
        }
    }
}

impl std::fmt::Display for DataSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{}", path.display()),
            Self::Stdout => f.write_str("<stdout>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        let sink = DataSink::from_path("test.fq");
        match sink {
            DataSink::Local(path) => {
                assert_eq!(path, PathBuf::from("test.fq"));
            }
            _ => panic!("Expected Local variant"),
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(DataSink::from_path("out.fa").to_string(), "out.fa");
        assert_eq!(DataSink::stdout().to_string(), "<stdout>");
    }
}
