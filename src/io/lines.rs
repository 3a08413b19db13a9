//! Streaming line reader over plain or gzip input
//!
//! Yields every line of the input in order, with the terminator (`\n` or
//! `\r\n`) removed. The serializer appends exactly one `\n` per line, so
//! reading and writing are symmetric up to line-ending normalization.

use crate::error::{Result, SeqframeError};
use crate::io::compression::{CompressedReader, Compression, DataSource};
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Origin reported in errors for readers not opened from a path
const STREAM_ORIGIN: &str = "<stream>";

/// Iterator over the raw lines of one input
///
/// # Example
///
/// ```no_run
/// use seqframe::io::LineReader;
///
/// # fn main() -> seqframe::Result<()> {
/// let lines = LineReader::from_path("reads.fq.gz")?;
/// let count = lines.collect::<seqframe::Result<Vec<_>>>()?.len();
/// println!("{} lines", count);
/// # Ok(())
/// # }
/// ```
pub struct LineReader<R: BufRead> {
    reader: R,
    origin: PathBuf,
    line_number: usize,
    finished: bool,
}

impl LineReader<CompressedReader> {
    /// Open `source`, decoding per `compression`
    ///
    /// # Errors
    ///
    /// [`SeqframeError::NotFound`] for a missing file; decode failures show up
    /// as [`SeqframeError::Decode`] items while iterating.
    pub fn new(source: DataSource, compression: Compression) -> Result<Self> {
        let origin = source.path().to_path_buf();
        let reader = CompressedReader::new(source, compression)?;
        Ok(Self::with_origin(reader, origin))
    }

    /// Open a file path with compression inferred from its suffix and content
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(DataSource::from_path(path), Compression::Auto)
    }
}

impl<R: BufRead> LineReader<R> {
    /// Read lines from an already opened reader
    pub fn from_reader(reader: R) -> Self {
        Self::with_origin(reader, PathBuf::from(STREAM_ORIGIN))
    }

    fn with_origin(reader: R, origin: PathBuf) -> Self {
        Self {
            reader,
            origin,
            line_number: 0,
            finished: false,
        }
    }

    /// Number of lines yielded so far
    pub fn lines_read(&self) -> usize {
        self.line_number
    }

    /// Path (or `<stream>`) the lines come from
    pub fn origin(&self) -> &Path {
        &self.origin
    }
}

fn strip_terminator(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => {
                self.finished = true;
                None
            }
            Ok(_) => {
                strip_terminator(&mut line);
                self.line_number += 1;
                Some(Ok(line))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(SeqframeError::from_read(e, &self.origin, self.line_number + 1)))
            }
        }
    }
}
