//! Compressed and plain byte streams (the DataSource abstraction)
//!
//! Inputs are opened through [`DataSource`] and wrapped in a
//! [`CompressedReader`], which transparently decodes gzip (including
//! multi-member/bgzip files). Outputs go through [`CompressedWriter`], which
//! writes plain text or gzip depending on the caller's [`OutputCompression`].
//!
//! Large plain files (≥ [`MMAP_THRESHOLD`]) are memory-mapped instead of read
//! through a `BufReader`.

use crate::error::{Result, SeqframeError};
use crate::io::DataSink;
use flate2::bufread::MultiGzDecoder;
use flate2::write::GzEncoder;
use memmap2::Mmap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Memory-mapped file threshold (50 MB)
///
/// Below this size a buffered `File` is faster than setting up a mapping.
pub const MMAP_THRESHOLD: u64 = 50 * 1024 * 1024;

/// Gzip magic bytes (RFC 1952)
const GZIP_MAGIC: [u8; 2] = [31, 139];

/// File suffixes treated as gzip when compression is [`Compression::Auto`]
const GZIP_EXTENSIONS: [&str; 3] = ["gz", "gzip", "bgz"];

/// Input compression setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Gzip if the path has a gzip suffix or the stream starts with the gzip magic
    #[default]
    Auto,
    /// Always decode as gzip
    Gzip,
    /// Never decode
    Plain,
}

impl Compression {
    /// Whether `path` carries a gzip suffix (`.gz`, `.gzip`, `.bgz`)
    pub fn has_gzip_suffix<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| GZIP_EXTENSIONS.contains(&ext))
    }
}

/// Output compression setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputCompression {
    /// Gzip at the given level (0-9)
    Gzip(u32),
    /// Uncompressed text
    Plain,
}

impl Default for OutputCompression {
    /// Gzip at level 6, the flate2 default
    fn default() -> Self {
        OutputCompression::Gzip(6)
    }
}

/// Data source for record input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Local file path
    Local(PathBuf),
}

impl DataSource {
    /// Create a local file data source
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        DataSource::Local(path.as_ref().to_path_buf())
    }

    /// Path of the underlying file
    pub fn path(&self) -> &Path {
        match self {
            DataSource::Local(path) => path,
        }
    }

    /// Open the data source and return a buffered reader over its raw bytes
    ///
    /// # Errors
    ///
    /// [`SeqframeError::NotFound`] if the file does not exist.
    pub fn open(&self) -> Result<Box<dyn BufRead + Send>> {
        match self {
            DataSource::Local(path) => open_local_file(path),
        }
    }
}

/// Open a local file, memory-mapping it when it is large
fn open_local_file(path: &Path) -> Result<Box<dyn BufRead + Send>> {
    open_with_threshold(path, MMAP_THRESHOLD)
}

/// Open a local file, memory-mapping it when its size is at least `threshold`
pub(crate) fn open_with_threshold(path: &Path, threshold: u64) -> Result<Box<dyn BufRead + Send>> {
    let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => SeqframeError::NotFound {
            path: path.to_path_buf(),
        },
        _ => SeqframeError::Io(e),
    })?;

    if metadata.len() >= threshold {
        log::debug!("Memory-mapping {} ({} bytes)", path.display(), metadata.len());
        open_mmap_file(path)
    } else {
        let file = File::open(path)?;
        Ok(Box::new(BufReader::new(file)))
    }
}

fn open_mmap_file(path: &Path) -> Result<Box<dyn BufRead + Send>> {
    let file = File::open(path)?;
    // SAFETY: the mapping is read-only and lives as long as the reader; a
    // concurrent truncation by another process is outside our control, as
    // with any mmap-based reader.
    let mmap = unsafe { Mmap::map(&file)? };
    Ok(Box::new(io::Cursor::new(mmap)))
}

/// Buffered reader that decodes gzip when required
///
/// # Example
///
/// ```no_run
/// use seqframe::io::{CompressedReader, Compression, DataSource};
/// use std::io::BufRead;
///
/// # fn main() -> seqframe::Result<()> {
/// let reader = CompressedReader::new(DataSource::from_path("reads.fq.gz"), Compression::Auto)?;
/// for line in reader.lines() {
///     println!("{}", line?);
/// }
/// # Ok(())
/// # }
/// ```
pub struct CompressedReader {
    inner: Box<dyn BufRead + Send>,
}

impl CompressedReader {
    /// Open `source` and decode it according to `compression`
    pub fn new(source: DataSource, compression: Compression) -> Result<Self> {
        let suffix = Compression::has_gzip_suffix(source.path());
        let reader = source.open()?;
        Self::from_reader(reader, compression, suffix)
            .map_err(|e| SeqframeError::from_read(e, source.path(), 0))
    }

    /// Wrap an already opened reader
    ///
    /// `gzip_suffix` tells [`Compression::Auto`] whether the origin had a gzip
    /// file name; the stream's magic bytes are checked as well. An empty
    /// stream is read as plain under `Auto`, so it yields no lines.
    pub fn from_reader<R>(
        mut reader: R,
        compression: Compression,
        gzip_suffix: bool,
    ) -> io::Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let is_gzipped = match compression {
            Compression::Gzip => true,
            Compression::Plain => false,
            Compression::Auto => sniff_gzip(&mut reader, gzip_suffix)?,
        };

        log::debug!("Opening input stream (gzip={})", is_gzipped);

        if is_gzipped {
            let decoder = MultiGzDecoder::new(reader);
            Ok(Self {
                inner: Box::new(BufReader::new(decoder)),
            })
        } else {
            Ok(Self {
                inner: Box::new(reader),
            })
        }
    }

}

/// Gzip if the stream starts with the magic bytes, or is non-empty and came
/// from a gzip-suffixed path
fn sniff_gzip<R: BufRead>(reader: &mut R, gzip_suffix: bool) -> io::Result<bool> {
    let peeked = reader.fill_buf()?;
    if peeked.is_empty() {
        return Ok(false);
    }
    Ok(gzip_suffix || (peeked.len() >= 2 && peeked[..2] == GZIP_MAGIC))
}

impl Read for CompressedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl BufRead for CompressedReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt)
    }
}

/// Writer for plain or gzip-compressed output
///
/// Always call [`CompressedWriter::finish`]: dropping a gzip writer only
/// flushes on a best-effort basis and cannot report errors.
pub enum CompressedWriter {
    /// Uncompressed writer with buffering
    Plain(Option<BufWriter<Box<dyn Write>>>),

    /// Gzip compressed writer
    Gzip(Option<GzEncoder<BufWriter<Box<dyn Write>>>>),
}

impl CompressedWriter {
    /// Create a writer for `sink`
    ///
    /// Compression follows `compression`, never the file extension.
    pub fn new(sink: DataSink, compression: OutputCompression) -> io::Result<Self> {
        let writer: Box<dyn Write> = match sink {
            DataSink::Local(path) => Box::new(File::create(path)?),
            DataSink::Stdout => Box::new(io::stdout()),
        };

        match compression {
            OutputCompression::Gzip(level) => Self::new_gzip(writer, level),
            OutputCompression::Plain => Self::new_plain(writer),
        }
    }

    /// Create a plain (uncompressed) writer
    pub fn new_plain(writer: Box<dyn Write>) -> io::Result<Self> {
        Ok(Self::Plain(Some(BufWriter::new(writer))))
    }

    /// Create a gzip writer at `level` (clamped to 0-9)
    pub fn new_gzip(writer: Box<dyn Write>, level: u32) -> io::Result<Self> {
        let level = flate2::Compression::new(level.min(9));
        let encoder = GzEncoder::new(BufWriter::new(writer), level);
        Ok(Self::Gzip(Some(encoder)))
    }

    /// Finish writing and consume the writer
    ///
    /// Flushes buffered data and, for gzip, writes the stream trailer.
    pub fn finish(mut self) -> io::Result<()> {
        match &mut self {
            Self::Plain(w) => match w.take() {
                Some(mut writer) => writer.flush(),
                None => Ok(()),
            },
            Self::Gzip(w) => match w.take() {
                Some(encoder) => {
                    let mut inner = encoder.finish()?;
                    inner.flush()
                }
                None => Ok(()),
            },
        }
    }
}

impl Write for CompressedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(Some(w)) => w.write(buf),
            Self::Gzip(Some(w)) => w.write(buf),
            _ => Err(io::Error::new(
                io::ErrorKind::Other,
                "Cannot write to finished writer",
            )),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(Some(w)) => w.flush(),
            Self::Gzip(Some(w)) => w.flush(),
            _ => Ok(()),
        }
    }
}

impl Drop for CompressedWriter {
    fn drop(&mut self) {
        // Best-effort; finish() reports errors
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{frame, LineReader};
    use crate::types::RecordFormat;
    use std::fs;
    use tempfile::TempDir;

    fn gzip_bytes(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    fn from_bytes(data: Vec<u8>, compression: Compression, gzip_suffix: bool) -> CompressedReader {
        CompressedReader::from_reader(io::Cursor::new(data), compression, gzip_suffix).unwrap()
    }

    fn read_all(mut reader: CompressedReader) -> String {
        let mut out = String::new();
        reader.read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn test_gzip_suffix_detection() {
        assert!(Compression::has_gzip_suffix("reads.fq.gz"));
        assert!(Compression::has_gzip_suffix("reads.fq.bgz"));
        assert!(!Compression::has_gzip_suffix("reads.fq"));
        assert!(!Compression::has_gzip_suffix("gz"));
    }

    #[test]
    fn test_auto_sniffs_magic_bytes() {
        let data = gzip_bytes(b"@r1\nACGT\n+\nIIII\n");
        let reader = from_bytes(data, Compression::Auto, false);
        assert_eq!(read_all(reader), "@r1\nACGT\n+\nIIII\n");
    }

    #[test]
    fn test_plain_passthrough() {
        let reader = from_bytes(b">a\nAC\n".to_vec(), Compression::Auto, false);
        assert_eq!(read_all(reader), ">a\nAC\n");
    }

    #[test]
    fn test_empty_stream_with_gzip_suffix() {
        let reader = from_bytes(Vec::new(), Compression::Auto, true);
        assert_eq!(read_all(reader), "");
    }

    #[test]
    fn test_non_empty_stream_with_gzip_suffix_is_decoded() {
        let mut reader = from_bytes(b"not gzip\n".to_vec(), Compression::Auto, true);
        let mut out = String::new();
        assert!(reader.read_to_string(&mut out).is_err());
    }

    #[test]
    fn test_multi_member_gzip() {
        let mut data = gzip_bytes(b"@r1\nA\n+\nI\n");
        data.extend(gzip_bytes(b"@r2\nC\n+\nI\n"));

        let reader = from_bytes(data, Compression::Gzip, false);
        assert_eq!(read_all(reader), "@r1\nA\n+\nI\n@r2\nC\n+\nI\n");
    }

    #[test]
    fn test_forced_gzip_on_plain_data_fails() {
        let mut reader = from_bytes(b"@r1\nACGT\n".to_vec(), Compression::Gzip, false);
        let mut out = String::new();
        assert!(reader.read_to_string(&mut out).is_err());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let source = DataSource::from_path("/definitely/not/here.fq");
        let result = CompressedReader::new(source, Compression::Auto);
        assert!(matches!(result, Err(SeqframeError::NotFound { .. })));

        let result = open_with_threshold(Path::new("/definitely/not/here.fq"), 0);
        assert!(matches!(result, Err(SeqframeError::NotFound { .. })));
    }

    #[test]
    fn test_mmap_branch_frames_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reads.fq");
        fs::write(&path, "@r1\nACGT\n+\nIIII\n@r2\nGG\n+\n!!\n").unwrap();

        // threshold 0 forces the memory-mapped reader for any non-empty file
        let raw = open_with_threshold(&path, 0).unwrap();
        let reader = CompressedReader::from_reader(raw, Compression::Auto, false).unwrap();
        let table = frame(LineReader::from_reader(reader), RecordFormat::Fastq).unwrap();

        assert_eq!(table.record_count(), 2);
        assert_eq!(table.text_column("Seq").unwrap(), &["ACGT", "GG"]);
        assert_eq!(table.text_column("Qual").unwrap(), &["IIII", "!!"]);
    }

    #[test]
    fn test_mmap_branch_decodes_gzip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reads.fa.gz");
        fs::write(&path, gzip_bytes(b">a\nAC\n")).unwrap();

        let raw = open_with_threshold(&path, 1).unwrap();
        let reader = CompressedReader::from_reader(raw, Compression::Auto, true).unwrap();
        assert_eq!(read_all(reader), ">a\nAC\n");
    }

    #[test]
    fn test_writer_round_trip() {
        let dir = TempDir::new().unwrap();
        let outputs = [
            ("out.txt", OutputCompression::Plain),
            ("out.gz", OutputCompression::Gzip(6)),
        ];

        for (name, compression) in outputs {
            let path = dir.path().join(name);
            let sink = DataSink::from_path(&path);
            let mut writer = CompressedWriter::new(sink, compression).unwrap();
            writer.write_all(b"line 1\nline 2\n").unwrap();
            writer.finish().unwrap();

            let source = DataSource::from_path(&path);
            let reader = CompressedReader::new(source, Compression::Auto).unwrap();
            assert_eq!(read_all(reader), "line 1\nline 2\n");
        }
    }

    #[test]
    fn test_gzip_output_ignores_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no_suffix.fq");
        let sink = DataSink::from_path(&path);

        let mut writer = CompressedWriter::new(sink, OutputCompression::default()).unwrap();
        writer.write_all(b"@r1\n").unwrap();
        writer.finish().unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], &GZIP_MAGIC);
    }
}
