//! File loading: lines -> records -> table
//!
//! [`load`] chains the streaming stages for one file, or for an R1/R2 pair:
//!
//! ```text
//! LineReader(R1) -> RecordFramer --\
//!                                   MateInterleaver -> RecordTable
//! LineReader(R2) -> RecordFramer --/
//! ```
//!
//! Any error from a stage aborts the load; no partial table is returned.
//! A mate that automatic discovery cannot find is not an error: the file is
//! loaded alone and a [`LoadWarning`] is attached to the result.

use crate::error::Result;
use crate::io::compression::{CompressedReader, Compression, DataSource};
use crate::io::framer::RecordFramer;
use crate::io::lines::LineReader;
use crate::io::mate::{discover_mate, MateLookup};
use crate::io::paired::MateInterleaver;
use crate::table::RecordTable;
use crate::types::RecordFormat;
use std::fmt;
use std::path::{Path, PathBuf};

/// How a mate file is chosen for paired-end input
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Pairing {
    /// Load the file alone
    #[default]
    None,
    /// Look for an `_R2_` mate next to an `_R1_` file (FASTQ only)
    Auto,
    /// Interleave with this mate file
    Mate(PathBuf),
}

/// Options for [`load`]
///
/// # Example
///
/// ```
/// use seqframe::io::{Compression, LoadOptions, Pairing};
///
/// let options = LoadOptions::fastq()
///     .with_compression(Compression::Gzip)
///     .with_pairing(Pairing::None);
/// assert_eq!(options.pairing, Pairing::None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Record layout of the input
    pub format: RecordFormat,
    /// Input decoding
    pub compression: Compression,
    /// Mate selection
    pub pairing: Pairing,
}

impl LoadOptions {
    /// FASTQ with automatic compression and automatic mate discovery
    pub fn fastq() -> Self {
        Self {
            format: RecordFormat::Fastq,
            compression: Compression::Auto,
            pairing: Pairing::Auto,
        }
    }

    /// FASTA with automatic compression, unpaired
    pub fn fasta() -> Self {
        Self {
            format: RecordFormat::Fasta,
            compression: Compression::Auto,
            pairing: Pairing::None,
        }
    }

    /// Set the input compression
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Set the mate selection
    pub fn with_pairing(mut self, pairing: Pairing) -> Self {
        self.pairing = pairing;
        self
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self::fastq()
    }
}

/// Recoverable condition met while loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// The derived mate file does not exist; loaded single-ended
    MateNotFound {
        /// Mate path that was looked for
        expected: PathBuf,
    },
    /// The file name has no `_R1_` token; loaded single-ended
    NoMateToken {
        /// File that was loaded
        path: PathBuf,
    },
    /// The directory could not be listed to look for a mate; loaded single-ended
    DiscoveryFailed {
        /// File whose mate was looked for
        path: PathBuf,
        /// Error raised by the directory scan
        reason: String,
    },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadWarning::MateNotFound { expected } => write!(
                f,
                "mate file {} not found, loading single-ended",
                expected.display()
            ),
            LoadWarning::NoMateToken { path } => write!(
                f,
                "no _R1_ token in {}, loading single-ended",
                path.display()
            ),
            LoadWarning::DiscoveryFailed { path, reason } => write!(
                f,
                "cannot look for the mate of {} ({}), loading single-ended",
                path.display(),
                reason
            ),
        }
    }
}

/// A loaded file (or interleaved pair) and what is known about it
#[derive(Debug, Clone)]
pub struct SequenceFile {
    /// Primary (R1) input path
    pub path: PathBuf,
    /// Mate path, if records were interleaved with one
    pub mate: Option<PathBuf>,
    /// Short sample name, see [`sample_name`]
    pub sample: String,
    /// Loaded records
    pub table: RecordTable,
    /// Recoverable conditions met while loading
    pub warnings: Vec<LoadWarning>,
}

impl SequenceFile {
    /// Whether records from a mate file were interleaved
    pub fn is_paired(&self) -> bool {
        self.mate.is_some()
    }

    /// Number of records in the table
    pub fn record_count(&self) -> usize {
        self.table.record_count()
    }
}

/// Sample name from the first two `_`-separated tokens of the file name
///
/// ```
/// use seqframe::io::sample_name;
///
/// assert_eq!(sample_name("runs/S1_L001_R1_001.fastq.gz"), "S1_L001");
/// assert_eq!(sample_name("reads.fastq"), "reads.fastq");
/// ```
pub fn sample_name<P: AsRef<Path>>(path: P) -> String {
    let file_name = path
        .as_ref()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    file_name.splitn(3, '_').take(2).collect::<Vec<_>>().join("_")
}

fn open_records(
    path: &Path,
    options: &LoadOptions,
) -> Result<RecordFramer<LineReader<CompressedReader>>> {
    let lines = LineReader::new(DataSource::from_path(path), options.compression)?;
    Ok(RecordFramer::new(lines, options.format))
}

/// Resolve the mate to use, collecting a warning when discovery falls back
fn resolve_mate(
    path: &Path,
    options: &LoadOptions,
    warnings: &mut Vec<LoadWarning>,
) -> Result<Option<PathBuf>> {
    match &options.pairing {
        Pairing::None => Ok(None),
        Pairing::Mate(mate) => Ok(Some(mate.clone())),
        Pairing::Auto if options.format != RecordFormat::Fastq => Ok(None),
        Pairing::Auto => {
            let warning = match discover_mate(path) {
                Ok(MateLookup::Found(mate)) => return Ok(Some(mate)),
                Ok(MateLookup::Missing(expected)) => LoadWarning::MateNotFound { expected },
                Ok(MateLookup::NoToken) => LoadWarning::NoMateToken {
                    path: path.to_path_buf(),
                },
                Err(e) => LoadWarning::DiscoveryFailed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                },
            };
            log::warn!("{}", warning);
            warnings.push(warning);
            Ok(None)
        }
    }
}

/// Load a file into a [`RecordTable`], interleaving its mate if one is used
///
/// # Errors
///
/// - [`SeqframeError::NotFound`](crate::SeqframeError::NotFound) if the input
///   (or an explicit [`Pairing::Mate`]) does not exist
/// - [`SeqframeError::Decode`](crate::SeqframeError::Decode) for corrupt gzip
///   or non-UTF-8 text
/// - [`SeqframeError::MalformedInput`](crate::SeqframeError::MalformedInput)
///   if a file's line count is not a multiple of the arity
/// - [`SeqframeError::MateCountMismatch`](crate::SeqframeError::MateCountMismatch)
///   if the mates hold different numbers of records
///
/// # Example
///
/// ```no_run
/// use seqframe::io::{load, LoadOptions};
///
/// # fn main() -> seqframe::Result<()> {
/// let file = load("S1_L001_R1_001.fastq.gz", &LoadOptions::fastq())?;
/// println!("{}: {} records, paired={}", file.sample, file.record_count(), file.is_paired());
/// # Ok(())
/// # }
/// ```
pub fn load<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<SequenceFile> {
    let path = path.as_ref();
    let forward = open_records(path, options)?;

    let mut warnings = Vec::new();
    let mate = resolve_mate(path, options, &mut warnings)?;

    let mut table = RecordTable::new(options.format);

    match &mate {
        Some(mate_path) => {
            let reverse = open_records(mate_path, options)?;
            log::debug!("Interleaving {} with {}", path.display(), mate_path.display());
            for record in MateInterleaver::new(forward, reverse) {
                table.push_record(record?)?;
            }
        }
        None => {
            for record in forward {
                table.push_record(record?)?;
            }
        }
    }

    log::info!(
        "Loaded {} {} records from {}{}",
        table.record_count(),
        options.format,
        path.display(),
        if mate.is_some() { " (paired)" } else { "" }
    );

    Ok(SequenceFile {
        path: path.to_path_buf(),
        mate,
        sample: sample_name(path),
        table,
        warnings,
    })
}

/// Load FASTQ with default options (automatic mate discovery)
pub fn load_fastq<P: AsRef<Path>>(path: P) -> Result<SequenceFile> {
    load(path, &LoadOptions::fastq())
}

/// Load FASTA with default options
pub fn load_fasta<P: AsRef<Path>>(path: P) -> Result<SequenceFile> {
    load(path, &LoadOptions::fasta())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SeqframeError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_sample_name() {
        assert_eq!(sample_name("S1_L001_R1_001.fastq.gz"), "S1_L001");
        assert_eq!(sample_name("/data/run7/A_B"), "A_B");
        assert_eq!(sample_name("single_token.fq"), "single_token.fq");
        assert_eq!(sample_name("plain.fa"), "plain.fa");
    }

    #[test]
    fn test_load_options_defaults() {
        assert_eq!(LoadOptions::default(), LoadOptions::fastq());
        assert_eq!(LoadOptions::fastq().pairing, Pairing::Auto);
        assert_eq!(LoadOptions::fasta().pairing, Pairing::None);
    }

    #[test]
    fn test_load_fasta_single() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("genes.fa");
        fs::write(&path, ">g1\nATG\n>g2\nTTT\n").unwrap();

        let file = load_fasta(&path).unwrap();
        assert!(!file.is_paired());
        assert!(file.warnings.is_empty());
        assert_eq!(file.record_count(), 2);
        assert_eq!(file.sample, "genes.fa");
        assert_eq!(file.table.text_column("Seq").unwrap(), &["ATG", "TTT"]);
    }

    #[test]
    fn test_auto_pairing_interleaves() {
        let dir = TempDir::new().unwrap();
        let r1 = dir.path().join("S1_L001_R1_001.fastq");
        let r2 = dir.path().join("S1_L001_R2_001.fastq");
        fs::write(&r1, "@a/1\nAC\n+\nII\n@b/1\nGG\n+\nII\n").unwrap();
        fs::write(&r2, "@a/2\nGT\n+\nII\n@b/2\nCC\n+\nII\n").unwrap();

        let file = load_fastq(&r1).unwrap();
        assert!(file.is_paired());
        assert_eq!(file.mate.as_deref(), Some(r2.as_path()));
        assert_eq!(file.sample, "S1_L001");
        assert_eq!(
            file.table.text_column("Name").unwrap(),
            &["@a/1", "@a/2", "@b/1", "@b/2"]
        );
    }

    #[test]
    fn test_missing_mate_warns() {
        let dir = TempDir::new().unwrap();
        let r1 = dir.path().join("S1_R1_001.fq");
        fs::write(&r1, "@a\nAC\n+\nII\n").unwrap();

        let file = load_fastq(&r1).unwrap();
        assert!(!file.is_paired());
        assert_eq!(file.record_count(), 1);
        assert_eq!(
            file.warnings,
            vec![LoadWarning::MateNotFound {
                expected: dir.path().join("S1_R2_001.fq")
            }]
        );
    }

    #[test]
    fn test_no_token_warns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reads.fq");
        fs::write(&path, "@a\nAC\n+\nII\n").unwrap();

        let file = load_fastq(&path).unwrap();
        assert_eq!(file.warnings, vec![LoadWarning::NoMateToken { path: path.clone() }]);
        assert!(file.warnings[0].to_string().contains("single-ended"));
    }

    #[test]
    fn test_unlistable_directory_warns() {
        let dir = TempDir::new().unwrap();
        let not_a_dir = dir.path().join("plain_file");
        fs::write(&not_a_dir, "").unwrap();
        let path = not_a_dir.join("S1_R1_001.fq");

        let mut warnings = Vec::new();
        let mate = resolve_mate(&path, &LoadOptions::fastq(), &mut warnings).unwrap();

        assert_eq!(mate, None);
        match warnings.as_slice() {
            [LoadWarning::DiscoveryFailed { path: warned, reason }] => {
                assert_eq!(warned, &path);
                assert!(!reason.is_empty());
            }
            other => panic!("Expected DiscoveryFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_gzip_file_is_empty_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.fq.gz");
        fs::write(&path, b"").unwrap();

        let file = load(&path, &LoadOptions::fastq().with_pairing(Pairing::None)).unwrap();
        assert_eq!(file.record_count(), 0);
        assert_eq!(file.table.schema(), vec!["Name", "Seq", "Direction", "Qual"]);
    }

    #[test]
    fn test_explicit_missing_mate_is_error() {
        let dir = TempDir::new().unwrap();
        let r1 = dir.path().join("reads.fq");
        fs::write(&r1, "@a\nAC\n+\nII\n").unwrap();

        let options = LoadOptions::fastq().with_pairing(Pairing::Mate(dir.path().join("nope.fq")));
        assert!(matches!(load(&r1, &options), Err(SeqframeError::NotFound { .. })));
    }

    #[test]
    fn test_mate_count_mismatch() {
        let dir = TempDir::new().unwrap();
        let r1 = dir.path().join("x_R1_.fq");
        let r2 = dir.path().join("x_R2_.fq");
        fs::write(&r1, "@a\nA\n+\nI\n@b\nC\n+\nI\n").unwrap();
        fs::write(&r2, "@a\nT\n+\nI\n").unwrap();

        let result = load_fastq(&r1);
        assert!(matches!(
            result,
            Err(SeqframeError::MateCountMismatch { forward: 2, reverse: 1 })
        ));
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.fa");
        fs::write(&path, ">a\nACGT\n>b\n").unwrap();

        assert!(matches!(
            load_fasta(&path),
            Err(SeqframeError::MalformedInput { line_count: 3, arity: 2, .. })
        ));
    }
}
