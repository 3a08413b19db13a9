//! seqframe: FASTQ/FASTA files as columnar record tables
//!
//! # Overview
//!
//! seqframe loads line-oriented sequencing files (plain or gzip) into a
//! [`RecordTable`], one column per record field, interleaves paired-end
//! mates, derives per-record fields (average quality, GC content, reverse
//! complement, translation) and writes tables back out.
//!
//! ## Quick Start
//!
//! ```no_run
//! use seqframe::operations::Transform;
//! use seqframe::{load_fastq, write_fastq};
//!
//! # fn main() -> seqframe::Result<()> {
//! // Picks up S1_L001_R2_001.fastq.gz next to R1 and interleaves the mates
//! let mut file = load_fastq("S1_L001_R1_001.fastq.gz")?;
//! file.table.derive(Transform::AverageQuality)?;
//!
//! for record in file.table.records().take(4) {
//!     println!("{:?} {:?}", record.field("Name"), record.value("Avg Qual"));
//! }
//!
//! write_fastq("S1_L001_interleaved.fastq.gz", &file.table)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Record layout
//!
//! | Format | Lines per record | Columns |
//! |--------|------------------|---------|
//! | FASTQ  | 4 | `Name`, `Seq`, `Direction`, `Qual` |
//! | FASTA  | 2 | `Name`, `Seq` |
//!
//! Derived columns are appended after the format's own columns and are
//! ignored when a table is written.
//!
//! ## Module Organization
//!
//! - [`io`]: Line reading, framing, mate pairing, loading and writing
//! - [`operations`]: Per-record primitives and derived columns
//! - [`table`]: The columnar record table
//! - [`types`]: Record formats and field names

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod io;
pub mod operations;
pub mod table;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SeqframeError};
pub use io::{
    frame, frame_lines, interleave, load, load_fasta, load_fastq, serialize, write_fasta,
    write_fastq, write_table, LineReader, LoadOptions, MateInterleaver, Pairing, RecordFramer,
    SequenceFile,
};
pub use table::{ColumnData, OnDuplicate, Record, RecordTable, Value};
pub use types::RecordFormat;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
