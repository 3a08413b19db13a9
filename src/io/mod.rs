//! I/O module: line reading, record framing, mate pairing and serialization
//!
//! Loading is a streaming pipeline: [`LineReader`] yields terminator-free
//! lines from plain or gzip input, [`RecordFramer`] groups them into
//! records, and [`MateInterleaver`] alternates forward and reverse records
//! for paired files. Records land in a columnar
//! [`RecordTable`](crate::RecordTable). Writing goes the other way through
//! [`serialize`] and a [`CompressedWriter`].

pub mod compression;
mod framer;
mod lines;
mod loader;
mod mate;
mod paired;
pub mod sink;
mod writer;

pub use compression::{
    CompressedReader, CompressedWriter, Compression, DataSource, OutputCompression, MMAP_THRESHOLD,
};
pub use framer::{frame, frame_lines, RecordFramer};
pub use lines::LineReader;
pub use loader::{
    load, load_fasta, load_fastq, sample_name, LoadOptions, LoadWarning, Pairing, SequenceFile,
};
pub use mate::{discover_mate, find_mate, mate_file_name, MateLookup, FORWARD_TOKEN, REVERSE_TOKEN};
pub use paired::{interleave, MateInterleaver};
pub use sink::DataSink;
pub use writer::{serialize, write_fasta, write_fastq, write_table};
