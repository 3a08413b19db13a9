//! Table serialization back to line-oriented FASTQ/FASTA
//!
//! Serialization is the inverse of framing: field `j` of record `i` becomes
//! line `i * k + j`. Only the format's own fields are written; derived
//! columns are ignored for layout. The whole output is rendered into one
//! buffer and handed to the sink with a single write.
//!
//! # Example
//!
//! ```no_run
//! use seqframe::io::{load_fastq, write_fastq};
//!
//! # fn main() -> seqframe::Result<()> {
//! let file = load_fastq("S1_L001_R1_001.fastq.gz")?;
//! write_fastq("S1_L001_interleaved.fastq.gz", &file.table)?;
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, SeqframeError};
use crate::io::compression::{CompressedWriter, OutputCompression};
use crate::io::DataSink;
use crate::table::RecordTable;
use crate::types::RecordFormat;
use std::io::Write;
use std::path::Path;

#[inline]
fn strip_newlines(value: &str) -> &str {
    value.trim_end_matches(|c| c == '\n' || c == '\r')
}

/// Render `table` as `format` text, one `\n`-terminated line per field
///
/// Trailing `\r`/`\n` characters in stored values are removed before the
/// terminator is appended.
///
/// # Errors
///
/// [`SeqframeError::SchemaMismatch`] if the table's schema does not start
/// with `format`'s fields in order. A FASTQ table satisfies the FASTA
/// prefix (`Name, Seq`), so it can be written as FASTA; name lines are
/// written as stored.
pub fn serialize(table: &RecordTable, format: RecordFormat) -> Result<Vec<u8>> {
    let schema = table.schema();
    if !format.matches_schema(&schema) {
        return Err(SeqframeError::SchemaMismatch {
            expected: format.field_names().iter().map(|s| s.to_string()).collect(),
            found: schema.into_iter().map(String::from).collect(),
        });
    }

    let columns = format
        .field_names()
        .iter()
        .map(|name| table.text_column(name))
        .collect::<Result<Vec<_>>>()?;

    let capacity = columns
        .iter()
        .flat_map(|column| column.iter())
        .map(|value| value.len() + 1)
        .sum();
    let mut buffer = Vec::with_capacity(capacity);

    for row in 0..table.record_count() {
        for column in &columns {
            buffer.extend_from_slice(strip_newlines(&column[row]).as_bytes());
            buffer.push(b'\n');
        }
    }

    Ok(buffer)
}

/// Serialize `table` as `format` and write it to `sink` in one bulk write
///
/// The schema is checked before the sink is opened, so a mismatch never
/// creates or truncates an output file.
pub fn write_table(
    table: &RecordTable,
    format: RecordFormat,
    sink: DataSink,
    compression: OutputCompression,
) -> Result<()> {
    let buffer = serialize(table, format)?;

    log::debug!("Writing {} ({} bytes uncompressed, {:?})", sink, buffer.len(), compression);
    let description = sink.to_string();

    let mut writer = CompressedWriter::new(sink, compression)?;
    writer.write_all(&buffer)?;
    writer.finish()?;

    log::info!(
        "Wrote {} {} records to {}",
        table.record_count(),
        format,
        description
    );
    Ok(())
}

/// Write a FASTQ table to `path`, gzip-compressed
pub fn write_fastq<P: AsRef<Path>>(path: P, table: &RecordTable) -> Result<()> {
    write_table(
        table,
        RecordFormat::Fastq,
        DataSink::from_path(path),
        OutputCompression::default(),
    )
}

/// Write the `Name`/`Seq` columns of a table to `path` as FASTA, gzip-compressed
pub fn write_fasta<P: AsRef<Path>>(path: P, table: &RecordTable) -> Result<()> {
    write_table(
        table,
        RecordFormat::Fasta,
        DataSink::from_path(path),
        OutputCompression::default(),
    )
}
