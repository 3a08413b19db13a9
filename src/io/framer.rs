//! Fixed-arity record framing
//!
//! Line `i` of the input becomes field `i % k` of record `i / k`, where `k`
//! is the format's arity (4 for FASTQ, 2 for FASTA). A trailing partial
//! record is an error, never silently dropped or padded.

use crate::error::{Result, SeqframeError};
use crate::table::RecordTable;
use crate::types::RecordFormat;

/// Groups a line stream into records of exactly `format.arity()` fields
///
/// Yields each record as its fields in line order. If the input ends in the
/// middle of a record the last item is [`SeqframeError::MalformedInput`].
///
/// # Example
///
/// ```
/// use seqframe::{RecordFormat, RecordFramer};
///
/// let lines = vec![">a", "ACGT", ">b", "GG"].into_iter().map(|l| Ok(l.to_string()));
/// let records: Vec<_> = RecordFramer::new(lines, RecordFormat::Fasta)
///     .collect::<seqframe::Result<_>>()
///     .unwrap();
/// assert_eq!(records, vec![vec![">a", "ACGT"], vec![">b", "GG"]]);
/// ```
pub struct RecordFramer<I> {
    lines: I,
    format: RecordFormat,
    records: usize,
    finished: bool,
}

impl<I> RecordFramer<I>
where
    I: Iterator<Item = Result<String>>,
{
    /// Frame `lines` as `format` records
    pub fn new(lines: I, format: RecordFormat) -> Self {
        Self {
            lines,
            format,
            records: 0,
            finished: false,
        }
    }

    /// Record layout being framed
    pub fn format(&self) -> RecordFormat {
        self.format
    }

    /// Number of complete records yielded so far
    pub fn records_framed(&self) -> usize {
        self.records
    }
}

impl<I> Iterator for RecordFramer<I>
where
    I: Iterator<Item = Result<String>>,
{
    type Item = Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let arity = self.format.arity();
        let mut fields = Vec::with_capacity(arity);

        while fields.len() < arity {
            match self.lines.next() {
                Some(Ok(line)) => fields.push(line),
                Some(Err(e)) => {
                    self.finished = true;
                    return Some(Err(e));
                }
                None => {
                    self.finished = true;
                    if fields.is_empty() {
                        return None;
                    }
                    return Some(Err(SeqframeError::MalformedInput {
                        format: self.format,
                        line_count: self.records * arity + fields.len(),
                        arity,
                    }));
                }
            }
        }

        self.records += 1;
        Some(Ok(fields))
    }
}

/// Frame a fallible line stream into a [`RecordTable`]
pub fn frame<I>(lines: I, format: RecordFormat) -> Result<RecordTable>
where
    I: IntoIterator<Item = Result<String>>,
{
    let mut table = RecordTable::new(format);
    for record in RecordFramer::new(lines.into_iter(), format) {
        table.push_record(record?)?;
    }
    Ok(table)
}

/// Frame in-memory lines into a [`RecordTable`]
///
/// # Errors
///
/// [`SeqframeError::MalformedInput`] if the number of lines is not a multiple
/// of `format.arity()`.
///
/// ```
/// use seqframe::{frame_lines, RecordFormat, SeqframeError};
///
/// let table = frame_lines(["@r1", "ACGT", "+", "!!!!"], RecordFormat::Fastq).unwrap();
/// assert_eq!(table.record_count(), 1);
///
/// let err = frame_lines(["@r1", "ACGT", "+"], RecordFormat::Fastq).unwrap_err();
/// assert!(matches!(err, SeqframeError::MalformedInput { line_count: 3, arity: 4, .. }));
/// ```
pub fn frame_lines<I, S>(lines: I, format: RecordFormat) -> Result<RecordTable>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    frame(lines.into_iter().map(|line| Ok(line.into())), format)
}
