//! Mate interleaving for paired-end input
//!
//! Paired-end sequencing produces two files (R1 and R2) where records at the
//! same position are the forward and reverse reads of one fragment. Both
//! interleavers here produce `A0, B0, A1, B1, ...` and refuse to pair streams
//! of different lengths.
//!
//! - [`MateInterleaver`] works on framed record streams (used by the loader)
//! - [`interleave`] works on two already built tables

use crate::error::{Result, SeqframeError};
use crate::table::{Column, ColumnData, RecordTable};

/// Streaming interleaver over two framed record streams
///
/// Yields the forward record, then its mate, for every position. If one
/// stream ends before the other the remaining records are counted and the
/// last item is [`SeqframeError::MateCountMismatch`] with both totals.
///
/// # Example
///
/// ```
/// use seqframe::{MateInterleaver, RecordFormat, RecordFramer};
///
/// let r1 = ["@a/1", "AC", "+", "II"].map(|l| Ok(l.to_string()));
/// let r2 = ["@a/2", "GT", "+", "II"].map(|l| Ok(l.to_string()));
///
/// let forward = RecordFramer::new(r1.into_iter(), RecordFormat::Fastq);
/// let reverse = RecordFramer::new(r2.into_iter(), RecordFormat::Fastq);
///
/// let names: Vec<String> = MateInterleaver::new(forward, reverse)
///     .map(|record| record.map(|fields| fields[0].clone()))
///     .collect::<seqframe::Result<_>>()
///     .unwrap();
/// assert_eq!(names, vec!["@a/1", "@a/2"]);
/// ```
pub struct MateInterleaver<A, B> {
    forward: A,
    reverse: B,
    pending_mate: Option<Vec<String>>,
    pairs: usize,
    finished: bool,
}

impl<A, B> MateInterleaver<A, B>
where
    A: Iterator<Item = Result<Vec<String>>>,
    B: Iterator<Item = Result<Vec<String>>>,
{
    /// Interleave `forward` (R1) with `reverse` (R2)
    pub fn new(forward: A, reverse: B) -> Self {
        Self {
            forward,
            reverse,
            pending_mate: None,
            pairs: 0,
            finished: false,
        }
    }

    /// Number of complete pairs read so far
    pub fn pairs_read(&self) -> usize {
        self.pairs
    }
}

/// Count what is left in `records`, surfacing the first error
fn drain_count<I>(records: &mut I) -> Result<usize>
where
    I: Iterator<Item = Result<Vec<String>>>,
{
    let mut count = 0;
    for record in records {
        record?;
        count += 1;
    }
    Ok(count)
}

impl<A, B> Iterator for MateInterleaver<A, B>
where
    A: Iterator<Item = Result<Vec<String>>>,
    B: Iterator<Item = Result<Vec<String>>>,
{
    type Item = Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(mate) = self.pending_mate.take() {
            return Some(Ok(mate));
        }
        if self.finished {
            return None;
        }

        match (self.forward.next(), self.reverse.next()) {
            (Some(Ok(r1)), Some(Ok(r2))) => {
                self.pairs += 1;
                self.pending_mate = Some(r2);
                Some(Ok(r1))
            }

            (None, None) => {
                self.finished = true;
                None
            }

            (Some(Err(e)), _) | (_, Some(Err(e))) => {
                self.finished = true;
                Some(Err(e))
            }

            // R1 continues past the end of R2
            (Some(Ok(_)), None) => {
                self.finished = true;
                let err = match drain_count(&mut self.forward) {
                    Ok(rest) => SeqframeError::MateCountMismatch {
                        forward: self.pairs + 1 + rest,
                        reverse: self.pairs,
                    },
                    Err(e) => e,
                };
                Some(Err(err))
            }

            // R2 continues past the end of R1
            (None, Some(Ok(_))) => {
                self.finished = true;
                let err = match drain_count(&mut self.reverse) {
                    Ok(rest) => SeqframeError::MateCountMismatch {
                        forward: self.pairs,
                        reverse: self.pairs + 1 + rest,
                    },
                    Err(e) => e,
                };
                Some(Err(err))
            }
        }
    }
}

fn alternate<T>(forward: Vec<T>, reverse: Vec<T>) -> Vec<T> {
    let mut out = Vec::with_capacity(forward.len() + reverse.len());
    for (a, b) in forward.into_iter().zip(reverse) {
        out.push(a);
        out.push(b);
    }
    out
}

fn interleave_column(forward: Column, reverse: Column) -> Result<Column> {
    let data = match (forward.data, reverse.data) {
        (ColumnData::Text(a), ColumnData::Text(b)) => ColumnData::Text(alternate(a, b)),
        (ColumnData::Float(a), ColumnData::Float(b)) => ColumnData::Float(alternate(a, b)),
        (ColumnData::Text(_), ColumnData::Float(_)) => {
            return Err(SeqframeError::ColumnType {
                column: forward.name,
                expected: "text",
            })
        }
        (ColumnData::Float(_), ColumnData::Text(_)) => {
            return Err(SeqframeError::ColumnType {
                column: forward.name,
                expected: "numeric",
            })
        }
    };
    Ok(Column {
        name: forward.name,
        data,
    })
}

/// Interleave two mate tables into one of `2n` records
///
/// Every column, derived ones included, is interleaved, so
/// `result[2i] == forward[i]` and `result[2i + 1] == reverse[i]`.
///
/// # Errors
///
/// - [`SeqframeError::SchemaMismatch`] if the schemas (or formats) differ
/// - [`SeqframeError::MateCountMismatch`] if the record counts differ
pub fn interleave(forward: RecordTable, reverse: RecordTable) -> Result<RecordTable> {
    if forward.format() != reverse.format() || forward.schema() != reverse.schema() {
        return Err(SeqframeError::SchemaMismatch {
            expected: forward.schema().into_iter().map(String::from).collect(),
            found: reverse.schema().into_iter().map(String::from).collect(),
        });
    }

    if forward.record_count() != reverse.record_count() {
        return Err(SeqframeError::MateCountMismatch {
            forward: forward.record_count(),
            reverse: reverse.record_count(),
        });
    }

    let format = forward.format();
    let len = forward.record_count() * 2;
    let columns = forward
        .into_columns()
        .into_iter()
        .zip(reverse.into_columns())
        .map(|(a, b)| interleave_column(a, b))
        .collect::<Result<Vec<_>>>()?;

    Ok(RecordTable::from_columns(format, columns, len))
}
