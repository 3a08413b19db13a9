//! Derived per-record fields
//!
//! A derived field is computed from one text column with a pure function,
//! `output[i] = f(source[i])`, and appended to the table as a new column.
//! Rows are independent, so tables of [`PARALLEL_THRESHOLD`] records or more
//! are processed with rayon; results are collected by index, so row order
//! is unchanged.
//!
//! # Example
//!
//! ```
//! use seqframe::operations::{compute_field, Transform};
//! use seqframe::{frame_lines, OnDuplicate, RecordFormat};
//!
//! # fn main() -> seqframe::Result<()> {
//! let lines = ["@r1", "ACGT", "+", "!!!!", "@r2", "TTTT", "+", "KKKK"];
//! let mut table = frame_lines(lines, RecordFormat::Fastq)?;
//!
//! compute_field(&mut table, "Qual", Transform::AverageQuality, "Avg Qual", OnDuplicate::Reject)?;
//! assert_eq!(table.float_column("Avg Qual")?, &[0.0, 42.0]);
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, SeqframeError};
use crate::operations::{average_quality, gc_content, reverse_complement_str, translate};
use crate::table::{ColumnData, OnDuplicate, RecordTable};
use crate::types::{QUAL, SEQ};
use rayon::prelude::*;
use std::fmt;

/// Row count from which derived fields are computed in parallel
pub const PARALLEL_THRESHOLD: usize = 10_000;

/// Default column for [`Transform::AverageQuality`]
pub const AVG_QUAL: &str = "Avg Qual";
/// Default column for [`Transform::GcContent`]
pub const GC_CONTENT: &str = "GC Content";
/// Default column for [`Transform::ReverseComplement`]
pub const REV_COMP: &str = "Rev Comp";
/// Default column for [`Transform::Translate`]
pub const AMINO_ACIDS: &str = "Amino Acids";

/// Value type a derived column can hold
pub trait DerivedValue: Send + Sized {
    /// Wrap computed values as column data
    fn into_column(values: Vec<Self>) -> ColumnData;
}

impl DerivedValue for f64 {
    fn into_column(values: Vec<Self>) -> ColumnData {
        ColumnData::Float(values)
    }
}

impl DerivedValue for String {
    fn into_column(values: Vec<Self>) -> ColumnData {
        ColumnData::Text(values)
    }
}

/// Built-in per-record transforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transform {
    /// Mean Phred+33 score of a quality string (numeric)
    AverageQuality,
    /// Percentage of G/C bases (numeric)
    GcContent,
    /// Reverse complement of a sequence (text)
    ReverseComplement,
    /// Amino acid translation of a sequence (text)
    Translate,
}

impl Transform {
    /// Column the transform reads by default
    pub fn default_source(self) -> &'static str {
        match self {
            Transform::AverageQuality => QUAL,
            Transform::GcContent | Transform::ReverseComplement | Transform::Translate => SEQ,
        }
    }

    /// Column the transform writes by default
    pub fn default_output(self) -> &'static str {
        match self {
            Transform::AverageQuality => AVG_QUAL,
            Transform::GcContent => GC_CONTENT,
            Transform::ReverseComplement => REV_COMP,
            Transform::Translate => AMINO_ACIDS,
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Transform::AverageQuality => "average-quality",
            Transform::GcContent => "gc-content",
            Transform::ReverseComplement => "reverse-complement",
            Transform::Translate => "translate",
        };
        f.write_str(name)
    }
}

fn compute_values<T, F>(source: &[String], f: &F) -> Result<Vec<T>>
where
    T: DerivedValue,
    F: Fn(&str) -> Result<T> + Sync,
{
    if source.len() >= PARALLEL_THRESHOLD {
        source.par_iter().map(|value| f(value.as_str())).collect()
    } else {
        source.iter().map(|value| f(value.as_str())).collect()
    }
}

/// Derive `output` from text column `source` with a custom function
///
/// # Errors
///
/// - [`SeqframeError::MissingColumn`] / [`SeqframeError::ColumnType`] if
///   `source` is absent or numeric
/// - [`SeqframeError::DuplicateColumn`] if `output` exists and
///   `on_duplicate` is [`OnDuplicate::Reject`] (checked before computing)
/// - the first error returned by `f`
pub fn compute_field_with<T, F>(
    table: &mut RecordTable,
    source: &str,
    output: &str,
    on_duplicate: OnDuplicate,
    f: F,
) -> Result<()>
where
    T: DerivedValue,
    F: Fn(&str) -> Result<T> + Sync,
{
    if on_duplicate == OnDuplicate::Reject && table.has_column(output) {
        return Err(SeqframeError::DuplicateColumn(output.to_string()));
    }

    let values = compute_values(table.text_column(source)?, &f)?;
    table.add_column(output, T::into_column(values), on_duplicate)
}

/// Derive `output` from `source` with a built-in [`Transform`]
pub fn compute_field(
    table: &mut RecordTable,
    source: &str,
    transform: Transform,
    output: &str,
    on_duplicate: OnDuplicate,
) -> Result<()> {
    log::debug!(
        "Computing {} from '{}' into '{}' ({} records)",
        transform,
        source,
        output,
        table.record_count()
    );

    match transform {
        Transform::AverageQuality => {
            compute_field_with(table, source, output, on_duplicate, average_quality)
        }
        Transform::GcContent => compute_field_with(table, source, output, on_duplicate, |seq| {
            Ok(gc_content(seq.as_bytes()))
        }),
        Transform::ReverseComplement => {
            compute_field_with(table, source, output, on_duplicate, |seq| {
                Ok(reverse_complement_str(seq))
            })
        }
        Transform::Translate => compute_field_with(table, source, output, on_duplicate, |seq| {
            Ok(translate(seq.as_bytes()))
        }),
    }
}

impl RecordTable {
    /// Apply `transform` from its default source into its default column
    ///
    /// Equivalent to [`compute_field`] with [`Transform::default_source`],
    /// [`Transform::default_output`] and [`OnDuplicate::Reject`].
    pub fn derive(&mut self, transform: Transform) -> Result<()> {
        compute_field(
            self,
            transform.default_source(),
            transform,
            transform.default_output(),
            OnDuplicate::Reject,
        )
    }
}
