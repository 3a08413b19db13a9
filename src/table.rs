//! In-memory record store
//!
//! A [`RecordTable`] is a column store of records with a uniform schema. The
//! leading columns are the fields of its [`RecordFormat`] (`Name, Seq,
//! Direction, Qual` for FASTQ, `Name, Seq` for FASTA), followed by zero or
//! more derived columns appended with [`RecordTable::add_column`].
//!
//! Invariants:
//! - every column holds exactly `record_count()` values
//! - row order is file order (or mate-interleave order) and never changes
//! - column names are unique
//!
//! # Example
//!
//! ```
//! use seqframe::{frame_lines, ColumnData, OnDuplicate, RecordFormat};
//!
//! # fn main() -> seqframe::Result<()> {
//! let lines = ["@r1", "ACGT", "+", "IIII", "@r2", "GGCC", "+", "!!!!"];
//! let mut table = frame_lines(lines, RecordFormat::Fastq)?;
//!
//! table.add_column("Length", ColumnData::Float(vec![4.0, 4.0]), OnDuplicate::Reject)?;
//! assert_eq!(table.schema(), vec!["Name", "Seq", "Direction", "Qual", "Length"]);
//! assert_eq!(table.record(1).unwrap().field("Seq"), Some("GGCC"));
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, SeqframeError};
use crate::types::RecordFormat;

/// Values of one column, one per record
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// String values (raw record fields, sequences, translations)
    Text(Vec<String>),
    /// Numeric values (quality averages, GC percentages)
    Float(Vec<f64>),
}

impl ColumnData {
    /// Number of values
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Text(values) => values.len(),
            ColumnData::Float(values) => values.len(),
        }
    }

    /// Whether the column holds no values
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// String values, if this is a text column
    pub fn as_text(&self) -> Option<&[String]> {
        match self {
            ColumnData::Text(values) => Some(values),
            ColumnData::Float(_) => None,
        }
    }

    /// Numeric values, if this is a numeric column
    pub fn as_float(&self) -> Option<&[f64]> {
        match self {
            ColumnData::Float(values) => Some(values),
            ColumnData::Text(_) => None,
        }
    }

    fn value(&self, index: usize) -> Option<Value<'_>> {
        match self {
            ColumnData::Text(values) => values.get(index).map(|v| Value::Text(v.as_str())),
            ColumnData::Float(values) => values.get(index).map(|&v| Value::Float(v)),
        }
    }
}

/// A single cell borrowed from a table
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// String cell
    Text(&'a str),
    /// Numeric cell
    Float(f64),
}

/// What [`RecordTable::add_column`] does when the name is already taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnDuplicate {
    /// Fail with [`SeqframeError::DuplicateColumn`]
    #[default]
    Reject,
    /// Replace the existing column in place, keeping its position
    Overwrite,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Column {
    pub(crate) name: String,
    pub(crate) data: ColumnData,
}

/// Ordered, append-only collection of records
#[derive(Debug, Clone, PartialEq)]
pub struct RecordTable {
    format: RecordFormat,
    columns: Vec<Column>,
    len: usize,
}

impl RecordTable {
    /// Create an empty table with the base columns of `format`
    pub fn new(format: RecordFormat) -> Self {
        Self::with_capacity(format, 0)
    }

    /// Create an empty table with room for `capacity` records
    pub fn with_capacity(format: RecordFormat, capacity: usize) -> Self {
        let columns = format
            .field_names()
            .iter()
            .map(|name| Column {
                name: (*name).to_string(),
                data: ColumnData::Text(Vec::with_capacity(capacity)),
            })
            .collect();

        Self {
            format,
            columns,
            len: 0,
        }
    }

    /// Assemble a table from already aligned columns
    pub(crate) fn from_columns(format: RecordFormat, columns: Vec<Column>, len: usize) -> Self {
        debug_assert!(columns.iter().all(|c| c.data.len() == len));
        Self { format, columns, len }
    }

    pub(crate) fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    /// Append one framed record (one value per column)
    pub(crate) fn push_record(&mut self, fields: Vec<String>) -> Result<()> {
        if fields.len() != self.columns.len() {
            return Err(SeqframeError::LengthMismatch {
                column: "<record>".to_string(),
                expected: self.columns.len(),
                actual: fields.len(),
            });
        }

        // Checked up front so a failure leaves every column at `len`
        if let Some(column) = self.columns.iter().find(|c| c.data.as_text().is_none()) {
            return Err(SeqframeError::ColumnType {
                column: column.name.clone(),
                expected: "text",
            });
        }

        for (column, field) in self.columns.iter_mut().zip(fields) {
            if let ColumnData::Text(values) = &mut column.data {
                values.push(field);
            }
        }
        self.len += 1;
        Ok(())
    }

    /// Record layout this table was framed with
    pub fn format(&self) -> RecordFormat {
        self.format
    }

    /// Number of records
    pub fn record_count(&self) -> usize {
        self.len
    }

    /// Whether the table holds no records
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Column names in order: format fields first, then derived columns
    pub fn schema(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Whether a column named `name` exists
    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Values of column `name`, in record order
    pub fn column(&self, name: &str) -> Result<&ColumnData> {
        self.position(name)
            .map(|i| &self.columns[i].data)
            .ok_or_else(|| SeqframeError::MissingColumn(name.to_string()))
    }

    /// Values of text column `name`
    pub fn text_column(&self, name: &str) -> Result<&[String]> {
        self.column(name)?
            .as_text()
            .ok_or_else(|| SeqframeError::ColumnType {
                column: name.to_string(),
                expected: "text",
            })
    }

    /// Values of numeric column `name`
    pub fn float_column(&self, name: &str) -> Result<&[f64]> {
        self.column(name)?
            .as_float()
            .ok_or_else(|| SeqframeError::ColumnType {
                column: name.to_string(),
                expected: "numeric",
            })
    }

    /// Append a column, or replace one when `on_duplicate` allows it
    ///
    /// # Errors
    ///
    /// - [`SeqframeError::LengthMismatch`] if `data.len() != record_count()`
    /// - [`SeqframeError::DuplicateColumn`] if `name` exists and
    ///   `on_duplicate` is [`OnDuplicate::Reject`]
    /// - [`SeqframeError::ColumnType`] if a format field would be replaced
    ///   by numeric values
    pub fn add_column<S: Into<String>>(
        &mut self,
        name: S,
        data: ColumnData,
        on_duplicate: OnDuplicate,
    ) -> Result<()> {
        let name = name.into();

        if data.len() != self.len {
            return Err(SeqframeError::LengthMismatch {
                column: name,
                expected: self.len,
                actual: data.len(),
            });
        }

        match (self.position(&name), on_duplicate) {
            (None, _) => {
                self.columns.push(Column { name, data });
                Ok(())
            }
            (Some(_), OnDuplicate::Reject) => Err(SeqframeError::DuplicateColumn(name)),
            (Some(i), OnDuplicate::Overwrite) => {
                if i < self.format.arity() && data.as_text().is_none() {
                    return Err(SeqframeError::ColumnType {
                        column: name,
                        expected: "text",
                    });
                }
                self.columns[i].data = data;
                Ok(())
            }
        }
    }

    /// Borrow record `index`, or `None` past the end
    pub fn record(&self, index: usize) -> Option<Record<'_>> {
        (index < self.len).then_some(Record { table: self, index })
    }

    /// Iterate records in order
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> + '_ {
        (0..self.len).map(move |index| Record { table: self, index })
    }
}

/// Borrowed view of one table row
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    table: &'a RecordTable,
    index: usize,
}

impl<'a> Record<'a> {
    /// Row position in the table
    pub fn index(&self) -> usize {
        self.index
    }

    /// Text value of column `name`
    ///
    /// Returns `None` if the column is missing or numeric.
    pub fn field(&self, name: &str) -> Option<&'a str> {
        match self.value(name)? {
            Value::Text(text) => Some(text),
            Value::Float(_) => None,
        }
    }

    /// Value of column `name`, text or numeric
    pub fn value(&self, name: &str) -> Option<Value<'a>> {
        self.table.column(name).ok()?.value(self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fasta_table(seqs: &[&str]) -> RecordTable {
        let mut table = RecordTable::new(RecordFormat::Fasta);
        for (i, seq) in seqs.iter().enumerate() {
            table
                .push_record(vec![format!(">s{}", i), seq.to_string()])
                .unwrap();
        }
        table
    }

    #[test]
    fn test_new_table_has_format_schema() {
        let table = RecordTable::new(RecordFormat::Fastq);
        assert_eq!(table.schema(), vec!["Name", "Seq", "Direction", "Qual"]);
        assert_eq!(table.record_count(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_push_record_wrong_arity() {
        let mut table = RecordTable::new(RecordFormat::Fastq);
        let result = table.push_record(vec![">a".to_string(), "ACGT".to_string()]);
        assert!(matches!(
            result,
            Err(SeqframeError::LengthMismatch { expected: 4, actual: 2, .. })
        ));
        assert_eq!(table.record_count(), 0);
    }

    #[test]
    fn test_push_record_into_numeric_column_leaves_table_intact() {
        let mut table = fasta_table(&["ACGT"]);
        table
            .add_column("Len", ColumnData::Float(vec![4.0]), OnDuplicate::Reject)
            .unwrap();

        let fields = vec![">b".to_string(), "GG".to_string(), "2".to_string()];
        let result = table.push_record(fields);
        assert!(matches!(result, Err(SeqframeError::ColumnType { column, .. }) if column == "Len"));

        assert_eq!(table.record_count(), 1);
        assert_eq!(table.text_column("Name").unwrap(), &[">s0"]);
        assert_eq!(table.text_column("Seq").unwrap(), &["ACGT"]);
        assert_eq!(table.float_column("Len").unwrap(), &[4.0]);
    }

    #[test]
    fn test_add_column_length_mismatch() {
        let mut table = fasta_table(&["ACGT", "GG"]);
        let result = table.add_column("Len", ColumnData::Float(vec![4.0]), OnDuplicate::Reject);
        assert!(matches!(
            result,
            Err(SeqframeError::LengthMismatch { expected: 2, actual: 1, .. })
        ));
        assert!(!table.has_column("Len"));
    }

    #[test]
    fn test_add_column_duplicate_rejected_by_default() {
        let mut table = fasta_table(&["ACGT"]);
        table
            .add_column("Len", ColumnData::Float(vec![4.0]), OnDuplicate::default())
            .unwrap();

        let result = table.add_column("Len", ColumnData::Float(vec![5.0]), OnDuplicate::default());
        assert!(matches!(result, Err(SeqframeError::DuplicateColumn(name)) if name == "Len"));
        assert_eq!(table.float_column("Len").unwrap(), &[4.0]);
    }

    #[test]
    fn test_add_column_overwrite_keeps_position() {
        let mut table = fasta_table(&["ACGT", "GG"]);
        table
            .add_column("A", ColumnData::Float(vec![1.0, 2.0]), OnDuplicate::Reject)
            .unwrap();
        table
            .add_column("B", ColumnData::Float(vec![3.0, 4.0]), OnDuplicate::Reject)
            .unwrap();
        table
            .add_column("A", ColumnData::Float(vec![9.0, 8.0]), OnDuplicate::Overwrite)
            .unwrap();

        assert_eq!(table.schema(), vec!["Name", "Seq", "A", "B"]);
        assert_eq!(table.float_column("A").unwrap(), &[9.0, 8.0]);
        assert_eq!(table.float_column("B").unwrap(), &[3.0, 4.0]);
        assert_eq!(table.text_column("Seq").unwrap(), &["ACGT", "GG"]);
    }

    #[test]
    fn test_overwrite_format_field_requires_text() {
        let mut table = fasta_table(&["ACGT"]);
        let result = table.add_column("Seq", ColumnData::Float(vec![1.0]), OnDuplicate::Overwrite);
        assert!(matches!(result, Err(SeqframeError::ColumnType { .. })));

        table
            .add_column("Seq", ColumnData::Text(vec!["TTTT".to_string()]), OnDuplicate::Overwrite)
            .unwrap();
        assert_eq!(table.record(0).unwrap().field("Seq"), Some("TTTT"));
    }

    #[test]
    fn test_column_accessors() {
        let mut table = fasta_table(&["ACGT"]);
        table
            .add_column("Len", ColumnData::Float(vec![4.0]), OnDuplicate::Reject)
            .unwrap();

        assert!(matches!(table.column("Nope"), Err(SeqframeError::MissingColumn(_))));
        assert!(matches!(table.float_column("Seq"), Err(SeqframeError::ColumnType { .. })));
        assert!(matches!(table.text_column("Len"), Err(SeqframeError::ColumnType { .. })));
    }

    #[test]
    fn test_record_views() {
        let mut table = fasta_table(&["ACGT", "GG", "T"]);
        table
            .add_column("Len", ColumnData::Float(vec![4.0, 2.0, 1.0]), OnDuplicate::Reject)
            .unwrap();

        let seqs: Vec<_> = table.records().map(|r| r.field("Seq").unwrap()).collect();
        assert_eq!(seqs, vec!["ACGT", "GG", "T"]);

        let second = table.record(1).unwrap();
        assert_eq!(second.index(), 1);
        assert_eq!(second.value("Len"), Some(Value::Float(2.0)));
        assert_eq!(second.field("Len"), None);
        assert!(table.record(3).is_none());
    }
}
