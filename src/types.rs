//! Common types used throughout seqframe

use std::fmt;

/// Column holding the identifier line (`@...` or `>...`)
pub const NAME: &str = "Name";
/// Column holding the sequence line
pub const SEQ: &str = "Seq";
/// Column holding the FASTQ separator line (`+...`)
pub const DIRECTION: &str = "Direction";
/// Column holding the FASTQ quality line
pub const QUAL: &str = "Qual";

const FASTQ_FIELDS: [&str; 4] = [NAME, SEQ, DIRECTION, QUAL];
const FASTA_FIELDS: [&str; 2] = [NAME, SEQ];

/// Line-oriented record layout
///
/// Each record occupies a fixed number of consecutive lines, one field per
/// line, in the order returned by [`RecordFormat::field_names`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordFormat {
    /// 4 lines per record: name, sequence, separator, quality
    Fastq,
    /// 2 lines per record: name, sequence
    Fasta,
}

impl RecordFormat {
    /// Number of lines per record
    ///
    /// ```
    /// use seqframe::RecordFormat;
    ///
    /// assert_eq!(RecordFormat::Fastq.arity(), 4);
    /// assert_eq!(RecordFormat::Fasta.arity(), 2);
    /// ```
    pub fn arity(self) -> usize {
        self.field_names().len()
    }

    /// Field (column) names in line order
    pub fn field_names(self) -> &'static [&'static str] {
        match self {
            RecordFormat::Fastq => &FASTQ_FIELDS,
            RecordFormat::Fasta => &FASTA_FIELDS,
        }
    }

    /// Whether `schema` starts with this format's fields, in order
    pub fn matches_schema<S: AsRef<str>>(self, schema: &[S]) -> bool {
        let fields = self.field_names();
        schema.len() >= fields.len()
            && fields
                .iter()
                .zip(schema)
                .all(|(expected, actual)| *expected == actual.as_ref())
    }
}

impl fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordFormat::Fastq => f.write_str("FASTQ"),
            RecordFormat::Fasta => f.write_str("FASTA"),
        }
    }
}
