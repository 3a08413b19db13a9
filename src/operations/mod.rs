//! Per-record sequence operations and derived fields
//!
//! This module provides:
//! - Scalar primitives over one field value: quality decoding, GC content,
//!   reverse complement, codon translation
//! - Derived-field computation that maps a primitive over a table column
//!
//! # Organization
//!
//! - `quality`: Phred+33 decoding and average quality
//! - `gc_content`: GC percentage
//! - `sequence`: Complement and reverse complement
//! - `translate`: Standard genetic code translation
//! - `derive`: Column-level transforms over a [`RecordTable`](crate::RecordTable)

pub mod derive;
pub mod gc_content;
pub mod quality;
pub mod sequence;
pub mod translate;

pub use derive::{
    compute_field, compute_field_with, DerivedValue, Transform, AMINO_ACIDS, AVG_QUAL, GC_CONTENT,
    PARALLEL_THRESHOLD, REV_COMP,
};
pub use gc_content::{gc_content, gc_counts, GCPercent};
pub use quality::{average_quality, phred_score, quality_scores, MAX_QUALITY_SYMBOL, PHRED_OFFSET};
pub use sequence::{complement, reverse_complement, reverse_complement_str};
pub use translate::{translate, translate_codon, STOP, UNKNOWN_AMINO_ACID};
