//! GC content calculation
//!
//! GC content is reported as a percentage (0-100) of G and C bases among the
//! unambiguous A/C/G/T bases of a sequence. Lowercase (soft-masked) bases
//! count; N and other IUPAC ambiguity codes are ignored.

/// GC content as a percentage (0.0 to 100.0)
pub type GCPercent = f64;

/// Count `(gc, acgt)` bases, case-insensitive
#[inline]
pub fn gc_counts(seq: &[u8]) -> (usize, usize) {
    let mut gc_count = 0usize;
    let mut total_count = 0usize;

    for &base in seq {
        match base.to_ascii_uppercase() {
            b'G' | b'C' => {
                gc_count += 1;
                total_count += 1;
            }
            b'A' | b'T' => {
                total_count += 1;
            }
            _ => {}
        }
    }

    (gc_count, total_count)
}

/// Calculate the GC content of a DNA sequence
///
/// Returns `0.0` when the sequence has no A/C/G/T bases.
///
/// # Example
///
/// ```
/// use seqframe::operations::gc_content;
///
/// let gc = gc_content(b"GATTACAGATTACA");
/// assert!((gc - 28.571).abs() < 0.001); // 4 of 14
/// ```
pub fn gc_content(seq: &[u8]) -> GCPercent {
    match gc_counts(seq) {
        (_, 0) => 0.0,
        (gc, total) => gc as f64 * 100.0 / total as f64,
    }
}
