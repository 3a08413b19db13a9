//! Reverse complement of nucleotide sequences
//!
//! Standard bases are complemented A↔T, G↔C (U complements to A), IUPAC
//! ambiguity codes to their complementary code (R↔Y, K↔M, B↔V, D↔H; W, S
//! and N are self-complementary). Case is preserved and any other
//! character passes through unchanged.
//!
//! ```
//! use seqframe::operations::{complement, reverse_complement};
//!
//! assert_eq!(reverse_complement(b"ATGC"), b"GCAT");
//! assert_eq!(complement(b"ATGC"), b"TACG");
//! ```

/// Complement of every byte; bytes without a complement map to themselves
const COMPLEMENT_TABLE: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = i as u8;
        i += 1;
    }

    const PAIRS: [(u8, u8); 13] = [
        (b'A', b'T'),
        (b'T', b'A'),
        (b'G', b'C'),
        (b'C', b'G'),
        (b'U', b'A'),
        (b'R', b'Y'),
        (b'Y', b'R'),
        (b'K', b'M'),
        (b'M', b'K'),
        (b'B', b'V'),
        (b'V', b'B'),
        (b'D', b'H'),
        (b'H', b'D'),
    ];

    let mut j = 0;
    while j < PAIRS.len() {
        let (base, comp) = PAIRS[j];
        table[base as usize] = comp;
        table[base.to_ascii_lowercase() as usize] = comp.to_ascii_lowercase();
        j += 1;
    }

    table
};

#[inline]
fn complement_base(base: u8) -> u8 {
    COMPLEMENT_TABLE[base as usize]
}

/// Reverse complement a DNA/RNA sequence
///
/// RNA input yields DNA output (`AUGC` → `GCAT`).
pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    seq.iter().rev().map(|&base| complement_base(base)).collect()
}

/// Complement a sequence without reversing it
pub fn complement(seq: &[u8]) -> Vec<u8> {
    seq.iter().map(|&base| complement_base(base)).collect()
}

/// Reverse complement a sequence held as text
///
/// Works per character, so non-ASCII characters are reversed intact.
pub fn reverse_complement_str(seq: &str) -> String {
    seq.chars()
        .rev()
        .map(|c| if c.is_ascii() { complement_base(c as u8) as char } else { c })
        .collect()
}
