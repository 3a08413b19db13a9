//! Codon-to-amino-acid translation (standard genetic code, NCBI table 1)
//!
//! Translation reads codons from the first base in frame 1. Stop codons are
//! emitted as `*` and translation continues past them; codons containing
//! anything other than A/C/G/T/U (either case) become `X`. A trailing partial
//! codon is ignored.

/// Amino acid symbol for codons that cannot be resolved
pub const UNKNOWN_AMINO_ACID: u8 = b'X';

/// Stop codon symbol
pub const STOP: u8 = b'*';

// Codon order: AAA, AAC, AAG, AAT, ACA, ... TTG, TTT (A=0, C=1, G=2, T/U=3)
const STANDARD_CODE: [u8; 64] = [
    b'K', b'N', b'K', b'N', b'T', b'T', b'T', b'T', b'R', b'S', b'R', b'S',
    b'I', b'I', b'M', b'I', b'Q', b'H', b'Q', b'H', b'P', b'P', b'P', b'P',
    b'R', b'R', b'R', b'R', b'L', b'L', b'L', b'L', b'E', b'D', b'E', b'D',
    b'A', b'A', b'A', b'A', b'G', b'G', b'G', b'G', b'V', b'V', b'V', b'V',
    b'*', b'Y', b'*', b'Y', b'S', b'S', b'S', b'S', b'*', b'C', b'W', b'C',
    b'L', b'F', b'L', b'F',
];

fn base_index(base: u8) -> Option<usize> {
    match base.to_ascii_uppercase() {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' | b'U' => Some(3),
        _ => None,
    }
}

/// Amino acid for one codon (`*` for stop), `None` if the codon is ambiguous
pub fn translate_codon(codon: &[u8; 3]) -> Option<u8> {
    let idx = base_index(codon[0])? * 16 + base_index(codon[1])? * 4 + base_index(codon[2])?;
    Some(STANDARD_CODE[idx])
}

/// Translate a nucleotide sequence into one-letter amino acid codes
///
/// ```
/// use seqframe::operations::translate;
///
/// assert_eq!(translate(b"ATGGCCTAAGG"), "MA*");
/// assert_eq!(translate(b"ATGNNN"), "MX");
/// ```
pub fn translate(seq: &[u8]) -> String {
    seq.chunks_exact(3)
        .map(|codon| {
            let codon = [codon[0], codon[1], codon[2]];
            translate_codon(&codon).unwrap_or(UNKNOWN_AMINO_ACID) as char
        })
        .collect()
}
