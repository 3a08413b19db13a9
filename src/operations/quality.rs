//! Phred+33 quality decoding
//!
//! Quality characters are decoded through a constant table indexed by ASCII
//! code. The table covers every printable Phred+33 symbol, `'!'` (33, Q0)
//! through `'~'` (126, Q93), which includes the high-quality symbols above
//! `'K'` (Q42) emitted by modern instruments. Anything else is an
//! [`UnknownSymbol`](crate::SeqframeError::UnknownSymbol) error.

use crate::error::{Result, SeqframeError};

/// ASCII offset of Phred+33 encoding
pub const PHRED_OFFSET: u8 = b'!';

/// Highest supported quality symbol
pub const MAX_QUALITY_SYMBOL: u8 = b'~';

/// Phred score for every ASCII code, `None` outside `'!'..='~'`
const PHRED_TABLE: [Option<u8>; 128] = build_phred_table();

const fn build_phred_table() -> [Option<u8>; 128] {
    let mut table = [None; 128];
    let mut code = PHRED_OFFSET;
    while code <= MAX_QUALITY_SYMBOL {
        table[code as usize] = Some(code - PHRED_OFFSET);
        code += 1;
    }
    table
}

/// Phred score of one quality symbol
///
/// ```
/// use seqframe::operations::phred_score;
///
/// assert_eq!(phred_score('!'), Some(0));
/// assert_eq!(phred_score('K'), Some(42));
/// assert_eq!(phred_score('~'), Some(93));
/// assert_eq!(phred_score(' '), None);
/// ```
#[inline]
pub fn phred_score(symbol: char) -> Option<u8> {
    PHRED_TABLE.get(symbol as usize).copied().flatten()
}

/// Decode a quality string into Phred scores
pub fn quality_scores(quality: &str) -> Result<Vec<u8>> {
    quality
        .chars()
        .enumerate()
        .map(|(position, symbol)| {
            phred_score(symbol).ok_or(SeqframeError::UnknownSymbol { symbol, position })
        })
        .collect()
}

/// Mean Phred score of a quality string
///
/// An empty string averages to `0.0`.
///
/// ```
/// use seqframe::operations::average_quality;
///
/// assert_eq!(average_quality("!!!!").unwrap(), 0.0);
/// assert_eq!(average_quality("KKKK").unwrap(), 42.0);
/// assert_eq!(average_quality("!K").unwrap(), 21.0);
/// ```
pub fn average_quality(quality: &str) -> Result<f64> {
    let mut total = 0u64;
    let mut count = 0usize;

    for (position, symbol) in quality.chars().enumerate() {
        let score = phred_score(symbol).ok_or(SeqframeError::UnknownSymbol { symbol, position })?;
        total += u64::from(score);
        count += 1;
    }

    if count == 0 {
        Ok(0.0)
    } else {
        Ok(total as f64 / count as f64)
    }
}
