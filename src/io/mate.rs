//! Mate file discovery by the Illumina `_R1_`/`_R2_` naming convention
//!
//! Mate files differ only in an embedded `_R1_`/`_R2_` token, e.g.
//! `S1_L001_R1_001.fastq.gz` and `S1_L001_R2_001.fastq.gz`. Discovery
//! rewrites the token in the file name and looks the result up in the
//! listing of the same directory.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Token marking a forward (R1) file
pub const FORWARD_TOKEN: &str = "_R1_";
/// Token marking a reverse (R2) file
pub const REVERSE_TOKEN: &str = "_R2_";

/// Outcome of a mate lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MateLookup {
    /// Mate exists at this path
    Found(PathBuf),
    /// Mate name was derived but no such file is listed
    Missing(PathBuf),
    /// File name has no `_R1_` token, so no mate name can be derived
    NoToken,
}

/// Derive the R2 file name from an R1 file name
///
/// Every `_R1_` token is replaced with `_R2_`.
///
/// ```
/// use seqframe::io::mate_file_name;
///
/// let mate = mate_file_name("S1_L001_R1_001.fastq.gz");
/// assert_eq!(mate.as_deref(), Some("S1_L001_R2_001.fastq.gz"));
/// assert_eq!(mate_file_name("reads.fastq"), None);
/// ```
pub fn mate_file_name(file_name: &str) -> Option<String> {
    file_name
        .contains(FORWARD_TOKEN)
        .then(|| file_name.replace(FORWARD_TOKEN, REVERSE_TOKEN))
}

/// Look up the mate of `path` in a listing of its directory
///
/// `listing` holds bare file names, as returned by a directory scan.
pub fn find_mate<S: AsRef<str>>(path: &Path, listing: &[S]) -> MateLookup {
    let Some(mate_name) = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(mate_file_name)
    else {
        return MateLookup::NoToken;
    };

    let mate_path = path.with_file_name(&mate_name);
    if listing.iter().any(|entry| entry.as_ref() == mate_name) {
        MateLookup::Found(mate_path)
    } else {
        MateLookup::Missing(mate_path)
    }
}

/// Look up the mate of `path` by listing its directory on disk
pub fn discover_mate(path: &Path) -> Result<MateLookup> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut listing = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        if let Some(name) = entry?.file_name().to_str() {
            listing.push(name.to_string());
        }
    }

    let lookup = find_mate(path, &listing);
    log::debug!("Mate lookup for {}: {:?}", path.display(), lookup);
    Ok(lookup)
}
