//! Sequence text extraction from uploaded or pasted files.
//!
//! Accepts FASTA or bare sequence text. For FASTA input the header lines are
//! removed (their letters would otherwise survive sanitization) and only the
//! first record is kept, since the editor works on a single construct.
//!
//! ## FASTA Format
//!
//! ```text
//! >sequence_identifier optional description
//! ACGTACGTACGT...
//! >another_sequence
//! TGCATGCATGCA...
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

/// Errors that can occur while loading sequence text.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to open file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Empty file")]
    EmptyFile,

    #[error("FASTA record '{0}' has no sequence")]
    EmptyRecord(String),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Text extracted from a file, before sanitization.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadedText {
    /// Identifier of the first FASTA record (header up to the first space)
    pub id: Option<String>,
    /// Sequence lines, newlines preserved
    pub text: String,
    /// Number of records seen (0 for bare text)
    pub records: usize,
}

/// Reads a sequence file from disk.
///
/// # Examples
///
/// ```no_run
/// use seqforge::fasta::load_file;
///
/// let loaded = load_file("construct.fasta").unwrap();
/// println!("{} records", loaded.records);
/// ```
pub fn load_file<P: AsRef<Path>>(path: P) -> LoadResult<LoadedText> {
    let file = File::open(&path)?;
    let loaded = load(BufReader::new(file))?;
    log::info!(
        "loaded {}: {} bytes of sequence text, {} record(s)",
        path.as_ref().display(),
        loaded.text.len(),
        loaded.records
    );
    Ok(loaded)
}

/// Extracts the first sequence from a reader.
pub fn load<R: BufRead>(reader: R) -> LoadResult<LoadedText> {
    let mut loaded = LoadedText::default();
    let mut saw_content = false;

    for line_result in reader.lines() {
        let line = line_result?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }
        saw_content = true;

        if let Some(header) = trimmed.strip_prefix('>') {
            loaded.records += 1;
            if loaded.records == 1 {
                let id = header.split_whitespace().next().unwrap_or(header);
                loaded.id = Some(id.to_string());
            }
            continue;
        }

        // Later records are counted but not kept
        if loaded.records <= 1 {
            loaded.text.push_str(trimmed);
            loaded.text.push('\n');
        }
    }

    if !saw_content {
        return Err(LoadError::EmptyFile);
    }

    if loaded.records > 0 && loaded.text.is_empty() {
        return Err(LoadError::EmptyRecord(loaded.id.unwrap_or_default()));
    }

    Ok(loaded)
}

/// Extracts the first sequence from in-memory text.
pub fn load_str(content: &str) -> LoadResult<LoadedText> {
    load(content.as_bytes())
}
