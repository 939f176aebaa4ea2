//! Composition statistics: GC content and per-symbol counts.

use std::collections::BTreeMap;
use std::fmt;

use crate::alphabet::{sanitize, SequenceKind, PROTEIN_ALPHABET};

/// A composition bucket: a concrete symbol or the catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Symbol(char),
    Other,
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bucket::Symbol(c) => write!(f, "{}", c),
            Bucket::Other => f.write_str("Other"),
        }
    }
}

/// Non-zero symbol counts in alphabet order, `Other` last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composition {
    counts: Vec<(Bucket, usize)>,
}

impl Composition {
    /// Count for `symbol` (case-insensitive), 0 when absent.
    pub fn get(&self, symbol: char) -> usize {
        self.count(Bucket::Symbol(symbol.to_ascii_uppercase()))
    }

    /// Count of symbols outside the kind's alphabet.
    pub fn other(&self) -> usize {
        self.count(Bucket::Other)
    }

    pub fn count(&self, bucket: Bucket) -> usize {
        self.counts
            .iter()
            .find(|(b, _)| *b == bucket)
            .map_or(0, |(_, n)| *n)
    }

    /// Sum over all buckets.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    /// Number of non-empty buckets.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Bucket, usize)> + '_ {
        self.counts.iter().copied()
    }
}

/// Fixed counting alphabet for a kind; `None` for unknown sequences.
fn counting_alphabet(kind: SequenceKind) -> Option<Vec<char>> {
    match kind {
        SequenceKind::Dna => Some("ATGCN".chars().collect()),
        SequenceKind::Rna => Some("AUGCN".chars().collect()),
        SequenceKind::Protein => Some(
            PROTEIN_ALPHABET
                .iter()
                .map(|&b| b as char)
                .chain(std::iter::once('X'))
                .collect(),
        ),
        SequenceKind::Unknown => None,
    }
}

/// GC percentage in `[0, 100]`, case-insensitive; 0 for an empty sequence.
pub fn gc_content(sequence: &str) -> f64 {
    let len = sequence.chars().count();
    if len == 0 {
        return 0.0;
    }
    let gc = sequence
        .chars()
        .filter(|c| matches!(c.to_ascii_uppercase(), 'G' | 'C'))
        .count();
    gc as f64 / len as f64 * 100.0
}

/// Counts symbols of the sanitized `sequence` against the alphabet of `kind`.
///
/// Symbols outside that alphabet land in [`Bucket::Other`]; zero buckets are
/// omitted. For [`SequenceKind::Unknown`] every distinct symbol present gets
/// its own bucket, in symbol order, and there is no `Other`.
pub fn count_symbols(sequence: &str, kind: SequenceKind) -> Composition {
    let canonical = sanitize(sequence);

    let Some(alphabet) = counting_alphabet(kind) else {
        let mut seen: BTreeMap<char, usize> = BTreeMap::new();
        for c in canonical.chars() {
            *seen.entry(c).or_insert(0) += 1;
        }
        return Composition {
            counts: seen.into_iter().map(|(c, n)| (Bucket::Symbol(c), n)).collect(),
        };
    };

    let mut counts = vec![0usize; alphabet.len()];
    let mut other = 0;
    for c in canonical.chars() {
        match alphabet.iter().position(|&a| a == c) {
            Some(idx) => counts[idx] += 1,
            None => other += 1,
        }
    }

    let counts = alphabet
        .into_iter()
        .zip(counts)
        .map(|(c, n)| (Bucket::Symbol(c), n))
        .chain(std::iter::once((Bucket::Other, other)))
        .filter(|(_, n)| *n > 0)
        .collect();

    Composition { counts }
}
