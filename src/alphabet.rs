//! Sequence alphabets, sanitization and type classification.
//!
//! Every analysis in this crate runs on the *canonical* form of the user's
//! input: whitespace, digits and FASTA `>` markers removed, uppercased, and
//! restricted to the union of nucleotide (with IUPAC ambiguity codes) and
//! amino acid letters. The canonical form is always ASCII, so byte offsets
//! and symbol offsets coincide.

use std::fmt;

/// Union of every symbol kept by [`sanitize`].
pub const UNION_ALPHABET: &[u8] = b"ATGCUNRYWSMKHBVDXPLFQZEJI";

/// Symbols accepted as DNA by [`classify`].
pub const DNA_ALPHABET: &[u8] = b"ATGCN";

/// Symbols accepted as RNA by [`classify`].
pub const RNA_ALPHABET: &[u8] = b"AUGCN";

/// The 20 standard one-letter amino acid codes.
pub const PROTEIN_ALPHABET: &[u8] = b"ACDEFGHIKLMNPQRSTVWY";

/// The kind of biological sequence, decided from the canonical symbol set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SequenceKind {
    Dna,
    Rna,
    Protein,
    #[default]
    Unknown,
}

impl SequenceKind {
    /// True for DNA and RNA.
    pub fn is_nucleotide(self) -> bool {
        matches!(self, SequenceKind::Dna | SequenceKind::Rna)
    }

    /// Lowercase name used in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            SequenceKind::Dna => "dna",
            SequenceKind::Rna => "rna",
            SequenceKind::Protein => "protein",
            SequenceKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Produces the canonical form of `input`.
///
/// Whitespace, ASCII digits and `>` are removed, the rest is uppercased and
/// anything outside [`UNION_ALPHABET`] is dropped. Never fails; an empty
/// input gives an empty output.
pub fn sanitize(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_ascii_digit() && *c != '>')
        .filter(char::is_ascii)
        .map(|c| c.to_ascii_uppercase())
        .filter(|c| UNION_ALPHABET.contains(&(*c as u8)))
        .collect()
}

/// Classifies a sequence as DNA, RNA, protein or unknown.
///
/// Whitespace is ignored and case folded. Alphabets are tried in a fixed
/// order (DNA, then RNA, then protein) and the first one containing every
/// symbol wins, so `ACGT` is DNA even though it is also a valid peptide.
pub fn classify(sequence: &str) -> SequenceKind {
    let symbols: Vec<u8> = sequence
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c.is_ascii() { c.to_ascii_uppercase() as u8 } else { 0 })
        .collect();

    if symbols.is_empty() {
        return SequenceKind::Unknown;
    }

    let fits = |alphabet: &[u8]| symbols.iter().all(|b| alphabet.contains(b));

    if fits(DNA_ALPHABET) {
        SequenceKind::Dna
    } else if fits(RNA_ALPHABET) {
        SequenceKind::Rna
    } else if fits(PROTEIN_ALPHABET) {
        SequenceKind::Protein
    } else {
        SequenceKind::Unknown
    }
}

/// A user sequence in both its original and canonical forms.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence {
    /// Text exactly as pasted or loaded
    pub raw: String,
    /// Sanitized, uppercased form used by all analyses
    pub canonical: String,
    /// Kind decided from `canonical`
    pub kind: SequenceKind,
}

impl Sequence {
    /// Builds a sequence from raw text.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let canonical = sanitize(&raw);
        let kind = classify(&canonical);
        Self {
            raw,
            canonical,
            kind,
        }
    }

    /// Length of the canonical sequence.
    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    /// Returns true if nothing survived sanitization.
    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_noise() {
        assert_eq!(sanitize(">seq1\n  acgt 12 ACGT\n"), "SEQACGTACGT");
        assert_eq!(sanitize("a-c*g.t"), "ACGT");
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("   \n\t 0123"), "");
    }

    #[test]
    fn test_sanitize_drops_letters_outside_union() {
        // O is the only Latin letter missing from the union alphabet
        assert_eq!(sanitize("foo"), "F");
        assert_eq!(sanitize("ÄTG"), "TG");
    }

    #[test]
    fn test_sanitize_never_grows() {
        for input in ["ATG", "a t g", ">>>", "ééé", "MKV*LL"] {
            assert!(sanitize(input).chars().count() <= input.chars().count());
        }
    }

    #[test]
    fn test_classify_priority() {
        assert_eq!(classify("ATGCN"), SequenceKind::Dna);
        assert_eq!(classify("acgt"), SequenceKind::Dna);
        assert_eq!(classify("AUGCUA"), SequenceKind::Rna);
        assert_eq!(classify("ACDEFG"), SequenceKind::Protein);
        assert_eq!(classify("GGCC"), SequenceKind::Dna);
        assert_eq!(classify(""), SequenceKind::Unknown);
        assert_eq!(classify("   "), SequenceKind::Unknown);
    }

    #[test]
    fn test_classify_mixed_is_never_split() {
        // T and U together fit neither nucleotide alphabet, U is not an amino acid
        assert_eq!(classify("ATGU"), SequenceKind::Unknown);
        // B is an ambiguity code, not a standard residue
        assert_eq!(classify("ACGB"), SequenceKind::Unknown);
        assert_eq!(classify("AT GC\nNN"), SequenceKind::Dna);
    }

    #[test]
    fn test_classify_stable_under_sanitize() {
        for input in ["ATGCATGC", "AUGGCU", "MKVLLA", "ATGRYB", "XXXX", ""] {
            assert_eq!(classify(&sanitize(input)), classify(input));
        }
    }

    #[test]
    fn test_sequence_from_raw() {
        let seq = Sequence::from_raw(">id\nat g\nccc\n");
        assert_eq!(seq.canonical, "IDATGCCC");
        assert_eq!(seq.kind, SequenceKind::Protein);

        let seq = Sequence::from_raw("atg ccc\n");
        assert_eq!(seq.canonical, "ATGCCC");
        assert_eq!(seq.kind, SequenceKind::Dna);
        assert_eq!(seq.len(), 6);
    }
}
