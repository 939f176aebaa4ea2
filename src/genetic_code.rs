//! Genetic code table and codon translation.
//!
//! The standard code is stored in NCBI `ncbieaa` order (first base varying
//! slowest over T, C, A, G) and indexed directly from the codon bases.

/// Amino acids of the standard code (NCBI translation table 1).
const STANDARD_NCBIEAA: &[u8; 64] =
    b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";

/// A genetic code table for translating codons to amino acids.
#[derive(Debug, Clone)]
pub struct GeneticCode {
    /// NCBI genetic code ID
    pub id: u8,
    /// Name of the genetic code
    pub name: &'static str,
    /// 64 amino acids in NCBI codon order
    table: &'static [u8; 64],
}

/// Position of a base in NCBI order, with `U` read as `T`.
fn base_index(base: u8) -> Option<usize> {
    match base.to_ascii_uppercase() {
        b'T' | b'U' => Some(0),
        b'C' => Some(1),
        b'A' => Some(2),
        b'G' => Some(3),
        _ => None,
    }
}

impl GeneticCode {
    /// The standard code.
    pub fn standard() -> Self {
        Self {
            id: 1,
            name: "Standard",
            table: STANDARD_NCBIEAA,
        }
    }

    /// Translates a single codon to an amino acid.
    ///
    /// # Rules:
    /// - Case is ignored and `U` is read as `T`
    /// - Stop codons give `*`
    /// - Anything that is not three of A, C, G, T/U gives `X`
    pub fn translate_codon(&self, codon: &[u8]) -> char {
        let [b1, b2, b3] = codon else {
            return 'X';
        };
        match (base_index(*b1), base_index(*b2), base_index(*b3)) {
            (Some(i), Some(j), Some(k)) => self.table[i * 16 + j * 4 + k] as char,
            _ => 'X',
        }
    }

    /// Translates `segment` codon by codon from its first symbol.
    ///
    /// A trailing partial codon is dropped, so the result has
    /// `len / 3` residues.
    pub fn translate(&self, segment: &str) -> String {
        self.translate_frame(segment, 0)
    }

    /// Translates starting at `frame` (0, 1 or 2; larger values act as 2).
    pub fn translate_frame(&self, sequence: &str, frame: usize) -> String {
        let chars: Vec<char> = sequence.chars().collect();
        let start = frame.min(2).min(chars.len());

        chars[start..]
            .chunks_exact(3)
            .map(|codon| {
                let mut bytes = [0u8; 3];
                for (slot, c) in bytes.iter_mut().zip(codon) {
                    *slot = if c.is_ascii() { *c as u8 } else { 0 };
                }
                self.translate_codon(&bytes)
            })
            .collect()
    }

    /// True for the codons this table reads as stop.
    pub fn is_stop(&self, codon: &[u8]) -> bool {
        self.translate_codon(codon) == '*'
    }
}

impl Default for GeneticCode {
    fn default() -> Self {
        Self::standard()
    }
}

/// Translates a DNA (or RNA) segment with the standard code.
pub fn translate(segment: &str) -> String {
    GeneticCode::standard().translate(segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_code_translation() {
        let standard = GeneticCode::standard();

        assert_eq!(standard.translate_codon(b"ATG"), 'M'); // Start codon
        assert_eq!(standard.translate_codon(b"TAA"), '*');
        assert_eq!(standard.translate_codon(b"TAG"), '*');
        assert_eq!(standard.translate_codon(b"TGA"), '*');
        assert_eq!(standard.translate_codon(b"TTT"), 'F');
        assert_eq!(standard.translate_codon(b"GGG"), 'G');
        assert_eq!(standard.translate_codon(b"TGG"), 'W');
        assert_eq!(standard.translate_codon(b"GAT"), 'D');
    }

    #[test]
    fn test_table_has_three_stops() {
        let standard = GeneticCode::standard();
        let bases = *b"TCAG";
        let mut stops = Vec::new();
        for &a in &bases {
            for &b in &bases {
                for &c in &bases {
                    if standard.is_stop(&[a, b, c]) {
                        stops.push(String::from_utf8_lossy(&[a, b, c]).into_owned());
                    }
                }
            }
        }
        assert_eq!(stops, vec!["TAA", "TAG", "TGA"]);
    }

    #[test]
    fn test_rna_translation() {
        let standard = GeneticCode::standard();
        assert_eq!(standard.translate_codon(b"AUG"), 'M');
        assert_eq!(standard.translate_codon(b"UUU"), 'F');
    }

    #[test]
    fn test_unrecognized_codons() {
        let standard = GeneticCode::standard();
        assert_eq!(standard.translate_codon(b"ATN"), 'X');
        assert_eq!(standard.translate_codon(b"NNN"), 'X');
        assert_eq!(standard.translate_codon(b"CTR"), 'X');
        assert_eq!(standard.translate_codon(b"AT"), 'X');
        assert_eq!(translate("MKVLLA"), "XX");
    }

    #[test]
    fn test_sequence_translation() {
        assert_eq!(translate("ATGGATTAG"), "MD*");
        assert_eq!(translate("atggattag"), "MD*");

        let standard = GeneticCode::standard();
        let seq = "AATGTTTTAG";
        // Frame 0: AAT GTT TTA G -> incomplete G dropped
        assert_eq!(standard.translate_frame(seq, 0), "NVL");
        assert_eq!(standard.translate_frame(seq, 1), "MF*");
        assert_eq!(standard.translate_frame(seq, 2), "CF");
    }

    #[test]
    fn test_partial_and_empty() {
        assert_eq!(translate(""), "");
        assert_eq!(translate("AT"), "");
        assert_eq!(translate("ATGA"), "M");
        assert_eq!(GeneticCode::standard().translate_frame("A", 2), "");
    }

    #[test]
    fn test_non_ascii_is_unknown() {
        assert_eq!(translate("ÄTGATG"), "XM");
    }
}
