//! Open reading frame detection.

use crate::motif::{find_all_occurrences, START_CODONS, STOP_CODONS};
use crate::region::Region;

/// Shortest ORF reported, in nucleotides (start and stop codons included).
pub const MIN_ORF_LENGTH: usize = 30;

/// A start-to-stop span read in a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orf {
    /// Covers the start codon through the end of the stop codon
    pub region: Region,
}

impl Orf {
    pub fn start(&self) -> usize {
        self.region.start()
    }

    pub fn end(&self) -> usize {
        self.region.end()
    }

    /// Length in nucleotides; always a multiple of 3.
    pub fn length(&self) -> usize {
        self.region.len()
    }

    /// Reading frame relative to the sequence start (0, 1 or 2).
    pub fn frame(&self) -> usize {
        self.start() % 3
    }
}

fn is_stop_codon(codon: &[u8]) -> bool {
    STOP_CODONS.iter().any(|stop| stop.as_bytes() == codon)
}

/// Finds ORFs of at least [`MIN_ORF_LENGTH`] nucleotides, longest first.
///
/// Each `ATG` is extended codon by codon to the nearest in-frame stop. A start
/// with no in-frame stop before the end of the sequence yields nothing: ORFs
/// running off the 3' end are not reported. Nested starts sharing one stop are
/// reported separately. Equal lengths keep their start order.
pub fn find_orfs(sequence: &str) -> Vec<Orf> {
    let upper = sequence.to_ascii_uppercase();
    let bytes = upper.as_bytes();
    let mut orfs = Vec::new();

    for start_codon in START_CODONS {
        for start in find_all_occurrences(&upper, start_codon) {
            let mut i = start + 3;
            while i + 3 <= bytes.len() {
                if is_stop_codon(&bytes[i..i + 3]) {
                    let end = i + 3;
                    if end - start >= MIN_ORF_LENGTH {
                        if let Ok(region) = Region::new(start, end) {
                            orfs.push(Orf { region });
                        }
                    }
                    break;
                }
                i += 3;
            }
        }
    }

    // Stable: ties stay in start order
    orfs.sort_by(|a, b| b.length().cmp(&a.length()));
    orfs
}
