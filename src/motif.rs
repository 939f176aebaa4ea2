//! Literal motif scanning.
//!
//! Motifs are fixed nucleotide strings (codons, 6 bp restriction sites,
//! bacterial and eukaryotic promoter boxes) located by exact, overlap-inclusive
//! substring search.

use std::fmt;

use crate::region::Region;

/// Start codon.
pub const START_CODONS: &[&str] = &["ATG"];

/// Standard stop codons.
pub const STOP_CODONS: &[&str] = &["TAA", "TAG", "TGA"];

/// Recognition sites of EcoRI, BamHI, HindIII, PstI, SalI and XbaI.
pub const RESTRICTION_SITES: &[&str] =
    &["GAATTC", "GGATCC", "AAGCTT", "CTGCAG", "GTCGAC", "TCTAGA"];

/// Pribnow box, -35 element and TATA box.
pub const PROMOTERS: &[&str] = &["TATAAT", "TTGACA", "TATAAA"];

/// The four motif families reported by [`find_regions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotifCategory {
    StartCodon,
    StopCodon,
    RestrictionSite,
    Promoter,
}

impl MotifCategory {
    pub const ALL: [MotifCategory; 4] = [
        MotifCategory::StartCodon,
        MotifCategory::StopCodon,
        MotifCategory::RestrictionSite,
        MotifCategory::Promoter,
    ];

    /// Literal patterns searched for this category.
    pub fn patterns(self) -> &'static [&'static str] {
        match self {
            MotifCategory::StartCodon => START_CODONS,
            MotifCategory::StopCodon => STOP_CODONS,
            MotifCategory::RestrictionSite => RESTRICTION_SITES,
            MotifCategory::Promoter => PROMOTERS,
        }
    }
}

impl fmt::Display for MotifCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MotifCategory::StartCodon => "start codon",
            MotifCategory::StopCodon => "stop codon",
            MotifCategory::RestrictionSite => "restriction site",
            MotifCategory::Promoter => "promoter",
        };
        f.write_str(name)
    }
}

/// One literal match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotifHit {
    pub region: Region,
    pub category: MotifCategory,
    pub pattern: &'static str,
}

/// Hits grouped by category, each list in pattern-table order then position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MotifRegions {
    pub start_codons: Vec<MotifHit>,
    pub stop_codons: Vec<MotifHit>,
    pub restriction_sites: Vec<MotifHit>,
    pub promoters: Vec<MotifHit>,
}

impl MotifRegions {
    pub fn get(&self, category: MotifCategory) -> &[MotifHit] {
        match category {
            MotifCategory::StartCodon => &self.start_codons,
            MotifCategory::StopCodon => &self.stop_codons,
            MotifCategory::RestrictionSite => &self.restriction_sites,
            MotifCategory::Promoter => &self.promoters,
        }
    }

    fn get_mut(&mut self, category: MotifCategory) -> &mut Vec<MotifHit> {
        match category {
            MotifCategory::StartCodon => &mut self.start_codons,
            MotifCategory::StopCodon => &mut self.stop_codons,
            MotifCategory::RestrictionSite => &mut self.restriction_sites,
            MotifCategory::Promoter => &mut self.promoters,
        }
    }

    /// All hits across categories, ordered by start position.
    pub fn all_by_position(&self) -> Vec<&MotifHit> {
        let mut hits: Vec<&MotifHit> = MotifCategory::ALL
            .iter()
            .flat_map(|&c| self.get(c).iter())
            .collect();
        hits.sort_by_key(|h| h.region);
        hits
    }

    pub fn total(&self) -> usize {
        MotifCategory::ALL.iter().map(|&c| self.get(c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Start positions of every occurrence of `pattern` in `text`, overlaps included.
///
/// The search restarts one byte past each hit, so `AA` in `AAA` is found at 0
/// and 1. An empty pattern matches nowhere.
pub fn find_all_occurrences(text: &str, pattern: &str) -> Vec<usize> {
    let mut positions = Vec::new();
    if pattern.is_empty() {
        return positions;
    }

    let mut from = 0;
    while let Some(offset) = text.get(from..).and_then(|rest| rest.find(pattern)) {
        let pos = from + offset;
        positions.push(pos);
        // Step over one whole char so `from` stays on a boundary
        from = pos + text[pos..].chars().next().map_or(1, char::len_utf8);
    }
    positions
}

/// Scans `sequence` (case-insensitive) for every motif in the fixed tables.
pub fn find_regions(sequence: &str) -> MotifRegions {
    let upper = sequence.to_ascii_uppercase();
    let mut regions = MotifRegions::default();

    for category in MotifCategory::ALL {
        let hits = regions.get_mut(category);
        for &pattern in category.patterns() {
            for pos in find_all_occurrences(&upper, pattern) {
                if let Ok(region) = Region::with_len(pos, pattern.len()) {
                    hits.push(MotifHit {
                        region,
                        category,
                        pattern,
                    });
                }
            }
        }
    }

    regions
}
