//! One-shot analysis of a sequence and the products handed to viewers.
//!
//! A [`SequenceReport`] is recomputed from scratch whenever the raw text
//! changes; nothing in it is updated incrementally.

use std::fmt::Write as _;

use crate::alphabet::{Sequence, SequenceKind};
use crate::composition::{count_symbols, gc_content, Composition};
use crate::genetic_code::translate;
use crate::motif::{find_regions, MotifCategory, MotifRegions};
use crate::orf::{find_orfs, Orf};
use crate::region::{Annotation, AnnotationCategory, Rgb};

/// Highlight color per annotation category.
pub fn category_color(category: AnnotationCategory) -> Rgb {
    match category {
        AnnotationCategory::Motif(MotifCategory::StartCodon) => Rgb(44, 160, 44),
        AnnotationCategory::Motif(MotifCategory::StopCodon) => Rgb(214, 39, 40),
        AnnotationCategory::Motif(MotifCategory::RestrictionSite) => Rgb(148, 103, 189),
        AnnotationCategory::Motif(MotifCategory::Promoter) => Rgb(255, 127, 14),
        AnnotationCategory::Orf => Rgb(31, 119, 180),
        AnnotationCategory::Feature => Rgb(23, 190, 207),
        AnnotationCategory::Note => Rgb(188, 189, 34),
        AnnotationCategory::Selection => Rgb(127, 127, 127),
    }
}

/// Everything derived from one version of the input text.
#[derive(Debug, Clone, Default)]
pub struct SequenceReport {
    pub sequence: Sequence,
    pub gc_content: f64,
    pub composition: Composition,
    /// Empty for protein sequences
    pub motifs: MotifRegions,
    /// Longest first; empty for protein sequences
    pub orfs: Vec<Orf>,
    /// Frame 0 translation; `None` unless DNA or RNA
    pub translation: Option<String>,
}

impl SequenceReport {
    /// Sanitizes, classifies and analyzes `raw`.
    pub fn analyze(raw: &str) -> Self {
        Self::from_sequence(Sequence::from_raw(raw))
    }

    pub fn from_sequence(sequence: Sequence) -> Self {
        let canonical = sequence.canonical.as_str();
        let kind = sequence.kind;

        let (motifs, orfs) = if kind == SequenceKind::Protein {
            (MotifRegions::default(), Vec::new())
        } else {
            (find_regions(canonical), find_orfs(canonical))
        };

        let translation = kind.is_nucleotide().then(|| translate(canonical));

        Self {
            gc_content: gc_content(canonical),
            composition: count_symbols(canonical, kind),
            motifs,
            orfs,
            translation,
            sequence,
        }
    }

    pub fn kind(&self) -> SequenceKind {
        self.sequence.kind
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Derived annotations for a viewer: ORFs first, then motif hits by position.
    pub fn highlights(&self) -> Vec<Annotation> {
        let orfs = self.orfs.iter().enumerate().map(|(rank, orf)| {
            Annotation::new(
                orf.region,
                format!("ORF{} ({} nt, frame +{})", rank + 1, orf.length(), orf.frame() + 1),
                category_color(AnnotationCategory::Orf),
                AnnotationCategory::Orf,
            )
        });

        let motifs = self.motifs.all_by_position().into_iter().map(|hit| {
            let category = AnnotationCategory::Motif(hit.category);
            Annotation::new(hit.region, hit.pattern, category_color(category), category)
        });

        orfs.chain(motifs).collect()
    }

    /// Plain-text summary used by the CLI report mode and the offline assistant.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = writeln!(out, "Type: {}", self.kind());
        let _ = writeln!(out, "Length: {}", self.len());
        if self.kind().is_nucleotide() {
            let _ = writeln!(out, "GC content: {:.2}%", self.gc_content);
        }

        if !self.composition.is_empty() {
            let counts: Vec<String> = self
                .composition
                .iter()
                .map(|(bucket, n)| format!("{}:{}", bucket, n))
                .collect();
            let _ = writeln!(out, "Composition: {}", counts.join(" "));
        }

        if self.kind() != SequenceKind::Protein {
            for category in MotifCategory::ALL {
                let hits = self.motifs.get(category);
                let positions: Vec<String> =
                    hits.iter().map(|h| (h.region.start() + 1).to_string()).collect();
                let _ = writeln!(
                    out,
                    "{} ({}): {}",
                    category,
                    hits.len(),
                    if positions.is_empty() { "-".to_string() } else { positions.join(",") }
                );
            }

            let _ = writeln!(out, "ORFs: {}", self.orfs.len());
            for (rank, orf) in self.orfs.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "  ORF{}: {}-{} ({} nt, frame +{})",
                    rank + 1,
                    orf.start() + 1,
                    orf.end(),
                    orf.length(),
                    orf.frame() + 1
                );
            }
        }

        if let Some(protein) = &self.translation {
            let _ = writeln!(out, "Translation: {}", protein);
        }

        out
    }
}
