//! Per-position highlight lookup used by the sequence panel.

use crate::host::{Viewer, ViewerError};
use crate::region::{Annotation, Rgb};

/// Annotations flattened to one entry per sequence position.
///
/// Later annotations paint over earlier ones.
#[derive(Debug, Clone, Default)]
pub struct HighlightLayer {
    annotations: Vec<Annotation>,
    /// Index into `annotations` of the topmost annotation at each position
    cells: Vec<Option<usize>>,
}

impl HighlightLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Topmost annotation at `pos`.
    pub fn annotation_at(&self, pos: usize) -> Option<&Annotation> {
        self.cells
            .get(pos)
            .copied()
            .flatten()
            .and_then(|idx| self.annotations.get(idx))
    }

    pub fn color_at(&self, pos: usize) -> Option<Rgb> {
        self.annotation_at(pos).map(|a| a.color)
    }

    /// Every annotation covering `pos`, bottom to top.
    pub fn annotations_covering(&self, pos: usize) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter().filter(move |a| a.region.contains(pos))
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}

impl Viewer for HighlightLayer {
    /// Keeps the annotations that fit; the first one that does not is reported.
    fn show(&mut self, sequence: &str, annotations: &[Annotation]) -> Result<(), ViewerError> {
        let len = sequence.len();
        self.annotations.clear();
        self.cells = vec![None; len];

        let mut rejected = None;
        for annotation in annotations {
            if annotation.region.within(len).is_err() {
                rejected.get_or_insert_with(|| ViewerError::OutOfRange {
                    label: annotation.label.clone(),
                    start: annotation.region.start(),
                    end: annotation.region.end(),
                    len,
                });
                continue;
            }
            let idx = self.annotations.len();
            for cell in &mut self.cells[annotation.region.range()] {
                *cell = Some(idx);
            }
            self.annotations.push(annotation.clone());
        }

        match rejected {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
