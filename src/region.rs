//! Half-open regions over the canonical sequence and the annotation records
//! attached to them.

use std::fmt;
use std::ops::Range;

use thiserror::Error;

use crate::motif::MotifCategory;

/// Errors raised when a region does not describe a valid span.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegionError {
    #[error("Empty or reversed region: start {start} is not before end {end}")]
    Empty { start: usize, end: usize },

    #[error("Region {start}..{end} extends past the sequence end ({len})")]
    OutOfBounds { start: usize, end: usize, len: usize },
}

/// A half-open interval `[start, end)` of canonical indices.
///
/// Always non-empty: `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Region {
    start: usize,
    end: usize,
}

impl Region {
    /// Creates a region, rejecting empty or reversed spans.
    pub fn new(start: usize, end: usize) -> Result<Self, RegionError> {
        if start >= end {
            return Err(RegionError::Empty { start, end });
        }
        Ok(Self { start, end })
    }

    /// Region of `len` symbols starting at `start`.
    pub fn with_len(start: usize, len: usize) -> Result<Self, RegionError> {
        Self::new(start, start.saturating_add(len))
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Regions are never empty; provided for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Checks that the region fits inside a sequence of `len` symbols.
    pub fn within(self, len: usize) -> Result<Self, RegionError> {
        if self.end > len {
            return Err(RegionError::OutOfBounds {
                start: self.start,
                end: self.end,
                len,
            });
        }
        Ok(self)
    }

    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    pub fn overlaps(&self, other: &Region) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The covered slice of `sequence`, clipped to its length.
    pub fn slice<'a>(&self, sequence: &'a str) -> &'a str {
        let end = self.end.min(sequence.len());
        let start = self.start.min(end);
        sequence.get(start..end).unwrap_or("")
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A 24-bit display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// What an annotation marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationCategory {
    /// User-defined feature
    Feature,
    /// Free-text note left by the user
    Note,
    /// Derived motif hit
    Motif(MotifCategory),
    /// Derived open reading frame
    Orf,
    /// The live selection
    Selection,
}

impl AnnotationCategory {
    /// True for annotations recomputed from the sequence rather than stored.
    pub fn is_derived(self) -> bool {
        matches!(self, AnnotationCategory::Motif(_) | AnnotationCategory::Orf)
    }
}

impl fmt::Display for AnnotationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationCategory::Feature => f.write_str("feature"),
            AnnotationCategory::Note => f.write_str("note"),
            AnnotationCategory::Motif(category) => write!(f, "{}", category),
            AnnotationCategory::Orf => f.write_str("orf"),
            AnnotationCategory::Selection => f.write_str("selection"),
        }
    }
}

/// A labelled, colored region handed to a viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub region: Region,
    pub label: String,
    pub color: Rgb,
    pub category: AnnotationCategory,
}

impl Annotation {
    pub fn new(
        region: Region,
        label: impl Into<String>,
        color: Rgb,
        category: AnnotationCategory,
    ) -> Self {
        Self {
            region,
            label: label.into(),
            color,
            category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_rejects_empty() {
        assert_eq!(
            Region::new(3, 3),
            Err(RegionError::Empty { start: 3, end: 3 })
        );
        assert!(Region::new(4, 2).is_err());
        assert!(Region::with_len(5, 0).is_err());
    }

    #[test]
    fn test_region_accessors() {
        let r = Region::new(2, 5).unwrap();
        assert_eq!(r.start(), 2);
        assert_eq!(r.end(), 5);
        assert_eq!(r.len(), 3);
        assert!(r.contains(2));
        assert!(r.contains(4));
        assert!(!r.contains(5));
        assert_eq!(r.range(), 2..5);
        assert_eq!(r.to_string(), "2..5");
    }

    #[test]
    fn test_region_within() {
        let r = Region::new(0, 10).unwrap();
        assert!(r.within(10).is_ok());
        assert!(matches!(
            r.within(9),
            Err(RegionError::OutOfBounds { len: 9, .. })
        ));
    }

    #[test]
    fn test_region_overlaps() {
        let a = Region::new(0, 3).unwrap();
        let b = Region::new(3, 6).unwrap();
        let c = Region::new(2, 4).unwrap();
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
    }

    #[test]
    fn test_region_slice_clips() {
        let r = Region::new(2, 8).unwrap();
        assert_eq!(r.slice("ATGCCC"), "GCCC");
        assert_eq!(r.slice("A"), "");
    }
}
