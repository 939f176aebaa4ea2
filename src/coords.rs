//! Index mapping between the raw sequence and its on-screen rendering.
//!
//! In grouped mode a single separator is placed after every third symbol
//! (`ATG CCC TA`), never after the last group. Raw index `i` is drawn at
//! `i + i / 3`; separators sit at display positions 3, 7, 11, ...
//!
//! Every function takes the display mode explicitly.

use crate::region::Region;

/// Symbols per group in grouped mode.
pub const GROUP_SIZE: usize = 3;

/// Character drawn between groups.
pub const SEPARATOR: char = ' ';

/// How the sequence text is laid out for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Symbols back to back
    #[default]
    Ungrouped,
    /// Codon-sized groups separated by a space
    Grouped,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Ungrouped => DisplayMode::Grouped,
            DisplayMode::Grouped => DisplayMode::Ungrouped,
        }
    }
}

/// Display position of raw index `raw`.
pub fn display_of(raw: usize, mode: DisplayMode) -> usize {
    match mode {
        DisplayMode::Ungrouped => raw,
        DisplayMode::Grouped => raw + raw / GROUP_SIZE,
    }
}

/// Raw index of display position `display`.
///
/// The result is `display` minus the separators strictly before it. A position
/// on a separator therefore maps to the first symbol of the next group, which
/// is also the exclusive end of the group before it: as a range start it
/// skips the separator, as a range end it stops before it.
pub fn raw_of(display: usize, mode: DisplayMode) -> usize {
    match mode {
        DisplayMode::Ungrouped => display,
        DisplayMode::Grouped => display - display / (GROUP_SIZE + 1),
    }
}

/// Width of the rendering of `raw_len` symbols.
pub fn display_len(raw_len: usize, mode: DisplayMode) -> usize {
    match mode {
        DisplayMode::Ungrouped => raw_len,
        DisplayMode::Grouped if raw_len == 0 => 0,
        DisplayMode::Grouped => raw_len + (raw_len - 1) / GROUP_SIZE,
    }
}

/// True when `display` holds a separator in the rendering of `raw_len` symbols.
pub fn is_separator(display: usize, raw_len: usize, mode: DisplayMode) -> bool {
    mode == DisplayMode::Grouped
        && display % (GROUP_SIZE + 1) == GROUP_SIZE
        && display < display_len(raw_len, mode)
}

/// Display span covering a raw region.
///
/// The end is the display position of the raw end, so a region ending on a
/// group boundary stops just before the separator.
pub fn display_region(region: Region, mode: DisplayMode) -> (usize, usize) {
    let start = display_of(region.start(), mode);
    let end = match mode {
        DisplayMode::Ungrouped => region.end(),
        // Position right after the last covered symbol
        DisplayMode::Grouped => display_of(region.end() - 1, mode) + 1,
    };
    (start, end)
}

/// Raw region for a display selection `[start, end)`.
///
/// Endpoints map independently and are clamped to `raw_len`. Returns `None`
/// when the selection covers no symbol, e.g. a lone separator.
pub fn raw_region(start: usize, end: usize, raw_len: usize, mode: DisplayMode) -> Option<Region> {
    let start = raw_of(start, mode).min(raw_len);
    let end = raw_of(end, mode).min(raw_len);
    Region::new(start, end).ok()
}
