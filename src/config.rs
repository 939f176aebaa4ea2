//! Editor settings resolved from the command line.

use std::time::Duration;

use crate::coords::DisplayMode;

/// Settings the editor starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorConfig {
    /// Initial sequence layout
    pub display_mode: DisplayMode,
    /// Reading frame (0..=2) used by `:translate`
    pub reading_frame: usize,
    /// Event poll timeout
    pub tick_rate: Duration,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            display_mode: DisplayMode::Ungrouped,
            reading_frame: 0,
            tick_rate: Duration::from_millis(50),
        }
    }
}

impl EditorConfig {
    /// Builds a config from CLI values; `reading_frame` is 1-based.
    pub fn new(grouped: bool, reading_frame: u8) -> Self {
        Self {
            display_mode: if grouped {
                DisplayMode::Grouped
            } else {
                DisplayMode::Ungrouped
            },
            reading_frame: usize::from(reading_frame.clamp(1, 3)) - 1,
            ..Self::default()
        }
    }
}
