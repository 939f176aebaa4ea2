//! Editor state.
//!
//! This module contains the data structures behind the editor:
//! - The current analysis report and the user's stored annotations
//! - Viewport and cursor, both expressed in canonical (raw) indices
//! - Modes, selection, notifications and overlays
//!
//! Display positions only appear when the user points at the screen; they are
//! converted to raw indices through [`crate::coords`] with the current
//! display mode passed explicitly.

use std::ops::Range;

use crate::alphabet::sanitize;
use crate::config::EditorConfig;
use crate::coords::{display_of, raw_of, raw_region, DisplayMode, GROUP_SIZE};
use crate::genetic_code::GeneticCode;
use crate::highlight::HighlightLayer;
use crate::host::{self, Assistant, Notification};
use crate::motif::MotifCategory;
use crate::region::{Annotation, AnnotationCategory, Region};
use crate::report::{category_color, SequenceReport};

/// Symbols shown per screen line for a panel `width` columns wide.
///
/// Grouped lines always hold whole groups so the grouping restarts cleanly
/// at every line start.
pub fn symbols_per_line(width: usize, mode: DisplayMode) -> usize {
    match mode {
        DisplayMode::Ungrouped => width.max(1),
        DisplayMode::Grouped => ((width + 1) / (GROUP_SIZE + 1)).max(1) * GROUP_SIZE,
    }
}

/// The viewport defines which screen lines of the sequence are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Index of the first visible line
    pub first_line: usize,
    /// Number of visible lines
    pub visible_lines: usize,
    /// Panel width in display columns
    pub width: usize,
}

impl Viewport {
    pub fn new(visible_lines: usize, width: usize) -> Self {
        Self {
            first_line: 0,
            visible_lines,
            width,
        }
    }

    pub fn resize(&mut self, visible_lines: usize, width: usize) {
        self.visible_lines = visible_lines;
        self.width = width;
    }

    pub fn line_range(&self) -> Range<usize> {
        self.first_line..self.first_line + self.visible_lines
    }
}

/// Application mode for handling different input states.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Navigation
    #[default]
    Normal,
    /// Typed symbols are inserted at the cursor
    Insert,
    /// Selection grows from `anchor` to the cursor
    Visual { anchor: usize },
    /// Command input (after pressing ':')
    Command(String),
}

/// A scrollable text box drawn over the sequence panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub title: String,
    pub body: String,
}

/// The complete editor state.
pub struct AppState {
    /// Analysis of the current sequence
    pub report: SequenceReport,
    /// Record identifier or file name the sequence came from
    pub source: Option<String>,
    pub display_mode: DisplayMode,
    /// Frame (0..=2) used by `:translate`
    pub reading_frame: usize,
    /// Cursor as a canonical index
    pub cursor: usize,
    pub viewport: Viewport,
    pub mode: AppMode,
    /// Features and notes added by the user
    pub annotations: Vec<Annotation>,
    /// Derived plus stored annotations, flattened for rendering
    pub highlights: HighlightLayer,
    /// Current or last selection
    pub selection: Option<Region>,
    pub status: Option<Notification>,
    pub overlay: Option<Overlay>,
    pub show_help: bool,
    pub should_quit: bool,
    /// Screen position of the top-left sequence cell
    pub panel_origin: (u16, u16),
    assistant: Box<dyn Assistant>,
    /// (line, column) where a mouse drag started
    drag_start: Option<(usize, usize)>,
}

impl AppState {
    /// Creates the editor state for `raw` text.
    pub fn new(
        raw: &str,
        source: Option<String>,
        config: EditorConfig,
        assistant: Box<dyn Assistant>,
    ) -> Self {
        let mut state = Self {
            report: SequenceReport::analyze(raw),
            source,
            display_mode: config.display_mode,
            reading_frame: config.reading_frame,
            cursor: 0,
            viewport: Viewport::new(0, 0),
            mode: AppMode::Normal,
            annotations: Vec::new(),
            highlights: HighlightLayer::new(),
            selection: None,
            status: None,
            overlay: None,
            show_help: false,
            should_quit: false,
            panel_origin: (0, 0),
            assistant,
            drag_start: None,
        };
        state.refresh_highlights();
        if state.status.is_none() {
            state.status = Some(Notification::info(state.summary()));
        }
        state
    }

    /// One-line description of the sequence.
    pub fn summary(&self) -> String {
        let report = &self.report;
        let mut text = format!("{} {} symbols", report.kind(), report.len());
        if report.kind().is_nucleotide() {
            text.push_str(&format!(
                ", GC {:.1}%, {} ORF(s), {} motif hit(s)",
                report.gc_content,
                report.orfs.len(),
                report.motifs.total()
            ));
        }
        text
    }

    pub fn canonical(&self) -> &str {
        &self.report.sequence.canonical
    }

    pub fn len(&self) -> usize {
        self.report.len()
    }

    pub fn is_empty(&self) -> bool {
        self.report.is_empty()
    }

    /// Symbols per screen line in the current mode.
    pub fn symbols_per_line(&self) -> usize {
        symbols_per_line(self.viewport.width, self.display_mode)
    }

    /// Number of screen lines the sequence occupies (at least 1).
    ///
    /// Includes the line holding an insert cursor past the last symbol.
    pub fn line_count(&self) -> usize {
        self.max_cursor() / self.symbols_per_line() + 1
    }

    /// Canonical range shown on screen line `line`.
    pub fn line_symbols(&self, line: usize) -> Range<usize> {
        let spl = self.symbols_per_line();
        let start = (line * spl).min(self.len());
        let end = (start + spl).min(self.len());
        start..end
    }

    /// Screen (line, column) of the cursor.
    pub fn cursor_screen_position(&self) -> (usize, usize) {
        let spl = self.symbols_per_line();
        let line = self.cursor / spl;
        (line, display_of(self.cursor % spl, self.display_mode))
    }

    /// Updates the viewport size based on terminal dimensions.
    pub fn update_viewport_size(&mut self, lines: usize, width: usize) {
        self.viewport.resize(lines, width);
        self.ensure_cursor_visible();
    }

    /// Largest cursor position allowed in the current mode.
    fn max_cursor(&self) -> usize {
        if self.mode == AppMode::Insert {
            self.len()
        } else {
            self.len().saturating_sub(1)
        }
    }

    /// Moves the cursor, keeping it visible and the visual selection in sync.
    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos.min(self.max_cursor());
        if let AppMode::Visual { anchor } = self.mode {
            let start = anchor.min(self.cursor);
            let end = anchor.max(self.cursor) + 1;
            self.selection = Region::new(start, end.min(self.len())).ok();
        }
        self.ensure_cursor_visible();
    }

    pub fn move_left(&mut self) {
        self.set_cursor(self.cursor.saturating_sub(1));
    }

    pub fn move_right(&mut self) {
        self.set_cursor(self.cursor + 1);
    }

    pub fn move_up(&mut self) {
        let spl = self.symbols_per_line();
        if self.cursor >= spl {
            self.set_cursor(self.cursor - spl);
        }
    }

    pub fn move_down(&mut self) {
        let spl = self.symbols_per_line();
        if self.cursor + spl <= self.max_cursor() {
            self.set_cursor(self.cursor + spl);
        }
    }

    pub fn goto_start(&mut self) {
        self.set_cursor(0);
    }

    pub fn goto_end(&mut self) {
        self.set_cursor(usize::MAX);
    }

    /// Start of the next group of three.
    pub fn next_group(&mut self) {
        let next = (self.cursor / GROUP_SIZE + 1) * GROUP_SIZE;
        self.set_cursor(next);
    }

    /// Start of the current group, or of the previous one when already there.
    pub fn previous_group(&mut self) {
        let prev = if self.cursor % GROUP_SIZE == 0 {
            self.cursor.saturating_sub(GROUP_SIZE)
        } else {
            self.cursor - self.cursor % GROUP_SIZE
        };
        self.set_cursor(prev);
    }

    pub fn page_up(&mut self) {
        let step = self.symbols_per_line() * self.viewport.visible_lines.max(1);
        self.set_cursor(self.cursor.saturating_sub(step));
    }

    pub fn page_down(&mut self) {
        let step = self.symbols_per_line() * self.viewport.visible_lines.max(1);
        let target = (self.cursor + step).min(self.max_cursor());
        self.set_cursor(target);
    }

    /// Scrolls so the cursor line is on screen.
    fn ensure_cursor_visible(&mut self) {
        let (line, _) = self.cursor_screen_position();
        let visible = self.viewport.visible_lines.max(1);
        if line < self.viewport.first_line {
            self.viewport.first_line = line;
        } else if line >= self.viewport.first_line + visible {
            self.viewport.first_line = line + 1 - visible;
        }

        // Don't scroll past the end
        let max_first = self.line_count().saturating_sub(visible);
        self.viewport.first_line = self.viewport.first_line.min(max_first);
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
        self.ensure_cursor_visible();
    }

    pub fn toggle_display_mode(&mut self) {
        self.set_display_mode(self.display_mode.toggled());
        let name = match self.display_mode {
            DisplayMode::Grouped => "grouped by 3",
            DisplayMode::Ungrouped => "ungrouped",
        };
        self.status = Some(Notification::info(format!("Display: {}", name)));
    }

    /// Starts or ends visual selection at the cursor.
    pub fn toggle_visual(&mut self) {
        if let AppMode::Visual { .. } = self.mode {
            self.mode = AppMode::Normal;
            return;
        }
        if self.is_empty() {
            return;
        }
        self.mode = AppMode::Visual {
            anchor: self.cursor,
        };
        self.set_cursor(self.cursor);
    }

    /// Leaves visual/insert mode, or clears the selection from normal mode.
    pub fn escape(&mut self) {
        match self.mode {
            AppMode::Normal => self.selection = None,
            AppMode::Insert => {
                self.mode = AppMode::Normal;
                self.set_cursor(self.cursor);
            }
            _ => self.mode = AppMode::Normal,
        }
    }

    /// Raw selection for a drag between two screen cells of the sequence panel.
    ///
    /// Both cells are given as (line, display column); the end cell is
    /// included. Separator cells contribute no symbol.
    pub fn select_display_span(&mut self, from: (usize, usize), to: (usize, usize)) {
        let (first, last) = if from <= to { (from, to) } else { (to, from) };
        let spl = self.symbols_per_line();
        let mode = self.display_mode;

        let selection = if first.0 == last.0 {
            let line = self.line_symbols(first.0);
            raw_region(first.1, last.1 + 1, line.len(), mode)
                .and_then(|r| Region::new(r.start() + line.start, r.end() + line.start).ok())
        } else {
            let start = first.0 * spl + raw_of(first.1, mode).min(spl);
            let end = last.0 * spl + raw_of(last.1 + 1, mode).min(spl);
            Region::new(start.min(self.len()), end.min(self.len())).ok()
        };

        if let Some(region) = selection {
            self.cursor = region.start();
            self.selection = Some(region);
            self.status = Some(Notification::info(format!(
                "Selected {}-{} ({} symbols)",
                region.start() + 1,
                region.end(),
                region.len()
            )));
            self.ensure_cursor_visible();
        }
    }

    /// Maps a terminal cell to (line, display column) in the sequence panel.
    fn panel_cell(&self, column: u16, row: u16) -> Option<(usize, usize)> {
        let (x, y) = self.panel_origin;
        if column < x || row < y {
            return None;
        }
        let line_offset = usize::from(row - y);
        if line_offset >= self.viewport.visible_lines {
            return None;
        }
        Some((
            self.viewport.first_line + line_offset,
            usize::from(column - x),
        ))
    }

    pub fn mouse_down(&mut self, column: u16, row: u16) {
        self.drag_start = self.panel_cell(column, row);
        if let Some(cell) = self.drag_start {
            self.select_display_span(cell, cell);
        }
    }

    pub fn mouse_drag(&mut self, column: u16, row: u16) {
        if let (Some(start), Some(cell)) = (self.drag_start, self.panel_cell(column, row)) {
            self.select_display_span(start, cell);
        }
    }

    pub fn mouse_up(&mut self) {
        self.drag_start = None;
    }

    /// Re-runs the analysis after an edit.
    fn replace_sequence(&mut self, canonical: String) {
        self.report = SequenceReport::analyze(&canonical);
        log::debug!(
            "reanalyzed: {} symbols, kind {}, {} ORF(s)",
            self.report.len(),
            self.report.kind(),
            self.report.orfs.len()
        );
        self.refresh_highlights();
    }

    /// Hands derived and stored annotations to the highlight layer.
    pub fn refresh_highlights(&mut self) {
        let mut all = self.report.highlights();
        all.extend(self.annotations.iter().cloned());
        let canonical = &self.report.sequence.canonical;
        if let Some(note) = host::present(&mut self.highlights, canonical, &all) {
            self.status = Some(note);
        }
    }

    pub fn enter_insert_mode(&mut self) {
        self.mode = AppMode::Insert;
        self.selection = None;
        self.status = Some(Notification::info("-- INSERT --"));
    }

    /// Inserts `c` at the cursor if it is a sequence symbol.
    pub fn insert_char(&mut self, c: char) {
        let symbol = sanitize(c.encode_utf8(&mut [0; 4]));
        if symbol.is_empty() {
            self.status = Some(Notification::warning(format!("'{}' is not a sequence symbol", c)));
            return;
        }

        let pos = self.cursor.min(self.len());
        let mut canonical = self.canonical().to_string();
        canonical.insert_str(pos, &symbol);
        shift_for_insert(&mut self.annotations, pos, symbol.len());
        self.replace_sequence(canonical);
        self.set_cursor(pos + symbol.len());
    }

    /// Deletes the symbol before the cursor (insert mode backspace).
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        if let Ok(region) = Region::new(self.cursor - 1, self.cursor) {
            self.delete_region(region);
        }
    }

    /// Deletes the selection in visual mode, otherwise the symbol under the cursor.
    pub fn delete(&mut self) {
        let target = match self.mode {
            AppMode::Visual { .. } => self.selection,
            _ => Region::new(self.cursor, self.cursor + 1).ok(),
        };
        if let Some(region) = target.and_then(|r| r.within(self.len()).ok()) {
            if let AppMode::Visual { .. } = self.mode {
                self.mode = AppMode::Normal;
            }
            self.delete_region(region);
        }
    }

    fn delete_region(&mut self, region: Region) {
        let mut canonical = self.canonical().to_string();
        canonical.replace_range(region.range(), "");
        shift_for_delete(&mut self.annotations, region);
        self.selection = None;
        self.replace_sequence(canonical);
        self.set_cursor(region.start());
    }

    /// Jumps to the next motif hit after the cursor, wrapping around.
    pub fn next_motif(&mut self) {
        let target = {
            let hits = self.report.motifs.all_by_position();
            hits.iter()
                .find(|h| h.region.start() > self.cursor)
                .or_else(|| hits.first())
                .map(|h| (h.region, h.category, h.pattern))
        };
        self.jump_to_motif(target);
    }

    /// Jumps to the previous motif hit before the cursor, wrapping around.
    pub fn previous_motif(&mut self) {
        let target = {
            let hits = self.report.motifs.all_by_position();
            hits.iter()
                .rev()
                .find(|h| h.region.start() < self.cursor)
                .or_else(|| hits.last())
                .map(|h| (h.region, h.category, h.pattern))
        };
        self.jump_to_motif(target);
    }

    fn jump_to_motif(&mut self, target: Option<(Region, MotifCategory, &'static str)>) {
        match target {
            Some((region, category, pattern)) => {
                self.mode = AppMode::Normal;
                self.set_cursor(region.start());
                self.selection = Some(region);
                self.status = Some(Notification::info(format!(
                    "{} {} at {}",
                    category,
                    pattern,
                    region.start() + 1
                )));
            }
            None => self.status = Some(Notification::warning("No motif hits")),
        }
    }

    /// Selects the longest ORF.
    pub fn goto_longest_orf(&mut self) {
        match self.report.orfs.first().copied() {
            Some(orf) => {
                self.mode = AppMode::Normal;
                self.set_cursor(orf.start());
                self.selection = Some(orf.region);
                self.status = Some(Notification::info(format!(
                    "Longest ORF: {}-{} ({} nt, frame +{})",
                    orf.start() + 1,
                    orf.end(),
                    orf.length(),
                    orf.frame() + 1
                )));
            }
            None => self.status = Some(Notification::warning("No ORF of at least 30 nt")),
        }
    }

    /// Stores the selection as a user annotation.
    pub fn add_annotation(&mut self, category: AnnotationCategory, label: &str) {
        let Some(region) = self.selection else {
            self.status = Some(Notification::warning("Select a region first (v)"));
            return;
        };
        let label = if label.trim().is_empty() {
            category.to_string()
        } else {
            label.trim().to_string()
        };
        self.annotations.push(Annotation::new(
            region,
            label.clone(),
            category_color(category),
            category,
        ));
        self.refresh_highlights();
        self.status = Some(Notification::info(format!(
            "Added {} '{}' at {}-{}",
            category,
            label,
            region.start() + 1,
            region.end()
        )));
    }

    /// The live selection as a highlight annotation.
    pub fn selection_annotation(&self) -> Option<Annotation> {
        self.selection.map(|region| {
            Annotation::new(
                region,
                "selection",
                category_color(AnnotationCategory::Selection),
                AnnotationCategory::Selection,
            )
        })
    }

    /// Selected text, or the whole sequence without a selection.
    fn selected_text(&self) -> &str {
        match self.selection {
            Some(region) => region.slice(self.canonical()),
            None => self.canonical(),
        }
    }

    /// Shows the translation of the selection in the current frame.
    pub fn translate_selection(&mut self) {
        if !self.report.kind().is_nucleotide() {
            self.status = Some(Notification::warning(format!(
                "Cannot translate a {} sequence",
                self.report.kind()
            )));
            return;
        }
        let protein =
            GeneticCode::standard().translate_frame(self.selected_text(), self.reading_frame);
        self.overlay = Some(Overlay {
            title: format!("Translation (frame +{})", self.reading_frame + 1),
            body: if protein.is_empty() {
                "(shorter than one codon)".to_string()
            } else {
                protein
            },
        });
    }

    /// Sends the selection to the assistant and shows the answer.
    pub fn ask_assistant(&mut self, instruction: &str) {
        let instruction = if instruction.trim().is_empty() {
            "Describe this sequence."
        } else {
            instruction
        };
        let fragment = self.selected_text().to_string();
        match host::ask(self.assistant.as_ref(), &fragment, instruction) {
            Ok(answer) => {
                self.overlay = Some(Overlay {
                    title: "Assistant".to_string(),
                    body: answer,
                });
            }
            Err(note) => self.status = Some(note),
        }
    }

    pub fn dismiss_overlay(&mut self) {
        self.overlay = None;
        self.show_help = false;
    }

    /// Enters command mode.
    pub fn enter_command_mode(&mut self) {
        self.mode = AppMode::Command(String::new());
    }

    /// Handles a character input in command mode.
    pub fn command_input(&mut self, c: char) {
        if let AppMode::Command(ref mut cmd) = self.mode {
            cmd.push(c);
        }
    }

    /// Handles backspace in command mode.
    pub fn command_backspace(&mut self) {
        if let AppMode::Command(ref mut cmd) = self.mode {
            cmd.pop();
            if cmd.is_empty() {
                self.mode = AppMode::Normal;
            }
        }
    }

    /// Cancels command mode and returns to normal mode.
    pub fn cancel_command(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// Executes the current command.
    pub fn execute_command(&mut self) {
        let AppMode::Command(cmd) = std::mem::take(&mut self.mode) else {
            return;
        };
        let cmd = cmd.trim();
        let (name, arg) = cmd.split_once(' ').unwrap_or((cmd, ""));

        match name {
            "q" | "quit" => self.should_quit = true,
            "h" | "help" => self.show_help = true,
            "group" => self.set_display_mode(DisplayMode::Grouped),
            "ungroup" => self.set_display_mode(DisplayMode::Ungrouped),
            "toggle" => self.toggle_display_mode(),
            "translate" => self.translate_selection(),
            "frame" => match arg.trim().parse::<usize>() {
                Ok(frame @ 1..=3) => {
                    self.reading_frame = frame - 1;
                    self.status = Some(Notification::info(format!("Reading frame +{}", frame)));
                }
                _ => self.status = Some(Notification::warning("Frame must be 1, 2 or 3")),
            },
            "note" => self.add_annotation(AnnotationCategory::Note, arg),
            "ann" => self.add_annotation(AnnotationCategory::Feature, arg),
            "ask" => self.ask_assistant(arg),
            "clear" => {
                let before = self.annotations.len();
                // With a selection only the annotations touching it go
                match self.selection {
                    Some(selection) => self.annotations.retain(|a| !a.region.overlaps(&selection)),
                    None => self.annotations.clear(),
                }
                let removed = before - self.annotations.len();
                self.refresh_highlights();
                self.status =
                    Some(Notification::info(format!("Cleared {} annotation(s)", removed)));
            }
            "orf" => self.goto_longest_orf(),
            "info" => self.status = Some(Notification::info(self.summary())),
            _ => {
                if let Ok(pos) = cmd.parse::<usize>() {
                    if pos > 0 && pos <= self.len() {
                        self.set_cursor(pos - 1); // 1-indexed for user
                    } else {
                        self.status =
                            Some(Notification::warning(format!("Invalid position: {}", pos)));
                    }
                } else {
                    log::debug!("unknown command: {}", cmd);
                    self.status = Some(Notification::warning(format!("Unknown command: {}", cmd)));
                }
            }
        }
    }
}

/// Keeps annotations attached to their symbols after `len` symbols are inserted at `pos`.
fn shift_for_insert(annotations: &mut [Annotation], pos: usize, len: usize) {
    for annotation in annotations.iter_mut() {
        let (start, end) = (annotation.region.start(), annotation.region.end());
        let shifted = if start >= pos {
            Region::new(start + len, end + len)
        } else if end > pos {
            Region::new(start, end + len)
        } else {
            continue;
        };
        if let Ok(region) = shifted {
            annotation.region = region;
        }
    }
}

/// Shrinks or moves annotations after `removed` is deleted; drops emptied ones.
fn shift_for_delete(annotations: &mut Vec<Annotation>, removed: Region) {
    let map = |x: usize| {
        if x <= removed.start() {
            x
        } else if x >= removed.end() {
            x - removed.len()
        } else {
            removed.start()
        }
    };
    annotations.retain_mut(|annotation| {
        match Region::new(map(annotation.region.start()), map(annotation.region.end())) {
            Ok(region) => {
                annotation.region = region;
                true
            }
            Err(_) => false,
        }
    });
}
