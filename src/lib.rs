//! # seqforge - Sequence analysis and a terminal sequence editor
//!
//! The analysis core takes a raw character string and produces everything
//! derived from it in one pass:
//! - `alphabet`: sanitization into the canonical alphabet and DNA/RNA/protein classification
//! - `motif`: literal scans for start/stop codons, restriction sites and promoter boxes
//! - `orf`: open reading frames, longest first
//! - `composition`: GC content and per-symbol counts
//! - `genetic_code`: codon translation with the standard code
//! - `coords`: index mapping between the raw sequence and its grouped-by-3 display
//! - `region`: validated half-open regions and annotations
//! - `report`: the whole analysis of one version of the text
//!
//! The editor is built on top of it:
//! - `host`: injected assistant and viewer capabilities
//! - `fasta`: text extraction from sequence files
//! - `config`, `logging`: settings and the log file
//! - `model`: editor state and edit operations
//! - `highlight`: per-position annotation lookup for rendering
//! - `event`: keyboard and mouse handling (Vim-style navigation)
//! - `ui`: TUI rendering with ratatui
//! - `controller`: terminal setup and the event loop
//!
//! ## Example
//!
//! ```
//! use seqforge::{classify, find_orfs, gc_content, sanitize, SequenceKind};
//!
//! let canonical = sanitize("atg aaa taa\n");
//! assert_eq!(canonical, "ATGAAATAA");
//! assert_eq!(classify(&canonical), SequenceKind::Dna);
//! assert!(find_orfs(&canonical).is_empty()); // shorter than 30 nt
//! assert!((gc_content(&canonical) - 100.0 / 9.0).abs() < 1e-9);
//! ```

pub mod alphabet;
pub mod composition;
pub mod config;
pub mod controller;
pub mod coords;
pub mod event;
pub mod fasta;
pub mod genetic_code;
pub mod highlight;
pub mod host;
pub mod logging;
pub mod model;
pub mod motif;
pub mod orf;
pub mod region;
pub mod report;
pub mod ui;

pub use alphabet::{classify, sanitize, Sequence, SequenceKind};
pub use composition::{count_symbols, gc_content, Composition};
pub use coords::{display_of, raw_of, DisplayMode};
pub use genetic_code::translate;
pub use motif::{find_all_occurrences, find_regions, MotifRegions};
pub use orf::{find_orfs, Orf};
pub use region::{Annotation, Region};
pub use report::SequenceReport;
