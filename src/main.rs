//! seqforge - terminal sequence editor and analyzer
//!
//! ## Usage
//!
//! ```bash
//! seqforge construct.fasta            # interactive editor
//! seqforge -g construct.fasta         # start grouped by codon
//! seqforge construct.fasta -o -       # analysis report on stdout
//! seqforge construct.fasta -o - -t -r 2   # translation in frame +2
//! ```
//!
//! ## Navigation (Vim-style)
//!
//! - `h/j/k/l`: Move left/down/up/right
//! - `w/b`: Next/previous group of three
//! - `:q`: Quit
//! - `:h` or `?`: Help

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use seqforge::config::EditorConfig;
use seqforge::controller::run_app;
use seqforge::fasta::load_file;
use seqforge::genetic_code::GeneticCode;
use seqforge::host::SummaryAssistant;
use seqforge::logging;
use seqforge::model::AppState;
use seqforge::report::SequenceReport;

/// Runs CLI mode: analyze the text, optionally translate, and write to output.
fn run_cli_mode(
    text: &str,
    source: &str,
    output: &str,
    translate: bool,
    reading_frame: u8,
) -> Result<()> {
    let report = SequenceReport::analyze(text);

    let content = if translate {
        if !report.kind().is_nucleotide() {
            anyhow::bail!(
                "Cannot translate: input is a {} sequence, not DNA or RNA",
                report.kind()
            );
        }
        let frame = usize::from(reading_frame - 1);
        let protein = GeneticCode::standard().translate_frame(&report.sequence.canonical, frame);
        format!(">{} frame +{}\n{}\n", source, reading_frame, protein)
    } else {
        report.render_text()
    };

    if output == "-" {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(content.as_bytes())?;
    } else {
        let mut file = std::fs::File::create(output)?;
        file.write_all(content.as_bytes())?;
        eprintln!("Wrote {} analysis of {} symbols to {}", report.kind(), report.len(), output);
    }

    Ok(())
}

/// seqforge - a Vim-style terminal editor for DNA, RNA and protein sequences
///
/// When run without -o/--output, opens the interactive editor.
/// With -o/--output, runs in CLI mode and writes the analysis report to a file
/// (or stdout with "-").
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Sequence file (FASTA or plain text); starts with an empty buffer when omitted
    file: Option<PathBuf>,

    /// Output file (enables CLI mode). Use "-" for stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Write the translation instead of the analysis report (CLI mode)
    #[arg(short = 't', long = "translate")]
    translate: bool,

    /// Reading frame for translation (1-3, default: 1)
    #[arg(short = 'r', long = "reading-frame", default_value = "1")]
    reading_frame: u8,

    /// Start the editor with symbols grouped by three
    #[arg(short = 'g', long = "grouped")]
    grouped: bool,

    /// Write a log file to the temp directory
    #[arg(long = "log")]
    log: bool,

    /// Log debug messages (with --log)
    #[arg(long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Validate reading frame (1-3)
    if !(1..=3).contains(&args.reading_frame) {
        anyhow::bail!("Reading frame must be 1-3 (got {})", args.reading_frame);
    }

    if args.log {
        let path = logging::init(args.verbose)?;
        eprintln!("Logging to {}", path.display());
    }

    let (text, source) = match &args.file {
        Some(path) => {
            let loaded = load_file(path)?;
            let source = loaded.id.clone().unwrap_or_else(|| {
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string())
            });
            (loaded.text, Some(source))
        }
        None => (String::new(), None),
    };

    // CLI mode: output to file/stdout
    if let Some(output) = args.output {
        if args.file.is_none() {
            anyhow::bail!("CLI mode (-o) needs an input file");
        }
        let source = source.as_deref().unwrap_or("sequence");
        run_cli_mode(&text, source, &output, args.translate, args.reading_frame)?;
    } else {
        let config = EditorConfig::new(args.grouped, args.reading_frame);
        let state = AppState::new(&text, source, config, Box::new(SummaryAssistant));
        log::info!("opened {} sequence of {} symbols", state.report.kind(), state.len());
        run_app(state, &config)?;
    }

    Ok(())
}
