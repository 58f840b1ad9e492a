//! Terminal output utilities: status notes and analysis printing.

use std::io::Write;

use placefinder_markdown::{DisplayBlock, Renderer};

// ---------------------------------------------------------------------------
// ANSI Color/Style helpers
// ---------------------------------------------------------------------------

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM")
                .map(|t| t != "dumb")
                .unwrap_or(false))
}

// ---------------------------------------------------------------------------
// Formatted notes
// ---------------------------------------------------------------------------

/// Print a formatted INFO note to stderr.
pub fn note_info(msg: &str) {
    if supports_color() {
        eprintln!("{CYAN}{BOLD}ℹ{RESET} {msg}");
    } else {
        eprintln!("INFO: {msg}");
    }
}

/// Print a formatted WARNING note.
pub fn note_warn(msg: &str) {
    if supports_color() {
        eprintln!("{YELLOW}{BOLD}⚠{RESET} {msg}");
    } else {
        eprintln!("WARN: {msg}");
    }
}

/// Print a formatted ERROR note.
pub fn note_error(msg: &str) {
    if supports_color() {
        eprintln!("{RED}{BOLD}✗{RESET} {msg}");
    } else {
        eprintln!("ERROR: {msg}");
    }
}

/// Print a formatted SUCCESS note.
pub fn note_success(msg: &str) {
    if supports_color() {
        eprintln!("{GREEN}{BOLD}✓{RESET} {msg}");
    } else {
        eprintln!("OK: {msg}");
    }
}

// ---------------------------------------------------------------------------
// Analysis output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Terminal,
    Html,
    Json,
}

impl OutputFormat {
    pub fn from_flags(html: bool, json: bool) -> Self {
        match (html, json) {
            (true, _) => OutputFormat::Html,
            (_, true) => OutputFormat::Json,
            _ => OutputFormat::Terminal,
        }
    }
}

/// Render blocks for `format`; terminal output is styled only when color is supported.
pub fn render_blocks(blocks: &[DisplayBlock], format: OutputFormat, color: bool) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Terminal if color => Renderer::to_ansi(blocks),
        OutputFormat::Terminal => Renderer::to_plain_text(blocks),
        OutputFormat::Html => Renderer::to_html(blocks),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(blocks)?;
            json.push('\n');
            json
        }
    })
}

/// Write rendered blocks to stdout.
pub fn print_blocks(blocks: &[DisplayBlock], format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render_blocks(blocks, format, supports_color())?;
    stream_write(&mut std::io::stdout().lock(), &rendered)?;
    Ok(())
}

/// Write a chunk and flush.
pub fn stream_write(writer: &mut impl Write, chunk: &str) -> std::io::Result<()> {
    writer.write_all(chunk.as_bytes())?;
    writer.flush()
}
