//! Renderers for display blocks
//!
//! Transforms formatted blocks into plain text, ANSI (terminal) and HTML.
//! Every renderer emits exactly one line (or element) per block.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::formatter::trim_blank;
use crate::ir::{DisplayBlock, HeadingLevel};

static INLINE_BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";
const DIM: &str = "\x1b[2m";

pub struct Renderer;

impl Renderer {
    /// Renders blocks to plain text, dropping `**` markers.
    pub fn to_plain_text(blocks: &[DisplayBlock]) -> String {
        let mut output = String::new();
        for block in blocks {
            let line = match block {
                DisplayBlock::Heading { text, .. } => text.clone(),
                DisplayBlock::VerdictParagraph {
                    prefix,
                    verdict_text,
                    suffix,
                } => format!("{prefix}Verdict: {}{suffix}", trim_blank(verdict_text)),
                DisplayBlock::SubsectionLabel { title } => format!("  {title}:"),
                DisplayBlock::NumberedSectionHeading { number, title } => format!("{number}. {title}"),
                DisplayBlock::NumberedItem {
                    number,
                    title,
                    description,
                } => format!("{number}. {title}: {}", strip_bold(description)),
                DisplayBlock::BulletItem { text, indent_level } => {
                    format!("{}- {}", bullet_indent(indent_level.depth()), strip_bold(text))
                }
                DisplayBlock::Spacer => String::new(),
                DisplayBlock::Paragraph { text } => strip_bold(text),
            };
            output.push_str(&line);
            output.push('\n');
        }
        output
    }

    /// Renders blocks with ANSI styling for terminals.
    pub fn to_ansi(blocks: &[DisplayBlock]) -> String {
        let mut output = String::new();
        for block in blocks {
            let line = match block {
                DisplayBlock::Heading {
                    level: HeadingLevel::H2,
                    text,
                } => format!("{BOLD}{BLUE}{}{RESET}", text.to_uppercase()),
                DisplayBlock::Heading {
                    level: HeadingLevel::H3,
                    text,
                } => format!("{BOLD}{CYAN}{text}{RESET}"),
                DisplayBlock::VerdictParagraph {
                    prefix,
                    verdict_text,
                    suffix,
                } => format!(
                    "{BOLD}{prefix}{BLUE}Verdict: {}{RESET}{BOLD}{suffix}{RESET}",
                    trim_blank(verdict_text)
                ),
                DisplayBlock::SubsectionLabel { title } => format!("  {BOLD}{title}:{RESET}"),
                DisplayBlock::NumberedSectionHeading { number, title } => {
                    format!("{BOLD}{number}. {title}{RESET}")
                }
                DisplayBlock::NumberedItem {
                    number,
                    title,
                    description,
                } => format!("{number}. {BOLD}{title}:{RESET} {}", ansi_bold(description)),
                DisplayBlock::BulletItem { text, indent_level } => format!(
                    "{}{DIM}•{RESET} {}",
                    bullet_indent(indent_level.depth()),
                    ansi_bold(text)
                ),
                DisplayBlock::Spacer => String::new(),
                DisplayBlock::Paragraph { text } => ansi_bold(text),
            };
            output.push_str(&line);
            output.push('\n');
        }
        output
    }

    /// Renders blocks to an HTML fragment, one element per block.
    pub fn to_html(blocks: &[DisplayBlock]) -> String {
        let mut output = String::new();
        for block in blocks {
            let element = match block {
                DisplayBlock::Heading {
                    level: HeadingLevel::H2,
                    text,
                } => format!("<h2>{}</h2>", escape_html(text)),
                DisplayBlock::Heading {
                    level: HeadingLevel::H3,
                    text,
                } => format!("<h3>{}</h3>", escape_html(text)),
                DisplayBlock::VerdictParagraph {
                    prefix,
                    verdict_text,
                    suffix,
                } => format!(
                    "<p class=\"verdict-line\">{}<span class=\"verdict\">Verdict: {}</span>{}</p>",
                    escape_html(prefix),
                    escape_html(trim_blank(verdict_text)),
                    escape_html(suffix)
                ),
                DisplayBlock::SubsectionLabel { title } => {
                    format!("<p class=\"subsection\">{}:</p>", escape_html(title))
                }
                DisplayBlock::NumberedSectionHeading { number, title } => format!(
                    "<p class=\"section\">{}. {}</p>",
                    escape_html(number),
                    escape_html(title)
                ),
                DisplayBlock::NumberedItem {
                    number,
                    title,
                    description,
                } => format!(
                    "<div class=\"item\"><p>{}. <span class=\"item-title\">{}:</span> {}</p></div>",
                    escape_html(number),
                    escape_html(title),
                    html_inline(description)
                ),
                DisplayBlock::BulletItem { text, indent_level } => format!(
                    "<li class=\"indent-{}\">{}</li>",
                    indent_level.depth(),
                    html_inline(text)
                ),
                DisplayBlock::Spacer => "<div class=\"spacer\"></div>".to_string(),
                DisplayBlock::Paragraph { text } => format!("<p>{}</p>", html_inline(text)),
            };
            output.push_str(&element);
            output.push('\n');
        }
        output
    }
}

fn bullet_indent(depth: usize) -> String {
    "  ".repeat(depth + 1)
}

fn strip_bold(text: &str) -> String {
    INLINE_BOLD.replace_all(text, "$1").into_owned()
}

fn ansi_bold(text: &str) -> String {
    INLINE_BOLD
        .replace_all(text, |caps: &Captures| format!("{BOLD}{}{RESET}", &caps[1]))
        .into_owned()
}

/// Escapes text and turns `**bold**` runs into `<strong>`.
fn html_inline(text: &str) -> String {
    let mut output = String::new();
    let mut last = 0;
    for caps in INLINE_BOLD.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        output.push_str(&escape_html(&text[last..whole.start()]));
        output.push_str("<strong>");
        output.push_str(&escape_html(inner.as_str()));
        output.push_str("</strong>");
        last = whole.end();
    }
    output.push_str(&escape_html(&text[last..]));
    output
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
