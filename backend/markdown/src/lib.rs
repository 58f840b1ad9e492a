//! Analysis text formatting and rendering.
//!
//! Classifies the markdown-subset answers returned by vision analyzers into
//! typed display blocks, one block per source line, and renders those blocks
//! for terminals and HTML pages.

pub mod formatter;
pub mod ir;
pub mod renderer;

pub use formatter::{classify_line, format, Rule, RULES};
pub use ir::{DisplayBlock, HeadingLevel, IndentLevel};
pub use renderer::{escape_html, Renderer};
