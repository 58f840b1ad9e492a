//! Display block representation
//!
//! One [`DisplayBlock`] is produced per source line. Blocks are plain data so
//! they can be rendered to any surface or serialized straight into API responses.

use serde::{Deserialize, Serialize};

/// Heading depth. Only `##` and `###` headings are recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum HeadingLevel {
    H2,
    H3,
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> u8 {
        match level {
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(HeadingLevel::H2),
            3 => Ok(HeadingLevel::H3),
            other => Err(format!("unsupported heading level {other}")),
        }
    }
}

/// Bullet nesting depth, derived from the line's leading spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum IndentLevel {
    /// Fewer than 3 leading spaces.
    Top,
    /// 3 or 4 leading spaces.
    Nested,
    /// 5 or more leading spaces.
    Deep,
}

impl IndentLevel {
    pub fn depth(self) -> usize {
        match self {
            IndentLevel::Top => 0,
            IndentLevel::Nested => 1,
            IndentLevel::Deep => 2,
        }
    }
}

impl From<IndentLevel> for u8 {
    fn from(level: IndentLevel) -> u8 {
        level.depth() as u8
    }
}

impl TryFrom<u8> for IndentLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(IndentLevel::Top),
            1 => Ok(IndentLevel::Nested),
            2 => Ok(IndentLevel::Deep),
            other => Err(format!("unsupported indent level {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplayBlock {
    Heading {
        level: HeadingLevel,
        text: String,
    },
    VerdictParagraph {
        prefix: String,
        verdict_text: String,
        suffix: String,
    },
    /// `- **Title:**` marker introducing a nested list.
    SubsectionLabel {
        title: String,
    },
    /// `1. **Title:**` with nothing after it.
    NumberedSectionHeading {
        number: String,
        title: String,
    },
    /// `1. **Title:** description`.
    NumberedItem {
        number: String,
        title: String,
        description: String,
    },
    BulletItem {
        text: String,
        indent_level: IndentLevel,
    },
    Spacer,
    Paragraph {
        text: String,
    },
}

impl DisplayBlock {
    /// Short tag name, matching the serialized `type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            DisplayBlock::Heading { .. } => "heading",
            DisplayBlock::VerdictParagraph { .. } => "verdict_paragraph",
            DisplayBlock::SubsectionLabel { .. } => "subsection_label",
            DisplayBlock::NumberedSectionHeading { .. } => "numbered_section_heading",
            DisplayBlock::NumberedItem { .. } => "numbered_item",
            DisplayBlock::BulletItem { .. } => "bullet_item",
            DisplayBlock::Spacer => "spacer",
            DisplayBlock::Paragraph { .. } => "paragraph",
        }
    }
}
