//! Line classifier for analysis text.
//!
//! Analyzer answers follow a loose markdown subset: `##`/`###` headings, a
//! single `**Verdict:` line, numbered bold section titles and nested `-`
//! bullets. Each line is classified on its own by an ordered rule table; the
//! first rule that matches decides the block. No state carries across lines.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ir::{DisplayBlock, HeadingLevel, IndentLevel};

const VERDICT_MARKER: &str = "**Verdict:";

// A title's colon may sit inside or right after the closing `**`
// (`**Title:**` or `**Title**:`); it is never part of the captured title.

/// First `**bold**` run on a line.
static BOLD_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+?):?\*\*").unwrap());

/// `1. **Title**`, `1. **Title:**` or `1. **Title**:` and nothing else.
static NUMBERED_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)\.\s\*\*([^*]+?):?\*\*:?$").unwrap());

/// `1. **Title:**` or `1. **Title**:` followed by a non-blank description.
/// A doubled colon (`**Title:**:`) is swallowed with the prefix.
static NUMBERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)\.\s\*\*([^*]+?)(?::\*\*|\*\*:):?\s*(\S.*)$").unwrap());

/// Whitespace as text editors and browsers see it: Unicode `White_Space`
/// plus the byte order mark, which `str::trim` keeps.
fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

pub(crate) fn trim_blank(s: &str) -> &str {
    s.trim_matches(is_blank)
}

/// A single classification rule.
pub type Rule = fn(&str) -> Option<DisplayBlock>;

/// Rules in priority order. Several patterns can match the same line
/// (`- **Label:**` is also a bullet), so the order is part of the contract.
pub const RULES: &[(&str, Rule)] = &[
    ("heading2", heading2),
    ("heading3", heading3),
    ("verdict", verdict),
    ("subsection_label", subsection_label),
    ("numbered_section_heading", numbered_section_heading),
    ("numbered_item", numbered_item),
    ("deep_bullet", deep_bullet),
    ("nested_bullet", nested_bullet),
    ("bullet", bullet),
    ("spacer", spacer),
];

/// Format a full analysis response into display blocks, one per line.
pub fn format(text: &str) -> Vec<DisplayBlock> {
    text.split('\n').map(classify_line).collect()
}

/// Classify a single line. Falls back to a plain paragraph.
pub fn classify_line(line: &str) -> DisplayBlock {
    RULES
        .iter()
        .find_map(|(_, rule)| rule(line))
        .unwrap_or_else(|| DisplayBlock::Paragraph {
            text: line.to_string(),
        })
}

pub fn heading2(line: &str) -> Option<DisplayBlock> {
    let rest = line.strip_prefix("## ")?;
    Some(DisplayBlock::Heading {
        level: HeadingLevel::H2,
        text: trim_blank(rest).to_string(),
    })
}

pub fn heading3(line: &str) -> Option<DisplayBlock> {
    let rest = line.strip_prefix("### ")?;
    Some(DisplayBlock::Heading {
        level: HeadingLevel::H3,
        text: trim_blank(rest).to_string(),
    })
}

/// `prefix **Verdict: text** suffix`. The verdict text runs to the next `**`;
/// the suffix runs from there to the following `**` or the end of the line.
pub fn verdict(line: &str) -> Option<DisplayBlock> {
    if !line.contains(VERDICT_MARKER) {
        return None;
    }
    let mut parts = line.split(VERDICT_MARKER);
    let prefix = parts.next().unwrap_or("");
    let content = parts.next().unwrap_or("");

    let mut pieces = content.split("**");
    let verdict_text = pieces.next().unwrap_or("");
    let suffix = pieces.next().unwrap_or("");

    Some(DisplayBlock::VerdictParagraph {
        prefix: prefix.to_string(),
        verdict_text: verdict_text.to_string(),
        suffix: suffix.to_string(),
    })
}

pub fn subsection_label(line: &str) -> Option<DisplayBlock> {
    if !(trim_blank(line).starts_with("- **") && line.contains(":**")) {
        return None;
    }
    let title = BOLD_RUN
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    Some(DisplayBlock::SubsectionLabel { title })
}

pub fn numbered_section_heading(line: &str) -> Option<DisplayBlock> {
    let caps = NUMBERED_SECTION.captures(line.trim_end_matches(is_blank))?;
    Some(DisplayBlock::NumberedSectionHeading {
        number: caps[1].to_string(),
        title: caps[2].to_string(),
    })
}

pub fn numbered_item(line: &str) -> Option<DisplayBlock> {
    let caps = NUMBERED_ITEM.captures(line)?;
    Some(DisplayBlock::NumberedItem {
        number: caps[1].to_string(),
        title: caps[2].to_string(),
        description: trim_blank(&caps[3]).to_string(),
    })
}

fn bullet_text(line: &str) -> Option<String> {
    trim_blank(line).strip_prefix("- ").map(str::to_string)
}

pub fn deep_bullet(line: &str) -> Option<DisplayBlock> {
    if !line.starts_with("     ") {
        return None;
    }
    Some(DisplayBlock::BulletItem {
        text: bullet_text(line)?,
        indent_level: IndentLevel::Deep,
    })
}

pub fn nested_bullet(line: &str) -> Option<DisplayBlock> {
    // 5+ spaces were already taken by `deep_bullet`.
    if !line.starts_with("   ") {
        return None;
    }
    Some(DisplayBlock::BulletItem {
        text: bullet_text(line)?,
        indent_level: IndentLevel::Nested,
    })
}

pub fn bullet(line: &str) -> Option<DisplayBlock> {
    Some(DisplayBlock::BulletItem {
        text: bullet_text(line)?,
        indent_level: IndentLevel::Top,
    })
}

pub fn spacer(line: &str) -> Option<DisplayBlock> {
    trim_blank(line).is_empty().then_some(DisplayBlock::Spacer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use placefinder_core::DEFAULT_ANALYSIS;

    fn single(line: &str) -> DisplayBlock {
        let blocks = format(line);
        assert_eq!(blocks.len(), 1, "expected one block for {line:?}");
        blocks.into_iter().next().unwrap()
    }

    fn bullet_item(text: &str, indent_level: IndentLevel) -> DisplayBlock {
        DisplayBlock::BulletItem {
            text: text.into(),
            indent_level,
        }
    }

    #[test]
    fn headings() {
        assert_eq!(
            single("## Title"),
            DisplayBlock::Heading {
                level: HeadingLevel::H2,
                text: "Title".into()
            }
        );
        assert_eq!(
            single("### Sub"),
            DisplayBlock::Heading {
                level: HeadingLevel::H3,
                text: "Sub".into()
            }
        );
        assert_eq!(
            single("##   Padded  "),
            DisplayBlock::Heading {
                level: HeadingLevel::H2,
                text: "Padded".into()
            }
        );
    }

    #[test]
    fn heading_needs_space_after_hashes() {
        assert_eq!(
            single("##NoSpace"),
            DisplayBlock::Paragraph {
                text: "##NoSpace".into()
            }
        );
        assert!(matches!(single("#### Deeper"), DisplayBlock::Paragraph { .. }));
    }

    #[test]
    fn verdict_line_splits_into_parts() {
        let block = single("🌍 **Verdict: X, Y (98% confidence)**");
        let DisplayBlock::VerdictParagraph {
            prefix,
            verdict_text,
            suffix,
        } = block
        else {
            panic!("expected a verdict paragraph");
        };
        assert!(prefix.contains('🌍'));
        assert!(verdict_text.contains("X, Y (98% confidence)"));
        assert_eq!(suffix, "");
    }

    #[test]
    fn verdict_keeps_trailing_text() {
        assert_eq!(
            single("Result: **Verdict: Rome** (likely)"),
            DisplayBlock::VerdictParagraph {
                prefix: "Result: ".into(),
                verdict_text: " Rome".into(),
                suffix: " (likely)".into(),
            }
        );
    }

    #[test]
    fn verdict_without_closing_marker() {
        assert_eq!(
            single("**Verdict: unsure"),
            DisplayBlock::VerdictParagraph {
                prefix: "".into(),
                verdict_text: " unsure".into(),
                suffix: "".into(),
            }
        );
    }

    #[test]
    fn verdict_beats_headings_only_when_not_a_heading() {
        assert!(matches!(
            single("## **Verdict: Paris**"),
            DisplayBlock::Heading { .. }
        ));
        assert!(matches!(
            single("- **Verdict: Paris**"),
            DisplayBlock::VerdictParagraph { .. }
        ));
    }

    #[test]
    fn subsection_label_wins_over_bullet() {
        assert_eq!(
            single("   - **Seasonal Recommendations:**"),
            DisplayBlock::SubsectionLabel {
                title: "Seasonal Recommendations".into()
            }
        );
        assert_eq!(
            single("- **Label:**"),
            DisplayBlock::SubsectionLabel {
                title: "Label".into()
            }
        );
    }

    #[test]
    fn subsection_label_takes_first_bold_run() {
        assert_eq!(
            single("   - **Coordinates:** 47.5022° N, 19.0347° E"),
            DisplayBlock::SubsectionLabel {
                title: "Coordinates".into()
            }
        );
    }

    #[test]
    fn subsection_label_without_bold_run_has_empty_title() {
        assert_eq!(
            single("- **a*b:**"),
            DisplayBlock::SubsectionLabel { title: "".into() }
        );
    }

    #[test]
    fn bold_bullet_without_colon_marker_is_a_bullet() {
        assert_eq!(
            single("   - **Matthias Church** (Mátyás-templom): Gothic-style church"),
            bullet_item(
                "**Matthias Church** (Mátyás-templom): Gothic-style church",
                IndentLevel::Nested
            )
        );
    }

    #[test]
    fn numbered_section_heading() {
        assert_eq!(
            single("1. **Architectural Features:**"),
            DisplayBlock::NumberedSectionHeading {
                number: "1".into(),
                title: "Architectural Features".into()
            }
        );
        assert_eq!(
            single("12. **Getting There**:"),
            DisplayBlock::NumberedSectionHeading {
                number: "12".into(),
                title: "Getting There".into()
            }
        );
        assert_eq!(
            single("3. **Insider Tips**"),
            DisplayBlock::NumberedSectionHeading {
                number: "3".into(),
                title: "Insider Tips".into()
            }
        );
    }

    #[test]
    fn numbered_item_with_description() {
        assert_eq!(
            single("1. **Coordinates**: 47.5N, 19.0E"),
            DisplayBlock::NumberedItem {
                number: "1".into(),
                title: "Coordinates".into(),
                description: "47.5N, 19.0E".into()
            }
        );
    }

    #[test]
    fn numbered_item_with_colon_inside_bold_run() {
        assert_eq!(
            single("1. **Coordinates:** 47.5N, 19.0E"),
            DisplayBlock::NumberedItem {
                number: "1".into(),
                title: "Coordinates".into(),
                description: "47.5N, 19.0E".into()
            }
        );
        assert_eq!(
            single("2. **Address:**Szentháromság tér"),
            DisplayBlock::NumberedItem {
                number: "2".into(),
                title: "Address".into(),
                description: "Szentháromság tér".into()
            }
        );
    }

    #[test]
    fn numbered_title_with_trailing_space_is_a_heading() {
        assert_eq!(
            single("1. **Architectural Features:** "),
            DisplayBlock::NumberedSectionHeading {
                number: "1".into(),
                title: "Architectural Features".into()
            }
        );
        assert_eq!(
            single("4. **Nearby**:\t"),
            DisplayBlock::NumberedSectionHeading {
                number: "4".into(),
                title: "Nearby".into()
            }
        );
    }

    #[test]
    fn numbered_item_drops_doubled_colon() {
        assert_eq!(
            single("1. **A:**: rest"),
            DisplayBlock::NumberedItem {
                number: "1".into(),
                title: "A".into(),
                description: "rest".into()
            }
        );
    }

    #[test]
    fn numbered_title_without_colon_and_trailing_text_is_a_paragraph() {
        assert!(matches!(
            single("1. **Title** more words"),
            DisplayBlock::Paragraph { .. }
        ));
    }

    #[test]
    fn numbered_lines_need_bold_title() {
        assert!(matches!(single("1. Plain item"), DisplayBlock::Paragraph { .. }));
        assert!(matches!(single(" 1. **Indented**"), DisplayBlock::Paragraph { .. }));
        assert!(matches!(single("١. **Arabic digits**"), DisplayBlock::Paragraph { .. }));
    }

    #[test]
    fn bullets_by_indent() {
        assert_eq!(single("     - deep bullet"), bullet_item("deep bullet", IndentLevel::Deep));
        assert_eq!(single("        - deeper"), bullet_item("deeper", IndentLevel::Deep));
        assert_eq!(single("    - four"), bullet_item("four", IndentLevel::Nested));
        assert_eq!(single("   - three"), bullet_item("three", IndentLevel::Nested));
        assert_eq!(single("  - two"), bullet_item("two", IndentLevel::Top));
        assert_eq!(single("- top"), bullet_item("top", IndentLevel::Top));
        assert_eq!(single("\t- tabbed"), bullet_item("tabbed", IndentLevel::Top));
    }

    #[test]
    fn byte_order_mark_counts_as_whitespace() {
        assert_eq!(single("\u{FEFF}- bom bullet"), bullet_item("bom bullet", IndentLevel::Top));
        assert_eq!(single("\u{FEFF}"), DisplayBlock::Spacer);
        assert_eq!(
            single("\u{FEFF}- **Label:**"),
            DisplayBlock::SubsectionLabel {
                title: "Label".into()
            }
        );
    }

    #[test]
    fn dash_without_space_is_a_paragraph() {
        assert_eq!(
            single("-not a bullet"),
            DisplayBlock::Paragraph {
                text: "-not a bullet".into()
            }
        );
    }

    #[test]
    fn empty_and_whitespace_lines_are_spacers() {
        assert_eq!(single(""), DisplayBlock::Spacer);
        assert_eq!(single("   "), DisplayBlock::Spacer);
        assert_eq!(single("\t"), DisplayBlock::Spacer);
    }

    #[test]
    fn plain_paragraph_is_unmodified() {
        assert_eq!(
            single("Plain sentence."),
            DisplayBlock::Paragraph {
                text: "Plain sentence.".into()
            }
        );
        assert_eq!(
            single("  indented text "),
            DisplayBlock::Paragraph {
                text: "  indented text ".into()
            }
        );
    }

    #[test]
    fn one_block_per_line_in_order() {
        let text = "## A\n\n- b\n1. **C:**\nplain\n";
        let blocks = format(text);
        assert_eq!(blocks.len(), text.split('\n').count());
        let kinds: Vec<_> = blocks.iter().map(DisplayBlock::kind).collect();
        assert_eq!(
            kinds,
            vec![
                "heading",
                "spacer",
                "bullet_item",
                "numbered_section_heading",
                "paragraph",
                "spacer"
            ]
        );
    }

    #[test]
    fn default_analysis_line_count_matches() {
        let blocks = format(DEFAULT_ANALYSIS);
        assert_eq!(blocks.len(), DEFAULT_ANALYSIS.split('\n').count());
        assert_eq!(
            blocks
                .iter()
                .filter(|b| matches!(b, DisplayBlock::VerdictParagraph { .. }))
                .count(),
            1
        );
        assert!(blocks.contains(&DisplayBlock::SubsectionLabel {
            title: "Seasonal Recommendations".into()
        }));
        assert!(blocks.contains(&bullet_item(
            "Spring (April-May): Comfortable temperatures and fewer crowds",
            IndentLevel::Deep
        )));
    }

    #[test]
    fn deterministic() {
        assert_eq!(format(DEFAULT_ANALYSIS), format(DEFAULT_ANALYSIS));
    }

    #[test]
    fn classification_ignores_surrounding_lines() {
        let lines: Vec<&str> = DEFAULT_ANALYSIS.split('\n').collect();
        let in_context = format(DEFAULT_ANALYSIS);
        for (line, block) in lines.iter().zip(&in_context) {
            assert_eq!(&classify_line(line), block, "line {line:?}");
        }
        // Reordering lines permutes blocks the same way.
        let reversed: Vec<&str> = lines.iter().rev().copied().collect();
        let mut expected = in_context.clone();
        expected.reverse();
        assert_eq!(format(&reversed.join("\n")), expected);
    }

    #[test]
    fn each_rule_declines_plain_text() {
        for (name, rule) in RULES {
            assert!(rule("Plain sentence.").is_none(), "rule {name} matched plain text");
        }
    }

    #[test]
    fn crlf_lines_keep_carriage_return_in_paragraphs() {
        let blocks = format("Line one\r\nLine two");
        assert_eq!(
            blocks,
            vec![
                DisplayBlock::Paragraph {
                    text: "Line one\r".into()
                },
                DisplayBlock::Paragraph {
                    text: "Line two".into()
                },
            ]
        );
    }
}
