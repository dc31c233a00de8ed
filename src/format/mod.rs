//! Markdown-ish text to structured blocks and escaped HTML.
//!
//! Model output mixes bullet lines, numbered lines and prose. Lines are
//! grouped into lists by kind; everything else becomes a paragraph. Text is
//! always escaped, never interpreted as markup.

use std::sync::OnceLock;

use regex::Regex;

pub const NO_CONTENT_PLACEHOLDER: &str = "<p>No content provided.</p>";

/// Rendered content that counts as "nothing to show".
const EMPTY_RENDERINGS: [&str; 3] =
    ["<p></p>", "<p>No explanation provided.</p>", "No explanation provided."];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bulleted,
    Numbered,
}

impl ListKind {
    fn tag(&self) -> &'static str {
        match self {
            ListKind::Bulleted => "ul",
            ListKind::Numbered => "ol",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub term: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    Paragraph(String),
    List { kind: ListKind, items: Vec<String> },
    Definitions(Vec<Definition>),
}

fn numbered_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.\s").expect("numbered list pattern is valid"))
}

fn classify(line: &str) -> Option<(ListKind, &str)> {
    if line.starts_with("* ") || line.starts_with("- ") {
        return Some((ListKind::Bulleted, &line[2..]));
    }
    numbered_prefix().find(line).map(|m| (ListKind::Numbered, &line[m.end()..]))
}

pub fn parse_blocks(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut open: Option<(ListKind, Vec<String>)> = None;

    for line in text.split('\n') {
        let trimmed = line.trim();
        match classify(trimmed) {
            Some((kind, item)) => match open.as_mut() {
                Some((open_kind, items)) if *open_kind == kind => items.push(item.to_string()),
                _ => {
                    if let Some((kind, items)) = open.take() {
                        blocks.push(Block::List { kind, items });
                    }
                    open = Some((kind, vec![item.to_string()]));
                }
            },
            None => {
                if let Some((kind, items)) = open.take() {
                    blocks.push(Block::List { kind, items });
                }
                if !trimmed.is_empty() {
                    blocks.push(Block::Paragraph(trimmed.to_string()));
                }
            }
        }
    }

    if let Some((kind, items)) = open.take() {
        blocks.push(Block::List { kind, items });
    }

    blocks
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
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn render_html(blocks: &[Block]) -> String {
    let mut html = String::new();
    for block in blocks {
        match block {
            Block::Heading(text) => {
                html.push_str(&format!("<h4>{}</h4>", escape_html(text)));
            }
            Block::Paragraph(text) => {
                html.push_str(&format!("<p>{}</p>", escape_html(text)));
            }
            Block::List { kind, items } => {
                html.push_str(&format!("<{}>", kind.tag()));
                for item in items {
                    html.push_str(&format!("<li>{}</li>", escape_html(item)));
                }
                html.push_str(&format!("</{}>", kind.tag()));
            }
            Block::Definitions(entries) => {
                html.push_str("<dl>");
                for entry in entries {
                    html.push_str(&format!(
                        "<dt>{}</dt><dd>{}</dd>",
                        escape_html(&entry.term),
                        escape_html(&entry.description)
                    ));
                }
                html.push_str("</dl>");
            }
        }
    }
    html
}

/// Text suitable for narration: one line per heading, paragraph or item.
pub fn plain_text(blocks: &[Block]) -> String {
    let mut lines = Vec::new();
    for block in blocks {
        match block {
            Block::Heading(text) | Block::Paragraph(text) => lines.push(text.clone()),
            Block::List { items, .. } => lines.extend(items.iter().cloned()),
            Block::Definitions(entries) => {
                lines.extend(entries.iter().map(|e| format!("{}: {}", e.term, e.description)))
            }
        }
    }
    lines.join("\n")
}

/// Blocks for `text`, falling back to one paragraph holding the whole input
/// when no line produced structure.
pub fn format_blocks(text: &str) -> Vec<Block> {
    let blocks = parse_blocks(text);
    if blocks.is_empty() && !text.is_empty() {
        return vec![Block::Paragraph(text.to_string())];
    }
    blocks
}

pub fn format_text_with_lists(text: Option<&str>) -> String {
    match text {
        None | Some("") => NO_CONTENT_PLACEHOLDER.to_string(),
        Some(text) => render_html(&format_blocks(text)),
    }
}

/// Whether a rendered region holds something worth showing.
pub fn is_meaningful(rendered: &str) -> bool {
    let content = rendered.trim();
    !content.is_empty() && !EMPTY_RENDERINGS.contains(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_bullets_form_one_list() {
        let html = format_text_with_lists(Some("- alpha\n* beta\n- gamma"));
        assert_eq!(html, "<ul><li>alpha</li><li>beta</li><li>gamma</li></ul>");
    }

    #[test]
    fn test_mixed_blocks_in_order() {
        let text = "* cause one\n* cause two\n1. first step\n2. second step\nThe battle ended.";
        let html = format_text_with_lists(Some(text));

        assert_eq!(count(&html, "<ul>"), 1);
        assert_eq!(count(&html, "</ul>"), 1);
        assert_eq!(count(&html, "<ol>"), 1);
        assert_eq!(count(&html, "</ol>"), 1);
        assert_eq!(count(&html, "<p>"), 1);
        assert_eq!(count(&html, "</p>"), 1);

        let ul = html.find("<ul>").unwrap();
        let ol = html.find("<ol>").unwrap();
        let p = html.find("<p>").unwrap();
        assert!(ul < ol && ol < p);
        assert!(html.contains("<li>first step</li>"));
    }

    #[test]
    fn test_empty_and_missing_input() {
        assert_eq!(format_text_with_lists(None), NO_CONTENT_PLACEHOLDER);
        assert_eq!(format_text_with_lists(Some("")), NO_CONTENT_PLACEHOLDER);
        // Whitespace produces no blocks, so it is wrapped as-is.
        assert_eq!(format_text_with_lists(Some("  \n ")), "<p>  \n </p>");
    }

    #[test]
    fn test_text_is_escaped() {
        let html = format_text_with_lists(Some("- <script>alert(1)</script>\nTom & Jerry"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("<p>Tom &amp; Jerry</p>"));
    }

    #[test]
    fn test_blank_line_splits_lists() {
        let blocks = parse_blocks("- a\n\n- b");
        assert_eq!(blocks.len(), 2);
        assert!(blocks.iter().all(|b| matches!(b, Block::List { kind: ListKind::Bulleted, .. })));
    }

    #[test]
    fn test_numbered_requires_space() {
        let blocks = parse_blocks("1.5 litres\n12. twelfth");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph("1.5 litres".into()),
                Block::List { kind: ListKind::Numbered, items: vec!["twelfth".into()] },
            ]
        );
    }

    #[test]
    fn test_meaningful_content() {
        assert!(!is_meaningful(""));
        assert!(!is_meaningful("   "));
        assert!(!is_meaningful("<p></p>"));
        assert!(!is_meaningful("<p>No explanation provided.</p>"));
        assert!(is_meaningful("<p>Photosynthesis</p>"));
    }

    #[test]
    fn test_plain_text_lines() {
        let blocks = vec![
            Block::Heading("Stages".into()),
            Block::List { kind: ListKind::Numbered, items: vec!["light".into(), "dark".into()] },
        ];
        assert_eq!(plain_text(&blocks), "Stages\nlight\ndark");
    }
}
