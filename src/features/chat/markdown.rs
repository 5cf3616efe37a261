//! Terminal rendering of the assistant's markdown replies.
//!
//! Supports headings, horizontal rules, flat lists, and inline bold,
//! italic and code spans. Anything else is shown as a paragraph.

use colored::Colorize;
use once_cell::sync::Lazy;
use regex::Regex;

static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+\.\s").unwrap_or_else(|e| panic!("Invalid ordered list regex: {e}"))
});

static INLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*(.+?)\*\*|\*(.+?)\*|`(.+?)`")
        .unwrap_or_else(|e| panic!("Invalid inline regex: {e}"))
});

/// An inline run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Bold(String),
    Italic(String),
    Code(String),
}

/// A block-level element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, spans: Vec<Span> },
    Rule,
    OrderedList(Vec<Vec<Span>>),
    UnorderedList(Vec<Vec<Span>>),
    Paragraph(Vec<Span>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Ordered,
    Unordered,
}

/// Split a line into inline spans.
#[must_use]
pub fn parse_inline(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in INLINE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            spans.push(Span::Text(text[last..whole.start()].to_string()));
        }
        let span = if let Some(m) = caps.get(1) {
            Span::Bold(m.as_str().to_string())
        } else if let Some(m) = caps.get(2) {
            Span::Italic(m.as_str().to_string())
        } else if let Some(m) = caps.get(3) {
            Span::Code(m.as_str().to_string())
        } else {
            Span::Text(whole.as_str().to_string())
        };
        spans.push(span);
        last = whole.end();
    }

    if last < text.len() {
        spans.push(Span::Text(text[last..].to_string()));
    }
    spans
}

/// Parse reply text into blocks.
#[must_use]
pub fn parse_blocks(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut list: Option<(ListKind, Vec<Vec<Span>>)> = None;

    let flush = |list: &mut Option<(ListKind, Vec<Vec<Span>>)>, blocks: &mut Vec<Block>| {
        if let Some((kind, items)) = list.take() {
            blocks.push(match kind {
                ListKind::Ordered => Block::OrderedList(items),
                ListKind::Unordered => Block::UnorderedList(items),
            });
        }
    };

    for line in text.lines() {
        let line = line.trim();

        if line.is_empty() {
            flush(&mut list, &mut blocks);
            continue;
        }

        let item = if ORDERED_ITEM.is_match(line) {
            Some((ListKind::Ordered, ORDERED_ITEM.replace(line, "").into_owned()))
        } else {
            line.strip_prefix("- ")
                .map(|rest| (ListKind::Unordered, rest.to_string()))
        };

        if let Some((kind, content)) = item {
            if list.as_ref().is_some_and(|(k, _)| *k != kind) {
                flush(&mut list, &mut blocks);
            }
            list.get_or_insert_with(|| (kind, Vec::new()))
                .1
                .push(parse_inline(&content));
            continue;
        }

        flush(&mut list, &mut blocks);

        let block = if let Some(rest) = line.strip_prefix("### ") {
            Block::Heading { level: 3, spans: parse_inline(rest) }
        } else if let Some(rest) = line.strip_prefix("## ") {
            Block::Heading { level: 2, spans: parse_inline(rest) }
        } else if let Some(rest) = line.strip_prefix("# ") {
            Block::Heading { level: 1, spans: parse_inline(rest) }
        } else if line == "---" {
            Block::Rule
        } else {
            Block::Paragraph(parse_inline(line))
        };
        blocks.push(block);
    }

    flush(&mut list, &mut blocks);
    blocks
}

fn render_spans(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| match span {
            Span::Text(t) => t.clone(),
            Span::Bold(t) => t.bold().to_string(),
            Span::Italic(t) => t.italic().to_string(),
            Span::Code(t) => t.cyan().to_string(),
        })
        .collect()
}

/// Render reply text for the terminal.
#[must_use]
pub fn render_markdown(text: &str) -> String {
    let mut lines = Vec::new();

    for block in parse_blocks(text) {
        match block {
            Block::Heading { level, spans } => {
                let heading = render_spans(&spans);
                lines.push(match level {
                    1 => heading.bold().underline().to_string(),
                    2 => heading.bold().to_string(),
                    _ => heading.bold().dimmed().to_string(),
                });
            }
            Block::Rule => lines.push("─".repeat(40).dimmed().to_string()),
            Block::OrderedList(items) => {
                for (i, item) in items.iter().enumerate() {
                    lines.push(format!("  {}. {}", i + 1, render_spans(item)));
                }
            }
            Block::UnorderedList(items) => {
                for item in &items {
                    lines.push(format!("  • {}", render_spans(item)));
                }
            }
            Block::Paragraph(spans) => lines.push(render_spans(&spans)),
        }
    }

    lines.join("\n")
}
