//! Display metadata derived from a content item.
//!
//! Listing cards need a short description even when the author wrote none.
//! Each field is resolved from several sources; the first non-empty value
//! wins:
//!
//! - **Description**: `description` → `summary` → excerpt of the body
//!
//! The excerpt is the plain text of the first prose paragraph of the body.
//! Headings, code blocks, raw HTML/JSX and MDX `import`/`export` lines are
//! skipped so a component-heavy page still gets a readable blurb.

use crate::types::ContentItem;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};

const EXCERPT_LEN: usize = 160;
const WORDS_PER_MINUTE: usize = 200;

/// Resolve a metadata field from multiple sources.
///
/// Takes optional values in priority order and returns the first non-None,
/// non-empty one (trimmed).
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

/// Description to show for an item on a listing card.
pub fn display_description(item: &ContentItem) -> Option<String> {
    let excerpt = excerpt(&item.body, EXCERPT_LEN);
    resolve(&[
        item.metadata.description.as_deref(),
        item.metadata.summary.as_deref(),
        excerpt.as_deref(),
    ])
}

/// Plain text of the first prose paragraph, cut to `max` characters at a
/// word boundary.
pub fn excerpt(body: &str, max: usize) -> Option<String> {
    let mut depth = 0usize;
    let mut in_paragraph = false;
    let mut text = String::new();

    for event in Parser::new(body) {
        match event {
            Event::Start(Tag::Paragraph) if depth == 0 => {
                in_paragraph = true;
                text.clear();
            }
            Event::Start(_) => depth += 1,
            Event::End(TagEnd::Paragraph) if in_paragraph && depth == 0 => {
                in_paragraph = false;
                let candidate = text.trim();
                if !candidate.is_empty() && !is_mdx_statement(candidate) {
                    return Some(truncate_words(candidate, max));
                }
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Text(t) | Event::Code(t) if in_paragraph => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak if in_paragraph => text.push(' '),
            _ => {}
        }
    }
    None
}

/// Estimated reading time in whole minutes, never less than one.
pub fn reading_time_minutes(body: &str) -> usize {
    let words: usize = Parser::new(body)
        .filter_map(|event| match event {
            Event::Text(t) | Event::Code(t) => Some(t.split_whitespace().count()),
            _ => None,
        })
        .sum();
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}

fn is_mdx_statement(text: &str) -> bool {
    text.starts_with("import ") || text.starts_with("export ")
}

fn truncate_words(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    let cut = match cut.rfind(' ') {
        Some(pos) if pos > 0 => &cut[..pos],
        _ => cut.as_str(),
    };
    format!("{}...", cut.trim_end())
}
