//! Front-matter extraction.
//!
//! A content file starts with a YAML block fenced by `---` lines, followed by
//! the body:
//!
//! ```text
//! ---
//! title: Post A
//! date: 2024-01-01
//! tags: [rust, notes]
//! ---
//! Body text, handed to the renderer untouched.
//! ```
//!
//! The body is everything after the line break that ends the closing fence.
//! Any failure (no block, no closing fence, invalid YAML, no title) is a
//! [`FrontMatterError`]; callers treat those files as absent.

use crate::types::Metadata;
use serde_yaml::Value;
use thiserror::Error;

const FENCE: &str = "---";

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("no front matter block (file must start with a '---' line)")]
    MissingBlock,
    #[error("front matter block is never closed (no second '---' line)")]
    Unterminated,
    #[error("front matter is not a key/value mapping")]
    NotAMapping,
    #[error("front matter has no title")]
    MissingTitle,
    #[error("invalid front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A parsed content file.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub metadata: Metadata,
    pub body: String,
}

/// Split raw file content into the YAML block and the body.
pub fn split(content: &str) -> Result<(&str, &str), FrontMatterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');
    let first = lines.next().ok_or(FrontMatterError::MissingBlock)?;
    if first.trim_end() != FENCE {
        return Err(FrontMatterError::MissingBlock);
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == FENCE {
            return Ok((&content[start..offset], &content[offset + line.len()..]));
        }
        offset += line.len();
    }
    Err(FrontMatterError::Unterminated)
}

/// Parse a content file into typed metadata and body.
pub fn parse(content: &str) -> Result<Document, FrontMatterError> {
    let (yaml, body) = split(content)?;
    if yaml.trim().is_empty() {
        return Err(FrontMatterError::MissingTitle);
    }
    let value: Value = serde_yaml::from_str(yaml)?;

    let mapping = match &value {
        Value::Mapping(m) => m,
        Value::Null => return Err(FrontMatterError::MissingTitle),
        _ => return Err(FrontMatterError::NotAMapping),
    };
    let has_title = match mapping.get("title") {
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Null) | None => false,
        Some(_) => true,
    };
    if !has_title {
        return Err(FrontMatterError::MissingTitle);
    }

    let metadata: Metadata = serde_yaml::from_value(value)?;
    Ok(Document {
        metadata,
        body: body.to_string(),
    })
}
