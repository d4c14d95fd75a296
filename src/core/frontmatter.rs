use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

use super::error::{IndexError, Result};
use super::yaml;

lazy_static! {
    static ref OPENING_RE: Regex = Regex::new(r"\A\x{FEFF}?---[ \t]*\r?\n").unwrap();
    // Closing fence on its own line.
    static ref CLOSING_RE: Regex = Regex::new(r"(?m)^---[ \t]*\r?$").unwrap();
}

/// Front matter fields, with integer-like keys first as JavaScript orders them.
pub type Metadata = Map<String, Value>;

/// Returns the raw YAML after the opening `---` fence, if the document has one.
///
/// The block ends at the next `---` line; without one it runs to the end of
/// the document.
pub fn split_frontmatter(content: &str) -> Option<&str> {
    let opening = OPENING_RE.find(content)?;
    let rest = &content[opening.end()..];
    let end = CLOSING_RE.find(rest).map(|m| m.start()).unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Parse the front matter of `content` into metadata.
///
/// A document without an opening fence, or with an empty or null block,
/// yields empty metadata. YAML errors and non-mapping blocks are errors for
/// `document`.
pub fn parse_metadata(document: &str, content: &str) -> Result<Metadata> {
    let Some(raw) = split_frontmatter(content) else {
        return Ok(Metadata::new());
    };
    if raw.trim().is_empty() {
        return Ok(Metadata::new());
    }

    let value = yaml::parse(raw).map_err(|source| IndexError::Frontmatter {
        document: document.to_string(),
        source,
    })?;

    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Metadata::new()),
        _ => Err(IndexError::FrontmatterShape {
            document: document.to_string(),
        }),
    }
}
