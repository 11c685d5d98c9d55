//! core::document
//!
//! Article documents and the front-matter codec.
//!
//! # Format
//!
//! An article is a Markdown file opening with a YAML front-matter block:
//!
//! ```text
//! ---
//! title: "My Article"
//! published: false
//! tags: [rust, git]
//! ---
//!
//! Body text...
//! ```
//!
//! # Round-trip guarantee
//!
//! [`Document::parse`] keeps the original text verbatim, and
//! [`Document::to_text`] returns it byte-for-byte when no field was mutated.
//! Stamping the remote id ([`stamp_remote_id`]) inserts exactly one
//! `id: <n>` line at the end of the header block and leaves every other
//! byte untouched, so a stamped file differs from the original only in the
//! added field.

use serde_yaml::{Mapping, Value};
use thiserror::Error;

use super::types::RemoteId;

/// Errors from parsing or rewriting a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The file does not open with a `---` front-matter fence.
    #[error("missing front-matter header")]
    MissingHeader,

    /// The opening fence has no matching closing `---` line.
    #[error("unterminated front-matter header")]
    UnterminatedHeader,

    /// The header block is not valid YAML.
    #[error("invalid front-matter header: {0}")]
    HeaderSyntax(String),
}

/// State of the `id` header field.
///
/// A present-but-unparsable id is reported distinctly so callers can warn
/// and fall back to create, rather than failing the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteIdState {
    /// A valid positive integer id.
    Present(RemoteId),
    /// The field exists but is not a positive integer.
    Invalid(String),
    /// The field is absent.
    Absent,
}

/// A parsed article document: header map, body text, and the original raw
/// text for byte-exact round-tripping.
#[derive(Debug, Clone)]
pub struct Document {
    /// Ordered front-matter key/value mapping.
    pub header: Mapping,
    /// Markdown body following the header block.
    pub body: String,
    raw: String,
}

impl Document {
    /// Parse a document from its on-disk text.
    ///
    /// # Errors
    ///
    /// - [`DocumentError::MissingHeader`] if the text does not open with `---`
    /// - [`DocumentError::UnterminatedHeader`] if the closing fence is missing
    /// - [`DocumentError::HeaderSyntax`] if the header is not a YAML mapping
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let bounds = header_bounds(text)?;
        let header_text = &text[bounds.content_start..bounds.close_start];

        let header: Mapping = if header_text.trim().is_empty() {
            Mapping::new()
        } else {
            serde_yaml::from_str(header_text)
                .map_err(|e| DocumentError::HeaderSyntax(e.to_string()))?
        };

        Ok(Self {
            header,
            body: text[bounds.body_start..].to_string(),
            raw: text.to_string(),
        })
    }

    /// Serialize the document back to text.
    ///
    /// Returns the original text verbatim; mutation happens only through
    /// [`stamp_remote_id`], which operates on the raw text directly.
    pub fn to_text(&self) -> &str {
        &self.raw
    }

    /// The `title` header field, if present and a string.
    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    /// Whether the document has a usable (non-empty) title.
    pub fn has_title(&self) -> bool {
        self.title().map(|t| !t.trim().is_empty()).unwrap_or(false)
    }

    /// The state of the `id` header field.
    ///
    /// Accepts both YAML integers (`id: 42`) and strings (`id: "42"`).
    pub fn remote_id(&self) -> RemoteIdState {
        match self.header.get(Value::from("id")) {
            None | Some(Value::Null) => RemoteIdState::Absent,
            Some(Value::Number(n)) => match n.as_u64().and_then(|v| RemoteId::new(v).ok()) {
                Some(id) => RemoteIdState::Present(id),
                None => RemoteIdState::Invalid(n.to_string()),
            },
            Some(Value::String(s)) => match RemoteId::parse(s) {
                Ok(id) => RemoteIdState::Present(id),
                Err(_) => RemoteIdState::Invalid(s.clone()),
            },
            Some(other) => RemoteIdState::Invalid(format!("{other:?}")),
        }
    }

    /// The `published` flag, defaulting to false.
    pub fn published(&self) -> bool {
        match self.header.get(Value::from("published")) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s == "true",
            _ => false,
        }
    }

    /// The `tags` field as a list of strings.
    ///
    /// Accepts both a YAML sequence and a comma-separated string; defaults
    /// to the empty list.
    pub fn tags(&self) -> Vec<String> {
        match self.header.get(Value::from("tags")) {
            Some(Value::Sequence(seq)) => seq
                .iter()
                .filter_map(|v| v.as_str().map(|s| s.trim().to_string()))
                .filter(|s| !s.is_empty())
                .collect(),
            Some(Value::String(s)) => s
                .split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// A string header field by key.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        match self.header.get(Value::from(key)) {
            Some(Value::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// An unsigned integer header field by key.
    pub fn u64_field(&self, key: &str) -> Option<u64> {
        match self.header.get(Value::from(key)) {
            Some(Value::Number(n)) => n.as_u64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Write an `id: <n>` line into the front-matter block.
///
/// An existing top-level `id` line (e.g. a malformed value that routed the
/// document to create) is replaced in place; otherwise the line is inserted
/// at the end of the block. Every byte outside that one line is preserved,
/// which is what makes the "on-disk content changes only in the id field"
/// property hold.
///
/// # Errors
///
/// Returns a header error if `text` has no well-formed front-matter block.
pub fn stamp_remote_id(text: &str, id: RemoteId) -> Result<String, DocumentError> {
    let bounds = header_bounds(text)?;

    // Replace an existing id line rather than duplicating the key.
    let header = &text[bounds.content_start..bounds.close_start];
    let mut offset = bounds.content_start;
    for line in header.split_inclusive('\n') {
        if is_id_line(line) {
            let mut out = String::with_capacity(text.len() + 16);
            out.push_str(&text[..offset]);
            out.push_str(&format!("id: {id}\n"));
            out.push_str(&text[offset + line.len()..]);
            return Ok(out);
        }
        offset += line.len();
    }

    let mut out = String::with_capacity(text.len() + 16);
    out.push_str(&text[..bounds.close_start]);
    out.push_str(&format!("id: {id}\n"));
    out.push_str(&text[bounds.close_start..]);
    Ok(out)
}

/// Whether a header line declares the top-level `id` key. Indented lines are
/// nested values, never the document id.
fn is_id_line(line: &str) -> bool {
    line.strip_prefix("id")
        .map(|rest| rest.trim_start().starts_with(':'))
        .unwrap_or(false)
}

/// Byte offsets delimiting the front-matter block.
struct HeaderBounds {
    /// Start of the header content (byte after the opening fence line).
    content_start: usize,
    /// Start of the closing fence line.
    close_start: usize,
    /// Start of the body (byte after the closing fence line).
    body_start: usize,
}

/// Locate the front-matter fences.
///
/// The opening fence must be the very first line; the closing fence is the
/// next line consisting solely of `---` (a trailing `\r` is tolerated).
fn header_bounds(text: &str) -> Result<HeaderBounds, DocumentError> {
    let mut offset = 0usize;
    let mut lines = text.split_inclusive('\n');

    let first = lines.next().ok_or(DocumentError::MissingHeader)?;
    if first.trim_end_matches(['\n', '\r']) != "---" {
        return Err(DocumentError::MissingHeader);
    }
    offset += first.len();
    let content_start = offset;

    for line in lines {
        if line.trim_end_matches(['\n', '\r']) == "---" {
            return Ok(HeaderBounds {
                content_start,
                close_start: offset,
                body_start: offset + line.len(),
            });
        }
        offset += line.len();
    }

    Err(DocumentError::UnterminatedHeader)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "---\ntitle: \"A Post\"\npublished: false\ntags: [rust, git]\n---\n\nHello world.\n";

    #[test]
    fn parse_extracts_header_and_body() {
        let doc = Document::parse(SAMPLE).unwrap();
        assert_eq!(doc.title(), Some("A Post"));
        assert!(!doc.published());
        assert_eq!(doc.tags(), vec!["rust", "git"]);
        assert_eq!(doc.body, "\nHello world.\n");
    }

    #[test]
    fn to_text_round_trips_byte_for_byte() {
        let doc = Document::parse(SAMPLE).unwrap();
        assert_eq!(doc.to_text(), SAMPLE);
    }

    #[test]
    fn missing_header_is_an_error() {
        assert!(matches!(
            Document::parse("no front matter here"),
            Err(DocumentError::MissingHeader)
        ));
        assert!(matches!(
            Document::parse(""),
            Err(DocumentError::MissingHeader)
        ));
    }

    #[test]
    fn unterminated_header_is_an_error() {
        assert!(matches!(
            Document::parse("---\ntitle: x\n"),
            Err(DocumentError::UnterminatedHeader)
        ));
    }

    #[test]
    fn invalid_yaml_header_is_an_error() {
        let text = "---\ntitle: [unclosed\n---\nbody\n";
        assert!(matches!(
            Document::parse(text),
            Err(DocumentError::HeaderSyntax(_))
        ));
    }

    #[test]
    fn empty_header_block_parses_to_empty_mapping() {
        let doc = Document::parse("---\n---\nbody\n").unwrap();
        assert!(doc.header.is_empty());
        assert_eq!(doc.body, "body\n");
    }

    #[test]
    fn remote_id_states() {
        let present = Document::parse("---\ntitle: t\nid: 42\n---\n").unwrap();
        assert_eq!(
            present.remote_id(),
            RemoteIdState::Present(RemoteId::new(42).unwrap())
        );

        let quoted = Document::parse("---\nid: \"7\"\n---\n").unwrap();
        assert_eq!(
            quoted.remote_id(),
            RemoteIdState::Present(RemoteId::new(7).unwrap())
        );

        let invalid = Document::parse("---\nid: not-a-number\n---\n").unwrap();
        assert_eq!(invalid.remote_id(), RemoteIdState::Invalid("not-a-number".into()));

        let zero = Document::parse("---\nid: 0\n---\n").unwrap();
        assert!(matches!(zero.remote_id(), RemoteIdState::Invalid(_)));

        let absent = Document::parse("---\ntitle: t\n---\n").unwrap();
        assert_eq!(absent.remote_id(), RemoteIdState::Absent);
    }

    #[test]
    fn tags_accepts_comma_separated_string() {
        let doc = Document::parse("---\ntags: rust, cli , \n---\n").unwrap();
        assert_eq!(doc.tags(), vec!["rust", "cli"]);
    }

    #[test]
    fn stamp_inserts_exactly_one_line() {
        let stamped = stamp_remote_id(SAMPLE, RemoteId::new(99).unwrap()).unwrap();
        let expected = "---\ntitle: \"A Post\"\npublished: false\ntags: [rust, git]\nid: 99\n---\n\nHello world.\n";
        assert_eq!(stamped, expected);

        // The stamped document parses and routes to update.
        let doc = Document::parse(&stamped).unwrap();
        assert_eq!(
            doc.remote_id(),
            RemoteIdState::Present(RemoteId::new(99).unwrap())
        );
    }

    #[test]
    fn stamp_replaces_malformed_id_in_place() {
        let text = "---\ntitle: t\nid: not-a-number\ntags: [x]\n---\nbody\n";
        let stamped = stamp_remote_id(text, RemoteId::new(12).unwrap()).unwrap();
        assert_eq!(stamped, "---\ntitle: t\nid: 12\ntags: [x]\n---\nbody\n");

        // Re-stamping an already-valid id is also a replacement.
        let again = stamp_remote_id(&stamped, RemoteId::new(12).unwrap()).unwrap();
        assert_eq!(again, stamped);
    }

    #[test]
    fn stamp_ignores_nested_id_keys() {
        let text = "---\ntitle: t\nmeta:\n  id: 5\n---\n";
        let stamped = stamp_remote_id(text, RemoteId::new(3).unwrap()).unwrap();
        assert_eq!(stamped, "---\ntitle: t\nmeta:\n  id: 5\nid: 3\n---\n");
    }

    #[test]
    fn stamp_preserves_crlf_header_bytes() {
        let text = "---\r\ntitle: t\r\n---\r\nbody";
        let stamped = stamp_remote_id(text, RemoteId::new(5).unwrap()).unwrap();
        assert_eq!(stamped, "---\r\ntitle: t\r\nid: 5\n---\r\nbody");
    }

    #[test]
    fn published_defaults_false_and_reads_strings() {
        let doc = Document::parse("---\npublished: \"true\"\n---\n").unwrap();
        assert!(doc.published());
        let doc = Document::parse("---\ntitle: t\n---\n").unwrap();
        assert!(!doc.published());
    }

    #[test]
    fn u64_field_reads_numbers_and_strings() {
        let doc = Document::parse("---\norganization_id: 123\n---\n").unwrap();
        assert_eq!(doc.u64_field("organization_id"), Some(123));
        let doc = Document::parse("---\norganization_id: \"456\"\n---\n").unwrap();
        assert_eq!(doc.u64_field("organization_id"), Some(456));
        assert_eq!(doc.u64_field("missing"), None);
    }
}
