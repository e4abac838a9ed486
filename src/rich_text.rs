//! Explanatory text with embedded glossary terms.
//!
//! Catalog text marks glossary terms inline as `[[label|definition]]`.
//! Parsing splits the text into plain runs and terms so a renderer can draw
//! the terms as individually expandable spans inside a tooltip body.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

fn term_regex() -> &'static Regex {
    static TERM: OnceLock<Regex> = OnceLock::new();
    TERM.get_or_init(|| {
        Regex::new(r"\[\[([^\[\]|]+)\|([^\[\]]+)\]\]").expect("term markup regex is valid")
    })
}

/// A glossary term embedded in rich text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Text shown inline.
    pub label: String,
    /// Definition shown when the term is expanded.
    pub definition: String,
}

/// One run of rich text.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    Plain { text: String },
    Term(Term),
}

/// Parsed rich text.
///
/// # Examples
///
/// ```
/// use aacascade::RichText;
///
/// let text = RichText::parse("Release of [[PGE₂|Prostaglandin E₂]] rises.").unwrap();
/// assert_eq!(text.plain(), "Release of PGE₂ rises.");
/// assert_eq!(text.terms().count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText {
    segments: Vec<Segment>,
}

impl RichText {
    /// Parses term markup.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MalformedMarkup` if brackets are left over
    /// after all well-formed terms are extracted.
    pub fn parse(src: &str) -> Result<Self, ValidationError> {
        Self::parse_field("text", src)
    }

    /// Parses term markup, naming `field` in any error.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MalformedMarkup` on stray `[[` or `]]`.
    pub fn parse_field(field: &str, src: &str) -> Result<Self, ValidationError> {
        let text = Self::parse_lossy(src);
        for segment in &text.segments {
            if let Segment::Plain { text } = segment {
                if text.contains("[[") || text.contains("]]") {
                    return Err(ValidationError::MalformedMarkup {
                        field: field.to_string(),
                        reason: format!("unbalanced term brackets near '{text}'"),
                    });
                }
            }
        }
        Ok(text)
    }

    /// Parses term markup, keeping anything malformed as plain text.
    #[must_use]
    pub fn parse_lossy(src: &str) -> Self {
        let mut segments = Vec::new();
        let mut cursor = 0;
        for caps in term_regex().captures_iter(src) {
            let Some(whole) = caps.get(0) else { continue };
            if whole.start() > cursor {
                segments.push(Segment::Plain {
                    text: src[cursor..whole.start()].to_string(),
                });
            }
            segments.push(Segment::Term(Term {
                label: caps[1].trim().to_string(),
                definition: caps[2].trim().to_string(),
            }));
            cursor = whole.end();
        }
        if cursor < src.len() {
            segments.push(Segment::Plain {
                text: src[cursor..].to_string(),
            });
        }
        Self { segments }
    }

    /// Returns the segments in order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the embedded terms in order.
    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Term(term) => Some(term),
            Segment::Plain { .. } => None,
        })
    }

    /// Returns the term at `index` (counting terms only).
    #[must_use]
    pub fn term(&self, index: usize) -> Option<&Term> {
        self.terms().nth(index)
    }

    /// Renders the text with each term reduced to its label.
    #[must_use]
    pub fn plain(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Plain { text } => out.push_str(text),
                Segment::Term(term) => out.push_str(&term.label),
            }
        }
        out
    }

    /// Returns true if the text has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for RichText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Plain { text } => f.write_str(text)?,
                Segment::Term(term) => write!(f, "[[{}|{}]]", term.label, term.definition)?,
            }
        }
        Ok(())
    }
}
