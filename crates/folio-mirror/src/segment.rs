//! Splitting documents into protected and translatable segments.
//!
//! Protected segments are copied verbatim:
//! - regions between a pair of markers (markers included)
//! - inline code spans
//! - HTML tags and comments on a single line
//!
//! Fenced code blocks (```` ``` ```` or `~~~`) stay convertible unless fence
//! protection is requested, so comments inside code follow the target script.

use std::sync::LazyLock;

use regex::Regex;

static PROTECTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`[^`\n]+`|<[^<>\n]+>").expect("invalid protected-segment regex"));

static FENCED_PROTECTED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?ms)^[ ]{0,3}```.*?^[ ]{0,3}```[^\n]*$",
        r"|(?ms)^[ ]{0,3}~~~.*?^[ ]{0,3}~~~[^\n]*$",
        r"|`[^`\n]+`",
        r"|<[^<>\n]+>",
    ))
    .expect("invalid fenced protected-segment regex")
});

/// A slice of a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Copied verbatim.
    Protected(&'a str),
    /// Prose eligible for conversion.
    Text(&'a str),
}

impl<'a> Segment<'a> {
    /// The underlying slice.
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        match self {
            Self::Protected(s) | Self::Text(s) => s,
        }
    }
}

/// Split `doc` into segments. Concatenating the segments yields `doc`.
///
/// An unpaired trailing marker is protected on its own; the text after it
/// stays convertible. With `protect_fences`, whole fenced code blocks are
/// protected as well.
#[must_use]
pub fn segments<'a>(doc: &'a str, marker: &str, protect_fences: bool) -> Vec<Segment<'a>> {
    let re: &Regex = if protect_fences {
        &FENCED_PROTECTED_RE
    } else {
        &PROTECTED_RE
    };
    let mut out = Vec::new();
    let mut rest = doc;

    while !marker.is_empty() {
        let Some(open) = rest.find(marker) else {
            break;
        };
        let after_open = open + marker.len();
        let close_end = rest[after_open..]
            .find(marker)
            .map(|close| after_open + close + marker.len());

        split_unmarked(re, &rest[..open], &mut out);
        match close_end {
            Some(end) => {
                out.push(Segment::Protected(&rest[open..end]));
                rest = &rest[end..];
            }
            None => {
                out.push(Segment::Protected(&rest[open..after_open]));
                rest = &rest[after_open..];
            }
        }
    }

    split_unmarked(re, rest, &mut out);
    out
}

/// Split text containing no marker regions.
fn split_unmarked<'a>(re: &Regex, text: &'a str, out: &mut Vec<Segment<'a>>) {
    let mut last = 0;
    for m in re.find_iter(text) {
        if m.start() > last {
            out.push(Segment::Text(&text[last..m.start()]));
        }
        out.push(Segment::Protected(m.as_str()));
        last = m.end();
    }
    if last < text.len() {
        out.push(Segment::Text(&text[last..]));
    }
}
