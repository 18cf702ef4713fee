//! Mirroring a single document.

use crate::convert::TextConverter;
use crate::segment::{Segment, segments};

/// Literal text replacement applied after conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rewrite {
    pub from: String,
    pub to: String,
}

impl Rewrite {
    /// Create a rewrite rule.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Options shared by every document of a mirror job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MirrorOptions {
    /// Marker bounding protected regions. A document starting with the
    /// marker is not converted at all.
    pub marker: String,
    /// Rewrites applied in order to the whole output.
    pub rewrites: Vec<Rewrite>,
    /// Copy fenced code blocks verbatim instead of converting their body.
    pub protect_fences: bool,
}

impl Default for MirrorOptions {
    fn default() -> Self {
        Self {
            marker: crate::DEFAULT_MARKER.to_owned(),
            rewrites: Vec::new(),
            protect_fences: false,
        }
    }
}

/// What happened to a mirrored document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Prose segments were converted.
    Converted,
    /// The document opted out via a leading marker; only rewrites applied.
    PassedThrough,
}

/// Mirror one document's text.
///
/// Rewrites apply to the entire output, protected regions included, so
/// locale links inside code spans and HTML are retargeted too.
#[must_use]
pub fn mirror_document(
    text: &str,
    converter: &dyn TextConverter,
    options: &MirrorOptions,
) -> (String, Outcome) {
    let (mut output, outcome) = if !options.marker.is_empty() && text.starts_with(&options.marker)
    {
        (text.to_owned(), Outcome::PassedThrough)
    } else {
        let converted = segments(text, &options.marker, options.protect_fences)
            .into_iter()
            .map(|segment| match segment {
                Segment::Protected(s) => s.to_owned(),
                Segment::Text(s) => converter.convert(s),
            })
            .collect();
        (converted, Outcome::Converted)
    };

    for rewrite in &options.rewrites {
        if !rewrite.from.is_empty() {
            output = output.replace(&rewrite.from, &rewrite.to);
        }
    }

    (output, outcome)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::convert::{IdentityConverter, TableConverter};

    fn table() -> TableConverter {
        TableConverter::parse("變\t变\n數\t数\n註\t注\n解\t解\n").unwrap()
    }

    fn options(rewrites: &[(&str, &str)]) -> MirrorOptions {
        MirrorOptions {
            rewrites: rewrites.iter().map(|(f, t)| Rewrite::new(*f, *t)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_converts_prose_only() {
        let doc = "# 變數\n\n`變數` 與 <span title=\"變數\">變數</span>\n```rust\n// 變數註解\n```\n";

        let (output, outcome) = mirror_document(doc, &table(), &options(&[]));

        assert_eq!(outcome, Outcome::Converted);
        assert_eq!(
            output,
            "# 变数\n\n`變數` 與 <span title=\"變數\">变数</span>\n```rust\n// 变数注解\n```\n"
        );
    }

    #[test]
    fn test_fenced_code_comments_converted_by_default() {
        let doc = "```rust\n// 變數\nlet x = 1;\n```\n";

        let (output, _) = mirror_document(doc, &table(), &MirrorOptions::default());

        assert_eq!(output, "```rust\n// 变数\nlet x = 1;\n```\n");
    }

    #[test]
    fn test_fenced_code_kept_when_protected() {
        let doc = "```rust\n// 變數\nlet x = 1;\n```\n變數";
        let options = MirrorOptions {
            protect_fences: true,
            ..Default::default()
        };

        let (output, _) = mirror_document(doc, &table(), &options);

        assert_eq!(output, "```rust\n// 變數\nlet x = 1;\n```\n变数");
    }

    #[test]
    fn test_leading_marker_passes_through() {
        let doc = "<!-- do not translate -->\n# 變數\n";

        let (output, outcome) = mirror_document(doc, &table(), &options(&[]));

        assert_eq!(outcome, Outcome::PassedThrough);
        assert_eq!(output, doc);
    }

    #[test]
    fn test_marked_region_not_converted() {
        let doc = "變數\n<!-- do not translate -->變數<!-- do not translate -->\n變數";

        let (output, _) = mirror_document(doc, &table(), &options(&[]));

        assert_eq!(
            output,
            "变数\n<!-- do not translate -->變數<!-- do not translate -->\n变数"
        );
    }

    #[test]
    fn test_rewrites_apply_in_order_everywhere() {
        let doc = "[變數](/zht/docs/variables)\n<a href=\"/zht/\">home</a>\nlink: /zht/index\n";

        let (output, _) = mirror_document(
            doc,
            &table(),
            &options(&[("/zht/", "/zhs/"), ("link: /zhs/index", "link: /zht/index")]),
        );

        assert_eq!(
            output,
            "[变数](/zhs/docs/variables)\n<a href=\"/zhs/\">home</a>\nlink: /zht/index\n"
        );
    }

    #[test]
    fn test_rewrites_apply_to_passed_through_documents() {
        let doc = "<!-- do not translate -->\n[x](/zht/docs/types)\n";

        let (output, outcome) =
            mirror_document(doc, &IdentityConverter, &options(&[("/zht/", "/")]));

        assert_eq!(outcome, Outcome::PassedThrough);
        assert_eq!(output, "<!-- do not translate -->\n[x](/docs/types)\n");
    }
}
