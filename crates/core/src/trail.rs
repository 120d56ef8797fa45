//! Trail accumulator
//!
//! Ordered, append-only list of crumbs built during one trail generation.
//! Labels are reduced to plain text on the way in, so downstream renderers
//! never receive markup from titles or term names.

use crate::models::Crumb;
use regex::Regex;
use std::sync::OnceLock;

/// Mutable crumb list for a single generation
#[derive(Debug, Default)]
pub struct Trail {
    crumbs: Vec<Crumb>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a crumb, stripping all markup from the label
    pub fn add_crumb(&mut self, label: &str, link: &str) {
        self.crumbs.push(Crumb::new(strip_markup(label), link));
    }

    /// Append several crumbs in order
    pub fn extend(&mut self, crumbs: impl IntoIterator<Item = Crumb>) {
        for crumb in crumbs {
            self.add_crumb(&crumb.label, &crumb.link);
        }
    }

    pub fn reset(&mut self) {
        self.crumbs.clear();
    }

    /// Current crumbs, root first
    pub fn get_breadcrumb(&self) -> &[Crumb] {
        &self.crumbs
    }

    pub fn len(&self) -> usize {
        self.crumbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crumbs.is_empty()
    }

    /// Freeze the trail
    pub fn into_crumbs(self) -> Vec<Crumb> {
        self.crumbs
    }
}

fn script_style_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
            .expect("valid script/style pattern")
    })
}

fn comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<!--.*?(?:-->|\z)").expect("valid comment pattern"))
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // A '<' followed by whitespace is text, not a tag.
    RE.get_or_init(|| Regex::new(r"<[^\s<>][^>]*(?:>|\z)").expect("valid tag pattern"))
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"))
}

/// Reduce a string to plain text
///
/// Script and style elements are dropped with their content, every other tag
/// and comment is removed (including an unterminated trailing tag), and the
/// result is trimmed.
pub fn strip_markup(text: &str) -> String {
    let text = script_style_re().replace_all(text, "");
    let text = comment_re().replace_all(&text, "");
    let text = tag_re().replace_all(&text, "");
    text.trim().to_string()
}

/// Plain-text form of a request parameter
///
/// Same as [`strip_markup`] with internal whitespace runs collapsed to one space.
pub fn sanitize_text_field(text: &str) -> String {
    let text = strip_markup(text);
    whitespace_re().replace_all(&text, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_crumb_strips_markup() {
        let mut trail = Trail::new();
        trail.add_crumb("<b>Bold</b>Title", "");

        assert_eq!(trail.get_breadcrumb(), &[Crumb::new("BoldTitle", "")]);
    }

    #[test]
    fn test_empty_label_is_kept() {
        let mut trail = Trail::new();
        trail.add_crumb("", "https://example.com/");

        assert_eq!(trail.len(), 1);
        assert_eq!(trail.get_breadcrumb()[0].label, "");
    }

    #[test]
    fn test_reset() {
        let mut trail = Trail::new();
        trail.add_crumb("One", "");
        trail.add_crumb("Two", "");
        trail.reset();

        assert!(trail.is_empty());
        assert!(trail.into_crumbs().is_empty());
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!(strip_markup("x<script>alert(1)</script>y"), "xy");
        assert_eq!(strip_markup("<style type=\"text/css\">p{}</style>Styled"), "Styled");
        assert_eq!(strip_markup("a <!-- note --> b"), "a  b");
        assert_eq!(strip_markup("Broken <em"), "Broken");
        assert_eq!(strip_markup("a < b"), "a < b");
        assert_eq!(strip_markup("  Spaced  "), "Spaced");
        assert_eq!(strip_markup("Fish &amp; Chips"), "Fish &amp; Chips");
    }

    #[test]
    fn test_sanitize_text_field() {
        assert_eq!(sanitize_text_field("  edit\n\t<i>address</i> "), "edit address");
    }
}
