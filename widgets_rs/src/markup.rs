//! Highlight-marker tokenizer for rich-text titles.
//!
//! Titles mark emphasized words with `<span class="highlight">...</span>`.
//! [`tokenize`] splits a (sanitized) title into plain and emphasized
//! segments with a two-state scanner:
//!
//! ```text
//!            open marker
//!   Outside ─────────────► Inside
//!      ▲                     │
//!      └─────────────────────┘
//!            close marker
//! ```
//!
//! A marker may name its size, `<span class="highlight small">` or
//! `<span class="highlight large">`; a bare marker leaves the size to the
//! renderer.
//!
//! Plain segments may still contain inline markup such as `<br />`; emphasized
//! segments are rendered as text.

/// Opening markers, double- and single-quoted.
const OPEN_MARKERS: [(&str, EmphasisSize); 6] = [
    (r#"<span class="highlight">"#, EmphasisSize::Auto),
    ("<span class='highlight'>", EmphasisSize::Auto),
    (r#"<span class="highlight small">"#, EmphasisSize::Small),
    ("<span class='highlight small'>", EmphasisSize::Small),
    (r#"<span class="highlight large">"#, EmphasisSize::Large),
    ("<span class='highlight large'>", EmphasisSize::Large),
];
const CLOSE_MARKER: &str = "</span>";

/// Size requested by a highlight marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmphasisSize {
    /// Bare marker
    #[default]
    Auto,
    /// `highlight small`
    Small,
    /// `highlight large`
    Large,
}

/// Kind of a title segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    /// Regular text (inline markup allowed)
    Plain,
    /// Highlighted text
    Emphasis(EmphasisSize),
}

/// One run of a tokenized title.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    /// Plain or emphasized
    pub kind: SegmentKind,
    /// Segment content, markers removed
    pub text: String,
}

impl Segment {
    /// Plain segment.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::Plain,
            text: text.into(),
        }
    }

    /// Emphasized segment from a bare marker.
    pub fn emphasis(text: impl Into<String>) -> Self {
        Self::sized(text, EmphasisSize::Auto)
    }

    /// Emphasized segment of an explicit size.
    pub fn sized(text: impl Into<String>, size: EmphasisSize) -> Self {
        Self {
            kind: SegmentKind::Emphasis(size),
            text: text.into(),
        }
    }
}

enum State {
    Outside,
    Inside {
        marker: &'static str,
        size: EmphasisSize,
    },
}

/// Splits `source` into alternating plain / emphasized segments.
///
/// Empty segments are skipped. An opening marker without a closing one is
/// kept verbatim as plain text.
///
/// ```rust
/// use section_widgets::markup::{tokenize, Segment};
///
/// let segments = tokenize(r#"Save <span class="highlight">energy</span> now"#);
/// assert_eq!(
///     segments,
///     vec![Segment::plain("Save "), Segment::emphasis("energy"), Segment::plain(" now")]
/// );
/// ```
pub fn tokenize(source: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut state = State::Outside;
    let mut rest = source;

    loop {
        match state {
            State::Outside => match find_open_marker(rest) {
                Some((at, marker, size)) => {
                    push(&mut segments, SegmentKind::Plain, &rest[..at]);
                    rest = &rest[at + marker.len()..];
                    state = State::Inside { marker, size };
                }
                None => {
                    push(&mut segments, SegmentKind::Plain, rest);
                    break;
                }
            },
            State::Inside { marker, size } => match rest.find(CLOSE_MARKER) {
                Some(at) => {
                    push(&mut segments, SegmentKind::Emphasis(size), &rest[..at]);
                    rest = &rest[at + CLOSE_MARKER.len()..];
                    state = State::Outside;
                }
                None => {
                    push(&mut segments, SegmentKind::Plain, marker);
                    push(&mut segments, SegmentKind::Plain, rest);
                    break;
                }
            },
        }
    }

    segments
}

fn find_open_marker(haystack: &str) -> Option<(usize, &'static str, EmphasisSize)> {
    OPEN_MARKERS
        .iter()
        .filter_map(|&(marker, size)| haystack.find(marker).map(|at| (at, marker, size)))
        .min_by_key(|(at, _, _)| *at)
}

// Adjacent plain runs are merged so an unterminated marker stays one segment.
fn push(segments: &mut Vec<Segment>, kind: SegmentKind, text: &str) {
    if text.is_empty() {
        return;
    }
    if kind == SegmentKind::Plain
        && let Some(last) = segments.last_mut()
        && last.kind == SegmentKind::Plain
    {
        last.text.push_str(text);
        return;
    }
    segments.push(Segment {
        kind,
        text: text.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_text_is_one_segment() {
        assert_eq!(tokenize("just text"), vec![Segment::plain("just text")]);
        assert_eq!(tokenize(""), Vec::<Segment>::new());
    }

    #[test]
    fn alternates_on_each_marker() {
        let title = r#"Courtier en <span class="highlight">électricité</span><br />et <span class="highlight">gaz naturel</span>"#;
        assert_eq!(
            tokenize(title),
            vec![
                Segment::plain("Courtier en "),
                Segment::emphasis("électricité"),
                Segment::plain("<br />et "),
                Segment::emphasis("gaz naturel"),
            ]
        );
    }

    #[test]
    fn single_quoted_marker_is_recognized() {
        assert_eq!(
            tokenize("Direct <span class='highlight'>Component</span> Test"),
            vec![
                Segment::plain("Direct "),
                Segment::emphasis("Component"),
                Segment::plain(" Test"),
            ]
        );
    }

    #[test]
    fn sized_markers_carry_their_size() {
        assert_eq!(
            tokenize(
                r#"<span class="highlight large">Big</span> and <span class='highlight small'>tight</span>"#
            ),
            vec![
                Segment::sized("Big", EmphasisSize::Large),
                Segment::plain(" and "),
                Segment::sized("tight", EmphasisSize::Small),
            ]
        );
    }

    #[test]
    fn unknown_highlight_class_is_plain() {
        let title = r#"<span class="highlight huge">X</span>"#;
        assert_eq!(tokenize(title), vec![Segment::plain(title)]);
    }

    #[test]
    fn only_marker() {
        assert_eq!(
            tokenize(r#"<span class="highlight">X</span>"#),
            vec![Segment::emphasis("X")]
        );
    }

    #[test]
    fn unterminated_marker_stays_plain() {
        let title = r#"Hello <span class="highlight">world"#;
        assert_eq!(tokenize(title), vec![Segment::plain(title)]);
    }

    #[test]
    fn empty_highlight_is_skipped() {
        assert_eq!(
            tokenize(r#"a<span class="highlight"></span>b"#),
            vec![Segment::plain("ab")]
        );
    }
}
