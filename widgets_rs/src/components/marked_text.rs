//! Highlighted text and rich-text titles.

use leptos::prelude::*;

use crate::markup::{EmphasisSize, SegmentKind, tokenize};

/// Size of the highlight background.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HighlightVariant {
    /// Regular highlight
    #[default]
    Default,
    /// Larger highlight, used for the first emphasized words of a title
    Large,
    /// Tighter highlight
    Small,
}

impl HighlightVariant {
    fn class(&self) -> &'static str {
        match self {
            HighlightVariant::Default => "highlight highlight--default",
            HighlightVariant::Large => "highlight highlight--large",
            HighlightVariant::Small => "highlight highlight--small",
        }
    }
}

/// Text with a rounded highlight behind it.
#[component]
pub fn MarkedText(
    /// Highlighted words (rendered as text)
    #[prop(into)]
    text: String,
    #[prop(optional)] variant: HighlightVariant,
) -> impl IntoView {
    view! { <span class=variant.class()>{text}</span> }
}

/// A sanitized title: plain runs keep their inline markup (`<br />`),
/// emphasized runs become [`MarkedText`]. Sized markers keep their size;
/// among bare markers the first emphasis of the title is large.
#[component]
pub fn RichTitle(source: String) -> impl IntoView {
    let mut seen_emphasis = false;
    tokenize(&source)
        .into_iter()
        .map(|segment| match segment.kind {
            SegmentKind::Plain => view! { <span inner_html=segment.text></span> }.into_any(),
            SegmentKind::Emphasis(size) => {
                let variant = match size {
                    EmphasisSize::Small => HighlightVariant::Small,
                    EmphasisSize::Large => HighlightVariant::Large,
                    EmphasisSize::Auto if seen_emphasis => HighlightVariant::Default,
                    EmphasisSize::Auto => HighlightVariant::Large,
                };
                seen_emphasis = true;
                view! { <MarkedText text=segment.text variant=variant /> }.into_any()
            }
        })
        .collect::<Vec<_>>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::tachys::view::RenderHtml;

    #[test]
    fn first_emphasis_is_large() {
        let html = view! {
            <RichTitle source=r#"A <span class="highlight">B</span> C <span class="highlight">D</span>"#.to_string() />
        }
        .to_html();

        assert!(html.contains(r#"<span class="highlight highlight--large">B</span>"#));
        assert!(html.contains(r#"<span class="highlight highlight--default">D</span>"#));
    }

    #[test]
    fn sized_markers_choose_the_variant() {
        let html = view! {
            <RichTitle source=r#"<span class="highlight small">A</span> <span class="highlight">B</span> <span class="highlight large">C</span>"#.to_string() />
        }
        .to_html();

        assert!(html.contains(r#"<span class="highlight highlight--small">A</span>"#));
        assert!(html.contains(r#"<span class="highlight highlight--default">B</span>"#));
        assert!(html.contains(r#"<span class="highlight highlight--large">C</span>"#));
    }

    #[test]
    fn plain_runs_keep_line_breaks_and_emphasis_is_escaped() {
        let html = view! {
            <RichTitle source=r#"One<br />two <span class="highlight">&lt;b&gt; & co</span>"#.to_string() />
        }
        .to_html();

        assert!(html.contains("One<br />two "));
        assert!(!html.contains("<b>"));
    }
}
