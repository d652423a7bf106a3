//! Inline error block written into a host node when a mount fails.

use leptos::prelude::*;
use leptos::tachys::view::RenderHtml;

use super::{ICON_WARNING_CIRCLE, Icon};
use crate::mount::Markup;

/// Renders [`WidgetError`] to a fragment.
pub fn render_error_block(message: &str) -> Markup {
    Markup::new(view! { <WidgetError message=message.to_string() /> }.to_html())
}

/// `.widget-error` block with the failure message as text.
#[component]
pub fn WidgetError(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="widget-error" role="alert">
            <Icon path=ICON_WARNING_CIRCLE size="18" class="widget-error-icon" />
            <span class="widget-error-message">{message}</span>
        </div>
    }
}
