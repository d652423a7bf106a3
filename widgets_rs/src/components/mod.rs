//! Leptos components behind the widgets.
//!
//! Each widget module exposes a `*_schema()` prop schema and a
//! `render_*` function with the [`crate::Component`] signature. The shared
//! building blocks (icons, highlights, stars, error block) live beside them.

mod error_block;
mod hero;
mod icons;
mod marked_text;
mod rating;
mod strategy;

pub use error_block::{WidgetError, render_error_block};
pub use hero::{HeroProps, HeroSection, hero_schema, render_hero};
pub use icons::{
    ICON_ARROW_RIGHT, ICON_OFFER, ICON_PHONE, ICON_STAR, ICON_WARNING_CIRCLE, Icon,
};
pub use marked_text::{HighlightVariant, MarkedText, RichTitle};
pub use rating::{STAR_SLOTS, StarRating, format_rating, full_slots};
pub use strategy::{StrategyProps, StrategySection, render_strategy, strategy_schema};
