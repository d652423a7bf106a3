//! Five-slot star rating.

use leptos::prelude::*;

use super::{ICON_STAR, Icon};

/// Slots in the indicator, whatever the rating.
pub const STAR_SLOTS: usize = 5;

/// Number of full-emphasis slots for `rating`: `floor(rating)`, capped to
/// [`STAR_SLOTS`].
pub fn full_slots(rating: f64) -> usize {
    if !rating.is_finite() || rating <= 0.0 {
        return 0;
    }
    (rating.floor() as usize).min(STAR_SLOTS)
}

/// The rating as given: `4.8` -> `"4.8"`, `5.0` -> `"5"`, `4.25` -> `"4.25"`.
pub fn format_rating(rating: f64) -> String {
    format!("{rating}")
}

/// Stars below `floor(rating)` at full opacity, the rest dimmed.
#[component]
pub fn StarRating(rating: f64) -> impl IntoView {
    let full = full_slots(rating);
    let label = format!("{} out of 5", format_rating(rating));

    view! {
        <div class="stars" role="img" aria-label=label>
            {(0..STAR_SLOTS)
                .map(|slot| {
                    let (class, opacity) = if slot < full {
                        ("star star--full", "1")
                    } else {
                        ("star star--dim", "0.3")
                    };
                    view! {
                        <span class=class style=format!("opacity: {opacity}")>
                            <Icon path=ICON_STAR size="18" class="star-icon" />
                        </span>
                    }
                })
                .collect::<Vec<_>>()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::tachys::view::RenderHtml;

    #[test]
    fn full_slots_floor_and_cap() {
        assert_eq!(full_slots(4.8), 4);
        assert_eq!(full_slots(5.0), 5);
        assert_eq!(full_slots(10.0), 5);
        assert_eq!(full_slots(0.9), 0);
        assert_eq!(full_slots(-2.0), 0);
        assert_eq!(full_slots(f64::NAN), 0);
    }

    #[test]
    fn renders_exactly_five_slots() {
        for rating in [0.0, 2.5, 4.8, 5.0, 10.0] {
            let html = view! { <StarRating rating=rating /> }.to_html();
            assert_eq!(html.matches(r#"class="star star--"#).count(), STAR_SLOTS);
            assert_eq!(html.matches("star star--full").count(), full_slots(rating));
        }
    }

    #[test]
    fn formats_like_the_label_expects() {
        assert_eq!(format_rating(4.8), "4.8");
        assert_eq!(format_rating(5.0), "5");
        assert_eq!(format_rating(4.25), "4.25");
        assert_eq!(format_rating(0.0), "0");
    }
}
