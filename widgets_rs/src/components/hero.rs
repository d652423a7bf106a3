//! Hero widget: headline, subtitle, call to action, consultants and rating.

use leptos::prelude::*;
use leptos::tachys::view::RenderHtml;

use super::{ICON_OFFER, Icon, RichTitle, StarRating, format_rating};
use crate::error::RenderError;
use crate::mount::Markup;
use crate::schema::{FieldSpec, ImageItem, PropSchema};
use crate::validate::ValidatedConfig;

const DEFAULT_TITLE: &str = r#"Courtier en <span class="highlight">électricité</span><br />et <span class="highlight">gaz naturel</span><br />pour les <span class="highlight">entreprises</span>"#;
const DEFAULT_SUBTITLE: &str = "Réduisez durablement vos factures d'énergie grâce à notre expertise et nos solutions sur mesure pour les professionnels.";
const AVATAR_SIZE: f64 = 70.0;

/// Prop schema of the hero widget.
pub fn hero_schema() -> PropSchema {
    PropSchema::new()
        .described(
            "title",
            FieldSpec::rich_text(DEFAULT_TITLE),
            "Main heading with HTML support for highlighting",
        )
        .described(
            "subtitle",
            FieldSpec::string(DEFAULT_SUBTITLE),
            "Subtitle text below the main heading",
        )
        .described(
            "ctaText",
            FieldSpec::string("Comparez les offres"),
            "Call-to-action button text",
        )
        .described(
            "consultantImages",
            FieldSpec::array(vec![
                ImageItem::new("/imgs/hero/person-1.jpg", "Consultant 1"),
                ImageItem::new("/imgs/hero/person-2.jpg", "Consultant 2"),
                ImageItem::new("/imgs/hero/person-3.jpg", "Consultant 3"),
                ImageItem::new("/imgs/hero/person-5.jpg", "Consultant 4"),
            ]),
            "Array of consultant image objects with url and alt properties",
        )
        .described(
            "rating",
            FieldSpec::number(4.8).clamped(0.0, 5.0),
            "Rating value (0-5)",
        )
        .described(
            "consultantsLabel",
            FieldSpec::string("Les Meilleurs Consultant"),
            "Label text for consultants section",
        )
        .described(
            "cardsImage",
            FieldSpec::string("/imgs/hero/cards.png"),
            "URL for the comparison cards image",
        )
        .described(
            "className",
            FieldSpec::string(""),
            "Additional CSS classes",
        )
}

/// Typed view of a validated hero configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct HeroProps {
    /// Sanitized rich-text headline
    pub title: String,
    /// Subtitle
    pub subtitle: String,
    /// CTA label
    pub cta_text: String,
    /// Consultant avatars
    pub consultant_images: Vec<ImageItem>,
    /// Rating, 0-5
    pub rating: f64,
    /// Label next to the avatars
    pub consultants_label: String,
    /// Comparison cards illustration
    pub cards_image: String,
    /// Extra classes on the section
    pub class_name: String,
}

impl HeroProps {
    /// Reads every hero field from `config`.
    pub fn from_config(config: &ValidatedConfig) -> Result<Self, RenderError> {
        Ok(Self {
            title: config.text("title")?.to_string(),
            subtitle: config.text("subtitle")?.to_string(),
            cta_text: config.text("ctaText")?.to_string(),
            consultant_images: config.items("consultantImages")?.to_vec(),
            rating: config.number("rating")?,
            consultants_label: config.text("consultantsLabel")?.to_string(),
            cards_image: config.text("cardsImage")?.to_string(),
            class_name: config.text("className")?.to_string(),
        })
    }
}

/// Renders the hero widget.
pub fn render_hero(config: &ValidatedConfig) -> Result<Markup, RenderError> {
    let props = HeroProps::from_config(config)?;
    Ok(Markup::new(view! { <HeroSection props=props /> }.to_html()))
}

/// The hero section.
#[component]
pub fn HeroSection(props: HeroProps) -> impl IntoView {
    let HeroProps {
        title,
        subtitle,
        cta_text,
        consultant_images,
        rating,
        consultants_label,
        cards_image,
        class_name,
    } = props;

    let section_class = if class_name.is_empty() {
        "hero".to_string()
    } else {
        format!("hero {class_name}")
    };

    view! {
        <section class=section_class data-widget="hero">
            <div class="hero-background"></div>
            <div class="hero-container">
                <div class="hero-content">
                    <div class="hero-left">
                        <div class="hero-heading">
                            <h1 class="hero-title">
                                <RichTitle source=title />
                            </h1>
                            <p class="hero-subtitle">{subtitle}</p>
                        </div>

                        <button type="button" class="btn btn-primary btn-lg hero-cta">
                            <Icon path=ICON_OFFER />
                            <span>{cta_text}</span>
                        </button>

                        <div class="hero-consultants">
                            <div class="hero-avatars">
                                {consultant_images
                                    .into_iter()
                                    .map(|img| {
                                        let width = img.width.unwrap_or(AVATAR_SIZE).to_string();
                                        let height = img.height.unwrap_or(AVATAR_SIZE).to_string();
                                        let src = img.url.unwrap_or_default();
                                        let alt = img.alt.unwrap_or_default();
                                        view! {
                                            <div class="hero-avatar">
                                                <img
                                                    class="hero-avatar-image"
                                                    src=src
                                                    alt=alt
                                                    width=width
                                                    height=height
                                                    loading="lazy"
                                                />
                                            </div>
                                        }
                                    })
                                    .collect::<Vec<_>>()}
                            </div>
                            <div class="hero-consultants-info">
                                <span class="hero-consultants-label">{consultants_label}</span>
                                <div class="hero-rating">
                                    <StarRating rating=rating />
                                    <span class="hero-rating-text">{format!("{}/5", format_rating(rating))}</span>
                                </div>
                            </div>
                        </div>
                    </div>

                    <div class="hero-right">
                        <img
                            class="hero-cards"
                            src=cards_image
                            alt="Energy comparison cards"
                            width="440"
                            height="472"
                        />
                    </div>
                </div>
            </div>
        </section>
    }
}
