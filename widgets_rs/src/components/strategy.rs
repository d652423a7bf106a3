//! Strategy widget: two value propositions side by side with an illustration.

use leptos::prelude::*;
use leptos::tachys::view::RenderHtml;

use super::{ICON_ARROW_RIGHT, ICON_OFFER, ICON_PHONE, Icon, RichTitle};
use crate::error::RenderError;
use crate::mount::Markup;
use crate::schema::{FieldSpec, PropSchema};
use crate::validate::ValidatedConfig;

const PRIMARY_HEADING: &str = r#"<span class="highlight">Gagnez du temps !</span>"#;
const PRIMARY_DESCRIPTION: &str = "Accédez en quelques clics à des offres négociées parmi les meilleures du marché, grâce à notre comparateur intelligent.";
const SECONDARY_HEADING: &str = r#"Besoin d'une <span class="highlight">stratégie d'achat</span> sur <span class="highlight small">mesure ?</span>"#;
const SECONDARY_DESCRIPTION: &str = "Multisites, gros volumes, enjeux stratégiques ? Bénéficiez d'un conseiller dédié pour piloter votre stratégie d'achat énergétique de A à Z";

/// Prop schema of the strategy widget.
pub fn strategy_schema() -> PropSchema {
    PropSchema::new()
        .described(
            "primaryHeading",
            FieldSpec::rich_text(PRIMARY_HEADING),
            "First block heading with HTML support for highlighting",
        )
        .described(
            "primaryDescription",
            FieldSpec::string(PRIMARY_DESCRIPTION),
            "First block description",
        )
        .described(
            "primaryCta",
            FieldSpec::string("Comparez les offres"),
            "First block call-to-action button text",
        )
        .described(
            "secondaryHeading",
            FieldSpec::rich_text(SECONDARY_HEADING),
            "Second block heading with HTML support for highlighting",
        )
        .described(
            "secondaryDescription",
            FieldSpec::string(SECONDARY_DESCRIPTION),
            "Second block description",
        )
        .described(
            "moreInfoLabel",
            FieldSpec::string("Voir plus d'informations"),
            "Text of the link-style button",
        )
        .described(
            "contactLabel",
            FieldSpec::string("Contactez un expert"),
            "Text of the contact button",
        )
        .described(
            "image",
            FieldSpec::string("/imgs/strategy/phone.png"),
            "URL of the illustration",
        )
        .described(
            "imageAlt",
            FieldSpec::string(
                "Mobile app with energy comparison, floating icons, and decorative elements",
            ),
            "Alternative text of the illustration",
        )
        .described(
            "showArrow",
            FieldSpec::boolean(true),
            "Show the arrow between the two blocks",
        )
        .described(
            "className",
            FieldSpec::string(""),
            "Additional CSS classes",
        )
}

/// Typed view of a validated strategy configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct StrategyProps {
    /// Sanitized rich-text heading of the first block
    pub primary_heading: String,
    /// First block text
    pub primary_description: String,
    /// First block CTA label
    pub primary_cta: String,
    /// Sanitized rich-text heading of the second block
    pub secondary_heading: String,
    /// Second block text
    pub secondary_description: String,
    /// Link-style button label
    pub more_info_label: String,
    /// Contact button label
    pub contact_label: String,
    /// Illustration URL
    pub image: String,
    /// Illustration alt text
    pub image_alt: String,
    /// Arrow between blocks
    pub show_arrow: bool,
    /// Extra classes on the section
    pub class_name: String,
}

impl StrategyProps {
    /// Reads every strategy field from `config`.
    pub fn from_config(config: &ValidatedConfig) -> Result<Self, RenderError> {
        Ok(Self {
            primary_heading: config.text("primaryHeading")?.to_string(),
            primary_description: config.text("primaryDescription")?.to_string(),
            primary_cta: config.text("primaryCta")?.to_string(),
            secondary_heading: config.text("secondaryHeading")?.to_string(),
            secondary_description: config.text("secondaryDescription")?.to_string(),
            more_info_label: config.text("moreInfoLabel")?.to_string(),
            contact_label: config.text("contactLabel")?.to_string(),
            image: config.text("image")?.to_string(),
            image_alt: config.text("imageAlt")?.to_string(),
            show_arrow: config.flag("showArrow")?,
            class_name: config.text("className")?.to_string(),
        })
    }
}

/// Renders the strategy widget.
pub fn render_strategy(config: &ValidatedConfig) -> Result<Markup, RenderError> {
    let props = StrategyProps::from_config(config)?;
    Ok(Markup::new(view! { <StrategySection props=props /> }.to_html()))
}

/// The strategy section.
#[component]
pub fn StrategySection(props: StrategyProps) -> impl IntoView {
    let section_class = if props.class_name.is_empty() {
        "strategy".to_string()
    } else {
        format!("strategy {}", props.class_name)
    };

    let arrow = props.show_arrow.then(|| {
        view! {
            <div class="strategy-arrow">
                <Icon path=ICON_ARROW_RIGHT size="48" class="strategy-arrow-icon" />
            </div>
        }
    });

    view! {
        <section class=section_class data-widget="strategy">
            <div class="strategy-container">
                <div class="strategy-content">
                    <div class="strategy-left">
                        <div class="strategy-block">
                            <h2 class="strategy-heading">
                                <RichTitle source=props.primary_heading />
                            </h2>
                            <p class="strategy-description">{props.primary_description}</p>
                            <button type="button" class="btn btn-primary btn-lg strategy-cta">
                                <Icon path=ICON_OFFER />
                                <span>{props.primary_cta}</span>
                            </button>
                        </div>

                        <div class="strategy-block">
                            <h2 class="strategy-heading">
                                <RichTitle source=props.secondary_heading />
                            </h2>
                            <p class="strategy-description">{props.secondary_description}</p>
                            <div class="strategy-buttons">
                                <button type="button" class="btn btn-none btn-md">
                                    <span>{props.more_info_label}</span>
                                    <Icon path=ICON_ARROW_RIGHT />
                                </button>
                                <button type="button" class="btn btn-secondary btn-md">
                                    <Icon path=ICON_PHONE />
                                    <span>{props.contact_label}</span>
                                </button>
                            </div>
                        </div>
                    </div>

                    {arrow}

                    <div class="strategy-right">
                        <img class="strategy-image" src=props.image alt=props.image_alt loading="lazy" />
                    </div>
                </div>
            </div>
        </section>
    }
}
