//! Widgets this crate can serve.
//!
//! The catalog is the server-side table behind `GET /widgets/{id}`: it maps
//! an identifier to the component, its prop schema and the metadata shipped
//! to CMS editors. It is immutable once built and cheap to share.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::bundle::Bundle;
use crate::components::{hero_schema, render_hero, render_strategy, strategy_schema};
use crate::error::BundleError;
use crate::mount::{Component, MountFactory};
use crate::registry::RegistryEntry;
use crate::schema::PropSchema;

const AUTHOR: &str = "Section Widgets";

/// Descriptive metadata registered next to a widget's mount function.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WidgetMetadata {
    /// Component name
    pub name: String,
    /// Widget version
    pub version: String,
    /// One-line description
    pub description: String,
    /// Author
    pub author: String,
    /// Prop schema, with per-field kind, default and description
    pub props: PropSchema,
}

/// Everything needed to bundle, mount or render one widget.
#[derive(Clone, Debug)]
pub struct WidgetDefinition {
    /// Identifier used in URLs and in the host registry
    pub identifier: String,
    /// Prop schema
    pub schema: PropSchema,
    /// Render function
    pub component: Component,
    /// Metadata
    pub metadata: WidgetMetadata,
}

impl WidgetDefinition {
    /// New definition; the metadata's `props` mirror `schema`.
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        component: Component,
        schema: PropSchema,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            metadata: WidgetMetadata {
                name: name.into(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: description.into(),
                author: AUTHOR.to_string(),
                props: schema.clone(),
            },
            schema,
            component,
        }
    }

    /// The registry entry a bundle of this widget registers.
    pub fn entry(&self) -> RegistryEntry {
        RegistryEntry {
            component: self.component,
            mount: MountFactory::make(self.identifier.clone(), self.component, self.schema.clone()),
            metadata: self.metadata.clone(),
        }
    }
}

/// Identifier -> widget definition.
#[derive(Clone, Debug, Default)]
pub struct WidgetCatalog {
    widgets: BTreeMap<String, WidgetDefinition>,
}

impl WidgetCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The widgets shipped with this crate: `hero` and `strategy`.
    pub fn builtin() -> Self {
        Self::new()
            .with(WidgetDefinition::new(
                "hero",
                "HeroSection",
                "Hero section widget with customizable title, subtitle, CTA, consultant images, and rating",
                render_hero,
                hero_schema(),
            ))
            .with(WidgetDefinition::new(
                "strategy",
                "StrategySection",
                "Two-block purchasing strategy section with highlighted headings and call-to-action buttons",
                render_strategy,
                strategy_schema(),
            ))
    }

    /// Adds (or replaces) a widget.
    pub fn with(mut self, definition: WidgetDefinition) -> Self {
        self.widgets
            .insert(definition.identifier.clone(), definition);
        self
    }

    /// Definition for `identifier`.
    pub fn get(&self, identifier: &str) -> Option<&WidgetDefinition> {
        self.widgets.get(identifier)
    }

    /// Known identifiers, sorted.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.widgets.keys().map(String::as_str)
    }

    /// Metadata for `identifier`.
    pub fn metadata(&self, identifier: &str) -> Option<&WidgetMetadata> {
        self.get(identifier).map(|def| &def.metadata)
    }

    /// Number of widgets.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// True when the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Bundle for `identifier`, registering into `window[namespace]`.
    ///
    /// `base_url` is where the bundle's in-page mount posts props for
    /// rendering; empty means "the origin the script was loaded from".
    pub fn bundle(
        &self,
        identifier: &str,
        namespace: &str,
        base_url: &str,
    ) -> Result<Bundle, BundleError> {
        let definition = self
            .get(identifier)
            .ok_or_else(|| BundleError::NotFound(identifier.to_string()))?;
        Bundle::new(definition.clone(), namespace, base_url)
    }
}
