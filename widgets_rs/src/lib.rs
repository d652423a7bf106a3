//! # section-widgets
//!
//! Landing-page sections packaged as embeddable widgets.
//!
//! A widget is a render-oriented component plus a declarative prop schema.
//! A host page (typically a CMS page) loads the widget's bundle, which
//! registers `{component, mount, metadata}` in a registry, and later calls
//! `mount(node, props)` with configuration it does not control. The pipeline
//! behind that call is:
//!
//! ```text
//! raw props ──► validate (schema, never fails)
//!           ──► sanitize rich-text fields
//!           ──► component renders markup (Leptos SSR)
//!           ──► markup attached to the node's render root
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use section_widgets::{HostSession, WidgetCatalog};
//! use serde_json::json;
//!
//! let catalog = WidgetCatalog::builtin();
//! let bundle = catalog.bundle("hero", "SectionWidgets", "").unwrap();
//!
//! let mut session = HostSession::new();
//! bundle.execute(&mut session);
//!
//! let node = session.document_mut().create_element("div");
//! session.mount("hero", Some(node), &json!({ "rating": 10 }));
//!
//! let html = session.document().inner_html(node).unwrap();
//! assert_eq!(html.matches("star star--full").count(), 5);
//! ```
//!
//! ## Architecture
//!
//! - [`schema`] - prop schema descriptors and the typed values they produce
//! - [`validate`] - untrusted input to [`ValidatedConfig`]
//! - [`sanitize`] - denylist pass over rich-text HTML
//! - [`markup`] - highlight-marker tokenizer for titles
//! - [`components`] - Leptos components, one per widget
//! - [`host`] / [`mount`] - DOM-like host and the mount function factory
//! - [`registry`] - per-session widget registry
//! - [`catalog`] / [`bundle`] - server-side widget table and bundle scripts
//! - [`config`] - optional `widgets.toml`

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod bundle;
pub mod catalog;
pub mod components;
pub mod config;
pub mod error;
pub mod host;
pub mod markup;
pub mod mount;
pub mod registry;
pub mod sanitize;
pub mod schema;
pub mod validate;

pub use bundle::Bundle;
pub use catalog::{WidgetCatalog, WidgetDefinition, WidgetMetadata};
pub use config::WidgetsConfig;
pub use error::{BundleError, ConfigError, MountError, RenderError};
pub use host::{HostDocument, NodeId};
pub use mount::{
    Component, Markup, MountFactory, MountFn, RenderRoot, RenderRoots, render_contained,
};
pub use registry::{HostSession, RegistryEntry, WidgetRegistry};
pub use sanitize::sanitize;
pub use schema::{FieldKind, FieldSpec, ImageItem, ItemKey, ItemShape, PropSchema, PropValue};
pub use validate::{FieldWarning, ValidatedConfig, prepare, validate, validate_with_warnings};

/// Default name of the host-page global the bundles register into.
pub const DEFAULT_NAMESPACE: &str = "SectionWidgets";
