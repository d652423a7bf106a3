//! Prop schemas: what a widget accepts from its host.
//!
//! A [`PropSchema`] maps field names to [`FieldSpec`] descriptors. Each
//! descriptor variant owns its default, so a schema without defaults cannot
//! be expressed.
//!
//! # Example
//!
//! ```rust
//! use section_widgets::schema::{FieldSpec, PropSchema};
//!
//! let schema = PropSchema::new()
//!     .field("title", FieldSpec::rich_text("Hello"))
//!     .field("rating", FieldSpec::number(4.8).clamped(0.0, 5.0))
//!     .field("visible", FieldSpec::boolean(true));
//!
//! assert_eq!(schema.len(), 3);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The four field kinds a schema can declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Trimmed text
    String,
    /// Finite number, optionally clamped
    Number,
    /// List of shape-filtered objects
    Array,
    /// Truthiness flag
    Boolean,
}

impl FieldKind {
    /// Lowercase label, as used in schema JSON.
    pub fn as_label(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Array => "array",
            FieldKind::Boolean => "boolean",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Keys an array element may keep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKey {
    /// Image URL (text)
    Url,
    /// Alternative text (text)
    Alt,
    /// Intrinsic width (number)
    Width,
    /// Intrinsic height (number)
    Height,
}

impl ItemKey {
    /// Every key, in rendering order.
    pub const ALL: [ItemKey; 4] = [ItemKey::Url, ItemKey::Alt, ItemKey::Width, ItemKey::Height];

    /// Property name in raw input.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKey::Url => "url",
            ItemKey::Alt => "alt",
            ItemKey::Width => "width",
            ItemKey::Height => "height",
        }
    }
}

/// Allowed keys for the elements of an array field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemShape(Vec<ItemKey>);

impl ItemShape {
    /// A shape keeping only the given keys.
    pub fn only(keys: &[ItemKey]) -> Self {
        Self(keys.to_vec())
    }

    /// Whether elements keep `key`.
    pub fn allows(&self, key: ItemKey) -> bool {
        self.0.contains(&key)
    }
}

impl Default for ItemShape {
    fn default() -> Self {
        Self(ItemKey::ALL.to_vec())
    }
}

/// One sanitized array element (consultant photo, illustration, ...).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageItem {
    /// Image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Alternative text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Width in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Height in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl ImageItem {
    /// An item with a URL and alt text and no dimensions.
    pub fn new(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            alt: Some(alt.into()),
            ..Default::default()
        }
    }
}

/// Field descriptor. The `kind` tag selects the variant in JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldSpec {
    /// Text field. `rich` fields may carry markup and go through the
    /// HTML sanitizer before rendering.
    String {
        /// Value used when input is absent or not coercible
        default: String,
        /// Field carries markup
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        rich: bool,
    },
    /// Numeric field, clamped to `[min, max]` when bounds are set.
    Number {
        /// Value used when input is absent or not a number
        default: f64,
        /// Inclusive lower bound
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        /// Inclusive upper bound
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// List of objects filtered down to `item_shape`.
    Array {
        /// Value used when input is absent or not a list
        default: Vec<ImageItem>,
        /// Keys each element keeps
        #[serde(default, rename = "itemShape")]
        item_shape: ItemShape,
    },
    /// Flag; any truthy input is `true`.
    Boolean {
        /// Value used when input is absent
        default: bool,
    },
}

impl FieldSpec {
    /// Plain text field.
    pub fn string(default: impl Into<String>) -> Self {
        FieldSpec::String {
            default: default.into(),
            rich: false,
        }
    }

    /// Text field that may contain markup.
    pub fn rich_text(default: impl Into<String>) -> Self {
        FieldSpec::String {
            default: default.into(),
            rich: true,
        }
    }

    /// Unbounded number field.
    pub fn number(default: f64) -> Self {
        FieldSpec::Number {
            default,
            min: None,
            max: None,
        }
    }

    /// Adds clamp bounds. No effect on non-numeric fields.
    pub fn clamped(self, lo: f64, hi: f64) -> Self {
        match self {
            FieldSpec::Number { default, .. } => FieldSpec::Number {
                default,
                min: Some(lo),
                max: Some(hi),
            },
            other => other,
        }
    }

    /// Array field keeping every [`ItemKey`].
    pub fn array(default: Vec<ImageItem>) -> Self {
        FieldSpec::Array {
            default,
            item_shape: ItemShape::default(),
        }
    }

    /// Boolean field.
    pub fn boolean(default: bool) -> Self {
        FieldSpec::Boolean { default }
    }

    /// Kind of this descriptor.
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldSpec::String { .. } => FieldKind::String,
            FieldSpec::Number { .. } => FieldKind::Number,
            FieldSpec::Array { .. } => FieldKind::Array,
            FieldSpec::Boolean { .. } => FieldKind::Boolean,
        }
    }

    /// The declared default as a typed value.
    pub fn default_value(&self) -> PropValue {
        match self {
            FieldSpec::String { default, .. } => PropValue::Text(default.clone()),
            FieldSpec::Number { default, .. } => PropValue::Number(*default),
            FieldSpec::Array { default, .. } => PropValue::Items(default.clone()),
            FieldSpec::Boolean { default } => PropValue::Flag(*default),
        }
    }

    /// Whether the field carries markup.
    pub fn is_rich_text(&self) -> bool {
        matches!(self, FieldSpec::String { rich: true, .. })
    }
}

/// A schema field: descriptor plus human-readable description for metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropField {
    /// Descriptor
    #[serde(flatten)]
    pub spec: FieldSpec,
    /// Shown to CMS editors
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// Declarative per-widget schema.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropSchema {
    fields: BTreeMap<String, PropField>,
}

impl PropSchema {
    /// Empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a field without description.
    pub fn field(self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.described(name, spec, "")
    }

    /// Adds (or replaces) a field with a description.
    pub fn described(
        mut self,
        name: impl Into<String>,
        spec: FieldSpec,
        description: impl Into<String>,
    ) -> Self {
        self.fields.insert(
            name.into(),
            PropField {
                spec,
                description: description.into(),
            },
        );
        self
    }

    /// Descriptor for `name`.
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name).map(|f| &f.spec)
    }

    /// Fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropField)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Field names in name order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the schema declares no field.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A validated field value. Serializes as the bare JSON value.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropValue {
    /// `string` field
    Text(String),
    /// `number` field
    Number(f64),
    /// `array` field
    Items(Vec<ImageItem>),
    /// `boolean` field
    Flag(bool),
}

impl PropValue {
    /// Kind of the value.
    pub fn kind(&self) -> FieldKind {
        match self {
            PropValue::Text(_) => FieldKind::String,
            PropValue::Number(_) => FieldKind::Number,
            PropValue::Items(_) => FieldKind::Array,
            PropValue::Flag(_) => FieldKind::Boolean,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clamped_only_touches_numbers() {
        let spec = FieldSpec::string("x").clamped(0.0, 1.0);
        assert_eq!(spec, FieldSpec::string("x"));

        let spec = FieldSpec::number(3.0).clamped(0.0, 5.0);
        assert_eq!(
            spec,
            FieldSpec::Number {
                default: 3.0,
                min: Some(0.0),
                max: Some(5.0)
            }
        );
    }

    #[test]
    fn every_field_has_a_default_of_its_kind() {
        let schema = PropSchema::new()
            .field("a", FieldSpec::string("s"))
            .field("b", FieldSpec::number(1.5))
            .field("c", FieldSpec::array(vec![ImageItem::new("/a.jpg", "A")]))
            .field("d", FieldSpec::boolean(false));

        for (_, field) in schema.iter() {
            assert_eq!(field.spec.default_value().kind(), field.spec.kind());
        }
    }

    #[test]
    fn schema_serializes_with_kind_tags() {
        let schema = PropSchema::new()
            .described(
                "rating",
                FieldSpec::number(4.8).clamped(0.0, 5.0),
                "Rating value (0-5)",
            )
            .field("title", FieldSpec::rich_text("Hi"));

        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "rating": {
                    "kind": "number",
                    "default": 4.8,
                    "min": 0.0,
                    "max": 5.0,
                    "description": "Rating value (0-5)"
                },
                "title": { "kind": "string", "default": "Hi", "rich": true }
            })
        );
    }

    #[test]
    fn schema_parses_from_json() {
        let schema: PropSchema = serde_json::from_value(serde_json::json!({
            "photos": { "kind": "array", "default": [], "itemShape": ["url", "alt"] },
            "open": { "kind": "boolean", "default": true }
        }))
        .unwrap();

        match schema.get("photos") {
            Some(FieldSpec::Array { item_shape, .. }) => {
                assert!(item_shape.allows(ItemKey::Url));
                assert!(!item_shape.allows(ItemKey::Width));
            }
            other => panic!("unexpected descriptor: {other:?}"),
        }
        assert_eq!(schema.get("open"), Some(&FieldSpec::boolean(true)));
    }
}
