//! Schema-driven decoding of untrusted props.
//!
//! [`validate`] turns whatever the host passed into a [`ValidatedConfig`]
//! holding exactly the schema's keys. It has no failure path: a field that
//! is missing, null or malformed gets its declared default, and the problem
//! is reported as a [`FieldWarning`] (logged through `tracing`). One broken
//! field from a CMS editor must not keep the rest of the widget from
//! rendering.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::RenderError;
use crate::sanitize::sanitize;
use crate::schema::{FieldKind, FieldSpec, ImageItem, ItemKey, ItemShape, PropSchema, PropValue};

/// Fully-defaulted, typed configuration for one render pass.
///
/// Only [`validate`] and [`prepare`] build one, so its key set always equals
/// the schema's.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedConfig {
    values: BTreeMap<String, PropValue>,
}

impl ValidatedConfig {
    /// Raw access to a value.
    pub fn get(&self, field: &str) -> Option<&PropValue> {
        self.values.get(field)
    }

    /// Field names, in name order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True for a config built from an empty schema.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Text value of a `string` field.
    pub fn text(&self, field: &str) -> Result<&str, RenderError> {
        match self.lookup(field)? {
            PropValue::Text(text) => Ok(text),
            other => Err(mismatch(field, FieldKind::String, other)),
        }
    }

    /// Value of a `number` field.
    pub fn number(&self, field: &str) -> Result<f64, RenderError> {
        match self.lookup(field)? {
            PropValue::Number(n) => Ok(*n),
            other => Err(mismatch(field, FieldKind::Number, other)),
        }
    }

    /// Elements of an `array` field.
    pub fn items(&self, field: &str) -> Result<&[ImageItem], RenderError> {
        match self.lookup(field)? {
            PropValue::Items(items) => Ok(items),
            other => Err(mismatch(field, FieldKind::Array, other)),
        }
    }

    /// Value of a `boolean` field.
    pub fn flag(&self, field: &str) -> Result<bool, RenderError> {
        match self.lookup(field)? {
            PropValue::Flag(flag) => Ok(*flag),
            other => Err(mismatch(field, FieldKind::Boolean, other)),
        }
    }

    fn lookup(&self, field: &str) -> Result<&PropValue, RenderError> {
        self.values
            .get(field)
            .ok_or_else(|| RenderError::MissingField(field.to_string()))
    }
}

fn mismatch(field: &str, expected: FieldKind, found: &PropValue) -> RenderError {
    RenderError::KindMismatch {
        field: field.to_string(),
        expected,
        found: found.kind(),
    }
}

/// A field that fell back to its default (or lost array elements).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldWarning {
    /// Field name
    pub field: String,
    /// What was wrong with the input
    pub reason: String,
}

impl fmt::Display for FieldWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Validates `raw` against `schema`. Never fails; warnings are logged.
///
/// ```rust
/// use section_widgets::schema::{FieldSpec, PropSchema, PropValue};
/// use section_widgets::validate;
/// use serde_json::json;
///
/// let schema = PropSchema::new().field("rating", FieldSpec::number(4.8).clamped(0.0, 5.0));
/// let config = validate(&json!({ "rating": 7 }), &schema);
/// assert_eq!(config.get("rating"), Some(&PropValue::Number(5.0)));
/// ```
pub fn validate(raw: &Value, schema: &PropSchema) -> ValidatedConfig {
    let (config, warnings) = validate_with_warnings(raw, schema);
    log_warnings(&warnings);
    config
}

/// [`validate`] followed by the HTML sanitizer on every rich-text field.
///
/// This is what mounting and server-side rendering feed to components.
pub fn prepare(raw: &Value, schema: &PropSchema) -> ValidatedConfig {
    let (mut config, warnings) = validate_with_warnings(raw, schema);
    log_warnings(&warnings);
    for (name, field) in schema.iter() {
        if !field.spec.is_rich_text() {
            continue;
        }
        if let Some(PropValue::Text(text)) = config.values.get_mut(name) {
            *text = sanitize(text);
        }
    }
    config
}

/// Same as [`validate`], returning the warnings instead of logging them.
pub fn validate_with_warnings(
    raw: &Value,
    schema: &PropSchema,
) -> (ValidatedConfig, Vec<FieldWarning>) {
    let empty = Map::new();
    let mut warnings = Vec::new();
    let input = match raw {
        Value::Object(map) => map,
        Value::Null => &empty,
        other => {
            warnings.push(FieldWarning {
                field: "*".into(),
                reason: format!("props must be an object, got {}", json_type(other)),
            });
            &empty
        }
    };

    let values = schema
        .iter()
        .map(|(name, field)| {
            let value = match input.get(name) {
                None | Some(Value::Null) => field.spec.default_value(),
                Some(value) => decode_field(name, value, &field.spec, &mut warnings),
            };
            (name.to_string(), value)
        })
        .collect();

    (ValidatedConfig { values }, warnings)
}

fn log_warnings(warnings: &[FieldWarning]) {
    for warning in warnings {
        warn!(field = %warning.field, "invalid prop: {}", warning.reason);
    }
}

fn decode_field(
    name: &str,
    value: &Value,
    spec: &FieldSpec,
    warnings: &mut Vec<FieldWarning>,
) -> PropValue {
    match spec {
        FieldSpec::String { .. } => match coerce_text(value) {
            Some(text) => PropValue::Text(text),
            None => fall_back(name, spec, format!("expected text, got {}", json_type(value)), warnings),
        },
        FieldSpec::Number { min, max, .. } => match coerce_number(value) {
            Some(n) => {
                let clamped = clamp(n, *min, *max);
                if clamped.is_finite() {
                    PropValue::Number(clamped)
                } else {
                    fall_back(name, spec, format!("number {value} is not finite"), warnings)
                }
            }
            None => fall_back(name, spec, format!("invalid number value {value}"), warnings),
        },
        FieldSpec::Array { item_shape, .. } => match value {
            Value::Array(elements) => {
                let mut items = Vec::with_capacity(elements.len());
                for (idx, element) in elements.iter().enumerate() {
                    match element {
                        Value::Object(obj) => items.push(sanitize_item(obj, item_shape)),
                        other => warnings.push(FieldWarning {
                            field: format!("{name}[{idx}]"),
                            reason: format!("dropped {} element", json_type(other)),
                        }),
                    }
                }
                PropValue::Items(items)
            }
            other => fall_back(
                name,
                spec,
                format!("invalid array value, got {}", json_type(other)),
                warnings,
            ),
        },
        FieldSpec::Boolean { .. } => PropValue::Flag(truthy(value)),
    }
}

fn fall_back(
    name: &str,
    spec: &FieldSpec,
    reason: String,
    warnings: &mut Vec<FieldWarning>,
) -> PropValue {
    warnings.push(FieldWarning {
        field: name.to_string(),
        reason,
    });
    spec.default_value()
}

fn clamp(n: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let n = min.map_or(n, |lo| n.max(lo));
    max.map_or(n, |hi| n.min(hi))
}

/// Copies only the keys the shape allows; unknown keys are discarded.
fn sanitize_item(obj: &Map<String, Value>, shape: &ItemShape) -> ImageItem {
    let text = |key: ItemKey| {
        if !shape.allows(key) {
            return None;
        }
        match obj.get(key.as_str()) {
            Some(Value::String(s)) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
            _ => None,
        }
    };
    let dimension = |key: ItemKey| {
        if !shape.allows(key) {
            return None;
        }
        obj.get(key.as_str())
            .and_then(coerce_number)
            .filter(|n| n.is_finite() && *n != 0.0)
    };

    ImageItem {
        url: text(ItemKey::Url),
        alt: text(ItemKey::Alt),
        width: dimension(ItemKey::Width),
        height: dimension(ItemKey::Height),
    }
}

fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Numeric coercion with the rules CMS hosts expect from `Number(x)`:
/// numeric strings are trimmed, an empty string is zero, booleans are 1/0.
fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric(s.trim()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }?;
    (!n.is_nan()).then_some(n)
}

fn parse_numeric(text: &str) -> Option<f64> {
    match text {
        "" => Some(0.0),
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        // Rust's float parser also takes "inf" and "nan"; hosts never mean those.
        t if t
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')) =>
        {
            t.parse().ok()
        }
        _ => None,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
