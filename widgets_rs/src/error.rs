//! Error types for rendering, mounting, bundling and configuration.
//!
//! Prop validation has no error type: every field failure is recovered
//! locally through the field's default (see [`crate::validate`]).

use std::path::PathBuf;

use thiserror::Error;

use crate::host::NodeId;
use crate::schema::FieldKind;

/// A component could not produce markup from its configuration.
#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    /// The component read a field its schema does not declare.
    #[error("field `{0}` is not part of the validated configuration")]
    MissingField(String),
    /// The component read a field as the wrong kind.
    #[error("field `{field}` is {found}, expected {expected}")]
    KindMismatch {
        /// Field name
        field: String,
        /// Kind the component asked for
        expected: FieldKind,
        /// Kind the configuration holds
        found: FieldKind,
    },
}

/// Failure inside a mount call. Never escapes [`crate::MountFn::mount`]:
/// it is logged and rendered into the host node instead.
#[derive(Debug, Error, PartialEq)]
pub enum MountError {
    /// The host passed no element.
    #[error("Mount element not found")]
    MissingNode,
    /// The element is not (or no longer) part of the host document.
    #[error("host node {0} is not attached to the document")]
    DetachedNode(NodeId),
    /// The identifier has no registry entry in this session.
    #[error("widget `{0}` is not registered")]
    NotRegistered(String),
    /// The component failed.
    #[error(transparent)]
    Render(#[from] RenderError),
    /// The component panicked; the payload message is kept.
    #[error("component panicked: {0}")]
    Panicked(String),
}

/// Failure while looking up or synthesizing a widget bundle.
#[derive(Debug, Error)]
pub enum BundleError {
    /// No widget with this identifier exists in the catalog.
    #[error("Widget not found")]
    NotFound(String),
    /// The registry namespace cannot be used as a JavaScript property name.
    #[error("invalid registry namespace `{0}`")]
    InvalidNamespace(String),
    /// Widget metadata could not be encoded into the script.
    #[error("metadata encoding failed: {0}")]
    Metadata(#[from] serde_json::Error),
}

impl BundleError {
    /// True for the lookup failure (reported as 404), false for synthesis
    /// failures (reported as 500).
    pub fn is_not_found(&self) -> bool {
        matches!(self, BundleError::NotFound(_))
    }
}

/// Failure loading an explicitly requested configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// The file is not valid TOML for [`crate::WidgetsConfig`].
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Path that was parsed
        path: PathBuf,
        /// Underlying TOML error
        source: toml::de::Error,
    },
}
