//! Mount function factory.
//!
//! [`MountFactory::make`] binds a component to its prop schema and returns a
//! [`MountFn`], the `mount(node, props)` entry point a host calls. A mount
//! never fails from the host's point of view: a missing node is logged and
//! ignored, and any failure after that is rendered into the node as a
//! `.widget-error` block.
//!
//! Render roots live in [`RenderRoots`], an explicit map keyed by node, so
//! mounting the same node twice replaces the content of the existing root
//! instead of creating a second one.

use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error};

use crate::components::render_error_block;
use crate::error::{MountError, RenderError};
use crate::host::{HostDocument, NodeId};
use crate::schema::PropSchema;
use crate::validate::{ValidatedConfig, prepare};

/// Text shown inside a node whose mount failed. Details go to the log.
pub const MOUNT_FAILURE_MESSAGE: &str = "Widget failed to load. Please check console for details.";

/// Rendered HTML fragment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    /// Wraps already-rendered HTML.
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// The HTML.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwraps the HTML.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A renderable component: pure function of its validated configuration.
pub type Component = fn(&ValidatedConfig) -> Result<Markup, RenderError>;

/// Render root attached to one host node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderRoot {
    /// Widget that owns the root
    pub widget: String,
    /// Successful renders into this root
    pub renders: u32,
}

/// Node -> render root map for one host page.
#[derive(Debug, Default)]
pub struct RenderRoots {
    roots: HashMap<NodeId, RenderRoot>,
}

impl RenderRoots {
    /// Empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Root attached to `node`, if any.
    pub fn get(&self, node: NodeId) -> Option<&RenderRoot> {
        self.roots.get(&node)
    }

    /// Number of live roots.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// True when nothing is mounted.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Existing root for `node`, or a new one owned by `widget`.
    fn root_for(&mut self, node: NodeId, widget: &str) -> &mut RenderRoot {
        let root = self.roots.entry(node).or_insert_with(|| RenderRoot {
            widget: widget.to_string(),
            renders: 0,
        });
        if root.widget != widget {
            debug!(%node, from = %root.widget, to = %widget, "render root taken over");
            root.widget = widget.to_string();
            root.renders = 0;
        }
        root
    }

    /// Drops the root attached to `node`.
    pub fn release(&mut self, node: NodeId) -> Option<RenderRoot> {
        self.roots.remove(&node)
    }
}

/// Builds [`MountFn`]s.
pub struct MountFactory;

impl MountFactory {
    /// Binds `component` to `schema` under the widget `identifier`.
    pub fn make(identifier: impl Into<String>, component: Component, schema: PropSchema) -> MountFn {
        MountFn {
            identifier: identifier.into(),
            component,
            schema: Arc::new(schema),
        }
    }
}

/// The `mount(node, props)` function of one widget.
#[derive(Clone)]
pub struct MountFn {
    identifier: String,
    component: Component,
    schema: Arc<PropSchema>,
}

impl fmt::Debug for MountFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountFn")
            .field("identifier", &self.identifier)
            .field("fields", &self.schema.len())
            .finish()
    }
}

impl MountFn {
    /// Widget identifier this function mounts.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Prop schema the raw props are validated against.
    pub fn schema(&self) -> &PropSchema {
        &self.schema
    }

    /// Mounts the widget into `node`. Never panics and never returns an
    /// error; see [`MountFn::try_mount`] for the underlying result.
    pub fn mount(
        &self,
        doc: &mut HostDocument,
        roots: &mut RenderRoots,
        node: Option<NodeId>,
        raw: &Value,
    ) {
        let Err(err) = self.try_mount(doc, roots, node, raw) else {
            return;
        };
        error!(widget = %self.identifier, "failed to mount widget: {err}");

        match (err, node) {
            (MountError::MissingNode | MountError::DetachedNode(_), _) | (_, None) => {}
            (_, Some(node)) => {
                // The node now shows the error block, not a widget.
                roots.release(node);
                doc.set_inner_html(node, render_error_block(MOUNT_FAILURE_MESSAGE).into_string());
            }
        }
    }

    /// Validates, renders and attaches, reporting the first failure.
    ///
    /// On failure the node's content is left untouched. A detached node
    /// loses its render root.
    pub fn try_mount(
        &self,
        doc: &mut HostDocument,
        roots: &mut RenderRoots,
        node: Option<NodeId>,
        raw: &Value,
    ) -> Result<(), MountError> {
        let node = node.ok_or(MountError::MissingNode)?;
        if !doc.contains(node) {
            if roots.release(node).is_some() {
                debug!(widget = %self.identifier, %node, "released root of detached node");
            }
            return Err(MountError::DetachedNode(node));
        }

        let config = prepare(raw, &self.schema);
        let markup = self.render(&config)?;

        let root = roots.root_for(node, &self.identifier);
        root.renders += 1;
        doc.set_inner_html(node, markup.into_string());
        debug!(widget = %self.identifier, %node, renders = root.renders, "widget mounted");
        Ok(())
    }

    /// Releases the root attached to `node` and clears its content.
    pub fn unmount(&self, doc: &mut HostDocument, roots: &mut RenderRoots, node: NodeId) -> bool {
        match roots.release(node) {
            Some(_) => {
                doc.set_inner_html(node, "");
                true
            }
            None => false,
        }
    }

    fn render(&self, config: &ValidatedConfig) -> Result<Markup, MountError> {
        render_contained(self.component, config)
    }
}

/// Runs `component`, turning a panic into [`MountError::Panicked`].
pub fn render_contained(
    component: Component,
    config: &ValidatedConfig,
) -> Result<Markup, MountError> {
    match panic::catch_unwind(AssertUnwindSafe(|| component(config))) {
        Ok(rendered) => Ok(rendered?),
        Err(payload) => Err(MountError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "component panicked".to_string()
    }
}
