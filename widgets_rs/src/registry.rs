//! Per-page widget registry.
//!
//! Executing a bundle registers `{component, mount, metadata}` under the
//! widget identifier. There is no process-wide registry: each host page is
//! a [`HostSession`] that owns its document, its registry and its render
//! roots, and bundles register into the session they are executed in.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, error, info};

use crate::catalog::WidgetMetadata;
use crate::error::MountError;
use crate::host::{HostDocument, NodeId};
use crate::mount::{Component, MountFn, RenderRoots};

/// What a bundle registers.
#[derive(Clone, Debug)]
pub struct RegistryEntry {
    /// Render function
    pub component: Component,
    /// Host entry point
    pub mount: MountFn,
    /// Descriptive metadata
    pub metadata: WidgetMetadata,
}

/// Identifier -> entry. Registering an identifier again replaces the entry.
#[derive(Debug, Default)]
pub struct WidgetRegistry {
    entries: BTreeMap<String, RegistryEntry>,
}

impl WidgetRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `entry`, returning the entry it replaced.
    pub fn register(
        &mut self,
        identifier: impl Into<String>,
        entry: RegistryEntry,
    ) -> Option<RegistryEntry> {
        let identifier = identifier.into();
        let previous = self.entries.insert(identifier.clone(), entry);
        if previous.is_some() {
            debug!(%identifier, "widget re-registered, previous entry replaced");
        } else {
            info!(%identifier, "widget registered");
        }
        previous
    }

    /// Entry for `identifier`.
    pub fn get(&self, identifier: &str) -> Option<&RegistryEntry> {
        self.entries.get(identifier)
    }

    /// True if `identifier` is registered.
    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    /// Registered identifiers, sorted.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of registered widgets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One host page.
#[derive(Debug, Default)]
pub struct HostSession {
    document: HostDocument,
    registry: WidgetRegistry,
    roots: RenderRoots,
}

impl HostSession {
    /// Empty page, empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The page's elements.
    pub fn document(&self) -> &HostDocument {
        &self.document
    }

    /// Mutable access to the page's elements.
    pub fn document_mut(&mut self) -> &mut HostDocument {
        &mut self.document
    }

    /// The widgets registered so far.
    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    /// Mutable access to the registry (what a bundle writes to).
    pub fn registry_mut(&mut self) -> &mut WidgetRegistry {
        &mut self.registry
    }

    /// Live render roots.
    pub fn roots(&self) -> &RenderRoots {
        &self.roots
    }

    /// `registry[identifier].mount(node, raw)`.
    ///
    /// Like the mount function itself this never fails: an unregistered
    /// identifier is logged and nothing happens.
    pub fn mount(&mut self, identifier: &str, node: Option<NodeId>, raw: &Value) {
        let Some(entry) = self.registry.get(identifier) else {
            error!("{}", MountError::NotRegistered(identifier.to_string()));
            return;
        };
        entry
            .mount
            .mount(&mut self.document, &mut self.roots, node, raw);
    }

    /// Detaches `node` from the page and drops its render root.
    pub fn remove_element(&mut self, node: NodeId) -> bool {
        self.roots.release(node);
        self.document.remove(node)
    }

    /// Releases the render root of `node`. False if the widget is not
    /// registered or nothing was mounted there.
    pub fn unmount(&mut self, identifier: &str, node: NodeId) -> bool {
        match self.registry.get(identifier) {
            Some(entry) => entry
                .mount
                .unmount(&mut self.document, &mut self.roots, node),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::WidgetCatalog;
    use serde_json::json;

    #[test]
    fn last_registration_wins() {
        let catalog = WidgetCatalog::builtin();
        let mut registry = WidgetRegistry::new();

        let hero = catalog.get("hero").unwrap().entry();
        let strategy = catalog.get("strategy").unwrap().entry();

        assert!(registry.register("hero", hero).is_none());
        let replaced = registry.register("hero", strategy);

        assert_eq!(replaced.map(|e| e.metadata.name), Some("HeroSection".to_string()));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("hero").unwrap().metadata.name, "StrategySection");
    }

    #[test]
    fn removing_elements_frees_their_roots() {
        let catalog = WidgetCatalog::builtin();
        let mut session = HostSession::new();
        session
            .registry_mut()
            .register("hero", catalog.get("hero").unwrap().entry());

        for _ in 0..10 {
            let node = session.document_mut().create_element("div");
            session.mount("hero", Some(node), &json!({ "rating": 3 }));
            assert_eq!(session.roots().len(), 1);
            assert!(session.remove_element(node));
        }

        assert!(session.document().is_empty());
        assert!(session.roots().is_empty());
    }

    #[test]
    fn mounting_an_unregistered_widget_is_a_no_op() {
        let mut session = HostSession::new();
        let node = session.document_mut().create_element("div");

        session.mount("hero", Some(node), &json!({}));

        assert_eq!(session.document().inner_html(node), Some(""));
        assert!(session.roots().is_empty());
        assert!(!session.unmount("hero", node));
    }
}
