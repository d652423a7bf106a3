//! Self-registering widget bundles.
//!
//! A [`Bundle`] has two faces. Over HTTP it is a script whose only effect
//! is `window[namespace][identifier] = {component, mount, unmount, metadata}`;
//! its in-page `mount` posts the raw props to `/widgets/{id}/render` and
//! swaps the returned markup into the element. In Rust, [`Bundle::execute`]
//! performs the same registration into a [`HostSession`].

use serde_json::Value;

use crate::catalog::WidgetDefinition;
use crate::components::render_error_block;
use crate::error::BundleError;
use crate::mount::MOUNT_FAILURE_MESSAGE;
use crate::registry::HostSession;

const SCRIPT_TEMPLATE: &str = r#"(function () {
  'use strict';

  var NAMESPACE = __NAMESPACE__;
  var ID = __ID__;
  var METADATA = __METADATA__;
  var ERROR_BLOCK = __ERROR_BLOCK__;
  var BASE_URL = __BASE_URL__;

  var script = document.currentScript;
  if (!BASE_URL && script && script.src) {
    BASE_URL = new URL(script.src, window.location.href).origin;
  }
  var ENDPOINT = BASE_URL + '/widgets/' + encodeURIComponent(ID) + '/render';

  function component(props) {
    return fetch(ENDPOINT, {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify(props || {})
    }).then(function (res) {
      if (!res.ok) {
        throw new Error('render request failed with status ' + res.status);
      }
      return res.text();
    });
  }

  function mount(element, props) {
    if (!element) {
      console.error('[' + ID + '] Mount element not found');
      return;
    }
    var root = element.__sectionWidgetRoot;
    if (!root || root.widget !== ID) {
      root = element.__sectionWidgetRoot = { widget: ID, seq: 0 };
    }
    var seq = ++root.seq;

    function current() {
      return element.__sectionWidgetRoot === root && root.seq === seq;
    }

    function fail(error) {
      console.error('[' + ID + '] Failed to mount widget:', error);
      if (current()) {
        element.innerHTML = ERROR_BLOCK;
      }
    }

    try {
      component(props).then(function (html) {
        if (current()) {
          element.innerHTML = html;
        }
      }).catch(fail);
    } catch (error) {
      fail(error);
    }
  }

  function unmount(element) {
    if (!element || !element.__sectionWidgetRoot) {
      return false;
    }
    element.__sectionWidgetRoot.seq++;
    delete element.__sectionWidgetRoot;
    element.innerHTML = '';
    return true;
  }

  window[NAMESPACE] = window[NAMESPACE] || {};
  window[NAMESPACE][ID] = {
    component: component,
    mount: mount,
    unmount: unmount,
    metadata: METADATA
  };
})();
"#;

/// A widget bundle for one registry namespace.
#[derive(Clone, Debug)]
pub struct Bundle {
    definition: WidgetDefinition,
    namespace: String,
    script: String,
}

impl Bundle {
    /// Builds the bundle of `definition`.
    ///
    /// Fails if `namespace` is not a plain JavaScript identifier or the
    /// metadata cannot be encoded.
    pub fn new(
        definition: WidgetDefinition,
        namespace: &str,
        base_url: &str,
    ) -> Result<Self, BundleError> {
        if !is_js_identifier(namespace) {
            return Err(BundleError::InvalidNamespace(namespace.to_string()));
        }
        let script = render_script(&definition, namespace, base_url.trim_end_matches('/'))?;
        Ok(Self {
            definition,
            namespace: namespace.to_string(),
            script,
        })
    }

    /// Identifier of the bundled widget.
    pub fn identifier(&self) -> &str {
        &self.definition.identifier
    }

    /// Registry namespace the script writes to.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The JavaScript served to host pages.
    pub fn script(&self) -> &str {
        &self.script
    }

    /// Consumes the bundle, returning the script.
    pub fn into_script(self) -> String {
        self.script
    }

    /// Runs the bundle in `session`: registers the widget, nothing else.
    pub fn execute(&self, session: &mut HostSession) {
        session
            .registry_mut()
            .register(self.definition.identifier.clone(), self.definition.entry());
    }
}

fn render_script(
    definition: &WidgetDefinition,
    namespace: &str,
    base_url: &str,
) -> Result<String, BundleError> {
    let error_block = render_error_block(MOUNT_FAILURE_MESSAGE).into_string();
    Ok(SCRIPT_TEMPLATE
        .replace("__NAMESPACE__", &js_literal(&Value::from(namespace))?)
        .replace("__ID__", &js_literal(&Value::from(definition.identifier.as_str()))?)
        .replace("__METADATA__", &js_literal(&serde_json::to_value(&definition.metadata)?)?)
        .replace("__ERROR_BLOCK__", &js_literal(&Value::from(error_block))?)
        .replace("__BASE_URL__", &js_literal(&Value::from(base_url))?))
}

/// JSON is valid JavaScript; `<` is escaped so no value can close a
/// surrounding `<script>` element when the bundle is inlined.
fn js_literal(value: &Value) -> Result<String, BundleError> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}

fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::WidgetCatalog;
    use serde_json::json;

    fn hero_bundle(namespace: &str, base_url: &str) -> Result<Bundle, BundleError> {
        WidgetCatalog::builtin().bundle("hero", namespace, base_url)
    }

    #[test]
    fn script_registers_under_namespace() {
        let bundle = hero_bundle("SectionWidgets", "https://widgets.example.com/").unwrap();
        let script = bundle.script();

        assert!(script.starts_with("(function () {"));
        assert!(script.contains(r#"var NAMESPACE = "SectionWidgets";"#));
        assert!(script.contains(r#"var ID = "hero";"#));
        assert!(script.contains(r#"var BASE_URL = "https://widgets.example.com";"#));
        assert!(script.contains("window[NAMESPACE][ID] = {"));
        assert!(script.contains(r#""name":"HeroSection""#));
        assert!(!script.contains("__METADATA__"));
    }

    #[test]
    fn script_has_no_raw_angle_brackets_in_literals() {
        let bundle = hero_bundle("SectionWidgets", "").unwrap();
        assert!(!bundle.script().contains("<span"));
        assert!(bundle.script().contains("widget-error"));
    }

    #[test]
    fn late_responses_are_dropped_after_unmount() {
        let bundle = hero_bundle("SectionWidgets", "").unwrap();
        let script = bundle.script();

        let guard = "element.__sectionWidgetRoot === root && root.seq === seq";
        assert!(script.contains(guard));
        assert_eq!(script.matches("if (current())").count(), 2);

        let unmount = &script[script.find("function unmount").unwrap()..];
        let bump = unmount.find("element.__sectionWidgetRoot.seq++").unwrap();
        let delete = unmount.find("delete element.__sectionWidgetRoot").unwrap();
        assert!(bump < delete);
    }

    #[test]
    fn namespace_must_be_an_identifier() {
        for bad in ["", "1abc", "a-b", "window.x", "x\"]"] {
            assert!(matches!(
                hero_bundle(bad, ""),
                Err(BundleError::InvalidNamespace(_))
            ));
        }
        assert!(hero_bundle("$widgets_2", "").is_ok());
    }

    #[test]
    fn execute_only_registers() {
        let bundle = hero_bundle("SectionWidgets", "").unwrap();
        let mut session = HostSession::new();

        bundle.execute(&mut session);

        assert!(session.registry().contains("hero"));
        assert_eq!(session.registry().len(), 1);
        assert!(session.document().is_empty());
        assert!(session.roots().is_empty());
    }

    #[test]
    fn hero_end_to_end() {
        let bundle = hero_bundle("SectionWidgets", "").unwrap();
        let mut session = HostSession::new();
        bundle.execute(&mut session);

        let node = session.document_mut().create_element("div");
        session.mount(
            "hero",
            Some(node),
            &json!({ "rating": 10, "title": "<span class=\"highlight\">X</span>" }),
        );

        let html = session.document().inner_html(node).unwrap();
        assert_eq!(html.matches(r#"class="star star--"#).count(), 5);
        assert_eq!(html.matches("star star--full").count(), 5);
        assert_eq!(html.matches(r#"class="highlight "#).count(), 1);
        assert!(html.contains(">X</span>"));
    }
}
