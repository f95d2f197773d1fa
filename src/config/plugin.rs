//! Plugin references
//!
//! Plugins are opaque to the resolver. A reference names the plugin module
//! and optionally carries the options passed to its factory; the generation
//! engine decides what to do with it. References are shared, never cloned,
//! so the engine can compare them by identity with [`PluginRef::ptr_eq`].

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::sync::Arc;

use super::error::{join_path, ResolveError};

/// Field names accepted in the object form of a plugin reference
const PLUGIN_FIELDS: &[&str] = &["name", "options"];

const PLUGIN_EXPECTED: &str =
    "a plugin reference (module specifier string or mapping with `name`)";

/// What a plugin reference points at
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginSpec {
    /// Module specifier (e.g. `@tailwindcss/forms`)
    pub name: String,

    /// Options handed to the plugin factory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

/// Shared handle to a plugin specification.
///
/// `==` compares the referenced specs, so two resolutions of the same input
/// are equal. Use [`PluginRef::ptr_eq`] to check identity.
#[derive(Debug, Clone)]
pub struct PluginRef(Arc<PluginSpec>);

impl PluginRef {
    pub fn new(spec: PluginSpec) -> Self {
        Self(Arc::new(spec))
    }

    /// Reference to a plugin with no options
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(PluginSpec {
            name: name.into(),
            options: None,
        })
    }

    pub fn spec(&self) -> &PluginSpec {
        &self.0
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// True when both handles share one allocation
    pub fn ptr_eq(a: &PluginRef, b: &PluginRef) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Validate one entry of the `plugins` sequence
    pub(crate) fn from_value(value: &Value, path: &str) -> Result<Self, ResolveError> {
        match value {
            Value::String(name) if !name.trim().is_empty() => Ok(Self::named(name.clone())),
            Value::Object(map) => {
                if let Some(unknown) = map.keys().find(|k| !PLUGIN_FIELDS.contains(&k.as_str())) {
                    return Err(ResolveError::unknown_field(path, unknown, PLUGIN_FIELDS));
                }

                let name_path = join_path(path, "name");
                let name = match map.get("name") {
                    Some(Value::String(name)) if !name.trim().is_empty() => name.clone(),
                    Some(other) => {
                        return Err(ResolveError::wrong_type(
                            &name_path,
                            "a non-empty module specifier",
                            other,
                        ))
                    }
                    None => {
                        return Err(ResolveError::wrong_type(
                            &name_path,
                            "a non-empty module specifier",
                            &Value::Null,
                        ))
                    }
                };

                Ok(Self::new(PluginSpec {
                    name,
                    options: map.get("options").cloned(),
                }))
            }
            other => Err(ResolveError::wrong_type(path, PLUGIN_EXPECTED, other)),
        }
    }
}

impl PartialEq for PluginRef {
    fn eq(&self, other: &Self) -> bool {
        PluginRef::ptr_eq(self, other) || self.0 == other.0
    }
}

impl Serialize for PluginRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_reference() {
        let plugin = PluginRef::from_value(&json!("@tailwindcss/forms"), "plugins[0]").unwrap();
        assert_eq!(plugin.name(), "@tailwindcss/forms");
        assert!(plugin.spec().options.is_none());
    }

    #[test]
    fn test_object_reference_with_options() {
        let plugin = PluginRef::from_value(
            &json!({"name": "@tailwindcss/typography", "options": {"className": "prose"}}),
            "plugins[0]",
        )
        .unwrap();
        assert_eq!(plugin.name(), "@tailwindcss/typography");
        assert_eq!(plugin.spec().options, Some(json!({"className": "prose"})));
    }

    #[test]
    fn test_rejects_non_invocable_entries() {
        for value in [json!(1), json!(null), json!(true), json!([]), json!("  ")] {
            let err = PluginRef::from_value(&value, "plugins[1]").unwrap_err();
            assert!(matches!(err, ResolveError::Type { .. }), "{:?}", value);
            assert_eq!(err.path(), "plugins[1]");
        }
    }

    #[test]
    fn test_rejects_missing_name() {
        let err = PluginRef::from_value(&json!({"options": {}}), "plugins[0]").unwrap_err();
        assert_eq!(err.path(), "plugins[0].name");
    }

    #[test]
    fn test_rejects_unknown_plugin_field() {
        let err =
            PluginRef::from_value(&json!({"name": "x", "option": {}}), "plugins[0]").unwrap_err();
        match err {
            ResolveError::Schema { path, suggestion, .. } => {
                assert_eq!(path, "plugins[0].option");
                assert_eq!(suggestion.as_deref(), Some("options"));
            }
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_equality_compares_specs() {
        let a = PluginRef::named("p");
        let b = PluginRef::named("p");
        let a2 = a.clone();
        assert_eq!(a, a2);
        assert!(PluginRef::ptr_eq(&a, &a2));
        assert_eq!(a, b);
        assert!(!PluginRef::ptr_eq(&a, &b));
        assert_ne!(a, PluginRef::named("q"));
    }

    #[test]
    fn test_equality_includes_options() {
        let plain = PluginRef::named("p");
        let configured = PluginRef::new(PluginSpec {
            name: "p".to_string(),
            options: Some(json!({"strategy": "class"})),
        });
        assert_ne!(plain, configured);
    }

    #[test]
    fn test_serializes_as_spec() {
        let plugin = PluginRef::named("@tailwindcss/forms");
        assert_eq!(
            serde_json::to_value(&plugin).unwrap(),
            json!({"name": "@tailwindcss/forms"})
        );
    }
}
