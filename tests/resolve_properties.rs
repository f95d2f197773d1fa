//! Resolution properties
//!
//! Replace vs extend, content pass-through, plugin ordering and identity,
//! unknown field rejection, idempotence.

use serde_json::json;
use utility_css_config::config::{PluginRef, ThemeKey, TokenValue, UserConfig};
use utility_css_config::{resolve, BuiltinDefaults, EffectiveConfig, ResolveError};

fn helvetica_georgia() -> BuiltinDefaults {
    BuiltinDefaults::from_value(&json!({
        "theme": {
            "fontFamily": {"sans": ["Helvetica"], "serif": ["Georgia"]}
        }
    }))
    .expect("valid defaults")
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_top_level_font_family_replaces_defaults() {
    let defaults = BuiltinDefaults::from_value(&json!({
        "theme": {"fontFamily": {"sans": ["Helvetica"]}}
    }))
    .unwrap();

    let config = resolve(
        &json!({"theme": {"fontFamily": {"sans": ["Arial", "sans-serif"]}}}),
        &defaults,
    )
    .unwrap();

    assert_eq!(
        config.get_stack("fontFamily.sans").unwrap(),
        strings(&["Arial", "sans-serif"]).as_slice()
    );
}

#[test]
fn test_extend_font_family_keeps_siblings() {
    let config = resolve(
        &json!({"theme": {"extend": {"fontFamily": {"sans": ["Arial"]}}}}),
        &helvetica_georgia(),
    )
    .unwrap();

    assert_eq!(config.get_stack("fontFamily.sans").unwrap(), strings(&["Arial"]).as_slice());
    assert_eq!(config.get_stack("fontFamily.serif").unwrap(), strings(&["Georgia"]).as_slice());
}

#[test]
fn test_override_and_extend_paths_differ() {
    let defaults = helvetica_georgia();
    let fonts = json!({"sans": ["Arial"]});

    let replaced = resolve(&json!({"theme": {"fontFamily": fonts.clone()}}), &defaults).unwrap();
    let extended = resolve(&json!({"theme": {"extend": {"fontFamily": fonts}}}), &defaults).unwrap();

    assert_eq!(replaced.get("fontFamily.serif"), None);
    assert!(extended.get("fontFamily.serif").is_some());
    assert_ne!(replaced.theme(), extended.theme());
}

#[test]
fn test_content_passes_through_in_order() {
    let globs = ["./index.html", "./target/scala-*/frontend-*/*.js"];
    let config = resolve(&json!({"content": globs}), &BuiltinDefaults::default()).unwrap();

    assert_eq!(config.content(), globs);
}

#[test]
fn test_content_duplicates_are_kept() {
    let config = resolve(
        &json!({"content": ["./a.html", "./a.html"]}),
        &BuiltinDefaults::default(),
    )
    .unwrap();

    assert_eq!(config.content().len(), 2);
}

#[test]
fn test_empty_content_is_not_an_error() {
    let config = resolve(&json!({"content": []}), &BuiltinDefaults::default()).unwrap();
    assert!(config.content().is_empty());
}

#[test]
fn test_unknown_top_level_field_is_rejected() {
    let err = resolve(
        &json!({"content": ["./index.html"], "foo": 1}),
        &BuiltinDefaults::default(),
    )
    .unwrap_err();

    match err {
        ResolveError::Schema { field, .. } => assert_eq!(field, "foo"),
        other => panic!("expected schema error, got {:?}", other),
    }
}

#[test]
fn test_unknown_extend_field_is_rejected() {
    let err = resolve(
        &json!({"theme": {"extend": {"fontSizes": {}}}}),
        &BuiltinDefaults::default(),
    )
    .unwrap_err();

    assert_eq!(err.path(), "theme.extend.fontSizes");
}

#[test]
fn test_wrong_shape_reports_path() {
    let err = resolve(&json!({"content": "./index.html"}), &BuiltinDefaults::default()).unwrap_err();

    assert!(matches!(err, ResolveError::Type { .. }));
    assert_eq!(err.path(), "content");
    assert!(err.to_string().contains("content"));
}

#[test]
fn test_plugin_order_and_identity_preserved() {
    let p1 = PluginRef::named("first");
    let p2 = PluginRef::named("second");
    let user = UserConfig {
        plugins: vec![p1.clone(), p2.clone()],
        ..UserConfig::default()
    };

    let config = EffectiveConfig::resolve(&user, &BuiltinDefaults::default());
    let plugins = config.plugins();

    assert_eq!(plugins.len(), 2);
    assert!(PluginRef::ptr_eq(&plugins[0], &p1));
    assert!(PluginRef::ptr_eq(&plugins[1], &p2));
}

#[test]
fn test_plugins_from_value_keep_order() {
    let config = resolve(
        &json!({"plugins": ["b-plugin", {"name": "a-plugin"}, "c-plugin"]}),
        &BuiltinDefaults::default(),
    )
    .unwrap();

    let names: Vec<&str> = config.plugins().iter().map(|p| p.name()).collect();
    assert_eq!(names, ["b-plugin", "a-plugin", "c-plugin"]);
}

#[test]
fn test_resolve_is_idempotent() {
    let user = UserConfig::from_value(&json!({
        "content": ["./index.html"],
        "theme": {
            "fontFamily": {"sans": ["Arial"]},
            "extend": {"colors": {"gray": {"500": "#555"}}}
        },
        "plugins": ["@tailwindcss/forms"]
    }))
    .unwrap();
    let defaults = BuiltinDefaults::default();

    let first = EffectiveConfig::resolve(&user, &defaults);
    let second = EffectiveConfig::resolve(&user, &defaults);

    assert_eq!(first, second);
    assert_eq!(first.fingerprint().unwrap(), second.fingerprint().unwrap());
}

#[test]
fn test_resolve_from_value_is_idempotent() {
    let user = json!({
        "content": ["./index.html"],
        "theme": {"extend": {"fontFamily": {"sans": ["Arial"]}}},
        "plugins": ["@tailwindcss/forms", {"name": "@tailwindcss/typography", "options": {"className": "prose"}}]
    });
    let defaults = BuiltinDefaults::default();

    let first = resolve(&user, &defaults).unwrap();
    let second = resolve(&user, &defaults).unwrap();

    assert_eq!(first, second);
    assert!(!PluginRef::ptr_eq(&first.plugins()[0], &second.plugins()[0]));
}

#[test]
fn test_inputs_are_not_mutated() {
    let user = UserConfig::from_value(&json!({
        "theme": {"extend": {"fontFamily": {"sans": ["Arial"]}}}
    }))
    .unwrap();
    let defaults = helvetica_georgia();
    let user_before = user.clone();
    let defaults_before = defaults.clone();

    let _ = EffectiveConfig::resolve(&user, &defaults);

    assert_eq!(user, user_before);
    assert_eq!(defaults, defaults_before);
}

#[test]
fn test_extend_colors_deep_merges_groups() {
    let config = resolve(
        &json!({"theme": {"extend": {"colors": {"blue": {"500": "#0000ff"}, "brand": "#0f766e"}}}}),
        &BuiltinDefaults::default(),
    )
    .unwrap();

    assert_eq!(config.get_str("colors.blue.500"), Some("#0000ff"));
    assert_eq!(config.get_str("colors.blue.600"), Some("#2563eb"));
    assert_eq!(config.get_str("colors.brand"), Some("#0f766e"));
    assert_eq!(config.get_str("colors.white"), Some("#fff"));
}

#[test]
fn test_untouched_categories_keep_builtin_defaults() {
    let defaults = BuiltinDefaults::default();
    let config = resolve(&json!({"theme": {"fontFamily": {"sans": ["Arial"]}}}), &defaults).unwrap();

    for key in [ThemeKey::Colors, ThemeKey::Spacing, ThemeKey::Screens, ThemeKey::BorderRadius] {
        assert_eq!(config.scale(key), defaults.scale(key), "{}", key);
    }
    assert_eq!(
        config.get("fontFamily.sans"),
        Some(&TokenValue::stack(["Arial"]))
    );
}
