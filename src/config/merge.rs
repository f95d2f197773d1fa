//! Theme merge logic
//!
//! Two distinct paths combine user tokens with defaults:
//! - `theme.<key>`: REPLACE the default category wholesale
//! - `theme.extend.<key>`: deep-merge into the category by token name
//!
//! Within a deep merge:
//! - Groups: deep-merge by key (recursive)
//! - Stacks: REPLACE (no concatenation)
//! - Scalars: override (extend wins)

use tracing::debug;

use super::schema::{ThemeConfig, ThemeScales, TokenScale, TokenValue};

/// Deep merge two tokens; the overlay has precedence.
pub fn merge_token(base: TokenValue, overlay: TokenValue) -> TokenValue {
    match (base, overlay) {
        // Both groups: deep merge
        (TokenValue::Group(base_group), TokenValue::Group(overlay_group)) => {
            TokenValue::Group(merge_scale(base_group, overlay_group))
        }

        // Stacks, scalars and mismatched shapes: overlay wins
        (_, overlay) => overlay,
    }
}

/// Deep merge two token scales by token name.
///
/// Names only present in `base` keep their value.
pub fn merge_scale(mut base: TokenScale, overlay: TokenScale) -> TokenScale {
    for (name, overlay_token) in overlay {
        let merged = match base.remove(&name) {
            Some(base_token) => merge_token(base_token, overlay_token),
            None => overlay_token,
        };
        base.insert(name, merged);
    }
    base
}

/// Combine default scales with a user theme.
///
/// Replacements are applied first, then `extend` merges into whatever the
/// category holds at that point, so a category can be both replaced and
/// extended in one config.
pub fn merge_theme(defaults: &ThemeScales, theme: &ThemeConfig) -> ThemeScales {
    let mut resolved = defaults.clone();

    for (key, scale) in &theme.overrides {
        debug!(category = %key, tokens = scale.len(), "replacing default theme category");
        resolved.insert(*key, scale.clone());
    }

    for (key, scale) in &theme.extend {
        debug!(category = %key, tokens = scale.len(), "extending theme category");
        let base = resolved.remove(key).unwrap_or_default();
        resolved.insert(*key, merge_scale(base, scale.clone()));
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ThemeKey;

    fn fonts(entries: &[(&str, &[&str])]) -> TokenScale {
        entries
            .iter()
            .map(|(name, stack)| (name.to_string(), TokenValue::stack(stack.iter().copied())))
            .collect()
    }

    fn group(entries: &[(&str, &str)]) -> TokenValue {
        TokenValue::Group(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), TokenValue::scalar(*v)))
                .collect(),
        )
    }

    fn default_fonts() -> ThemeScales {
        ThemeScales::from([(
            ThemeKey::FontFamily,
            fonts(&[("sans", &["Helvetica"]), ("serif", &["Georgia"])]),
        )])
    }

    #[test]
    fn test_scalar_override() {
        let merged = merge_token(TokenValue::scalar("640px"), TokenValue::scalar("600px"));
        assert_eq!(merged, TokenValue::scalar("600px"));
    }

    #[test]
    fn test_stack_replace() {
        let merged = merge_token(
            TokenValue::stack(["Helvetica", "Arial"]),
            TokenValue::stack(["Inter"]),
        );
        assert_eq!(merged, TokenValue::stack(["Inter"]));
    }

    #[test]
    fn test_group_deep_merge() {
        let base = group(&[("50", "#eff6ff"), ("500", "#3b82f6")]);
        let overlay = group(&[("500", "#0000ff"), ("550", "#0000aa")]);

        let merged = merge_token(base, overlay);
        let merged = merged.as_group().unwrap();

        assert_eq!(merged["50"], TokenValue::scalar("#eff6ff"));
        assert_eq!(merged["500"], TokenValue::scalar("#0000ff"));
        assert_eq!(merged["550"], TokenValue::scalar("#0000aa"));
    }

    #[test]
    fn test_scalar_replaces_group() {
        let merged = merge_token(group(&[("500", "#3b82f6")]), TokenValue::scalar("#00f"));
        assert_eq!(merged, TokenValue::scalar("#00f"));
    }

    #[test]
    fn test_override_replaces_category() {
        let theme = ThemeConfig {
            overrides: ThemeScales::from([(
                ThemeKey::FontFamily,
                fonts(&[("sans", &["Arial", "sans-serif"])]),
            )]),
            extend: ThemeScales::new(),
        };

        let resolved = merge_theme(&default_fonts(), &theme);
        let family = &resolved[&ThemeKey::FontFamily];

        assert_eq!(family["sans"], TokenValue::stack(["Arial", "sans-serif"]));
        // serif was a default of the replaced category, so it is gone
        assert!(!family.contains_key("serif"));
    }

    #[test]
    fn test_extend_merges_category() {
        let theme = ThemeConfig {
            overrides: ThemeScales::new(),
            extend: ThemeScales::from([(ThemeKey::FontFamily, fonts(&[("sans", &["Arial"])]))]),
        };

        let resolved = merge_theme(&default_fonts(), &theme);
        let family = &resolved[&ThemeKey::FontFamily];

        assert_eq!(family["sans"], TokenValue::stack(["Arial"]));
        assert_eq!(family["serif"], TokenValue::stack(["Georgia"]));
    }

    #[test]
    fn test_extend_applies_after_override() {
        let theme = ThemeConfig {
            overrides: ThemeScales::from([(ThemeKey::FontFamily, fonts(&[("sans", &["Arial"])]))]),
            extend: ThemeScales::from([(ThemeKey::FontFamily, fonts(&[("mono", &["Menlo"])]))]),
        };

        let resolved = merge_theme(&default_fonts(), &theme);
        let family = &resolved[&ThemeKey::FontFamily];

        assert_eq!(family.len(), 2);
        assert_eq!(family["sans"], TokenValue::stack(["Arial"]));
        assert_eq!(family["mono"], TokenValue::stack(["Menlo"]));
    }

    #[test]
    fn test_extend_category_without_default() {
        let theme = ThemeConfig {
            overrides: ThemeScales::new(),
            extend: ThemeScales::from([(
                ThemeKey::Screens,
                TokenScale::from([("3xl".to_string(), TokenValue::scalar("1920px"))]),
            )]),
        };

        let resolved = merge_theme(&default_fonts(), &theme);

        assert_eq!(resolved[&ThemeKey::Screens]["3xl"], TokenValue::scalar("1920px"));
        assert_eq!(resolved[&ThemeKey::FontFamily], default_fonts()[&ThemeKey::FontFamily]);
    }

    #[test]
    fn test_untouched_categories_keep_defaults() {
        let resolved = merge_theme(&default_fonts(), &ThemeConfig::default());
        assert_eq!(resolved, default_fonts());
    }
}
