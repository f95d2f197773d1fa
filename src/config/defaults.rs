//! Built-in theme defaults
//!
//! The token categories the generation engine ships with. User configs
//! either replace a category (`theme.<key>`) or merge into it
//! (`theme.extend.<key>`). Defaults carry no content globs and no plugins.

use serde_json::Value;

use super::error::ResolveError;
use super::schema::{parse_scales, scales_to_value, ThemeKey, ThemeScales, TokenScale, TokenValue};

/// Built-in default configuration
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinDefaults {
    /// Default token scales per category
    pub theme: ThemeScales,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        let mut theme = ThemeScales::new();
        theme.insert(ThemeKey::FontFamily, default_font_family());
        theme.insert(ThemeKey::Colors, default_colors());
        theme.insert(ThemeKey::Spacing, default_spacing());
        theme.insert(
            ThemeKey::Screens,
            scalars(&[
                ("sm", "640px"),
                ("md", "768px"),
                ("lg", "1024px"),
                ("xl", "1280px"),
                ("2xl", "1536px"),
            ]),
        );
        theme.insert(
            ThemeKey::BorderRadius,
            scalars(&[
                ("none", "0px"),
                ("sm", "0.125rem"),
                ("DEFAULT", "0.25rem"),
                ("md", "0.375rem"),
                ("lg", "0.5rem"),
                ("xl", "0.75rem"),
                ("2xl", "1rem"),
                ("3xl", "1.5rem"),
                ("full", "9999px"),
            ]),
        );
        Self { theme }
    }
}

impl BuiltinDefaults {
    /// Defaults with no token categories at all
    pub fn empty() -> Self {
        Self {
            theme: ThemeScales::new(),
        }
    }

    /// Load replacement defaults from a `{ "theme": { ... } }` value.
    ///
    /// Only token categories are accepted; `extend`, `content` and
    /// `plugins` have no meaning for defaults.
    pub fn from_value(value: &Value) -> Result<Self, ResolveError> {
        let map = value
            .as_object()
            .ok_or_else(|| ResolveError::wrong_type("", "a defaults mapping", value))?;

        let mut defaults = Self::empty();
        for (field, field_value) in map {
            if field != "theme" {
                return Err(ResolveError::unknown_field("", field, &["theme"]));
            }
            let theme = field_value
                .as_object()
                .ok_or_else(|| ResolveError::wrong_type("theme", "a mapping", field_value))?;
            let candidates = ThemeKey::ALL.map(ThemeKey::as_str);
            defaults.theme = parse_scales(theme, "theme", &candidates)?;
        }

        Ok(defaults)
    }

    /// Convert to JSON Value
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "theme": scales_to_value(&self.theme)
        })
    }

    /// Default scale for one category, if any
    pub fn scale(&self, key: ThemeKey) -> Option<&TokenScale> {
        self.theme.get(&key)
    }
}

fn stack(items: &[&str]) -> TokenValue {
    TokenValue::stack(items.iter().copied())
}

fn scalars(entries: &[(&str, &str)]) -> TokenScale {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), TokenValue::scalar(*value)))
        .collect()
}

fn default_font_family() -> TokenScale {
    TokenScale::from([
        (
            "sans".to_string(),
            stack(&[
                "ui-sans-serif",
                "system-ui",
                "sans-serif",
                "\"Apple Color Emoji\"",
                "\"Segoe UI Emoji\"",
                "\"Segoe UI Symbol\"",
                "\"Noto Color Emoji\"",
            ]),
        ),
        (
            "serif".to_string(),
            stack(&[
                "ui-serif",
                "Georgia",
                "Cambria",
                "\"Times New Roman\"",
                "Times",
                "serif",
            ]),
        ),
        (
            "mono".to_string(),
            stack(&[
                "ui-monospace",
                "SFMono-Regular",
                "Menlo",
                "Monaco",
                "Consolas",
                "\"Liberation Mono\"",
                "\"Courier New\"",
                "monospace",
            ]),
        ),
    ])
}

fn default_colors() -> TokenScale {
    let mut colors = scalars(&[
        ("inherit", "inherit"),
        ("current", "currentColor"),
        ("transparent", "transparent"),
        ("black", "#000"),
        ("white", "#fff"),
    ]);
    colors.insert(
        "gray".to_string(),
        TokenValue::Group(scalars(&[
            ("50", "#f9fafb"),
            ("100", "#f3f4f6"),
            ("200", "#e5e7eb"),
            ("300", "#d1d5db"),
            ("400", "#9ca3af"),
            ("500", "#6b7280"),
            ("600", "#4b5563"),
            ("700", "#374151"),
            ("800", "#1f2937"),
            ("900", "#111827"),
            ("950", "#030712"),
        ])),
    );
    colors.insert(
        "blue".to_string(),
        TokenValue::Group(scalars(&[
            ("50", "#eff6ff"),
            ("100", "#dbeafe"),
            ("200", "#bfdbfe"),
            ("300", "#93c5fd"),
            ("400", "#60a5fa"),
            ("500", "#3b82f6"),
            ("600", "#2563eb"),
            ("700", "#1d4ed8"),
            ("800", "#1e40af"),
            ("900", "#1e3a8a"),
            ("950", "#172554"),
        ])),
    );
    colors
}

fn default_spacing() -> TokenScale {
    scalars(&[
        ("px", "1px"),
        ("0", "0px"),
        ("0.5", "0.125rem"),
        ("1", "0.25rem"),
        ("1.5", "0.375rem"),
        ("2", "0.5rem"),
        ("2.5", "0.625rem"),
        ("3", "0.75rem"),
        ("3.5", "0.875rem"),
        ("4", "1rem"),
        ("5", "1.25rem"),
        ("6", "1.5rem"),
        ("7", "1.75rem"),
        ("8", "2rem"),
        ("9", "2.25rem"),
        ("10", "2.5rem"),
        ("11", "2.75rem"),
        ("12", "3rem"),
        ("14", "3.5rem"),
        ("16", "4rem"),
        ("20", "5rem"),
        ("24", "6rem"),
        ("28", "7rem"),
        ("32", "8rem"),
        ("36", "9rem"),
        ("40", "10rem"),
        ("44", "11rem"),
        ("48", "12rem"),
        ("52", "13rem"),
        ("56", "14rem"),
        ("60", "15rem"),
        ("64", "16rem"),
        ("72", "18rem"),
        ("80", "20rem"),
        ("96", "24rem"),
    ])
}
