//! Recognized configuration schema
//!
//! A user configuration is validated eagerly into typed structs. Unknown
//! field names are schema errors and wrongly shaped values are type errors,
//! both reported with the dotted path of the offending field.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use super::error::{join_path, ResolveError};
use super::plugin::PluginRef;

/// Recognized top-level fields
pub const TOP_LEVEL_FIELDS: &[&str] = &["content", "theme", "plugins"];

/// Name of the non-destructive theme merge path
pub const EXTEND_FIELD: &str = "extend";

/// A named token scale, e.g. the entries of `fontFamily`
pub type TokenScale = BTreeMap<String, TokenValue>;

/// Token categories keyed by category
pub type ThemeScales = BTreeMap<ThemeKey, TokenScale>;

/// Theme token categories understood by the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ThemeKey {
    BorderRadius,
    Colors,
    FontFamily,
    Screens,
    Spacing,
}

/// Value shape accepted by a token category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleShape {
    /// Each entry is an ordered fallback stack (a lone string becomes a one-item stack)
    Stacks,
    /// Each entry is a single string
    Scalars,
    /// Each entry is a string or a one-level mapping of strings
    NestedScalars,
}

impl ThemeKey {
    pub const ALL: [ThemeKey; 5] = [
        ThemeKey::BorderRadius,
        ThemeKey::Colors,
        ThemeKey::FontFamily,
        ThemeKey::Screens,
        ThemeKey::Spacing,
    ];

    /// Field name as written in configuration files
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeKey::BorderRadius => "borderRadius",
            ThemeKey::Colors => "colors",
            ThemeKey::FontFamily => "fontFamily",
            ThemeKey::Screens => "screens",
            ThemeKey::Spacing => "spacing",
        }
    }

    /// Case-sensitive lookup by field name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }

    pub fn shape(self) -> ScaleShape {
        match self {
            ThemeKey::FontFamily => ScaleShape::Stacks,
            ThemeKey::Colors => ScaleShape::NestedScalars,
            ThemeKey::BorderRadius | ThemeKey::Screens | ThemeKey::Spacing => ScaleShape::Scalars,
        }
    }

    fn field_names() -> [&'static str; 5] {
        Self::ALL.map(ThemeKey::as_str)
    }
}

impl fmt::Display for ThemeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single theme token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TokenValue {
    Scalar(String),
    Stack(Vec<String>),
    Group(TokenScale),
}

impl TokenValue {
    pub fn scalar(value: impl Into<String>) -> Self {
        TokenValue::Scalar(value.into())
    }

    pub fn stack<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TokenValue::Stack(items.into_iter().map(Into::into).collect())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TokenValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_stack(&self) -> Option<&[String]> {
        match self {
            TokenValue::Stack(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&TokenScale> {
        match self {
            TokenValue::Group(group) => Some(group),
            _ => None,
        }
    }

    /// Convert to a JSON value
    pub fn to_value(&self) -> Value {
        match self {
            TokenValue::Scalar(s) => Value::String(s.clone()),
            TokenValue::Stack(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
            TokenValue::Group(group) => scale_to_value(group),
        }
    }
}

/// Convert a token scale to a JSON object
pub fn scale_to_value(scale: &TokenScale) -> Value {
    Value::Object(
        scale
            .iter()
            .map(|(name, token)| (name.clone(), token.to_value()))
            .collect(),
    )
}

/// Convert theme scales to a JSON object keyed by category name
pub fn scales_to_value(scales: &ThemeScales) -> Value {
    Value::Object(
        scales
            .iter()
            .map(|(key, scale)| (key.as_str().to_string(), scale_to_value(scale)))
            .collect(),
    )
}

/// The `theme` section of a user configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeConfig {
    /// Categories given directly under `theme`; these replace the defaults
    pub overrides: ThemeScales,

    /// Categories given under `theme.extend`; these merge into the defaults
    pub extend: ThemeScales,
}

/// A validated user configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserConfig {
    /// Glob patterns naming files to scan, kept verbatim
    pub content: Vec<String>,

    pub theme: ThemeConfig,

    /// Plugin references in load order
    pub plugins: Vec<PluginRef>,
}

impl UserConfig {
    /// Validate a raw configuration value.
    ///
    /// Missing fields default to empty. Every present field is checked
    /// against the recognized schema before anything is returned.
    pub fn from_value(value: &Value) -> Result<Self, ResolveError> {
        let map = value
            .as_object()
            .ok_or_else(|| ResolveError::wrong_type("", "a configuration mapping", value))?;

        let mut config = UserConfig::default();

        for (field, field_value) in map {
            match field.as_str() {
                "content" => config.content = parse_content(field_value)?,
                "theme" => config.theme = parse_theme(field_value)?,
                "plugins" => config.plugins = parse_plugins(field_value)?,
                unknown => {
                    return Err(ResolveError::unknown_field("", unknown, TOP_LEVEL_FIELDS))
                }
            }
        }

        Ok(config)
    }
}

fn parse_content(value: &Value) -> Result<Vec<String>, ResolveError> {
    const EXPECTED: &str = "a sequence of glob strings";

    let items = value
        .as_array()
        .ok_or_else(|| ResolveError::wrong_type("content", EXPECTED, value))?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| ResolveError::wrong_type(&format!("content[{}]", i), "a glob string", item))
        })
        .collect()
}

fn parse_plugins(value: &Value) -> Result<Vec<PluginRef>, ResolveError> {
    let items = value.as_array().ok_or_else(|| {
        ResolveError::wrong_type("plugins", "a sequence of plugin references", value)
    })?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| PluginRef::from_value(item, &format!("plugins[{}]", i)))
        .collect()
}

fn parse_theme(value: &Value) -> Result<ThemeConfig, ResolveError> {
    let map = value
        .as_object()
        .ok_or_else(|| ResolveError::wrong_type("theme", "a mapping", value))?;

    let mut theme_fields: Vec<&str> = ThemeKey::field_names().to_vec();
    theme_fields.push(EXTEND_FIELD);

    let mut theme = ThemeConfig::default();

    for (field, field_value) in map {
        if field == EXTEND_FIELD {
            let extend = field_value.as_object().ok_or_else(|| {
                ResolveError::wrong_type("theme.extend", "a mapping", field_value)
            })?;
            theme.extend = parse_scales(extend, "theme.extend", &ThemeKey::field_names())?;
        } else {
            let key = ThemeKey::from_name(field)
                .ok_or_else(|| ResolveError::unknown_field("theme", field, &theme_fields))?;
            let path = join_path("theme", field);
            theme
                .overrides
                .insert(key, parse_scale(key.shape(), field_value, &path)?);
        }
    }

    Ok(theme)
}

/// Parse a mapping of category name to token scale.
///
/// `candidates` feeds the suggestion on unknown names; only recognized
/// categories are ever accepted.
pub(crate) fn parse_scales(
    map: &Map<String, Value>,
    parent: &str,
    candidates: &[&str],
) -> Result<ThemeScales, ResolveError> {
    let mut scales = ThemeScales::new();

    for (field, value) in map {
        let key = ThemeKey::from_name(field)
            .ok_or_else(|| ResolveError::unknown_field(parent, field, candidates))?;
        let path = join_path(parent, field);
        scales.insert(key, parse_scale(key.shape(), value, &path)?);
    }

    Ok(scales)
}

fn parse_scale(shape: ScaleShape, value: &Value, path: &str) -> Result<TokenScale, ResolveError> {
    let map = value
        .as_object()
        .ok_or_else(|| ResolveError::wrong_type(path, "a mapping of token names", value))?;

    map.iter()
        .map(|(name, token)| {
            let token_path = join_path(path, name);
            Ok((name.clone(), parse_token(shape, token, &token_path)?))
        })
        .collect()
}

fn parse_token(shape: ScaleShape, value: &Value, path: &str) -> Result<TokenValue, ResolveError> {
    match (shape, value) {
        (ScaleShape::Stacks, Value::String(family)) => Ok(TokenValue::Stack(vec![family.clone()])),
        (ScaleShape::Stacks, Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    ResolveError::wrong_type(&format!("{}[{}]", path, i), "a font-family string", item)
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(TokenValue::Stack),
        (ScaleShape::Stacks, other) => Err(ResolveError::wrong_type(
            path,
            "a font-family stack (string or sequence of strings)",
            other,
        )),
        (ScaleShape::Scalars | ScaleShape::NestedScalars, Value::String(s)) => {
            Ok(TokenValue::Scalar(s.clone()))
        }
        (ScaleShape::NestedScalars, Value::Object(_)) => {
            parse_scale(ScaleShape::Scalars, value, path).map(TokenValue::Group)
        }
        (ScaleShape::Scalars, other) => Err(ResolveError::wrong_type(path, "a string", other)),
        (ScaleShape::NestedScalars, other) => Err(ResolveError::wrong_type(
            path,
            "a string or a mapping of strings",
            other,
        )),
    }
}
