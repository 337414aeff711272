//! # CSS Selectors
//!
//! A selector is a named, project-scoped bag of CSS rules. Saved projects
//! store the rules flat, right next to the selector's own fields:
//!
//! ```json
//! {
//!   "_id": "css_91c2…",
//!   "css_selector_name": "newClass",
//!   "_parentId": "common",
//!   "_type": "css",
//!   "css_selector_key": "color",
//!   "css_selector_value": "red",
//!   "color": "red",
//!   "padding": "4px"
//! }
//! ```
//!
//! In memory the rules live in an explicit map, flattened back on
//! serialization. Rule names never collide with the reserved keys above.
//! Values are kept as loaded: numeric properties such as `"zIndex": 5` stay
//! numbers on save.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Keys owned by the selector record itself (never rule names)
pub const RESERVED_KEYS: &[&str] = &[
    "_id",
    "_userId",
    "_parentId",
    "_type",
    "_page",
    "project_id",
    "css_selector_name",
    "css_selector_key",
    "css_selector_value",
];

/// Default grouping tag for selectors created in the editor
pub const COMMON_PARENT: &str = "common";

pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Discriminant for selector records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorKind {
    #[default]
    Css,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssSelector {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "css_selector_name", default)]
    pub name: String,

    /// User-editable alias shown instead of `name` once set
    #[serde(rename = "_userId", default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    #[serde(rename = "_parentId", default = "default_parent")]
    pub parent_id: String,

    #[serde(rename = "_type", default)]
    pub kind: SelectorKind,

    #[serde(rename = "_page", default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,

    #[serde(rename = "project_id", default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    /// Most recently committed rule name (legacy flat field)
    #[serde(rename = "css_selector_key", default)]
    pub last_rule_key: String,

    /// Most recently committed rule value (legacy flat field)
    #[serde(rename = "css_selector_value", default)]
    pub last_rule_value: String,

    #[serde(flatten)]
    rules: BTreeMap<String, Value>,
}

fn default_parent() -> String {
    COMMON_PARENT.to_string()
}

impl CssSelector {
    /// Fresh selector with no rules and empty last-rule fields
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            alias: None,
            parent_id: default_parent(),
            kind: SelectorKind::Css,
            page: None,
            project_id: None,
            last_rule_key: String::new(),
            last_rule_value: String::new(),
            rules: BTreeMap::new(),
        }
    }

    /// Name shown in the editor: the alias when set, otherwise the class name
    pub fn display_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Rule value as CSS text
    pub fn rule(&self, name: &str) -> Option<Cow<'_, str>> {
        self.rules.get(name).and_then(css_text)
    }

    pub fn rules(&self) -> &BTreeMap<String, Value> {
        &self.rules
    }

    /// Rules that render as CSS, in name order. Non-scalar values are
    /// carried through on save but never rendered.
    pub fn css_rules(&self) -> impl Iterator<Item = (&str, Cow<'_, str>)> {
        self.rules
            .iter()
            .filter_map(|(name, value)| css_text(value).map(|text| (name.as_str(), text)))
    }

    pub fn has_rule(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Upsert a rule. Reserved keys are ignored.
    pub fn with_rule(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        if !is_reserved_key(&name) {
            self.rules.insert(name, Value::String(value.into()));
        }
        self
    }

    /// Drop a rule; every other field and rule is left as is
    pub fn without_rule(mut self, name: &str) -> Self {
        self.rules.remove(name);
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = parent_id.into();
        self
    }

    pub fn with_last_rule(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.last_rule_key = key.into();
        self.last_rule_value = value.into();
        self
    }

    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Render as a CSS rule block, e.g. `.card { color: red; }`
    pub fn to_css(&self) -> String {
        let body = self
            .css_rules()
            .map(|(name, value)| format!("{}: {};", name, value))
            .collect::<Vec<_>>()
            .join(" ");

        if body.is_empty() {
            format!(".{} {{}}", self.display_name())
        } else {
            format!(".{} {{ {} }}", self.display_name(), body)
        }
    }
}

fn css_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(text) => Some(Cow::Borrowed(text.as_str())),
        Value::Number(number) => Some(Cow::Owned(number.to_string())),
        _ => None,
    }
}
