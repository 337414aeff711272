//! # Document State
//!
//! The single aggregate behind an editor session. Every transition takes one
//! snapshot and returns a new one; nothing here is mutated in place once it
//! has been handed to the store.
//!
//! ## Sharing
//!
//! ```text
//! EditorState
//!  ├── project        Arc<Project>           (read-only for selector edits)
//!  ├── elements       Arc<Vec<Element>>      (peer collection, carried through)
//!  ├── css_selectors  Vec<Arc<CssSelector>>  (one Arc per record)
//!  └── ui             Ui                     (selection + draft buffers)
//! ```
//!
//! Cloning a state is cheap: only the selector `Vec` of pointers and the small
//! `Ui` value are copied. A transition that edits one selector leaves every
//! other selector `Arc::ptr_eq` to its predecessor.
//!
//! ## Unmodeled Fields
//!
//! Saved projects carry data owned by other parts of the editor (`theme`,
//! `assets`, `ui.navigationMenu`, ...). Every persisted struct here keeps
//! such keys in an `extra` map so a load/save cycle writes them back as is.

use crate::ids::IdSource;
use crate::selector::CssSelector;
use crate::EditorError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

pub const DEFAULT_PAGE: &str = "index";
pub const DEFAULT_DETAILS_WIDTH: u32 = 365;

/// Keys this crate does not model, kept verbatim
pub type ExtraFields = BTreeMap<String, Value>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    #[default]
    Static,
    Fullstack,
}

/// Active project metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: String,

    #[serde(default)]
    pub project_name: String,

    #[serde(default)]
    pub project_type: ProjectType,

    #[serde(default)]
    pub html_pages_title: String,

    #[serde(default)]
    pub html_pages_description: String,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Project {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            project_name: String::new(),
            project_type: ProjectType::Static,
            html_pages_title: "Test Website".to_string(),
            html_pages_description: "An app demonstrating the capabilities of the HTML Editor"
                .to_string(),
            extra: ExtraFields::new(),
        }
    }
}

/// Page element (rendering and tree edits live outside this crate)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "_userID", default)]
    pub user_id: Option<String>,

    #[serde(rename = "_parentId", default)]
    pub parent_id: Option<String>,

    #[serde(rename = "_type")]
    pub tag: String,

    #[serde(rename = "_page")]
    pub page: String,

    #[serde(rename = "_content", default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default)]
    pub template_id: Option<String>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Element {
    pub fn new(id: impl Into<String>, tag: impl Into<String>, page: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user_id: None,
            parent_id: None,
            tag: tag.into(),
            page: page.into(),
            content: None,
            template_id: None,
            extra: ExtraFields::new(),
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }
}

/// Ids of whatever the user currently has selected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selected {
    #[serde(default = "default_selected_page")]
    pub page: Option<String>,

    #[serde(default)]
    pub element: Option<String>,

    #[serde(default)]
    pub css_selector: Option<String>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

fn default_selected_page() -> Option<String> {
    Some(DEFAULT_PAGE.to_string())
}

impl Default for Selected {
    fn default() -> Self {
        Self {
            page: default_selected_page(),
            element: None,
            css_selector: None,
            extra: ExtraFields::new(),
        }
    }
}

/// Uncommitted input of the details panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsMenu {
    #[serde(default = "default_details_width")]
    pub width: u32,

    /// Rule staged for in-place editing
    #[serde(default)]
    pub rule_name: String,

    #[serde(default)]
    pub rule_value: String,

    /// New rule being typed
    #[serde(default)]
    pub add_rule_name: String,

    #[serde(default)]
    pub add_rule_value: String,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

fn default_details_width() -> u32 {
    DEFAULT_DETAILS_WIDTH
}

impl Default for DetailsMenu {
    fn default() -> Self {
        Self {
            width: DEFAULT_DETAILS_WIDTH,
            rule_name: String::new(),
            rule_value: String::new(),
            add_rule_name: String::new(),
            add_rule_value: String::new(),
            extra: ExtraFields::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ui {
    #[serde(default)]
    pub selected: Selected,

    #[serde(default)]
    pub details_menu: DetailsMenu,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Aggregate root of an editor session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    pub project: Arc<Project>,

    #[serde(default)]
    pub elements: Arc<Vec<Element>>,

    #[serde(default)]
    pub css_selectors: Vec<Arc<CssSelector>>,

    #[serde(default)]
    pub ui: Ui,

    /// Peer subsystems' data (`theme`, `assets`, `templateComponents`, ...)
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl EditorState {
    /// Bootstrap state: empty selectors, nothing selected, empty drafts
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project: Arc::new(Project::new(project_id)),
            elements: Arc::new(Vec::new()),
            css_selectors: Vec::new(),
            ui: Ui::default(),
            extra: ExtraFields::new(),
        }
    }

    /// Bootstrap state with a fresh project id and the base page document
    pub fn with_ids(ids: &mut dyn IdSource) -> Self {
        let mut state = Self::new(ids.next_id());
        state.elements = Arc::new(base_page_elements(ids, DEFAULT_PAGE));
        state
    }

    pub fn project_id(&self) -> &str {
        &self.project.project_id
    }

    pub fn selector(&self, id: &str) -> Option<&Arc<CssSelector>> {
        self.css_selectors.iter().find(|sel| sel.id == id)
    }

    /// Every id in use: project, elements, selectors
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.project_id())
            .chain(self.elements.iter().map(|el| el.id.as_str()))
            .chain(self.css_selectors.iter().map(|sel| sel.id.as_str()))
    }

    pub fn selected_selector_id(&self) -> Option<&str> {
        self.ui.selected.css_selector.as_deref()
    }

    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, EditorError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: &Path) -> Result<(), EditorError> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    /// Stylesheet for every selector, in collection order
    pub fn to_stylesheet(&self) -> String {
        self.css_selectors
            .iter()
            .map(|sel| sel.to_css())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// `html > head + body` skeleton for a page
pub fn base_page_elements(ids: &mut dyn IdSource, page: &str) -> Vec<Element> {
    let html = Element::new(ids.next_id(), "html", page);
    let head = Element::new(ids.next_id(), "head", page).with_parent(html.id.clone());
    let body = Element::new(ids.next_id(), "body", page).with_parent(html.id.clone());
    vec![html, head, body]
}
