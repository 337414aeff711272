use crate::ids::{IdSource, SequentialIds, UuidIds};
use crate::selector::COMMON_PARENT;
use crate::EditorError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "sitecraft.config.json";

/// Which id the rename action runs through the class-name grammar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenameCheck {
    /// The globally selected selector's id (saved-project behavior)
    #[default]
    Selected,
    /// The id actually being renamed
    Target,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    #[default]
    Uuid,
    Sequential,
}

/// Editor configuration file format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Base name for new selectors (`newClass`, `newClass_1`, ...)
    #[serde(default = "default_new_class_base")]
    pub new_class_base: String,

    /// Grouping tag stamped on new selectors
    #[serde(default = "default_parent")]
    pub default_parent: String,

    #[serde(default)]
    pub rename_check: RenameCheck,

    /// Undo levels kept by a session (0 = unlimited)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    #[serde(default)]
    pub id_strategy: IdStrategy,
}

fn default_new_class_base() -> String {
    "newClass".to_string()
}

fn default_parent() -> String {
    COMMON_PARENT.to_string()
}

fn default_history_limit() -> usize {
    100
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            new_class_base: default_new_class_base(),
            default_parent: default_parent(),
            rename_check: RenameCheck::default(),
            history_limit: default_history_limit(),
            id_strategy: IdStrategy::default(),
        }
    }
}

impl EditorConfig {
    /// Load config from a directory, falling back to defaults when absent
    pub fn load(dir: &Path) -> Result<Self, EditorError> {
        let config_path = dir.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            Self::from_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, EditorError> {
        let content = std::fs::read_to_string(path)?;
        let config: EditorConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EditorError> {
        if self.new_class_base.is_empty() {
            return Err(EditorError::Config("newClassBase must not be empty".to_string()));
        }
        if !crate::class_name::is_valid_class_name(&self.new_class_base) {
            return Err(EditorError::Config(format!(
                "newClassBase is not a valid class name: {}",
                self.new_class_base
            )));
        }
        Ok(())
    }

    /// Build the id source named by `id_strategy`; `session_key` seeds sequential ids
    pub fn id_source(&self, session_key: &str) -> Box<dyn IdSource> {
        self.resumed_id_source(session_key, std::iter::empty())
    }

    /// Like `id_source`, but never hands out an id listed in `taken`
    pub fn resumed_id_source<'a, I>(&self, session_key: &str, taken: I) -> Box<dyn IdSource>
    where
        I: IntoIterator<Item = &'a str>,
    {
        match self.id_strategy {
            IdStrategy::Uuid => Box::new(UuidIds::new()),
            IdStrategy::Sequential => Box::new(SequentialIds::new(session_key).resume(taken)),
        }
    }
}
