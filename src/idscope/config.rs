use crate::attrs::IdAttrs;
use crate::error::Result;
use crate::json;
use crate::scoper::ScopeOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_PREFIX: &str = crate::token::DEFAULT_PREFIX;

/// Configuration for idscope, stored in .idscope/config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScopeConfig {
    /// Namespace for generated ids (must start with a letter or underscore)
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Replaces the default list of id attributes when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_attrs: Option<Vec<String>>,

    /// Appended to the (default or replaced) list of id attributes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_id_attrs: Vec<String>,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            id_attrs: None,
            extra_id_attrs: Vec::new(),
        }
    }
}

impl ScopeConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        json::load_or_default(&config_dir.as_ref().join(CONFIG_FILENAME))
    }

    /// Save config to the given directory, creating it if needed
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        json::save(&config_dir.as_ref().join(CONFIG_FILENAME), self)
    }

    /// The attribute list this config describes, relative to the defaults.
    pub fn id_attrs(&self) -> IdAttrs {
        match (&self.id_attrs, self.extra_id_attrs.is_empty()) {
            (None, true) => IdAttrs::Inherit,
            (None, false) => IdAttrs::extend(self.extra_id_attrs.clone()),
            (Some(names), _) => {
                IdAttrs::replace(names.iter().chain(&self.extra_id_attrs).cloned())
            }
        }
    }

    /// Constructor options for a [`Scoper`](crate::scoper::Scoper). An invalid
    /// prefix is replaced by the default and reported in the options' messages.
    pub fn to_options<N>(&self) -> ScopeOptions<N> {
        ScopeOptions::new()
            .with_id_attrs(self.id_attrs())
            .with_prefix(&self.prefix)
    }
}
