use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{PageError, PageResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OAuth public client (application) id registered with Microsoft
    pub client_id: String,

    /// Only needed for confidential app registrations
    #[serde(default)]
    pub client_secret: String,

    /// Identity provider authority; personal accounts live under `consumers`
    #[serde(default = "default_authority")]
    pub authority: String,

    /// Base of every Microsoft Graph request
    #[serde(default = "default_graph_base_url")]
    pub graph_base_url: String,

    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,

    /// Fixed target section id, used when no notebook/section names are given
    #[serde(default)]
    pub section_id: Option<String>,

    /// Default notebook to resolve pages into
    #[serde(default)]
    pub notebook: Option<String>,

    /// Default section (inside `notebook`) to resolve pages into
    #[serde(default)]
    pub section: Option<String>,
}

fn default_authority() -> String {
    "https://login.microsoftonline.com/consumers".to_string()
}

fn default_graph_base_url() -> String {
    "https://graph.microsoft.com/v1.0".to_string()
}

fn default_scopes() -> Vec<String> {
    vec!["Notes.ReadWrite".to_string()]
}

impl Config {
    pub fn load(path: &Path) -> PageResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PageError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> PageResult<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| PageError::Config(format!("Invalid config: {}", e)))?;

        if config.client_id.trim().is_empty() {
            return Err(PageError::Config("client_id must not be empty".to_string()));
        }

        Ok(config)
    }

    /// Settings the Graph client needs, detached from the OAuth fields.
    pub fn graph_settings(&self) -> GraphSettings {
        GraphSettings {
            base_url: self.graph_base_url.trim_end_matches('/').to_string(),
            scopes: self.scopes.clone(),
        }
    }

    pub fn example() -> Self {
        Config {
            client_id: "00000000-0000-0000-0000-000000000000".to_string(),
            client_secret: String::new(),
            authority: default_authority(),
            graph_base_url: default_graph_base_url(),
            scopes: default_scopes(),
            section_id: None,
            notebook: Some("Journal".to_string()),
            section: Some("Daily".to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GraphSettings {
    pub base_url: String,
    pub scopes: Vec<String>,
}

impl GraphSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            scopes: default_scopes(),
        }
    }
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self::new(default_graph_base_url())
    }
}
