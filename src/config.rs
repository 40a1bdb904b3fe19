//! Graph configuration
//!
//! Selects the graph kind and how IDs are generated when a caller does not
//! supply one. Loadable from YAML.

use crate::graph::GraphKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// How generated IDs are produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IdStrategy {
    /// Random v4 UUIDs
    Uuid,
    /// `<prefix><counter>`, counting from 1 per namespace
    Sequential {
        node_prefix: String,
        relation_prefix: String,
    },
}

impl Default for IdStrategy {
    fn default() -> Self {
        IdStrategy::Sequential {
            node_prefix: "n".to_string(),
            relation_prefix: "r".to_string(),
        }
    }
}

/// Graph container configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GraphConfig {
    /// Kind of every node and relation in the container
    pub kind: GraphKind,
    /// ID generation for `create_node(None)` / `create_relation(None, ..)`
    pub id_strategy: IdStrategy,
}

impl GraphConfig {
    pub fn undirected() -> Self {
        Self::default()
    }

    pub fn directed() -> Self {
        Self {
            kind: GraphKind::Directed,
            ..Self::default()
        }
    }

    /// Parse a configuration from YAML text. Missing fields take defaults.
    pub fn from_yaml_str(text: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load a configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text)?;
        info!("Loaded graph config from {:?}: {} graph", path, config.kind);
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
