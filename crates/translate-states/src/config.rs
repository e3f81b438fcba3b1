// Message group state configuration
// Origin: utils/MessageGroupStatesUpdaterJob.php
//
// Format:
//
//   {
//     "groups": {
//       "core": {
//         "transitions": [
//           ["ready", {"PROOFREAD": "MAX"}],
//           ["proofreading", {"TRANSLATED": "MAX", "OUTDATED": "ZERO"}]
//         ]
//       }
//     }
//   }
//
// Every table is parsed when the configuration is loaded, so an unknown
// condition fails the load instead of a later state change.

use std::collections::BTreeMap;
use std::path::Path;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use translate_core::{ConfigError, RawTransition, TransitionTable};

use crate::updater::GroupRegistry;

/// Raw configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStatesConfig {
    #[serde(default)]
    pub groups: BTreeMap<String, GroupConfig>,
}

/// Raw configuration of one group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Ordered transitions; empty means the group has no automatic states.
    #[serde(default)]
    pub transitions: Vec<RawTransition>,
}

impl GroupStatesConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Error loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Config {
        path: String,
        #[source]
        source: ConfigError,
    },
}

/// Groups with their parsed transition tables.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredGroups {
    tables: HashMap<String, TransitionTable>,
}

impl ConfiguredGroups {
    /// Parse every group's transitions. Fails on the first malformed table.
    pub fn from_config(config: &GroupStatesConfig) -> Result<Self, ConfigError> {
        let mut tables = HashMap::with_capacity(config.groups.len());
        for (id, group) in &config.groups {
            let table = TransitionTable::from_raw(&group.transitions)?;
            tables.insert(id.clone(), table);
        }
        Ok(Self { tables })
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::from_config(&GroupStatesConfig::from_json(json)?)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| LoadError::Config {
            path: path.display().to_string(),
            source,
        })
    }

    /// Add or replace a group.
    pub fn insert(&mut self, group: impl Into<String>, table: TransitionTable) {
        self.tables.insert(group.into(), table);
    }

    pub fn contains(&self, group: &str) -> bool {
        self.tables.contains_key(group)
    }

    /// Number of configured groups.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl GroupRegistry for ConfiguredGroups {
    fn transitions(&self, group: &str) -> Option<&TransitionTable> {
        self.tables.get(group)
    }
}
