// Automatic message group state changes
// Origin: utils/MessageGroupStatesUpdaterJob.php
//
// After a translation is saved, every group the message belongs to is
// re-evaluated for the message's language. When the configured transitions
// yield a state different from the current one, the new state is stored
// under the acting identity and the change is logged.

use hashbrown::HashMap;
use serde::Serialize;
use translate_core::{StatSnapshot, StatsError, TransitionTable};

use crate::evaluator::evaluate;

/// Identity recorded for automatic state changes.
pub const DEFAULT_ACTOR: &str = "FuzzyBot";

/// The saved message that triggered an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHandle {
    /// Message key, e.g. `Main_Page/fi`.
    pub key: String,
    /// Language code of the translation, if the key carries one.
    pub language: Option<String>,
    /// Groups the message belongs to, in registry order.
    pub group_ids: Vec<String>,
    /// Whether the message is known to any group.
    pub valid: bool,
}

impl MessageHandle {
    pub fn new(
        key: impl Into<String>,
        language: impl Into<String>,
        group_ids: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let group_ids: Vec<String> = group_ids.into_iter().map(Into::into).collect();
        Self {
            key: key.into(),
            language: Some(language.into()),
            valid: !group_ids.is_empty(),
            group_ids,
        }
    }
}

/// Source of per-group transition tables.
pub trait GroupRegistry {
    /// Transitions configured for `group`, or `None` if the group no
    /// longer exists.
    fn transitions(&self, group: &str) -> Option<&TransitionTable>;
}

/// Source of fresh statistics.
pub trait StatsProvider {
    fn for_item(&self, group: &str, language: &str) -> Result<StatSnapshot, StatsError>;
}

/// Error reported by a state store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct StoreError(pub String);

/// Persistent workflow state per (group, language).
pub trait StateStore {
    fn current_state(&self, group: &str, language: &str) -> Option<String>;

    fn change_state(
        &mut self,
        group: &str,
        language: &str,
        state: &str,
        actor: &str,
    ) -> Result<(), StoreError>;
}

/// Error running an update.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error("statistics of {group}/{language}: {source}")]
    Stats {
        group: String,
        language: String,
        #[source]
        source: StatsError,
    },

    #[error("failed to store state of {group}/{language}: {source}")]
    Store {
        group: String,
        language: String,
        #[source]
        source: StoreError,
    },
}

/// One applied state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateChange {
    pub group: String,
    pub language: String,
    pub from: Option<String>,
    pub to: String,
    pub actor: String,
}

/// Ids of the handle's groups that still exist and have at least one
/// transition, in handle order.
pub fn groups_with_transitions<'h>(
    handle: &'h MessageHandle,
    groups: &dyn GroupRegistry,
) -> Vec<&'h str> {
    handle
        .group_ids
        .iter()
        .map(String::as_str)
        .filter(|id| match groups.transitions(id) {
            Some(table) => !table.is_empty(),
            None => {
                tracing::debug!(group = %id, "group no longer exists");
                false
            }
        })
        .collect()
}

/// Applies configured state transitions for saved messages.
pub struct StatesUpdater<'a> {
    groups: &'a dyn GroupRegistry,
    stats: &'a dyn StatsProvider,
    actor: String,
}

impl<'a> StatesUpdater<'a> {
    pub fn new(groups: &'a dyn GroupRegistry, stats: &'a dyn StatsProvider) -> Self {
        Self {
            groups,
            stats,
            actor: DEFAULT_ACTOR.to_string(),
        }
    }

    /// Record changes under `actor` instead of [`DEFAULT_ACTOR`].
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    /// Re-evaluate every group of `handle` and store changed states.
    ///
    /// Handles without a language code are skipped. Running twice with
    /// unchanged statistics applies nothing the second time. Changes applied
    /// before an error stay applied.
    pub fn run(
        &self,
        handle: &MessageHandle,
        store: &mut dyn StateStore,
    ) -> Result<Vec<StateChange>, UpdateError> {
        let Some(language) = handle.language.as_deref() else {
            tracing::debug!(key = %handle.key, valid = handle.valid, "no language code, skipping");
            return Ok(Vec::new());
        };

        let mut changes = Vec::new();
        for group in groups_with_transitions(handle, self.groups) {
            let Some(table) = self.groups.transitions(group) else {
                continue;
            };
            let stats = self
                .stats
                .for_item(group, language)
                .map_err(|source| UpdateError::Stats {
                    group: group.to_string(),
                    language: language.to_string(),
                    source,
                })?;

            let Some(state) = evaluate(&stats, table) else {
                tracing::debug!(group, language, "no transition matches");
                continue;
            };

            let current = store.current_state(group, language);
            if current.as_deref() == Some(state) {
                tracing::debug!(group, language, state, "state unchanged");
                continue;
            }

            store
                .change_state(group, language, state, &self.actor)
                .map_err(|source| UpdateError::Store {
                    group: group.to_string(),
                    language: language.to_string(),
                    source,
                })?;
            tracing::info!(
                group,
                language,
                from = current.as_deref().unwrap_or(""),
                to = state,
                actor = %self.actor,
                "changed group state"
            );
            changes.push(StateChange {
                group: group.to_string(),
                language: language.to_string(),
                from: current,
                to: state.to_string(),
                actor: self.actor.clone(),
            });
        }
        Ok(changes)
    }
}

/// State store kept in memory, with a log of applied changes.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStateStore {
    states: HashMap<(String, String), String>,
    history: Vec<StateChange>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a state without recording history.
    pub fn seed(
        &mut self,
        group: impl Into<String>,
        language: impl Into<String>,
        state: impl Into<String>,
    ) {
        self.states.insert((group.into(), language.into()), state.into());
    }

    /// Every change applied through [`StateStore::change_state`], oldest first.
    pub fn history(&self) -> &[StateChange] {
        &self.history
    }
}

impl StateStore for InMemoryStateStore {
    fn current_state(&self, group: &str, language: &str) -> Option<String> {
        self.states
            .get(&(group.to_string(), language.to_string()))
            .cloned()
    }

    fn change_state(
        &mut self,
        group: &str,
        language: &str,
        state: &str,
        actor: &str,
    ) -> Result<(), StoreError> {
        let key = (group.to_string(), language.to_string());
        let from = self.states.insert(key, state.to_string());
        self.history.push(StateChange {
            group: group.to_string(),
            language: language.to_string(),
            from,
            to: state.to_string(),
            actor: actor.to_string(),
        });
        Ok(())
    }
}
