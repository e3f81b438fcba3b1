// In-memory message group statistics, aggregated per language and per group
// Origin: api/ApiQueryLanguageStats.php

use std::collections::BTreeMap;

use translate_core::{MessageStatus, StatSnapshot, StatsError};

use crate::updater::StatsProvider;

/// Statistics for every known (group, language) pair.
///
/// Unknown pairs read as empty statistics. Maps are ordered so listings
/// are deterministic.
#[derive(Debug, Clone, Default)]
pub struct StatsTable {
    /// group id -> language code -> stats
    items: BTreeMap<String, BTreeMap<String, StatSnapshot>>,
}

impl StatsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the statistics of one pair, replacing earlier ones.
    pub fn set(
        &mut self,
        group: impl Into<String>,
        language: impl Into<String>,
        stats: StatSnapshot,
    ) {
        self.items
            .entry(group.into())
            .or_default()
            .insert(language.into(), stats);
    }

    /// Forget one pair. Returns the removed statistics, if any.
    pub fn remove(&mut self, group: &str, language: &str) -> Option<StatSnapshot> {
        let languages = self.items.get_mut(group)?;
        let removed = languages.remove(language);
        if languages.is_empty() {
            self.items.remove(group);
        }
        removed
    }

    /// Statistics of one pair; empty when unknown.
    pub fn for_item(&self, group: &str, language: &str) -> StatSnapshot {
        self.items
            .get(group)
            .and_then(|languages| languages.get(language))
            .copied()
            .unwrap_or_default()
    }

    /// Statistics of every group in `language`, keyed by group id.
    pub fn for_language(&self, language: &str) -> BTreeMap<String, StatSnapshot> {
        self.items
            .iter()
            .filter_map(|(group, languages)| {
                languages
                    .get(language)
                    .map(|stats| (group.clone(), *stats))
            })
            .collect()
    }

    /// Statistics of `group` in every language, keyed by language code.
    pub fn for_group(&self, group: &str) -> BTreeMap<String, StatSnapshot> {
        self.items.get(group).cloned().unwrap_or_default()
    }

    /// Sum over all groups for one language.
    pub fn language_totals(&self, language: &str) -> Result<StatSnapshot, StatsError> {
        self.items
            .values()
            .filter_map(|languages| languages.get(language))
            .try_fold(StatSnapshot::empty(), |acc, s| acc.merge(s))
    }

    /// Sum over all languages for one group.
    pub fn group_totals(&self, group: &str) -> Result<StatSnapshot, StatsError> {
        self.items
            .get(group)
            .into_iter()
            .flat_map(BTreeMap::values)
            .try_fold(StatSnapshot::empty(), |acc, s| acc.merge(s))
    }

    /// Record that one message of `group` in `language` moved between
    /// statuses. The stored statistics are left unchanged on error.
    pub fn apply_status_change(
        &mut self,
        group: &str,
        language: &str,
        from: MessageStatus,
        to: MessageStatus,
    ) -> Result<StatSnapshot, StatsError> {
        let updated = self.for_item(group, language).with_status_change(from, to)?;
        self.set(group, language, updated);
        Ok(updated)
    }
}

impl StatsProvider for StatsTable {
    fn for_item(&self, group: &str, language: &str) -> Result<StatSnapshot, StatsError> {
        Ok(StatsTable::for_item(self, group, language))
    }
}
