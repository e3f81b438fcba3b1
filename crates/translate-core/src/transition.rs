// Transition rules for automatic message group state changes
// Origin: utils/MessageGroupStatesUpdaterJob.php

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::condition::{Condition, ConditionKind, ConditionTest};
use crate::error::ConfigError;

/// A rule: move to `state` when every condition holds.
///
/// Conditions are keyed by kind; setting the same kind twice keeps the last
/// test. A transition without conditions always matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    state: String,
    conditions: Vec<Condition>,
}

impl Transition {
    /// Create a transition to `state` with no conditions yet.
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            conditions: Vec::new(),
        }
    }

    /// Add (or replace) the condition for `kind`.
    pub fn when(mut self, kind: ConditionKind, test: ConditionTest) -> Self {
        match self.conditions.iter_mut().find(|c| c.kind == kind) {
            Some(existing) => existing.test = test,
            None => self.conditions.push(Condition::new(kind, test)),
        }
        self
    }

    /// Target state label.
    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }
}

/// Ordered list of transitions. The first transition whose conditions all
/// hold decides the new state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionTable {
    transitions: Vec<Transition>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, transition: Transition) {
        self.transitions.push(transition);
    }

    /// Builder-style [`push`](Self::push).
    pub fn with(mut self, transition: Transition) -> Self {
        self.push(transition);
        self
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transition> {
        self.transitions.iter()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Convert raw configuration entries into a typed table.
    ///
    /// Fails on the first unknown condition kind or test, or on an empty
    /// state label; nothing of a malformed table is kept.
    pub fn from_raw(raw: &[RawTransition]) -> Result<Self, ConfigError> {
        let mut table = TransitionTable::new();
        for (index, RawTransition(state, conditions)) in raw.iter().enumerate() {
            if state.is_empty() {
                return Err(ConfigError::EmptyStateLabel { index });
            }
            let mut transition = Transition::new(state.as_str());
            for (kind, test) in conditions {
                let condition = Condition::parse(kind, test)?;
                transition = transition.when(condition.kind, condition.test);
            }
            table.push(transition);
        }
        Ok(table)
    }

    /// Parse a JSON list of `[state, {KIND: TEST, ...}]` entries.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: Vec<RawTransition> = serde_json::from_str(json)?;
        Self::from_raw(&raw)
    }
}

impl<'a> IntoIterator for &'a TransitionTable {
    type Item = &'a Transition;
    type IntoIter = std::slice::Iter<'a, Transition>;

    fn into_iter(self) -> Self::IntoIter {
        self.transitions.iter()
    }
}

impl FromIterator<Transition> for TransitionTable {
    fn from_iter<I: IntoIterator<Item = Transition>>(iter: I) -> Self {
        Self {
            transitions: iter.into_iter().collect(),
        }
    }
}

/// A transition as written in configuration: `["ready", {"PROOFREAD": "MAX"}]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransition(pub String, pub BTreeMap<String, String>);

impl From<&Transition> for RawTransition {
    fn from(t: &Transition) -> Self {
        let conditions = t
            .conditions
            .iter()
            .map(|c| (c.kind.as_str().to_string(), c.test.as_str().to_string()))
            .collect();
        RawTransition(t.state.clone(), conditions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_replaces_condition_of_same_kind() {
        let t = Transition::new("ready")
            .when(ConditionKind::Proofread, ConditionTest::Zero)
            .when(ConditionKind::Proofread, ConditionTest::Max);
        assert_eq!(
            t.conditions(),
            &[Condition::new(ConditionKind::Proofread, ConditionTest::Max)]
        );
    }

    #[test]
    fn from_json_keeps_transition_order() {
        let table = TransitionTable::from_json(
            r#"[
                ["ready", {"PROOFREAD": "MAX"}],
                ["proofreading", {"TRANSLATED": "MAX", "OUTDATED": "ZERO"}],
                ["inprogress", {"UNTRANSLATED": "NONZERO"}]
            ]"#,
        )
        .unwrap();
        let states: Vec<&str> = table.iter().map(Transition::state).collect();
        assert_eq!(states, ["ready", "proofreading", "inprogress"]);
        assert_eq!(table.iter().nth(1).unwrap().conditions().len(), 2);
    }

    #[test]
    fn from_json_rejects_unknown_kind() {
        let err = TransitionTable::from_json(r#"[["ready", {"REVIEWED": "MAX"}]]"#).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownConditionKind(_)));
    }

    #[test]
    fn from_json_rejects_unknown_test() {
        let err = TransitionTable::from_json(r#"[["ready", {"PROOFREAD": "ALL"}]]"#).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownConditionTest(_)));
    }

    #[test]
    fn from_json_rejects_empty_state() {
        let err = TransitionTable::from_json(r#"[["ready", {}], ["", {}]]"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyStateLabel { index: 1 }));
    }

    #[test]
    fn from_json_rejects_wrong_shape() {
        let err = TransitionTable::from_json(r#"{"ready": "MAX"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn raw_transition_from_typed() {
        let t = Transition::new("ready").when(ConditionKind::Proofread, ConditionTest::Max);
        let raw = RawTransition::from(&t);
        assert_eq!(raw.0, "ready");
        assert_eq!(raw.1.get("PROOFREAD").map(String::as_str), Some("MAX"));
    }
}
