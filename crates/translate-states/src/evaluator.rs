// Message group state evaluation: first matching transition wins
// Origin: utils/MessageGroupStatesUpdaterJob.php

use translate_core::{StatSnapshot, Transition, TransitionTable};

/// Return the state of the first transition whose conditions all hold for
/// `stats`, or `None` when no transition matches.
///
/// Conditions of one transition are combined with AND; evaluation of a
/// transition stops at its first failing condition.
pub fn evaluate<'a>(stats: &StatSnapshot, transitions: &'a TransitionTable) -> Option<&'a str> {
    transitions
        .iter()
        .find(|t| matches(stats, t))
        .map(Transition::state)
}

/// Whether every condition of `transition` holds for `stats`.
pub fn matches(stats: &StatSnapshot, transition: &Transition) -> bool {
    let max = stats.total();
    transition
        .conditions()
        .iter()
        .all(|c| c.test.matches(stats.value(c.kind), max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use translate_core::{ConditionKind, ConditionTest};

    use ConditionKind::{Outdated, Proofread, Translated, Untranslated};
    use ConditionTest::{Max, NonZero, Zero};

    fn stats(total: u64, translated: u64, fuzzy: u64, proofread: u64) -> StatSnapshot {
        StatSnapshot::new(total, translated, fuzzy, proofread).unwrap()
    }

    /// The usual workflow: ready > proofreading > needs updating > in progress.
    fn workflow() -> TransitionTable {
        TransitionTable::new()
            .with(Transition::new("ready").when(Proofread, Max))
            .with(
                Transition::new("proofreading")
                    .when(Translated, Max)
                    .when(Outdated, Zero),
            )
            .with(Transition::new("updating").when(Outdated, NonZero))
            .with(
                Transition::new("inprogress")
                    .when(Untranslated, NonZero)
                    .when(Translated, NonZero),
            )
    }

    #[test]
    fn fully_proofread_is_ready() {
        let table = TransitionTable::new().with(Transition::new("ready").when(Proofread, Max));
        assert_eq!(evaluate(&stats(10, 10, 0, 10), &table), Some("ready"));
    }

    #[test]
    fn partially_proofread_does_not_match() {
        let table = TransitionTable::new().with(Transition::new("ready").when(Proofread, Max));
        assert_eq!(evaluate(&stats(10, 5, 0, 0), &table), None);
    }

    #[test]
    fn first_match_wins() {
        // Fully proofread also satisfies "proofreading"; "ready" comes first.
        assert_eq!(evaluate(&stats(4, 4, 0, 4), &workflow()), Some("ready"));
        assert_eq!(evaluate(&stats(4, 4, 0, 1), &workflow()), Some("proofreading"));
    }

    #[test]
    fn outdated_translations() {
        assert_eq!(evaluate(&stats(10, 6, 2, 0), &workflow()), Some("updating"));
    }

    #[test]
    fn all_conditions_must_hold() {
        assert_eq!(evaluate(&stats(10, 3, 0, 0), &workflow()), Some("inprogress"));
        // Nothing translated: the second condition of "inprogress" fails.
        assert_eq!(evaluate(&stats(10, 0, 0, 0), &workflow()), None);
    }

    #[test]
    fn empty_table_never_matches() {
        assert_eq!(evaluate(&stats(10, 10, 0, 10), &TransitionTable::new()), None);
    }

    #[test]
    fn transition_without_conditions_always_matches() {
        let table = TransitionTable::new().with(Transition::new("unset"));
        assert_eq!(evaluate(&stats(3, 1, 1, 0), &table), Some("unset"));
    }

    #[test]
    fn untranslated_excludes_fuzzy() {
        let table = TransitionTable::new().with(Transition::new("done").when(Untranslated, Zero));
        // 7 translated + 3 fuzzy leaves nothing untranslated.
        assert_eq!(evaluate(&stats(10, 7, 3, 0), &table), Some("done"));
    }

    #[test]
    fn empty_group_is_at_max() {
        assert_eq!(evaluate(&StatSnapshot::empty(), &workflow()), Some("ready"));
    }
}
