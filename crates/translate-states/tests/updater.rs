//! End-to-end tests: load group configuration, save translations, watch the
//! workflow state follow the statistics.

use proptest::prelude::*;
use translate_core::{MessageStatus, StatSnapshot};
use translate_states::{
    ConfiguredGroups, InMemoryStateStore, MessageHandle, StateStore, StatesUpdater, StatsTable,
};

const CONFIG: &str = r#"{
    "groups": {
        "core": {
            "transitions": [
                ["ready", {"PROOFREAD": "MAX"}],
                ["proofreading", {"TRANSLATED": "MAX", "OUTDATED": "ZERO"}],
                ["updating", {"OUTDATED": "NONZERO"}],
                ["inprogress", {"UNTRANSLATED": "NONZERO", "TRANSLATED": "NONZERO"}]
            ]
        },
        "ext-foo": {
            "transitions": [
                ["ready", {"TRANSLATED": "MAX"}]
            ]
        },
        "plain": {}
    }
}"#;

#[test]
fn state_follows_translation_progress() {
    let groups = ConfiguredGroups::from_json(CONFIG).unwrap();
    let mut stats = StatsTable::new();
    stats.set("core", "fi", StatSnapshot::new(3, 0, 0, 0).unwrap());
    let mut store = InMemoryStateStore::new();
    let handle = MessageHandle::new("Main_Page/fi", "fi", ["core"]);

    let steps = [
        (MessageStatus::Untranslated, MessageStatus::Translated, Some("inprogress")),
        (MessageStatus::Untranslated, MessageStatus::Translated, Some("inprogress")),
        (MessageStatus::Untranslated, MessageStatus::Translated, Some("proofreading")),
        (MessageStatus::Translated, MessageStatus::Fuzzy, Some("updating")),
        (MessageStatus::Fuzzy, MessageStatus::Translated, Some("proofreading")),
        (MessageStatus::Translated, MessageStatus::Proofread, Some("proofreading")),
        (MessageStatus::Translated, MessageStatus::Proofread, Some("proofreading")),
        (MessageStatus::Translated, MessageStatus::Proofread, Some("ready")),
    ];
    for (from, to, expected) in steps {
        stats.apply_status_change("core", "fi", from, to).unwrap();
        let updater = StatesUpdater::new(&groups, &stats);
        updater.run(&handle, &mut store).unwrap();
        assert_eq!(store.current_state("core", "fi").as_deref(), expected);
    }

    let visited: Vec<&str> = store.history().iter().map(|c| c.to.as_str()).collect();
    assert_eq!(
        visited,
        ["inprogress", "proofreading", "updating", "proofreading", "ready"]
    );
}

#[test]
fn every_group_of_the_message_is_updated() {
    let groups = ConfiguredGroups::from_json(CONFIG).unwrap();
    let mut stats = StatsTable::new();
    stats.set("core", "de", StatSnapshot::new(10, 10, 0, 10).unwrap());
    stats.set("ext-foo", "de", StatSnapshot::new(4, 4, 0, 0).unwrap());
    let mut store = InMemoryStateStore::new();
    let handle = MessageHandle::new("Shared/de", "de", ["plain", "core", "ext-foo"]);

    let changes = StatesUpdater::new(&groups, &stats)
        .run(&handle, &mut store)
        .unwrap();
    let groups_changed: Vec<&str> = changes.iter().map(|c| c.group.as_str()).collect();
    assert_eq!(groups_changed, ["core", "ext-foo"]);
    assert!(store.current_state("plain", "de").is_none());
}

#[test]
fn running_twice_changes_nothing_the_second_time() {
    let groups = ConfiguredGroups::from_json(CONFIG).unwrap();
    let mut stats = StatsTable::new();
    stats.set("core", "fi", StatSnapshot::new(5, 2, 1, 0).unwrap());
    let mut store = InMemoryStateStore::new();
    let handle = MessageHandle::new("Main_Page/fi", "fi", ["core"]);
    let updater = StatesUpdater::new(&groups, &stats);

    assert_eq!(updater.run(&handle, &mut store).unwrap().len(), 1);
    assert!(updater.run(&handle, &mut store).unwrap().is_empty());
    assert_eq!(store.history().len(), 1);
}

#[test]
fn invalid_configuration_is_rejected() {
    let unknown_kind = r#"{"groups": {"x": {"transitions": [["ready", {"REVIEWED": "MAX"}]]}}}"#;
    assert!(ConfiguredGroups::from_json(unknown_kind).is_err());
    let empty_label = r#"{"groups": {"x": {"transitions": [["", {}]]}}}"#;
    assert!(ConfiguredGroups::from_json(empty_label).is_err());
}

fn snapshot() -> impl Strategy<Value = StatSnapshot> {
    (0u64..1000)
        .prop_flat_map(|total| (Just(total), 0..=total))
        .prop_flat_map(|(total, translated)| {
            (Just(total), Just(translated), 0..=total - translated, 0..=translated)
        })
        .prop_map(|(total, translated, fuzzy, proofread)| {
            StatSnapshot::new(total, translated, fuzzy, proofread).unwrap()
        })
}

proptest! {
    #[test]
    fn counters_add_up(s in snapshot()) {
        prop_assert_eq!(s.untranslated() + s.translated() + s.fuzzy(), s.total());
    }

    #[test]
    fn merged_counters_add_up(a in snapshot(), b in snapshot()) {
        let m = a.merge(&b).unwrap();
        prop_assert_eq!(m.untranslated() + m.translated() + m.fuzzy(), m.total());
        prop_assert_eq!(m.total(), a.total() + b.total());
    }

    #[test]
    fn invalid_counters_are_rejected(total in 0u64..100, extra in 1u64..100) {
        prop_assert!(StatSnapshot::new(total, total + extra, 0, 0).is_err());
        prop_assert!(StatSnapshot::new(total, total, extra, 0).is_err());
        prop_assert!(StatSnapshot::new(total + extra, total, 0, total + 1).is_err());
    }
}
