//! Automatic message group workflow states.
//!
//! Each message group may configure an ordered list of transitions. When a
//! translation is saved, the group's statistics for that language are
//! checked against the transitions and the first match becomes the group's
//! workflow state.
//!
//! # Architecture
//!
//! - [`evaluator`] -- First-match evaluation of a transition table
//! - [`stats_table`] -- Statistics per (group, language) with totals
//! - [`config`] -- JSON group configuration, parsed up front
//! - [`updater`] -- Collaborator traits and the state updater
//!
//! # Example
//!
//! ```
//! use translate_core::StatSnapshot;
//! use translate_states::{
//!     ConfiguredGroups, InMemoryStateStore, MessageHandle, StateStore, StatesUpdater, StatsTable,
//! };
//!
//! let groups = ConfiguredGroups::from_json(
//!     r#"{"groups": {"core": {"transitions": [["ready", {"PROOFREAD": "MAX"}]]}}}"#,
//! )
//! .unwrap();
//! let mut stats = StatsTable::new();
//! stats.set("core", "fi", StatSnapshot::new(10, 10, 0, 10).unwrap());
//!
//! let mut store = InMemoryStateStore::new();
//! let handle = MessageHandle::new("Main_Page/fi", "fi", ["core"]);
//! StatesUpdater::new(&groups, &stats).run(&handle, &mut store).unwrap();
//! assert_eq!(store.current_state("core", "fi").as_deref(), Some("ready"));
//! ```

pub mod config;
pub mod evaluator;
pub mod stats_table;
pub mod updater;

pub use config::{ConfiguredGroups, GroupConfig, GroupStatesConfig, LoadError};
pub use evaluator::{evaluate, matches};
pub use stats_table::StatsTable;
pub use updater::{
    DEFAULT_ACTOR, GroupRegistry, InMemoryStateStore, MessageHandle, StateChange, StateStore,
    StatesUpdater, StatsProvider, StoreError, UpdateError, groups_with_transitions,
};
