//! Shared types for the translation workflow core.
//!
//! This crate holds the plain data that flows between the statistics
//! aggregation, the message group state evaluator and the translation memory
//! matcher. It has no behavior beyond construction, validation and the
//! derived values of the statistics counters.
//!
//! # Architecture
//!
//! - [`stats`] -- Per (group, language) translation counters and status moves
//! - [`condition`] -- Condition kinds and tests used in state transitions
//! - [`transition`] -- Transition rules and the ordered transition table
//! - [`suggestion`] -- Translation memory candidates and scored suggestions
//! - [`error`] -- Validation and configuration errors

pub mod condition;
pub mod error;
pub mod stats;
pub mod suggestion;
pub mod transition;

pub use condition::{Condition, ConditionKind, ConditionTest};
pub use error::{ConfigError, InvalidQuality, StatsError};
pub use stats::{MessageStatus, StatSnapshot, StatsBreakdown};
pub use suggestion::{Candidate, Suggestion};
pub use transition::{RawTransition, Transition, TransitionTable};
