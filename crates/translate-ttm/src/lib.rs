//! Translation memory fuzzy matching.
//!
//! Finds earlier translations of strings similar to the one being
//! translated. The matching core is a Unicode-aware Levenshtein distance and
//! a stable quality ranking; around it sit an in-memory backend and a
//! factory that builds backends from service configuration.
//!
//! # Architecture
//!
//! - [`levenshtein`] -- Edit distance over code points, with an ASCII fast path
//! - [`rank`] -- Quality score from edit distance, stable best-first ranking
//! - [`server`] -- Backend traits and the in-memory backend
//! - [`factory`] -- Service configuration and the constructor registry

pub mod factory;
pub mod levenshtein;
pub mod rank;
pub mod server;

pub use factory::{Constructor, ServiceConfig, ServiceSpec, ServicesConfig, TtmServerFactory};
pub use levenshtein::{edit_distance, levenshtein};
pub use rank::{quality, rank_suggestions, sort_suggestions};
pub use server::{
    MemoryTtmServer, QueryOptions, TtmEntry, TtmMatch, TtmServer, WritableTtmServer,
};

/// Error type for translation memory services.
#[derive(Debug, thiserror::Error)]
pub enum TtmError {
    /// A service entry has no `type`.
    #[error("translation memory service {0} has no type")]
    MissingType(String),

    /// No service with this name is configured.
    #[error("unknown translation memory service {0}")]
    UnknownService(String),

    /// A service type has no registered constructor.
    #[error("translation memory service {name} has unsupported type {kind}")]
    UnsupportedType { name: String, kind: String },

    /// A mirror names a service that is not configured.
    #[error("invalid configuration in mirrors of {service}, unknown service {mirror}")]
    InvalidMirror { service: String, mirror: String },

    /// No default service is configured.
    #[error("no default translation memory service configured")]
    NoDefault,

    /// Writes were attempted on a frozen service.
    #[error("translation memory service {0} is frozen")]
    Frozen(String),

    #[error("invalid translation memory configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Quality(#[from] translate_core::InvalidQuality),
}
