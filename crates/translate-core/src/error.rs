// Validation and configuration errors shared by all translate crates

/// Error for statistics that violate the counter invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    /// More messages are translated or outdated than exist in the group.
    #[error("translated ({translated}) + fuzzy ({fuzzy}) exceeds total ({total})")]
    ExceedsTotal {
        total: u64,
        translated: u64,
        fuzzy: u64,
    },

    /// Proofread messages must be a subset of the translated ones.
    #[error("proofread ({proofread}) exceeds translated ({translated})")]
    ProofreadExceedsTranslated { translated: u64, proofread: u64 },

    /// A status move would take a counter below zero.
    #[error("cannot move a message from {from} to {to}: no {from} messages left")]
    Underflow {
        from: &'static str,
        to: &'static str,
    },

    /// A status move would take a counter above the group total.
    #[error("cannot move a message from {from} to {to}: counter would exceed total")]
    Overflow {
        from: &'static str,
        to: &'static str,
    },
    /// Adding up snapshots would overflow a counter.
    #[error("sum of statistics overflows: {total} + {other}")]
    SumOverflow { total: u64, other: u64 },
}

/// Error for malformed transition or service configuration.
///
/// These are operator errors: a configuration that fails to parse must never
/// be half-applied, so every variant is fatal to the load that produced it.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A condition names a statistic that does not exist.
    #[error("unknown condition {0}")]
    UnknownConditionKind(String),

    /// A condition compares against a test that does not exist.
    #[error("unknown condition value {0}")]
    UnknownConditionTest(String),

    /// A transition has an empty target state label.
    #[error("transition {index} has an empty state label")]
    EmptyStateLabel { index: usize },

    /// The configuration document is not valid JSON or has the wrong shape.
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error for a suggestion quality outside `[0, 1]` (or NaN).
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("suggestion quality {0} is outside [0, 1]")]
pub struct InvalidQuality(pub f64);
