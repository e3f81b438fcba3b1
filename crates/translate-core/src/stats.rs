// Translation statistics for one (message group, language) pair
// Origin: api/ApiQueryLanguageStats.php, resources/js/ext.translate.statsbar.js

use serde::{Deserialize, Serialize};

use crate::condition::ConditionKind;
use crate::error::StatsError;

// ---------------------------------------------------------------------------
// Message status
// ---------------------------------------------------------------------------

/// Status of a single message in one language.
///
/// Proofread messages are also counted as translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Untranslated,
    Fuzzy,
    Translated,
    Proofread,
}

impl MessageStatus {
    /// Lowercase name as used in status change events.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageStatus::Untranslated => "untranslated",
            MessageStatus::Fuzzy => "fuzzy",
            MessageStatus::Translated => "translated",
            MessageStatus::Proofread => "proofread",
        }
    }

    /// Contribution of one message in this status to the
    /// `(translated, fuzzy, proofread)` counters.
    fn contribution(self) -> (u64, u64, u64) {
        match self {
            MessageStatus::Untranslated => (0, 0, 0),
            MessageStatus::Fuzzy => (0, 1, 0),
            MessageStatus::Translated => (1, 0, 0),
            MessageStatus::Proofread => (1, 0, 1),
        }
    }
}

impl std::fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// StatSnapshot
// ---------------------------------------------------------------------------

/// Immutable translation counters for one (group, language) pair.
///
/// Invariants, checked on every construction:
/// - `translated + fuzzy <= total`
/// - `proofread <= translated`
///
/// Counters are unsigned, so negative values cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "RawStats")]
pub struct StatSnapshot {
    total: u64,
    translated: u64,
    fuzzy: u64,
    proofread: u64,
}

/// Unvalidated counters as they appear in serialized input.
#[derive(Deserialize)]
struct RawStats {
    total: u64,
    translated: u64,
    fuzzy: u64,
    proofread: u64,
}

impl TryFrom<RawStats> for StatSnapshot {
    type Error = StatsError;

    fn try_from(raw: RawStats) -> Result<Self, Self::Error> {
        StatSnapshot::new(raw.total, raw.translated, raw.fuzzy, raw.proofread)
    }
}

impl StatSnapshot {
    /// Create a validated snapshot.
    pub fn new(
        total: u64,
        translated: u64,
        fuzzy: u64,
        proofread: u64,
    ) -> Result<Self, StatsError> {
        let occupied = translated.checked_add(fuzzy);
        if occupied.is_none_or(|n| n > total) {
            return Err(StatsError::ExceedsTotal {
                total,
                translated,
                fuzzy,
            });
        }
        if proofread > translated {
            return Err(StatsError::ProofreadExceedsTranslated {
                translated,
                proofread,
            });
        }
        Ok(Self {
            total,
            translated,
            fuzzy,
            proofread,
        })
    }

    /// Snapshot of a group with no messages.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn translated(&self) -> u64 {
        self.translated
    }

    /// Number of outdated translations.
    pub fn fuzzy(&self) -> u64 {
        self.fuzzy
    }

    pub fn proofread(&self) -> u64 {
        self.proofread
    }

    /// Messages with neither a current nor an outdated translation.
    pub fn untranslated(&self) -> u64 {
        // Cannot underflow: guaranteed by the constructor.
        self.total - self.translated - self.fuzzy
    }

    /// The counter a transition condition of the given kind looks at.
    pub fn value(&self, kind: ConditionKind) -> u64 {
        match kind {
            ConditionKind::Untranslated => self.untranslated(),
            ConditionKind::Outdated => self.fuzzy,
            ConditionKind::Translated => self.translated,
            ConditionKind::Proofread => self.proofread,
        }
    }

    /// Component-wise sum of two snapshots.
    ///
    /// Used to aggregate one language over many groups, or one group over
    /// many languages. Fails when a counter would overflow.
    pub fn merge(&self, other: &StatSnapshot) -> Result<StatSnapshot, StatsError> {
        let add = |a: u64, b: u64| {
            a.checked_add(b)
                .ok_or(StatsError::SumOverflow { total: a, other: b })
        };
        StatSnapshot::new(
            add(self.total, other.total)?,
            add(self.translated, other.translated)?,
            add(self.fuzzy, other.fuzzy)?,
            add(self.proofread, other.proofread)?,
        )
    }

    /// Return the snapshot after one message moves from `from` to `to`.
    ///
    /// Proofreading a translated message does not add a translation, and
    /// reverting a proofread message to translated does not remove one.
    pub fn with_status_change(
        &self,
        from: MessageStatus,
        to: MessageStatus,
    ) -> Result<StatSnapshot, StatsError> {
        if from == to {
            return Ok(*self);
        }
        let underflow = StatsError::Underflow {
            from: from.as_str(),
            to: to.as_str(),
        };
        let (ft, ff, fp) = from.contribution();
        let (tt, tf, tp) = to.contribution();

        let step = |current: u64, add: u64, remove: u64| {
            current
                .saturating_add(add)
                .checked_sub(remove)
                .ok_or_else(|| underflow.clone())
        };
        let translated = step(self.translated, tt, ft)?;
        let fuzzy = step(self.fuzzy, tf, ff)?;
        let proofread = step(self.proofread, tp, fp)?;

        if from == MessageStatus::Untranslated && self.untranslated() == 0 {
            return Err(underflow);
        }

        StatSnapshot::new(self.total, translated, fuzzy, proofread).map_err(|_| {
            StatsError::Overflow {
                from: from.as_str(),
                to: to.as_str(),
            }
        })
    }

    /// Percentages of the total in each display bucket.
    pub fn breakdown(&self) -> StatsBreakdown {
        if self.total == 0 {
            return StatsBreakdown::default();
        }
        let total = self.total as f64;
        let proofread = 100.0 * self.proofread as f64 / total;
        // Proofread messages are also translated; show them only once.
        let translated = 100.0 * (self.translated - self.proofread) as f64 / total;
        let fuzzy = 100.0 * self.fuzzy as f64 / total;
        StatsBreakdown {
            proofread,
            translated,
            fuzzy,
            untranslated: 100.0 - proofread - translated - fuzzy,
        }
    }
}

/// Share of messages per status, in percent of the total.
///
/// `translated` excludes proofread messages so the four buckets add up to
/// 100 for a non-empty group. An empty group reports zero everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StatsBreakdown {
    pub proofread: f64,
    pub translated: f64,
    pub fuzzy: f64,
    pub untranslated: f64,
}
