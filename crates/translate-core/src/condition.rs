// Conditions over translation statistics used by group state transitions
// Origin: utils/MessageGroupStatesUpdaterJob.php

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Which statistic a condition looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConditionKind {
    /// `total - translated - fuzzy`
    Untranslated,
    /// Outdated (fuzzy) translations.
    Outdated,
    Translated,
    Proofread,
}

impl ConditionKind {
    pub const ALL: [ConditionKind; 4] = [
        ConditionKind::Untranslated,
        ConditionKind::Outdated,
        ConditionKind::Translated,
        ConditionKind::Proofread,
    ];

    /// Configuration name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ConditionKind::Untranslated => "UNTRANSLATED",
            ConditionKind::Outdated => "OUTDATED",
            ConditionKind::Translated => "TRANSLATED",
            ConditionKind::Proofread => "PROOFREAD",
        }
    }
}

impl FromStr for ConditionKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNTRANSLATED" => Ok(ConditionKind::Untranslated),
            "OUTDATED" => Ok(ConditionKind::Outdated),
            "TRANSLATED" => Ok(ConditionKind::Translated),
            "PROOFREAD" => Ok(ConditionKind::Proofread),
            other => Err(ConfigError::UnknownConditionKind(other.to_string())),
        }
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the statistic is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionTest {
    /// value == 0
    Zero,
    /// value > 0
    NonZero,
    /// value == total
    Max,
}

impl ConditionTest {
    pub fn as_str(self) -> &'static str {
        match self {
            ConditionTest::Zero => "ZERO",
            ConditionTest::NonZero => "NONZERO",
            ConditionTest::Max => "MAX",
        }
    }

    /// Apply the test to a statistic value, with `max` being the group total.
    #[inline]
    pub fn matches(self, value: u64, max: u64) -> bool {
        match self {
            ConditionTest::Zero => value == 0,
            ConditionTest::NonZero => value > 0,
            ConditionTest::Max => value == max,
        }
    }
}

impl FromStr for ConditionTest {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ZERO" => Ok(ConditionTest::Zero),
            "NONZERO" => Ok(ConditionTest::NonZero),
            "MAX" => Ok(ConditionTest::Max),
            other => Err(ConfigError::UnknownConditionTest(other.to_string())),
        }
    }
}

impl fmt::Display for ConditionTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `kind => test` pair of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Condition {
    pub kind: ConditionKind,
    pub test: ConditionTest,
}

impl Condition {
    pub fn new(kind: ConditionKind, test: ConditionTest) -> Self {
        Self { kind, test }
    }

    /// Parse a condition from its configuration names, e.g. `("PROOFREAD", "MAX")`.
    pub fn parse(kind: &str, test: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            kind: kind.parse()?,
            test: test.parse()?,
        })
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.kind, self.test)
    }
}
