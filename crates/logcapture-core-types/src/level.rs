//! Severity levels and level sets
//!
//! `Level` is the fixed, ordered set of severities a log call may carry.
//! `LevelSet` is a copyable set of levels used for per-thread enablement.
//! Sets are never hierarchical on their own: enabling `INFO` says nothing
//! about `WARN`. The `*_LEVELS` constants exist for callers that want the
//! conventional "this level and everything above it" behaviour.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Severity of a single log call, ordered from least to most severe
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    /// Every level, least severe first
    pub const ALL: [Level; 5] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
    ];

    /// Canonical upper-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A level name that did not match any known level
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown level name '{value}'")]
pub struct ParseLevelError {
    pub value: String,
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseLevelError {
                value: s.to_string(),
            })
    }
}

/// Copyable set of levels
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<Level>", from = "Vec<Level>")]
pub struct LevelSet(u8);

impl LevelSet {
    /// No level enabled
    pub const NONE: LevelSet = LevelSet(0);
    /// Every level enabled
    pub const ALL: LevelSet = LevelSet::from_levels(&Level::ALL);

    // Conventional hierarchy: a level implies every more severe level.
    pub const OFF_LEVELS: LevelSet = LevelSet::NONE;
    pub const ERROR_LEVELS: LevelSet = LevelSet::from_levels(&[Level::Error]);
    pub const WARN_LEVELS: LevelSet = LevelSet::from_levels(&[Level::Error, Level::Warn]);
    pub const INFO_LEVELS: LevelSet =
        LevelSet::from_levels(&[Level::Error, Level::Warn, Level::Info]);
    pub const DEBUG_LEVELS: LevelSet =
        LevelSet::from_levels(&[Level::Error, Level::Warn, Level::Info, Level::Debug]);
    pub const TRACE_LEVELS: LevelSet = LevelSet::ALL;

    /// Build a set from an explicit list of levels
    pub const fn from_levels(levels: &[Level]) -> Self {
        let mut bits = 0u8;
        let mut i = 0;
        while i < levels.len() {
            bits |= levels[i].bit();
            i += 1;
        }
        LevelSet(bits)
    }

    /// The conventional hierarchy rooted at `level`
    pub fn at_or_above(level: Level) -> Self {
        Level::ALL.into_iter().filter(|l| *l >= level).collect()
    }

    pub fn contains(&self, level: Level) -> bool {
        self.0 & level.bit() != 0
    }

    /// Return a copy of this set with `level` added
    #[must_use]
    pub fn with(self, level: Level) -> Self {
        LevelSet(self.0 | level.bit())
    }

    /// Return a copy of this set with `level` removed
    #[must_use]
    pub fn without(self, level: Level) -> Self {
        LevelSet(self.0 & !level.bit())
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Levels in this set, least severe first
    pub fn iter(&self) -> impl Iterator<Item = Level> + '_ {
        Level::ALL.into_iter().filter(|l| self.contains(*l))
    }
}

impl fmt::Debug for LevelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<Level> for LevelSet {
    fn from_iter<I: IntoIterator<Item = Level>>(iter: I) -> Self {
        iter.into_iter().fold(LevelSet::NONE, LevelSet::with)
    }
}

impl From<Level> for LevelSet {
    fn from(level: Level) -> Self {
        LevelSet::NONE.with(level)
    }
}

impl<const N: usize> From<[Level; N]> for LevelSet {
    fn from(levels: [Level; N]) -> Self {
        levels.into_iter().collect()
    }
}

impl From<Vec<Level>> for LevelSet {
    fn from(levels: Vec<Level>) -> Self {
        levels.into_iter().collect()
    }
}

impl From<LevelSet> for Vec<Level> {
    fn from(set: LevelSet) -> Self {
        set.iter().collect()
    }
}

/// Threshold at or above which captured events are echoed for humans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrintLevel {
    /// Never echo
    #[default]
    Off,
    /// Echo events at this level or more severe
    At(Level),
}

impl PrintLevel {
    pub fn should_print(&self, level: Level) -> bool {
        match self {
            PrintLevel::Off => false,
            PrintLevel::At(threshold) => level >= *threshold,
        }
    }
}

impl fmt::Display for PrintLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrintLevel::Off => f.write_str("OFF"),
            PrintLevel::At(level) => level.fmt(f),
        }
    }
}

impl FromStr for PrintLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("OFF") {
            return Ok(PrintLevel::Off);
        }
        s.parse().map(PrintLevel::At)
    }
}
