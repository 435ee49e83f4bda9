//! Severity model shared by the log dispatcher and its sinks.
//!
//! Severities form a fixed total order from most to least severe. Comparison
//! is numeric: a lower ordinal is more severe. Numeric levels that fall
//! outside the known set are carried as [`RawSeverity`] and render as
//! `"UNKNOWN!"` instead of failing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Width in columns of every severity label.
pub const LABEL_WIDTH: usize = 8;

/// Label rendered for numeric levels outside the known set.
pub const UNKNOWN_LABEL: &str = "UNKNOWN!";

/// Ordered log severity.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Severity {
    /// Unrecoverable condition.
    Fatal = 0,
    /// Operation failed.
    Error = 1,
    /// Something unexpected that the system tolerates.
    Warning = 2,
    /// General information about operation.
    #[default]
    Info = 3,
    /// Detail useful during development.
    Debug = 4,
    /// Everything.
    All = 5,
}

impl Severity {
    /// Every severity, most severe first.
    pub const LEVELS: [Severity; 6] = [
        Severity::Fatal,
        Severity::Error,
        Severity::Warning,
        Severity::Info,
        Severity::Debug,
        Severity::All,
    ];

    /// Numeric ordinal of this severity.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Map a numeric ordinal back to a severity.
    pub const fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Fatal),
            1 => Some(Self::Error),
            2 => Some(Self::Warning),
            3 => Some(Self::Info),
            4 => Some(Self::Debug),
            5 => Some(Self::All),
            _ => None,
        }
    }

    /// Fixed-width label used when rendering a line.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fatal => "Fatal:  ",
            Self::Error => "Error:  ",
            Self::Warning => "Warning:",
            Self::Info => "Info:   ",
            Self::Debug => "Debug:  ",
            Self::All => "All:    ",
        }
    }

    /// Lowercase name, as used in configuration files.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fatal => "fatal",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::All => "all",
        }
    }

    /// Whether this severity passes a sink configured with `threshold`.
    pub const fn is_at_least(self, threshold: Severity) -> bool {
        self.as_u8() <= threshold.as_u8()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a severity name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown severity '{0}' (expected fatal, error, warning, info, debug or all)")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::LEVELS
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseSeverityError(s.to_string()))
    }
}

/// A numeric severity as supplied by a caller, possibly outside the known set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawSeverity(pub u8);

impl RawSeverity {
    /// The known severity, if any.
    pub const fn severity(self) -> Option<Severity> {
        Severity::from_u8(self.0)
    }

    /// Fixed-width label, `"UNKNOWN!"` for unknown levels.
    pub const fn label(self) -> &'static str {
        match self.severity() {
            Some(level) => level.label(),
            None => UNKNOWN_LABEL,
        }
    }

    /// Numeric comparison against a sink threshold.
    pub const fn is_at_least(self, threshold: Severity) -> bool {
        self.0 <= threshold.as_u8()
    }
}

impl From<Severity> for RawSeverity {
    fn from(level: Severity) -> Self {
        Self(level.as_u8())
    }
}

impl From<u8> for RawSeverity {
    fn from(raw: u8) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_order_is_most_severe_first() {
        for pair in Severity::LEVELS.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].as_u8() < pair[1].as_u8());
        }
        assert_eq!(Severity::default(), Severity::Info);
    }

    #[test]
    fn test_labels_are_fixed_width_and_distinct() {
        let labels: Vec<_> = Severity::LEVELS.iter().map(|l| l.label()).collect();
        for label in &labels {
            assert_eq!(label.len(), LABEL_WIDTH);
        }
        let mut unique = labels.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), labels.len());
        assert_eq!(UNKNOWN_LABEL.len(), LABEL_WIDTH);
    }

    #[test]
    fn test_unknown_level_renders_sentinel() {
        assert_eq!(RawSeverity(99).label(), "UNKNOWN!");
        assert_eq!(RawSeverity(6).severity(), None);
        assert_eq!(RawSeverity(2).label(), "Warning:");
    }

    #[test]
    fn test_threshold_comparison() {
        assert!(Severity::Fatal.is_at_least(Severity::Fatal));
        assert!(Severity::Error.is_at_least(Severity::Info));
        assert!(!Severity::Debug.is_at_least(Severity::Info));
        assert!(!RawSeverity(99).is_at_least(Severity::All));
    }

    #[test]
    fn test_parse_names() {
        for level in Severity::LEVELS {
            assert_eq!(level.name().parse::<Severity>(), Ok(level));
        }
        assert_eq!("WARNING".parse::<Severity>(), Ok(Severity::Warning));
        assert!("loud".parse::<Severity>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        #[derive(Debug, Serialize, Deserialize, PartialEq)]
        struct Wrapper {
            level: Severity,
        }

        let text = toml::to_string(&Wrapper {
            level: Severity::Warning,
        })
        .unwrap();
        assert!(text.contains("warning"));

        let parsed: Wrapper = toml::from_str("level = \"all\"").unwrap();
        assert_eq!(parsed.level, Severity::All);
    }
}
