//! Severity distribution over the report history.
//!
//! Derived, never stored: callers recompute from the current history whenever
//! it changes. Entries without a recognized severity are excluded.

use crate::model::{HistoryEntry, Severity};

/// Count of history entries per severity bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityDistribution {
    pub mild: usize,
    pub moderate: usize,
    pub severe: usize,
}

impl SeverityDistribution {
    /// Scan a history list into the three buckets.
    pub fn of(entries: &[HistoryEntry]) -> Self {
        let mut dist = Self::default();
        for entry in entries {
            match entry.severity {
                Some(Severity::Mild) => dist.mild += 1,
                Some(Severity::Moderate) => dist.moderate += 1,
                Some(Severity::Severe) => dist.severe += 1,
                None => {}
            }
        }
        dist
    }

    pub fn count(self, severity: Severity) -> usize {
        match severity {
            Severity::Mild => self.mild,
            Severity::Moderate => self.moderate,
            Severity::Severe => self.severe,
        }
    }

    /// Number of entries that landed in any bucket.
    pub fn total(self) -> usize {
        self.mild + self.moderate + self.severe
    }
}
