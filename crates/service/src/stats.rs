//! Aggregate customer statistics.

use serde::{Deserialize, Serialize};

/// Per-status share of the total, as whole percentages.
///
/// Each share is rounded independently (round-half-up), so the three values
/// are not guaranteed to sum to exactly 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub active: u8,
    pub inactive: u8,
    pub suspended: u8,
}

/// Counts and status distribution across all customer records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerStats {
    pub total: u64,
    pub active: u64,
    pub inactive: u64,
    pub suspended: u64,
    pub by_status: StatusBreakdown,
}

impl CustomerStats {
    /// Build the statistics object from the four raw counts.
    #[must_use]
    pub fn from_counts(total: u64, active: u64, inactive: u64, suspended: u64) -> Self {
        Self {
            total,
            active,
            inactive,
            suspended,
            by_status: StatusBreakdown {
                active: percentage(active, total),
                inactive: percentage(inactive, total),
                suspended: percentage(suspended, total),
            },
        }
    }
}

/// Whole-number percentage of `count` over `total`, 0 when `total` is 0.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percentage(count: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as u8
}
