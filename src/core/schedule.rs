//! Review frequency schedule.
//!
//! Lookup table mapping a review interval in days to its human label, as
//! offered by the settings UI.

/// Interval-in-days to label pairs, ascending.
const SCHEDULE: &[(u32, &str)] = &[
    (0, "No automatic review date"),
    (1, "1 day"),
    (7, "1 week"),
    (30, "1 month"),
    (60, "2 months"),
    (91, "3 months"),
    (121, "4 months"),
    (152, "5 months"),
    (183, "6 months"),
    (365, "12 months"),
];

/// All schedule entries, ascending by interval.
#[must_use]
pub const fn entries() -> &'static [(u32, &'static str)] {
    SCHEDULE
}

/// Human label for a review interval.
///
/// Intervals outside the standard schedule get a generic label.
#[must_use]
pub fn label_for(days: u32) -> String {
    SCHEDULE
        .iter()
        .find(|(d, _)| *d == days)
        .map_or_else(|| format!("every {days} days"), |(_, label)| (*label).to_string())
}
