use std::fmt;

use serde::{Deserialize, Serialize};

/// Recurrence frequency of a [`RecurringRule`](super::RecurringRule).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    Daily,
    Weekly,
    BiWeekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Returns the string representation used by persisted rules.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::BiWeekly => "bi-weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Parses a frequency (case-insensitive). `biweekly` is accepted as an alias.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "bi-weekly" | "biweekly" => Self::BiWeekly,
            "monthly" => Self::Monthly,
            "yearly" => Self::Yearly,
            _ => return None,
        })
    }

    /// Whether `occurrence_day` is read as a weekday index for this frequency.
    #[must_use]
    pub const fn takes_weekday_anchor(self) -> bool {
        matches!(self, Self::Weekly | Self::BiWeekly)
    }

    /// Whether `occurrence_day` is read as a day-of-month for this frequency.
    #[must_use]
    pub const fn takes_month_day_anchor(self) -> bool {
        matches!(self, Self::Monthly)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
