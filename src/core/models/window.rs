use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Months, TimeZone};
use serde::{Deserialize, Serialize};

use crate::core::errors::IssueLensError;

/// Named relative time range selectable in every view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeWindow {
    #[serde(rename = "1d")]
    Day,
    #[default]
    #[serde(rename = "14d")]
    TwoWeeks,
    #[serde(rename = "1m")]
    Month,
    #[serde(rename = "all")]
    All,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 4] = [
        TimeWindow::Day,
        TimeWindow::TwoWeeks,
        TimeWindow::Month,
        TimeWindow::All,
    ];

    /// Short code used on the command line and in config files.
    pub fn code(self) -> &'static str {
        match self {
            TimeWindow::Day => "1d",
            TimeWindow::TwoWeeks => "14d",
            TimeWindow::Month => "1m",
            TimeWindow::All => "all",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::Day => "last day",
            TimeWindow::TwoWeeks => "last 14 days",
            TimeWindow::Month => "last month",
            TimeWindow::All => "all time",
        }
    }

    /// Instant the window starts at, relative to `now`.
    ///
    /// `None` for `All`, and for the (theoretical) case where subtracting
    /// a month leaves chrono's representable range.
    pub fn cutoff<Tz: TimeZone>(self, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        match self {
            TimeWindow::Day => now.clone().checked_sub_signed(Duration::days(1)),
            TimeWindow::TwoWeeks => now.clone().checked_sub_signed(Duration::days(14)),
            TimeWindow::Month => now.clone().checked_sub_months(Months::new(1)),
            TimeWindow::All => None,
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TimeWindow {
    type Err = IssueLensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        TimeWindow::ALL
            .into_iter()
            .find(|w| w.code() == wanted)
            .ok_or_else(|| IssueLensError::InvalidWindow {
                value: s.to_string(),
            })
    }
}
