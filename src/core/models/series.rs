use chrono::NaiveDate;
use serde::Serialize;

/// Zero-filled count-per-day sequence driving the line chart.
///
/// `dates` and `counts` are index-aligned and always the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DailySeries {
    pub dates: Vec<NaiveDate>,
    pub counts: Vec<u64>,
}

impl DailySeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn peak(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, u64)> + '_ {
        self.dates.iter().copied().zip(self.counts.iter().copied())
    }
}
