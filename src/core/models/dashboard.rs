use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::core::models::filter_state::FilterState;
use crate::core::models::project::ProjectRef;
use crate::core::models::series::DailySeries;
use crate::core::models::summary::{SeverityStats, SummaryEntry};

/// Everything the analytics views display, derived in one pass from
/// (events, filter, now).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub now: DateTime<FixedOffset>,
    pub filter: FilterState,
    /// Projects present in the unfiltered collection.
    pub projects: Vec<ProjectRef>,
    pub stats: SeverityStats,
    pub series: DailySeries,
    pub severity: Vec<SummaryEntry>,
    /// Breakdown by the requested secondary dimension.
    pub breakdown: Vec<SummaryEntry>,
    pub breakdown_by: String,
}
