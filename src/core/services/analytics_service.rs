use chrono::{DateTime, FixedOffset};
use tracing::debug;

use crate::core::models::dashboard::DashboardView;
use crate::core::models::event::EventRecord;
use crate::core::models::filter_state::FilterState;
use crate::core::models::summary::Dimension;
use crate::core::services::filter_service::FilterService;
use crate::core::services::project_service::ProjectService;
use crate::core::services::series_service::SeriesService;
use crate::core::services::summary_service::SummaryService;

/// Runs the whole aggregation pipeline against one captured `now`.
///
/// Raw events are the source of truth; every derived structure is
/// recomputed from (events, filter, now) and never patched in place.
pub struct AnalyticsService {
    pub now: DateTime<FixedOffset>,
    /// Label for records missing the grouped field.
    pub unknown_label: String,
}

impl AnalyticsService {
    pub fn new(now: DateTime<FixedOffset>, unknown_label: impl Into<String>) -> Self {
        Self {
            now,
            unknown_label: unknown_label.into(),
        }
    }

    /// Records passing `filter`, in input order.
    pub fn filtered<'a>(&self, events: &'a [EventRecord], filter: &FilterState) -> Vec<&'a EventRecord> {
        FilterService.filter(events, filter, &self.now)
    }

    /// Build every view the dashboard shows.
    ///
    /// The project list is taken from the unfiltered collection so that
    /// every project stays selectable; all counts use the filtered set.
    pub fn dashboard(
        &self,
        events: &[EventRecord],
        filter: &FilterState,
        breakdown_by: Dimension,
    ) -> DashboardView {
        let filtered = self.filtered(events, filter);
        debug!(
            total = events.len(),
            kept = filtered.len(),
            window = %filter.window,
            "filtered events"
        );

        let summaries = SummaryService;
        DashboardView {
            now: self.now,
            filter: filter.clone(),
            projects: ProjectService.unique_projects(events),
            stats: summaries.severity_stats(&filtered),
            series: SeriesService.build_daily(&filtered, filter.window, &self.now),
            severity: summaries.summarize_dimension(
                &filtered,
                Dimension::Severity,
                &self.unknown_label,
            ),
            breakdown: summaries.summarize_dimension(&filtered, breakdown_by, &self.unknown_label),
            breakdown_by: breakdown_by.code().to_string(),
        }
    }
}
