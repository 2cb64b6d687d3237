use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeZone};
use tracing::debug;

use crate::core::models::event::EventRecord;
use crate::core::models::series::DailySeries;
use crate::core::models::window::TimeWindow;

/// Builds the zero-filled per-day event counts behind the line chart.
pub struct SeriesService;

impl SeriesService {
    /// Bucket `events` (already filtered) into calendar days.
    ///
    /// Days are taken in `now`'s time zone. The range starts at
    /// `now - window`, or at the earliest event for `All`, and runs
    /// through `now` inclusive. Every day in the range is present, even
    /// when its count is zero. Events falling outside the range are
    /// dropped.
    ///
    /// An `All` window over an empty set yields an empty series.
    pub fn build_daily<Tz: TimeZone>(
        &self,
        events: &[&EventRecord],
        window: TimeWindow,
        now: &DateTime<Tz>,
    ) -> DailySeries {
        let tz = now.timezone();
        let local_day = |event: &EventRecord| event.timestamp.with_timezone(&tz).date_naive();

        let start: NaiveDate = match window.cutoff(now) {
            Some(cutoff) => cutoff.date_naive(),
            None => match events.iter().map(|e| local_day(*e)).min() {
                Some(earliest) => earliest,
                None => return DailySeries::default(),
            },
        };
        let end = now.date_naive();

        // Earliest event after `now` under `All`: nothing to enumerate.
        let day_count = (end - start).num_days() + 1;
        if day_count <= 0 {
            return DailySeries::default();
        }

        let mut buckets: BTreeMap<NaiveDate, u64> =
            start.iter_days().take(day_count as usize).map(|d| (d, 0)).collect();

        let mut dropped = 0usize;
        for event in events {
            match buckets.get_mut(&local_day(*event)) {
                Some(count) => *count += 1,
                None => dropped += 1,
            }
        }
        if dropped > 0 {
            debug!(dropped, %start, %end, "events outside the series range");
        }

        let (dates, counts) = buckets.into_iter().unzip();
        DailySeries { dates, counts }
    }
}
