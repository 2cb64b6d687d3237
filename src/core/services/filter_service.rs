use chrono::{DateTime, TimeZone, Utc};

use crate::core::models::event::EventRecord;
use crate::core::models::filter_state::FilterState;

/// Narrows an event collection to the user's time window and projects.
pub struct FilterService;

impl FilterService {
    /// Return the records of `events` that pass `filter` at instant `now`.
    ///
    /// - `all` applies no time bound; other windows keep records strictly
    ///   after `now - window`
    /// - an empty project set applies no project bound
    ///
    /// The input is left untouched; the result borrows from it, so the
    /// output of one call can be fed straight into another.
    pub fn filter<'a, I, Tz>(
        &self,
        events: I,
        filter: &FilterState,
        now: &DateTime<Tz>,
    ) -> Vec<&'a EventRecord>
    where
        I: IntoIterator<Item = &'a EventRecord>,
        Tz: TimeZone,
    {
        let cutoff = filter.window.cutoff(now).map(|c| c.with_timezone(&Utc));

        events
            .into_iter()
            .filter(|event| cutoff.is_none_or(|c| event.timestamp > c))
            .filter(|event| filter.admits_project(&event.project_uuid))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::window::TimeWindow;
    use chrono::{Duration, FixedOffset};

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-01-05T12:00:00+00:00").unwrap()
    }

    fn event(uuid: &str, hours_ago: i64, project: &str) -> EventRecord {
        let ts = now().with_timezone(&Utc) - Duration::hours(hours_ago);
        EventRecord::new(uuid, ts, project)
    }

    fn corpus() -> Vec<EventRecord> {
        vec![
            event("fresh", 2, "A"),
            event("yesterday", 23, "B"),
            event("week", 24 * 7, "A"),
            event("fortnight", 24 * 20, "B"),
            event("ancient", 24 * 400, "C"),
        ]
    }

    fn uuids(events: &[&EventRecord]) -> Vec<String> {
        events.iter().map(|e| e.uuid.clone()).collect()
    }

    #[test]
    fn all_window_keeps_everything() {
        let events = corpus();
        let state = FilterState::new(TimeWindow::All, Vec::<String>::new());
        let kept = FilterService.filter(&events, &state, &now());
        assert_eq!(kept.len(), events.len());
    }

    #[test]
    fn fixed_windows_cut_by_time() {
        let events = corpus();
        let svc = FilterService;
        let day = svc.filter(
            &events,
            &FilterState::new(TimeWindow::Day, Vec::<String>::new()),
            &now(),
        );
        let fortnight = svc.filter(
            &events,
            &FilterState::new(TimeWindow::TwoWeeks, Vec::<String>::new()),
            &now(),
        );
        let month = svc.filter(
            &events,
            &FilterState::new(TimeWindow::Month, Vec::<String>::new()),
            &now(),
        );

        assert_eq!(uuids(&day), ["fresh", "yesterday"]);
        assert_eq!(uuids(&fortnight), ["fresh", "yesterday", "week"]);
        assert_eq!(uuids(&month), ["fresh", "yesterday", "week", "fortnight"]);
    }

    #[test]
    fn time_windows_are_nested() {
        let events = corpus();
        let svc = FilterService;
        let mut previous: Vec<String> = Vec::new();
        for window in TimeWindow::ALL {
            let kept = uuids(&svc.filter(
                &events,
                &FilterState::new(window, Vec::<String>::new()),
                &now(),
            ));
            assert!(previous.iter().all(|u| kept.contains(u)), "{window} lost records");
            previous = kept;
        }
        assert_eq!(previous.len(), events.len());
    }

    #[test]
    fn cutoff_is_exclusive() {
        let events = vec![event("edge", 24, "A")];
        let state = FilterState::new(TimeWindow::Day, Vec::<String>::new());
        assert!(FilterService.filter(&events, &state, &now()).is_empty());
    }

    #[test]
    fn project_set_restricts() {
        let events = corpus();
        let state = FilterState::new(TimeWindow::All, ["A", "C"]);
        let kept = FilterService.filter(&events, &state, &now());
        assert_eq!(uuids(&kept), ["fresh", "week", "ancient"]);
    }

    #[test]
    fn unknown_project_matches_nothing() {
        let events = corpus();
        let state = FilterState::new(TimeWindow::All, ["Z"]);
        assert!(FilterService.filter(&events, &state, &now()).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let events = corpus();
        let state = FilterState::new(TimeWindow::TwoWeeks, ["A", "B"]);
        let once = FilterService.filter(&events, &state, &now());
        let twice = FilterService.filter(once.iter().copied(), &state, &now());
        assert_eq!(once, twice);
    }

    #[test]
    fn input_is_not_mutated() {
        let events = corpus();
        let before = events.clone();
        let state = FilterState::new(TimeWindow::Day, ["A"]);
        let _ = FilterService.filter(&events, &state, &now());
        assert_eq!(events, before);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let events: Vec<EventRecord> = Vec::new();
        let state = FilterState::default();
        assert!(FilterService.filter(&events, &state, &now()).is_empty());
    }
}
