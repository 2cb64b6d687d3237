use std::collections::HashMap;

use crate::core::models::event::EventRecord;
use crate::core::models::summary::{Dimension, SeverityStats, SeverityTier, SummaryEntry};

/// Groups events into proportional breakdowns and counter cards.
pub struct SummaryService;

impl SummaryService {
    /// Count `events` per label produced by `label_of`.
    ///
    /// Entries come out in first-occurrence order and never carry a zero
    /// count; their values always sum to `events.len()`.
    pub fn summarize_by<F>(&self, events: &[&EventRecord], label_of: F) -> Vec<SummaryEntry>
    where
        F: Fn(&EventRecord) -> String,
    {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<SummaryEntry> = Vec::new();

        for event in events {
            let name = label_of(*event);
            match index.get(&name) {
                Some(&i) => entries[i].value += 1,
                None => {
                    index.insert(name.clone(), entries.len());
                    entries.push(SummaryEntry { name, value: 1 });
                }
            }
        }

        entries
    }

    /// Breakdown along one of the built-in dimensions.
    pub fn summarize_dimension(
        &self,
        events: &[&EventRecord],
        dimension: Dimension,
        fallback: &str,
    ) -> Vec<SummaryEntry> {
        self.summarize_by(events, |event| dimension.label_of(event, fallback))
    }

    /// Counter cards: total plus one count per severity tier.
    pub fn severity_stats(&self, events: &[&EventRecord]) -> SeverityStats {
        let mut stats = SeverityStats {
            total: events.len() as u64,
            ..SeverityStats::default()
        };
        for event in events {
            match SeverityTier::classify(event.severity_tag()) {
                SeverityTier::High => stats.high += 1,
                SeverityTier::Medium => stats.medium += 1,
                SeverityTier::Low => stats.low += 1,
                SeverityTier::Unclassified => stats.unclassified += 1,
            }
        }
        stats
    }
}
