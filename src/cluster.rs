//! Event clustering
//!
//! Partitions the sorted timeline into contiguous events. An item joins
//! the current event when it falls on the same calendar date as the
//! event's first item and its gap from the last appended item is below
//! the threshold. Both checks matter: consecutive sub-threshold gaps can
//! stretch an event across many hours, but crossing midnight always
//! starts a new event no matter how small the gap.

use crate::timeline::MediaItem;
use chrono::{Duration, NaiveDate};
use tracing::debug;

/// A contiguous run of media items captured close together in time
#[derive(Debug, Clone)]
pub struct Event {
    items: Vec<MediaItem>,
}

impl Event {
    fn new(first: MediaItem) -> Self {
        Self { items: vec![first] }
    }

    /// Calendar date of the event, taken from its first item
    pub fn anchor_date(&self) -> NaiveDate {
        self.items[0].timestamp.date()
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Partition a sorted timeline into events.
///
/// The partition is total and order preserving: concatenating the
/// returned events reproduces the timeline exactly.
pub fn cluster_events(timeline: Vec<MediaItem>, gap_threshold: Duration) -> Vec<Event> {
    let mut events: Vec<Event> = Vec::new();
    let mut current: Option<Event> = None;

    for item in timeline {
        let extend = match &current {
            Some(event) => {
                let last = event.items.last().expect("event is never empty");
                let same_day = item.timestamp.date() == event.anchor_date();
                let gap = item.timestamp - last.timestamp;
                same_day && gap < gap_threshold
            }
            None => false,
        };

        if extend {
            current
                .as_mut()
                .expect("extend implies a current event")
                .items
                .push(item);
        } else {
            if let Some(event) = current.take() {
                debug!(date = %event.anchor_date(), files = event.len(), "Closing event");
                events.push(event);
            }
            current = Some(Event::new(item));
        }
    }

    if let Some(event) = current {
        events.push(event);
    }

    events
}
