use std::collections::HashSet;

use crate::record::FlightRecord;

/// Remembers every `(callsign, destination)` leg seen during one run.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<String>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(record: &FlightRecord) -> String {
        format!("{}_{}", record.callsign, record.destination)
    }

    /// `true` the first time a leg is offered, `false` for every repeat.
    pub fn should_process(&mut self, record: &FlightRecord) -> bool {
        self.seen.insert(Self::key(record))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
