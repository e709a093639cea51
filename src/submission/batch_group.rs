use crate::telemetry::FlightRecord;
use std::ops::Range;

/// A contiguous slice of pending records submitted together in one ledger
/// call. `start` is the index of the first member in the original submission
/// list, so outcomes can be reported against caller indices. Splits produce
/// new groups and preserve relative record order; the original list is never
/// mutated.
#[derive(Debug, Clone)]
pub struct BatchGroup {
    start: usize,
    records: Vec<FlightRecord>,
}

impl BatchGroup {
    pub fn new(start: usize, records: Vec<FlightRecord>) -> Self {
        Self { start, records }
    }

    pub fn start(&self) -> usize { self.start }

    pub fn len(&self) -> usize { self.records.len() }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn records(&self) -> &[FlightRecord] { &self.records }

    /// Caller-list indices covered by this group.
    pub fn indices(&self) -> Range<usize> {
        self.start..self.start + self.records.len()
    }

    /// Splits into a `ceil(n/2)` head and a `floor(n/2)` tail.
    pub fn split(mut self) -> (BatchGroup, BatchGroup) {
        let mid = self.records.len().div_ceil(2);
        let tail = self.records.split_off(mid);
        let tail_group = BatchGroup::new(self.start + mid, tail);
        (self, tail_group)
    }
}
