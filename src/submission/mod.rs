pub mod batch_group;
pub mod report;
pub mod sequencer;
pub mod submitter;
#[cfg(test)]
mod tests;

pub use batch_group::BatchGroup;
pub use report::{GroupOutcome, RecordOutcome, RecordStatus, SubmissionReport};
pub use sequencer::{Sequencer, SequencingToken};
pub use submitter::{BatchSubmitter, SubmitterConfig};
