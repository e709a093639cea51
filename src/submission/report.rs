use super::batch_group::BatchGroup;
use crate::ledger_handler::Confirmation;
use crate::validation::RejectReason;

/// Terminal state of one input record. Every record submitted through the
/// pipeline ends in exactly one of these; nothing is silently dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordStatus {
    /// Committed and durability-acknowledged by the ledger.
    Confirmed { token: u64 },
    /// Turned away by the local engine; never submitted, never retried.
    ValidationRejected(RejectReason),
    /// The ledger's own validation refused it; terminal.
    LedgerRejected(String),
    /// Good data we could not deliver within the retry budget.
    RetryBudgetExhausted,
}

impl RecordStatus {
    pub fn is_confirmed(&self) -> bool { matches!(self, RecordStatus::Confirmed { .. }) }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordStatus::Confirmed { token } => write!(f, "Confirmed(token {token})"),
            RecordStatus::ValidationRejected(reason) => write!(f, "ValidationRejected({reason})"),
            RecordStatus::LedgerRejected(reason) => write!(f, "LedgerRejected({reason})"),
            RecordStatus::RetryBudgetExhausted => write!(f, "RetryBudgetExhausted"),
        }
    }
}

/// Outcome of one input record, addressed by its index in the submitted list
/// so callers can re-queue or alert on specific aircraft.
#[derive(Debug, Clone)]
pub struct RecordOutcome {
    index: usize,
    aircraft_id: String,
    status: RecordStatus,
}

impl RecordOutcome {
    pub(crate) fn new(index: usize, aircraft_id: String, status: RecordStatus) -> Self {
        Self { index, aircraft_id, status }
    }

    pub fn index(&self) -> usize { self.index }
    pub fn aircraft_id(&self) -> &str { self.aircraft_id.as_str() }
    pub fn status(&self) -> &RecordStatus { &self.status }
}

/// Ledger acknowledgement for one committed group.
#[derive(Debug, Clone)]
pub struct GroupOutcome {
    start: usize,
    len: usize,
    confirmation: Confirmation,
}

impl GroupOutcome {
    pub(crate) fn new(group: &BatchGroup, confirmation: Confirmation) -> Self {
        Self { start: group.start(), len: group.len(), confirmation }
    }

    pub fn start(&self) -> usize { self.start }
    pub fn len(&self) -> usize { self.len }
    pub fn confirmation(&self) -> &Confirmation { &self.confirmation }
}

/// Aggregated result of one `submit` call: which groups landed, which
/// records failed and why, and how many rounds it took.
#[derive(Debug, Clone, Default)]
pub struct SubmissionReport {
    outcomes: Vec<RecordOutcome>,
    confirmations: Vec<GroupOutcome>,
    failed_groups: usize,
    rounds: u32,
}

impl SubmissionReport {
    pub(crate) fn new(
        outcomes: Vec<RecordOutcome>,
        confirmations: Vec<GroupOutcome>,
        failed_groups: usize,
        rounds: u32,
    ) -> Self {
        Self { outcomes, confirmations, failed_groups, rounds }
    }

    pub fn outcomes(&self) -> &[RecordOutcome] { &self.outcomes }

    pub fn confirmations(&self) -> &[GroupOutcome] { &self.confirmations }

    pub fn succeeded_groups(&self) -> usize { self.confirmations.len() }

    pub fn failed_groups(&self) -> usize { self.failed_groups }

    /// Rounds actually run, including the initial attempt.
    pub fn rounds(&self) -> u32 { self.rounds }

    pub fn confirmed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status().is_confirmed()).count()
    }

    /// Failed records, enumerated individually so callers can re-queue or
    /// alert on specific aircraft.
    pub fn failed(&self) -> impl Iterator<Item = &RecordOutcome> {
        self.outcomes.iter().filter(|o| !o.status().is_confirmed())
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed_groups == 0 && self.outcomes.iter().all(|o| o.status().is_confirmed())
    }
}

impl std::fmt::Display for SubmissionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} record(s) confirmed, {} group(s) committed, {} failed, {} round(s)",
            self.confirmed_count(),
            self.outcomes.len(),
            self.succeeded_groups(),
            self.failed_groups,
            self.rounds
        )
    }
}
