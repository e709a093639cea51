use crate::ledger_handler::Ledger;
use crate::submission::{BatchSubmitter, Sequencer, SubmitterConfig};
use crate::telemetry::AircraftStateStore;
use crate::validation::{ValidationConfig, ValidationEngine};
use std::sync::Arc;

/// Struct representing the key components of the pipeline, providing access
/// to the ledger handle, validation engine, aircraft state store, token
/// sequencer and batch submitter.
#[derive(Clone)]
pub struct Keychain {
    /// The external ledger, the authoritative validator of record acceptance.
    ledger: Arc<dyn Ledger>,
    /// The local plausibility pre-filter.
    engine: Arc<ValidationEngine>,
    /// Per-aircraft cache of the latest accepted record.
    store: Arc<AircraftStateStore>,
    /// Single-writer issuer of sequencing tokens.
    sequencer: Arc<Sequencer>,
    /// The adaptive batch submitter.
    submitter: Arc<BatchSubmitter>,
}

impl Keychain {
    /// Creates a new instance of `Keychain` around the given ledger handle.
    pub fn new(
        ledger: Arc<dyn Ledger>,
        validation: ValidationConfig,
        submission: SubmitterConfig,
    ) -> Self {
        let engine = Arc::new(ValidationEngine::new(validation));
        let store = Arc::new(AircraftStateStore::new());
        let sequencer = Arc::new(Sequencer::new(0));
        let submitter = Arc::new(BatchSubmitter::new(
            Arc::clone(&ledger),
            Arc::clone(&sequencer),
            submission,
        ));
        Self { ledger, engine, store, sequencer, submitter }
    }

    /// Provides a cloned reference to the ledger handle.
    pub fn ledger(&self) -> Arc<dyn Ledger> { Arc::clone(&self.ledger) }

    /// Provides a cloned reference to the validation engine.
    pub fn engine(&self) -> Arc<ValidationEngine> { Arc::clone(&self.engine) }

    /// Provides a cloned reference to the aircraft state store.
    pub fn store(&self) -> Arc<AircraftStateStore> { Arc::clone(&self.store) }

    /// Provides a cloned reference to the token sequencer.
    pub fn sequencer(&self) -> Arc<Sequencer> { Arc::clone(&self.sequencer) }

    /// Provides a cloned reference to the batch submitter.
    pub fn submitter(&self) -> Arc<BatchSubmitter> { Arc::clone(&self.submitter) }
}
