use tokio::sync::Mutex;

/// Monotonically increasing value ordering writes to the ledger. Issued
/// exactly once per submission attempt; never reused, even after a failed
/// attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SequencingToken(u64);

impl SequencingToken {
    pub fn value(self) -> u64 { self.0 }
}

impl std::fmt::Display for SequencingToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Single-writer issuer of sequencing tokens.
///
/// All ledger-mutating requests serialize on this one shared resource: token
/// acquisition is an atomic read-and-increment under the mutex, so two
/// concurrent submissions can never observe the same "next token" value.
#[derive(Debug)]
pub struct Sequencer {
    next: Mutex<u64>,
}

impl Sequencer {
    pub fn new(start: u64) -> Self {
        Self { next: Mutex::new(start) }
    }

    /// Issues a fresh token. Each call returns a strictly larger value than
    /// every previous call.
    pub async fn next_token(&self) -> SequencingToken {
        let mut next = self.next.lock().await;
        let token = SequencingToken(*next);
        *next += 1;
        token
    }

    /// Raises the counter to at least `floor`. Used at startup to resume
    /// above everything the ledger has already sequenced; never lowers.
    pub async fn resync(&self, floor: u64) {
        let mut next = self.next.lock().await;
        if *next < floor {
            *next = floor;
        }
    }
}
