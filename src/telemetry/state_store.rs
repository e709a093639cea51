use super::flight_record::FlightRecord;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Per-aircraft pointer to the most recently *accepted* record.
///
/// This is a read-through cache of the ledger's latest entries — the ledger
/// stays the durable source of truth. Entries are created on first acceptance,
/// overwritten on each subsequent acceptance and never deleted. Callers must
/// only `put` after the ledger has confirmed the record.
#[derive(Debug, Default)]
pub struct AircraftStateStore {
    latest: RwLock<HashMap<String, FlightRecord>>,
}

impl AircraftStateStore {
    pub fn new() -> Self {
        Self { latest: RwLock::new(HashMap::new()) }
    }

    pub async fn get(&self, aircraft_id: &str) -> Option<FlightRecord> {
        self.latest.read().await.get(aircraft_id).cloned()
    }

    pub async fn put(&self, record: FlightRecord) {
        self.latest.write().await.insert(record.aircraft_id().to_string(), record);
    }

    pub async fn len(&self) -> usize { self.latest.read().await.len() }

    pub async fn is_empty(&self) -> bool { self.latest.read().await.is_empty() }

    /// Replaces the cache with the per-aircraft latest of `records`, keeping
    /// the highest timestamp per aircraft. Used to rebuild from the ledger on
    /// startup before traffic is accepted.
    pub async fn rebuild(&self, records: Vec<FlightRecord>) {
        let mut map: HashMap<String, FlightRecord> = HashMap::new();
        for rec in records {
            match map.get(rec.aircraft_id()) {
                Some(cur) if cur.timestamp() >= rec.timestamp() => {}
                _ => {
                    map.insert(rec.aircraft_id().to_string(), rec);
                }
            }
        }
        *self.latest.write().await = map;
    }
}
