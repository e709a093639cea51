use super::memory_ledger::MemoryLedger;
use super::Ledger;
use crate::submission::Sequencer;
use crate::telemetry::{FlightRecord, ALT_SCALE, DEG_SCALE};
use crate::validation::ValidationConfig;
use std::collections::HashMap;

fn rec(id: &str, lat_micro: i64, lon_micro: i64, alt_m: i64) -> FlightRecord {
    FlightRecord::new(
        id.to_string(),
        id.to_string(),
        lat_micro,
        lon_micro,
        alt_m * ALT_SCALE,
        false,
        0,
        false,
    )
}

#[tokio::test]
async fn test_stale_token_is_rejected_and_fresh_one_accepted() {
    let ledger = MemoryLedger::new(ValidationConfig::default());
    let sequencer = Sequencer::new(0);
    let first = sequencer.next_token().await;
    let second = sequencer.next_token().await;

    let record = rec("AB1234", 40 * DEG_SCALE, -74 * DEG_SCALE, 8_000);
    ledger.submit_record(&record, second).await.unwrap();

    // The lower token was never used, but the ledger has already sequenced
    // past it: replaying it must fail loudly instead of colliding.
    let moved = rec("AB1234", 40 * DEG_SCALE + 1_000, -74 * DEG_SCALE, 8_000);
    let err = ledger.submit_record(&moved, first).await.unwrap_err();
    assert!(matches!(err, super::LedgerError::Rejected(_)));

    let third = sequencer.next_token().await;
    ledger.submit_record(&moved, third).await.unwrap();
    assert_eq!(ledger.count().await.unwrap(), 2);
    assert_eq!(ledger.last_token().await.unwrap(), Some(third.value()));
}

#[tokio::test]
async fn test_assigned_timestamps_are_strictly_monotonic_per_aircraft() {
    let ledger = MemoryLedger::new(ValidationConfig::default());
    let sequencer = Sequencer::new(0);

    // Burst of updates far faster than the 1 Hz timestamp granularity; the
    // ledger must still assign strictly increasing acceptance times.
    for i in 0..5i64 {
        let record = rec("AB1234", 40 * DEG_SCALE + i * 1_000, -74 * DEG_SCALE, 8_000);
        let token = sequencer.next_token().await;
        ledger.submit_record(&record, token).await.unwrap();
    }

    let all = ledger.get_range(0, ledger.count().await.unwrap()).await.unwrap();
    let mut last_seen: HashMap<&str, i64> = HashMap::new();
    for record in &all {
        if let Some(prev) = last_seen.get(record.aircraft_id()) {
            assert!(
                record.timestamp() > *prev,
                "timestamps must strictly increase per aircraft"
            );
        }
        last_seen.insert(record.aircraft_id(), record.timestamp());
    }
    assert_eq!(all.len(), 5);
}

#[tokio::test]
async fn test_batch_commit_is_all_or_nothing() {
    let ledger = MemoryLedger::new(ValidationConfig::default());
    let sequencer = Sequencer::new(0);

    let good = rec("AB1234", 40 * DEG_SCALE, -74 * DEG_SCALE, 8_000);
    let malformed = rec("not-hex", 40 * DEG_SCALE, -74 * DEG_SCALE, 8_000);
    let also_good = rec("CD5678", 41 * DEG_SCALE, -75 * DEG_SCALE, 9_000);

    let token = sequencer.next_token().await;
    let err = ledger
        .submit_batch(&[good.clone(), malformed, also_good], token)
        .await
        .unwrap_err();
    assert!(matches!(err, super::LedgerError::Rejected(_)));
    // Nothing from the group may land, including the valid members.
    assert_eq!(ledger.count().await.unwrap(), 0);
    assert!(ledger.get_latest("AB1234").await.unwrap().is_none());
    // The rejected call still consumed its token.
    assert_eq!(ledger.last_token().await.unwrap(), Some(token.value()));
}

#[tokio::test]
async fn test_get_latest_tracks_the_newest_accepted_record() {
    let ledger = MemoryLedger::new(ValidationConfig::default());
    let sequencer = Sequencer::new(0);

    let first = rec("AB1234", 40 * DEG_SCALE, -74 * DEG_SCALE, 8_000);
    let second = rec("AB1234", 40 * DEG_SCALE + 5_000, -74 * DEG_SCALE, 8_005);
    let t0 = sequencer.next_token().await;
    ledger.submit_record(&first, t0).await.unwrap();
    let t1 = sequencer.next_token().await;
    ledger.submit_record(&second, t1).await.unwrap();

    let latest = ledger.get_latest("AB1234").await.unwrap().unwrap();
    assert_eq!(latest.latitude(), 40 * DEG_SCALE + 5_000);
    assert!(ledger.get_latest("000000").await.unwrap().is_none());
}
