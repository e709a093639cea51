use super::harness::{forge, AttackKind};
use crate::info;
use crate::keychain::Keychain;
use crate::ledger_handler::{Ledger, MemoryLedger};
use crate::pipeline::{AttackOutcome, Pipeline};
use crate::submission::{Sequencer, SubmitterConfig};
use crate::telemetry::{CandidateUpdate, FlightRecord, ALT_SCALE, DEG_SCALE};
use crate::validation::{RejectReason, ValidationConfig, ValidationEngine, Verdict};
use std::sync::Arc;

fn base_record() -> FlightRecord {
    FlightRecord::new(
        String::from("3C4B26"),
        String::from("DLH442"),
        40_500_000,
        -74_000_000,
        8_000 * ALT_SCALE,
        false,
        1_700_000_000,
        false,
    )
}

fn candidate() -> CandidateUpdate {
    CandidateUpdate {
        aircraft_id: String::from("3C4B26"),
        callsign: Some(String::from("DLH442")),
        latitude: 40_500_000,
        longitude: -74_000_000,
        altitude: 8_000 * ALT_SCALE,
        on_ground: false,
        flagged_suspicious: false,
    }
}

fn pipeline() -> Pipeline {
    let ledger = Arc::new(MemoryLedger::new(ValidationConfig::default()));
    Pipeline::new(Keychain::new(
        ledger,
        ValidationConfig::default(),
        SubmitterConfig::default(),
    ))
}

#[test]
fn test_replay_classified_as_stale() {
    let engine = ValidationEngine::default();
    let base = base_record();
    let forged = forge(AttackKind::Replay, &base);
    assert!(forged.same_position(&base));
    assert_eq!(forged.timestamp(), base.timestamp() - 3_600);
    assert_eq!(
        engine.validate(&forged, Some(&base)),
        Verdict::Reject(RejectReason::ReplayOrStale)
    );
}

#[test]
fn test_spoof_classified_as_position_jump() {
    let engine = ValidationEngine::default();
    let base = base_record();
    for _ in 0..32 {
        let forged = forge(AttackKind::Spoof, &base);
        assert!(forged.flagged_suspicious());
        assert!(forged.latitude().abs() <= 90 * DEG_SCALE);
        assert!(forged.longitude().abs() <= 180 * DEG_SCALE);
        assert_eq!(
            engine.validate(&forged, Some(&base)),
            Verdict::Reject(RejectReason::ImplausiblePositionJump)
        );
    }
}

#[test]
fn test_tamper_classified_as_altitude_rate() {
    let engine = ValidationEngine::default();
    let base = base_record();
    for _ in 0..32 {
        let forged = forge(AttackKind::Tamper, &base);
        assert_eq!(forged.latitude(), base.latitude());
        assert_eq!(forged.longitude(), base.longitude());
        assert!(forged.altitude() > base.altitude());
        assert_eq!(
            engine.validate(&forged, Some(&base)),
            Verdict::Reject(RejectReason::ImplausibleAltitudeRate)
        );
    }
}

#[tokio::test]
async fn test_attacks_end_to_end_through_pipeline() {
    let pipeline = pipeline();

    // Seed one legitimate record and let it confirm.
    assert_eq!(pipeline.validate_and_queue(candidate()).await, Verdict::Accept);
    let report = pipeline.submit_pending(10).await;
    assert_eq!(report.confirmed_count(), 1);
    info!("seed report: {report}");

    let target = pipeline
        .keychain()
        .store()
        .get("3C4B26")
        .await
        .expect("seed record must be in the state store after confirmation");

    let replay = pipeline.simulate_attack(AttackKind::Replay, &target).await;
    assert_eq!(replay, AttackOutcome::RejectedLocally(RejectReason::ReplayOrStale));

    let spoof = pipeline.simulate_attack(AttackKind::Spoof, &target).await;
    assert_eq!(
        spoof,
        AttackOutcome::RejectedLocally(RejectReason::ImplausiblePositionJump)
    );

    let tamper = pipeline.simulate_attack(AttackKind::Tamper, &target).await;
    assert_eq!(
        tamper,
        AttackOutcome::RejectedLocally(RejectReason::ImplausibleAltitudeRate)
    );

    // The attacks left no trace on the ledger or the cache.
    assert_eq!(pipeline.keychain().ledger().count().await.unwrap(), 1);
    let latest = pipeline.keychain().store().get("3C4B26").await.unwrap();
    assert_eq!(latest, target);
}

#[tokio::test]
async fn test_restart_rebuilds_cache_and_token_floor() {
    let ledger = Arc::new(MemoryLedger::new(ValidationConfig::default()));

    // Pre-restart session: two aircraft on the ledger, one of them twice.
    let sequencer = Sequencer::new(0);
    let a_first = base_record();
    let a_moved = FlightRecord::new(
        String::from("3C4B26"),
        String::from("DLH442"),
        40_501_000,
        -74_000_000,
        8_000 * ALT_SCALE,
        false,
        0,
        false,
    );
    let other = FlightRecord::new(
        String::from("A0B1C2"),
        String::from("BAW117"),
        51_500_000,
        -120_000,
        9_000 * ALT_SCALE,
        false,
        0,
        false,
    );
    ledger.submit_record(&a_first, sequencer.next_token().await).await.unwrap();
    ledger.submit_record(&other, sequencer.next_token().await).await.unwrap();
    ledger.submit_record(&a_moved, sequencer.next_token().await).await.unwrap();
    // A rejected call consumes its token without appending a record.
    let bogus = FlightRecord::new(
        String::from("ZZZZZZ"),
        String::from("ZZZZZZ"),
        0,
        0,
        0,
        false,
        0,
        false,
    );
    let token = sequencer.next_token().await;
    ledger.submit_record(&bogus, token).await.unwrap_err();

    // Restart: a fresh pipeline over the same ledger.
    let pipeline = Pipeline::new(Keychain::new(
        ledger.clone() as Arc<dyn Ledger>,
        ValidationConfig::default(),
        SubmitterConfig::default(),
    ));
    pipeline.rebuild_state().await.unwrap();

    let store = pipeline.keychain().store();
    assert_eq!(store.len().await, 2);
    let latest_a = store.get("3C4B26").await.unwrap();
    assert_eq!(latest_a.latitude(), 40_501_000);
    assert!(store.get("A0B1C2").await.is_some());

    // Pre-restart payloads replayed against the rebuilt cache are caught.
    let replayed = pipeline.simulate_attack(AttackKind::Replay, &latest_a).await;
    assert_eq!(replayed, AttackOutcome::RejectedLocally(RejectReason::ReplayOrStale));

    // The sequencer resumed above the consumed-but-uncommitted token, so a
    // post-restart submission commits instead of dying stale.
    let fresh = CandidateUpdate {
        aircraft_id: String::from("C3D4E5"),
        callsign: None,
        latitude: 10_000_000,
        longitude: 20_000_000,
        altitude: 5_000 * ALT_SCALE,
        on_ground: false,
        flagged_suspicious: false,
    };
    assert_eq!(pipeline.validate_and_queue(fresh).await, Verdict::Accept);
    let report = pipeline.submit_pending(10).await;
    assert!(report.is_complete_success());
    assert_eq!(ledger.count().await.unwrap(), 4);
}

#[tokio::test]
async fn test_legitimate_follow_up_still_accepted_after_confirmation() {
    let pipeline = pipeline();
    assert_eq!(pipeline.validate_and_queue(candidate()).await, Verdict::Accept);
    pipeline.submit_pending(10).await;

    // A small, slow movement relative to the confirmed state passes.
    let mut follow_up = candidate();
    follow_up.latitude += 1_000;
    follow_up.longitude -= 1_000;
    follow_up.altitude += 10 * ALT_SCALE;
    // The ledger assigned the seed a fresh acceptance time; wait out the
    // 1 Hz timestamp granularity so the follow-up lands strictly after it.
    tokio::time::sleep(std::time::Duration::from_millis(1_100)).await;
    assert_eq!(pipeline.validate_and_queue(follow_up).await, Verdict::Accept);
    let report = pipeline.submit_pending(10).await;
    assert_eq!(report.confirmed_count(), 1);
}
