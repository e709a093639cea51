use crate::telemetry::{FlightRecord, ALT_SCALE, DEG_SCALE};
use rand::Rng;
use strum_macros::Display;

/// The adversarial mutations the harness can apply to a legitimate record.
/// A closed set: every kind has exactly one mutation function, and the
/// classification each one earns is fully determined by the validation rules
/// — the harness constructs inputs, it never decides outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AttackKind {
    /// Resubmission of an old payload: identical position and altitude with
    /// an intentionally stale timestamp.
    Replay,
    /// Position teleported by several degrees, suspicious flag set.
    Spoof,
    /// Altitude edited by hundreds of meters while the position stays
    /// plausible.
    Tamper,
}

/// How stale a replayed record is, in seconds.
const REPLAY_OFFSET_S: i64 = 3_600;
/// Spoof displacement bounds, in whole degrees.
const SPOOF_MIN_DEG: i64 = 3;
const SPOOF_MAX_DEG: i64 = 8;
/// Tamper displacement bounds, in meters.
const TAMPER_MIN_M: i64 = 600;
const TAMPER_MAX_M: i64 = 3_000;

/// Builds the adversarial variant of `base`, the latest accepted record for
/// the targeted aircraft. Offsets are random in magnitude but fixed in
/// shape, so the expected verdict per kind is deterministic.
pub fn forge(kind: AttackKind, base: &FlightRecord) -> FlightRecord {
    match kind {
        AttackKind::Replay => replay(base),
        AttackKind::Spoof => spoof(base),
        AttackKind::Tamper => tamper(base),
    }
}

fn replay(base: &FlightRecord) -> FlightRecord {
    base.with_timestamp(base.timestamp() - REPLAY_OFFSET_S)
}

fn spoof(base: &FlightRecord) -> FlightRecord {
    let mut rng = rand::rng();
    let dlat = rng.random_range(SPOOF_MIN_DEG..=SPOOF_MAX_DEG) * DEG_SCALE;
    let dlon = rng.random_range(SPOOF_MIN_DEG..=SPOOF_MAX_DEG) * DEG_SCALE;
    // Displace toward the equator/meridian so the forged coordinates stay
    // inside the valid range and the position rule is the one that fires.
    let lat_sign = if base.latitude() >= 0 { 1 } else { -1 };
    let lon_sign = if base.longitude() >= 0 { 1 } else { -1 };
    let latitude = base.latitude() - lat_sign * dlat;
    let longitude = base.longitude() - lon_sign * dlon;
    FlightRecord::new(
        base.aircraft_id().to_string(),
        base.callsign().to_string(),
        latitude,
        longitude,
        base.altitude(),
        base.on_ground(),
        base.timestamp() + 1,
        true,
    )
}

fn tamper(base: &FlightRecord) -> FlightRecord {
    let mut rng = rand::rng();
    let dalt = rng.random_range(TAMPER_MIN_M..=TAMPER_MAX_M) * ALT_SCALE;
    FlightRecord::new(
        base.aircraft_id().to_string(),
        base.callsign().to_string(),
        base.latitude(),
        base.longitude(),
        base.altitude() + dalt,
        base.on_ground(),
        base.timestamp() + 1,
        false,
    )
}
