use super::verdict::{RejectReason, Verdict};
use crate::telemetry::{FlightRecord, ALT_SCALE, DEG_SCALE};
use fixed::types::I64F64;
use regex::Regex;
use std::sync::LazyLock;

/// ICAO24 transponder addresses are six hex digits.
static AIRCRAFT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[0-9A-Fa-f]{6}$").unwrap());

/// Flat-earth degree-to-meter conversion, intentionally cheap and not
/// geodesically exact. Good enough for a plausibility ceiling.
const LAT_DEG_METERS: i64 = 111_000;
const LON_DEG_METERS: i64 = 85_000;

/// Plausibility ceilings for one aircraft category. Everything is
/// configuration so the same engine can be tuned per category.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct ValidationConfig {
    /// Below this many seconds, a bit-identical position is treated as a
    /// duplicate submission.
    pub min_update_interval: i64,
    /// Max climb/descent rate in m/s.
    pub max_climb_rate: i64,
    /// Max raw altitude delta in meters, independent of elapsed time.
    pub max_altitude_jump: i64,
    /// Max position delta in meters inside the jump window.
    pub max_position_jump: i64,
    /// Seconds below which the position-jump ceiling applies.
    pub position_jump_window: i64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_update_interval: 1,
            max_climb_rate: 10,
            max_altitude_jump: 500,
            max_position_jump: 100_000,
            position_jump_window: 300,
        }
    }
}

/// Pure accept/reject decision over a candidate and the previous accepted
/// record. No I/O, no hidden state: the same inputs always yield the same
/// verdict. The engine never touches the state store — the pipeline updates
/// it, and only after ledger confirmation, because the ledger independently
/// re-validates and stays the final arbiter.
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    config: ValidationConfig,
}

impl ValidationEngine {
    pub fn new(config: ValidationConfig) -> Self { Self { config } }

    pub fn config(&self) -> &ValidationConfig { &self.config }

    /// Evaluates the plausibility rules in order, first failing rule wins.
    pub fn validate(&self, candidate: &FlightRecord, previous: Option<&FlightRecord>) -> Verdict {
        if !Self::well_formed(candidate) {
            return Verdict::Reject(RejectReason::MalformedInput);
        }

        // First sighting: no history to compare against.
        let Some(prev) = previous else {
            return Verdict::Accept;
        };

        let dt = candidate.timestamp() - prev.timestamp();
        if dt <= 0 {
            return Verdict::Reject(RejectReason::ReplayOrStale);
        }
        // The acceptance time is ledger-assigned, so a replayed payload still
        // arrives with a fresh timestamp. A bit-identical position inside the
        // duplicate window is the tell.
        if candidate.same_position(prev) && dt < self.config.min_update_interval {
            return Verdict::Reject(RejectReason::ReplayOrStale);
        }

        let alt_delta = (candidate.altitude() - prev.altitude()).abs();
        if alt_delta > self.config.max_climb_rate * ALT_SCALE * dt {
            return Verdict::Reject(RejectReason::ImplausibleAltitudeRate);
        }
        // Independent of rate: a long dt must not launder a single-sample
        // altitude edit.
        if alt_delta > self.config.max_altitude_jump * ALT_SCALE {
            return Verdict::Reject(RejectReason::ImplausibleAltitudeJump);
        }

        if dt < self.config.position_jump_window {
            let ceiling = I64F64::from_num(self.config.max_position_jump);
            if Self::position_delta_sq_m(candidate, prev) > ceiling * ceiling {
                return Verdict::Reject(RejectReason::ImplausiblePositionJump);
            }
        }

        Verdict::Accept
    }

    fn well_formed(candidate: &FlightRecord) -> bool {
        AIRCRAFT_ID_RE.is_match(candidate.aircraft_id())
            && candidate.latitude().abs() <= 90 * DEG_SCALE
            && candidate.longitude().abs() <= 180 * DEG_SCALE
    }

    /// Approximate squared great-circle distance in m² via the flat-earth
    /// conversion above, in fixed-point to keep verdicts exact. Compared
    /// against the squared ceiling to avoid a root.
    fn position_delta_sq_m(candidate: &FlightRecord, prev: &FlightRecord) -> I64F64 {
        let dlat = I64F64::from_num(candidate.latitude() - prev.latitude())
            * I64F64::from_num(LAT_DEG_METERS)
            / I64F64::from_num(DEG_SCALE);
        let dlon = I64F64::from_num(candidate.longitude() - prev.longitude())
            * I64F64::from_num(LON_DEG_METERS)
            / I64F64::from_num(DEG_SCALE);
        dlat * dlat + dlon * dlon
    }
}
