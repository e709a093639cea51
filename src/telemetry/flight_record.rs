use chrono::{DateTime, Utc};

/// Scale factor for latitude/longitude: degrees are stored as integer
/// microdegrees (degrees * 10^6).
pub const DEG_SCALE: i64 = 1_000_000;
/// Scale factor for altitude: meters are stored as integer centimeters
/// (meters * 10^2).
pub const ALT_SCALE: i64 = 100;

/// A single aircraft position update as it lives on the ledger.
///
/// Coordinates are fixed-point scaled integers (see [`DEG_SCALE`] and
/// [`ALT_SCALE`]) so that records hash and compare exactly. The `timestamp`
/// is the ledger-assigned acceptance time in seconds since epoch — it is
/// never client-supplied. Locally the pipeline stamps a projected acceptance
/// time before validation and the ledger overwrites it at commit.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FlightRecord {
    /// ICAO24-style hex transponder address.
    aircraft_id: String,
    /// Free-text label; defaults to `aircraft_id` when the feed omits it.
    callsign: String,
    /// Latitude in microdegrees, range ±90 * 10^6.
    latitude: i64,
    /// Longitude in microdegrees, range ±180 * 10^6.
    longitude: i64,
    /// Altitude in centimeters, may be negative for below-sea-level fields.
    altitude: i64,
    on_ground: bool,
    /// Seconds since epoch, assigned by the ledger at acceptance.
    timestamp: i64,
    /// Client-asserted hint only, never trusted for validation decisions.
    flagged_suspicious: bool,
}

impl FlightRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        aircraft_id: String,
        callsign: String,
        latitude: i64,
        longitude: i64,
        altitude: i64,
        on_ground: bool,
        timestamp: i64,
        flagged_suspicious: bool,
    ) -> Self {
        Self {
            aircraft_id,
            callsign,
            latitude,
            longitude,
            altitude,
            on_ground,
            timestamp,
            flagged_suspicious,
        }
    }

    pub fn aircraft_id(&self) -> &str { self.aircraft_id.as_str() }
    pub fn callsign(&self) -> &str { self.callsign.as_str() }
    pub fn latitude(&self) -> i64 { self.latitude }
    pub fn longitude(&self) -> i64 { self.longitude }
    pub fn altitude(&self) -> i64 { self.altitude }
    pub fn on_ground(&self) -> bool { self.on_ground }
    pub fn timestamp(&self) -> i64 { self.timestamp }
    pub fn flagged_suspicious(&self) -> bool { self.flagged_suspicious }

    /// Returns a copy with the ledger-assigned acceptance time. Used by the
    /// ledger at commit; everything else treats records as immutable.
    pub fn with_timestamp(&self, timestamp: i64) -> Self {
        let mut rec = self.clone();
        rec.timestamp = timestamp;
        rec
    }

    /// True if the position triple matches exactly (replayed payloads carry
    /// bit-identical coordinates, real traffic practically never does).
    pub fn same_position(&self, other: &Self) -> bool {
        self.latitude == other.latitude
            && self.longitude == other.longitude
            && self.altitude == other.altitude
    }
}

impl std::fmt::Display for FlightRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) at {:.4}°/{:.4}° alt {:.1}m t={}",
            self.aircraft_id,
            self.callsign,
            self.latitude as f64 / DEG_SCALE as f64,
            self.longitude as f64 / DEG_SCALE as f64,
            self.altitude as f64 / ALT_SCALE as f64,
            self.timestamp,
        )
    }
}

/// A raw update as delivered by the external feed, before the pipeline has
/// stamped a projected acceptance time.
#[derive(serde::Deserialize, Debug, Clone)]
pub struct CandidateUpdate {
    pub aircraft_id: String,
    pub callsign: Option<String>,
    pub latitude: i64,
    pub longitude: i64,
    pub altitude: i64,
    pub on_ground: bool,
    #[serde(default)]
    pub flagged_suspicious: bool,
}

impl CandidateUpdate {
    /// Stamps the projected acceptance time and applies the callsign default.
    pub fn into_record(self, now: DateTime<Utc>) -> FlightRecord {
        let callsign = match self.callsign {
            Some(c) if !c.is_empty() => c,
            _ => self.aircraft_id.clone(),
        };
        FlightRecord {
            aircraft_id: self.aircraft_id,
            callsign,
            latitude: self.latitude,
            longitude: self.longitude,
            altitude: self.altitude,
            on_ground: self.on_ground,
            timestamp: now.timestamp(),
            flagged_suspicious: self.flagged_suspicious,
        }
    }
}
