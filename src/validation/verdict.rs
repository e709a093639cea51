use strum_macros::Display;

/// Why a candidate update was turned away. Exactly one reason per rejection,
/// decided by rule order in [`super::ValidationEngine::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, serde::Serialize, serde::Deserialize)]
pub enum RejectReason {
    /// Missing or out-of-range required fields.
    MalformedInput,
    /// Acceptance time not strictly after the previous record, or a
    /// bit-identical position resubmitted inside the duplicate window.
    ReplayOrStale,
    /// Climb/descent rate beyond the configured ceiling.
    ImplausibleAltitudeRate,
    /// Raw altitude delta beyond the configured ceiling, regardless of time.
    ImplausibleAltitudeJump,
    /// Implied ground speed physically impossible for the aircraft class.
    ImplausiblePositionJump,
}

/// Outcome of validating one candidate against the previous accepted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject(RejectReason),
}

impl Verdict {
    pub fn is_accept(&self) -> bool { matches!(self, Verdict::Accept) }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Accept => write!(f, "Accept"),
            Verdict::Reject(reason) => write!(f, "Reject({reason})"),
        }
    }
}
