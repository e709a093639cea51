pub mod flight_record;
pub mod state_store;

pub use flight_record::{CandidateUpdate, FlightRecord, ALT_SCALE, DEG_SCALE};
pub use state_store::AircraftStateStore;
