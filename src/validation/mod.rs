pub mod engine;
pub mod verdict;

pub use engine::{ValidationConfig, ValidationEngine};
pub use verdict::{RejectReason, Verdict};
