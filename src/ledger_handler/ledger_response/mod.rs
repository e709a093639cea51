pub mod count;
pub mod latest;
pub mod range;
pub mod response_common;
pub mod submission;
pub mod token;
