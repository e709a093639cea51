pub mod count_get;
pub mod latest_get;
pub mod range_get;
pub mod request_common;
pub mod submit_batch_post;
pub mod submit_record_post;
pub mod token_get;
