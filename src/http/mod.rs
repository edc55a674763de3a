pub mod client;
pub mod error;
pub mod response;

pub use client::send_with_deadline;
pub use error::map_reqwest_error;
pub use response::{json_response, json_response_with_status, preflight_response};
