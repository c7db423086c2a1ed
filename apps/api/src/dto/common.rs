mod conversions;
mod types;

pub use conversions::{decode_body, decode_query};
pub(crate) use conversions::{format_timestamp, required_text};
pub use types::{DeleteResponse, HealthResponse, QueryValue};
