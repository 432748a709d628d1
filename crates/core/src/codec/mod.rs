//! Wire codecs
//!
//! Outgoing parameters are always form encoded. Response bodies are decoded
//! according to the `format` the request asked for; a body that does not
//! decode is handed back verbatim as [`ApiResponse::Raw`] rather than failing
//! the call.

mod form;
mod php;
mod xml;

pub use form::{encode_form, form_pairs, parse_form};
pub use php::unserialize as decode_php;
pub use xml::to_value as decode_xml;

use sailthru_domain::{ApiResponse, Format};
use serde_json::Value;
use tracing::debug;

/// Nesting limit for decoded arrays, objects and elements, the same as
/// `serde_json`'s recursion limit.
pub const MAX_DEPTH: usize = 128;

/// Decode a response body using the format name sent with the request.
///
/// Unknown format names (e.g. `txt` list downloads) return the body raw.
pub fn decode(raw: &str, format: &str) -> ApiResponse {
    match format.parse::<Format>() {
        Ok(format) => decode_as(raw, format),
        Err(_) => ApiResponse::Raw(raw.to_string()),
    }
}

/// Decode a response body in a known format. Never fails.
pub fn decode_as(raw: &str, format: Format) -> ApiResponse {
    let decoded = match format {
        Format::Json => serde_json::from_str::<Value>(raw).ok(),
        Format::Php => php::unserialize(raw),
        Format::Xml => xml::to_value(raw),
    };

    match decoded {
        Some(value) => ApiResponse::Structured(value),
        None => {
            debug!(%format, bytes = raw.len(), "response body did not decode, returning raw text");
            ApiResponse::Raw(raw.to_string())
        }
    }
}
