//! Decoded API responses

use serde_json::Value;

/// Result of an API call.
///
/// A response is either decoded structured data or, when the body could not
/// be decoded in the negotiated format, the raw body text verbatim. Structured
/// responses may still describe an application-level failure through the
/// remote `error` / `errormsg` fields.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Structured(Value),
    Raw(String),
}

impl ApiResponse {
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Structured(_))
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Structured(value) => Some(value),
            Self::Raw(_) => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Structured(value) => Some(value),
            Self::Raw(_) => None,
        }
    }

    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Self::Raw(text) => Some(text),
            Self::Structured(_) => None,
        }
    }

    /// Top-level field of a structured object response.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_value().and_then(|value| value.get(key))
    }

    /// Top-level string field of a structured object response.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Remote error code, when the response reports one.
    ///
    /// Codes may arrive as numbers or numeric strings depending on format.
    pub fn error_code(&self) -> Option<i64> {
        match self.get("error")? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Remote error message, when the response reports one.
    pub fn error_message(&self) -> Option<&str> {
        self.get_str("errormsg")
    }

    pub fn is_error(&self) -> bool {
        self.get("error").is_some()
    }
}
