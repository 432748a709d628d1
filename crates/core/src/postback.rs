//! Inbound postback verification.
//!
//! The service calls back into the integrator's web endpoint with signed form
//! posts. A postback is trusted only when every required field is present, the
//! declared `action` matches, and the `sig` recomputes from the other fields.

use sailthru_domain::constants::{PARAM_ACTION, PARAM_EMAIL, PARAM_SEND_ID, PARAM_SIG};
use sailthru_domain::{ParameterMap, SignatureAlgorithm};

use crate::signing::sign_with;

/// Postback flavours the service sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostbackKind {
    /// Double opt-in confirmation for a send.
    Verify,
    /// Unsubscribe notification.
    Optout,
}

impl PostbackKind {
    pub const fn action(self) -> &'static str {
        match self {
            Self::Verify => "verify",
            Self::Optout => "optout",
        }
    }

    pub const fn required_fields(self) -> &'static [&'static str] {
        match self {
            Self::Verify => &[PARAM_ACTION, PARAM_EMAIL, PARAM_SEND_ID, PARAM_SIG],
            Self::Optout => &[PARAM_ACTION, PARAM_EMAIL, PARAM_SIG],
        }
    }
}

/// Check the signature of an inbound field map.
///
/// Returns `false` when `sig` or any of `required_fields` is missing, or when
/// the signature recomputed over every other field does not match.
pub fn verify_signature(
    fields: &ParameterMap,
    required_fields: &[&str],
    secret: &str,
    algorithm: SignatureAlgorithm,
) -> bool {
    if required_fields.iter().any(|field| !fields.contains_key(field)) {
        return false;
    }
    let Some(supplied) = fields.get_str(PARAM_SIG) else {
        return false;
    };

    // The signer already skips the top-level `sig`.
    let expected = sign_with(fields, secret, algorithm);
    constant_time_eq(expected.as_bytes(), supplied.trim().to_ascii_lowercase().as_bytes())
}

/// Full structural and signature check for a postback of the given kind.
///
/// Verify postbacks also need the send's email cross-checked against the
/// service, which requires I/O and is left to the caller.
pub fn verify_postback(
    fields: &ParameterMap,
    kind: PostbackKind,
    secret: &str,
    algorithm: SignatureAlgorithm,
) -> bool {
    if fields.get_str(PARAM_ACTION) != Some(kind.action()) {
        return false;
    }
    verify_signature(fields, kind.required_fields(), secret, algorithm)
}

fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    left.iter().zip(right).fold(0u8, |acc, (a, b)| acc | (a ^ b)) == 0
}
