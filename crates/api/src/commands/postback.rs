//! Inbound postback handling
//!
//! Integrators forward the form fields of a postback request here. Optout
//! postbacks are checked locally; verify postbacks are also cross-checked
//! against the send they reference.

use sailthru_core::PostbackKind;
use sailthru_domain::constants::{PARAM_EMAIL, PARAM_SEND_ID};
use sailthru_domain::{ParameterMap, Result};
use tracing::debug;

use crate::SailthruClient;

impl SailthruClient {
    /// Validate a double opt-in verify postback.
    ///
    /// Returns `Ok(false)` for a malformed or badly signed postback, or when
    /// the referenced send went to a different address.
    ///
    /// # Errors
    /// Propagates the error of the send lookup.
    pub fn receive_verify_post(&self, fields: &ParameterMap) -> Result<bool> {
        if !self.api().verify_postback(fields, PostbackKind::Verify) {
            debug!("verify postback rejected before lookup");
            return Ok(false);
        }
        let (Some(send_id), Some(email)) = (fields.get_str(PARAM_SEND_ID), fields.get_str(PARAM_EMAIL)) else {
            return Ok(false);
        };

        let send = self.get_send(send_id)?;
        let matches = send.get_str(PARAM_EMAIL) == Some(email);
        if !matches {
            debug!(send_id, "verify postback email does not match send");
        }
        Ok(matches)
    }

    /// Validate an optout postback.
    pub fn receive_optout_post(&self, fields: &ParameterMap) -> bool {
        self.api().verify_postback(fields, PostbackKind::Optout)
    }
}
