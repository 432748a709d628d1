use sailthru_domain::{ApiResponse, ParameterMap, Result};

use crate::utils::params::{flag, require};
use crate::SailthruClient;

/// Changes to a subscriber record.
///
/// `lists` maps list names to `1` (subscribe) or `0` (unsubscribe).
/// Empty maps are not sent; `verified` always is.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmailUpdate {
    pub email: String,
    pub vars: ParameterMap,
    pub lists: ParameterMap,
    pub templates: ParameterMap,
    pub verified: bool,
    pub optout: Option<String>,
    pub send: Option<String>,
    pub send_vars: ParameterMap,
}

impl EmailUpdate {
    pub fn new(email: impl Into<String>) -> Self {
        Self { email: email.into(), ..Self::default() }
    }

    #[must_use]
    pub fn with_vars(mut self, vars: ParameterMap) -> Self {
        self.vars = vars;
        self
    }

    #[must_use]
    pub fn with_lists(mut self, lists: ParameterMap) -> Self {
        self.lists = lists;
        self
    }

    #[must_use]
    pub fn with_templates(mut self, templates: ParameterMap) -> Self {
        self.templates = templates;
        self
    }

    #[must_use]
    pub fn verified(mut self, verified: bool) -> Self {
        self.verified = verified;
        self
    }

    #[must_use]
    pub fn with_optout(mut self, optout: impl Into<String>) -> Self {
        self.optout = Some(optout.into());
        self
    }

    /// Template to send once the record is updated.
    #[must_use]
    pub fn with_send(mut self, template: impl Into<String>, send_vars: ParameterMap) -> Self {
        self.send = Some(template.into());
        self.send_vars = send_vars;
        self
    }
}

fn non_empty(map: ParameterMap) -> Option<ParameterMap> {
    (!map.is_empty()).then_some(map)
}

impl SailthruClient {
    /// Replacement vars and list subscriptions of an address.
    pub fn get_email(&self, email: &str) -> Result<ApiResponse> {
        require("email", email)?;
        self.get("email::get_email", "email", ParameterMap::new().with("email", email))
    }

    /// Update vars, lists and templates of an address.
    pub fn set_email(&self, update: EmailUpdate) -> Result<ApiResponse> {
        require("email", &update.email)?;

        let params = ParameterMap::new()
            .with("email", update.email)
            .with_opt("vars", non_empty(update.vars))
            .with_opt("lists", non_empty(update.lists))
            .with_opt("templates", non_empty(update.templates))
            .with("verified", flag(update.verified))
            .with_opt("optout", update.optout)
            .with_opt("send", update.send)
            .with_opt("send_vars", non_empty(update.send_vars));
        self.post("email::set_email", "email", params)
    }
}
