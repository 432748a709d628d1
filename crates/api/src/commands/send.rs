//! Transactional sends
//!
//! Single and multi-recipient template sends, send lookup and cancellation.

use sailthru_domain::{ApiResponse, ParameterMap, Result, SailthruError};

use crate::utils::params::{join, require};
use crate::SailthruClient;

/// A template send to one address.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SendRequest {
    pub template: String,
    pub email: String,
    pub vars: ParameterMap,
    /// e.g. `replyto`, `test`
    pub options: ParameterMap,
    /// Any time expression the service accepts; sends immediately when absent.
    pub schedule_time: Option<String>,
}

impl SendRequest {
    pub fn new(template: impl Into<String>, email: impl Into<String>) -> Self {
        Self { template: template.into(), email: email.into(), ..Self::default() }
    }

    #[must_use]
    pub fn with_vars(mut self, vars: ParameterMap) -> Self {
        self.vars = vars;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ParameterMap) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_schedule_time(mut self, schedule_time: impl Into<String>) -> Self {
        self.schedule_time = Some(schedule_time.into());
        self
    }
}

/// A template send to several addresses, with optional per-address vars.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiSendRequest {
    pub template: String,
    pub emails: Vec<String>,
    pub vars: ParameterMap,
    /// Per-address replacement vars, keyed by email.
    pub evars: ParameterMap,
    pub options: ParameterMap,
}

impl MultiSendRequest {
    pub fn new<I, S>(template: impl Into<String>, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            template: template.into(),
            emails: emails.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_vars(mut self, vars: ParameterMap) -> Self {
        self.vars = vars;
        self
    }

    #[must_use]
    pub fn with_evars(mut self, evars: ParameterMap) -> Self {
        self.evars = evars;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ParameterMap) -> Self {
        self.options = options;
        self
    }
}

impl SailthruClient {
    /// Send a template to a single address.
    pub fn send(&self, request: SendRequest) -> Result<ApiResponse> {
        require("template", &request.template)?;
        require("email", &request.email)?;

        let params = ParameterMap::new()
            .with("template", request.template)
            .with("email", request.email)
            .with("vars", request.vars)
            .with("options", request.options)
            .with_opt("schedule_time", request.schedule_time.filter(|time| !time.is_empty()));
        self.post("send::send", "send", params)
    }

    /// Send a template to several addresses at once.
    pub fn multisend(&self, request: MultiSendRequest) -> Result<ApiResponse> {
        require("template", &request.template)?;
        if request.emails.is_empty() {
            return Err(SailthruError::InvalidInput("multisend needs at least one email".to_string()));
        }

        let params = ParameterMap::new()
            .with("template", request.template)
            .with("email", join(&request.emails))
            .with("vars", request.vars)
            .with("evars", request.evars)
            .with("options", request.options);
        self.post("send::multisend", "send", params)
    }

    /// Status of a send.
    pub fn get_send(&self, send_id: &str) -> Result<ApiResponse> {
        require("send_id", send_id)?;
        self.get("send::get_send", "send", ParameterMap::new().with("send_id", send_id))
    }

    /// Cancel a send scheduled for the future.
    pub fn cancel_send(&self, send_id: &str) -> Result<ApiResponse> {
        require("send_id", send_id)?;
        self.delete("send::cancel_send", "send", ParameterMap::new().with("send_id", send_id))
    }
}
