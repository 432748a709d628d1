//! Content alerts
//!
//! Per-subscriber alerts deliver a template when matching content is pushed.

use sailthru_domain::{impl_wire_name_conversions, ApiResponse, ParameterMap, Result};

use crate::utils::params::require;
use crate::SailthruClient;

/// How often an alert is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertType {
    #[default]
    Realtime,
    Daily,
    Weekly,
}

impl_wire_name_conversions!(AlertType {
    Realtime => "realtime",
    Daily => "daily",
    Weekly => "weekly",
});

impl AlertType {
    /// Summary alerts go out at a fixed time; realtime ones do not.
    pub const fn is_scheduled(&self) -> bool {
        matches!(self, Self::Daily | Self::Weekly)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlertRequest {
    pub email: String,
    pub alert_type: AlertType,
    pub template: String,
    /// Delivery time; ignored for realtime alerts.
    pub when: Option<String>,
    /// Content filters such as `match`, `min` or `max`.
    pub options: ParameterMap,
}

impl AlertRequest {
    pub fn new(email: impl Into<String>, alert_type: AlertType, template: impl Into<String>) -> Self {
        Self { email: email.into(), alert_type, template: template.into(), ..Self::default() }
    }

    #[must_use]
    pub fn with_when(mut self, when: impl Into<String>) -> Self {
        self.when = Some(when.into());
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ParameterMap) -> Self {
        self.options = options;
        self
    }
}

impl SailthruClient {
    /// Alerts registered for an address.
    pub fn get_alert(&self, email: &str) -> Result<ApiResponse> {
        require("email", email)?;
        self.get("alert::get_alert", "alert", ParameterMap::new().with("email", email))
    }

    /// Register an alert.
    pub fn save_alert(&self, request: AlertRequest) -> Result<ApiResponse> {
        require("email", &request.email)?;
        require("template", &request.template)?;

        let when = request.when.filter(|_| request.alert_type.is_scheduled());
        let mut params = request.options;
        params.insert("email", request.email);
        params.insert("type", request.alert_type.as_str());
        params.insert("template", request.template);
        let params = params.with_opt("when", when);
        self.post("alert::save_alert", "alert", params)
    }

    pub fn delete_alert(&self, email: &str, alert_id: &str) -> Result<ApiResponse> {
        require("email", email)?;
        require("alert_id", alert_id)?;
        let params = ParameterMap::new().with("email", email).with("alert_id", alert_id);
        self.delete("alert::delete_alert", "alert", params)
    }
}
