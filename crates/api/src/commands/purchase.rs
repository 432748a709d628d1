use sailthru_domain::{ApiResponse, ParameterMap, Result};

use crate::utils::params::{flag, require};
use crate::SailthruClient;

/// A purchase, or an abandoned cart when `incomplete` is set.
///
/// Each item carries at least `qty`, `title`, `price`, `id` and `url`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PurchaseRequest {
    pub email: String,
    pub items: Vec<ParameterMap>,
    pub incomplete: Option<bool>,
    /// Send that led to the purchase, for revenue attribution.
    pub message_id: Option<String>,
}

impl PurchaseRequest {
    pub fn new(email: impl Into<String>, items: Vec<ParameterMap>) -> Self {
        Self { email: email.into(), items, ..Self::default() }
    }

    #[must_use]
    pub fn incomplete(mut self, incomplete: bool) -> Self {
        self.incomplete = Some(incomplete);
        self
    }

    #[must_use]
    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }
}

impl SailthruClient {
    /// Record a purchase.
    pub fn purchase(&self, request: PurchaseRequest) -> Result<ApiResponse> {
        require("email", &request.email)?;

        let params = ParameterMap::new()
            .with("email", request.email)
            .with("items", request.items)
            .with_opt("incomplete", request.incomplete.map(flag))
            .with_opt("message_id", request.message_id);
        self.post("purchase::purchase", "purchase", params)
    }
}
