use sailthru_domain::{ApiResponse, ParameterMap, Result};

use crate::utils::params::require;
use crate::SailthruClient;

impl SailthruClient {
    /// Fetch a template by name.
    pub fn get_template(&self, name: &str) -> Result<ApiResponse> {
        require("template", name)?;
        self.get("template::get_template", "template", ParameterMap::new().with("template", name))
    }

    /// Create or update a template.
    ///
    /// `fields` holds the template attributes (`subject`, `content_html`,
    /// `from_email`, ...); the template name is added last.
    pub fn save_template(&self, name: &str, fields: ParameterMap) -> Result<ApiResponse> {
        require("template", name)?;
        self.post("template::save_template", "template", fields.with("template", name))
    }
}
