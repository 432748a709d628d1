//! Mailing lists

use sailthru_domain::{ApiResponse, ParameterMap, Result};

use crate::utils::params::{join, require};
use crate::SailthruClient;

/// Export format used when none is given.
const DEFAULT_LIST_FORMAT: &str = "txt";

impl SailthruClient {
    /// Download the members of a list.
    ///
    /// `format` is sent as the response format (`txt` when `None`), so
    /// anything but `json`, `php` or `xml` comes back as
    /// [`ApiResponse::Raw`].
    pub fn get_list(&self, list: &str, format: Option<&str>) -> Result<ApiResponse> {
        require("list", list)?;
        let params = ParameterMap::new()
            .with("list", list)
            .with("format", format.unwrap_or(DEFAULT_LIST_FORMAT));
        self.get("list::get_list", "list", params)
    }

    /// Names and sizes of every list.
    pub fn get_lists(&self) -> Result<ApiResponse> {
        self.get("list::get_lists", "list", ParameterMap::new().with("list", ""))
    }

    /// Create or replace a list with `emails`.
    pub fn save_list<I, S>(&self, list: &str, emails: I) -> Result<ApiResponse>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        require("list", list)?;
        let params = ParameterMap::new().with("list", list).with("emails", join(emails));
        self.post("list::save_list", "list", params)
    }

    pub fn delete_list(&self, list: &str) -> Result<ApiResponse> {
        require("list", list)?;
        self.delete("list::delete_list", "list", ParameterMap::new().with("list", list))
    }
}
