//! Mass mail blasts
//!
//! Options maps carry the less common blast settings (`replyto`,
//! `report_email`, `is_link_tracking`, `suppress_list`, `abtest`, ...).
//! Explicit fields always win over a same-named option.

use sailthru_domain::{ApiResponse, ParamValue, ParameterMap, Result};

use crate::utils::params::require;
use crate::SailthruClient;

/// A new blast with its full content.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlastRequest {
    pub name: String,
    pub list: String,
    pub schedule_time: String,
    pub from_name: String,
    pub from_email: String,
    pub subject: String,
    pub content_html: String,
    pub content_text: String,
    pub options: ParameterMap,
}

/// Partial update of an existing blast; `None` fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlastUpdate {
    pub blast_id: String,
    pub name: Option<String>,
    pub list: Option<String>,
    pub schedule_time: Option<String>,
    pub from_name: Option<String>,
    pub from_email: Option<String>,
    pub subject: Option<String>,
    pub content_html: Option<String>,
    pub content_text: Option<String>,
    pub options: ParameterMap,
}

impl BlastUpdate {
    pub fn new(blast_id: impl Into<String>) -> Self {
        Self { blast_id: blast_id.into(), ..Self::default() }
    }
}

impl SailthruClient {
    /// Schedule a new blast.
    pub fn schedule_blast(&self, request: BlastRequest) -> Result<ApiResponse> {
        require("name", &request.name)?;
        require("list", &request.list)?;

        let mut params = request.options;
        params.extend([
            ("name", request.name),
            ("list", request.list),
            ("schedule_time", request.schedule_time),
            ("from_name", request.from_name),
            ("from_email", request.from_email),
            ("subject", request.subject),
            ("content_html", request.content_html),
            ("content_text", request.content_text),
        ]);
        self.post("blast::schedule_blast", "blast", params)
    }

    /// Schedule a blast whose content is copied from a template.
    pub fn schedule_blast_from_template(
        &self,
        template: &str,
        list: &str,
        schedule_time: &str,
        options: ParameterMap,
    ) -> Result<ApiResponse> {
        require("template", template)?;
        require("list", list)?;

        let mut params = options;
        params.extend([("copy_template", template), ("list", list), ("schedule_time", schedule_time)]);
        self.post("blast::schedule_blast_from_template", "blast", params)
    }

    /// Schedule a copy of a previous blast.
    pub fn schedule_blast_from_blast(
        &self,
        blast_id: impl Into<ParamValue>,
        schedule_time: &str,
        options: ParameterMap,
    ) -> Result<ApiResponse> {
        let mut params = options;
        params.insert("copy_blast", blast_id);
        params.insert("schedule_time", schedule_time);
        self.post("blast::schedule_blast_from_blast", "blast", params)
    }

    /// Update an existing blast.
    pub fn update_blast(&self, update: BlastUpdate) -> Result<ApiResponse> {
        require("blast_id", &update.blast_id)?;

        let mut params = update.options;
        params.insert("blast_id", update.blast_id);
        let fields = [
            ("name", update.name),
            ("list", update.list),
            ("schedule_time", update.schedule_time),
            ("from_name", update.from_name),
            ("from_email", update.from_email),
            ("subject", update.subject),
            ("content_html", update.content_html),
            ("content_text", update.content_text),
        ];
        params.extend(fields.into_iter().filter_map(|(key, value)| value.map(|value| (key, value))));
        self.post("blast::update_blast", "blast", params)
    }

    /// Blast details.
    pub fn get_blast(&self, blast_id: impl Into<ParamValue>) -> Result<ApiResponse> {
        self.get("blast::get_blast", "blast", ParameterMap::new().with("blast_id", blast_id))
    }

    /// Delete a blast.
    pub fn delete_blast(&self, blast_id: impl Into<ParamValue>) -> Result<ApiResponse> {
        self.delete("blast::delete_blast", "blast", ParameterMap::new().with("blast_id", blast_id))
    }

    /// Unschedule a blast by clearing its schedule time.
    pub fn cancel_blast(&self, blast_id: impl Into<ParamValue>) -> Result<ApiResponse> {
        let params = ParameterMap::new().with("blast_id", blast_id).with("schedule_time", "");
        self.post("blast::cancel_blast", "blast", params)
    }
}
