//! Reporting

use sailthru_domain::{ApiResponse, ParameterMap, Result};

use crate::SailthruClient;

/// Blast statistics query; `blast_id` unset means all blasts in the range.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlastStatsQuery {
    pub blast_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Extra switches such as `beacon_times`, `click_times` or `domain`.
    pub extra: ParameterMap,
}

impl SailthruClient {
    /// Subscriber counts, for one list or all lists and optionally a date.
    pub fn stats_list(&self, list: Option<&str>, date: Option<&str>) -> Result<ApiResponse> {
        let params = ParameterMap::new().with_opt("list", list).with_opt("date", date).with("stat", "list");
        self.get("stats::stats_list", "stats", params)
    }

    pub fn stats_blast(&self, query: BlastStatsQuery) -> Result<ApiResponse> {
        let params = query
            .extra
            .with("stat", "blast")
            .with_opt("blast_id", query.blast_id)
            .with_opt("start_date", query.start_date)
            .with_opt("end_date", query.end_date);
        self.get("stats::stats_blast", "stats", params)
    }
}
