use sailthru_domain::{ApiResponse, ParameterMap, Result};

use crate::utils::params::{join, require};
use crate::SailthruClient;

/// A piece of site content to register for recommendations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentPush {
    pub title: String,
    pub url: String,
    /// Publication date in any format the service parses.
    pub date: Option<String>,
    pub tags: Option<Vec<String>>,
    pub vars: ParameterMap,
}

impl ContentPush {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self { title: title.into(), url: url.into(), ..Self::default() }
    }

    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_vars(mut self, vars: ParameterMap) -> Self {
        self.vars = vars;
        self
    }
}

impl SailthruClient {
    /// Push content metadata; tags are sent comma-joined.
    pub fn push_content(&self, content: ContentPush) -> Result<ApiResponse> {
        require("url", &content.url)?;

        let params = ParameterMap::new()
            .with("title", content.title)
            .with("url", content.url)
            .with_opt("date", content.date)
            .with_opt("tags", content.tags.map(join))
            .with_opt("vars", (!content.vars.is_empty()).then_some(content.vars));
        self.post("content::push_content", "content", params)
    }
}
