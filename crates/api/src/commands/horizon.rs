//! Horizon interest profiles and the tracking cookie

use std::time::Duration;

use sailthru_domain::constants::{HORIZON_COOKIE_DEFAULT_TTL_SECS, HORIZON_COOKIE_NAME};
use sailthru_domain::{ApiResponse, ParameterMap, Result, SailthruError};
use url::form_urlencoded;

use crate::utils::params::{join, require};
use crate::SailthruClient;

/// Inputs for building the horizon cookie of a visitor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HorizonCookieRequest {
    pub email: String,
    /// Cookie domain; derived from `host` when absent.
    pub domain: Option<String>,
    /// Request host, possibly with a port.
    pub host: Option<String>,
    /// Lifetime; `None` uses one year, zero makes a session cookie.
    pub duration: Option<Duration>,
    pub secure: bool,
}

impl HorizonCookieRequest {
    pub fn new(email: impl Into<String>) -> Self {
        Self { email: email.into(), ..Self::default() }
    }

    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    #[must_use]
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }
}

/// The `sailthru_hid` cookie, ready to be sent by the integrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HorizonCookie {
    pub name: &'static str,
    pub value: String,
    pub path: &'static str,
    pub domain: String,
    /// `None` for a session cookie.
    pub max_age: Option<Duration>,
    pub secure: bool,
}

impl HorizonCookie {
    /// `Set-Cookie` header value.
    pub fn header_value(&self) -> String {
        let value: String = form_urlencoded::byte_serialize(self.value.as_bytes()).collect();
        let mut header = format!("{}={}; Path={}; Domain={}", self.name, value, self.path, self.domain);
        if let Some(max_age) = self.max_age {
            header.push_str(&format!("; Max-Age={}", max_age.as_secs()));
        }
        if self.secure {
            header.push_str("; Secure");
        }
        header
    }
}

/// Registrable part of a host: its last two labels, port and trailing dot
/// stripped.
fn cookie_domain(host: &str) -> String {
    let host = host.rsplit_once(':').map_or(host, |(name, _)| name);
    let host = host.trim_end_matches('.');
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 {
        return host.to_string();
    }
    labels[labels.len() - 2..].join(".")
}

impl SailthruClient {
    /// Interest profile of an address; `hid_only` returns just the horizon id.
    pub fn get_horizon(&self, email: &str, hid_only: bool) -> Result<ApiResponse> {
        require("email", email)?;
        let params = ParameterMap::new().with("email", email).with_opt("hid_only", hid_only.then_some(1));
        self.get("horizon::get_horizon", "horizon", params)
    }

    /// Add interest tags to an address.
    pub fn set_horizon<I, S>(&self, email: &str, tags: I) -> Result<ApiResponse>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        require("email", email)?;
        let tags = join(tags);
        let params = ParameterMap::new().with("email", email).with_opt("tag", (!tags.is_empty()).then_some(tags));
        self.post("horizon::set_horizon", "horizon", params)
    }

    /// Look up the horizon id of an address and build its cookie.
    ///
    /// Returns `Ok(None)` when the address has no horizon id.
    ///
    /// # Errors
    /// `SailthruError::InvalidInput` when neither a domain nor a host is
    /// given, otherwise the error of the lookup.
    pub fn horizon_cookie(&self, request: HorizonCookieRequest) -> Result<Option<HorizonCookie>> {
        let domain = match (request.domain, request.host.as_deref()) {
            (Some(domain), _) => domain,
            (None, Some(host)) if !host.is_empty() => cookie_domain(host),
            _ => {
                return Err(SailthruError::InvalidInput(
                    "horizon cookie needs a domain or a request host".to_string(),
                ))
            }
        };

        let response = self.get_horizon(&request.email, true)?;
        let Some(hid) = response.get_str("hid").filter(|hid| !hid.is_empty()) else {
            return Ok(None);
        };

        let max_age = match request.duration {
            None => Some(Duration::from_secs(HORIZON_COOKIE_DEFAULT_TTL_SECS)),
            Some(duration) if duration.is_zero() => None,
            Some(duration) => Some(duration),
        };
        Ok(Some(HorizonCookie {
            name: HORIZON_COOKIE_NAME,
            value: hid.to_string(),
            path: "/",
            domain,
            max_age,
            secure: request.secure,
        }))
    }
}
