use sailthru_domain::{ApiResponse, ParameterMap, Result};

use crate::utils::params::require;
use crate::SailthruClient;

impl SailthruClient {
    /// Import the address book of a webmail account.
    ///
    /// With `include_names` the response carries contact names as well as
    /// addresses.
    pub fn import_contacts(&self, email: &str, password: &str, include_names: bool) -> Result<ApiResponse> {
        require("email", email)?;
        let params = ParameterMap::new()
            .with("email", email)
            .with("password", password)
            .with_opt("names", include_names.then_some(1));
        self.post("contacts::import_contacts", "contacts", params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{client_with, sent_names, sent_params};

    #[test]
    fn names_flag_is_only_sent_when_requested() {
        let (client, transport) = client_with(r#"{"contacts":[]}"#);

        client.import_contacts("a@b.com", "pw", false).unwrap();
        assert_eq!(sent_names(&transport.last_request().unwrap()), vec!["email", "password"]);

        client.import_contacts("a@b.com", "pw", true).unwrap();
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.endpoint(), "https://api.example.test/contacts");
        assert_eq!(sent_params(&sent).get_str("names"), Some("1"));
    }
}
