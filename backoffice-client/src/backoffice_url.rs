use url::form_urlencoded;

/// Prefix under which the platform exposes custom REST resources.
const APEX_REST_PREFIX: &str = "services/apexrest";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackofficeURL(String);

impl AsRef<str> for BackofficeURL {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl BackofficeURL {
    /// Root of the REST facade for an org instance, e.g.
    /// `https://acme.my.salesforce.com`.
    pub fn new(instance_url: &str) -> Self {
        Self(instance_url.trim_end_matches('/').to_string()).append_path(APEX_REST_PREFIX)
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }

    /// Append a percent-encoded query parameter.
    pub fn with_query(&self, key: &str, value: &str) -> Self {
        let pair: String = form_urlencoded::Serializer::new(String::new())
            .append_pair(key, value)
            .finish();
        if self.0.contains('?') {
            Self(format!("{}&{}", self.0, pair))
        } else {
            Self(format!("{}?{}", self.0, pair))
        }
    }
}
