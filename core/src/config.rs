//! Where the roster lives: API host and cohort.

/// Public Puppy Bowl deployment.
pub const DEFAULT_HOST: &str = "https://fsa-puppy-bowl.herokuapp.com";

/// Cohort whose roster the client manages by default.
pub const DEFAULT_COHORT: &str = "2302-ACC-ET-WEB-PT-D";

/// Location of one cohort's roster on a Puppy Bowl server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub cohort: String,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, cohort: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            cohort: cohort.into(),
        }
    }

    /// `<host>/api/<cohort>`, without a trailing slash.
    pub fn base_url(&self) -> String {
        format!(
            "{}/api/{}",
            self.host.trim_end_matches('/'),
            self.cohort.trim_matches('/')
        )
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_COHORT)
    }
}
