use serde::Deserialize;

/// Origin every relative page path is resolved against
pub const DEFAULT_SITE_ROOT: &str = "https://www.furaffinity.net";

/// Retry ceiling for transient (5xx) failures; 2^6 = 64s for the last wait
pub const DEFAULT_MAX_RETRIES: u32 = 6;

pub const DEFAULT_USER_AGENT: &str = concat!("fa-scrape/", env!("CARGO_PKG_VERSION"));

/// Client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Raw `Cookie` header value for the logged-in account
    #[serde(default)]
    pub cookies: Option<String>,

    /// Surface 5xx errors immediately instead of backing off
    #[serde(rename = "disable-retry", default)]
    pub disable_retry: bool,

    /// Timezone the account renders times in (e.g. "US/Pacific")
    #[serde(default)]
    pub timezone: Option<String>,

    /// Site origin; only overridden to point at a test server
    #[serde(rename = "site-root", default = "default_site_root")]
    pub site_root: String,

    /// Maximum number of retries after a transient failure
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// User agent sent by the built-in transport
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

fn default_site_root() -> String {
    DEFAULT_SITE_ROOT.to_string()
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            cookies: None,
            disable_retry: false,
            timezone: None,
            site_root: default_site_root(),
            max_retries: default_max_retries(),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Creates a configuration carrying only the given cookies
    pub fn with_cookies(cookies: impl Into<String>) -> Self {
        Self {
            cookies: Some(cookies.into()),
            ..Self::default()
        }
    }

    pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    pub fn site_root(mut self, site_root: impl Into<String>) -> Self {
        self.site_root = site_root.into();
        self
    }

    pub fn disable_retry(mut self, disable: bool) -> Self {
        self.disable_retry = disable;
        self
    }
}
