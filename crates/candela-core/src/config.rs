//! Fetch configuration with environment overrides.
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `CANDELA_BASE_URL` | Provider host (default `https://query1.finance.yahoo.com`) |
//! | `CANDELA_PROXY` | `direct`/`none` to disable, or a forward-proxy prefix |
//! | `CANDELA_TIMEOUT_MS` | Transport timeout in milliseconds |

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_PROXY_PREFIX: &str = "https://corsproxy.io/?";
pub const DEFAULT_USER_AGENT: &str = concat!("candela/", env!("CARGO_PKG_VERSION"));

const ENV_BASE_URL: &str = "CANDELA_BASE_URL";
const ENV_PROXY: &str = "CANDELA_PROXY";
const ENV_TIMEOUT_MS: &str = "CANDELA_TIMEOUT_MS";

/// How provider requests reach the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyMode {
    Direct,
    /// Relay through a forward proxy that takes the percent-encoded target
    /// URL appended to `prefix`.
    Forward { prefix: String },
}

impl ProxyMode {
    pub fn forward(prefix: impl Into<String>) -> Self {
        Self::Forward {
            prefix: prefix.into(),
        }
    }

    /// Wrap a provider URL for this mode.
    pub fn wrap(&self, target: &str) -> String {
        match self {
            Self::Direct => target.to_owned(),
            Self::Forward { prefix } => format!("{prefix}{}", urlencoding::encode(target)),
        }
    }

    fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "direct" | "none" | "off" => Self::Direct,
            prefix => Self::forward(prefix),
        }
    }
}

impl Default for ProxyMode {
    fn default() -> Self {
        Self::forward(DEFAULT_PROXY_PREFIX)
    }
}

/// Settings for the quote fetcher and its transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub base_url: String,
    pub proxy: ProxyMode,
    pub timeout_ms: Option<u64>,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            proxy: ProxyMode::default(),
            timeout_ms: None,
            user_agent: String::from(DEFAULT_USER_AGENT),
        }
    }
}

impl FetchConfig {
    /// Defaults overlaid with `CANDELA_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`; unparsable timeouts are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|value| !value.trim().is_empty()) {
            config.base_url = base_url.trim().trim_end_matches('/').to_owned();
        }
        if let Some(proxy) = lookup(ENV_PROXY) {
            config.proxy = ProxyMode::parse(&proxy);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            match raw.trim().parse::<u64>() {
                Ok(timeout_ms) => config.timeout_ms = Some(timeout_ms),
                Err(_) => tracing::warn!(value = %raw, "ignoring unparsable {ENV_TIMEOUT_MS}"),
            }
        }

        config
    }

    pub fn with_proxy(mut self, proxy: ProxyMode) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect::<HashMap<_, _>>();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn forward_proxy_percent_encodes_target() {
        let proxy = ProxyMode::forward("https://corsproxy.io/?");
        assert_eq!(
            proxy.wrap("https://h.test/v8?a=1&b=2"),
            "https://corsproxy.io/?https%3A%2F%2Fh.test%2Fv8%3Fa%3D1%26b%3D2"
        );
        assert_eq!(ProxyMode::Direct.wrap("https://h.test/x"), "https://h.test/x");
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = FetchConfig::from_lookup(lookup_from(&[
            ("CANDELA_BASE_URL", "http://localhost:9000/"),
            ("CANDELA_PROXY", "direct"),
            ("CANDELA_TIMEOUT_MS", "2500"),
        ]));
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.proxy, ProxyMode::Direct);
        assert_eq!(config.timeout_ms, Some(2500));
    }

    #[test]
    fn missing_environment_keeps_defaults() {
        let config = FetchConfig::from_lookup(lookup_from(&[("CANDELA_TIMEOUT_MS", "soon")]));
        assert_eq!(config, FetchConfig::default());
        assert_eq!(config.proxy, ProxyMode::forward(DEFAULT_PROXY_PREFIX));
    }
}
