use std::time::Duration;
use tracing::warn;

pub struct Config {
    pub host: String,
    pub http_port: u16,
    pub data_dir: String,
    pub seed_file: Option<String>,
    pub request_timeout: Duration,
    pub view_window: Duration,
    pub allowed_origins: Vec<String>,
}

impl Config {
    const DEFAULT_HOST: &str = "0.0.0.0";
    const DEFAULT_HTTP_PORT: u16 = 8080;
    const DEFAULT_DATA_DIR: &str = "./data";
    const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
    const DEFAULT_VIEW_WINDOW_SECS: u64 = 86_400;

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. `from_env` is the
    /// production entry point; tests pass a closure over a map.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let number = |key: &str, default: u64| -> u64 {
            match lookup(key) {
                Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                    warn!("{} has invalid value '{}', using {}", key, raw, default);
                    default
                }),
                None => default,
            }
        };

        let http_port = u16::try_from(number("NEWSDESK_HTTP_PORT", Self::DEFAULT_HTTP_PORT as u64))
            .unwrap_or(Self::DEFAULT_HTTP_PORT);

        Self {
            host: lookup("NEWSDESK_HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_string()),
            http_port,
            data_dir: lookup("NEWSDESK_DATA_DIR")
                .unwrap_or_else(|| Self::DEFAULT_DATA_DIR.to_string()),
            seed_file: lookup("NEWSDESK_SEED_FILE").filter(|path| !path.trim().is_empty()),
            request_timeout: Duration::from_millis(number(
                "NEWSDESK_REQUEST_TIMEOUT_MS",
                Self::DEFAULT_REQUEST_TIMEOUT_MS,
            )),
            view_window: Duration::from_secs(number(
                "NEWSDESK_VIEW_WINDOW_SECS",
                Self::DEFAULT_VIEW_WINDOW_SECS,
            )),
            allowed_origins: lookup("NEWSDESK_ALLOWED_ORIGINS")
                .unwrap_or_else(|| "*".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
