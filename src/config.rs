use std::time::Duration;

/// Default base URL of the text-to-SQL service.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the HTTP backend client.
#[derive(Clone, Debug)]
pub struct BackendConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl BackendConfig {
    /// Reads settings from the environment, falling back to the defaults.
    ///
    /// - `SQLCHAT_API_URL`: base URL of the backend service
    /// - `SQLCHAT_REQUEST_TIMEOUT_SECS`: per-request timeout in seconds
    /// - `SQLCHAT_CONNECT_TIMEOUT_SECS`: connect timeout in seconds
    pub fn from_env() -> Self {
        let base_url = match std::env::var("SQLCHAT_API_URL") {
            Ok(url) if !url.trim().is_empty() => {
                log::debug!("Using backend URL from SQLCHAT_API_URL: {}", url);
                url
            }
            _ => DEFAULT_API_URL.to_string(),
        };

        Self {
            base_url,
            request_timeout: Duration::from_secs(env_secs(
                "SQLCHAT_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )),
            connect_timeout: Duration::from_secs(env_secs(
                "SQLCHAT_CONNECT_TIMEOUT_SECS",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )),
        }
    }
}

fn env_secs(var: &str, default: u64) -> u64 {
    match std::env::var(var) {
        Ok(raw) => match raw.parse() {
            Ok(secs) => secs,
            Err(_) => {
                log::warn!("Ignoring unparsable {} value: {}", var, raw);
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_local_service() {
        let config = BackendConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn env_overrides_are_parsed_and_bad_values_fall_back() {
        std::env::set_var("SQLCHAT_API_URL", "http://10.0.0.5:9000");
        std::env::set_var("SQLCHAT_REQUEST_TIMEOUT_SECS", "120");
        std::env::set_var("SQLCHAT_CONNECT_TIMEOUT_SECS", "not-a-number");

        let config = BackendConfig::from_env();
        assert_eq!(config.base_url, "http://10.0.0.5:9000");
        assert_eq!(config.request_timeout, Duration::from_secs(120));
        assert_eq!(config.connect_timeout, Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));

        std::env::remove_var("SQLCHAT_API_URL");
        std::env::remove_var("SQLCHAT_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("SQLCHAT_CONNECT_TIMEOUT_SECS");
    }
}
