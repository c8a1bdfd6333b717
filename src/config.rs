use log::info;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Environment variable loading - tries runtime first, then build-time
/// embedded fallbacks from build.rs.
pub fn get_env_var(key: &str) -> Option<String> {
    // Load .env file if it exists for development
    let _ = dotenvy::dotenv();

    if let Ok(value) = std::env::var(key) {
        if !value.is_empty() {
            return Some(value);
        }
    }

    // Use option_env!() instead of env!() to avoid compile-time errors
    let embedded_value = match key {
        "VOCAHIRE_API_URL" => option_env!("VOCAHIRE_API_URL"),
        "VOCAHIRE_HTTP_TIMEOUT_SECS" => option_env!("VOCAHIRE_HTTP_TIMEOUT_SECS"),
        _ => None,
    };

    embedded_value
        .filter(|value| !value.is_empty())
        .map(|value| value.to_string())
}

/// Connection settings for the VocaHire backend service.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let base_url = get_env_var("VOCAHIRE_API_URL").unwrap_or_else(|| {
            info!(
                "VOCAHIRE_API_URL not set, defaulting to {}",
                DEFAULT_API_URL
            );
            DEFAULT_API_URL.to_string()
        });

        let timeout_secs = get_env_var("VOCAHIRE_HTTP_TIMEOUT_SECS")
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            base_url,
            timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_local_backend() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.timeout_secs, 15);
    }
}
