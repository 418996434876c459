use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Absolute prefix for fetch targets. `None` means relative URLs.
    pub public_base_url: Option<String>,
    pub revalidate: Duration,
    pub seed_demo_data: bool,
    pub cors_permissive: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            public_base_url: None,
            revalidate: Duration::from_secs(60),
            seed_demo_data: false,
            cors_permissive: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes `std::env`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("APP_HOST").unwrap_or(defaults.host);

        let port = match lookup("APP_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .context("APP_PORT must be a valid u16")?,
            None => defaults.port,
        };

        let public_base_url = lookup("PUBLIC_BASE_URL")
            .map(|raw| raw.trim().trim_end_matches('/').to_string())
            .filter(|raw| !raw.is_empty());

        let revalidate = match lookup("REVALIDATE_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse::<u64>()
                    .context("REVALIDATE_SECS must be a whole number of seconds")?,
            ),
            None => defaults.revalidate,
        };

        let seed_demo_data = match lookup("SEED_DEMO_DATA") {
            Some(raw) => parse_flag(&raw).context("SEED_DEMO_DATA must be true or false")?,
            None => defaults.seed_demo_data,
        };

        let cors_permissive = match lookup("CORS_PERMISSIVE") {
            Some(raw) => parse_flag(&raw).context("CORS_PERMISSIVE must be true or false")?,
            None => defaults.cors_permissive,
        };

        Ok(Self {
            host,
            port,
            public_base_url,
            revalidate,
            seed_demo_data,
            cors_permissive,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow::anyhow!("unrecognized flag value '{other}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("APP_PORT", "3000"),
            ("PUBLIC_BASE_URL", "https://prof.example.com/"),
            ("REVALIDATE_SECS", "10"),
            ("SEED_DEMO_DATA", "yes"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(
            config.public_base_url.as_deref(),
            Some("https://prof.example.com")
        );
        assert_eq!(config.revalidate, Duration::from_secs(10));
        assert!(config.seed_demo_data);
    }

    #[test]
    fn blank_base_url_means_relative() {
        let config = AppConfig::from_lookup(lookup(&[("PUBLIC_BASE_URL", "  ")])).unwrap();
        assert_eq!(config.public_base_url, None);
    }

    #[test]
    fn rejects_bad_port() {
        assert!(AppConfig::from_lookup(lookup(&[("APP_PORT", "http")])).is_err());
    }
}
