use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_JOB_DESCRIPTION: &str =
    "Looking for a skilled software engineer with experience in backend development.";
pub const DEFAULT_SKILLS: &str = "python, machine learning, communication";

/// Client configuration loaded from environment variables.
/// Every variable is optional; a `.env` file is honoured if present.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    /// `None` leaves requests unbounded, so a hung call keeps the session busy.
    pub request_timeout: Option<Duration>,
    pub job_description: String,
    pub skills: String,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: None,
            job_description: DEFAULT_JOB_DESCRIPTION.to_string(),
            skills: DEFAULT_SKILLS.to_string(),
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Split out of `from_env`
    /// so tests don't have to touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let request_timeout = match lookup("SCANNER_REQUEST_TIMEOUT_SECS") {
            Some(raw) if !raw.trim().is_empty() => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .context("SCANNER_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?;
                Some(Duration::from_secs(secs))
            }
            _ => None,
        };

        Ok(Config {
            api_url: lookup("SCANNER_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            request_timeout,
            job_description: lookup("SCANNER_JOB_DESCRIPTION").unwrap_or(defaults.job_description),
            skills: lookup("SCANNER_SKILLS").unwrap_or(defaults.skills),
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.skills, DEFAULT_SKILLS);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_api_url_trailing_slash_is_trimmed() {
        let config =
            Config::from_lookup(lookup_from(&[("SCANNER_API_URL", "http://scanner:8000/api/")]))
                .unwrap();
        assert_eq!(config.api_url, "http://scanner:8000/api");
    }

    #[test]
    fn test_timeout_parsed_as_seconds() {
        let config =
            Config::from_lookup(lookup_from(&[("SCANNER_REQUEST_TIMEOUT_SECS", "45")])).unwrap();
        assert_eq!(config.request_timeout, Some(Duration::from_secs(45)));
    }

    #[test]
    fn test_invalid_timeout_is_an_error() {
        let result = Config::from_lookup(lookup_from(&[("SCANNER_REQUEST_TIMEOUT_SECS", "soon")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_seed_values_overridable() {
        let config = Config::from_lookup(lookup_from(&[
            ("SCANNER_JOB_DESCRIPTION", "Data engineer"),
            ("SCANNER_SKILLS", "sql, spark"),
        ]))
        .unwrap();
        assert_eq!(config.job_description, "Data engineer");
        assert_eq!(config.skills, "sql, spark");
    }
}
