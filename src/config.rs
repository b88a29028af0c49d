//! Application Configuration
//!
//! Read at compile time from the build environment (trunk forwards it):
//! - `IMMO_SUPABASE_URL`, `IMMO_SUPABASE_ANON_KEY`: hosted backend; without
//!   them the app runs in demo mode against in-memory collaborators
//! - `IMMO_REDIRECT_URL`: where the sign-in link sends the user back
//! - `IMMO_ADVISOR_CONFIG`: JSON override for advisor thresholds and copy

use portfolio_engine::AdvisorConfig;

/// How long a toast stays on screen
pub const DEFAULT_TOAST_MS: u32 = 3_000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IMMO_SUPABASE_URL is set but IMMO_SUPABASE_ANON_KEY is missing")]
    MissingAnonKey,
    #[error("invalid IMMO_ADVISOR_CONFIG: {0}")]
    Advisor(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
    pub redirect_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackendMode {
    Hosted(BackendConfig),
    Demo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub backend: BackendMode,
    pub advisor: AdvisorConfig,
    pub toast_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendMode::Demo,
            advisor: AdvisorConfig::default(),
            toast_ms: DEFAULT_TOAST_MS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            option_env!("IMMO_SUPABASE_URL"),
            option_env!("IMMO_SUPABASE_ANON_KEY"),
            option_env!("IMMO_REDIRECT_URL"),
            option_env!("IMMO_ADVISOR_CONFIG"),
        )
    }

    pub fn from_values(
        url: Option<&str>,
        anon_key: Option<&str>,
        redirect_to: Option<&str>,
        advisor_json: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let non_empty = |v: Option<&str>| v.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string);

        let backend = match (non_empty(url), non_empty(anon_key)) {
            (Some(url), Some(anon_key)) => BackendMode::Hosted(BackendConfig {
                url: url.trim_end_matches('/').to_string(),
                anon_key,
                redirect_to: non_empty(redirect_to),
            }),
            (Some(_), None) => return Err(ConfigError::MissingAnonKey),
            (None, _) => BackendMode::Demo,
        };
        let advisor = match non_empty(advisor_json) {
            Some(json) => AdvisorConfig::from_json(&json)?,
            None => AdvisorConfig::default(),
        };

        Ok(Self { backend, advisor, toast_ms: DEFAULT_TOAST_MS })
    }

    pub fn is_demo(&self) -> bool {
        self.backend == BackendMode::Demo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_backend_means_demo() {
        let config = AppConfig::from_values(None, None, None, None).unwrap();
        assert!(config.is_demo());
        assert_eq!(config.advisor, AdvisorConfig::default());
    }

    #[test]
    fn test_hosted_backend() {
        let config = AppConfig::from_values(
            Some("https://abc.supabase.co/"),
            Some("anon"),
            Some(" "),
            None,
        )
        .unwrap();
        assert_eq!(
            config.backend,
            BackendMode::Hosted(BackendConfig {
                url: "https://abc.supabase.co".into(),
                anon_key: "anon".into(),
                redirect_to: None,
            })
        );
    }

    #[test]
    fn test_url_without_key_is_an_error() {
        assert!(matches!(
            AppConfig::from_values(Some("https://abc.supabase.co"), None, None, None),
            Err(ConfigError::MissingAnonKey)
        ));
    }

    #[test]
    fn test_advisor_override() {
        let config =
            AppConfig::from_values(None, None, None, Some(r#"{"latency_ms": 200}"#)).unwrap();
        assert_eq!(config.advisor.latency_ms, 200);

        assert!(AppConfig::from_values(None, None, None, Some("{oops")).is_err());
    }
}
