use log::LevelFilter;

const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

/// Build-time settings. Override with `CLASSROOM_API_URL` and
/// `CLASSROOM_LOG_LEVEL` when compiling.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("CLASSROOM_API_URL"), option_env!("CLASSROOM_LOG_LEVEL"))
    }

    fn from_values(api_base_url: Option<&str>, log_level: Option<&str>) -> Self {
        let api_base_url = api_base_url
            .filter(|url| !url.trim().is_empty())
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let log_level = log_level
            .and_then(|level| level.parse().ok())
            .unwrap_or(LevelFilter::Info);

        Self {
            api_base_url,
            log_level,
        }
    }
}
