use std::env;

use chrono_tz::Tz;

use crate::errors::SearchError;

pub const DEFAULT_API_BASE_URL: &str = "https://slack.com/api";

pub const ENV_USER_TOKEN: &str = "SLACK_USER_TOKEN";
pub const ENV_API_BASE_URL: &str = "SLACK_API_BASE_URL";
pub const ENV_DISPLAY_TZ: &str = "SLACK_SEARCH_TZ";

#[derive(Clone)]
pub struct AppConfig {
    pub slack_user_token: String,
    pub api_base_url: String,
    /// Timezone for rendered timestamps. `None` means the local timezone.
    pub display_tz: Option<Tz>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("slack_user_token", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("display_tz", &self.display_tz)
            .finish()
    }
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns an error if `SLACK_USER_TOKEN` is unset or `SLACK_SEARCH_TZ`
    /// is not an IANA timezone name.
    pub fn from_env() -> Result<Self, SearchError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Empty values are
    /// treated as unset.
    ///
    /// # Errors
    ///
    /// Same conditions as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SearchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let slack_user_token = get(ENV_USER_TOKEN)
            .ok_or_else(|| SearchError::ConfigError(format!("{ENV_USER_TOKEN} is not set")))?;

        let api_base_url = get(ENV_API_BASE_URL)
            .map_or_else(|| DEFAULT_API_BASE_URL.to_string(), |url| url.trim_end_matches('/').to_string());

        let display_tz = get(ENV_DISPLAY_TZ)
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|e| SearchError::ConfigError(format!("{ENV_DISPLAY_TZ}: {e}")))
            })
            .transpose()?;

        Ok(Self {
            slack_user_token,
            api_base_url,
            display_tz,
        })
    }
}
