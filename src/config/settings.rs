//! Settings file shape and layered resolution.
//!
//! Three layers, later wins: config file, environment variables, explicit
//! CLI values. A missing file is an empty layer; a malformed file is an
//! error.

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::paths::config_file;
use crate::reddit::Credentials;

const DEFAULT_USER_AGENT: &str = concat!("toolgate/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub reddit: RedditSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Connection URL; the scheme selects the engine.
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedditSettings {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub user_agent: Option<String>,
}

impl Settings {
    /// Load the default config file (if present) and overlay environment
    /// variables.
    pub fn load() -> ConfigResult<Self> {
        let mut settings = Self::from_file(&config_file())?;
        settings.apply_env();
        Ok(settings)
    }

    /// Read settings from `path`; a missing file yields defaults.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Write settings to `path` as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let text = serde_json::to_string_pretty(self).expect("settings always serialize");
        std::fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_env(&mut self) {
        if let Ok(url) = env::var("TOOLGATE_DATABASE_URL") {
            self.database.url = Some(url);
        }
        for (var, field) in [
            ("REDDIT_CLIENT_ID", &mut self.reddit.client_id),
            ("REDDIT_CLIENT_SECRET", &mut self.reddit.client_secret),
            ("REDDIT_USERNAME", &mut self.reddit.username),
            ("REDDIT_PASSWORD", &mut self.reddit.password),
            ("REDDIT_USER_AGENT", &mut self.reddit.user_agent),
        ] {
            if let Ok(value) = env::var(var) {
                *field = Some(value);
            }
        }
    }

    /// Resolve the database URL: explicit flag wins over env/file layers.
    pub fn database_url(&self, flag: Option<&str>) -> Option<String> {
        flag.map(str::to_string).or_else(|| self.database.url.clone())
    }

    /// Reddit API credentials, when both id and secret are configured.
    ///
    /// Username/password are carried along only as a pair; a lone username
    /// cannot change the grant type.
    pub fn reddit_credentials(&self) -> Option<Credentials> {
        let client_id = self.reddit.client_id.clone()?;
        let client_secret = self.reddit.client_secret.clone()?;
        let (username, password) = match (&self.reddit.username, &self.reddit.password) {
            (Some(u), Some(p)) => (Some(u.clone()), Some(p.clone())),
            _ => (None, None),
        };
        Some(Credentials {
            client_id,
            client_secret,
            username,
            password,
        })
    }

    pub fn user_agent(&self) -> String {
        self.reddit
            .user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string())
    }
}

/// Strip credentials out of a connection URL for display and logging:
/// the password in the userinfo part, and any `token` query parameter.
pub fn redact_url(url: &str) -> String {
    let mut out = String::from(url);

    if let Some(scheme_end) = out.find("://") {
        let authority_start = scheme_end + 3;
        let authority_end = out[authority_start..]
            .find(['/', '?'])
            .map(|i| authority_start + i)
            .unwrap_or(out.len());
        if let Some(at) = out[authority_start..authority_end].rfind('@') {
            let at = authority_start + at;
            if let Some(colon) = out[authority_start..at].find(':') {
                let colon = authority_start + colon;
                out.replace_range(colon + 1..at, "***");
            }
        }
    }

    if let Some(token_start) = out.find("token=") {
        let value_start = token_start + "token=".len();
        let value_end = out[value_start..]
            .find('&')
            .map(|i| value_start + i)
            .unwrap_or(out.len());
        out.replace_range(value_start..value_end, "***");
    }

    out
}
