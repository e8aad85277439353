use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::notion::NOTION_API_URL;

/// Application configuration loaded from environment variables.
///
/// Notion credentials are optional so that `plan`, `render` and `serve` work
/// offline; `export` calls [`Config::require_notion`].
#[derive(Debug, Clone)]
pub struct Config {
    pub notion: Option<NotionConfig>,
    pub port: u16,
    pub rust_log: String,
    pub output_dir: PathBuf,
    pub page_template: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct NotionConfig {
    pub token: String,
    pub database_id: String,
    pub api_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup (the process environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let notion = match (lookup("NOTION_TOKEN"), lookup("DATABASE_ID")) {
            (Some(token), Some(database_id)) => Some(NotionConfig {
                token,
                database_id,
                api_url: lookup("NOTION_API_URL").unwrap_or_else(|| NOTION_API_URL.to_string()),
            }),
            _ => None,
        };

        Ok(Config {
            notion,
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            output_dir: lookup("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            page_template: lookup("PAGE_TEMPLATE").map(PathBuf::from),
        })
    }

    pub fn require_notion(&self) -> Result<&NotionConfig> {
        self.notion
            .as_ref()
            .context("Required environment variables 'NOTION_TOKEN' and 'DATABASE_ID' are not set")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert!(config.notion.is_none());
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert!(config.page_template.is_none());
        assert!(config.require_notion().is_err());
    }

    #[test]
    fn test_notion_requires_token_and_database() {
        assert!(config_from(&[("NOTION_TOKEN", "secret")])
            .unwrap()
            .notion
            .is_none());

        let config = config_from(&[("NOTION_TOKEN", "secret"), ("DATABASE_ID", "db")]).unwrap();
        let notion = config.require_notion().unwrap();
        assert_eq!(notion.token, "secret");
        assert_eq!(notion.database_id, "db");
        assert_eq!(notion.api_url, NOTION_API_URL);
    }

    #[test]
    fn test_invalid_port() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
    }
}
