//! Settings loading.
//!
//! Layered configuration: defaults, then an optional TOML file, then
//! environment variables with the `PIPEWATCH_` prefix (e.g.
//! `PIPEWATCH_BASE_URL`, `PIPEWATCH_TOKEN`). CLI flags override on top of
//! this in `main`.

use std::path::Path;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Connection and serving settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Management API base URL.
    pub base_url: String,

    /// Pre-issued bearer token for the management API.
    pub token: Option<String>,

    /// Username for token login, used when no token is set.
    pub username: Option<String>,

    /// Password for token login.
    pub password: Option<String>,

    /// Listen address for `--serve`.
    pub listen: String,
}

impl Settings {
    /// Load settings from the optional config file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("base_url", "http://localhost:9000")?
            .set_default("listen", "0.0.0.0:8080")?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(Environment::with_prefix("PIPEWATCH"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.base_url, "http://localhost:9000");
        assert_eq!(settings.listen, "0.0.0.0:8080");
        assert!(settings.token.is_none());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            r#"
base_url = "http://leader.local:9000"
token = "abc123"
"#
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.base_url, "http://leader.local:9000");
        assert_eq!(settings.token.as_deref(), Some("abc123"));
        // Untouched keys keep their defaults
        assert_eq!(settings.listen, "0.0.0.0:8080");
    }
}
