use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_HITS_PATH: &str = "/api/hits";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub source: SourceConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    pub base_url: String,
    pub hits_path: String,
    pub timeout_seconds: u64,
}

impl SourceConfig {
    /// Full URL of the hits endpoint
    pub fn hits_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.hits_path)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

/// Load configuration from defaults, an optional TOML file and the environment
///
/// Environment variables use the `HITDASH__` prefix with `__` between
/// sections, e.g. `HITDASH__SOURCE__BASE_URL`.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    load_config_with_env(path, env_source())
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix("HITDASH").separator("__")
}

fn load_config_with_env(path: &Path, env: config::Environment) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .set_default("source.base_url", DEFAULT_BASE_URL)?
        .set_default("source.hits_path", DEFAULT_HITS_PATH)?
        .set_default("source.timeout_seconds", DEFAULT_TIMEOUT_SECONDS as i64)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .add_source(config::File::from(path).required(false))
        .add_source(env)
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    let base_url = &cfg.source.base_url;
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        anyhow::bail!(
            "source.base_url must start with http:// or https://, got '{}'",
            base_url
        );
    }

    if !cfg.source.hits_path.starts_with('/') {
        anyhow::bail!(
            "source.hits_path must start with '/', got '{}'",
            cfg.source.hits_path
        );
    }

    if cfg.source.timeout_seconds == 0 {
        anyhow::bail!("source.timeout_seconds must be greater than 0");
    }

    if cfg.logging.level.trim().is_empty() {
        anyhow::bail!("logging.level cannot be empty");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let cfg = load_config(Path::new("definitely-missing-hitdash.toml")).unwrap();
        assert_eq!(cfg.source.hits_url(), "http://localhost:5000/api/hits");
        assert_eq!(cfg.source.timeout(), Duration::from_secs(10));
        assert_eq!(cfg.logging.format, LogFormat::Text);
        assert!(cfg.logging.file.is_none());
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[source]
base_url = "https://hits.example.com/"
timeout_seconds = 3

[logging]
format = "json"
file = "/tmp/hitdash.log"
"#
        )
        .unwrap();

        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.source.hits_url(), "https://hits.example.com/api/hits");
        assert_eq!(cfg.source.timeout_seconds, 3);
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.logging.format, LogFormat::Json);
        assert_eq!(cfg.logging.file, Some(PathBuf::from("/tmp/hitdash.log")));
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[source]\nbase_url = \"http://from-file:5000\"").unwrap();

        let vars = HashMap::from([
            (
                "HITDASH__SOURCE__BASE_URL".to_string(),
                "http://tracker:5000".to_string(),
            ),
            (
                "HITDASH__SOURCE__TIMEOUT_SECONDS".to_string(),
                "3".to_string(),
            ),
            ("UNRELATED__SOURCE__BASE_URL".to_string(), "ftp://x".to_string()),
        ]);

        let cfg = load_config_with_env(file.path(), env_source().source(Some(vars))).unwrap();
        assert_eq!(cfg.source.hits_url(), "http://tracker:5000/api/hits");
        assert_eq!(cfg.source.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_environment_value_fails_validation() {
        let vars = HashMap::from([(
            "HITDASH__SOURCE__HITS_PATH".to_string(),
            "api/hits".to_string(),
        )]);

        let result = load_config_with_env(
            Path::new("definitely-missing-hitdash.toml"),
            env_source().source(Some(vars)),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_config_rejects_bad_scheme() {
        let mut cfg = create_test_config();
        cfg.source.base_url = "localhost:5000".to_string();

        let result = validate_config(&cfg);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("http:// or https://"));
    }

    #[test]
    fn test_validate_config_rejects_relative_path() {
        let mut cfg = create_test_config();
        cfg.source.hits_path = "api/hits".to_string();
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_validate_config_rejects_zero_timeout() {
        let mut cfg = create_test_config();
        cfg.source.timeout_seconds = 0;
        assert!(validate_config(&cfg).is_err());
    }

    fn create_test_config() -> Config {
        Config {
            source: SourceConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                hits_path: DEFAULT_HITS_PATH.to_string(),
                timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Text,
                file: None,
            },
        }
    }
}
