//! Layered service configuration
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults
//! 2. `config/studex.toml` (optional) or an explicit file
//! 3. `STUDEX_*` environment variables, `__` between sections
//!    (`STUDEX_SERVER__BIND_ADDR=0.0.0.0:3000`)

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use studex_core::logging_facility::Profile;
use studex_core::policy::EmptyPolicy;

pub const DEFAULT_CONFIG_FILE: &str = "config/studex";
pub const ENV_PREFIX: &str = "STUDEX";

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind_addr: String,
    pub max_connections: usize,
    pub request_timeout_ms: u64,
    /// Longest accepted request line, newline excluded
    pub max_line_bytes: usize,
}

impl ServerSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    pub db_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AggregationSettings {
    pub empty_policy: EmptyPolicy,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub profile: Profile,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub store: StoreSettings,
    pub aggregation: AggregationSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Load from defaults, the default config file if present, and the
    /// environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load with an explicit config file, which must exist.
    pub fn load_from(file: Option<&Path>) -> Result<Self, ConfigError> {
        let file_source = match file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Self::defaults()?
            .add_source(file_source)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.bind_addr", "127.0.0.1:3000")?
            .set_default("server.max_connections", 64_i64)?
            .set_default("server.request_timeout_ms", 30_000_i64)?
            .set_default("server.max_line_bytes", 1_048_576_i64)?
            .set_default("store.db_path", ".studex/students.db")?
            .set_default("aggregation.empty_policy", "zero")?
            .set_default("logging.profile", "development")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings: Settings = Settings::defaults()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.server.bind_addr, "127.0.0.1:3000");
        assert_eq!(settings.server.max_connections, 64);
        assert_eq!(settings.server.request_timeout(), Duration::from_secs(30));
        assert_eq!(settings.server.max_line_bytes, 1_048_576);
        assert_eq!(settings.store.db_path, PathBuf::from(".studex/students.db"));
        assert_eq!(settings.aggregation.empty_policy, EmptyPolicy::Zero);
        assert_eq!(settings.logging.profile, Profile::Development);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
bind_addr = "0.0.0.0:4000"

[aggregation]
empty_policy = "reject"
"#
        )
        .unwrap();

        let settings = Settings::load_from(Some(file.path())).unwrap();

        assert_eq!(settings.server.bind_addr, "0.0.0.0:4000");
        assert_eq!(settings.aggregation.empty_policy, EmptyPolicy::Reject);
        // untouched sections keep their defaults
        assert_eq!(settings.server.max_connections, 64);
        assert_eq!(settings.logging.profile, Profile::Development);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(Settings::load_from(Some(Path::new("/nonexistent/studex.toml"))).is_err());
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[aggregation]\nempty_policy = \"maybe\"").unwrap();

        assert!(Settings::load_from(Some(file.path())).is_err());
    }
}
