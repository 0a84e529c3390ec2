use crate::error::VaultError;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2/pokemon/";

/// What the harvest loop does with an item that failed for a given
/// error category: give up on the whole run, or log and move on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    Abort,
    Skip,
}

/// Full runtime configuration. Layered via `Config::load`; every field has
/// a default so an empty environment still yields a runnable config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub fetch: FetchConfig,
    pub policy: PolicyConfig,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            fetch: FetchConfig::default(),
            policy: PolicyConfig::default(),
            loglevel: "info".to_string(),
        }
    }
}

/// Plain connection settings for the destination database. Credentials are
/// ordinary config values; no secret-store indirection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
    /// The run is strictly sequential; one connection is enough.
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            dbname: "pokeapi".to_string(),
            user: "postgres".to_string(),
            password: String::new(),
            max_connections: 1,
        }
    }
}

/// Which records to fetch and from where.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub api_base: Url,
    pub start_id: u32,
    pub end_id: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_base: Url::parse(DEFAULT_API_BASE).expect("default API base must be a valid URL"),
            start_id: 1,
            end_id: 100,
        }
    }
}

impl FetchConfig {
    /// Inclusive id range; empty when `start_id > end_id`.
    pub fn id_range(&self) -> RangeInclusive<u32> {
        self.start_id..=self.end_id
    }

    /// Absolute endpoint URL for one record id. Tolerates an `api_base`
    /// configured with or without a trailing slash.
    pub fn endpoint_for(&self, id: u32) -> Result<Url, VaultError> {
        let base = self.api_base.as_str();
        let joined = if base.ends_with('/') {
            format!("{base}{id}")
        } else {
            format!("{base}/{id}")
        };
        Ok(Url::parse(&joined)?)
    }
}

/// Per-category handling of failed items. Non-2xx responses are not errors
/// and always skip; database failures always abort. These two knobs cover
/// the remaining categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub on_network_error: FailurePolicy,
    pub on_parse_error: FailurePolicy,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            on_network_error: FailurePolicy::Abort,
            on_parse_error: FailurePolicy::Abort,
        }
    }
}

impl Config {
    /// Layered load: defaults, then `pokevault.toml` from the working
    /// directory, then `POKEVAULT_*` environment variables (nested keys
    /// split on `__`, e.g. `POKEVAULT_DATABASE__HOST`).
    pub fn load() -> Result<Self, VaultError> {
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("pokevault.toml"))
            .merge(Env::prefixed("POKEVAULT_").split("__"));
        Ok(figment.extract()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_pokeapi_with_the_full_range() {
        let cfg = Config::default();
        assert_eq!(cfg.fetch.start_id, 1);
        assert_eq!(cfg.fetch.end_id, 100);
        assert_eq!(cfg.fetch.api_base.as_str(), DEFAULT_API_BASE);
        assert_eq!(cfg.database.port, 5432);
        assert_eq!(cfg.database.max_connections, 1);
        assert_eq!(cfg.policy.on_network_error, FailurePolicy::Abort);
        assert_eq!(cfg.policy.on_parse_error, FailurePolicy::Abort);
        assert_eq!(cfg.loglevel, "info");
    }

    #[test]
    fn id_range_is_inclusive_and_may_be_empty() {
        let fetch = FetchConfig {
            start_id: 3,
            end_id: 5,
            ..FetchConfig::default()
        };
        assert_eq!(fetch.id_range().collect::<Vec<_>>(), vec![3, 4, 5]);

        let empty = FetchConfig {
            start_id: 5,
            end_id: 3,
            ..FetchConfig::default()
        };
        assert_eq!(empty.id_range().count(), 0);
    }

    #[test]
    fn endpoint_join_handles_trailing_slash_either_way() {
        let with_slash = FetchConfig::default();
        assert_eq!(
            with_slash.endpoint_for(25).unwrap().as_str(),
            "https://pokeapi.co/api/v2/pokemon/25"
        );

        let without_slash = FetchConfig {
            api_base: Url::parse("https://pokeapi.co/api/v2/pokemon").unwrap(),
            ..FetchConfig::default()
        };
        assert_eq!(
            without_slash.endpoint_for(25).unwrap().as_str(),
            "https://pokeapi.co/api/v2/pokemon/25"
        );
    }

    #[test]
    fn env_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("POKEVAULT_DATABASE__HOST", "db.internal");
            jail.set_env("POKEVAULT_DATABASE__PASSWORD", "hunter2");
            jail.set_env("POKEVAULT_FETCH__END_ID", "10");
            jail.set_env("POKEVAULT_POLICY__ON_PARSE_ERROR", "skip");

            let cfg = Config::load().expect("config should load from env");
            assert_eq!(cfg.database.host, "db.internal");
            assert_eq!(cfg.database.password, "hunter2");
            assert_eq!(cfg.fetch.end_id, 10);
            assert_eq!(cfg.policy.on_parse_error, FailurePolicy::Skip);
            // Untouched fields keep their defaults.
            assert_eq!(cfg.fetch.start_id, 1);
            assert_eq!(cfg.policy.on_network_error, FailurePolicy::Abort);
            Ok(())
        });
    }

    #[test]
    fn env_wins_over_toml_wins_over_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "pokevault.toml",
                r#"
                    loglevel = "debug"

                    [database]
                    host = "toml-host"
                    dbname = "toml-db"

                    [fetch]
                    end_id = 42
                "#,
            )?;
            jail.set_env("POKEVAULT_DATABASE__HOST", "env-host");

            let cfg = Config::load().expect("config should load from toml + env");
            assert_eq!(cfg.database.host, "env-host");
            assert_eq!(cfg.database.dbname, "toml-db");
            assert_eq!(cfg.fetch.end_id, 42);
            assert_eq!(cfg.loglevel, "debug");
            Ok(())
        });
    }

    #[test]
    fn unknown_policy_value_is_rejected() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("POKEVAULT_POLICY__ON_NETWORK_ERROR", "retry");
            assert!(Config::load().is_err());
            Ok(())
        });
    }
}
