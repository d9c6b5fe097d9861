//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// Account directory configuration.
    #[serde(default)]
    pub directory: DirectoryConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Session configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Session token expiration in seconds.
    #[serde(default = "default_session_expiry")]
    pub expiry_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expiry_secs: default_session_expiry(),
        }
    }
}

fn default_session_expiry() -> u64 {
    86400 // 24 hours
}

/// Account directory configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryConfig {
    /// How accounts are keyed by owner.
    #[serde(default)]
    pub owner_policy: OwnerPolicy,
}

/// Policy for how many accounts an owner may hold.
///
/// Under `OneAccountPerOwner` (the default), opening a second account for the
/// same owner fails with `DuplicateOwner`. Under `MultiAccountPerOwner`, an
/// owner may hold several accounts and owner-based lookups deterministically
/// resolve to the first-created one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OwnerPolicy {
    /// Exactly one account per owner key.
    #[default]
    OneAccountPerOwner,
    /// An owner may hold multiple accounts.
    MultiAccountPerOwner,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("GRANARY").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.session.expiry_secs, 86400);
        assert_eq!(
            config.directory.owner_policy,
            OwnerPolicy::OneAccountPerOwner
        );
    }

    #[test]
    fn test_owner_policy_kebab_case() {
        let policy: OwnerPolicy = serde_json::from_str("\"multi-account-per-owner\"").unwrap();
        assert_eq!(policy, OwnerPolicy::MultiAccountPerOwner);

        let policy: OwnerPolicy = serde_json::from_str("\"one-account-per-owner\"").unwrap();
        assert_eq!(policy, OwnerPolicy::OneAccountPerOwner);
    }
}
