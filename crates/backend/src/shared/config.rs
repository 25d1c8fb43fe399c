use contracts::policy::ReturnPolicyConfig;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    /// Return policy knobs; every field has a baked-in default so a
    /// config.toml without this section still works
    #[serde(default)]
    pub return_policy: ReturnPolicyConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/returns.db"

[return_policy]
return_window_days = 30
auto_approve_threshold = 500.0
restocking_fee_percent = 15.0
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    // Try to find config.toml next to the executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                config
                    .return_policy
                    .validate()
                    .map_err(|e| anyhow::anyhow!("Invalid [return_policy] section: {}", e))?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    // Fall back to default config
    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Load the configuration once and keep it for the process lifetime
pub fn init_config() -> anyhow::Result<&'static Config> {
    let config = load_config()?;
    CONFIG
        .set(config)
        .map_err(|_| anyhow::anyhow!("Configuration already initialized"))?;
    Ok(get_config())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}

/// Return policy in effect for this process
pub fn return_policy() -> &'static ReturnPolicyConfig {
    &get_config().return_policy
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path_str = &config.database.path;
    let db_path = Path::new(db_path_str);

    // If absolute path, use as is
    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    // If relative path, resolve it relative to the executable directory
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let resolved_path = exe_dir.join(db_path);
            return Ok(resolved_path);
        }
    }

    // Fallback: use relative to current directory
    Ok(PathBuf::from(db_path_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.database.path, "target/db/returns.db");
        assert_eq!(config.return_policy.return_window_days, 30);
        assert_eq!(config.return_policy.restocking_fee_percent, 15.0);
    }

    #[test]
    fn test_config_without_policy_section_uses_defaults() {
        let config: Config = toml::from_str("[database]\npath = \"x.db\"\n").unwrap();
        assert_eq!(config.return_policy.auto_approve_threshold, 500.0);
        assert!(config.return_policy.auto_disposition);
    }

    #[test]
    fn test_policy_override_round_trips() {
        let toml_src = r#"
            [database]
            path = "x.db"

            [return_policy]
            return_window_days = 60
            restocking_fee_percent = 10.0

            [return_policy.condition_refund_rates]
            good = 0.8
        "#;
        let config: Config = toml::from_str(toml_src).unwrap();
        assert_eq!(config.return_policy.return_window_days, 60);
        assert_eq!(config.return_policy.restocking_fee_percent, 10.0);
        assert_eq!(
            config
                .return_policy
                .condition_refund_rates
                .rate_for(contracts::enums::ReturnCondition::Good),
            0.8
        );
        // untouched rate keeps its default
        assert_eq!(
            config
                .return_policy
                .condition_refund_rates
                .rate_for(contracts::enums::ReturnCondition::Defective),
            1.0
        );
    }
}
