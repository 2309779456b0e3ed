//! Loading a rate table from disk or the environment.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{ConfigError, PricingConfig};

/// Environment variable naming a JSON rate table (may be set in `.env`).
pub const CONFIG_ENV_VAR: &str = "QUOTE_PRICING_CONFIG";

/// Where the effective rate table came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    BuiltIn,
    File(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::BuiltIn => write!(f, "built-in"),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Resolve and load the rate table.
///
/// Precedence: explicit path, then `QUOTE_PRICING_CONFIG` (after reading
/// `.env` if present), then [`PricingConfig::default`]. The result is
/// validated before it is returned.
pub fn load_pricing_config(explicit: Option<&Path>) -> Result<(PricingConfig, ConfigSource), ConfigError> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => {
            dotenvy::dotenv().ok();
            std::env::var_os(CONFIG_ENV_VAR)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        }
    };

    let (config, source) = match path {
        Some(path) => (read_pricing_config(&path)?, ConfigSource::File(path)),
        None => {
            debug!("no pricing config supplied, using built-in rates");
            (PricingConfig::default(), ConfigSource::BuiltIn)
        }
    };

    config.validate()?;
    info!(source = %source, "pricing config loaded");
    Ok((config, source))
}

/// Parse a JSON rate table without validating it.
pub fn read_pricing_config(path: &Path) -> Result<PricingConfig, ConfigError> {
    let file = File::open(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    serde_json::from_reader(file).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("quote-fees-{}-{name}", std::process::id()))
    }

    #[test]
    fn explicit_file_overrides_selected_rates() {
        let path = temp_path("override.json");
        let mut file = File::create(&path).unwrap();
        write!(file, r#"{{ "qbo": {{ "monthlyFee": 80 }} }}"#).unwrap();

        let (config, source) = load_pricing_config(Some(&path)).unwrap();
        assert_eq!(config.qbo.monthly_fee, 80.0);
        assert_eq!(config.bookkeeping.base_fee, 150.0);
        assert_eq!(source, ConfigSource::File(path.clone()));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn invalid_values_in_file_fail_validation() {
        let path = temp_path("invalid.json");
        let mut file = File::create(&path).unwrap();
        write!(file, r#"{{ "rounding": {{ "monthlyStep": -5 }} }}"#).unwrap();

        let err = load_pricing_config(Some(&path)).unwrap_err();
        assert_eq!(err, ConfigError::InvalidRoundingStep(-5.0));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_and_malformed_files_are_reported() {
        let missing = temp_path("does-not-exist.json");
        assert!(matches!(
            read_pricing_config(&missing),
            Err(ConfigError::Read { .. })
        ));

        let path = temp_path("garbage.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            read_pricing_config(&path),
            Err(ConfigError::Parse { .. })
        ));
        std::fs::remove_file(&path).ok();
    }
}
