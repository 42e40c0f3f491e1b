//! Loading [`PetConfig`] from a TOML file.

use std::fs;
use std::path::Path;

use pixelpaws_logic::config::PetConfig;

use crate::error::{PetError, PetResult};

pub fn load_config(path: &Path) -> PetResult<PetConfig> {
    let raw = fs::read_to_string(path).map_err(|source| PetError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&raw).map_err(|source| PetError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Defaults when no file is given.
pub fn load_config_or_default(path: Option<&Path>) -> PetResult<PetConfig> {
    match path {
        Some(path) => {
            let config = load_config(path)?;
            log::info!("Loaded config from {:?}", path);
            Ok(config)
        }
        None => Ok(PetConfig::default()),
    }
}

pub fn parse_config(raw: &str) -> Result<PetConfig, toml::de::Error> {
    toml::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_overrides_only_named_fields() {
        let config = parse_config(
            r#"
            tick_interval_secs = 5

            [decay]
            grace_seconds = 0

            [shop]
            min_happiness_to_open = 40.0
            "#,
        )
        .unwrap();
        assert_eq!(config.tick_interval_secs, 5);
        assert_eq!(config.decay.grace_seconds, 0);
        assert_eq!(config.decay.first_tier_rate, 0.2);
        assert_eq!(config.shop.min_happiness_to_open, 40.0);
        assert_eq!(config.status, PetConfig::default().status);
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "utc_offset_minutes = -300").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.utc_offset_minutes, -300);
    }

    #[test]
    fn test_errors_name_the_file() {
        let missing = Path::new("/definitely/not/here.toml");
        assert!(matches!(
            load_config(missing),
            Err(PetError::ConfigRead { path, .. }) if path == missing
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tick_interval_secs = \"soon\"").unwrap();
        assert!(matches!(
            load_config(file.path()),
            Err(PetError::ConfigParse { .. })
        ));
        assert_eq!(load_config_or_default(None).unwrap(), PetConfig::default());
    }
}
