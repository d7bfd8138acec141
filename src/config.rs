use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Result, TransferOptsError};

/// How a document is applied to a handle.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ApplyMode {
    /// Apply each pair as soon as it is read. A failure leaves the
    /// pairs before it applied.
    #[default]
    Greedy,
    /// Check the shape and types of the whole document first and only
    /// touch the handle if that check passes. The client can still
    /// reject a setter call half-way.
    ValidateFirst,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApplyConfig {
    pub mode: ApplyMode,
}

impl ApplyConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load the configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config: ApplyConfig = serde_json::from_str(&text).map_err(|err| {
            TransferOptsError::Config(format!("{}: {}", path.display(), err))
        })?;
        log::debug!("Loaded {:?} from {}", config, path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempdir::TempDir;

    #[test]
    fn missing_fields_fall_back_to_greedy() {
        let config = ApplyConfig::from_json_str("{}").unwrap();
        assert_eq!(config.mode, ApplyMode::Greedy);
    }

    #[test]
    fn mode_names_are_snake_case() {
        let config =
            ApplyConfig::from_json_str(r#"{"mode": "validate_first"}"#)
                .unwrap();
        assert_eq!(config.mode, ApplyMode::ValidateFirst);

        let text = serde_json::to_string(&config).unwrap();
        assert_eq!(text, r#"{"mode":"validate_first"}"#);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = ApplyConfig::from_json_str(r#"{"atomic": true}"#);
        assert!(matches!(result, Err(TransferOptsError::Config(_))));
    }

    #[test]
    fn load_from_file() {
        let temp_dir =
            TempDir::new("tmp").expect("Failed to create temporary directory");
        let path = temp_dir.path().join("apply.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(br#"{"mode": "greedy"}"#).unwrap();

        let config = ApplyConfig::load(&path).unwrap();
        assert_eq!(config, ApplyConfig::default());
    }

    #[test]
    fn load_reports_the_file() {
        let temp_dir =
            TempDir::new("tmp").expect("Failed to create temporary directory");
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{\"mode\": ").unwrap();

        match ApplyConfig::load(&path) {
            Err(TransferOptsError::Config(message)) => {
                assert!(message.contains("broken.json"))
            }
            other => panic!("expected a config error, got {:?}", other),
        }

        let missing = ApplyConfig::load(temp_dir.path().join("missing.json"));
        assert!(matches!(missing, Err(TransferOptsError::Io(_))));
    }
}
