use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use huduma_core::domain::{normalize_status_key, StatusStyles, DEFAULT_BADGE_CLASS};
use huduma_core::rules::PhoneValidation;
use huduma_core::time::{validate_date_format, DEFAULT_DATE_FORMAT};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "huduma";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub date_format: String,
    pub phone: PhoneConfig,
    pub status: StatusStyles,
}

#[derive(Debug, Clone, Default)]
pub struct PhoneConfig {
    pub validation: PhoneValidation,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            phone: PhoneConfig::default(),
            status: StatusStyles::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid date_format value: {0:?}")]
    InvalidDateFormat(String),
    #[error("invalid status key: {0:?}")]
    InvalidStatusKey(String),
    #[error("duplicate status key: {0}")]
    DuplicateStatusKey(String),
    #[error("invalid class for status {status}: class cannot be empty")]
    EmptyStatusClass { status: String },
    #[error("invalid status.default_class value: class cannot be empty")]
    EmptyDefaultClass,
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    date_format: Option<String>,
    phone: Option<PhoneFile>,
    status: Option<StatusFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PhoneFile {
    validation: Option<PhoneValidation>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StatusFile {
    default_class: Option<String>,
    classes: Option<BTreeMap<String, String>>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(format) = parsed.date_format {
        validate_date_format(&format).map_err(|_| ConfigError::InvalidDateFormat(format.clone()))?;
        config.date_format = format;
    }

    if let Some(phone) = parsed.phone {
        if let Some(validation) = phone.validation {
            config.phone.validation = validation;
        }
    }

    if let Some(status) = parsed.status {
        config.status = merge_status(status)?;
    }

    Ok(config)
}

fn merge_status(status: StatusFile) -> Result<StatusStyles> {
    let default_class = match status.default_class {
        Some(class) => {
            let trimmed = class.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::EmptyDefaultClass);
            }
            trimmed.to_string()
        }
        None => DEFAULT_BADGE_CLASS.to_string(),
    };

    let mut overrides = BTreeMap::new();
    for (raw_key, class) in status.classes.unwrap_or_default() {
        let key = normalize_status_key(&raw_key)
            .map_err(|_| ConfigError::InvalidStatusKey(raw_key.clone()))?;
        let class = class.trim();
        if class.is_empty() {
            return Err(ConfigError::EmptyStatusClass { status: key });
        }
        if overrides.insert(key.clone(), class.to_string()).is_some() {
            return Err(ConfigError::DuplicateStatusKey(key));
        }
    }

    Ok(StatusStyles::new(default_class, overrides))
}

#[cfg(test)]
mod tests {
    use super::{
        load, load_at_path, merge_config, resolve_config_path, ConfigError, ConfigFile,
        PhoneFile, StatusFile,
    };
    use huduma_core::rules::PhoneValidation;
    use huduma_core::time::DEFAULT_DATE_FORMAT;
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn empty_file() -> ConfigFile {
        ConfigFile {
            date_format: None,
            phone: None,
            status: None,
        }
    }

    #[test]
    fn merge_config_defaults_when_empty() {
        let merged = merge_config(empty_file()).expect("merge");
        assert_eq!(merged.date_format, DEFAULT_DATE_FORMAT);
        assert_eq!(merged.phone.validation, PhoneValidation::Strict);
        assert!(merged.status.overrides().is_empty());
    }

    #[test]
    fn merge_config_applies_values() {
        let mut classes = BTreeMap::new();
        classes.insert("On Hold".to_string(), " badge-hold ".to_string());
        let parsed = ConfigFile {
            date_format: Some("%d/%m/%Y".to_string()),
            phone: Some(PhoneFile {
                validation: Some(PhoneValidation::Permissive),
            }),
            status: Some(StatusFile {
                default_class: Some("badge-muted".to_string()),
                classes: Some(classes),
            }),
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.date_format, "%d/%m/%Y");
        assert_eq!(merged.phone.validation, PhoneValidation::Permissive);
        assert_eq!(merged.status.default_class(), "badge-muted");
        assert_eq!(merged.status.resolve("on-hold"), "badge-hold");
    }

    #[test]
    fn merge_config_rejects_bad_date_format() {
        let mut parsed = empty_file();
        parsed.date_format = Some("%Q".to_string());
        let err = merge_config(parsed).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDateFormat(_)));
    }

    #[test]
    fn merge_config_rejects_offset_date_format() {
        let mut parsed = empty_file();
        parsed.date_format = Some("%b %-d %z".to_string());
        let err = merge_config(parsed).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDateFormat(format) if format == "%b %-d %z"));
    }

    #[test]
    fn merge_config_rejects_duplicate_status_keys() {
        let mut classes = BTreeMap::new();
        classes.insert("in progress".to_string(), "a".to_string());
        classes.insert("in-progress".to_string(), "b".to_string());
        let mut parsed = empty_file();
        parsed.status = Some(StatusFile {
            default_class: None,
            classes: Some(classes),
        });
        let err = merge_config(parsed).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateStatusKey(key) if key == "in_progress"));
    }

    #[test]
    fn merge_config_rejects_empty_status_values() {
        let mut classes = BTreeMap::new();
        classes.insert("pending".to_string(), "  ".to_string());
        let mut parsed = empty_file();
        parsed.status = Some(StatusFile {
            default_class: None,
            classes: Some(classes),
        });
        assert!(matches!(
            merge_config(parsed).unwrap_err(),
            ConfigError::EmptyStatusClass { .. }
        ));

        let mut parsed = empty_file();
        parsed.status = Some(StatusFile {
            default_class: Some(String::new()),
            classes: None,
        });
        assert!(matches!(
            merge_config(parsed).unwrap_err(),
            ConfigError::EmptyDefaultClass
        ));
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
        assert!(load_at_path(&missing, false).expect("optional").is_none());
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "date_format = \"%Y-%m-%d\"\n[phone]\nvalidation = \"permissive\"\n[status.classes]\npending = \"badge-warn\"\n",
        )
        .expect("write config");

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert_eq!(config.date_format, "%Y-%m-%d");
        assert_eq!(config.phone.validation, PhoneValidation::Permissive);
        assert_eq!(config.status.resolve("Pending"), "badge-warn");
    }

    #[test]
    fn load_at_path_rejects_unknown_keys() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "[phone]\nregion = \"KE\"\n").expect("write config");
        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn load_with_explicit_missing_path_fails() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("nope.toml");
        assert!(load(Some(missing)).is_err());
    }

    #[test]
    fn resolve_config_path_rejects_empty_custom_path() {
        let err = resolve_config_path(Some(PathBuf::new())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfigPath(_)));
    }
}
