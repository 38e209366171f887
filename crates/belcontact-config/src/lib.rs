use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use belcontact_core::domain::BelgianNumberingPlan;
use belcontact_core::rules::{ContactValidationPolicy, Messages, PolicyOptions};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "belcontact";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub policy: PolicyOptions,
    pub messages: Messages,
}

impl AppConfig {
    pub fn validation_policy(&self) -> ContactValidationPolicy {
        ContactValidationPolicy::new(self.policy.clone(), self.messages.clone())
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
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("person.bootstrap_phone_sentinel cannot be empty")]
    EmptyBootstrapSentinel,
    #[error("messages.{0} cannot be empty")]
    EmptyMessage(&'static str),
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

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    phone: Option<PhoneFile>,
    person: Option<PersonFile>,
    messages: Option<MessagesFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PhoneFile {
    accept_local_zone_prefix: Option<bool>,
    strict_characters: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PersonFile {
    bootstrap_phone_sentinel: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct MessagesFile {
    invalid_phone_number: Option<String>,
    invalid_mobile_phone_number: Option<String>,
    invalid_email: Option<String>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path.clone()) {
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

    ensure_permissions(path)?;
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

    if let Some(phone) = parsed.phone {
        if let Some(accept) = phone.accept_local_zone_prefix {
            config.policy.plan = BelgianNumberingPlan::new(accept);
        }
        if let Some(strict) = phone.strict_characters {
            config.policy.strict_characters = strict;
        }
    }

    if let Some(person) = parsed.person {
        if let Some(sentinel) = person.bootstrap_phone_sentinel {
            if sentinel.trim().is_empty() {
                return Err(ConfigError::EmptyBootstrapSentinel);
            }
            config.policy.bootstrap_phone_sentinel = sentinel;
        }
    }

    if let Some(messages) = parsed.messages {
        override_message(
            &mut config.messages.invalid_phone_number,
            messages.invalid_phone_number,
            "invalid_phone_number",
        )?;
        override_message(
            &mut config.messages.invalid_mobile_phone_number,
            messages.invalid_mobile_phone_number,
            "invalid_mobile_phone_number",
        )?;
        override_message(
            &mut config.messages.invalid_email,
            messages.invalid_email,
            "invalid_email",
        )?;
    }

    Ok(config)
}

fn override_message(
    target: &mut String,
    value: Option<String>,
    key: &'static str,
) -> Result<()> {
    if let Some(value) = value {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyMessage(key));
        }
        *target = trimmed.to_string();
    }
    Ok(())
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
