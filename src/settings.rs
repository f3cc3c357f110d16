use crate::ini::{Notation, OutputMode};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "CONFEDIT_CONFIG";

/// User settings, read from a small TOML file:
///
/// ```toml
/// [defaults]
/// notation = "brackets"
/// output = "key-values"
/// ```
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    #[serde(default)]
    pub notation: Notation,
    #[serde(default)]
    pub output: OutputMode,
}

#[derive(Debug)]
pub enum SettingsError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Toml {
        path: Option<PathBuf>,
        source: toml_edit::de::Error,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io { path, source } => {
                write!(
                    f,
                    "failed to read settings from {}: {}",
                    path.display(),
                    source
                )
            }
            SettingsError::Toml { path, source } => match path {
                Some(path) => write!(
                    f,
                    "failed to parse settings TOML ({}): {}",
                    path.display(),
                    source
                ),
                None => write!(f, "failed to parse settings TOML: {}", source),
            },
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io { source, .. } => Some(source),
            SettingsError::Toml { source, .. } => Some(source),
        }
    }
}

pub fn load_from_str(input: &str) -> Result<Settings, SettingsError> {
    toml_edit::de::from_str(input).map_err(|source| SettingsError::Toml { path: None, source })
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<Settings, SettingsError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents).map_err(|error| match error {
        SettingsError::Toml { path: None, source } => SettingsError::Toml {
            path: Some(path.to_path_buf()),
            source,
        },
        other => other,
    })
}

/// `~/.config/confedit/config.toml`
pub fn default_path() -> Option<PathBuf> {
    home::home_dir().map(|home| home.join(".config/confedit/config.toml"))
}

/// Load settings from the first available source.
///
/// Priority order:
/// 1. Explicit `--config` path
/// 2. `CONFEDIT_CONFIG` environment variable
/// 3. `~/.config/confedit/config.toml`, if it exists
///
/// Explicitly named files must exist; otherwise built-in defaults apply.
pub fn resolve(explicit: Option<&Path>) -> Result<Settings, SettingsError> {
    let from_env = env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    resolve_from(explicit, from_env.as_deref(), default_path().as_deref())
}

fn resolve_from(
    explicit: Option<&Path>,
    from_env: Option<&Path>,
    default: Option<&Path>,
) -> Result<Settings, SettingsError> {
    if let Some(path) = explicit.or(from_env) {
        tracing::debug!(path = %path.display(), "loading settings");
        return load_from_path(path);
    }

    match default {
        Some(path) if path.exists() => {
            tracing::debug!(path = %path.display(), "loading default settings");
            load_from_path(path)
        }
        _ => Ok(Settings::default()),
    }
}
