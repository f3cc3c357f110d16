//! Format-independent access to configuration files.
//!
//! Each supported file kind is served by a [`Configurator`]. Only the
//! line-preserving INI engine exists today; `php.ini` files are plain INI.

use crate::ini::{self, Configuration, IniError, Notation, OutputMode};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfiguratorError {
    #[error("no configurator found for '{0}' (expected 'php' or 'ini')")]
    UnknownKind(String),

    #[error(transparent)]
    Ini(#[from] IniError),
}

/// An edited, in-memory document that can be rendered or written out.
pub trait Document {
    fn render(&self, mode: OutputMode) -> String;

    fn write_to(&self, path: &Path, mode: OutputMode) -> Result<(), ConfiguratorError>;

    /// Write back to the file the document was loaded from.
    fn save(&self, mode: OutputMode) -> Result<(), ConfiguratorError>;
}

pub trait Configurator {
    fn get_parameter(
        &self,
        notation: Notation,
        file: &Path,
        key: &str,
    ) -> Result<String, ConfiguratorError>;

    /// Load `file` and set `key`. The file itself is not modified.
    fn set_parameter(
        &self,
        notation: Notation,
        file: &Path,
        key: &str,
        value: &str,
    ) -> Result<Box<dyn Document>, ConfiguratorError>;
}

impl Document for Configuration {
    fn render(&self, mode: OutputMode) -> String {
        Configuration::render(self, mode)
    }

    fn write_to(&self, path: &Path, mode: OutputMode) -> Result<(), ConfiguratorError> {
        Ok(self.write(path, mode)?)
    }

    fn save(&self, mode: OutputMode) -> Result<(), ConfiguratorError> {
        Ok(Configuration::save(self, mode)?)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IniConfigurator;

impl Configurator for IniConfigurator {
    fn get_parameter(
        &self,
        notation: Notation,
        file: &Path,
        key: &str,
    ) -> Result<String, ConfiguratorError> {
        Ok(ini::get_value(file, notation, key)?)
    }

    fn set_parameter(
        &self,
        notation: Notation,
        file: &Path,
        key: &str,
        value: &str,
    ) -> Result<Box<dyn Document>, ConfiguratorError> {
        let config = ini::set_value(file, notation, key, value)?;
        Ok(Box::new(config))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKind {
    Php,
    Ini,
}

impl ConfigKind {
    pub fn configurator(self) -> Box<dyn Configurator> {
        match self {
            ConfigKind::Php | ConfigKind::Ini => Box::new(IniConfigurator),
        }
    }
}

impl FromStr for ConfigKind {
    type Err = ConfiguratorError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "php" => Ok(ConfigKind::Php),
            "ini" => Ok(ConfigKind::Ini),
            other => Err(ConfiguratorError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigKind::Php => write!(f, "php"),
            ConfigKind::Ini => write!(f, "ini"),
        }
    }
}
