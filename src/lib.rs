//! Confedit: line-preserving editor for INI configuration files
//!
//! Reads files such as `php.ini`, addresses a single `section.key`, and
//! writes the document back with every untouched byte intact: comments,
//! blank lines, indentation and section order all survive an edit.
//!
//! # Architecture
//!
//! Each raw line is classified once into a [`Line`]; lines are grouped into
//! [`Section`]s, starting with an implicit global section for keys that
//! precede the first header. A [`KeyPath`] decomposed from dot notation
//! (`PHP.engine`) or bracket notation (`CLI Server[cli_server.color]`)
//! locates one key-value line, and only that line is re-rendered.
//!
//! # Example
//!
//! ```
//! use confedit::{Configuration, Notation, OutputMode};
//!
//! let mut config = Configuration::from_text("; docs\n[PHP]\nengine = On\n");
//! assert_eq!(config.get_value(Notation::Dot, "PHP.engine").unwrap(), "On");
//!
//! config.set_value(Notation::Dot, "PHP.engine", "Off").unwrap();
//! assert_eq!(config.render(OutputMode::Full), "; docs\n[PHP]\nengine=Off\n");
//! ```

pub mod configurator;
pub mod ini;
pub mod io;
pub mod settings;

// Re-exports
pub use configurator::{ConfigKind, Configurator, ConfiguratorError, Document, IniConfigurator};
pub use ini::{
    get_value, render, set_value, Configuration, IniError, KeyPath, Line, LineContent,
    LineHandle, LineStatus, Notation, OutputMode, Section, SectionName,
};
pub use io::Encoding;
pub use settings::{Settings, SettingsError};
