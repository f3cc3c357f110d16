use crate::ini::document::Configuration;
use crate::ini::errors::IniError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// Every line, byte for byte, except edited ones.
    #[default]
    Full,
    /// Section headers and key-value lines only.
    KeyValues,
}

impl FromStr for OutputMode {
    type Err = IniError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "full" => Ok(OutputMode::Full),
            "key-values" => Ok(OutputMode::KeyValues),
            other => Err(IniError::InvalidOutputMode {
                input: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Full => write!(f, "full"),
            OutputMode::KeyValues => write!(f, "key-values"),
        }
    }
}

/// Render the document, lines joined with `\n` and no newline appended.
///
/// A source that ended with a newline keeps it: its final, empty line is
/// part of the document.
pub fn render(config: &Configuration, mode: OutputMode) -> String {
    let lines = config.sections().iter().flat_map(|section| &section.lines);

    let mut rendered = Vec::new();
    for line in lines {
        let text = line.render();
        if mode == OutputMode::KeyValues && line.is_other() {
            continue;
        }
        rendered.push(text);
    }

    rendered.join("\n")
}
