use crate::ini::document::SectionName;
use crate::ini::errors::IniError;
use serde::Deserialize;
use std::fmt;

/// How a `section.key` address is spelled on the command line.
///
/// Dot notation cannot address keys that themselves contain a dot
/// (`cli_server.color`), bracket notation (`CLI Server[cli_server.color]`)
/// can.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Notation {
    #[default]
    Dot,
    Brackets,
}

impl Notation {
    pub fn from_brackets_flag(use_brackets: bool) -> Self {
        if use_brackets {
            Notation::Brackets
        } else {
            Notation::Dot
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath {
    parts: Vec<String>,
}

impl KeyPath {
    /// Split `input` into path segments under `notation`.
    ///
    /// Paths longer than two segments decompose fine and are only
    /// rejected when resolved with [`KeyPath::target`].
    pub fn decompose(notation: Notation, input: &str) -> Result<Self, IniError> {
        let parts = match notation {
            Notation::Dot => split_dotted(input),
            Notation::Brackets => split_brackets(input)?,
        };

        if parts.is_empty() {
            return Err(IniError::InvalidKeyPath {
                input: input.to_string(),
                message: "empty key path".to_string(),
            });
        }

        Ok(Self { parts })
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Resolve the path into the section to search and the key to find.
    pub fn target(&self) -> Result<(SectionName, &str), IniError> {
        match self.parts.as_slice() {
            [key] => Ok((SectionName::Global, key.as_str())),
            [section, key] => Ok((SectionName::Named(section.clone()), key.as_str())),
            _ => Err(IniError::InvalidKeyPath {
                input: self.to_string(),
                message: format!(
                    "expected at most 2 segments (section and key), got {}",
                    self.parts.len()
                ),
            }),
        }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.parts.join("."))
    }
}

fn split_dotted(input: &str) -> Vec<String> {
    input.split('.').map(str::to_string).collect()
}

fn split_brackets(input: &str) -> Result<Vec<String>, IniError> {
    let invalid = |message: &str| IniError::InvalidKeyPath {
        input: input.to_string(),
        message: message.to_string(),
    };

    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_brackets = false;

    for ch in input.chars() {
        match ch {
            '[' => {
                if in_brackets {
                    return Err(invalid("nested '[' is not allowed"));
                }
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
                in_brackets = true;
            }
            ']' => {
                if !in_brackets {
                    return Err(invalid("unmatched ']'"));
                }
                if current.is_empty() {
                    return Err(invalid("empty brackets"));
                }
                parts.push(std::mem::take(&mut current));
                in_brackets = false;
            }
            other => current.push(other),
        }
    }

    if in_brackets {
        return Err(invalid("unterminated '['"));
    }

    if !current.is_empty() {
        parts.push(current);
    }

    Ok(parts)
}
