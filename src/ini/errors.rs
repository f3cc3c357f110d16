use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IniError {
    #[error("failed to read {path}: {source}")]
    Parse {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("section not found: {section}")]
    SectionNotFound { section: String },

    #[error("key not found: {key} in {section}{}", suggestion_hint(.suggestion))]
    KeyNotFound {
        section: String,
        key: String,
        suggestion: Option<String>,
    },

    #[error("invalid key path '{input}': {message}")]
    InvalidKeyPath { input: String, message: String },

    #[error("invalid output mode '{input}' (expected 'full' or 'key-values')")]
    InvalidOutputMode { input: String },

    #[error("no key-value line at section {section}, line {line}")]
    InvalidHandle { section: usize, line: usize },

    #[error("{path} changed on disk since it was parsed; refusing to overwrite")]
    SourceChanged { path: PathBuf },
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(key) => format!(" (did you mean '{key}'?)"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_not_found_mentions_suggestion() {
        let err = IniError::KeyNotFound {
            section: "PHP".to_string(),
            key: "engin".to_string(),
            suggestion: Some("engine".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "key not found: engin in PHP (did you mean 'engine'?)"
        );
    }

    #[test]
    fn key_not_found_without_suggestion() {
        let err = IniError::KeyNotFound {
            section: "PHP".to_string(),
            key: "zzz".to_string(),
            suggestion: None,
        };
        assert_eq!(err.to_string(), "key not found: zzz in PHP");
    }
}
