use crate::ini::errors::IniError;
use crate::ini::line::{Line, LineContent};
use crate::ini::query::{KeyPath, Notation};
use crate::ini::render::{render, OutputMode};
use crate::io::{fingerprint, read_source, write_text, Encoding};
use std::fmt;
use std::path::{Path, PathBuf};

const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Name of a section. Keys that appear before the first header live in
/// the implicit [`SectionName::Global`] section, which can never collide
/// with a real header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectionName {
    Global,
    Named(String),
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionName::Global => write!(f, "(global)"),
            SectionName::Named(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: SectionName,
    /// Every line of the section in file order, header included.
    pub lines: Vec<Line>,
}

impl Section {
    fn new(name: SectionName) -> Self {
        Self {
            name,
            lines: Vec::new(),
        }
    }

    pub fn key_values(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter().filter(|line| line.is_key_value())
    }

    fn closest_key(&self, key: &str) -> Option<String> {
        self.key_values()
            .filter_map(Line::key)
            .map(|candidate| (candidate, strsim::jaro_winkler(key, candidate)))
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(candidate, _)| candidate.to_string())
    }
}

/// Position of a key-value line inside a [`Configuration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineHandle {
    pub section: usize,
    pub line: usize,
}

/// Index of the first section called `name`. Duplicate headers are kept
/// as separate sections; the earliest one wins.
pub fn find_section(sections: &[Section], name: &SectionName) -> Option<usize> {
    sections.iter().position(|section| section.name == *name)
}

/// Index of the first key-value line whose key equals `key` exactly.
pub fn find_key(lines: &[Line], key: &str) -> Option<usize> {
    lines.iter().position(|line| line.key() == Some(key))
}

/// Group classified lines into sections, starting with the global one.
pub fn build_sections(lines: impl IntoIterator<Item = Line>) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = Section::new(SectionName::Global);

    for line in lines {
        if let LineContent::SectionHeader { name } = &line.content {
            let next = Section::new(SectionName::Named(name.clone()));
            sections.push(std::mem::replace(&mut current, next));
        }
        current.lines.push(line);
    }

    sections.push(current);
    sections
}

/// An INI document held entirely in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    sections: Vec<Section>,
    source_path: Option<PathBuf>,
    encoding: Encoding,
    fingerprint: u64,
}

impl Configuration {
    /// Read and classify the file at `path`.
    pub fn parse(path: impl AsRef<Path>) -> Result<Self, IniError> {
        let path = path.as_ref();
        let source = read_source(path).map_err(|source| IniError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if source.encoding != Encoding::Utf8 {
            tracing::debug!(
                path = %path.display(),
                encoding = ?source.encoding,
                "decoded non-UTF-8 file"
            );
        }

        let mut config = Self::from_path(path, &source.text);
        config.encoding = source.encoding;
        config.fingerprint = source.fingerprint;
        Ok(config)
    }

    /// Build a document from text that did not come from disk.
    pub fn from_text(content: &str) -> Self {
        let mut config = Self::from_lines(classify_lines(content));
        config.fingerprint = fingerprint(content.as_bytes());
        config
    }

    pub fn from_path(path: impl Into<PathBuf>, content: &str) -> Self {
        let mut config = Self::from_text(content);
        config.source_path = Some(path.into());
        tracing::debug!(
            path = ?config.source_path,
            sections = config.sections.len(),
            "parsed ini document"
        );
        config
    }

    pub fn from_lines(lines: impl IntoIterator<Item = Line>) -> Self {
        Self {
            sections: build_sections(lines),
            source_path: None,
            encoding: Encoding::Utf8,
            fingerprint: 0,
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Encoding the source was decoded from; writes use the same one.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn global_section(&self) -> &Section {
        // build_sections always opens with the global section
        &self.sections[0]
    }

    pub fn section(&self, name: &SectionName) -> Option<&Section> {
        find_section(&self.sections, name).map(|index| &self.sections[index])
    }

    /// # Panics
    ///
    /// Panics if `handle` does not come from this document.
    pub fn line(&self, handle: LineHandle) -> &Line {
        &self.sections[handle.section].lines[handle.line]
    }

    /// Locate the key-value line addressed by `path`.
    pub fn find_key_by_path(&self, path: &KeyPath) -> Result<LineHandle, IniError> {
        let (section_name, key) = path.target()?;

        let section_index = find_section(&self.sections, &section_name).ok_or_else(|| {
            IniError::SectionNotFound {
                section: section_name.to_string(),
            }
        })?;
        let section = &self.sections[section_index];

        let line_index =
            find_key(&section.lines, key).ok_or_else(|| IniError::KeyNotFound {
                section: section_name.to_string(),
                key: key.to_string(),
                suggestion: section.closest_key(key),
            })?;

        tracing::debug!(
            %path,
            section = %section_name,
            line = section.lines[line_index].number,
            "located key"
        );
        Ok(LineHandle {
            section: section_index,
            line: line_index,
        })
    }

    pub fn get_value(&self, notation: Notation, key: &str) -> Result<&str, IniError> {
        let path = KeyPath::decompose(notation, key)?;
        let handle = self.find_key_by_path(&path)?;
        Ok(self.line(handle).value().unwrap_or_default())
    }

    /// Set the value of the addressed key. On error the document is left
    /// untouched.
    pub fn set_value(
        &mut self,
        notation: Notation,
        key: &str,
        value: impl Into<String>,
    ) -> Result<(), IniError> {
        let path = KeyPath::decompose(notation, key)?;
        let handle = self.find_key_by_path(&path)?;
        self.set_line_value(handle, value)
    }

    /// Set the value of the key-value line at `handle`.
    pub fn set_line_value(
        &mut self,
        handle: LineHandle,
        value: impl Into<String>,
    ) -> Result<(), IniError> {
        let line = self
            .sections
            .get_mut(handle.section)
            .and_then(|section| section.lines.get_mut(handle.line))
            .filter(|line| line.is_key_value())
            .ok_or(IniError::InvalidHandle {
                section: handle.section,
                line: handle.line,
            })?;

        let value = value.into();
        tracing::info!(line = line.number, key = ?line.key(), %value, "setting value");
        line.set_value(value);
        Ok(())
    }

    pub fn render(&self, mode: OutputMode) -> String {
        render(self, mode)
    }

    /// Render and write to `path`.
    pub fn write(&self, path: impl AsRef<Path>, mode: OutputMode) -> Result<(), IniError> {
        let path = path.as_ref();
        write_text(path, &self.render(mode), self.encoding).map_err(|source| IniError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), %mode, "wrote ini document");
        Ok(())
    }

    /// Write back to the file this document was parsed from, refusing if
    /// the file changed on disk in the meantime.
    pub fn save(&self, mode: OutputMode) -> Result<(), IniError> {
        let path = self.source_path.as_deref().ok_or_else(|| IniError::Io {
            path: PathBuf::from("<ini-buffer>"),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "document was not parsed from a file",
            ),
        })?;

        let current = read_source(path).map_err(|source| IniError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if current.fingerprint != self.fingerprint {
            tracing::warn!(path = %path.display(), "source changed since parse");
            return Err(IniError::SourceChanged {
                path: path.to_path_buf(),
            });
        }

        self.write(path, mode)
    }
}

fn classify_lines(content: &str) -> impl Iterator<Item = Line> + '_ {
    content
        .split('\n')
        .enumerate()
        .map(|(index, text)| Line::classify(index + 1, text))
}

/// Read `file` and return the value addressed by `key`.
pub fn get_value(
    file: impl AsRef<Path>,
    notation: Notation,
    key: &str,
) -> Result<String, IniError> {
    let config = Configuration::parse(file)?;
    let value = config.get_value(notation, key)?;
    Ok(value.to_string())
}

/// Read `file` and return it with `key` set to `value`. Nothing is written.
pub fn set_value(
    file: impl AsRef<Path>,
    notation: Notation,
    key: &str,
    value: impl Into<String>,
) -> Result<Configuration, IniError> {
    let mut config = Configuration::parse(file)?;
    config.set_value(notation, key, value)?;
    Ok(config)
}
