//! Single-line classification and rendering.
//!
//! A [`Line`] is classified once, from its source text, and never
//! reclassified. Edits only touch the parsed value and flip the status;
//! [`Line::render`] decides whether the original text or a canonical
//! `key=value` form is emitted.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStatus {
    Original,
    Changed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineContent {
    KeyValue {
        key: String,
        value: String,
        commented: bool,
    },
    SectionHeader {
        name: String,
    },
    /// Blank lines, `;` comments and anything unparseable.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based position in the source file.
    pub number: usize,
    /// Exact source text, without the `\n` terminator.
    pub original_text: String,
    pub status: LineStatus,
    pub content: LineContent,
}

impl Line {
    /// Classify one raw line. First matching rule wins; never fails.
    pub fn classify(number: usize, text: &str) -> Self {
        Self {
            number,
            original_text: text.to_string(),
            status: LineStatus::Original,
            content: classify_content(text),
        }
    }

    pub fn is_key_value(&self) -> bool {
        matches!(self.content, LineContent::KeyValue { .. })
    }

    pub fn is_other(&self) -> bool {
        matches!(self.content, LineContent::Other)
    }

    pub fn key(&self) -> Option<&str> {
        match &self.content {
            LineContent::KeyValue { key, .. } => Some(key),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&str> {
        match &self.content {
            LineContent::KeyValue { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Replace the value of a key-value line and mark it changed.
    ///
    /// Returns `false` (and leaves the line untouched) for headers and
    /// other lines; the locator never hands those out.
    pub fn set_value(&mut self, new_value: impl Into<String>) -> bool {
        match &mut self.content {
            LineContent::KeyValue { value, .. } => {
                *value = new_value.into();
                self.status = LineStatus::Changed;
                true
            }
            _ => false,
        }
    }

    pub fn render(&self) -> String {
        if self.status == LineStatus::Original {
            return self.original_text.clone();
        }

        let mut rendered = match &self.content {
            LineContent::KeyValue {
                key,
                value,
                commented,
            } => {
                let prefix = if *commented { ";" } else { "" };
                format!("{prefix}{key}={value}")
            }
            LineContent::SectionHeader { name } => format!("[{name}]"),
            LineContent::Other => return self.original_text.clone(),
        };

        // keep CRLF files consistent
        if self.original_text.ends_with('\r') {
            rendered.push('\r');
        }
        rendered
    }
}

fn classify_content(text: &str) -> LineContent {
    let trimmed = text.trim();

    if trimmed.is_empty() || trimmed.starts_with(';') {
        return LineContent::Other;
    }

    if let Some(inner) = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        return LineContent::SectionHeader {
            name: inner.to_string(),
        };
    }

    if let Some((key, value)) = trimmed.split_once('=') {
        return LineContent::KeyValue {
            key: key.trim().to_string(),
            value: value.trim().to_string(),
            commented: false,
        };
    }

    LineContent::Other
}
