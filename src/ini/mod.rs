pub mod document;
pub mod errors;
pub mod line;
pub mod query;
pub mod render;

pub use document::{
    build_sections, find_key, find_section, get_value, set_value, Configuration, LineHandle,
    Section, SectionName,
};
pub use errors::IniError;
pub use line::{Line, LineContent, LineStatus};
pub use query::{KeyPath, Notation};
pub use render::{render, OutputMode};
