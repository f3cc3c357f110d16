//! File access for the editor: whole-file reads and atomic writes.
//!
//! Files are decoded as UTF-8 when they are valid UTF-8 and as Latin-1
//! otherwise, so legacy files with stray high bytes in comments still
//! parse and untouched lines are written back byte for byte.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use xxhash_rust::xxh3::xxh3_64;

/// Byte encoding a document was read in, and will be written back in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    Utf8,
    Latin1,
}

/// Decoded file content plus what is needed to write it back faithfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    pub text: String,
    pub encoding: Encoding,
    /// xxh3 of the raw bytes on disk.
    pub fingerprint: u64,
}

impl SourceText {
    pub fn decode(bytes: Vec<u8>) -> Self {
        let fingerprint = fingerprint(&bytes);
        match String::from_utf8(bytes) {
            Ok(text) => Self {
                text,
                encoding: Encoding::Utf8,
                fingerprint,
            },
            Err(err) => Self {
                // Latin-1 maps every byte to the code point of the same value
                text: err.as_bytes().iter().map(|&b| char::from(b)).collect(),
                encoding: Encoding::Latin1,
                fingerprint,
            },
        }
    }
}

/// Encode `text` for writing. Latin-1 output fails on characters above U+00FF.
pub fn encode(text: &str, encoding: Encoding) -> io::Result<Vec<u8>> {
    match encoding {
        Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
        Encoding::Latin1 => text
            .chars()
            .map(|c| {
                u8::try_from(u32::from(c)).map_err(|_| {
                    io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("character {c:?} cannot be written to a Latin-1 file"),
                    )
                })
            })
            .collect(),
    }
}

pub fn read_source(path: &Path) -> io::Result<SourceText> {
    Ok(SourceText::decode(fs::read(path)?))
}

pub fn read_text(path: &Path) -> io::Result<String> {
    Ok(read_source(path)?.text)
}

/// Atomic file write: tempfile + fsync + rename.
///
/// Either the full content lands or the previous file is left intact.
/// An existing target keeps its permissions, and a symlinked target is
/// written through so the link itself survives.
pub fn write_text(path: &Path, content: &str, encoding: Encoding) -> io::Result<()> {
    let bytes = encode(content, encoding)?;
    let target = resolve_target(path)?;

    // Tempfile must live on the same filesystem for the rename
    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(&bytes)?;
    if let Ok(metadata) = fs::metadata(&target) {
        temp.as_file().set_permissions(metadata.permissions())?;
    }
    temp.as_file().sync_all()?;
    temp.persist(&target).map_err(|e| e.error)?;

    Ok(())
}

fn resolve_target(path: &Path) -> io::Result<PathBuf> {
    match fs::canonicalize(path) {
        Ok(canonical) => Ok(canonical),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(err) => Err(err),
    }
}

/// xxh3 hash of a document's raw bytes.
pub fn fingerprint(bytes: &[u8]) -> u64 {
    xxh3_64(bytes)
}
