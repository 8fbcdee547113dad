//! Output serialization, hashing, and atomic persistence.

use sha2::{Digest, Sha384};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Serialize lines to the final output text.
///
/// Lines are joined with `\n` (never `\r\n`); the byte stream is the UTF-8
/// encoding of the returned string, without BOM. With `final_newline` the
/// text ends with exactly one trailing `\n`, otherwise no newline is added.
pub fn serialize(lines: &[String], final_newline: bool) -> String {
    let mut text = lines.join("\n");
    if final_newline {
        while text.ends_with('\n') {
            text.pop();
        }
        text.push('\n');
    }
    text
}

/// SHA-384 of a byte stream, rendered as 96 lowercase hex characters.
pub fn sha384_hex(data: &[u8]) -> String {
    let mut hasher = Sha384::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Count the rules in serialized output text.
///
/// A rule is a non-empty line that is not a `!` or `#` comment. The count
/// is defined over the final serialized output, never over intermediate
/// per-source line sets.
pub fn count_rules(text: &str) -> usize {
    text.lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('!') && !trimmed.starts_with('#')
        })
        .count()
}

/// Write bytes atomically: temp file in the same directory, then rename.
///
/// A crash mid-write never leaves a corrupt file at `path`; a concurrent
/// reader sees either the previous content or the full new content.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let fail = |e: std::io::Error| Error::Serialize {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(fail)?;
        }
    }

    let mut temp_os = path.as_os_str().to_owned();
    temp_os.push(".tmp");
    let temp_path = PathBuf::from(temp_os);

    let mut temp_file = fs::File::create(&temp_path).map_err(fail)?;
    temp_file.write_all(data).map_err(fail)?;
    temp_file.sync_all().map_err(fail)?;
    drop(temp_file);

    fs::rename(&temp_path, path).map_err(fail)?;
    Ok(())
}
