use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{Result, SymhuffError};

/// Extension appended to compressed files.
pub const COMPRESSED_EXTENSION: &str = "hc";

/// Marker inserted into the file stem of reconstructed output.
pub const RECONSTRUCTED_MARKER: &str = "_uncompressed";

/// `notes.txt` -> `notes.txt.hc`
pub fn compressed_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".");
    name.push(COMPRESSED_EXTENSION);
    PathBuf::from(name)
}

pub fn has_compressed_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(COMPRESSED_EXTENSION))
}

/// `notes.txt.hc` -> `notes_uncompressed.txt`
///
/// Fails with `InvalidArgument` unless the path ends in `.hc` and names a
/// file underneath it.
pub fn decompressed_path(container: &Path) -> Result<PathBuf> {
    if !has_compressed_extension(container) {
        return Err(SymhuffError::InvalidArgument(format!(
            "'{}' does not end in .{COMPRESSED_EXTENSION}",
            container.display()
        )));
    }
    let original = container.with_extension("");
    let stem = original
        .file_stem()
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| {
            SymhuffError::InvalidArgument(format!(
                "'{}' has no file name before .{COMPRESSED_EXTENSION}",
                container.display()
            ))
        })?;

    let mut name = OsString::from(stem);
    name.push(RECONSTRUCTED_MARKER);
    if let Some(ext) = original.extension() {
        name.push(".");
        name.push(ext);
    }
    Ok(original.with_file_name(name))
}

/// Where to reconstruct `container` when no output path was given.
///
/// Uses [`decompressed_path`] for `.hc` containers. Any other name gets the
/// marker appended whole: `out.bin` -> `out.bin_uncompressed`.
pub fn reconstructed_path(container: &Path) -> PathBuf {
    if let Ok(path) = decompressed_path(container) {
        return path;
    }
    let mut name = container.as_os_str().to_owned();
    name.push(RECONSTRUCTED_MARKER);
    PathBuf::from(name)
}
