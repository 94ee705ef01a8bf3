//! Filename sanitization for user-supplied upload names.
//!
//! The rules follow the well-known "secure filename" recipe: the result is a
//! flat ASCII name that is safe to join onto a storage directory.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static STRIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.\-]").expect("valid filename regex"));

const WINDOWS_DEVICE_FILES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Returns a flattened, ASCII-only version of `name`.
///
/// Accented letters are folded to their base letter (NFKD) before anything
/// non-ASCII is dropped, so `naïve café.py` becomes `naive_cafe.py`. The result can be empty (e.g. for `"../"` or a name made only of non-ASCII
/// characters); callers must treat an empty string as an invalid filename.
pub fn secure_filename(name: &str) -> String {
    let ascii: String = name
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let stripped = STRIP_RE.replace_all(&joined, "");
    let trimmed = stripped.trim_matches(|c| c == '.' || c == '_');

    if trimmed.is_empty() {
        return String::new();
    }

    let stem = trimmed.split('.').next().unwrap_or_default();
    if WINDOWS_DEVICE_FILES
        .iter()
        .any(|dev| dev.eq_ignore_ascii_case(stem))
    {
        format!("_{trimmed}")
    } else {
        trimmed.to_string()
    }
}

/// Name of the executable the packager produces for `filename`:
/// the text before the last `.` plus `suffix`.
pub fn artifact_name(filename: &str, suffix: &str) -> String {
    let stem = match filename.rfind('.') {
        Some(idx) if idx > 0 => &filename[..idx],
        _ => filename,
    };
    format!("{stem}{suffix}")
}
