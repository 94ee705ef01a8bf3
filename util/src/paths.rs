use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Create a directory (and all parents) if it doesn't exist, and return the path.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let p = path.as_ref();
    fs::create_dir_all(p)?;
    Ok(p.to_path_buf())
}

/// Ensure the parent directory of a *file path* exists (no-op if none).
pub fn ensure_parent_dir<P: AsRef<Path>>(file_path: P) -> io::Result<()> {
    if let Some(parent) = file_path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Resolve a configured folder. Relative paths are taken against current_dir().
pub fn resolve_root(folder: &str) -> PathBuf {
    let p = PathBuf::from(folder);
    if p.is_absolute() {
        p
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(p)
    }
}

/// {UPLOAD_FOLDER}/{upload_id}/{filename}
///
/// Each upload gets its own folder so concurrent uploads of the same name never
/// overwrite a source that is still being packaged.
pub fn upload_path(upload_root: &Path, upload_id: &str, filename: &str) -> PathBuf {
    upload_root.join(upload_id).join(filename)
}

/// {EXECUTABLE_FOLDER}/{filename}
pub fn artifact_path(executable_root: &Path, filename: &str) -> PathBuf {
    executable_root.join(filename)
}
