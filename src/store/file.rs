use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Replaces `path` with `contents` via a temp file in the same directory and a
/// rename, so readers see either the old file or the new one.
///
/// Missing parent directories are created. An existing file keeps its
/// permissions.
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory: {}", parent.display()))?;

    let mut tmp = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temp file in {}", parent.display()))?;
    tmp.write_all(contents)
        .with_context(|| format!("Failed to write temp file {}", tmp.path().display()))?;
    tmp.as_file().sync_all()?;

    match fs::metadata(path) {
        Ok(existing) => fs::set_permissions(tmp.path(), existing.permissions())?,
        Err(_) => set_default_permissions(tmp.path())?,
    }

    tmp.persist(path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    debug!(bytes = contents.len(), "Atomically wrote {}", path.display());
    Ok(())
}

// Temp files are created 0600, which is too tight for a bundled resource.
#[cfg(unix)]
fn set_default_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o644))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_default_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
