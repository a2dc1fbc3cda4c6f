use crate::error::Result;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically write `data` to `path` through a tempfile in the same
/// directory, so readers never observe a half-written ticket.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Persist `text` at `path` unless the file already holds exactly that.
/// Returns true if the file was written.
pub fn persist_document(path: &Path, text: &str) -> Result<bool> {
    if path.exists() && std::fs::read_to_string(path)? == text {
        return Ok(false);
    }
    atomic_write(path, text.as_bytes())?;
    Ok(true)
}
