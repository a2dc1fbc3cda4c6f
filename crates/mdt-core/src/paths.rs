use crate::config::Config;
use crate::error::{MdtError, Result};
use crate::ticket::TicketKey;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File constants
// ---------------------------------------------------------------------------

pub const CONFIG_FILE: &str = ".mdt-config.yaml";
pub const TICKET_EXTENSION: &str = "md";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn tickets_dir(root: &Path, cfg: &Config) -> PathBuf {
    root.join(&cfg.project.tickets_path)
}

/// Ticket files (`*.md` whose name starts with a ticket key), sorted by key.
pub fn ticket_files(root: &Path, cfg: &Config) -> Result<Vec<(TicketKey, PathBuf)>> {
    let dir = tickets_dir(root, cfg);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for entry in std::fs::read_dir(&dir)? {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_file()
            || path.extension().and_then(|e| e.to_str()) != Some(TICKET_EXTENSION)
        {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if let Some(key) = TicketKey::from_filename(&name) {
            found.push((key, path));
        }
    }
    found.sort();
    Ok(found)
}

/// Locate the file for `key`: `KEY.md` or `KEY-<slug>.md` in the tickets
/// directory. Unpadded numbers in filenames (`MDT-7-x.md`) match too.
pub fn find_ticket_file(root: &Path, cfg: &Config, key: &TicketKey) -> Result<PathBuf> {
    ticket_files(root, cfg)?
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, p)| p)
        .ok_or_else(|| MdtError::TicketNotFound(key.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project() -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        let cfg = Config::new("MDT");
        let tickets = tickets_dir(dir.path(), &cfg);
        std::fs::create_dir_all(&tickets).unwrap();
        std::fs::write(tickets.join("MDT-012-improve-docs.md"), "x").unwrap();
        std::fs::write(tickets.join("MDT-003.md"), "x").unwrap();
        std::fs::write(tickets.join("MDT-004-notes.txt"), "x").unwrap();
        std::fs::write(tickets.join("README.md"), "x").unwrap();
        (dir, cfg)
    }

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/proj");
        assert_eq!(
            config_path(root),
            PathBuf::from("/tmp/proj/.mdt-config.yaml")
        );
        assert_eq!(
            tickets_dir(root, &Config::default()),
            PathBuf::from("/tmp/proj/docs/CRs")
        );
    }

    #[test]
    fn lists_only_keyed_markdown_files() {
        let (dir, cfg) = project();
        let keys: Vec<String> = ticket_files(dir.path(), &cfg)
            .unwrap()
            .into_iter()
            .map(|(k, _)| k.to_string())
            .collect();
        assert_eq!(keys, ["MDT-003", "MDT-012"]);
    }

    #[test]
    fn finds_ticket_by_key() {
        let (dir, cfg) = project();
        let key = TicketKey::parse("mdt-12").unwrap();
        let path = find_ticket_file(dir.path(), &cfg, &key).unwrap();
        assert!(path.ends_with("MDT-012-improve-docs.md"));

        let missing = TicketKey::parse("MDT-99").unwrap();
        assert!(matches!(
            find_ticket_file(dir.path(), &cfg, &missing),
            Err(MdtError::TicketNotFound(k)) if k == "MDT-099"
        ));
    }

    #[test]
    fn missing_tickets_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(ticket_files(dir.path(), &Config::default()).unwrap().is_empty());
    }
}
