use mdt_core::paths::CONFIG_FILE;
use std::path::{Path, PathBuf};

/// Resolve the ticket project root.
///
/// Priority:
/// 1. `--root` flag / `MDT_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `.mdt-config.yaml`
/// 3. Walk upward from `cwd` looking for `.git/`
/// 4. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    discover_root(&cwd)
}

fn discover_root(start: &Path) -> PathBuf {
    if let Some(dir) = find_upward(start, |d| d.join(CONFIG_FILE).is_file()) {
        return dir;
    }
    if let Some(dir) = find_upward(start, |d| d.join(".git").is_dir()) {
        return dir;
    }
    start.to_path_buf()
}

fn find_upward(start: &Path, is_root: impl Fn(&Path) -> bool) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| is_root(dir))
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_wins() {
        let dir = TempDir::new().unwrap();
        let result = resolve_root(Some(dir.path()));
        assert_eq!(result, dir.path());
    }

    #[test]
    fn finds_config_file_above_cwd() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "project:\n  code: MDT\n").unwrap();
        let subdir = dir.path().join("docs/CRs");
        std::fs::create_dir_all(&subdir).unwrap();

        assert_eq!(discover_root(&subdir), dir.path());
    }

    #[test]
    fn config_file_beats_git_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".git")).unwrap();
        let project = dir.path().join("tickets");
        std::fs::create_dir_all(project.join("docs")).unwrap();
        std::fs::write(project.join(CONFIG_FILE), "").unwrap();

        assert_eq!(discover_root(&project.join("docs")), project);
    }

    #[test]
    fn falls_back_to_git_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".git")).unwrap();
        let subdir = dir.path().join("src/deep");
        std::fs::create_dir_all(&subdir).unwrap();

        assert_eq!(discover_root(&subdir), dir.path());
    }
}
