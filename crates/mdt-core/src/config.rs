use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// TitleCacheConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleCacheConfig {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_ttl_secs() -> u64 {
    crate::title::DEFAULT_TITLE_TTL.as_secs()
}

impl Default for TitleCacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl TitleCacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

// ---------------------------------------------------------------------------
// ProjectConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Directory holding the ticket files, relative to the project root.
    #[serde(default = "default_tickets_path")]
    pub tickets_path: String,
}

fn default_tickets_path() -> String {
    "docs/CRs".to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            code: String::new(),
            name: None,
            tickets_path: default_tickets_path(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub title_cache: TitleCacheConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            project: ProjectConfig::default(),
            title_cache: TitleCacheConfig::default(),
        }
    }
}

impl Config {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            project: ProjectConfig {
                code: code.into(),
                ..ProjectConfig::default()
            },
            ..Self::default()
        }
    }

    /// Load `.mdt-config.yaml` from `root`; a project without one gets the
    /// defaults.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn validate(&self, root: &Path) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        let code = self.project.code.trim();
        if code.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "project.code is not set".to_string(),
            });
        } else if !code.chars().all(|c| c.is_ascii_alphabetic()) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "project.code '{code}' must contain letters only (tickets are keyed CODE-NUMBER)"
                ),
            });
        }

        if Path::new(&self.project.tickets_path).is_absolute() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "project.tickets_path '{}' must be relative to the project root",
                    self.project.tickets_path
                ),
            });
        } else if !paths::tickets_dir(root, self).is_dir() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "tickets directory not found: {}",
                    paths::tickets_dir(root, self).display()
                ),
            });
        }

        if self.title_cache.ttl_secs == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "title_cache.ttl_secs is 0; every title lookup re-reads its file"
                    .to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::new("MDT");
        let yaml = serde_yaml::to_string(&cfg).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.project.code, "MDT");
        assert_eq!(parsed.project.tickets_path, "docs/CRs");
        assert_eq!(parsed.title_cache.ttl_secs, 3600);
    }

    #[test]
    fn partial_yaml_uses_defaults() {
        let cfg: Config = serde_yaml::from_str("project:\n  code: API\n").unwrap();
        assert_eq!(cfg.version, 1);
        assert_eq!(cfg.project.tickets_path, "docs/CRs");
        assert_eq!(cfg.title_cache.ttl(), Duration::from_secs(3600));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert!(cfg.project.code.is_empty());
    }

    #[test]
    fn save_and_load() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::new("MDT");
        cfg.title_cache.ttl_secs = 120;
        cfg.save(dir.path()).unwrap();
        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.title_cache.ttl_secs, 120);
        assert_eq!(loaded.project.code, "MDT");
    }

    #[test]
    fn validate_clean_project() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("docs/CRs")).unwrap();
        assert!(Config::new("MDT").validate(dir.path()).is_empty());
    }

    #[test]
    fn validate_reports_problems() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::new("MD1");
        cfg.title_cache.ttl_secs = 0;
        let warnings = cfg.validate(dir.path());
        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().any(|w| w.message.contains("letters only")));
        assert!(warnings.iter().any(|w| w.message.contains("tickets directory not found")));
        assert!(warnings
            .iter()
            .any(|w| w.level == WarnLevel::Warning && w.message.contains("ttl_secs")));
    }

    #[test]
    fn validate_rejects_absolute_tickets_path() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::new("MDT");
        cfg.project.tickets_path = "/var/tickets".to_string();
        let warnings = cfg.validate(dir.path());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, WarnLevel::Error);
    }
}
