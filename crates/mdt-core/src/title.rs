//! Authoritative ticket titles.
//!
//! The title is the first `# ` heading of the body, falling back to the slug
//! part of a `CODE-NUMBER-slug.md` filename. Results are cached per
//! (project, file) and revalidated against the file's modification time and
//! a time-to-live.

use crate::config::Config;
use crate::ticket::split_frontmatter;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_TITLE_TTL: Duration = Duration::from_secs(60 * 60);

// ---------------------------------------------------------------------------
// DocumentSource
// ---------------------------------------------------------------------------

/// Read access to ticket files. The engine never writes through this.
pub trait DocumentSource: Send + Sync {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;
    fn modified(&self, path: &Path) -> std::io::Result<DateTime<Utc>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl DocumentSource for FsSource {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn modified(&self, path: &Path) -> std::io::Result<DateTime<Utc>> {
        Ok(std::fs::metadata(path)?.modified()?.into())
    }
}

// ---------------------------------------------------------------------------
// Cache types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TitleCacheKey {
    pub project: PathBuf,
    /// Path relative to `project` when it lives under it, as given otherwise.
    pub file: PathBuf,
}

impl TitleCacheKey {
    pub fn new(project_root: &Path, file_path: &Path) -> Self {
        let file = file_path
            .strip_prefix(project_root)
            .unwrap_or(file_path)
            .to_path_buf();
        Self {
            project: project_root.to_path_buf(),
            file,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleCacheEntry {
    pub title: String,
    /// Modification time of the file when the title was extracted; `None`
    /// when it could not be determined.
    pub file_modified: Option<DateTime<Utc>>,
    pub extracted_at: DateTime<Utc>,
}

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

// ---------------------------------------------------------------------------
// TitleExtractor
// ---------------------------------------------------------------------------

pub struct TitleExtractor {
    source: Box<dyn DocumentSource>,
    ttl: Duration,
    clock: Clock,
    cache: Mutex<HashMap<TitleCacheKey, TitleCacheEntry>>,
}

impl Default for TitleExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TitleExtractor {
    pub fn new() -> Self {
        Self::with_source(FsSource)
    }

    pub fn with_source(source: impl DocumentSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            ttl: DEFAULT_TITLE_TTL,
            clock: Box::new(Utc::now),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new().with_ttl(cfg.title_cache.ttl())
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Title for `file_path` (absolute, or relative to `project_root`).
    ///
    /// `content` skips the file read when the caller already has the text.
    /// An unreadable file falls back to the filename; this never fails.
    pub fn extract_title(
        &self,
        project_root: &Path,
        file_path: &Path,
        content: Option<&str>,
    ) -> String {
        let key = TitleCacheKey::new(project_root, file_path);
        let full_path = if file_path.is_absolute() {
            file_path.to_path_buf()
        } else {
            project_root.join(file_path)
        };

        let modified = match self.source.modified(&full_path) {
            Ok(m) => Some(m),
            Err(e) => {
                debug!(path = %full_path.display(), error = %e, "cannot stat ticket file");
                None
            }
        };

        if let Some(entry) = self.entries().get(&key) {
            if self.is_fresh(entry, modified) {
                debug!(file = %key.file.display(), "title cache hit");
                return entry.title.clone();
            }
        }

        let from_heading = match content {
            Some(text) => heading_title(split_frontmatter(text).1),
            None => match self.source.read_to_string(&full_path) {
                Ok(text) => heading_title(split_frontmatter(&text).1),
                Err(e) => {
                    warn!(
                        path = %full_path.display(),
                        error = %e,
                        "cannot read ticket file; deriving title from filename"
                    );
                    None
                }
            },
        };
        let title = from_heading.unwrap_or_else(|| title_from_filename(file_path));

        debug!(file = %key.file.display(), %title, "title cache store");
        self.entries().insert(
            key,
            TitleCacheEntry {
                title: title.clone(),
                file_modified: modified,
                extracted_at: (self.clock)(),
            },
        );
        title
    }

    /// Drop the cached title for one file, typically right after writing it.
    pub fn invalidate(&self, project_root: &Path, file_path: &Path) {
        self.entries()
            .remove(&TitleCacheKey::new(project_root, file_path));
    }

    pub fn clear(&self) {
        self.entries().clear();
    }

    pub fn cached(&self, project_root: &Path, file_path: &Path) -> Option<TitleCacheEntry> {
        self.entries()
            .get(&TitleCacheKey::new(project_root, file_path))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn is_fresh(&self, entry: &TitleCacheEntry, current_modified: Option<DateTime<Utc>>) -> bool {
        let age = ((self.clock)() - entry.extracted_at)
            .to_std()
            .unwrap_or(Duration::ZERO);
        if age > self.ttl {
            return false;
        }
        match (entry.file_modified, current_modified) {
            (Some(cached), Some(current)) => cached >= current,
            _ => false,
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<TitleCacheKey, TitleCacheEntry>> {
        // Entries are inserted whole, so a poisoned map is still consistent.
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// ---------------------------------------------------------------------------
// Title parsing
// ---------------------------------------------------------------------------

static TITLE_RE: OnceLock<Regex> = OnceLock::new();

fn title_re() -> &'static Regex {
    TITLE_RE.get_or_init(|| Regex::new(r"^# (.+)$").unwrap())
}

static KEYED_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn keyed_name_re() -> &'static Regex {
    KEYED_NAME_RE.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9]*-\d+-(.+)$").unwrap())
}

fn title_heading(line: &str) -> Option<&str> {
    let caps = title_re().captures(line.trim())?;
    let text = caps.get(1)?.as_str().trim();
    (!text.is_empty()).then_some(text)
}

/// Text of the first strict `# ` heading in `content`.
pub fn heading_title(content: &str) -> Option<String> {
    content.lines().find_map(title_heading).map(str::to_string)
}

/// Title derived from a filename: the slug of `CODE-NUMBER-slug.md`, or the
/// whole stem, with `-` and `_` turned into spaces.
pub fn title_from_filename(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = keyed_name_re()
        .captures(&stem)
        .and_then(|c| c.get(1))
        .map_or(stem.as_str(), |m| m.as_str());
    base.replace(|c: char| c == '-' || c == '_', " ").trim().to_string()
}

/// Body text for rendering under a separately displayed title: the first
/// `# ` heading is removed and later ones are demoted to `## `.
pub fn transform_for_display(content: &str) -> String {
    let mut title_seen = false;
    let mut out: Vec<String> = Vec::new();
    for line in content.split('\n') {
        if title_heading(line).is_some() {
            if !title_seen {
                title_seen = true;
                continue;
            }
            out.push(format!("#{}", line.trim_start()));
        } else {
            out.push(line.to_string());
        }
    }
    out.join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
