pub mod config;
pub mod section;
pub mod sections;
pub mod show;
pub mod status;
pub mod title;

use anyhow::Context;
use mdt_core::config::Config;
use mdt_core::paths;
use mdt_core::ticket::{Ticket, TicketKey};
use mdt_core::TitleExtractor;
use std::path::{Path, PathBuf};

/// A ticket loaded from disk together with what is needed to write it back.
pub struct LoadedTicket {
    pub key: TicketKey,
    pub path: PathBuf,
    pub ticket: Ticket,
}

impl LoadedTicket {
    pub fn load(root: &Path, cfg: &Config, key: &str) -> anyhow::Result<Self> {
        let key = TicketKey::parse(key)?;
        let path = paths::find_ticket_file(root, cfg, &key)?;
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let ticket =
            Ticket::parse(&text).with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(Self { key, path, ticket })
    }

    /// Write the ticket back atomically. Returns true if the file changed.
    pub fn save(&self) -> anyhow::Result<bool> {
        let text = self.ticket.render();
        let written = mdt_core::io::persist_document(&self.path, &text)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(written)
    }

    pub fn title(&self, root: &Path, titles: &TitleExtractor) -> String {
        titles.extract_title(root, &self.path, None)
    }
}

pub fn load_config(root: &Path) -> anyhow::Result<Config> {
    Config::load(root).with_context(|| {
        format!(
            "failed to load {}",
            paths::config_path(root).display()
        )
    })
}
