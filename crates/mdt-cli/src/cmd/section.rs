use super::{load_config, LoadedTicket};
use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use mdt_core::{mutate_section, resolve_section, SectionOperation, TitleExtractor};
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Subcommand)]
pub enum SectionSubcommand {
    /// Print the content of one section
    Get {
        key: String,
        /// Heading text, or a hierarchical path such as "Description / Problem"
        query: String,
    },

    /// Replace, append to, or prepend to one section
    Set {
        key: String,
        query: String,
        /// replace, append or prepend
        #[arg(long, default_value = "replace")]
        op: String,
        /// New text for the section
        #[arg(long, conflicts_with = "file")]
        content: Option<String>,
        /// Read the new text from a file
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

pub fn run(root: &Path, subcmd: SectionSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        SectionSubcommand::Get { key, query } => get(root, &key, &query, json),
        SectionSubcommand::Set {
            key,
            query,
            op,
            content,
            file,
        } => {
            let text = match (content, file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                (None, None) => anyhow::bail!("provide the new text with --content or --file"),
            };
            set(root, &key, &query, &op, &text, json)
        }
    }
}

// ---------------------------------------------------------------------------
// get
// ---------------------------------------------------------------------------

fn get(root: &Path, key: &str, query: &str, json: bool) -> anyhow::Result<()> {
    let cfg = load_config(root)?;
    let loaded = LoadedTicket::load(root, &cfg, key)?;
    let section = resolve_section(&loaded.ticket.body, query)?;

    if json {
        return print_json(&serde_json::json!({
            "key": loaded.key.to_string(),
            "section": section,
        }));
    }

    println!("{}", section.header_text);
    if !section.content.is_empty() {
        println!();
        println!("{}", section.content);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// set
// ---------------------------------------------------------------------------

fn set(
    root: &Path,
    key: &str,
    query: &str,
    op: &str,
    text: &str,
    json: bool,
) -> anyhow::Result<()> {
    let operation = SectionOperation::from_str(op)?;
    let cfg = load_config(root)?;
    let mut loaded = LoadedTicket::load(root, &cfg, key)?;
    let titles = TitleExtractor::from_config(&cfg);
    let previous_title = loaded.title(root, &titles);

    let section = resolve_section(&loaded.ticket.body, query)?;
    loaded.ticket.body = mutate_section(&loaded.ticket.body, &section, operation, text)?;
    let written = loaded.save()?;

    if written {
        titles.invalidate(root, &loaded.path);
    }
    let title = loaded.title(root, &titles);

    if json {
        return print_json(&serde_json::json!({
            "key": loaded.key.to_string(),
            "section": section.header_text,
            "operation": operation.as_str(),
            "written": written,
            "title": title,
            "title_changed": title != previous_title,
        }));
    }

    if written {
        println!("{}: {} {}", loaded.key, operation, section.header_text);
    } else {
        println!("{}: {} unchanged", loaded.key, section.header_text);
    }
    Ok(())
}
