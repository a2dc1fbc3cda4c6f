use super::{load_config, LoadedTicket};
use crate::output::print_json;
use mdt_core::TitleExtractor;
use std::path::Path;

pub fn run(root: &Path, key: &str, json: bool) -> anyhow::Result<()> {
    let cfg = load_config(root)?;
    let loaded = LoadedTicket::load(root, &cfg, key)?;
    let title = loaded.title(root, &TitleExtractor::from_config(&cfg));

    if json {
        return print_json(&serde_json::json!({
            "key": loaded.key.to_string(),
            "title": title,
        }));
    }
    println!("{title}");
    Ok(())
}
