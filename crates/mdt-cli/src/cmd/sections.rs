use super::{load_config, LoadedTicket};
use crate::output::{print_json, print_table};
use mdt_core::Outline;
use std::path::Path;

pub fn run(root: &Path, key: &str, json: bool) -> anyhow::Result<()> {
    let cfg = load_config(root)?;
    let loaded = LoadedTicket::load(root, &cfg, key)?;
    let outline = Outline::parse(&loaded.ticket.body);

    if json {
        let list: Vec<serde_json::Value> = outline
            .sections()
            .iter()
            .map(|s| {
                serde_json::json!({
                    "header": s.header_text,
                    "level": s.header_level,
                    "path": outline.path_names(s),
                    "start_line": s.start_line,
                    "end_line": s.end_line,
                })
            })
            .collect();
        return print_json(&serde_json::json!({
            "key": loaded.key.to_string(),
            "sections": list,
        }));
    }

    if outline.is_empty() {
        println!("{}: no sections", loaded.key);
        return Ok(());
    }

    let rows: Vec<Vec<String>> = outline
        .sections()
        .iter()
        .map(|s| {
            vec![
                s.header_level.to_string(),
                outline.path_display(s),
                format!("{}-{}", s.start_line + 1, s.end_line),
            ]
        })
        .collect();
    print_table(&["LEVEL", "SECTION", "LINES"], rows);
    Ok(())
}
