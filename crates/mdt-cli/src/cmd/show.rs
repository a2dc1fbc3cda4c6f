use super::{load_config, LoadedTicket};
use crate::output::{print_json, ticket_header};
use mdt_core::{ticket_summary, transform_for_display, TitleExtractor};
use std::path::Path;

pub fn run(root: &Path, key: &str, json: bool) -> anyhow::Result<()> {
    let cfg = load_config(root)?;
    let loaded = LoadedTicket::load(root, &cfg, key)?;
    let title = loaded.title(root, &TitleExtractor::from_config(&cfg));
    let body = transform_for_display(&loaded.ticket.body);
    let summary = ticket_summary(&loaded.ticket.body, Some(&title));
    let meta = &loaded.ticket.meta;

    if json {
        return print_json(&serde_json::json!({
            "key": loaded.key.to_string(),
            "title": title,
            "status": meta.status,
            "type": meta.ticket_type,
            "priority": meta.priority,
            "body": body.trim(),
            "summary": summary,
        }));
    }

    let key = loaded.key.to_string();
    println!("{}", ticket_header(&key, meta));
    println!("{title}");
    let body = body.trim();
    if !body.is_empty() {
        println!();
        println!("{body}");
    }
    println!();
    println!("{summary}");
    Ok(())
}
