use super::{load_config, LoadedTicket};
use crate::output::print_json;
use mdt_core::status::allowed_next;
use mdt_core::Status;
use std::path::Path;
use std::str::FromStr;

pub fn run(root: &Path, key: &str, requested: Option<&str>, json: bool) -> anyhow::Result<()> {
    let cfg = load_config(root)?;
    let mut loaded = LoadedTicket::load(root, &cfg, key)?;

    let Some(requested) = requested else {
        return show(&loaded, json);
    };

    let previous = loaded.ticket.meta.status.clone();
    let requested = Status::from_str(requested)?;
    let changed = loaded.ticket.set_status(requested)?;
    if changed {
        loaded.save()?;
    }

    if json {
        return print_json(&serde_json::json!({
            "key": loaded.key.to_string(),
            "from": previous,
            "to": requested,
            "changed": changed,
        }));
    }

    if changed {
        println!("{}: {} -> {}", loaded.key, previous, requested);
    } else {
        println!("{}: already {}", loaded.key, requested);
    }
    Ok(())
}

fn show(loaded: &LoadedTicket, json: bool) -> anyhow::Result<()> {
    let current = loaded.ticket.status()?;
    let next = allowed_next(current);

    if json {
        return print_json(&serde_json::json!({
            "key": loaded.key.to_string(),
            "status": current,
            "next": next,
        }));
    }

    println!("{}: {}", loaded.key, current);
    let names: Vec<&str> = next.iter().map(|s| s.as_str()).collect();
    println!("next: {}", names.join(", "));
    Ok(())
}
