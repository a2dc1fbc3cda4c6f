use super::load_config;
use crate::output::print_json;
use clap::Subcommand;
use mdt_core::config::{ConfigWarning, WarnLevel};
use mdt_core::paths;
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Print the effective configuration and any warnings (default)
    Show,

    /// Validate the config for common mistakes
    Validate,
}

pub fn run(root: &Path, subcmd: Option<ConfigSubcommand>, json: bool) -> anyhow::Result<()> {
    match subcmd.unwrap_or(ConfigSubcommand::Show) {
        ConfigSubcommand::Show => show(root, json),
        ConfigSubcommand::Validate => validate(root, json),
    }
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = load_config(root)?;
    let warnings = config.validate(root);
    let source = paths::config_path(root);

    if json {
        return print_json(&serde_json::json!({
            "root": root.display().to_string(),
            "config_file": source.is_file().then(|| source.display().to_string()),
            "config": config,
            "tickets_dir": paths::tickets_dir(root, &config).display().to_string(),
            "warnings": warnings,
        }));
    }

    if source.is_file() {
        println!("# {}", source.display());
    } else {
        println!("# defaults ({} not found)", paths::CONFIG_FILE);
    }
    print!("{}", serde_yaml::to_string(&config)?);
    print_warnings(&warnings);
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = load_config(root)?;
    let warnings = config.validate(root);

    if json {
        print_json(&serde_json::json!({ "warnings": warnings }))?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        print_warnings(&warnings);
    }

    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("config validation found errors");
    }
    Ok(())
}

fn print_warnings(warnings: &[ConfigWarning]) {
    for w in warnings {
        let prefix = match w.level {
            WarnLevel::Warning => "warning",
            WarnLevel::Error => "error",
        };
        println!("[{prefix}] {}", w.message);
    }
}
