//! Implementation of `osearch config`.

use std::process::ExitCode;

use odata_search_config::{discover_config_files, is_global_config};

use crate::cli::context::CommandContext;

/// Lists discovered config files and prints the effective settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let files = discover_config_files(&ctx.cwd);
    if files.is_empty() {
        println!("# no configuration files found, using defaults");
    } else {
        println!("# configuration files (highest precedence first):");
        for path in &files {
            let marker = if is_global_config(path) { " (global)" } else { "" };
            println!("#   {}{marker}", path.display());
        }
    }
    println!();

    match ctx.config.settings_to_toml() {
        Ok(rendered) => {
            print!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
