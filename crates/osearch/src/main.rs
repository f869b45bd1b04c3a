//! Command-line interface for the `osearch` tool.

use std::process::ExitCode;

use clap::Parser;
use osearch::{
    cli::{
        CommandContext,
        args::{Cli, Commands},
        commands,
    },
    logging,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // `init` must work even when an existing config file is invalid.
    let ctx = if matches!(cli.command, Commands::Init(_)) {
        CommandContext::load_cwd_only()
    } else {
        CommandContext::load()
    };
    let ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &ctx)
}
