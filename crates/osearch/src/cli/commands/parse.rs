//! Implementation of `osearch parse`.

use std::process::ExitCode;

use odata_search::SearchParser;
use odata_search_config::OutputFormat;
use tracing::debug;

use crate::cli::{
    args::ParseCommand,
    context::CommandContext,
    output::{ParseOutcome, output_parse_results},
};

/// Parses each expression and prints its syntax tree.
pub fn run(ctx: &CommandContext, cmd: &ParseCommand) -> ExitCode {
    let max_depth = cmd.max_depth.unwrap_or(ctx.config.parser.max_depth);
    let parser = SearchParser::new(max_depth);

    let format = if cmd.json {
        OutputFormat::Json
    } else if cmd.tree {
        OutputFormat::Tree
    } else {
        ctx.config.output.format
    };
    debug!(max_depth, ?format, count = cmd.expressions.len(), "parsing expressions");

    let outcomes: Vec<ParseOutcome<'_>> = cmd
        .expressions
        .iter()
        .map(|expression| ParseOutcome {
            expression: expression.as_str(),
            result: parser.parse(expression),
        })
        .collect();

    output_parse_results(&outcomes, format)
}
