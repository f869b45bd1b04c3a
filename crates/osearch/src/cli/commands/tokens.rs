//! Implementation of `osearch tokens`.

use std::process::ExitCode;

use odata_search::tokenize;

use crate::cli::{args::TokensCommand, output::output_tokens};

/// Prints the token stream of an expression.
pub fn run(cmd: &TokensCommand) -> ExitCode {
    match tokenize(&cmd.expression) {
        Ok(tokens) => output_tokens(&tokens, cmd.json),
        Err(e) => {
            eprintln!("{}", e.format_with_context(&cmd.expression));
            ExitCode::FAILURE
        }
    }
}
