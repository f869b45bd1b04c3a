//! Clap argument definitions for the `osearch` CLI.

use clap::{ArgAction, Args, Parser, Subcommand};
use odata_search::MAX_SUPPORTED_DEPTH;

/// Parses a maximum nesting depth in `1..=MAX_SUPPORTED_DEPTH`.
fn parse_max_depth(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(depth) if (1..=MAX_SUPPORTED_DEPTH).contains(&depth) => Ok(depth),
        Ok(_) => Err(format!(
            "max depth must be between 1 and {MAX_SUPPORTED_DEPTH}"
        )),
        Err(e) => Err(e.to_string()),
    }
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "osearch")]
#[command(about = "Parse and inspect OData $search expressions")]
pub struct Cli {
    /// Verbosity level (-v for debug logs, -vv for trace logs)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `osearch parse`.
#[derive(Args, Debug, Clone)]
pub struct ParseCommand {
    /// Search expressions
    #[arg(required = true)]
    pub expressions: Vec<String>,

    /// Maximum nesting depth [default: 50, or the configured value]
    #[arg(long, value_parser = parse_max_depth)]
    pub max_depth: Option<usize>,

    /// Output in JSON format
    #[arg(long, conflicts_with = "tree")]
    pub json: bool,

    /// Output as an indented tree
    #[arg(long)]
    pub tree: bool,
}

/// Arguments for `osearch tokens`.
#[derive(Args, Debug, Clone)]
pub struct TokensCommand {
    /// Search expression
    pub expression: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `osearch init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.osearch.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `osearch` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Parse expressions and print their syntax trees
    #[command(after_help = "\
SEARCH SYNTAX:
  word              Word must match
  w1 w2             Both words (implicit AND)
  w1 AND w2         Both words
  w1 OR w2          Either word
  NOT word          Word must NOT match
  \"a phrase\"        Literal phrase, operators inside are not interpreted
  (expr)            Grouping

Operators must be uppercase. NOT binds tighter than AND, which binds tighter than OR.

EXAMPLES:
  osearch parse 'rust async'
  osearch parse '(rust OR golang) AND NOT deprecated'
  osearch parse --json '\"error handling\" logging'")]
    Parse(ParseCommand),

    /// Show the token stream for an expression
    Tokens(TokensCommand),

    /// Initialize osearch configuration in current directory
    Init(InitCommand),

    /// Show configuration files and effective settings
    Config,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn max_depth_parser() {
        assert_eq!(parse_max_depth("12"), Ok(12));
        assert!(parse_max_depth("0").is_err());
        assert_eq!(parse_max_depth("1000"), Ok(MAX_SUPPORTED_DEPTH));
        assert!(parse_max_depth("1001").is_err());
        assert!(parse_max_depth("100000000").is_err());
        assert!(parse_max_depth("-3").is_err());
        assert!(parse_max_depth("deep").is_err());
    }

    #[test]
    fn parse_arguments() {
        let cli = Cli::try_parse_from(["osearch", "-v", "parse", "--max-depth", "9", "a b", "c"])
            .unwrap();
        assert_eq!(cli.verbose, 1);
        let Commands::Parse(cmd) = cli.command else {
            panic!("expected parse command");
        };
        assert_eq!(cmd.expressions, vec!["a b", "c"]);
        assert_eq!(cmd.max_depth, Some(9));
        assert!(!cmd.json);
    }

    #[test]
    fn json_conflicts_with_tree() {
        assert!(Cli::try_parse_from(["osearch", "parse", "--json", "--tree", "a"]).is_err());
    }
}
