//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use odata_search::{QueryToken, SearchError, Token};
use odata_search_config::OutputFormat;
use serde::Serialize;

/// The outcome of parsing one expression.
pub struct ParseOutcome<'a> {
    /// The expression as given on the command line.
    pub expression: &'a str,
    /// The syntax tree or the error that stopped parsing.
    pub result: Result<QueryToken, SearchError>,
}

/// JSON form of a [`SearchError`].
#[derive(Serialize)]
struct JsonError {
    /// Error kind name.
    kind: &'static str,
    /// Human readable message.
    message: String,
    /// Character offset, when the error has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<usize>,
}

impl From<&SearchError> for JsonError {
    fn from(err: &SearchError) -> Self {
        Self {
            kind: error_kind(err),
            message: err.to_string(),
            position: err.position(),
        }
    }
}

/// JSON output for a single expression.
#[derive(Serialize)]
struct JsonParseResult<'a> {
    /// The original expression.
    expression: &'a str,
    /// The syntax tree, if parsing succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    ast: Option<&'a QueryToken>,
    /// The error, if parsing failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonError>,
}

/// JSON output for `osearch parse`.
#[derive(Serialize)]
struct JsonParseOutput<'a> {
    /// Results in command line order.
    results: Vec<JsonParseResult<'a>>,
}

/// Returns the stable name of an error kind.
pub fn error_kind(err: &SearchError) -> &'static str {
    match err {
        SearchError::CloseParenOrOperatorExpected { .. } => "close_paren_or_operator_expected",
        SearchError::ExpressionExpected { .. } => "expression_expected",
        SearchError::IdentifierExpected { .. } => "identifier_expected",
        SearchError::LimitExceeded { .. } => "limit_exceeded",
        SearchError::SyntaxError { .. } => "syntax_error",
    }
}

/// Outputs parse results, returning failure if any expression was rejected.
pub fn output_parse_results(outcomes: &[ParseOutcome<'_>], format: OutputFormat) -> ExitCode {
    let all_ok = outcomes.iter().all(|o| o.result.is_ok());

    match format {
        OutputFormat::Json => {
            let output = JsonParseOutput {
                results: outcomes
                    .iter()
                    .map(|o| JsonParseResult {
                        expression: o.expression,
                        ast: o.result.as_ref().ok(),
                        error: o.result.as_ref().err().map(JsonError::from),
                    })
                    .collect(),
            };
            if let Err(code) = print_json(&output) {
                return code;
            }
        }
        OutputFormat::Tree => {
            let show_headers = outcomes.len() > 1;
            for outcome in outcomes {
                if show_headers {
                    println!("{}:", outcome.expression);
                }
                match &outcome.result {
                    Ok(expr) => print!("{expr}"),
                    Err(err) => eprintln!("{}", err.format_with_context(outcome.expression)),
                }
                if show_headers {
                    println!();
                }
            }
        }
    }

    if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Outputs a token stream as a table or JSON.
pub fn output_tokens(tokens: &[Token<'_>], json: bool) -> ExitCode {
    if json {
        return match print_json(&tokens) {
            Ok(()) => ExitCode::SUCCESS,
            Err(code) => code,
        };
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Offset", "Kind", "Text"]);
    for token in tokens {
        table.add_row(vec![
            Cell::new(token.offset),
            Cell::new(format!("{:?}", token.kind)),
            Cell::new(&token.text),
        ]);
    }
    println!("{table}");
    ExitCode::SUCCESS
}

/// Pretty-prints a value as JSON on stdout.
fn print_json<T: Serialize>(value: &T) -> Result<(), ExitCode> {
    match serde_json::to_string_pretty(value) {
        Ok(json_str) => {
            println!("{json_str}");
            Ok(())
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            Err(ExitCode::FAILURE)
        }
    }
}
