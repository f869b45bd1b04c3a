//! Error types for `$search` expression parsing.
//!
//! All failures surface as a single [`SearchError`] enum. Every variant that refers to a
//! location carries a 0-based character offset into the original input, and most carry the
//! input itself so diagnostics can be rendered without access to the caller's copy.

use thiserror::Error;

/// A syntax or policy error raised while tokenizing or parsing a search expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A parenthesized group was not closed and no continuing operator was found.
    #[error("')' or operator expected at position {position} in '{input}'.")]
    CloseParenOrOperatorExpected {
        /// Character offset of the offending token.
        position: usize,
        /// The original search expression.
        input: String,
    },

    /// An operand was required but absent.
    #[error("Expression expected at position {position} in '{input}'.")]
    ExpressionExpected {
        /// Character offset where the operand was expected.
        position: usize,
        /// The original search expression.
        input: String,
    },

    /// An empty quoted phrase was encountered.
    #[error("An identifier was expected at position {position}.")]
    IdentifierExpected {
        /// Character offset of the empty phrase.
        position: usize,
    },

    /// Nesting exceeded the configured maximum depth.
    #[error("The recursion limit has been exceeded (max depth {max_depth}).")]
    LimitExceeded {
        /// The configured maximum depth.
        max_depth: usize,
    },

    /// A complete expression was followed by a token that cannot continue it.
    #[error("Syntax error at position {position} in '{input}'.")]
    SyntaxError {
        /// Character offset of the unexpected token.
        position: usize,
        /// The original search expression.
        input: String,
    },
}

impl SearchError {
    /// Creates a `CloseParenOrOperatorExpected` error.
    pub fn close_paren_or_operator_expected(position: usize, input: &str) -> Self {
        Self::CloseParenOrOperatorExpected {
            position,
            input: input.to_string(),
        }
    }

    /// Creates an `ExpressionExpected` error.
    pub fn expression_expected(position: usize, input: &str) -> Self {
        Self::ExpressionExpected {
            position,
            input: input.to_string(),
        }
    }

    /// Creates a `SyntaxError` error.
    pub fn syntax_error(position: usize, input: &str) -> Self {
        Self::SyntaxError {
            position,
            input: input.to_string(),
        }
    }

    /// Returns the character offset of the error, if it has one.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::CloseParenOrOperatorExpected { position, .. }
            | Self::ExpressionExpected { position, .. }
            | Self::IdentifierExpected { position }
            | Self::SyntaxError { position, .. } => Some(*position),
            Self::LimitExceeded { .. } => None,
        }
    }

    /// Returns the original input attached to the error, if any.
    pub fn input(&self) -> Option<&str> {
        match self {
            Self::CloseParenOrOperatorExpected { input, .. }
            | Self::ExpressionExpected { input, .. }
            | Self::SyntaxError { input, .. } => Some(input),
            Self::IdentifierExpected { .. } | Self::LimitExceeded { .. } => None,
        }
    }

    /// Returns a suggestion for resolving the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::CloseParenOrOperatorExpected { .. } => {
                Some("Add a closing parenthesis ) to match the opening one")
            }
            Self::ExpressionExpected { .. } => {
                Some("AND, OR and NOT need a term, phrase, or group to apply to")
            }
            Self::IdentifierExpected { .. } => {
                Some("Remove the empty phrase or put a word between the quotes")
            }
            Self::LimitExceeded { .. } => Some(
                "Reduce the nesting of parentheses and NOT operators, or split long chains of terms",
            ),
            Self::SyntaxError { .. } => Some("Remove the unmatched closing parenthesis"),
        }
    }

    /// Formats the error with the input and a position indicator.
    ///
    /// `query` supplies the input for variants that do not carry it themselves.
    pub fn format_with_context(&self, query: &str) -> String {
        let mut result = format!("search syntax error: {self}\n");
        let query = self.input().unwrap_or(query);
        result.push_str(&format!("  {query}\n"));
        if let Some(pos) = self.position() {
            let clamped = pos.min(query.chars().count());
            result.push_str(&format!("  {}^\n", " ".repeat(clamped)));
        }
        if let Some(suggestion) = self.suggestion() {
            result.push_str(&format!("hint: {suggestion}"));
        }
        result
    }
}
