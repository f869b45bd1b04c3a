//! Parsing for OData `$search` expressions.
//!
//! This crate turns the text of a `$search` query option into a [`QueryToken`] tree:
//!
//! - **Words**: `rust` - a search term
//! - **Phrases**: `"error handling"` - a literal, operators inside are not interpreted
//! - **AND**: `rust AND async`, or just `rust async` - both must match
//! - **OR**: `rust OR golang` - alternatives
//! - **NOT**: `NOT deprecated` - must not match
//! - **Grouping**: `(a OR b) c` - precedence control
//!
//! Operators are recognized only in their uppercase spelling. Nesting is bounded by the
//! parser's maximum depth, and every error reports a character offset into the input.
//!
//! # Example
//!
//! ```
//! use odata_search::{QueryToken, SearchParser};
//!
//! let expr = SearchParser::new(50).parse("(A OR BC) AND DEF").unwrap();
//! assert_eq!(
//!     expr,
//!     QueryToken::and(
//!         QueryToken::or(QueryToken::literal("A"), QueryToken::literal("BC")),
//!         QueryToken::literal("DEF"),
//!     )
//! );
//! ```

#![warn(missing_docs)]

mod ast;
mod error;
mod lexer;
mod parser;

pub use ast::{BinaryOperatorKind, QueryToken, QueryTokenKind, UnaryOperatorKind};
pub use error::SearchError;
pub use lexer::{Lexer, Token, TokenKind, tokenize};
pub use parser::{DEFAULT_MAX_DEPTH, MAX_SUPPORTED_DEPTH, SearchParser, parse};
