//! Search expression parser.
//!
//! Parses a token stream into a [`QueryToken`] tree using recursive descent.
//!
//! # Grammar
//!
//! ```text
//! search_expr → or_expr
//! or_expr     → and_expr ("OR" and_expr)*
//! and_expr    → unary (["AND"] unary)*
//! unary       → "NOT" unary | primary
//! primary     → "(" search_expr ")" | WORD | PHRASE
//! ```
//!
//! # Precedence (highest to lowest)
//!
//! 1. Grouping: `(...)`
//! 2. Negation: `NOT`
//! 3. AND (explicit keyword or implicit, between adjacent operands)
//! 4. OR
//!
//! Both binary operators are left-associative: `a b c` is `(a AND b) AND c`.
//!
//! # Depth limit
//!
//! Every grammar rule increments a nesting counter on entry. Once the counter exceeds the
//! configured maximum, parsing stops with [`SearchError::LimitExceeded`]. Conjunction and
//! disjunction chains are folded iteratively, so the depth of each folded node is checked
//! against the same maximum.

use tracing::debug;

use crate::{
    ast::{BinaryOperatorKind, QueryToken},
    error::SearchError,
    lexer::{Lexer, TokenKind},
};

/// Maximum nesting depth used by [`SearchParser::default`].
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// Largest nesting depth a [`SearchParser`] will honor.
///
/// Sized so that a parse at this depth fits comfortably in a 2 MiB thread stack, including
/// unoptimized builds. Larger requested limits are clamped to this value.
pub const MAX_SUPPORTED_DEPTH: usize = 1000;

/// Parser for `$search` expressions with a fixed nesting limit.
///
/// The limit bounds two things: the nesting of grammar rules while parsing, and the depth of
/// the returned tree. The second bound also applies to flat chains, so with the default limit
/// of 50 a query of 51 adjacent words (`w0 w1 ... w50`) is rejected with
/// [`SearchError::LimitExceeded`] even though it contains no parentheses. Some OData services
/// fold chains without checking the result and do accept such a query.
///
/// ```
/// use odata_search::{SearchError, SearchParser};
///
/// let words: Vec<String> = (0..51).map(|i| format!("w{i}")).collect();
/// let err = SearchParser::default().parse(&words.join(" ")).unwrap_err();
/// assert_eq!(err, SearchError::LimitExceeded { max_depth: 50 });
/// ```
///
/// The parser holds no per-call state and can be shared freely between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParser {
    /// Maximum nesting depth.
    max_depth: usize,
}

impl SearchParser {
    /// Creates a parser that rejects expressions nested deeper than `max_depth`.
    ///
    /// A single word already nests four grammar rules deep, so limits below four reject
    /// every input. Limits above [`MAX_SUPPORTED_DEPTH`] are clamped to it.
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.min(MAX_SUPPORTED_DEPTH),
        }
    }

    /// Returns the configured maximum nesting depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Parses a search expression into its syntax tree.
    pub fn parse(&self, input: &str) -> Result<QueryToken, SearchError> {
        debug!(
            max_depth = self.max_depth,
            len = input.len(),
            "parsing search expression"
        );

        let result = Parser::new(input, self.max_depth).parse();
        match &result {
            Ok(_) => debug!("parsed search expression"),
            Err(err) => debug!(position = ?err.position(), error = %err, "search expression rejected"),
        }
        result
    }
}

impl Default for SearchParser {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

/// A parsed subtree along with its depth.
struct Node {
    /// The subtree.
    token: QueryToken,
    /// Depth of `token`, a leaf being 1.
    depth: usize,
}

impl Node {
    /// Wraps a leaf.
    fn leaf(token: QueryToken) -> Self {
        Self { token, depth: 1 }
    }
}

/// Recursive descent parser state for a single expression.
struct Parser<'a> {
    /// The original input string.
    input: &'a str,
    /// Token source.
    lexer: Lexer<'a>,
    /// Maximum nesting depth.
    max_depth: usize,
    /// Current nesting depth.
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `input`.
    fn new(input: &'a str, max_depth: usize) -> Self {
        Self {
            input,
            lexer: Lexer::new(input),
            max_depth,
            depth: 0,
        }
    }

    /// Parses the whole input into a single expression.
    fn parse(mut self) -> Result<QueryToken, SearchError> {
        let expr = self.parse_or_expr()?;

        let (kind, offset) = self.peek()?;
        if kind != TokenKind::End {
            return Err(SearchError::syntax_error(offset, self.input));
        }

        Ok(expr.token)
    }

    /// Parses: or_expr → and_expr ("OR" and_expr)*
    fn parse_or_expr(&mut self) -> Result<Node, SearchError> {
        self.enter()?;
        let mut left = self.parse_and_expr()?;

        while self.peek()?.0 == TokenKind::Or {
            self.advance()?; // consume OR
            let right = self.parse_and_expr()?;
            left = self.combine(BinaryOperatorKind::Or, left, right)?;
        }

        self.leave();
        Ok(left)
    }

    /// Parses: and_expr → unary (["AND"] unary)*
    fn parse_and_expr(&mut self) -> Result<Node, SearchError> {
        self.enter()?;
        let mut left = self.parse_unary()?;

        loop {
            match self.peek()?.0 {
                TokenKind::And => {
                    self.advance()?; // consume AND
                }
                kind if can_start_unary(kind) => {}
                _ => break,
            }
            let right = self.parse_unary()?;
            left = self.combine(BinaryOperatorKind::And, left, right)?;
        }

        self.leave();
        Ok(left)
    }

    /// Parses: unary → "NOT" unary | primary
    fn parse_unary(&mut self) -> Result<Node, SearchError> {
        self.enter()?;

        let node = if self.peek()?.0 == TokenKind::Not {
            self.advance()?; // consume NOT
            let operand = self.parse_unary()?;
            let depth = self.check_depth(operand.depth + 1)?;
            Node {
                token: QueryToken::not(operand.token),
                depth,
            }
        } else {
            self.parse_primary()?
        };

        self.leave();
        Ok(node)
    }

    /// Parses: primary → "(" search_expr ")" | WORD | PHRASE
    fn parse_primary(&mut self) -> Result<Node, SearchError> {
        self.enter()?;

        let (kind, offset) = self.peek()?;
        let node = match kind {
            TokenKind::OpenParen => {
                self.advance()?; // consume (
                let inner = self.parse_or_expr()?;

                let (kind, offset) = self.peek()?;
                if kind != TokenKind::CloseParen {
                    return Err(SearchError::close_paren_or_operator_expected(
                        offset, self.input,
                    ));
                }
                self.advance()?; // consume )
                inner
            }
            TokenKind::Word | TokenKind::Phrase => {
                let token = self.lexer.next_token()?;
                Node::leaf(QueryToken::literal(token.text.into_owned()))
            }
            TokenKind::And
            | TokenKind::Or
            | TokenKind::Not
            | TokenKind::CloseParen
            | TokenKind::End => {
                return Err(SearchError::expression_expected(offset, self.input));
            }
        };

        self.leave();
        Ok(node)
    }

    /// Builds a binary node, enforcing the depth limit on the result.
    fn combine(
        &self,
        op: BinaryOperatorKind,
        left: Node,
        right: Node,
    ) -> Result<Node, SearchError> {
        let depth = self.check_depth(1 + left.depth.max(right.depth))?;
        Ok(Node {
            token: QueryToken::binary(op, left.token, right.token),
            depth,
        })
    }

    /// Returns `depth` if it is within the limit.
    fn check_depth(&self, depth: usize) -> Result<usize, SearchError> {
        if depth > self.max_depth {
            return Err(self.limit_exceeded());
        }
        Ok(depth)
    }

    /// Enters a grammar rule.
    fn enter(&mut self) -> Result<(), SearchError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(self.limit_exceeded());
        }
        Ok(())
    }

    /// Leaves a grammar rule.
    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Builds the depth limit error.
    fn limit_exceeded(&self) -> SearchError {
        debug!(max_depth = self.max_depth, "search expression too deeply nested");
        SearchError::LimitExceeded {
            max_depth: self.max_depth,
        }
    }

    /// Returns the kind and offset of the current token without consuming it.
    fn peek(&mut self) -> Result<(TokenKind, usize), SearchError> {
        let token = self.lexer.peek()?;
        Ok((token.kind, token.offset))
    }

    /// Consumes the current token.
    fn advance(&mut self) -> Result<(), SearchError> {
        self.lexer.next_token()?;
        Ok(())
    }
}

/// Checks if a token of this kind can start a unary expression.
fn can_start_unary(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Not | TokenKind::OpenParen | TokenKind::Word | TokenKind::Phrase
    )
}

/// Parses a search expression with the default depth limit.
pub fn parse(input: &str) -> Result<QueryToken, SearchError> {
    SearchParser::default().parse(input)
}
