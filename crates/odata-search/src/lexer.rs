//! Search expression lexer (tokenizer).
//!
//! Scans a `$search` expression into position-annotated tokens on demand. The lexer keeps a
//! single token of lookahead and never backtracks.

use std::{borrow::Cow, iter::Peekable, str::CharIndices};

use tracing::trace;

use crate::error::SearchError;

/// The lexical category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TokenKind {
    /// The `AND` keyword.
    And,
    /// The `OR` keyword.
    Or,
    /// The `NOT` keyword.
    Not,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// A quoted phrase.
    Phrase,
    /// A bare search word.
    Word,
    /// End of input.
    End,
}

/// A token of a search expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token<'a> {
    /// Lexical category.
    pub kind: TokenKind,
    /// Matched text. Phrases exclude the surrounding quotes and have escapes resolved.
    pub text: Cow<'a, str>,
    /// Character offset of the first character of the token.
    pub offset: usize,
}

impl<'a> Token<'a> {
    /// Creates a token.
    fn new(kind: TokenKind, text: impl Into<Cow<'a, str>>, offset: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            offset,
        }
    }
}

/// Forward-only scanner over a search expression.
pub struct Lexer<'a> {
    /// The original input string.
    input: &'a str,
    /// Character iterator with one-character lookahead.
    chars: Peekable<CharIndices<'a>>,
    /// Character offset of the next unread character.
    position: usize,
    /// The scanned but not yet consumed token.
    lookahead: Option<Token<'a>>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer positioned at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            position: 0,
            lookahead: None,
        }
    }

    /// Returns the input being scanned.
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Returns the next token without consuming it.
    pub fn peek(&mut self) -> Result<&Token<'a>, SearchError> {
        let token = match self.lookahead.take() {
            Some(token) => token,
            None => self.scan()?,
        };
        Ok(self.lookahead.insert(token))
    }

    /// Consumes and returns the next token.
    ///
    /// Once the input is exhausted every call returns an `End` token at the input length.
    pub fn next_token(&mut self) -> Result<Token<'a>, SearchError> {
        match self.lookahead.take() {
            Some(token) => Ok(token),
            None => self.scan(),
        }
    }

    /// Scans one token from the current position.
    fn scan(&mut self) -> Result<Token<'a>, SearchError> {
        self.skip_whitespace();

        let offset = self.position;
        let token = match self.chars.peek().copied() {
            None => Token::new(TokenKind::End, "", offset),
            Some((_, '(')) => {
                self.advance();
                Token::new(TokenKind::OpenParen, "(", offset)
            }
            Some((_, ')')) => {
                self.advance();
                Token::new(TokenKind::CloseParen, ")", offset)
            }
            Some((_, '"')) => self.read_phrase(offset)?,
            Some((start, _)) => self.read_word_or_keyword(start, offset),
        };

        trace!(kind = ?token.kind, offset = token.offset, "scanned token");
        Ok(token)
    }

    /// Reads a quoted phrase starting at the opening quote.
    fn read_phrase(&mut self, offset: usize) -> Result<Token<'a>, SearchError> {
        let input = self.input;
        self.advance(); // consume opening quote
        let content_start = self.byte_position();

        // Only allocated once an escape sequence is seen.
        let mut unescaped: Option<String> = None;

        loop {
            let Some((idx, ch)) = self.advance() else {
                return Err(SearchError::expression_expected(self.position, input));
            };

            match ch {
                '"' => {
                    let text = match unescaped {
                        Some(s) => Cow::Owned(s),
                        None => Cow::Borrowed(&input[content_start..idx]),
                    };
                    if text.is_empty() {
                        return Err(SearchError::IdentifierExpected { position: offset });
                    }
                    return Ok(Token::new(TokenKind::Phrase, text, offset));
                }
                '\\' if matches!(self.chars.peek(), Some(&(_, '"' | '\\'))) => {
                    let buf =
                        unescaped.get_or_insert_with(|| input[content_start..idx].to_string());
                    if let Some((_, escaped)) = self.advance() {
                        buf.push(escaped);
                    }
                }
                _ => {
                    if let Some(buf) = unescaped.as_mut() {
                        buf.push(ch);
                    }
                }
            }
        }
    }

    /// Reads a maximal run of word characters, classifying reserved words.
    fn read_word_or_keyword(&mut self, start: usize, offset: usize) -> Token<'a> {
        while let Some(&(_, ch)) = self.chars.peek() {
            if is_delimiter(ch) {
                break;
            }
            self.advance();
        }

        let word = &self.input[start..self.byte_position()];
        let kind = match word {
            "AND" => TokenKind::And,
            "OR" => TokenKind::Or,
            "NOT" => TokenKind::Not,
            _ => TokenKind::Word,
        };
        Token::new(kind, word, offset)
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(&(_, ch)) = self.chars.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    /// Byte index of the next unread character.
    fn byte_position(&mut self) -> usize {
        self.chars.peek().map_or(self.input.len(), |&(idx, _)| idx)
    }

    /// Advances to the next character.
    fn advance(&mut self) -> Option<(usize, char)> {
        let next = self.chars.next();
        if next.is_some() {
            self.position += 1;
        }
        next
    }
}

/// Characters that end a word.
fn is_delimiter(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '(' | ')' | '"')
}

/// Tokenizes a search expression, returning every token before the end of input.
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, SearchError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token()?;
        if token.kind == TokenKind::End {
            return Ok(tokens);
        }
        tokens.push(token);
    }
}
