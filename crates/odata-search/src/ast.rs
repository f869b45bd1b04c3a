//! Search expression abstract syntax tree.
//!
//! Represents parsed `$search` expressions before translation to backend predicates.

use std::fmt;

/// Binary operators that combine two search expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BinaryOperatorKind {
    /// Both operands must match.
    And,
    /// At least one operand must match.
    Or,
}

/// Unary operators applied to a single search expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum UnaryOperatorKind {
    /// The operand must not match.
    Not,
}

/// The variant of a [`QueryToken`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryTokenKind {
    /// A [`QueryToken::StringLiteral`].
    StringLiteral,
    /// A [`QueryToken::BinaryOperator`].
    BinaryOperator,
    /// A [`QueryToken::UnaryOperator`].
    UnaryOperator,
}

/// A node of a parsed search expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum QueryToken {
    /// A search word or the content of a quoted phrase. Never empty.
    StringLiteral {
        /// The literal text.
        value: String,
    },

    /// A conjunction or disjunction of two expressions.
    BinaryOperator {
        /// The operator.
        op: BinaryOperatorKind,
        /// Left operand.
        left: Box<Self>,
        /// Right operand.
        right: Box<Self>,
    },

    /// A negated expression.
    UnaryOperator {
        /// The operator.
        op: UnaryOperatorKind,
        /// The operand.
        operand: Box<Self>,
    },
}

impl QueryToken {
    /// Creates a string literal node.
    pub fn literal(value: impl Into<String>) -> Self {
        Self::StringLiteral {
            value: value.into(),
        }
    }

    /// Creates a binary operator node.
    pub fn binary(op: BinaryOperatorKind, left: Self, right: Self) -> Self {
        Self::BinaryOperator {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Creates an `AND` node.
    pub fn and(left: Self, right: Self) -> Self {
        Self::binary(BinaryOperatorKind::And, left, right)
    }

    /// Creates an `OR` node.
    pub fn or(left: Self, right: Self) -> Self {
        Self::binary(BinaryOperatorKind::Or, left, right)
    }

    /// Creates a `NOT` node.
    pub fn not(operand: Self) -> Self {
        Self::UnaryOperator {
            op: UnaryOperatorKind::Not,
            operand: Box::new(operand),
        }
    }

    /// Returns the variant of this node.
    pub fn kind(&self) -> QueryTokenKind {
        match self {
            Self::StringLiteral { .. } => QueryTokenKind::StringLiteral,
            Self::BinaryOperator { .. } => QueryTokenKind::BinaryOperator,
            Self::UnaryOperator { .. } => QueryTokenKind::UnaryOperator,
        }
    }

    /// Returns the literal text for a string literal node.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::StringLiteral { value } => Some(value),
            _ => None,
        }
    }

    /// Returns the operator and operands for a binary node.
    pub fn as_binary(&self) -> Option<(BinaryOperatorKind, &Self, &Self)> {
        match self {
            Self::BinaryOperator { op, left, right } => Some((*op, left, right)),
            _ => None,
        }
    }

    /// Returns the operator and operand for a unary node.
    pub fn as_unary(&self) -> Option<(UnaryOperatorKind, &Self)> {
        match self {
            Self::UnaryOperator { op, operand } => Some((*op, operand)),
            _ => None,
        }
    }

    /// Returns the depth of the tree rooted at this node; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Self::StringLiteral { .. } => 1,
            Self::BinaryOperator { left, right, .. } => 1 + left.depth().max(right.depth()),
            Self::UnaryOperator { operand, .. } => 1 + operand.depth(),
        }
    }

    /// Formats the expression as a tree structure with the given indentation level.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        match self {
            Self::StringLiteral { value } => writeln!(f, "{prefix}{value:?}"),
            Self::BinaryOperator { op, left, right } => {
                writeln!(f, "{prefix}{op:?}")?;
                left.fmt_tree(f, indent + 1)?;
                right.fmt_tree(f, indent + 1)
            }
            Self::UnaryOperator { op, operand } => {
                writeln!(f, "{prefix}{op:?}")?;
                operand.fmt_tree(f, indent + 1)
            }
        }
    }
}

impl fmt::Display for QueryToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}
