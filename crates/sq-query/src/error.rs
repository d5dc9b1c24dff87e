//! Error types for query parsing.
//!
//! Every failure aborts the whole parse. [`QueryError`] carries the kind of failure,
//! the byte position in the input where it was detected, and the input itself so the
//! error can be displayed with a position indicator.

use std::{error, fmt};

use thiserror::Error;

/// The specific kind of query error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryErrorKind {
    /// A field was given inside a group that already has a field.
    #[error("field inside field: '{field}' inside '{parent}'")]
    FieldInsideField {
        /// The inner field.
        field: String,
        /// The field of the enclosing group.
        parent: String,
    },

    /// A group was opened but never closed.
    #[error("no matching )")]
    NoMatchingParen,

    /// Input that matches none of the grammar alternatives.
    #[error("unexpected string in query: '{found}'")]
    UnexpectedInput {
        /// The unparsed remainder.
        found: String,
    },

    /// A `)` with no group to close.
    #[error("unexpected ) in query")]
    UnexpectedClose,

    /// AND and OR used at the same grouping level.
    #[error("cannot mix AND/OR; use parenthesis")]
    MixedConnectives,

    /// An OR operand carrying `-` or `NOT`.
    #[error("operands of OR cannot have - or NOT prefix")]
    ExcludedOrOperand,

    /// A query or group with no required or optional clause.
    #[error("no positive value in query")]
    NoPositiveValue,

    /// Groups nested beyond the configured limit.
    #[error("query nested too deeply (limit is {limit})")]
    TooDeep {
        /// The configured maximum depth.
        limit: usize,
    },
}

/// A query parse error with position information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    /// The kind of error that occurred.
    pub kind: QueryErrorKind,
    /// Byte position in the query where the error was detected.
    pub position: usize,
    /// The original query string (if available).
    pub query: Option<String>,
}

impl QueryError {
    /// Creates an error at a byte position.
    pub fn new(kind: QueryErrorKind, position: usize) -> Self {
        Self {
            kind,
            position,
            query: None,
        }
    }

    /// Sets the query string for this error.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Returns the kind of error.
    pub fn kind(&self) -> &QueryErrorKind {
        &self.kind
    }

    /// Returns the byte position where the error was detected.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the error message without context.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Returns a suggestion for common errors.
    pub fn suggestion(&self) -> Option<&'static str> {
        match &self.kind {
            QueryErrorKind::NoMatchingParen => {
                Some("Add a closing parenthesis ) to match the opening one")
            }
            QueryErrorKind::UnexpectedClose => Some("Remove the ) or add a matching ("),
            QueryErrorKind::MixedConnectives => {
                Some("Group alternatives explicitly, e.g. 'a AND (b OR c)'")
            }
            QueryErrorKind::ExcludedOrOperand => {
                Some("Exclusions must be AND-connected, e.g. 'a AND NOT b'")
            }
            QueryErrorKind::NoPositiveValue => {
                Some("Add at least one term that is not excluded")
            }
            QueryErrorKind::FieldInsideField { .. } => {
                Some("A group introduced by 'field:' cannot name another field")
            }
            QueryErrorKind::UnexpectedInput { .. } | QueryErrorKind::TooDeep { .. } => None,
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "query syntax error: {}", self.kind)?;

        if let Some(query) = &self.query {
            writeln!(f, "  {query}")?;
            let clamped = self.position.min(query.len());
            let column = query
                .get(..clamped)
                .map_or(clamped, |prefix| prefix.chars().count());
            writeln!(f, "  {}^", " ".repeat(column))?;
        }

        if let Some(suggestion) = self.suggestion() {
            write!(f, "hint: {suggestion}")?;
        }

        Ok(())
    }
}

impl error::Error for QueryError {}
