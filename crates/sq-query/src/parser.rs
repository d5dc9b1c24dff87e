//! Query parser.
//!
//! Builds a [`Query`] by recursive descent directly over the input string, trying the
//! anchored matchers from [`crate::matcher`] at each grammar position.
//!
//! # Grammar
//!
//! ```text
//! query      → clause*
//! clause     → prefix? field_op? (TERM | "(" query ")") connective?
//! prefix     → "+" | "-" | NOT
//! field_op   → FIELD OPERATOR | OPERATOR
//! connective → AND | OR
//! ```
//!
//! # Buckets
//!
//! An unmarked clause goes to the mode's default bucket (optional in normal mode,
//! required in greedy mode). A connective written between two clauses applies to
//! both of them: AND promotes optional clauses to required, OR demotes required
//! clauses to optional, and OR next to an excluded clause is an error. AND and OR
//! cannot be mixed at one level without parentheses.

use log::{debug, trace};

use crate::{
    ast::{Operator, Prefix, Query, Quote, SubQuery, Term},
    error::{QueryError, QueryErrorKind},
    matcher::{self, Connective, Sign},
    options::{ParseMode, ParseOptions},
};

/// Recursive descent parser over a single input string.
struct Parser<'a> {
    /// The full input, used to turn remaining slices into byte positions.
    input: &'a str,
    /// Parse options.
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    /// Creates a parser for the given input.
    fn new(input: &'a str, options: ParseOptions) -> Self {
        Self { input, options }
    }

    /// Byte position of a remaining-input slice within the full input.
    fn offset(&self, rest: &str) -> usize {
        self.input.len() - rest.len()
    }

    /// Creates an error located at the start of `rest`.
    fn error_at(&self, kind: QueryErrorKind, rest: &str) -> QueryError {
        QueryError::new(kind, self.offset(rest))
    }

    /// Parses the whole input.
    fn parse(self) -> Result<Query, QueryError> {
        let start = self.input.trim_start();
        let (query, rest) = self.parse_query(start, "", Operator::Field, 0)?;

        if !rest.is_empty() {
            return Err(self.error_at(QueryErrorKind::UnexpectedClose, rest));
        }

        Ok(query)
    }

    /// Parses clauses until the input ends or a `)` is ahead.
    ///
    /// Unqualified clauses take `parent_field` and `parent_op`. Returns the query and
    /// the unconsumed input, which is empty or starts with `)`.
    fn parse_query(
        &self,
        input: &'a str,
        parent_field: &'a str,
        parent_op: Operator,
        depth: usize,
    ) -> Result<(Query, &'a str), QueryError> {
        let default_prefix = self.options.mode.default_prefix();
        let mut query = Query::default();
        let mut rest = input;
        let mut pending: Option<Connective> = None;

        while !rest.is_empty() && !rest.starts_with(')') {
            let clause_start = rest;

            let mut prefix = default_prefix;
            if let Some((sign, r)) = matcher::sign(rest) {
                prefix = match sign {
                    Sign::Plus => Prefix::Required,
                    Sign::Minus => Prefix::Excluded,
                };
                rest = r;
            } else if let Some(r) = matcher::not_word(rest) {
                prefix = Prefix::Excluded;
                rest = r;
            }

            let mut field = parent_field;
            let mut operator = parent_op;
            let mut has_operator = false;
            if let Some((field_op, r)) = matcher::field_operator(rest) {
                if !field_op.field.is_empty() {
                    if !parent_field.is_empty() {
                        return Err(self.error_at(
                            QueryErrorKind::FieldInsideField {
                                field: field_op.field.to_string(),
                                parent: parent_field.to_string(),
                            },
                            rest,
                        ));
                    }
                    field = field_op.field;
                }
                operator = field_op.operator;
                has_operator = true;
                rest = r;
            }

            let clause = if let Some((term, r)) = matcher::term(rest) {
                rest = r;
                SubQuery::Term(Term {
                    quote: term.quote,
                    operator,
                    field: field.to_string(),
                    value: term.value.to_string(),
                })
            } else if let Some(r) = matcher::open_paren(rest) {
                if depth >= self.options.max_depth {
                    return Err(self.error_at(
                        QueryErrorKind::TooDeep {
                            limit: self.options.max_depth,
                        },
                        rest,
                    ));
                }
                let (nested, r) = self.parse_query(r, field, operator, depth + 1)?;
                rest = matcher::close_paren(r)
                    .ok_or_else(|| self.error_at(QueryErrorKind::NoMatchingParen, r))?;
                SubQuery::group(nested)
            } else if has_operator {
                // `field:` with nothing after it matches the empty value, kept quoted so
                // the rendered `field:""` cannot absorb the next clause.
                SubQuery::Term(
                    Term::new("")
                        .field(field)
                        .operator(operator)
                        .quote(Quote::Double),
                )
            } else {
                return Err(self.error_at(
                    QueryErrorKind::UnexpectedInput {
                        found: rest.to_string(),
                    },
                    rest,
                ));
            };

            let mut post = None;
            if let Some((connective, r)) = matcher::connective(rest) {
                post = Some(connective);
                rest = r;
            }

            if let (Some(pre), Some(post)) = (pending, post)
                && pre != post
            {
                return Err(self.error_at(QueryErrorKind::MixedConnectives, clause_start));
            }
            let effective = pending.or(post);
            pending = post;

            match (prefix, effective) {
                (Prefix::Required, Some(Connective::Or)) => prefix = Prefix::Optional,
                (Prefix::Optional, Some(Connective::And)) => prefix = Prefix::Required,
                (Prefix::Excluded, Some(Connective::Or)) => {
                    return Err(self.error_at(QueryErrorKind::ExcludedOrOperand, clause_start));
                }
                _ => {}
            }

            trace!("clause {prefix:?} {clause} at depth {depth}");
            query.push(prefix, clause);
        }

        if !query.has_positive() {
            return Err(self.error_at(QueryErrorKind::NoPositiveValue, input));
        }

        Ok((query, rest))
    }
}

/// Parses a query with explicit options.
pub fn parse_with(input: &str, options: &ParseOptions) -> Result<Query, QueryError> {
    match Parser::new(input, *options).parse() {
        Ok(query) => {
            debug!("parsed {input:?} ({}) as {query}", options.mode);
            Ok(query)
        }
        Err(err) => {
            debug!("failed to parse {input:?}: {}", err.kind);
            Err(err.with_query(input))
        }
    }
}

/// Parses a query string; unmarked clauses are optional.
///
/// # Example
///
/// ```
/// let query = sq_query::parse("a AND (b OR c) AND NOT d").unwrap();
/// assert_eq!(query.to_string(), "+:a +(:b :c) -:d");
/// ```
pub fn parse(input: &str) -> Result<Query, QueryError> {
    parse_with(input, &ParseOptions::default())
}

/// Parses a query string; unmarked clauses are required.
///
/// # Example
///
/// ```
/// let query = sq_query::parse_greedy("a b").unwrap();
/// assert_eq!(query.to_string(), "+:a +:b");
/// ```
pub fn parse_greedy(input: &str) -> Result<Query, QueryError> {
    parse_with(input, &ParseOptions::default().with_mode(ParseMode::Greedy))
}
