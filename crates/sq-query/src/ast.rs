//! Query tree.
//!
//! A parsed query is a three-bucket collection of clauses. Each clause is either a
//! leaf [`Term`] or a parenthesized [`SubQuery::Group`] owning its own nested [`Query`].
//! The `Display` implementations produce the canonical textual form.

use std::fmt;

use serde::Serialize;

/// Quoting character that wrapped a term value in the input.
///
/// Only affects rendering; matching semantics are identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Quote {
    /// Bare value.
    #[default]
    None,
    /// `'value'`
    Single,
    /// `"value"`
    Double,
}

impl Quote {
    /// Returns the delimiter written on both sides of the value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Single => "'",
            Self::Double => "\"",
        }
    }
}

/// Relation between a field and a term value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// `field:value`
    #[default]
    Field,
    /// `field#a,b,c`
    Csv,
    /// `field~regex`
    Regex,
    /// `field!~regex`
    RegexNeg,
    /// `field==value`
    Equal,
    /// `field!=value`
    NotEqual,
    /// `field>value`
    Greater,
    /// `field>=value`
    GreaterEqual,
    /// `field<value`
    Less,
    /// `field<=value`
    LessEqual,
}

impl Operator {
    /// Canonical token for this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Field => ":",
            Self::Csv => "#",
            Self::Regex => "~",
            Self::RegexNeg => "!~",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::LessEqual => "<=",
        }
    }

    /// Maps an operator token (canonical or synonym) to an operator.
    pub(crate) fn from_token(token: &str) -> Option<Self> {
        let op = match token {
            ":" => Self::Field,
            "#" => Self::Csv,
            "~" | "=~" => Self::Regex,
            "!~" => Self::RegexNeg,
            "==" | "=" => Self::Equal,
            "!=" => Self::NotEqual,
            ">" => Self::Greater,
            ">=" => Self::GreaterEqual,
            "<" => Self::Less,
            "<=" => Self::LessEqual,
            _ => return None,
        };
        Some(op)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The bucket a clause lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Prefix {
    /// Must match (`+`, or AND-connected).
    Required,
    /// May match (unmarked, or OR-connected).
    Optional,
    /// Must not match (`-` or `NOT`).
    Excluded,
}

impl Prefix {
    /// Marker written before a clause in canonical form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "+",
            Self::Optional => "",
            Self::Excluded => "-",
        }
    }
}

/// A leaf clause: `field`, operator and literal value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Term {
    /// Quoting used in the input.
    pub quote: Quote,
    /// Relation between field and value.
    pub operator: Operator,
    /// Field name; empty for the default field.
    pub field: String,
    /// Literal value, without quotes.
    pub value: String,
}

impl Term {
    /// Creates an unquoted `:` term on the default field.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Sets the field name.
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    /// Sets the operator.
    pub fn operator(mut self, operator: Operator) -> Self {
        self.operator = operator;
        self
    }

    /// Sets the quote kind.
    pub fn quote(mut self, quote: Quote) -> Self {
        self.quote = quote;
        self
    }

    /// Quote kind used when rendering.
    ///
    /// An empty value, or a bare value starting with a quote character, is wrapped in
    /// quotes so it reads back as one value. A bare value holding both quote characters
    /// has no safe form and stays bare.
    fn rendered_quote(&self) -> Quote {
        match self.quote {
            Quote::None if self.value.is_empty() => Quote::Double,
            Quote::None if self.value.starts_with(['"', '\'']) => {
                if !self.value.contains('"') {
                    Quote::Double
                } else if !self.value.contains('\'') {
                    Quote::Single
                } else {
                    Quote::None
                }
            }
            quote => quote,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let q = self.rendered_quote().as_str();
        write!(f, "{}{}{q}{}{q}", self.field, self.operator, self.value)
    }
}

/// One clause of a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SubQuery {
    /// A leaf clause.
    Term(Term),
    /// A parenthesized group.
    Group {
        /// The nested query, owned by this clause.
        query: Box<Query>,
    },
}

impl SubQuery {
    /// Wraps a nested query as a group clause.
    pub fn group(query: Query) -> Self {
        Self::Group {
            query: Box::new(query),
        }
    }

    /// Returns the leaf term, if this is not a group.
    pub fn as_term(&self) -> Option<&Term> {
        match self {
            Self::Term(term) => Some(term),
            Self::Group { .. } => None,
        }
    }

    /// Returns the nested query, if this is a group.
    pub fn as_group(&self) -> Option<&Query> {
        match self {
            Self::Term(_) => None,
            Self::Group { query } => Some(query),
        }
    }
}

impl From<Term> for SubQuery {
    fn from(term: Term) -> Self {
        Self::Term(term)
    }
}

impl fmt::Display for SubQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Term(term) => write!(f, "{term}"),
            Self::Group { query } => write!(f, "({query})"),
        }
    }
}

/// A parsed query: clauses partitioned into required, optional and excluded buckets.
///
/// Order within a bucket follows the input. Queries are built by the parser (or with
/// [`Query::with`]) and are read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Query {
    /// Clauses that must match.
    required: Vec<SubQuery>,
    /// Clauses that may match.
    optional: Vec<SubQuery>,
    /// Clauses that must not match.
    excluded: Vec<SubQuery>,
}

impl Query {
    /// Appends a clause to the bucket named by `prefix`.
    pub(crate) fn push(&mut self, prefix: Prefix, clause: SubQuery) {
        match prefix {
            Prefix::Required => self.required.push(clause),
            Prefix::Optional => self.optional.push(clause),
            Prefix::Excluded => self.excluded.push(clause),
        }
    }

    /// Builder form of [`Query::push`].
    pub fn with(mut self, prefix: Prefix, clause: impl Into<SubQuery>) -> Self {
        self.push(prefix, clause.into());
        self
    }

    /// Clauses that must match.
    pub fn required(&self) -> &[SubQuery] {
        &self.required
    }

    /// Clauses that may match.
    pub fn optional(&self) -> &[SubQuery] {
        &self.optional
    }

    /// Clauses that must not match.
    pub fn excluded(&self) -> &[SubQuery] {
        &self.excluded
    }

    /// Total number of top-level clauses.
    pub fn len(&self) -> usize {
        self.required.len() + self.optional.len() + self.excluded.len()
    }

    /// True when the query has no clauses at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when at least one clause is required or optional.
    pub fn has_positive(&self) -> bool {
        !self.required.is_empty() || !self.optional.is_empty()
    }

    /// Iterates over top-level clauses in canonical order with their bucket.
    pub fn iter(&self) -> impl Iterator<Item = (Prefix, &SubQuery)> {
        self.required
            .iter()
            .map(|c| (Prefix::Required, c))
            .chain(self.optional.iter().map(|c| (Prefix::Optional, c)))
            .chain(self.excluded.iter().map(|c| (Prefix::Excluded, c)))
    }

    /// Formats the query in canonical form, e.g. `+:a +(:b :c) -:d`.
    pub fn to_query_string(&self) -> String {
        self.to_string()
    }

    /// Formats the query as an indented tree, one clause per line.
    pub fn to_tree_string(&self) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, 0);
        out
    }

    /// Appends the tree form of this query at the given indentation level.
    fn write_tree(&self, out: &mut String, indent: usize) {
        let pad = "  ".repeat(indent);
        for (prefix, clause) in self.iter() {
            let bucket = match prefix {
                Prefix::Required => "Required",
                Prefix::Optional => "Optional",
                Prefix::Excluded => "Excluded",
            };
            match clause {
                SubQuery::Term(term) => {
                    out.push_str(&format!(
                        "{pad}{bucket} Term(field={:?}, op={}, quote={:?}, value={:?})\n",
                        term.field, term.operator, term.quote, term.value
                    ));
                }
                SubQuery::Group { query } => {
                    out.push_str(&format!("{pad}{bucket} Group\n"));
                    query.write_tree(out, indent + 1);
                }
            }
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (prefix, clause)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}{clause}", prefix.as_str())?;
        }
        Ok(())
    }
}
