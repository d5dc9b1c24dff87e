//! Parser and canonical renderer for the sq search query language.
//!
//! The language is meant to be typed by people:
//!
//! - **Terms**: `rust` - a bare word
//! - **Phrases**: `"error handling"` or `'error handling'` - quoted, no escapes
//! - **Fields**: `title:guide`, `date>=2001`, `txt~'^foo'`, `Id#1,2,3`
//! - **Prefixes**: `+required`, `-excluded`, `NOT excluded`
//! - **Connectives**: `a AND b`, `a OR b`
//! - **Grouping**: `a AND (b OR c)`, `title:(a b)`
//!
//! Parsing produces a [`Query`] whose clauses are split into required, optional and
//! excluded buckets. Rendering a query with `Display` yields its canonical form.
//!
//! # Example
//!
//! ```
//! use sq_query::{parse, parse_greedy};
//!
//! let query = parse("+a +(b c) -d").unwrap();
//! assert_eq!(query.to_string(), "+:a +(:b :c) -:d");
//!
//! let query = parse_greedy("+a +(b c) -d").unwrap();
//! assert_eq!(query.to_string(), "+:a +(+:b +:c) -:d");
//! ```

#![warn(missing_docs)]

mod ast;
mod error;
mod matcher;
mod options;
mod parser;

pub use ast::{Operator, Prefix, Query, Quote, SubQuery, Term};
pub use error::{QueryError, QueryErrorKind};
pub use options::{DEFAULT_MAX_DEPTH, ParseMode, ParseOptions};
pub use parser::{parse, parse_greedy, parse_with};
