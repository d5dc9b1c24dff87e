//! Anchored pattern matchers for the query language.
//!
//! There is no separate lexer pass: the parser tries these matchers against the front
//! of the remaining input. Every matcher is anchored at the start, and on success
//! returns its captures together with the rest of the input after the match and any
//! trailing whitespace.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::ast::{Operator, Quote};

/// Operator tokens, longest first so `>=` wins over `>` and `=~` over `=`.
const OPERATORS: &str = r"==|<=|>=|!=|=~|!~|[:=<>~#]";

/// Operators that admit an empty field.
const OPERATORS_NO_FIELD: &str = r"=~|!~|[~:#]";

/// Compiles a pattern that is part of the fixed grammar.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern:?}: {e}"))
}

/// `+` or `-`.
static SIGN: LazyLock<Regex> = LazyLock::new(|| compile(r"^([+-])\s*"));

/// Word-form negation and its synonyms.
static NOT_WORD: LazyLock<Regex> = LazyLock::new(|| compile(r"^(?:NOT|PAS|NICHT|NON)\b\s*"));

/// `"field"op`
static FIELD_DOUBLE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r#"^"(\w+)"({OPERATORS})\s*"#)));

/// `'field'op`
static FIELD_SINGLE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"^'(\w+)'({OPERATORS})\s*")));

/// `field op`
static FIELD_BARE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"^(\w+)({OPERATORS})\s*")));

/// Operator with no field in front of it.
static FIELD_NONE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"^({OPERATORS_NO_FIELD})\s*")));

/// `"value"`, no escapes.
static TERM_DOUBLE: LazyLock<Regex> = LazyLock::new(|| compile(r#"^"([^"]*)"\s*"#));

/// `'value'`, no escapes.
static TERM_SINGLE: LazyLock<Regex> = LazyLock::new(|| compile(r"^'([^']*)'\s*"));

/// Run of non-whitespace, non-parenthesis characters.
static TERM_BARE: LazyLock<Regex> = LazyLock::new(|| compile(r"^([^\s()]+)\s*"));

/// `(`
static OPEN: LazyLock<Regex> = LazyLock::new(|| compile(r"^\(\s*"));

/// `)`
static CLOSE: LazyLock<Regex> = LazyLock::new(|| compile(r"^\)\s*"));

/// AND and its synonyms. Capture 1 is the word form, capture 2 the whitespace after it.
static AND: LazyLock<Regex> = LazyLock::new(|| compile(r"^(?:&|(AND|ET|UND|E))(\s*)"));

/// OR and its synonyms.
static OR: LazyLock<Regex> = LazyLock::new(|| compile(r"^(?:\||(OR|OU|ODER|O))(\s*)"));

/// Boolean connective written between two clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Connective {
    /// `AND`, `&`, or a synonym.
    And,
    /// `OR`, `|`, or a synonym.
    Or,
}

/// An explicit sign prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Sign {
    /// `+`
    Plus,
    /// `-`
    Minus,
}

/// A field name and the operator following it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldOp<'a> {
    /// Field name; empty for the operator-only form.
    pub field: &'a str,
    /// Operator.
    pub operator: Operator,
}

/// A term value and the quoting around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TermMatch<'a> {
    /// Quote kind.
    pub quote: Quote,
    /// Value with quotes removed.
    pub value: &'a str,
}

/// Runs an anchored pattern, returning captures and the remaining input.
fn anchored<'a>(re: &Regex, input: &'a str) -> Option<(Captures<'a>, &'a str)> {
    let caps = re.captures(input)?;
    let end = caps.get(0)?.end();
    Some((caps, &input[end..]))
}

/// Returns capture group `i` as a string slice of the input.
fn group<'a>(caps: &Captures<'a>, i: usize) -> &'a str {
    caps.get(i).map_or("", |m| m.as_str())
}

/// Matches a leading `+` or `-`.
pub(crate) fn sign(input: &str) -> Option<(Sign, &str)> {
    let (caps, rest) = anchored(&SIGN, input)?;
    let sign = if group(&caps, 1) == "+" {
        Sign::Plus
    } else {
        Sign::Minus
    };
    Some((sign, rest))
}

/// Matches a leading `NOT` word.
pub(crate) fn not_word(input: &str) -> Option<&str> {
    anchored(&NOT_WORD, input).map(|(_, rest)| rest)
}

/// Matches a field and operator, trying quoted, bare and field-less forms in turn.
pub(crate) fn field_operator(input: &str) -> Option<(FieldOp<'_>, &str)> {
    for re in [&*FIELD_DOUBLE, &*FIELD_SINGLE, &*FIELD_BARE] {
        if let Some((caps, rest)) = anchored(re, input)
            && let Some(operator) = Operator::from_token(group(&caps, 2))
        {
            let field = group(&caps, 1);
            return Some((FieldOp { field, operator }, rest));
        }
    }

    let (caps, rest) = anchored(&FIELD_NONE, input)?;
    let operator = Operator::from_token(group(&caps, 1))?;
    Some((FieldOp { field: "", operator }, rest))
}

/// Matches a quoted or bare term value.
pub(crate) fn term(input: &str) -> Option<(TermMatch<'_>, &str)> {
    for (re, quote) in [
        (&*TERM_DOUBLE, Quote::Double),
        (&*TERM_SINGLE, Quote::Single),
        (&*TERM_BARE, Quote::None),
    ] {
        if let Some((caps, rest)) = anchored(re, input) {
            let value = group(&caps, 1);
            return Some((TermMatch { quote, value }, rest));
        }
    }
    None
}

/// Matches `(`.
pub(crate) fn open_paren(input: &str) -> Option<&str> {
    anchored(&OPEN, input).map(|(_, rest)| rest)
}

/// Matches `)`.
pub(crate) fn close_paren(input: &str) -> Option<&str> {
    anchored(&CLOSE, input).map(|(_, rest)| rest)
}

/// Runs a connective pattern.
///
/// A word form only counts when whitespace or `(` follows it and another clause comes
/// after, so `E-mail`, `O'Reilly` and a trailing `E` are left for the term matcher.
fn connective_word<'a>(re: &Regex, input: &'a str) -> Option<&'a str> {
    let (caps, rest) = anchored(re, input)?;
    if caps.get(1).is_some() {
        let separated = !group(&caps, 2).is_empty() || rest.starts_with('(');
        if !separated || rest.is_empty() || rest.starts_with(')') {
            return None;
        }
    }
    Some(rest)
}

/// Matches an AND or OR connective.
pub(crate) fn connective(input: &str) -> Option<(Connective, &str)> {
    if let Some(rest) = connective_word(&AND, input) {
        return Some((Connective::And, rest));
    }
    connective_word(&OR, input).map(|rest| (Connective::Or, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_consumes_trailing_whitespace() {
        assert_eq!(sign("+ a"), Some((Sign::Plus, "a")));
        assert_eq!(sign("-a"), Some((Sign::Minus, "a")));
        assert_eq!(sign("a"), None);
    }

    #[test]
    fn not_word_needs_boundary() {
        assert_eq!(not_word("NOT d"), Some("d"));
        assert_eq!(not_word("NICHT d"), Some("d"));
        assert_eq!(not_word("NOTE"), None);
        assert_eq!(not_word("not d"), None);
    }

    #[test]
    fn longest_operator_wins() {
        let (fo, rest) = field_operator("date>='01.01.2001'").unwrap();
        assert_eq!(fo.field, "date");
        assert_eq!(fo.operator, Operator::GreaterEqual);
        assert_eq!(rest, "'01.01.2001'");

        let (fo, _) = field_operator("txt!~x").unwrap();
        assert_eq!(fo.operator, Operator::RegexNeg);

        let (fo, _) = field_operator("txt=~x").unwrap();
        assert_eq!(fo.operator, Operator::Regex);

        let (fo, _) = field_operator("n=3").unwrap();
        assert_eq!(fo.operator, Operator::Equal);
    }

    #[test]
    fn quoted_field_names() {
        let (fo, rest) = field_operator("\"title\":guide").unwrap();
        assert_eq!((fo.field, fo.operator, rest), ("title", Operator::Field, "guide"));

        let (fo, _) = field_operator("'Id'#1,2").unwrap();
        assert_eq!((fo.field, fo.operator), ("Id", Operator::Csv));
    }

    #[test]
    fn operator_without_field() {
        let (fo, rest) = field_operator(":a").unwrap();
        assert_eq!((fo.field, fo.operator, rest), ("", Operator::Field, "a"));

        let (fo, _) = field_operator("!~^x").unwrap();
        assert_eq!((fo.field, fo.operator), ("", Operator::RegexNeg));

        // Relational operators need a field.
        assert!(field_operator(">=3").is_none());
    }

    #[test]
    fn plain_word_is_not_a_field() {
        assert!(field_operator("word rest").is_none());
        assert!(field_operator("\"Colon:In the Tech\"").is_none());
    }

    #[test]
    fn term_variants() {
        assert_eq!(
            term("\"Red Hat\" x"),
            Some((
                TermMatch {
                    quote: Quote::Double,
                    value: "Red Hat"
                },
                "x"
            ))
        );
        assert_eq!(
            term("'^foo.*'").map(|(t, _)| (t.quote, t.value)),
            Some((Quote::Single, "^foo.*"))
        );
        assert_eq!(
            term("abc) d").map(|(t, rest)| (t.value, rest)),
            Some(("abc", ") d"))
        );
        // An unterminated quote falls back to a bare run.
        assert_eq!(term("\"abc").map(|(t, _)| t.quote), Some(Quote::None));
        assert!(term("(a)").is_none());
        assert!(term("").is_none());
    }

    #[test]
    fn parentheses() {
        assert_eq!(open_paren("(  a"), Some("a"));
        assert_eq!(close_paren(") b"), Some("b"));
        assert_eq!(open_paren("a"), None);
    }

    #[test]
    fn connectives_and_synonyms() {
        assert_eq!(connective("AND b"), Some((Connective::And, "b")));
        assert_eq!(connective("UND b"), Some((Connective::And, "b")));
        assert_eq!(connective("& b"), Some((Connective::And, "b")));
        assert_eq!(connective("OR b"), Some((Connective::Or, "b")));
        assert_eq!(connective("ODER b"), Some((Connective::Or, "b")));
        assert_eq!(connective("| b"), Some((Connective::Or, "b")));
        assert_eq!(connective("ORACLE"), None);
        assert_eq!(connective("Elephant"), None);
        assert_eq!(connective("and b"), None);
    }

    #[test]
    fn word_connectives_sit_between_clauses() {
        assert_eq!(connective("E b"), Some((Connective::And, "b")));
        assert_eq!(connective("O(b)"), Some((Connective::Or, "(b)")));
        assert_eq!(connective("&b"), Some((Connective::And, "b")));
        assert_eq!(connective("E-mail"), None);
        assert_eq!(connective("O'Reilly"), None);
        assert_eq!(connective("E"), None);
        assert_eq!(connective("AND )"), None);
        assert_eq!(connective("OU"), None);
    }
}
