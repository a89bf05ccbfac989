//! SQL batch splitting
//!
//! Turns a raw migration script into the statements that are submitted to the
//! ledger one at a time. The splitter only understands line comments and
//! single-quoted literals; everything else passes through verbatim.
//!
//! MySQL stored procedures contain `;` inside their bodies, so a script may
//! bracket them with `DELIMITER` directives. Every fragment between the first
//! and second directive is glued back together and emitted as one statement:
//!
//! ```
//! use wp_core::splitter::split_statements;
//!
//! let sql = "DELIMITER ;;\nCREATE PROCEDURE p() BEGIN SELECT 1; END;;\nDELIMITER ;";
//! assert_eq!(
//!     split_statements(sql),
//!     vec!["\nCREATE PROCEDURE p() BEGIN SELECT 1; END"]
//! );
//! ```

/// Statement terminator recognised outside of string literals.
const TERMINATOR: char = ';';

/// Keyword that opens and closes an aggregated procedure body.
const DELIMITER_DIRECTIVE: &str = "delimiter";

/// A candidate statement, classified by its first token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fragment<'a> {
    /// `DELIMITER ...` pseudo-statement; never sent to the database.
    Directive,
    /// Anything else.
    Sql(&'a str),
}

impl<'a> Fragment<'a> {
    fn classify(candidate: &'a str) -> Self {
        match candidate.split_whitespace().next() {
            Some(token) if token.eq_ignore_ascii_case(DELIMITER_DIRECTIVE) => Fragment::Directive,
            _ => Fragment::Sql(candidate),
        }
    }
}

/// Aggregation state for one splitter call.
enum Mode<'a> {
    /// Fragments are emitted as they arrive.
    Direct,
    /// Inside a `DELIMITER` pair; fragments are buffered.
    Aggregating(Vec<&'a str>),
}

/// Split `script` into executable statements, preserving source order.
///
/// Statements are not trimmed: a statement that followed a newline keeps
/// that newline as its first character. An aggregation that is opened but
/// never closed yields nothing for its buffered fragments.
pub fn split_statements(script: &str) -> Vec<String> {
    let stripped = strip_comments(script);
    let mut statements = Vec::new();
    let mut mode = Mode::Direct;

    for candidate in split_outside_literals(&stripped) {
        mode = match (mode, Fragment::classify(candidate)) {
            (Mode::Direct, Fragment::Directive) => Mode::Aggregating(Vec::new()),
            (Mode::Direct, Fragment::Sql(sql)) => {
                statements.push(sql.to_string());
                Mode::Direct
            }
            (Mode::Aggregating(buffer), Fragment::Directive) => {
                if !buffer.is_empty() {
                    statements.push(buffer.join(";"));
                }
                Mode::Direct
            }
            (Mode::Aggregating(mut buffer), Fragment::Sql(sql)) => {
                buffer.push(sql);
                Mode::Aggregating(buffer)
            }
        };
    }

    statements
}

/// Drop blank lines and lines that start with `--`, then rejoin with `\n`.
pub fn strip_comments(script: &str) -> String {
    script
        .lines()
        .filter(|line| {
            let content = line.trim_start();
            !content.is_empty() && !content.starts_with("--")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split at every terminator that is not inside a single-quoted literal.
///
/// A doubled quote (`''`) closes and immediately reopens the literal, so it
/// never exposes the text in between. Blank segments are discarded.
fn split_outside_literals(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut in_literal = false;
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        match ch {
            '\'' => in_literal = !in_literal,
            TERMINATOR if !in_literal => {
                segments.push(&text[start..idx]);
                start = idx + TERMINATOR.len_utf8();
            }
            _ => {}
        }
    }
    segments.push(&text[start..]);

    segments.retain(|segment| !segment.trim().is_empty());
    segments
}

#[cfg(test)]
#[path = "splitter_test.rs"]
mod tests;
