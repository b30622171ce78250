//! Splitting source text into definitions.
//!
//! The reader has no state beyond the current line: it joins continuation
//! lines, drops blank ones and splits the rest at the first `=`.

use winnow::{
    Parser as _,
    combinator::{separated, terminated},
    error::{ContextError, ErrMode},
    token::take_till,
};

type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// A definition after joining continuation lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LogicalLine {
    /// 1-based number of the first physical line.
    pub number: usize,
    pub text: String,
}

/// Join backslash-continued lines and skip blank ones.
pub(crate) fn logical_lines(source: &str) -> Vec<LogicalLine> {
    let mut lines = Vec::new();
    let mut pending: Option<LogicalLine> = None;

    for (index, raw) in source.lines().enumerate() {
        let trimmed = raw.trim();
        let (piece, continues) = match trimmed.strip_suffix('\\') {
            Some(head) => (head.trim(), true),
            None => (trimmed, false),
        };

        let line = match pending.take() {
            Some(mut line) => {
                if !piece.is_empty() {
                    if !line.text.is_empty() {
                        line.text.push(' ');
                    }
                    line.text.push_str(piece);
                }
                line
            }
            None => LogicalLine {
                number: index + 1,
                text: piece.to_string(),
            },
        };

        if continues {
            pending = Some(line);
        } else if !line.text.is_empty() {
            lines.push(line);
        }
    }

    // A continuation on the last line has nothing to join.
    if let Some(line) = pending.filter(|line| !line.text.is_empty()) {
        lines.push(line);
    }
    lines
}

fn keyword<'a>(input: &mut &'a str) -> IResult<&'a str> {
    terminated(take_till(0.., '='), '=')
        .map(str::trim)
        .parse_next(input)
}

/// Split `Key = value` at the first `=`, trimming both sides.
///
/// Returns `None` for lines without `=`.
pub(crate) fn split_definition(line: &str) -> Option<(&str, &str)> {
    let mut input = line;
    let key = keyword(&mut input).ok()?;
    Some((key, input.trim()))
}

fn field_list<'a>(input: &mut &'a str) -> IResult<Vec<&'a str>> {
    separated(1.., take_till(0.., '|'), '|').parse_next(input)
}

/// Split a definition value on `|`, trimming every field.
///
/// Empty fields are kept, so `"a||b"` has three fields.
pub(crate) fn split_fields(value: &str) -> Vec<&str> {
    let mut input = value;
    field_list(&mut input)
        .map(|fields| fields.into_iter().map(str::trim).collect())
        .unwrap_or_else(|_| vec![value.trim()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_definition() {
        assert_eq!(
            split_definition("System = Shop | Sells things | core"),
            Some(("System", "Shop | Sells things | core"))
        );
    }

    #[test]
    fn test_split_definition_uses_first_equals() {
        assert_eq!(
            split_definition("Persona=Dev | writes a = b |"),
            Some(("Persona", "Dev | writes a = b |"))
        );
    }

    #[test]
    fn test_split_definition_without_equals() {
        assert_eq!(split_definition("just some text"), None);
    }

    #[test]
    fn test_split_fields_keeps_empty_fields() {
        assert_eq!(split_fields(" a || b |"), ["a", "", "b", ""]);
    }

    #[test]
    fn test_split_fields_single() {
        assert_eq!(split_fields("  only  "), ["only"]);
        assert_eq!(split_fields(""), [""]);
    }

    #[test]
    fn test_logical_lines_skips_blank_lines() {
        let lines = logical_lines("\n  \nSystem = A | b | c\n\nPersona = P | d | e\n");

        assert_eq!(
            lines,
            [
                LogicalLine {
                    number: 3,
                    text: "System = A | b | c".to_string()
                },
                LogicalLine {
                    number: 5,
                    text: "Persona = P | d | e".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_logical_lines_joins_continuations() {
        let source = " Test System | Test Description spans\\\n multiple \\\nlines | tag1,tag2\nother line";

        let lines = logical_lines(source);

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0].text,
            "Test System | Test Description spans multiple lines | tag1,tag2"
        );
        assert_eq!(lines[0].number, 1);
        assert_eq!(lines[1].number, 4);
    }

    #[test]
    fn test_logical_lines_trailing_continuation() {
        let lines = logical_lines("System = A | b \\");

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "System = A | b");
    }
}
