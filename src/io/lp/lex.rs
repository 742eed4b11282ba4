//! # Splitting LP text into tokens
//!
//! First stage of importing linear programs. Comments are removed and the remaining text is cut
//! into names, numbers, signs, relations, colons and section keywords. Every token remembers the
//! line it was read from, such that later stages can point at the offending line.
use crate::data::linear_program::elements::{ConstraintRelation, Objective};
use crate::io::error::{Parse as ParseError, ParseResult};
use crate::io::lp::Section;
use crate::io::lp::token::{
    BINARY, BLOCK_COMMENT_END, BLOCK_COMMENT_START, BOUNDS, COMMENT_INDICATOR, END, GENERAL,
    MAXIMIZE, MINIMIZE, MODEL_NAME_MARKER, NAME_SYMBOLS, SUBJECT_TO, SUBJECT_TO_PHRASES,
};

/// Sign in front of a number or term.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Sign {
    Plus,
    Minus,
}

/// What a piece of text turned out to be.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum TokenKind<'a> {
    /// Variable name, label, or a word like `free` and `inf`.
    Name(&'a str),
    /// Unsigned number text.
    Number(&'a str),
    Sign(Sign),
    Relation(ConstraintRelation),
    Colon,
    Section(Section),
}

/// A `TokenKind` with the line number it was read from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub line_number: usize,
}

/// Result of splitting a program text into tokens.
#[derive(Debug)]
pub(crate) struct Lexed<'a> {
    /// All tokens, in order.
    pub tokens: Vec<Token<'a>>,
    /// All lines of the original text, used to report errors.
    pub lines: Vec<&'a str>,
    /// Model name, if one was mentioned in a comment before the first token.
    pub model_name: Option<&'a str>,
}

impl<'a> Lexed<'a> {
    /// Line contents for a line number counting from 1.
    pub fn line(&self, line_number: usize) -> &'a str {
        line_number.checked_sub(1)
            .and_then(|index| self.lines.get(index))
            .copied()
            .unwrap_or("")
    }
}

/// Split a program into tokens.
///
/// # Errors
///
/// When a block comment is never closed, or when a character is found that can't start a token.
pub(crate) fn lex(text: &str) -> ParseResult<Lexed<'_>> {
    let lines = text.lines().collect::<Vec<_>>();
    let mut tokens = Vec::new();
    let mut model_name = None;
    // Line number at which the currently open block comment started
    let mut open_block_comment = None;

    for (index, &line) in lines.iter().enumerate() {
        let line_number = index + 1; // Count from 1
        let mut rest = line;
        let mut at_line_start = true;

        loop {
            if open_block_comment.is_some() {
                let comment = match rest.find(BLOCK_COMMENT_END) {
                    Some(end) => {
                        let comment = &rest[..end];
                        rest = &rest[(end + BLOCK_COMMENT_END.len())..];
                        open_block_comment = None;
                        comment
                    },
                    None => {
                        let comment = rest;
                        rest = "";
                        comment
                    },
                };
                if tokens.is_empty() && model_name.is_none() {
                    model_name = read_model_name(comment);
                }
            }

            rest = rest.trim_start();
            if rest.is_empty() {
                break;
            }

            if let Some(after) = rest.strip_prefix(BLOCK_COMMENT_START) {
                open_block_comment = Some(line_number);
                rest = after;
                continue;
            }
            if let Some(comment) = rest.strip_prefix(COMMENT_INDICATOR) {
                if tokens.is_empty() && model_name.is_none() {
                    model_name = read_model_name(comment);
                }
                break;
            }

            let (kind, length) = next_token(rest, at_line_start)
                .map_err(|error| {
                    ParseError::with_location(error.description(), (line_number, line))
                })?;
            tokens.push(Token { kind, line_number });
            rest = &rest[length..];
            at_line_start = false;
        }
    }

    if let Some(line_number) = open_block_comment {
        return Err(ParseError::with_location(
            "Comment is never closed.",
            (line_number, lines[line_number - 1]),
        ));
    }

    Ok(Lexed { tokens, lines, model_name })
}

/// Read the model name from a comment like `Source Pyomo model name=Model`.
fn read_model_name(comment: &str) -> Option<&str> {
    comment.find(MODEL_NAME_MARKER)
        .map(|start| &comment[(start + MODEL_NAME_MARKER.len())..])
        .and_then(|after| after.split_whitespace().next())
        .map(|name| name.trim_end_matches(BLOCK_COMMENT_END))
        .filter(|name| !name.is_empty())
}

/// Read a single token from the start of a non empty text without leading whitespace.
///
/// # Return value
///
/// The token and the number of bytes it occupied.
fn next_token(text: &str, at_line_start: bool) -> ParseResult<(TokenKind<'_>, usize)> {
    debug_assert!(!text.is_empty());
    debug_assert_eq!(text, text.trim_start());

    let first = text.as_bytes()[0];
    let result = match first {
        b'+' => (TokenKind::Sign(Sign::Plus), 1),
        b'-' => (TokenKind::Sign(Sign::Minus), 1),
        b':' => (TokenKind::Colon, 1),
        b'<' | b'>' | b'=' => read_relation(text),
        b'0'..=b'9' | b'.' => {
            let length = number_length(text);
            if length == 0 {
                return Err(ParseError::new(format!("Can't read a number from \"{text}\".")));
            }
            (TokenKind::Number(&text[..length]), length)
        },
        _ => {
            let length = text.find(|c: char| !is_name_character(c)).unwrap_or(text.len());
            if length == 0 {
                let character = text.chars().next().unwrap_or_default();
                return Err(ParseError::new(format!("Unexpected character \"{character}\".")));
            }
            let word = &text[..length];

            if at_line_start {
                if let Some((section, section_length)) = read_section(word, text) {
                    return Ok((TokenKind::Section(section), section_length));
                }
            }

            (TokenKind::Name(word), length)
        },
    };

    Ok(result)
}

/// Characters that can be part of a name.
fn is_name_character(c: char) -> bool {
    c.is_ascii_alphanumeric() || NAME_SYMBOLS.contains(c)
}

/// Read one of `<=`, `=<`, `<`, `>=`, `=>`, `>` and `=`.
fn read_relation(text: &str) -> (TokenKind<'_>, usize) {
    let bytes = text.as_bytes();
    let second = bytes.get(1).copied();

    let (relation, length) = match (bytes[0], second) {
        (b'<', Some(b'=')) | (b'=', Some(b'<')) => (ConstraintRelation::Less, 2),
        (b'>', Some(b'=')) | (b'=', Some(b'>')) => (ConstraintRelation::Greater, 2),
        (b'<', _) => (ConstraintRelation::Less, 1),
        (b'>', _) => (ConstraintRelation::Greater, 1),
        _ => (ConstraintRelation::Equal, 1),
    };

    (TokenKind::Relation(relation), length)
}

/// Length of the unsigned number at the start of the text.
///
/// Digits with at most one decimal point, optionally followed by an exponent. Zero if no digit was
/// found.
fn number_length(text: &str) -> usize {
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count()
    };

    let integer_digits = digits_from(0);
    let mut length = integer_digits;
    let mut fraction_digits = 0;
    if bytes.get(length) == Some(&b'.') {
        fraction_digits = digits_from(length + 1);
        length += 1 + fraction_digits;
    }
    if integer_digits + fraction_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(length), Some(b'e' | b'E')) {
        let sign_length = usize::from(matches!(bytes.get(length + 1), Some(b'+' | b'-')));
        let exponent_digits = digits_from(length + 1 + sign_length);
        // Without digits, the "e" belongs to whatever comes next
        if exponent_digits > 0 {
            length += 1 + sign_length + exponent_digits;
        }
    }

    length
}

/// Try to read a section keyword.
///
/// # Arguments
///
/// * `word`: First word on the line.
/// * `text`: Rest of the line, starting with `word`; used for two word keywords.
///
/// # Return value
///
/// The section and the number of bytes the keyword occupies, if the word is a keyword.
fn read_section(word: &str, text: &str) -> Option<(Section, usize)> {
    let is_any = |options: &[&str]| options.iter().any(|option| word.eq_ignore_ascii_case(option));

    let section = if is_any(&MINIMIZE) {
        Section::Objective(Objective::Minimize)
    } else if is_any(&MAXIMIZE) {
        Section::Objective(Objective::Maximize)
    } else if is_any(&SUBJECT_TO) {
        Section::Constraints
    } else if is_any(&BOUNDS) {
        Section::Bounds
    } else if is_any(&GENERAL) {
        Section::General
    } else if is_any(&BINARY) {
        Section::Binary
    } else if word.eq_ignore_ascii_case(END) {
        Section::End
    } else {
        let after_word = &text[word.len()..];
        let second = after_word.trim_start();
        let second_word = second.split(|c: char| !is_name_character(c)).next()?;

        let is_phrase = SUBJECT_TO_PHRASES.iter().any(|(first, last)| {
            word.eq_ignore_ascii_case(first) && second_word.eq_ignore_ascii_case(last)
        });
        return if is_phrase {
            let whitespace = after_word.len() - second.len();
            Some((Section::Constraints, word.len() + whitespace + second_word.len()))
        } else {
            None
        };
    };

    Some((section, word.len()))
}
