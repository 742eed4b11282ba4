//! # Parsing LP files
//!
//! Second stage of importing linear programs. Organizes the tokens section by section into an
//! `LP`, checking that the file is syntactically correct. Consistency checks that need the whole
//! program, such as those on the naming conventions, are left for the conversion.
use std::collections::HashMap;

use itertools::Itertools;
use num_traits::Zero;
use tracing::{debug, trace};

use crate::io::error::{Import as ImportError, Inconsistency, Parse as ParseError, ParseResult};
use crate::io::lp::{Constraint, LP, Section};
use crate::io::lp::lex::{lex, Lexed, Token, TokenKind};
use crate::io::lp::number::parse::Parse;
use crate::io::lp::number::traits::Field;

mod bounds;
mod expression;

/// Parse an LP file.
///
/// Sections are read in a fixed order: the objective, the constraints, the bounds and finally the
/// `general` and `binary` sections, in any order. Only the objective and the closing `end` are
/// required.
///
/// # Arguments
///
/// * `program`: String holding the entire program.
///
/// # Errors
///
/// Parse errors if the file format is found out to be wrong, inconsistency errors if e.g. two
/// constraints share a label.
pub fn parse<F: Parse + Field>(program: &str) -> Result<LP<F>, ImportError> {
    let lexed = lex(program)
        .map_err(|error| error.wrap("Could not split the program into tokens."))?;
    let mut parser = Parser::new(&lexed);

    let objective = match parser.next() {
        Some(Token { kind: TokenKind::Section(Section::Objective(objective)), .. }) => *objective,
        Some(token) => return Err(parser.error_at(
            "Expected the program to start with the objective (\"min\" or \"max\").", token,
        ).into()),
        None => return Err(ParseError::new("No tokens to read, is the file empty?").into()),
    };
    trace!(section = %Section::Objective(objective), "reading section");
    let (objective_name, objective_terms, objective_constant) = parser.parse_objective()
        .map_err(|error| error.wrap("Error while reading the objective function."))?;

    let mut section = parser.next_section(&[
        Section::Constraints, Section::Bounds, Section::General, Section::Binary,
    ])?;

    let constraints = if section == Section::Constraints {
        trace!(section = %section, "reading section");
        let constraints = parser.parse_constraints()
            .map_err(|error| error.wrap("Error while reading the constraints."))?;
        check_label_uniqueness(&constraints)?;
        section = parser.next_section(&[Section::Bounds, Section::General, Section::Binary])?;
        constraints
    } else { Vec::with_capacity(0) };

    let bounds = if section == Section::Bounds {
        trace!(section = %section, "reading section");
        let bounds = parser.parse_bounds()
            .map_err(|error| error.wrap("Error while reading the bounds."))?;
        section = parser.next_section(&[Section::General, Section::Binary])?;
        bounds
    } else { Vec::with_capacity(0) };

    let mut general = Vec::with_capacity(0);
    let mut binary = Vec::with_capacity(0);
    let mut sections_left = vec![Section::General, Section::Binary];
    while section != Section::End {
        trace!(section = %section, "reading section");
        let names = parser.parse_name_list()
            .map_err(|error| error.wrap(format!("Error while reading the {section} section.")))?;
        match section {
            Section::General => general = names,
            _ => binary = names,
        }
        sections_left.retain(|&left| left != section);
        section = parser.next_section(&sections_left)?;
    }

    if let Some(token) = parser.next() {
        return Err(parser.error_at(
            "File parsed successfully, but it has content after the \"end\" keyword.", token,
        ).into());
    }

    let variables = parser.into_variables();
    debug!(
        variables = variables.len(),
        constraints = constraints.len(),
        bounds = bounds.len(),
        "parsed LP file",
    );

    Ok(LP {
        name: lexed.model_name.map(String::from),
        objective,
        objective_name: objective_name.map(String::from),
        objective_terms,
        objective_constant,
        constraints,
        variables,
        bounds,
        general,
        binary,
    })
}

/// Walks through the tokens once, keeping track of the variables it has seen.
pub(super) struct Parser<'a> {
    lexed: &'a Lexed<'a>,
    /// Index of the next token to read.
    position: usize,
    /// Index of each variable name in `variables`.
    variable_index: HashMap<&'a str, usize>,
    /// Variable names, in order of first appearance.
    variables: Vec<String>,
}

impl<'a> Parser<'a> {
    fn new(lexed: &'a Lexed<'a>) -> Self {
        Self {
            lexed,
            position: 0,
            variable_index: HashMap::new(),
            variables: Vec::new(),
        }
    }

    fn peek(&self) -> Option<&'a Token<'a>> {
        self.lexed.tokens.get(self.position)
    }

    fn peek_second(&self) -> Option<&'a Token<'a>> {
        self.lexed.tokens.get(self.position + 1)
    }

    fn next(&mut self) -> Option<&'a Token<'a>> {
        let token = self.lexed.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    /// Whether the current section has no tokens left.
    fn at_section_end(&self) -> bool {
        matches!(self.peek(), None | Some(Token { kind: TokenKind::Section(_), .. }))
    }

    /// Create an error pointing at the line of a token.
    fn error_at(&self, description: impl Into<String>, token: &Token) -> ParseError {
        let line_number = token.line_number;
        ParseError::with_location(description, (line_number, self.lexed.line(line_number)))
    }

    /// Index of a variable, registering it if it wasn't seen before.
    fn variable(&mut self, name: &'a str) -> usize {
        *self.variable_index.entry(name).or_insert_with(|| {
            self.variables.push(name.to_string());
            self.variables.len() - 1
        })
    }

    /// Create an error pointing at the last line that holds a token.
    fn end_of_file_error(&self, description: impl Into<String>) -> ParseError {
        match self.lexed.tokens.last() {
            Some(token) => self.error_at(description, token),
            None => ParseError::new(description),
        }
    }

    fn into_variables(self) -> Vec<String> {
        self.variables
    }

    /// Read a `name:` label, if there is one.
    fn label(&mut self) -> Option<&'a str> {
        match (self.peek(), self.peek_second()) {
            (
                Some(Token { kind: TokenKind::Name(name), .. }),
                Some(Token { kind: TokenKind::Colon, .. }),
            ) => {
                self.position += 2;
                Some(*name)
            },
            _ => None,
        }
    }

    /// Consume the keyword starting the next section.
    ///
    /// # Arguments
    ///
    /// * `acceptable`: Sections that may follow the current one. The `end` keyword is always
    /// acceptable.
    ///
    /// # Errors
    ///
    /// If the tokens are exhausted, or a section is found that is not acceptable at this point.
    fn next_section(&mut self, acceptable: &[Section]) -> ParseResult<Section> {
        match self.next() {
            Some(token @ Token { kind: TokenKind::Section(section), .. }) => {
                if *section == Section::End || acceptable.contains(section) {
                    Ok(*section)
                } else {
                    Err(self.error_at(format!(
                        "Expected one of the sections {}, \"{}\", found the \"{}\" section.",
                        acceptable.iter().map(|section| format!("\"{section}\"")).join(", "),
                        Section::End,
                        section,
                    ), token))
                }
            },
            Some(token) => Err(self.error_at("Expected a section keyword.", token)),
            None => Err(ParseError::new(format!(
                "File ended before the \"{}\" keyword.", Section::End,
            ))),
        }
    }

    /// Read the objective function, up to the next section.
    ///
    /// # Return value
    ///
    /// The label, the terms and the sum of the constants.
    fn parse_objective<F: Parse + Field>(
        &mut self,
    ) -> ParseResult<(Option<&'a str>, Vec<(usize, F)>, F)> {
        let label = self.label();
        let (terms, constant) = self.parse_expression(true)?;

        Ok((label, terms, constant))
    }

    /// Read all constraints, up to the next section.
    fn parse_constraints<F: Parse + Field>(&mut self) -> ParseResult<Vec<Constraint<F>>> {
        let mut constraints = Vec::new();

        while let Some(&start) = self.peek().filter(|_| !self.at_section_end()) {
            let label = self.label();
            let (terms, constant) = self.parse_expression::<F>(false)?;
            debug_assert!(constant.is_zero());
            if terms.is_empty() {
                return Err(self.error_at("Constraint has no terms.", &start));
            }

            let relation = match self.next() {
                Some(Token { kind: TokenKind::Relation(relation), .. }) => *relation,
                Some(token) => return Err(self.error_at("Expected a relation like \"<=\".", token)),
                None => return Err(self.error_at("Constraint has no relation.", &start)),
            };
            let rhs = self.parse_finite_value()
                .map_err(|error| error.wrap(format!(
                    "Could not read the right-hand side of the constraint starting at line {}.",
                    start.line_number,
                )))?;

            constraints.push(Constraint {
                label: label.map(String::from),
                terms,
                relation,
                rhs,
                line_number: start.line_number,
            });
        }

        Ok(constraints)
    }

    /// Read a list of variable names, up to the next section.
    fn parse_name_list(&mut self) -> ParseResult<Vec<usize>> {
        let mut indices = Vec::new();

        while !self.at_section_end() {
            match self.next() {
                Some(Token { kind: TokenKind::Name(name), .. }) => indices.push(self.variable(*name)),
                Some(token) => return Err(self.error_at("Expected a variable name.", token)),
                None => break,
            }
        }

        Ok(indices)
    }
}

/// Constraints that are labeled should have a unique label.
fn check_label_uniqueness<F>(constraints: &[Constraint<F>]) -> Result<(), Inconsistency> {
    let duplicate = constraints.iter()
        .filter_map(|constraint| constraint.label.as_deref())
        .duplicates()
        .next();

    match duplicate {
        Some(label) => Err(Inconsistency::new(format!("Duplicate constraint label \"{label}\" found."))),
        None => Ok(()),
    }
}
