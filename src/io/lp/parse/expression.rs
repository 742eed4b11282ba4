//! # Linear expressions and values
//!
//! Terms like `+50 flow(gas_0)`, constants like `-4` and values like `+inf`.
use std::ops::Neg;

use itertools::Itertools;

use crate::io::error::ParseResult;
use crate::io::lp::Terms;
use crate::io::lp::lex::{Sign, Token, TokenKind};
use crate::io::lp::number::parse::Parse;
use crate::io::lp::number::traits::Field;
use crate::io::lp::parse::Parser;
use crate::io::lp::token::INFINITY;

impl Sign {
    /// Give a value this sign.
    pub(crate) fn apply<F: Neg<Output = F>>(self, value: F) -> F {
        match self {
            Sign::Plus => value,
            Sign::Minus => -value,
        }
    }

    fn combine(self, other: Self) -> Self {
        if self == other { Sign::Plus } else { Sign::Minus }
    }
}

/// A value on the right-hand side of a constraint or in a bound.
#[derive(Debug, PartialEq)]
pub(super) enum Value<F> {
    Finite(F),
    Infinite(Sign),
}

impl<'a> Parser<'a> {
    /// Read any number of signs.
    ///
    /// # Return value
    ///
    /// The combined sign, if at least one was read.
    pub(super) fn parse_signs(&mut self) -> Option<Sign> {
        let mut total = None;
        while let Some(Token { kind: TokenKind::Sign(sign), .. }) = self.peek() {
            total = Some(total.map_or(*sign, |total: Sign| total.combine(*sign)));
            self.position += 1;
        }

        total
    }

    /// Read a signed number or infinity.
    pub(super) fn parse_value<F: Parse + Field>(&mut self) -> ParseResult<Value<F>> {
        let sign = self.parse_signs().unwrap_or(Sign::Plus);

        match self.next() {
            Some(token @ Token { kind: TokenKind::Number(text), .. }) => {
                let value = F::parse(text)
                    .map_err(|error| self.error_at(error.description().to_string(), token))?;
                Ok(Value::Finite(sign.apply(value)))
            },
            Some(Token { kind: TokenKind::Name(name), .. }) if is_infinity(name) => {
                Ok(Value::Infinite(sign))
            },
            Some(token) => Err(self.error_at("Expected a number.", token)),
            None => Err(self.end_of_file_error("Expected a number.")),
        }
    }

    /// Read a signed number.
    pub(super) fn parse_finite_value<F: Parse + Field>(&mut self) -> ParseResult<F> {
        let start = self.position;
        match self.parse_value()? {
            Value::Finite(value) => Ok(value),
            Value::Infinite(_) => {
                let token = &self.lexed.tokens[start];
                Err(self.error_at("Infinite value is not allowed here.", token))
            },
        }
    }

    /// Read a linear expression, up to a relation or the next section.
    ///
    /// # Arguments
    ///
    /// * `constants_allowed`: Whether numbers without a variable may appear.
    ///
    /// # Return value
    ///
    /// The terms, sorted by variable index with repeated variables summed, and the sum of the
    /// constants.
    pub(super) fn parse_expression<F: Parse + Field>(
        &mut self,
        constants_allowed: bool,
    ) -> ParseResult<(Terms<F>, F)> {
        let mut terms = Vec::new();
        let mut constant = F::zero();
        let mut first = true;

        loop {
            let start = match self.peek() {
                None | Some(Token { kind: TokenKind::Section(_) | TokenKind::Relation(_), .. }) => break,
                Some(token) => token,
            };

            let sign = self.parse_signs();
            if sign.is_none() && !first {
                return Err(self.error_at("Expected a sign between two terms.", start));
            }
            first = false;
            let sign = sign.unwrap_or(Sign::Plus);

            let coefficient = match self.peek() {
                Some(token @ Token { kind: TokenKind::Number(text), .. }) => {
                    self.position += 1;
                    let value = F::parse(text)
                        .map_err(|error| self.error_at(error.description().to_string(), token))?;
                    Some(value)
                },
                _ => None,
            };

            match self.peek() {
                Some(Token { kind: TokenKind::Name(name), .. }) => {
                    self.position += 1;
                    let variable = self.variable(*name);
                    let coefficient = coefficient.unwrap_or_else(F::one);
                    terms.push((variable, sign.apply(coefficient)));
                },
                Some(token @ Token { kind: TokenKind::Colon, .. }) => {
                    return Err(self.error_at("Unexpected label separator.", token));
                },
                _ => match coefficient {
                    Some(value) if constants_allowed => constant = constant + sign.apply(value),
                    Some(_) => return Err(self.error_at(
                        "Constants are only allowed on the right-hand side.", start,
                    )),
                    None => match self.peek() {
                        Some(token) => return Err(self.error_at("Expected a term.", token)),
                        None => return Err(self.end_of_file_error("Expected a term.")),
                    },
                },
            }
        }

        let terms = terms.into_iter()
            .sorted_by_key(|&(variable, _)| variable)
            .coalesce(|(left_variable, left), (right_variable, right)| {
                if left_variable == right_variable {
                    Ok((left_variable, left + right))
                } else {
                    Err(((left_variable, left), (right_variable, right)))
                }
            })
            .collect();

        Ok((terms, constant))
    }
}

/// Whether a name stands for an infinite value.
pub(super) fn is_infinity(name: &str) -> bool {
    INFINITY.iter().any(|word| name.eq_ignore_ascii_case(word))
}
