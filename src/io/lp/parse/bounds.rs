//! # Bounds section
//!
//! Lines like `x free`, `x <= 4`, `-inf <= x` and `0 <= x <= +inf`.
use crate::data::linear_program::elements::ConstraintRelation;
use crate::io::error::ParseResult;
use crate::io::lp::BoundType;
use crate::io::lp::lex::{Sign, Token, TokenKind};
use crate::io::lp::number::parse::Parse;
use crate::io::lp::number::traits::Field;
use crate::io::lp::parse::Parser;
use crate::io::lp::parse::expression::{is_infinity, Value};
use crate::io::lp::token::FREE;

impl<'a> Parser<'a> {
    /// Read all bounds, up to the next section.
    ///
    /// A double bound results in two entries, the left one first.
    pub(super) fn parse_bounds<F: Parse + Field>(
        &mut self,
    ) -> ParseResult<Vec<(usize, BoundType<F>)>> {
        let mut bounds = Vec::new();

        while let Some(&start) = self.peek().filter(|_| !self.at_section_end()) {
            match start.kind {
                TokenKind::Name(name) if !is_infinity(name) => {
                    self.position += 1;
                    let variable = self.variable(name);
                    match self.next() {
                        Some(Token { kind: TokenKind::Name(word), .. }) if word.eq_ignore_ascii_case(FREE) => {
                            bounds.push((variable, BoundType::Free));
                        },
                        Some(Token { kind: TokenKind::Relation(relation), .. }) => {
                            let relation = *relation;
                            let value = self.parse_value()?;
                            bounds.push((variable, self.single_bound(relation, value, &start)?));
                        },
                        Some(token) => return Err(self.error_at(
                            "Expected \"free\" or a relation after the variable name.", token,
                        )),
                        None => return Err(self.end_of_file_error("Incomplete bound.")),
                    }
                },
                _ => {
                    let left = self.parse_value()?;
                    let left_relation = self.parse_relation(&start)?;
                    let variable = match self.next() {
                        Some(Token { kind: TokenKind::Name(name), .. }) if !is_infinity(name) => {
                            self.variable(*name)
                        },
                        Some(token) => return Err(self.error_at("Expected a variable name.", token)),
                        None => return Err(self.end_of_file_error("Incomplete bound.")),
                    };
                    // As seen from the variable
                    let relation = left_relation.flipped();
                    bounds.push((variable, self.single_bound(relation, left, &start)?));

                    if let Some(Token { kind: TokenKind::Relation(right_relation), .. }) = self.peek() {
                        let right_relation = *right_relation;
                        if right_relation != left_relation || right_relation == ConstraintRelation::Equal {
                            return Err(self.error_at(
                                "Both relations of a double bound should be either \"<=\" or \">=\".",
                                &start,
                            ));
                        }
                        self.position += 1;
                        let right = self.parse_value()?;
                        bounds.push((variable, self.single_bound(right_relation, right, &start)?));
                    }
                },
            }
        }

        Ok(bounds)
    }

    fn parse_relation(&mut self, start: &Token) -> ParseResult<ConstraintRelation> {
        match self.next() {
            Some(Token { kind: TokenKind::Relation(relation), .. }) => Ok(*relation),
            Some(token) => Err(self.error_at("Expected a relation like \"<=\".", token)),
            None => Err(self.error_at("Incomplete bound.", start)),
        }
    }

    /// Bound described by `x relation value`.
    fn single_bound<F>(
        &self,
        relation: ConstraintRelation,
        value: Value<F>,
        start: &Token,
    ) -> ParseResult<BoundType<F>> {
        match (relation, value) {
            (ConstraintRelation::Less, Value::Finite(value)) => Ok(BoundType::Upper(value)),
            (ConstraintRelation::Greater, Value::Finite(value)) => Ok(BoundType::Lower(value)),
            (ConstraintRelation::Equal, Value::Finite(value)) => Ok(BoundType::Fixed(value)),
            (ConstraintRelation::Less, Value::Infinite(Sign::Plus)) => Ok(BoundType::UpperInfinity),
            (ConstraintRelation::Greater, Value::Infinite(Sign::Minus)) => Ok(BoundType::LowerMinusInfinity),
            (relation, Value::Infinite(sign)) => {
                let infinity = match sign {
                    Sign::Plus => "+inf",
                    Sign::Minus => "-inf",
                };
                Err(self.error_at(
                    format!("A variable can't be bounded by \"{relation} {infinity}\"."),
                    start,
                ))
            },
        }
    }
}

#[cfg(test)]
mod test {
    use crate::io::lp::BoundType;
    use crate::io::lp::lex::lex;
    use crate::io::lp::parse::Parser;

    fn bounds(text: &str) -> Vec<(usize, BoundType<f64>)> {
        let lexed = lex(text).unwrap();
        Parser::new(&lexed).parse_bounds().unwrap()
    }

    fn is_error(text: &str) -> bool {
        let lexed = lex(text).unwrap();
        Parser::new(&lexed).parse_bounds::<f64>().is_err()
    }

    #[test]
    fn single() {
        assert_eq!(bounds("x free\ny <= 4\nz >= -2.5\nw = 3\n"), vec![
            (0, BoundType::Free),
            (1, BoundType::Upper(4_f64)),
            (2, BoundType::Lower(-2.5)),
            (3, BoundType::Fixed(3_f64)),
        ]);
        assert_eq!(bounds("-inf <= x\n1 >= y\nx <= +inf"), vec![
            (0, BoundType::LowerMinusInfinity),
            (1, BoundType::Upper(1_f64)),
            (0, BoundType::UpperInfinity),
        ]);
    }

    #[test]
    fn double() {
        assert_eq!(bounds("   0 <= flow(a) <= 100\n   -inf <= flow(b) <= +inf"), vec![
            (0, BoundType::Lower(0_f64)),
            (0, BoundType::Upper(100_f64)),
            (1, BoundType::LowerMinusInfinity),
            (1, BoundType::UpperInfinity),
        ]);
        assert_eq!(bounds("5 >= x >= 1"), vec![
            (0, BoundType::Upper(5_f64)),
            (0, BoundType::Lower(1_f64)),
        ]);
    }

    #[test]
    fn invalid() {
        assert!(is_error("0 <= x >= 1"));
        assert!(is_error("0 = x = 1"));
        assert!(is_error("x <= -inf"));
        assert!(is_error("+inf <= x"));
        assert!(is_error("x fixed"));
        assert!(is_error("3 <= 4"));
        assert!(is_error("x <="));
    }
}
