//! # Number parsing
//!
//! Reading numbers from strings.
use std::fmt::Display;
use std::str::FromStr;

use crate::io::error::Parse as ParseError;
use crate::io::error::ParseResult;

/// Parsing a number read from an LP file.
pub trait Parse: Sized {
    /// Read a string representation of a finite decimal number.
    ///
    /// The text looks like `12`, `-2.5`, `.3`, `4.` or `1e+30`, possibly with a leading sign.
    ///
    /// # Errors
    ///
    /// When the number could not be parsed, or is too large to be represented.
    fn parse(text: &str) -> ParseResult<Self>;
}

macro_rules! parse_float {
    ($float:ty) => {
        impl Parse for $float {
            fn parse(text: &str) -> ParseResult<Self> {
                parse_finite(text, <$float>::is_finite)
            }
        }
    };
}

parse_float!(f64);
parse_float!(f32);

fn parse_finite<T>(text: &str, is_finite: impl Fn(T) -> bool) -> ParseResult<T>
where
    T: FromStr + Copy + Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value: T = text.parse()
        .map_err(|error| ParseError::wrap_other(
            error,
            format!("Failed to parse value text \"{text}\" into a number"),
        ))?;

    if is_finite(value) {
        Ok(value)
    } else {
        Err(ParseError::new(format!(
            "Parsed value of \"{text}\" was {value}, which can't be represented as a finite number.",
        )))
    }
}

#[cfg(test)]
mod test {
    use crate::io::lp::number::parse::Parse;

    #[test]
    fn parse() {
        assert_eq!(<f64 as Parse>::parse("1").unwrap(), 1_f64);
        assert_eq!(<f64 as Parse>::parse("2.").unwrap(), 2_f64);
        assert_eq!(<f64 as Parse>::parse(".3").unwrap(), 0.3);
        assert_eq!(<f64 as Parse>::parse("-.3").unwrap(), -0.3);
        assert_eq!(<f64 as Parse>::parse("+4.25").unwrap(), 4.25);
        assert_eq!(<f64 as Parse>::parse("1e+30").unwrap(), 1e30);
        assert_eq!(<f64 as Parse>::parse("2.5E-3").unwrap(), 0.0025);
        assert_eq!(<f32 as Parse>::parse("0.5").unwrap(), 0.5_f32);
    }

    #[test]
    fn parse_invalid() {
        assert!(<f64 as Parse>::parse("").is_err());
        assert!(<f64 as Parse>::parse("1.2.3").is_err());
        assert!(<f64 as Parse>::parse("abc").is_err());
        assert!(<f64 as Parse>::parse("1e400").is_err());
        assert!(<f32 as Parse>::parse("1e50").is_err());
    }
}
