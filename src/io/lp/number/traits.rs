//! # Number types
//!
//! Requirements on the number types used when reading, converting and writing LP structures.
use std::fmt::{Debug, Display};
use std::ops::{Add, Mul, Neg, Sub};

use num_traits::{One, Zero};

/// Arithmetic and comparison needed to convert and compare linear programs.
pub trait Field:
    Zero +
    One +

    Neg<Output=Self> +
    Add<Output=Self> +
    Sub<Output=Self> +
    Mul<Output=Self> +

    PartialOrd +

    Debug +
    Display +
    Clone +
{
}

impl<T> Field for T
where
    T: Zero + One + Neg<Output=T> + Add<Output=T> + Sub<Output=T> + Mul<Output=T> + PartialOrd + Debug + Display + Clone,
{
}

/// Writing a number as it appears in an LP file.
pub trait Format {
    /// Text representation.
    ///
    /// Magnitudes below `1e-4` or from `1e16` are written in scientific notation with an explicit
    /// exponent sign and at least two exponent digits (`1e+30`, `2.5e-07`). Negative zero is
    /// written as `0`.
    fn format(&self) -> String;

    /// Whether the value is smaller than zero.
    ///
    /// Used to decide on the sign written in front of a coefficient.
    fn is_negative(&self) -> bool;
}

macro_rules! format_float {
    ($float:ty) => {
        impl Format for $float {
            fn format(&self) -> String {
                if *self == 0.0 {
                    return "0".to_string();
                }

                let magnitude = self.abs();
                if (1e-4..1e16).contains(&magnitude) {
                    self.to_string()
                } else {
                    with_exponent_sign(&format!("{self:e}"))
                }
            }

            fn is_negative(&self) -> bool {
                *self < 0.0
            }
        }
    };
}

format_float!(f64);
format_float!(f32);

/// Rewrite the Rust scientific notation `1e30` into `1e+30`, `1e-7` into `1e-07`.
fn with_exponent_sign(text: &str) -> String {
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        },
        None => text.to_string(),
    }
}

#[cfg(test)]
mod test {
    use crate::io::lp::number::traits::Format;

    #[test]
    fn format() {
        assert_eq!(1_f64.format(), "1");
        assert_eq!((-1_f64).format(), "-1");
        assert_eq!(0.5_f64.format(), "0.5");
        assert_eq!((-0_f64).format(), "0");
        assert_eq!(123_456.75_f64.format(), "123456.75");
        assert_eq!(1e30_f64.format(), "1e+30");
        assert_eq!((-2.5e-7_f64).format(), "-2.5e-07");
        assert_eq!(0.0001_f64.format(), "0.0001");
        assert_eq!(0.25_f32.format(), "0.25");
    }

    #[test]
    fn is_negative() {
        assert!(Format::is_negative(&-3_f64));
        assert!(!Format::is_negative(&0_f64));
        assert!(!Format::is_negative(&-0_f64));
    }
}
