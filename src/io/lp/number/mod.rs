//! # Numbers
//!
//! The decimal numbers found in LP files are written with an optional exponent and the infinity
//! sentinels are handled separately by the parser. This module reads the finite numbers and
//! decides how numbers are written back.
pub mod parse;
pub mod traits;
