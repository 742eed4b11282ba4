//! # Reading and writing LP files
//!
//! Linear programs exported by modeling tools like Pyomo are read into a syntactic `LP`
//! structure, converted into a coefficient matrix representation (`GeneralForm`) and can be
//! written back in the same dialect.
#![warn(missing_docs)]

pub mod data;
pub mod io;
