//! # Storing of linear programs in memory
//!
//! This module provides the data structures used to represent linear programs in memory, as read
//! from or written to files by the `io` module.

pub mod linear_program;
pub mod linear_algebra;
