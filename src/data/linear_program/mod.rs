//! # Representing linear programs
//!
//! A linear program read from a file is stored in "general form": any type of constraint, any
//! type of variable bound.
pub mod elements;
pub mod general_form;
