//! Gaussian basis sets: shells, library files, and assembled basis sets.

pub mod basis_error;
pub mod basis_set;
pub mod g94;
pub mod library;
pub mod shell;
