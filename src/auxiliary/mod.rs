//! Atoms and molecular geometries.

pub mod atom;
pub mod molecule;
