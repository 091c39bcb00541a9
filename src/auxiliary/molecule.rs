//! Molecules read from `xyz` files.

use std::fs;
use std::path::Path;

use anyhow::{self, ensure, format_err};

use crate::auxiliary::atom::{Atom, ELEMENT_MAP};

#[cfg(test)]
#[path = "molecule_tests.rs"]
mod molecule_tests;

/// Structure containing the atoms constituting a molecule.
#[derive(Clone, Debug)]
pub struct Molecule {
    /// The atoms constituting this molecule, in the order they are defined.
    pub atoms: Vec<Atom>,
}

impl Molecule {
    /// Parses the contents of an `xyz` file to construct a molecule. The first line gives the
    /// number of atoms, the second line is a comment, and every following non-blank line gives
    /// an element symbol and three Cartesian coordinates in Ångström.
    ///
    /// # Errors
    ///
    /// Errors if the atom count is missing or does not match the number of atom lines, or if any
    /// atom line is malformed.
    pub fn from_xyz_str(contents: &str) -> Result<Self, anyhow::Error> {
        let mut lines = contents.lines();
        let n_atoms = lines
            .next()
            .ok_or_else(|| format_err!("Empty `xyz` contents."))?
            .trim()
            .parse::<usize>()
            .map_err(|err| format_err!("Unable to parse the number of atoms: {err}."))?;
        let atoms = lines
            .skip(1)
            .filter(|line| !line.trim().is_empty())
            .map(|line| Atom::from_xyz(line, &ELEMENT_MAP))
            .collect::<Result<Vec<_>, _>>()?;
        ensure!(
            atoms.len() == n_atoms,
            "Expected {n_atoms} atoms, got {} instead.",
            atoms.len()
        );
        Ok(Molecule { atoms })
    }

    /// Parses an `xyz` file to construct a molecule.
    ///
    /// # Arguments
    ///
    /// * `filename` - The `xyz` file to be parsed.
    ///
    /// # Returns
    ///
    /// The parsed [`Molecule`] with coordinates in Bohr.
    pub fn from_xyz<P: AsRef<Path>>(filename: P) -> Result<Self, anyhow::Error> {
        let contents = fs::read_to_string(&filename).map_err(|err| {
            format_err!(
                "Unable to read file {}: {err}.",
                filename.as_ref().display()
            )
        })?;
        Self::from_xyz_str(&contents)
    }
}
