//! Basis sets assembled from library shells placed on atoms.

use std::fmt;
use std::ops::Index;
use std::slice::Iter;

use itertools::Itertools;
use log;
use nalgebra::Point3;

use crate::angmom::angmom_label;
use crate::auxiliary::atom::Atom;
use crate::basis::basis_error::BasisError;
use crate::basis::library::BasisLibrary;
use crate::basis::shell::Shell;

#[cfg(test)]
#[path = "basis_set_tests.rs"]
mod basis_set_tests;

// ----------------
// Shell-slice data
// ----------------

/// Returns the number of basis functions in a sequence of shells.
pub fn nbf(shells: &[Shell]) -> usize {
    shells.iter().map(Shell::size).sum()
}

/// Returns the largest number of primitives over a sequence of shells, or `0` if there are no
/// shells.
pub fn max_nprim(shells: &[Shell]) -> usize {
    shells.iter().map(Shell::nprim).max().unwrap_or(0)
}

/// Returns the largest angular momentum over all contractions of a sequence of shells, or `0` if
/// there are no shells.
pub fn max_l(shells: &[Shell]) -> i32 {
    shells
        .iter()
        .flat_map(|shell| shell.contr().iter().map(|c| c.l))
        .fold(0, |acc, l| acc.max(i32::try_from(l).unwrap_or(i32::MAX)))
}

/// Returns the index of the first basis function of each shell in a sequence of shells.
pub fn shell2bf(shells: &[Shell]) -> Vec<usize> {
    shells
        .iter()
        .scan(0, |acc, shell| {
            let first = *acc;
            *acc += shell.size();
            Some(first)
        })
        .collect()
}

// --------
// BasisSet
// --------

/// A structure to manage the shells of a basis set placed on the atoms of a molecule, together
/// with the bookkeeping that integral codes use to index basis functions.
#[derive(Clone, Debug)]
pub struct BasisSet {
    /// The name of the basis set as requested.
    name: String,

    /// The shells, ordered by atom and then by library component.
    shells: Vec<Shell>,

    nbf: usize,

    max_nprim: usize,

    /// The largest angular momentum, or `-1` for a default-constructed basis set.
    max_l: i32,

    shell2bf: Vec<usize>,
}

impl Default for BasisSet {
    fn default() -> Self {
        Self {
            name: String::new(),
            shells: vec![],
            nbf: 0,
            max_nprim: 0,
            max_l: -1,
            shell2bf: vec![],
        }
    }
}

impl BasisSet {
    /// Constructs a basis set for a list of atoms from the library given by the environment (see
    /// [`BasisLibrary::from_env`]).
    ///
    /// # Arguments
    ///
    /// * `name` - The basis-set name, *e.g.* `aug-cc-pVDZ`.
    /// * `atoms` - The atoms on which the shells are placed.
    ///
    /// # Errors
    ///
    /// Errors if the library cannot be located, if any component cannot be read or parsed, or
    /// if any component has no shells for one of the atoms.
    pub fn new(name: &str, atoms: &[Atom]) -> Result<Self, BasisError> {
        Self::from_library(&BasisLibrary::from_env()?, name, atoms)
    }

    /// Constructs a basis set for a list of atoms from an explicit library.
    ///
    /// For each atom in order, the shells of every library component are appended in the order
    /// in which the components make up the basis set, each translated onto the atom.
    ///
    /// # Arguments
    ///
    /// * `library` - The basis library.
    /// * `name` - The basis-set name, *e.g.* `aug-cc-pVDZ`.
    /// * `atoms` - The atoms on which the shells are placed.
    ///
    /// # Errors
    ///
    /// Errors if any component cannot be read or parsed, or if any component has no shells for
    /// one of the atoms.
    pub fn from_library(
        library: &BasisLibrary,
        name: &str,
        atoms: &[Atom],
    ) -> Result<Self, BasisError> {
        let components = library.load(name)?;
        let mut shells = vec![];
        for atom in atoms.iter() {
            for component in components.iter() {
                let templates = component.templates.get(atom.atomic_number);
                if templates.is_empty() {
                    return Err(BasisError::MissingData {
                        path: component.path.clone(),
                        component: component.name.clone(),
                        atomic_number: atom.atomic_number,
                    });
                }
                shells.extend(templates.iter().map(|template| {
                    let mut shell = template.clone();
                    shell.move_to(atom.coordinates);
                    shell
                }));
            }
        }
        let basis_set = Self::from_shells(name, shells);
        log::debug!(
            "Assembled basis set `{name}` with {} shells and {} functions on {} atoms.",
            basis_set.len(),
            basis_set.nbf(),
            atoms.len()
        );
        Ok(basis_set)
    }

    /// Constructs a basis set directly from a sequence of shells.
    pub fn from_shells(name: &str, shells: Vec<Shell>) -> Self {
        let mut basis_set = Self {
            name: name.to_string(),
            shells,
            ..Default::default()
        };
        basis_set.update_bookkeeping();
        basis_set
    }

    fn update_bookkeeping(&mut self) -> &mut Self {
        self.nbf = nbf(&self.shells);
        self.max_nprim = max_nprim(&self.shells);
        self.max_l = max_l(&self.shells);
        self.shell2bf = shell2bf(&self.shells);
        self
    }

    /// Sets the purity of the leading contraction of every shell and recomputes the
    /// bookkeeping.
    pub fn set_pure(&mut self, pure: bool) -> &mut Self {
        self.shells.iter_mut().for_each(|shell| {
            shell.set_pure(pure);
        });
        self.update_bookkeeping()
    }

    /// The name of the basis set as requested.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The shells of the basis set.
    pub fn shells(&self) -> &[Shell] {
        &self.shells
    }

    /// Iterates over the shells.
    pub fn iter(&'_ self) -> Iter<'_, Shell> {
        self.shells.iter()
    }

    /// The number of shells.
    pub fn len(&self) -> usize {
        self.shells.len()
    }

    /// Returns `true` if there are no shells.
    pub fn is_empty(&self) -> bool {
        self.shells.is_empty()
    }

    /// The number of basis functions.
    pub fn nbf(&self) -> usize {
        self.nbf
    }

    /// The largest number of primitives in any shell.
    pub fn max_nprim(&self) -> usize {
        self.max_nprim
    }

    /// The largest angular momentum of any contraction. This is `-1` for a default-constructed
    /// basis set and `0` for one constructed without shells.
    pub fn max_l(&self) -> i32 {
        self.max_l
    }

    /// The index of the first basis function of each shell.
    pub fn shell2bf(&self) -> &[usize] {
        &self.shell2bf
    }

    /// Maps each shell to the index of an atom located exactly at the shell's origin.
    ///
    /// # Returns
    ///
    /// For each shell, the index of the first atom whose coordinates are equal to the shell's
    /// origin, or `None` if there is no such atom.
    pub fn shell2atom(&self, atoms: &[Atom]) -> Vec<Option<usize>> {
        self.shells
            .iter()
            .map(|shell| atoms.iter().position(|atom| atom.coordinates == *shell.origin()))
            .collect()
    }

    /// Maps each atom to the indices of the shells whose origins are exactly at the atom's
    /// position.
    pub fn atom2shell(&self, atoms: &[Atom]) -> Vec<Vec<usize>> {
        atoms
            .iter()
            .map(|atom| {
                self.shells
                    .iter()
                    .positions(|shell| *shell.origin() == atom.coordinates)
                    .collect()
            })
            .collect()
    }
}

impl Index<usize> for BasisSet {
    type Output = Shell;

    fn index(&self, i: usize) -> &Self::Output {
        &self.shells[i]
    }
}

impl<'a> IntoIterator for &'a BasisSet {
    type Item = &'a Shell;
    type IntoIter = Iter<'a, Shell>;

    fn into_iter(self) -> Self::IntoIter {
        self.shells.iter()
    }
}

impl fmt::Display for BasisSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Centres are numbered by the first appearance of each distinct origin.
        let mut centres: Vec<Point3<f64>> = vec![];
        let mut shell_centres = Vec::with_capacity(self.len());
        for shell in self.shells.iter() {
            let existing = centres.iter().position(|origin| origin == shell.origin());
            let centre = existing.unwrap_or_else(|| {
                centres.push(*shell.origin());
                centres.len() - 1
            });
            shell_centres.push(centre);
        }

        writeln!(
            f,
            "Basis set `{}`: {} shells, {} functions, max l = {}, max nprim = {}",
            self.name,
            self.len(),
            self.nbf,
            self.max_l,
            self.max_nprim
        )?;
        let bar = "┈".repeat(46);
        writeln!(f, "{bar}")?;
        writeln!(
            f,
            " {:>5}  {:>6}  {:<8}  {:>5}  {:>5}  {:>6}",
            "Shell", "Centre", "Type", "nprim", "nfunc", "First"
        )?;
        writeln!(f, "{bar}")?;
        for (i, (shell, centre)) in self.shells.iter().zip(shell_centres).enumerate() {
            let shell_type = shell
                .contr()
                .iter()
                .map(|c| format!("{}{}", angmom_label(c.l), if c.pure { "" } else { "*" }))
                .join("");
            writeln!(
                f,
                " {i:>5}  {centre:>6}  {shell_type:<8}  {:>5}  {:>5}  {:>6}",
                shell.nprim(),
                shell.size(),
                self.shell2bf[i]
            )?;
        }
        writeln!(f, "{bar}")?;
        writeln!(f, "* Cartesian functions")
    }
}
