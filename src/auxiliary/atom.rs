//! Chemical elements and atoms.

use std::collections::HashMap;
use std::fmt;

use anyhow::{self, ensure, format_err};
use lazy_static::lazy_static;
use nalgebra::Point3;
use periodic_table;

#[cfg(test)]
#[path = "atom_tests.rs"]
mod atom_tests;

/// The number of elements in the periodic table.
pub const ELEMENT_COUNT: usize = 118;

/// Conversion factor from Ångström to Bohr (CODATA 2010).
pub const ANGSTROM_TO_BOHR: f64 = 1.0 / 0.529_177_210_92;

lazy_static! {
    /// The process-wide element table, built once on first use.
    pub static ref ELEMENT_MAP: ElementMap = ElementMap::new();
}

// ----------
// ElementMap
// ----------

/// Structure storing a look-up between element symbols and atomic numbers.
pub struct ElementMap {
    /// A map from a lower-case symbol string to a tuple of the atomic number and the
    /// conventionally capitalised symbol.
    map: HashMap<String, (u32, &'static str)>,

    /// Conventionally capitalised symbols indexed by atomic number minus one.
    symbols: Vec<&'static str>,
}

impl Default for ElementMap {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementMap {
    /// Creates a new [`ElementMap`] for all elements in the periodic table.
    #[must_use]
    pub fn new() -> Self {
        let mut elements = periodic_table::periodic_table().to_vec();
        elements.sort_by_key(|element| element.atomic_number);
        let map = elements
            .iter()
            .map(|element| {
                (
                    element.symbol.to_lowercase(),
                    (element.atomic_number, element.symbol),
                )
            })
            .collect::<HashMap<_, _>>();
        let symbols = elements.iter().map(|element| element.symbol).collect();
        ElementMap { map, symbols }
    }

    /// Returns the atomic number of an element given its symbol. The comparison is
    /// case-insensitive, so `he`, `He` and `HE` all refer to helium.
    pub fn atomic_number(&self, symbol: &str) -> Option<u32> {
        self.map
            .get(&symbol.to_lowercase())
            .map(|(atomic_number, _)| *atomic_number)
    }

    /// Returns the conventionally capitalised symbol of an element given its atomic number.
    pub fn symbol(&self, atomic_number: u32) -> Option<&'static str> {
        usize::try_from(atomic_number)
            .ok()
            .and_then(|z| z.checked_sub(1))
            .and_then(|i| self.symbols.get(i))
            .copied()
    }

    /// The number of elements in this map.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns `true` if this map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

// ----
// Atom
// ----

/// Structure representing an atom as a nucleus of a given atomic number at a position.
#[derive(Clone, PartialEq)]
pub struct Atom {
    /// The atomic number of the atom.
    pub atomic_number: u32,

    /// The atomic symbol of the atom.
    pub atomic_symbol: String,

    /// The position of the atom in Bohr.
    pub coordinates: Point3<f64>,
}

impl Atom {
    /// Creates an atom from its atomic number and position.
    ///
    /// # Errors
    ///
    /// Errors if `atomic_number` does not correspond to a known element.
    pub fn new(atomic_number: u32, coordinates: Point3<f64>) -> Result<Self, anyhow::Error> {
        let atomic_symbol = ELEMENT_MAP
            .symbol(atomic_number)
            .ok_or_else(|| format_err!("No element has atomic number {atomic_number}."))?;
        Ok(Atom {
            atomic_number,
            atomic_symbol: atomic_symbol.to_string(),
            coordinates,
        })
    }

    /// Parses an atom line in an `xyz` file to construct an [`Atom`].
    ///
    /// # Arguments
    ///
    /// * `line` - A line in an `xyz` file containing an atomic symbol and three Cartesian
    ///   coordinates in Ångström.
    /// * `emap` - A map between atomic symbols and atomic numbers.
    ///
    /// # Returns
    ///
    /// The parsed [`Atom`] with its coordinates converted to Bohr.
    ///
    /// # Errors
    ///
    /// Errors if the line does not have four fields, if the symbol is unknown, or if any
    /// coordinate cannot be parsed.
    pub fn from_xyz(line: &str, emap: &ElementMap) -> Result<Atom, anyhow::Error> {
        let split = line.split_whitespace().collect::<Vec<_>>();
        ensure!(
            split.len() == 4,
            "Expected an element symbol and three coordinates, but found `{line}`."
        );
        let atomic_number = emap
            .atomic_number(split[0])
            .ok_or_else(|| format_err!("Invalid atomic symbol `{}` encountered.", split[0]))?;
        let coords = split[1..]
            .iter()
            .map(|x| {
                x.parse::<f64>()
                    .map_err(|err| format_err!("Unable to parse coordinate `{x}`: {err}."))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Atom::new(
            atomic_number,
            Point3::new(coords[0], coords[1], coords[2]) * ANGSTROM_TO_BOHR,
        )
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>9} {:>3} {:+12.7} {:+12.7} {:+12.7}",
            "Atom",
            self.atomic_symbol,
            self.coordinates[0],
            self.coordinates[1],
            self.coordinates[2],
        )
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}
