//! Reader for basis-set library files in the Gaussian94 (`.g94`) format.
//!
//! A library file starts with an optional preamble terminated by a `****` line. Each element
//! block then consists of an element line (`<symbol> 0`), a number of shells, and a closing
//! `****` line. A shell begins with a header `<label> <nprim> <scale>` followed by `nprim` lines
//! each containing an exponent and one contraction coefficient (two for `SP` shells).

use std::fs;
use std::path::Path;

use log;
use nalgebra::Point3;

use crate::angmom::angmom_from_label;
use crate::auxiliary::atom::{ELEMENT_COUNT, ELEMENT_MAP};
use crate::basis::basis_error::BasisError;
use crate::basis::shell::{Contraction, Shell};

#[cfg(test)]
#[path = "g94_tests.rs"]
mod g94_tests;

const BLOCK_SEPARATOR: &str = "****";

// ----------------
// ElementTemplates
// ----------------

/// Template shells, centred at the origin, for every element in the periodic table.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementTemplates {
    /// Template shells indexed by atomic number. Index `0` is never populated.
    shells: Vec<Vec<Shell>>,
}

impl ElementTemplates {
    fn new() -> Self {
        Self {
            shells: vec![vec![]; ELEMENT_COUNT + 1],
        }
    }

    /// Returns the template shells for an element, in the order they appear in the library
    /// file. The slice is empty if the element has no shells or the atomic number is out of
    /// range.
    pub fn get(&self, atomic_number: u32) -> &[Shell] {
        usize::try_from(atomic_number)
            .ok()
            .and_then(|z| self.shells.get(z))
            .map(|shells| shells.as_slice())
            .unwrap_or(&[])
    }

    /// Returns the atomic numbers of the elements that have at least one shell.
    pub fn elements(&self) -> Vec<u32> {
        self.shells
            .iter()
            .enumerate()
            .filter(|(_, shells)| !shells.is_empty())
            .filter_map(|(z, _)| u32::try_from(z).ok())
            .collect()
    }

    /// The total number of template shells over all elements.
    pub fn n_shells(&self) -> usize {
        self.shells.iter().map(Vec::len).sum()
    }
}

// -------
// Parsing
// -------

/// Reads a `.g94` library file.
///
/// # Arguments
///
/// * `path` - The path to the library file.
/// * `force_cartesian_d` - If `true`, $`d`$ shells are Cartesian and only shells with
///   $`l > 2`$ are pure. Otherwise, all shells with $`l > 1`$ are pure.
///
/// # Returns
///
/// The template shells for all elements.
///
/// # Errors
///
/// Errors if the file cannot be read or its contents are malformed. Bytes that are not valid
/// UTF-8 are tolerated in comment lines.
pub fn read_g94_file<P: AsRef<Path>>(
    path: P,
    force_cartesian_d: bool,
) -> Result<ElementTemplates, BasisError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| BasisError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    // Library files are not always UTF-8 (comments may carry Latin-1 names). Invalid bytes only
    // matter on significant lines, where they fail to parse as usual.
    let contents = String::from_utf8_lossy(&bytes);
    parse_g94_str(&contents, path, force_cartesian_d)
}

/// Parses the contents of a `.g94` library file.
///
/// # Arguments
///
/// * `contents` - The contents to be parsed.
/// * `name` - The name under which the contents are reported in errors, usually the path from
///   which they were read.
/// * `force_cartesian_d` - See [`read_g94_file`].
///
/// # Errors
///
/// Errors if an element symbol is unknown, a shell header is malformed, or a primitive line is
/// missing or malformed.
pub fn parse_g94_str<P: AsRef<Path>>(
    contents: &str,
    name: P,
    force_cartesian_d: bool,
) -> Result<ElementTemplates, BasisError> {
    let name = name.as_ref().to_path_buf();
    let mut lines = contents
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('!'));

    let mut templates = ElementTemplates::new();

    // Preamble
    if !lines.any(|(_, line)| line == BLOCK_SEPARATOR) {
        log::debug!("No element blocks found in {}.", name.display());
        return Ok(templates);
    }

    while let Some((lineno, line)) = lines.next() {
        let symbol = line.split_whitespace().next().unwrap_or(line);
        let atomic_number = ELEMENT_MAP.atomic_number(symbol).ok_or_else(|| {
            BasisError::data_format(
                &name,
                format!("unknown element symbol `{symbol}` at line {lineno}"),
            )
        })?;
        let element_shells = &mut templates.shells[atomic_number as usize];

        while let Some((lineno, line)) = lines.next() {
            if line == BLOCK_SEPARATOR {
                break;
            }
            let header = ShellHeader::parse(line, lineno, &name)?;
            let primitives = (0..header.nprim)
                .map(|_| {
                    let (lineno, line) = lines.next().ok_or_else(|| {
                        BasisError::data_format(
                            &name,
                            format!(
                                "unexpected end of file in a `{}` shell of element `{symbol}`",
                                header.label
                            ),
                        )
                    })?;
                    parse_primitive(line, lineno, header.ncoeffs(), &name)
                })
                .collect::<Result<Vec<_>, _>>()?;
            element_shells.extend(header.build_shells(
                primitives,
                force_cartesian_d,
                lineno,
                &name,
            )?);
        }
    }

    log::debug!(
        "Read {} shells for {} elements from {}.",
        templates.n_shells(),
        templates.elements().len(),
        name.display()
    );
    Ok(templates)
}

/// The angular momentum content of a shell header.
enum ShellKind {
    /// A shell of a single angular momentum.
    Single(u32),

    /// A combined `SP` shell.
    Sp,
}

/// A parsed shell header line.
struct ShellHeader {
    /// The label as written in the file.
    label: String,

    kind: ShellKind,

    /// The number of primitive lines following the header.
    nprim: usize,
}

impl ShellHeader {
    fn parse(line: &str, lineno: usize, name: &Path) -> Result<Self, BasisError> {
        let mut tokens = line.split_whitespace();
        let label = tokens.next().unwrap_or_default().to_string();
        let kind = if label.eq_ignore_ascii_case("SP") {
            ShellKind::Sp
        } else {
            let l = angmom_from_label(&label).ok_or_else(|| {
                BasisError::data_format(
                    name,
                    format!("invalid shell label `{label}` at line {lineno}"),
                )
            })?;
            ShellKind::Single(l)
        };
        let nprim_str = tokens.next().ok_or_else(|| {
            BasisError::data_format(
                name,
                format!("missing primitive count for shell `{label}` at line {lineno}"),
            )
        })?;
        let nprim = nprim_str.parse::<usize>().map_err(|_| {
            BasisError::data_format(
                name,
                format!("invalid primitive count `{nprim_str}` at line {lineno}"),
            )
        })?;
        Ok(Self { label, kind, nprim })
    }

    /// The number of coefficients on each primitive line.
    fn ncoeffs(&self) -> usize {
        match self.kind {
            ShellKind::Single(_) => 1,
            ShellKind::Sp => 2,
        }
    }

    /// Builds the template shells described by this header and its primitives. An `SP` header
    /// gives an `S` and a `P` shell sharing the same exponents.
    fn build_shells(
        &self,
        primitives: Vec<(f64, Vec<f64>)>,
        force_cartesian_d: bool,
        lineno: usize,
        name: &Path,
    ) -> Result<Vec<Shell>, BasisError> {
        let alpha = primitives.iter().map(|(a, _)| *a).collect::<Vec<_>>();
        let column = |i: usize| primitives.iter().map(|(_, c)| c[i]).collect::<Vec<_>>();
        let contrs = match self.kind {
            ShellKind::Single(l) => {
                let pure = if force_cartesian_d { l > 2 } else { l > 1 };
                vec![Contraction {
                    l,
                    pure,
                    coeff: column(0),
                }]
            }
            ShellKind::Sp => vec![
                Contraction {
                    l: 0,
                    pure: false,
                    coeff: column(0),
                },
                Contraction {
                    l: 1,
                    pure: false,
                    coeff: column(1),
                },
            ],
        };
        contrs
            .into_iter()
            .map(|contr| {
                Shell::new(alpha.clone(), vec![contr], Point3::origin()).map_err(|err| {
                    BasisError::data_format(
                        name,
                        format!("invalid `{}` shell at line {lineno}: {err}", self.label),
                    )
                })
            })
            .collect()
    }
}

/// Parses a primitive line containing an exponent followed by `ncoeffs` coefficients. Fortran
/// `D` exponent markers are accepted.
fn parse_primitive(
    line: &str,
    lineno: usize,
    ncoeffs: usize,
    name: &Path,
) -> Result<(f64, Vec<f64>), BasisError> {
    let values = line
        .split_whitespace()
        .take(ncoeffs + 1)
        .map(|token| {
            token.replace(|c| c == 'D' || c == 'd', "E").parse::<f64>().map_err(|_| {
                BasisError::data_format(
                    name,
                    format!("invalid number `{token}` at line {lineno}"),
                )
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if values.len() < ncoeffs + 1 {
        return Err(BasisError::data_format(
            name,
            format!(
                "expected an exponent and {ncoeffs} coefficient(s) at line {lineno}, found `{line}`"
            ),
        ));
    }
    Ok((values[0], values[1..].to_vec()))
}
