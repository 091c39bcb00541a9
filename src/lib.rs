//! # gbasis: Gaussian basis sets for molecular integral codes
//!
//! `gbasis` assembles contracted Gaussian basis sets for molecules from a library of basis-set
//! files in the Gaussian '94 format, and provides the permutation maps of geometric derivative
//! indices needed to exploit the permutational symmetry of two-, three- and four-centre
//! integrals.
//!
//! A basis set is requested by name, *e.g.* `aug-cc-pVDZ`. Names are canonicalised into file
//! names, and augmented correlation-consistent names are split into their base and augmentation
//! components which are looked up separately in the library directory. This directory is taken
//! from the `LIBINT_DATA_PATH` environment variable if set.
//!
//! ```no_run
//! use gbasis::auxiliary::molecule::Molecule;
//! use gbasis::basis::basis_set::BasisSet;
//!
//! let mol = Molecule::from_xyz("h2o.xyz").unwrap();
//! let basis_set = BasisSet::new("cc-pVDZ", &mol.atoms).unwrap();
//! println!("{basis_set}");
//! ```

pub mod angmom;
pub mod auxiliary;
pub mod basis;
pub mod derivmap;
pub mod interfaces;
pub mod io;
