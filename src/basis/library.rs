//! Location and loading of basis-set library files.

use std::env;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use log;
use rayon::prelude::*;
use regex::RegexSet;

use crate::basis::basis_error::BasisError;
use crate::basis::g94::{read_g94_file, ElementTemplates};

#[cfg(test)]
#[path = "library_tests.rs"]
mod library_tests;

/// The environment variable that overrides the basis-library directory.
pub const DATA_PATH_ENV: &str = "LIBINT_DATA_PATH";

/// The file extension of basis-library files.
const LIBRARY_EXTENSION: &str = "g94";

/// The prefix of augmented correlation-consistent basis names that are split into a base set and
/// an augmentation set.
const AUGMENTED_CC_PREFIX: &str = "aug-cc-pv";

lazy_static! {
    /// Canonical basis names matching any of these patterns use Cartesian $`d`$ shells. `6-311`
    /// sets are excluded.
    static ref CARTESIAN_D_RULES: RegexSet =
        RegexSet::new([r"^3-21", r"^4-31g", r"^6-31($|[^1])"])
            .expect("Invalid Cartesian-d rule table.");
}

// --------------
// Name utilities
// --------------

/// Canonicalises a basis-set name into the stem of its library file. All characters are
/// lowercased and `/` is replaced by `I`, which cannot otherwise appear after lowercasing.
///
/// # Examples
///
/// ```
/// use gbasis::basis::library::canonicalise_name;
///
/// assert_eq!(canonicalise_name("cc-pVDZ"), "cc-pvdz");
/// assert_eq!(canonicalise_name("Def2-SVP/J"), "def2-svpIj");
/// ```
pub fn canonicalise_name(name: &str) -> String {
    name.to_lowercase().replace('/', "I")
}

/// Determines if a basis set uses Cartesian $`d`$ shells by convention.
///
/// # Arguments
///
/// * `canonical_name` - The canonicalised basis-set name.
pub fn uses_cartesian_d(canonical_name: &str) -> bool {
    CARTESIAN_D_RULES.is_match(canonical_name)
}

/// Decomposes a canonical basis-set name into the library components that make up the basis set,
/// in the order in which their shells are placed on each atom.
///
/// `aug-cc-pv*` names (except the `cabs` sets, which have their own files) are split into the
/// base `cc-pv*` set and the `augmentation-cc-pv*` diffuse functions. All other names are a
/// single component.
pub fn decompose_name(canonical_name: &str) -> Vec<String> {
    if canonical_name.starts_with(AUGMENTED_CC_PREFIX) && !canonical_name.contains("cabs") {
        let base = &canonical_name["aug-".len()..];
        vec![base.to_string(), format!("augmentation-{base}")]
    } else {
        vec![canonical_name.to_string()]
    }
}

// --------------
// BasisComponent
// --------------

/// A library component loaded from a single file.
#[derive(Clone, Debug)]
pub struct BasisComponent {
    /// The canonical name of the component.
    pub name: String,

    /// The file from which the component was read.
    pub path: PathBuf,

    /// The template shells of the component.
    pub templates: ElementTemplates,
}

// ------------
// BasisLibrary
// ------------

/// A directory of `.g94` basis-library files.
#[derive(Clone, Debug)]
pub struct BasisLibrary {
    data_path: PathBuf,
}

impl BasisLibrary {
    /// Opens a basis library in an explicit directory.
    ///
    /// # Errors
    ///
    /// Errors if `data_path` does not exist or is not a directory.
    pub fn new<P: AsRef<Path>>(data_path: P) -> Result<Self, BasisError> {
        let data_path = data_path.as_ref();
        if !data_path.is_dir() {
            return Err(BasisError::Configuration(format!(
                "basis-library path {} does not exist or is not a directory",
                data_path.display()
            )));
        }
        Ok(Self {
            data_path: data_path.to_path_buf(),
        })
    }

    /// Opens the basis library given by the `LIBINT_DATA_PATH` environment variable, or, if that
    /// is unset or empty, the compiled-in default location (see [`Self::default_data_path`]).
    ///
    /// # Errors
    ///
    /// Errors if the resolved path does not exist or is not a directory.
    pub fn from_env() -> Result<Self, BasisError> {
        let data_path = env::var_os(DATA_PATH_ENV)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_data_path);
        log::debug!("Using basis-library path {}.", data_path.display());
        Self::new(data_path)
    }

    /// The compiled-in default basis-library location: the value of `LIBINT_DATA_PATH` at
    /// compile time if set, otherwise the `data/basis` directory of this crate.
    pub fn default_data_path() -> PathBuf {
        option_env!("LIBINT_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join("basis"))
    }

    /// The directory of this library.
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// The path of the file of a library component.
    pub fn component_path(&self, component: &str) -> PathBuf {
        self.data_path.join(format!("{component}.{LIBRARY_EXTENSION}"))
    }

    /// Loads all components of a basis set. The components are read in parallel and returned in
    /// declaration order.
    ///
    /// # Arguments
    ///
    /// * `basis_name` - The basis-set name in any capitalisation.
    ///
    /// # Returns
    ///
    /// The loaded components.
    ///
    /// # Errors
    ///
    /// Errors if any component file cannot be read or parsed.
    pub fn load(&self, basis_name: &str) -> Result<Vec<BasisComponent>, BasisError> {
        let canonical_name = canonicalise_name(basis_name);
        let force_cartesian_d = uses_cartesian_d(&canonical_name);
        let components = decompose_name(&canonical_name);
        log::debug!(
            "Basis set `{basis_name}`: components [{}], Cartesian d: {force_cartesian_d}.",
            components.join(", ")
        );
        components
            .into_par_iter()
            .map(|name| {
                let path = self.component_path(&name);
                let templates = read_g94_file(&path, force_cartesian_d)?;
                Ok::<_, BasisError>(BasisComponent {
                    name,
                    path,
                    templates,
                })
            })
            .collect()
    }
}
