//! YAML input files for the `gbasis` binary.

use std::path::PathBuf;

use anyhow::{self, ensure};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::auxiliary::molecule::Molecule;
use crate::basis::basis_set::BasisSet;
use crate::basis::library::{canonicalise_name, decompose_name, uses_cartesian_d, BasisLibrary};
use crate::derivmap::{self, nderivs, BraKet, MAX_DERIV_ORDER};
use crate::interfaces::InputHandle;
use crate::io::format::{
    gbasis_error, gbasis_output, log_subtitle, log_title, nice_bool, GbasisOutput,
};


/// A structure containing input parameters which can be serialised into and deserialised from a
/// YAML input file.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct Input {
    /// The name of the basis set, *e.g.* `aug-cc-pVDZ`.
    #[builder(setter(into))]
    pub basis: String,

    /// The `xyz` file containing the molecular geometry in Ångström.
    #[builder(setter(into))]
    pub xyz: PathBuf,

    /// If set, the leading contraction of every shell is made pure (`true`) or Cartesian
    /// (`false`) after assembly.
    ///
    /// If not specified, this will be taken to be `None`.
    #[serde(default)]
    #[builder(default = "None")]
    pub pure: Option<bool>,

    /// The basis-library directory. If `None`, the directory is taken from the
    /// `LIBINT_DATA_PATH` environment variable or the compiled-in default.
    ///
    /// If not specified, this will be taken to be `None`.
    #[serde(default)]
    #[builder(default = "None")]
    pub data_path: Option<PathBuf>,

    /// If set, the derivative permutation maps up to this order are built and summarised.
    ///
    /// If not specified, this will be taken to be `None`.
    #[serde(default)]
    #[builder(default = "None")]
    pub deriv_order: Option<usize>,
}

impl Input {
    /// Returns a builder to construct a new [`Input`].
    pub fn builder() -> InputBuilder {
        InputBuilder::default()
    }

    /// Assembles the basis set described by this input.
    ///
    /// # Errors
    ///
    /// Errors if the geometry cannot be read or the basis set cannot be assembled.
    pub fn assemble(&self) -> Result<BasisSet, anyhow::Error> {
        let mol = Molecule::from_xyz(&self.xyz)?;
        let library = match self.data_path.as_ref() {
            Some(path) => BasisLibrary::new(path)?,
            None => BasisLibrary::from_env()?,
        };
        let mut basis_set = BasisSet::from_library(&library, &self.basis, &mol.atoms)?;
        if let Some(pure) = self.pure {
            basis_set.set_pure(pure);
        }
        Ok(basis_set)
    }

    fn log_deriv_maps(&self, max_order: usize) -> Result<(), anyhow::Error> {
        ensure!(
            (1..=MAX_DERIV_ORDER).contains(&max_order),
            "Derivative order {max_order} is outside the supported range 1..={MAX_DERIV_ORDER}."
        );
        derivmap::initialize();
        log_subtitle("Derivative permutation maps");
        gbasis_output!("");
        gbasis_output!("{:>8}  {:>7}  {:>12}", "Bra-ket", "Order", "Derivatives");
        for braket in [BraKet::XsXx, BraKet::XxXx] {
            for order in 1..=max_order {
                let map = derivmap::instance(order, braket);
                debug_assert_eq!(map.shape()[3], nderivs(braket.ncenters(), order));
                gbasis_output!("{:>8}  {order:>7}  {:>12}", braket.to_string(), map.shape()[3]);
            }
        }
        gbasis_output!("");
        Ok(())
    }
}

impl InputHandle for Input {
    fn handle(&self) -> Result<(), anyhow::Error> {
        log_title("Basis-Set Assembly");
        gbasis_output!("");
        let canonical_name = canonicalise_name(&self.basis);
        gbasis_output!("{:<24}: {}", "Basis set", self.basis);
        gbasis_output!(
            "{:<24}: {}",
            "Library components",
            decompose_name(&canonical_name).join(", ")
        );
        gbasis_output!(
            "{:<24}: {}",
            "Cartesian d by default",
            nice_bool(uses_cartesian_d(&canonical_name))
        );
        gbasis_output!("{:<24}: {}", "Geometry", self.xyz.display());
        gbasis_output!("");

        let basis_set = self.assemble().map_err(|err| {
            gbasis_error!("{err}");
            err
        })?;
        basis_set.log_output_display();
        gbasis_output!("");

        if let Some(max_order) = self.deriv_order {
            self.log_deriv_maps(max_order)?;
        }
        Ok(())
    }
}
