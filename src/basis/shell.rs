//! Contracted Gaussian shells and the ordering of their functions.

use std::fmt;
use std::slice::Iter;

use anyhow::{self, format_err};
use derive_builder::Builder;
use itertools::Itertools;
use nalgebra::Point3;

use crate::angmom::angmom_label;

#[cfg(test)]
#[path = "shell_tests.rs"]
mod shell_tests;

// -------------------
// Shell order structs
// -------------------

// ~~~~~~~~~
// PureOrder
// ~~~~~~~~~

/// Structure to contain the ordering of solid-harmonic Gaussians of a certain rank.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct PureOrder {
    /// A sequence of $`m_l`$ values giving the ordering of the pure Gaussians.
    mls: Vec<i32>,

    /// The rank of the pure Gaussians.
    pub lpure: u32,
}

impl PureOrder {
    /// Constructs a new [`PureOrder`] structure for a specified rank with increasing-$`m`$ order,
    /// which is the only ordering used for pure shells in this crate.
    ///
    /// # Arguments
    ///
    /// * `lpure` - The required pure Gaussian rank.
    #[must_use]
    pub fn increasingm(lpure: u32) -> Self {
        let lpure_i32 = i32::try_from(lpure).expect("`lpure` cannot be converted to `i32`.");
        let mls = (-lpure_i32..=lpure_i32).collect_vec();
        Self { mls, lpure }
    }

    /// Iterates over the constituent $`m_l`$ values.
    pub fn iter(&'_ self) -> Iter<'_, i32> {
        self.mls.iter()
    }

    /// Returns the number of pure components in the shell.
    pub fn ncomps(&self) -> usize {
        self.mls.len()
    }
}

impl fmt::Display for PureOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pure rank: {}", self.lpure)?;
        writeln!(f, "Order:")?;
        for m in self.iter() {
            writeln!(f, "  {m:+}")?;
        }
        Ok(())
    }
}

// ~~~~~~~~~
// CartOrder
// ~~~~~~~~~

/// Structure to contain the ordering of Cartesian Gaussians of a certain rank.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct CartOrder {
    /// A sequence of $`(l_x, l_y, l_z)`$ tuples giving the ordering of the Cartesian Gaussians.
    cart_tuples: Vec<(u32, u32, u32)>,

    /// The rank of the Cartesian Gaussians.
    pub lcart: u32,
}

impl CartOrder {
    /// Constructs a new [`CartOrder`] structure for a specified rank with lexicographic order,
    /// *e.g.* `xx, xy, xz, yy, yz, zz` for rank 2.
    ///
    /// # Arguments
    ///
    /// * `lcart` - The required Cartesian Gaussian rank.
    #[must_use]
    pub fn lex(lcart: u32) -> Self {
        let cart_tuples = (0..=lcart)
            .rev()
            .flat_map(|lx| (0..=(lcart - lx)).rev().map(move |ly| (lx, ly, lcart - lx - ly)))
            .collect_vec();
        Self { cart_tuples, lcart }
    }

    /// Iterates over the constituent tuples.
    pub fn iter(&'_ self) -> Iter<'_, (u32, u32, u32)> {
        self.cart_tuples.iter()
    }

    /// Returns the number of Cartesian components in the shell.
    pub fn ncomps(&self) -> usize {
        self.cart_tuples.len()
    }
}

impl fmt::Display for CartOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cartesian rank: {}", self.lcart)?;
        writeln!(f, "Order:")?;
        for cart_tuple in self.iter() {
            writeln!(f, "  {}", cart_tuple_to_str(cart_tuple))?;
        }
        Ok(())
    }
}

/// Translates a Cartesian exponent tuple to a flat string, *e.g.* `(2, 1, 0)` to `xxy`.
pub(crate) fn cart_tuple_to_str(cart_tuple: &(u32, u32, u32)) -> String {
    if cart_tuple.0 + cart_tuple.1 + cart_tuple.2 == 0u32 {
        return "1".to_string();
    }
    [cart_tuple.0, cart_tuple.1, cart_tuple.2]
        .iter()
        .zip(["x", "y", "z"])
        .map(|(&l, cart)| cart.repeat(l as usize))
        .collect::<String>()
}

// ~~~~~~~~~~
// ShellOrder
// ~~~~~~~~~~

/// Enumerated type to indicate the ordering of the functions in a contraction.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum ShellOrder {
    /// Variant for solid-harmonic functions.
    Pure(PureOrder),

    /// Variant for Cartesian functions.
    Cart(CartOrder),
}

impl ShellOrder {
    /// Returns the labels of the functions in this ordering, *e.g.* `xy` for Cartesian functions
    /// or `+1` for solid harmonics.
    pub fn function_labels(&self) -> Vec<String> {
        match self {
            ShellOrder::Pure(po) => po.iter().map(|m| format!("{m:+}")).collect(),
            ShellOrder::Cart(co) => co.iter().map(cart_tuple_to_str).collect(),
        }
    }

    /// Returns the number of functions in this ordering.
    pub fn ncomps(&self) -> usize {
        match self {
            ShellOrder::Pure(po) => po.ncomps(),
            ShellOrder::Cart(co) => co.ncomps(),
        }
    }
}

impl fmt::Display for ShellOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellOrder::Pure(_) => write!(f, "Pure ({})", self.function_labels().join(", ")),
            ShellOrder::Cart(_) => write!(f, "Cart ({})", self.function_labels().join(", ")),
        }
    }
}

// -----------
// Contraction
// -----------

/// Structure for one contraction of the primitives of a shell.
#[derive(Clone, PartialEq, Debug)]
pub struct Contraction {
    /// The angular momentum of the contraction.
    pub l: u32,

    /// Whether the contraction consists of solid harmonics (`true`) or Cartesian functions.
    pub pure: bool,

    /// The contraction coefficients, one for each primitive of the parent shell.
    pub coeff: Vec<f64>,
}

impl Contraction {
    /// The number of functions in this contraction: $`2l + 1`$ if pure, otherwise
    /// $`(l + 1)(l + 2)/2`$.
    pub fn size(&self) -> usize {
        if self.pure {
            2 * self.l as usize + 1
        } else {
            self.cartesian_size()
        }
    }

    /// The number of Cartesian functions of this contraction's angular momentum.
    pub fn cartesian_size(&self) -> usize {
        let l = self.l as usize;
        (l + 1) * (l + 2) / 2
    }

    /// The ordering of the functions in this contraction.
    pub fn shell_order(&self) -> ShellOrder {
        if self.pure {
            ShellOrder::Pure(PureOrder::increasingm(self.l))
        } else {
            ShellOrder::Cart(CartOrder::lex(self.l))
        }
    }
}

// -----
// Shell
// -----

/// A contracted Gaussian shell: primitives sharing exponents and an origin, combined by one or
/// more contractions.
#[derive(Clone, Builder, PartialEq, Debug)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct Shell {
    /// The primitive exponents.
    alpha: Vec<f64>,

    /// The contractions of the primitives.
    contr: Vec<Contraction>,

    /// The origin of the shell in Bohr.
    #[builder(default = "Point3::origin()")]
    origin: Point3<f64>,
}

impl ShellBuilder {
    fn validate(&self) -> Result<(), String> {
        let alpha = self
            .alpha
            .as_ref()
            .ok_or_else(|| "No exponents found.".to_string())?;
        let contr = self
            .contr
            .as_ref()
            .ok_or_else(|| "No contractions found.".to_string())?;
        if alpha.is_empty() {
            return Err("A shell must have at least one primitive.".to_string());
        }
        if let Some(a) = alpha.iter().find(|a| !(a.is_finite() && **a > 0.0)) {
            return Err(format!("Invalid exponent {a}: exponents must be positive."));
        }
        if contr.is_empty() {
            return Err("A shell must have at least one contraction.".to_string());
        }
        if let Some(c) = contr.iter().find(|c| c.coeff.len() != alpha.len()) {
            return Err(format!(
                "Contraction with l = {} has {} coefficients, but the shell has {} exponents.",
                c.l,
                c.coeff.len(),
                alpha.len()
            ));
        }
        Ok(())
    }
}

impl Shell {
    /// Returns a builder to construct a new [`Shell`].
    pub fn builder() -> ShellBuilder {
        ShellBuilder::default()
    }

    /// Constructs a new shell.
    ///
    /// # Arguments
    ///
    /// * `alpha` - The primitive exponents.
    /// * `contr` - The contractions, each with as many coefficients as there are exponents.
    /// * `origin` - The origin of the shell in Bohr.
    ///
    /// # Errors
    ///
    /// Errors if there are no exponents, if any exponent is not positive, if there are no
    /// contractions, or if any contraction's length differs from the number of exponents.
    pub fn new(
        alpha: Vec<f64>,
        contr: Vec<Contraction>,
        origin: Point3<f64>,
    ) -> Result<Self, anyhow::Error> {
        Self::builder()
            .alpha(alpha)
            .contr(contr)
            .origin(origin)
            .build()
            .map_err(|err| format_err!(err))
    }

    /// The primitive exponents.
    pub fn alpha(&self) -> &[f64] {
        &self.alpha
    }

    /// The contractions.
    pub fn contr(&self) -> &[Contraction] {
        &self.contr
    }

    /// The origin of the shell.
    pub fn origin(&self) -> &Point3<f64> {
        &self.origin
    }

    /// Translates the shell to a new origin.
    pub fn move_to(&mut self, origin: Point3<f64>) -> &mut Self {
        self.origin = origin;
        self
    }

    /// Sets the purity of the leading contraction.
    pub(crate) fn set_pure(&mut self, pure: bool) -> &mut Self {
        if let Some(c) = self.contr.first_mut() {
            c.pure = pure;
        }
        self
    }

    /// The number of functions in this shell, summed over all contractions.
    pub fn size(&self) -> usize {
        self.contr.iter().map(Contraction::size).sum()
    }

    /// The number of Cartesian functions in this shell, summed over all contractions.
    pub fn cartesian_size(&self) -> usize {
        self.contr.iter().map(Contraction::cartesian_size).sum()
    }

    /// The number of primitives.
    pub fn nprim(&self) -> usize {
        self.alpha.len()
    }

    /// The number of contractions.
    pub fn ncontr(&self) -> usize {
        self.contr.len()
    }

    /// The highest angular momentum over all contractions.
    pub fn max_l(&self) -> u32 {
        self.contr.iter().map(|c| c.l).max().unwrap_or(0)
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Shell at ({:+.7}, {:+.7}, {:+.7})",
            self.origin[0], self.origin[1], self.origin[2]
        )?;
        for c in self.contr.iter() {
            writeln!(
                f,
                "  {} ({}), {} function{}",
                angmom_label(c.l),
                if c.pure { "pure" } else { "cart" },
                c.size(),
                if c.size() == 1 { "" } else { "s" }
            )?;
        }
        writeln!(
            f,
            "  {:>16}{}",
            "Exponent",
            self.contr
                .iter()
                .map(|c| format!("{:>16}", format!("c({})", angmom_label(c.l))))
                .join("")
        )?;
        for (i, a) in self.alpha.iter().enumerate() {
            writeln!(
                f,
                "  {a:>16.8e}{}",
                self.contr
                    .iter()
                    .map(|c| format!("{:>16.8e}", c.coeff[i]))
                    .join("")
            )?;
        }
        Ok(())
    }
}
