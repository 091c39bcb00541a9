//! Permutation maps of geometric derivative indices under bra-ket swaps.
//!
//! The geometric derivatives of order $`n`$ of an integral over $`N`$ centres are indexed by the
//! non-decreasing $`n`$-tuples of Cartesian coordinates $`0, \ldots, 3N - 1`$, enumerated in
//! lexicographic order. Swapping the bra and the ket, the two centres of the bra, or the two
//! centres of the ket relabels the coordinates and so permutes these tuples. The maps in this
//! module give, for every combination of swaps, the index of the permuted tuple.

use std::fmt;

use itertools::Itertools;
use lazy_static::lazy_static;
use log;
use ndarray::Array4;
use rayon::prelude::*;

pub mod partition;

#[cfg(test)]
#[path = "derivmap_tests.rs"]
mod derivmap_tests;

/// The highest derivative order for which maps are cached.
pub const MAX_DERIV_ORDER: usize = 4;

lazy_static! {
    static ref DERIV_MAP_REGISTRY: DerivMapRegistry = DerivMapRegistry::new(MAX_DERIV_ORDER);
}

// ------
// BraKet
// ------

/// Enumerated type for the shapes of bra-ket pairs. `Xs` denotes a single centre paired with a
/// unit function and `Xx` a pair of centres.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BraKet {
    /// Two-centre integrals `(x s|x s)`.
    XsXs,

    /// Three-centre integrals `(x s|x x)`.
    XsXx,

    /// Three-centre integrals `(x x|x s)`.
    XxXs,

    /// Four-centre integrals `(x x|x x)`.
    XxXx,
}

impl BraKet {
    /// The number of centres carrying derivatives.
    pub fn ncenters(&self) -> usize {
        match self {
            BraKet::XsXs => 2,
            BraKet::XsXx | BraKet::XxXs => 3,
            BraKet::XxXx => 4,
        }
    }

    /// Returns `true` if permutation maps are available for this shape.
    pub fn has_deriv_map(&self) -> bool {
        self.swaps().is_some()
    }

    /// The coordinate relabelling of each swap and the swap combinations that apply to this
    /// shape.
    fn swaps(&self) -> Option<Swaps> {
        match self {
            BraKet::XxXx => Some(Swaps {
                braket: vec![6, 7, 8, 9, 10, 11, 0, 1, 2, 3, 4, 5],
                bra: vec![3, 4, 5, 0, 1, 2, 6, 7, 8, 9, 10, 11],
                ket: vec![0, 1, 2, 3, 4, 5, 9, 10, 11, 6, 7, 8],
                combinations: (0..2)
                    .cartesian_product(0..2)
                    .cartesian_product(0..2)
                    .map(|((i, j), k)| (i, j, k))
                    .collect(),
            }),
            BraKet::XsXx => Some(Swaps {
                braket: (0..9).collect(),
                bra: (0..9).collect(),
                ket: vec![0, 1, 2, 6, 7, 8, 3, 4, 5],
                combinations: vec![(0, 0, 0), (0, 0, 1)],
            }),
            BraKet::XsXs | BraKet::XxXs => None,
        }
    }
}

impl fmt::Display for BraKet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BraKet::XsXs => "(xs|xs)",
            BraKet::XsXx => "(xs|xx)",
            BraKet::XxXs => "(xx|xs)",
            BraKet::XxXx => "(xx|xx)",
        };
        write!(f, "{label}")
    }
}

/// Coordinate relabellings for the bra-ket swap, the bra swap, and the ket swap.
struct Swaps {
    braket: Vec<usize>,
    bra: Vec<usize>,
    ket: Vec<usize>,

    /// The applicable `(braket, bra, ket)` swap flags.
    combinations: Vec<(usize, usize, usize)>,
}

// -------------
// Map generator
// -------------

/// Returns the number of distinct geometric derivatives of a given order over a number of
/// centres, $`\binom{3N + n - 1}{n}`$.
pub fn nderivs(ncenters: usize, order: usize) -> usize {
    let nparams = 3 * ncenters;
    (1..=order).fold(1, |acc, d| acc * (nparams + d - 1) / d)
}

/// Generates the permutation map of the derivatives of a given order for a bra-ket shape.
///
/// # Arguments
///
/// * `order` - The derivative order, at least `1`.
/// * `braket` - The bra-ket shape.
///
/// # Returns
///
/// An array of shape `(2, 2, 2, nderivs)` whose element `[i, j, k, d]` is the index of derivative
/// `d` after applying the bra-ket swap if `i == 1`, the bra swap if `j == 1`, and the ket swap if
/// `k == 1`. Swap combinations that do not apply to `braket` are left as zero.
///
/// # Panics
///
/// Panics if `order` is zero or if `braket` has no permutation map.
pub fn generate_deriv_map(order: usize, braket: BraKet) -> Array4<usize> {
    assert!(order > 0, "Derivative maps require an order of at least 1.");
    let swaps = braket
        .swaps()
        .unwrap_or_else(|| panic!("No derivative map is available for {braket} integrals."));
    let nparams = 3 * braket.ncenters();
    let derivs = (0..nparams)
        .combinations_with_replacement(order)
        .collect_vec();
    let n = derivs.len();
    log::debug!("Generating the {braket} derivative map of order {order} ({n} derivatives).");

    let mut map = Array4::<usize>::zeros((2, 2, 2, n));
    for &(i, j, k) in swaps.combinations.iter() {
        for (d, deriv) in derivs.iter().enumerate() {
            let mut permuted = deriv
                .iter()
                .map(|&x| {
                    let x = if i == 1 { swaps.braket[x] } else { x };
                    let x = if j == 1 { swaps.bra[x] } else { x };
                    if k == 1 {
                        swaps.ket[x]
                    } else {
                        x
                    }
                })
                .collect_vec();
            permuted.sort_unstable();
            map[[i, j, k, d]] = derivs
                .binary_search(&permuted)
                .unwrap_or_else(|_| panic!("Permuted derivative {permuted:?} not found."));
        }
    }
    map
}

// ----------------
// DerivMapRegistry
// ----------------

/// A store of the derivative maps of all supported shapes up to a maximum order.
pub struct DerivMapRegistry {
    max_order: usize,

    /// Maps of `(xs|xx)` integrals; element `n - 1` holds order `n`.
    xsxx: Vec<Array4<usize>>,

    /// Maps of `(xx|xx)` integrals; element `n - 1` holds order `n`.
    xxxx: Vec<Array4<usize>>,
}

impl DerivMapRegistry {
    /// Generates the maps of all supported shapes for orders `1` to `max_order`. The orders are
    /// generated in parallel.
    pub fn new(max_order: usize) -> Self {
        let build = |braket: BraKet| {
            (1..=max_order)
                .into_par_iter()
                .map(|order| generate_deriv_map(order, braket))
                .collect::<Vec<_>>()
        };
        Self {
            max_order,
            xsxx: build(BraKet::XsXx),
            xxxx: build(BraKet::XxXx),
        }
    }

    /// The highest order held by this registry.
    pub fn max_order(&self) -> usize {
        self.max_order
    }

    /// Returns the map of a given order for a bra-ket shape.
    ///
    /// # Panics
    ///
    /// Panics if `order` is zero or exceeds [`Self::max_order`], or if `braket` has no
    /// permutation map.
    pub fn get(&self, order: usize, braket: BraKet) -> &Array4<usize> {
        assert!(
            (1..=self.max_order).contains(&order),
            "Derivative order {order} is outside the supported range 1..={}.",
            self.max_order
        );
        let maps = match braket {
            BraKet::XsXx => &self.xsxx,
            BraKet::XxXx => &self.xxxx,
            BraKet::XsXs | BraKet::XxXs => {
                panic!("No derivative map is available for {braket} integrals.")
            }
        };
        &maps[order - 1]
    }
}

/// Builds the process-wide derivative maps if they have not been built yet. Calling this is
/// optional as [`instance`] builds them on first use.
pub fn initialize() {
    lazy_static::initialize(&DERIV_MAP_REGISTRY);
}

/// Returns the process-wide derivative map of a given order for a bra-ket shape.
///
/// # Panics
///
/// Panics if `order` is zero or exceeds [`MAX_DERIV_ORDER`], or if `braket` has no permutation
/// map.
pub fn instance(order: usize, braket: BraKet) -> &'static Array4<usize> {
    DERIV_MAP_REGISTRY.get(order, braket)
}
