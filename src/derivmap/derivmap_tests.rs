use std::collections::HashSet;
use std::ptr;

use itertools::Itertools;

use crate::derivmap::partition::cartesian_deriv_indices;
use crate::derivmap::{
    generate_deriv_map, initialize, instance, nderivs, BraKet, DerivMapRegistry, MAX_DERIV_ORDER,
};

#[test]
fn test_derivmap_nderivs() {
    assert_eq!(nderivs(4, 1), 12);
    assert_eq!(nderivs(3, 1), 9);
    assert_eq!(nderivs(4, 2), 78);
    assert_eq!(nderivs(3, 2), 45);
    assert_eq!(nderivs(4, 4), 1365);
    assert_eq!(nderivs(2, 0), 1);
}

#[test]
fn test_derivmap_shapes() {
    for order in 1..=MAX_DERIV_ORDER {
        let map = generate_deriv_map(order, BraKet::XxXx);
        assert_eq!(map.shape(), &[2, 2, 2, nderivs(4, order)]);
        let map = generate_deriv_map(order, BraKet::XsXx);
        assert_eq!(map.shape(), &[2, 2, 2, nderivs(3, order)]);
    }
    assert!(BraKet::XxXx.has_deriv_map());
    assert!(BraKet::XsXx.has_deriv_map());
    assert!(!BraKet::XsXs.has_deriv_map());
    assert!(!BraKet::XxXs.has_deriv_map());
}

#[test]
fn test_derivmap_xsxx_first_order() {
    let map = generate_deriv_map(1, BraKet::XsXx);
    assert_eq!(
        map.slice(ndarray::s![0, 0, 0, ..]).to_vec(),
        (0..9).collect_vec()
    );
    assert_eq!(
        map.slice(ndarray::s![0, 0, 1, ..]).to_vec(),
        vec![0, 1, 2, 6, 7, 8, 3, 4, 5]
    );
    // Swap combinations that do not apply to (xs|xx) are left as zero.
    assert!(map.slice(ndarray::s![1, .., .., ..]).iter().all(|&x| x == 0));
    assert!(map.slice(ndarray::s![0, 1, .., ..]).iter().all(|&x| x == 0));
}

#[test]
fn test_derivmap_xxxx_first_order() {
    let map = generate_deriv_map(1, BraKet::XxXx);
    assert_eq!(
        map.slice(ndarray::s![1, 0, 0, ..]).to_vec(),
        vec![6, 7, 8, 9, 10, 11, 0, 1, 2, 3, 4, 5]
    );
    assert_eq!(
        map.slice(ndarray::s![0, 1, 0, ..]).to_vec(),
        vec![3, 4, 5, 0, 1, 2, 6, 7, 8, 9, 10, 11]
    );
    assert_eq!(
        map.slice(ndarray::s![0, 0, 1, ..]).to_vec(),
        vec![0, 1, 2, 3, 4, 5, 9, 10, 11, 6, 7, 8]
    );
    // Bra-ket swap, then bra swap, then ket swap.
    assert_eq!(
        map.slice(ndarray::s![1, 1, 1, ..]).to_vec(),
        vec![9, 10, 11, 6, 7, 8, 3, 4, 5, 0, 1, 2]
    );
    assert_eq!(
        map.slice(ndarray::s![1, 1, 0, ..]).to_vec(),
        vec![6, 7, 8, 9, 10, 11, 3, 4, 5, 0, 1, 2]
    );
}

#[test]
fn test_derivmap_xxxx_second_order() {
    let map = generate_deriv_map(2, BraKet::XxXx);
    // (0, 0) -> (6, 6) under the bra-ket swap. The index of (6, 6) is the number of tuples
    // starting with 0..6 plus zero.
    let index_66 = (0..6).map(|a| 12 - a).sum::<usize>();
    assert_eq!(map[[1, 0, 0, 0]], index_66);
    // (0, 3) -> (0, 3) under the bra swap then sorting.
    assert_eq!(map[[0, 1, 0, 3]], 3);
}

#[test]
fn test_derivmap_rows_are_permutations() {
    for order in 1..=3 {
        for braket in [BraKet::XxXx, BraKet::XsXx] {
            let map = generate_deriv_map(order, braket);
            let n = map.shape()[3];
            let combos: Vec<(usize, usize, usize)> = match braket {
                BraKet::XxXx => (0..2)
                    .cartesian_product(0..2)
                    .cartesian_product(0..2)
                    .map(|((i, j), k)| (i, j, k))
                    .collect(),
                _ => vec![(0, 0, 0), (0, 0, 1)],
            };
            for (i, j, k) in combos {
                let row = map.slice(ndarray::s![i, j, k, ..]);
                assert_eq!(row.iter().copied().collect::<HashSet<_>>().len(), n);
                assert!(row.iter().all(|&x| x < n));
            }
        }
    }
}

#[test]
fn test_derivmap_single_swaps_are_involutions() {
    for order in 1..=MAX_DERIV_ORDER {
        let map = instance(order, BraKet::XxXx);
        let n = map.shape()[3];
        for (i, j, k) in [(1, 0, 0), (0, 1, 0), (0, 0, 1)] {
            assert!((0..n).all(|d| map[[i, j, k, map[[i, j, k, d]]]] == d));
        }
        assert!((0..n).all(|d| map[[0, 0, 0, d]] == d));
    }
}

#[test]
fn test_derivmap_matches_partition_order() {
    // Sorted derivative tuples and derivative count vectors enumerate the same derivatives in the
    // same order.
    let tuples = (0..9).combinations_with_replacement(2).collect_vec();
    let counts = cartesian_deriv_indices(3, 2).collect_vec();
    assert_eq!(tuples.len(), counts.len());
    for (tuple, count) in tuples.iter().zip(counts.iter()) {
        let mut expected = vec![0; 9];
        tuple.iter().for_each(|&x| expected[x] += 1);
        assert_eq!(&expected, count);
    }
}

#[test]
fn test_derivmap_registry() {
    let registry = DerivMapRegistry::new(2);
    assert_eq!(registry.max_order(), 2);
    assert_eq!(registry.get(2, BraKet::XsXx), &generate_deriv_map(2, BraKet::XsXx));

    initialize();
    initialize();
    let first = instance(3, BraKet::XxXx);
    let second = instance(3, BraKet::XxXx);
    assert!(ptr::eq(first, second));
    assert_eq!(first, &generate_deriv_map(3, BraKet::XxXx));
}

#[test]
#[should_panic]
fn test_derivmap_xsxs_unsupported() {
    instance(1, BraKet::XsXs);
}

#[test]
#[should_panic]
fn test_derivmap_xxxs_unsupported() {
    generate_deriv_map(1, BraKet::XxXs);
}

#[test]
#[should_panic]
fn test_derivmap_order_zero() {
    instance(0, BraKet::XxXx);
}

#[test]
#[should_panic]
fn test_derivmap_order_too_high() {
    DerivMapRegistry::new(1).get(2, BraKet::XsXx);
}
