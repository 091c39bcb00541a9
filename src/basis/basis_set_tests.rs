use nalgebra::Point3;
use proptest::prelude::*;

use crate::auxiliary::atom::Atom;
use crate::auxiliary::molecule::Molecule;
use crate::basis::basis_error::BasisError;
use crate::basis::basis_set::{self, BasisSet};
use crate::basis::library::BasisLibrary;
use crate::basis::shell::{Contraction, Shell};

const ROOT: &str = env!("CARGO_MANIFEST_DIR");

fn test_library() -> BasisLibrary {
    BasisLibrary::new(format!("{ROOT}/tests/basis")).unwrap()
}

fn o2() -> Vec<Atom> {
    Molecule::from_xyz_str("2\n\nO 0 0 0\nO 0 0 1.5").unwrap().atoms
}

fn h2o() -> Vec<Atom> {
    Molecule::from_xyz(format!("{ROOT}/tests/xyz/h2o.xyz"))
        .unwrap()
        .atoms
}

#[test]
fn test_basis_set_default() {
    let bs = BasisSet::default();
    assert_eq!(bs.max_l(), -1);
    assert_eq!(bs.nbf(), 0);
    assert_eq!(bs.max_nprim(), 0);
    assert!(bs.is_empty());
    assert!(bs.shell2bf().is_empty());
}

#[test]
fn test_basis_set_no_atoms() {
    let bs = BasisSet::from_library(&test_library(), "cc-pvdz", &[]).unwrap();
    assert!(bs.is_empty());
    assert_eq!(bs.nbf(), 0);
    assert_eq!(bs.max_l(), 0);
}

#[test]
fn test_basis_set_h2o_cc_pvdz() {
    let atoms = h2o();
    let bs = BasisSet::from_library(&test_library(), "cc-pVDZ", &atoms).unwrap();
    assert_eq!(bs.name(), "cc-pVDZ");
    assert_eq!(bs.len(), 12);
    assert_eq!(bs.nbf(), 24);
    assert_eq!(bs.max_l(), 2);
    assert_eq!(bs.max_nprim(), 8);
    assert_eq!(
        bs.shell2bf(),
        &[0, 1, 2, 3, 6, 9, 14, 15, 16, 19, 20, 21]
    );
    assert_eq!(
        bs.shell2atom(&atoms),
        vec![
            Some(0),
            Some(0),
            Some(0),
            Some(0),
            Some(0),
            Some(0),
            Some(1),
            Some(1),
            Some(1),
            Some(2),
            Some(2),
            Some(2)
        ]
    );
    assert_eq!(
        bs.atom2shell(&atoms),
        vec![vec![0, 1, 2, 3, 4, 5], vec![6, 7, 8], vec![9, 10, 11]]
    );
    assert_eq!(bs[6].origin(), &atoms[1].coordinates);
    assert_eq!(bs.iter().count(), bs.len());
}

#[test]
fn test_basis_set_o2_aug_cc_pvdz() {
    let atoms = o2();
    let bs = BasisSet::from_library(&test_library(), "aug-cc-pvdz", &atoms).unwrap();
    assert_eq!(bs.len(), 18);
    assert_eq!(bs.nbf(), 46);
    assert_eq!(bs.max_l(), 2);

    // Base shells then augmentation shells on each atom.
    let exps = bs.iter().map(|shell| shell.alpha()[0]).collect::<Vec<_>>();
    assert_eq!(exps[0], 11720.0);
    assert_eq!(exps[5], 1.185);
    assert_eq!(&exps[6..9], &[0.07896, 0.06856, 0.332]);
    assert_eq!(exps[9], 11720.0);
    assert_eq!(&exps[15..18], &[0.07896, 0.06856, 0.332]);
    assert!(bs.shells()[..9]
        .iter()
        .all(|shell| shell.origin() == &atoms[0].coordinates));
    assert!(bs.shells()[9..]
        .iter()
        .all(|shell| shell.origin() == &atoms[1].coordinates));
}

#[test]
fn test_basis_set_cartesian_d_convention() {
    let atoms = h2o();
    let bs = BasisSet::from_library(&test_library(), "6-31G_d_", &atoms).unwrap();
    assert_eq!(bs.nbf(), 19);
    let d_shell = &bs[5];
    assert_eq!(d_shell.contr()[0].l, 2);
    assert!(!d_shell.contr()[0].pure);

    let bs = BasisSet::from_library(&test_library(), "6-31g", &atoms).unwrap();
    assert_eq!(bs.len(), 9);
    assert_eq!(bs.nbf(), 13);
    assert_eq!(bs.max_l(), 1);
    assert_eq!(bs.max_nprim(), 6);
}

#[test]
fn test_basis_set_set_pure() {
    let atoms = h2o();
    let mut bs = BasisSet::from_library(&test_library(), "cc-pvdz", &atoms).unwrap();
    bs.set_pure(false);
    assert_eq!(bs.nbf(), 25);
    assert_eq!(bs.max_l(), 2);
    assert_eq!(*bs.shell2bf().last().unwrap() + bs[11].size(), bs.nbf());
    bs.set_pure(true);
    assert_eq!(bs.nbf(), 24);

    let mut bs = BasisSet::from_library(&test_library(), "6-31g_d_", &atoms).unwrap();
    bs.set_pure(true);
    assert_eq!(bs.nbf(), 18);
}

#[test]
fn test_basis_set_missing_element() {
    let atoms = vec![
        Atom::new(8, Point3::origin()).unwrap(),
        Atom::new(2, Point3::new(0.0, 0.0, 3.0)).unwrap(),
    ];
    let err = BasisSet::from_library(&test_library(), "aug-cc-pvdz", &atoms).unwrap_err();
    if let BasisError::MissingData {
        path,
        component,
        atomic_number,
    } = &err
    {
        assert!(path.ends_with("cc-pvdz.g94"));
        assert_eq!(component, "cc-pvdz");
        assert_eq!(*atomic_number, 2);
    } else {
        panic!("Expected a missing-data error, got {err}.");
    }
    assert!(err.to_string().contains("cc-pvdz"));
}

#[test]
fn test_basis_set_cabs_not_decomposed() {
    let atoms = o2();
    let bs = BasisSet::from_library(&test_library(), "aug-cc-pVTZ-CABS", &atoms).unwrap();
    assert_eq!(bs.len(), 6);
    assert_eq!(bs.max_l(), 3);
    assert_eq!(bs.nbf(), 2 * (1 + 3 + 7));
}

#[test]
fn test_basis_set_shell2atom_unmatched() {
    let atoms = o2();
    let bs = BasisSet::from_library(&test_library(), "sto-3g", &atoms).unwrap();
    let shifted = vec![Atom::new(8, Point3::new(0.0, 0.0, 1e-12)).unwrap()];
    assert!(bs.shell2atom(&shifted).iter().all(Option::is_none));
    assert_eq!(bs.atom2shell(&shifted), vec![Vec::<usize>::new()]);
}

#[test]
fn test_basis_set_display() {
    let bs = BasisSet::from_library(&test_library(), "6-31g", &o2()).unwrap();
    let table = bs.to_string();
    assert!(table.starts_with("Basis set `6-31g`: 10 shells, 18 functions"));
    assert_eq!(table.lines().count(), 4 + 10 + 2);
}

fn arb_shell() -> impl Strategy<Value = Shell> {
    (0u32..6, any::<bool>(), 1usize..5).prop_map(|(l, pure, nprim)| {
        Shell::new(
            (1..=nprim).map(|i| i as f64).collect(),
            vec![Contraction {
                l,
                pure,
                coeff: vec![1.0; nprim],
            }],
            Point3::origin(),
        )
        .unwrap()
    })
}

proptest! {
    #[test]
    fn test_basis_set_shell2bf_properties(shells in prop::collection::vec(arb_shell(), 1..24)) {
        let bs = BasisSet::from_shells("random", shells.clone());
        let offsets = bs.shell2bf();
        prop_assert_eq!(offsets.len(), bs.len());
        prop_assert_eq!(offsets[0], 0);
        prop_assert!(offsets.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(offsets[offsets.len() - 1] + bs[bs.len() - 1].size(), bs.nbf());
        prop_assert_eq!(bs.nbf(), basis_set::nbf(&shells));
        prop_assert_eq!(bs.max_nprim(), basis_set::max_nprim(&shells));
        prop_assert_eq!(bs.max_l(), basis_set::max_l(&shells));
    }

    #[test]
    fn test_basis_set_set_pure_consistent(
        shells in prop::collection::vec(arb_shell(), 1..24),
        pure in any::<bool>(),
    ) {
        let mut bs = BasisSet::from_shells("random", shells);
        bs.set_pure(pure);
        let expected = bs
            .iter()
            .map(|shell| {
                let l = shell.contr()[0].l as usize;
                if pure { 2 * l + 1 } else { (l + 1) * (l + 2) / 2 }
            })
            .sum::<usize>();
        prop_assert_eq!(bs.nbf(), expected);
        prop_assert_eq!(bs.shell2bf().to_vec(), basis_set::shell2bf(bs.shells()));
    }
}
