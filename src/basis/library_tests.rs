use std::env;
use std::path::Path;

use serial_test::serial;

use crate::basis::basis_error::BasisError;
use crate::basis::library::{
    canonicalise_name, decompose_name, uses_cartesian_d, BasisLibrary, DATA_PATH_ENV,
};

const ROOT: &str = env!("CARGO_MANIFEST_DIR");

#[test]
fn test_library_canonicalise_name() {
    assert_eq!(canonicalise_name("cc-pVDZ"), "cc-pvdz");
    assert_eq!(canonicalise_name("6-31G_d_"), "6-31g_d_");
    assert_eq!(canonicalise_name("def2-SVP/J"), "def2-svpIj");
    assert_eq!(canonicalise_name("STO-3G"), "sto-3g");
}

#[test]
fn test_library_cartesian_d_rules() {
    assert!(uses_cartesian_d("3-21g"));
    assert!(uses_cartesian_d("4-31g"));
    assert!(uses_cartesian_d("6-31g"));
    assert!(uses_cartesian_d("6-31g_d_p_"));
    assert!(uses_cartesian_d("6-31+g"));
    assert!(uses_cartesian_d("6-31"));
    assert!(!uses_cartesian_d("6-311g_d_p_"));
    assert!(!uses_cartesian_d("4-31"));
    assert!(!uses_cartesian_d("cc-pvdz"));
    assert!(!uses_cartesian_d("sto-3g"));
    assert!(!uses_cartesian_d("x6-31g"));
}

#[test]
fn test_library_decompose_name() {
    assert_eq!(
        decompose_name("aug-cc-pvdz"),
        vec!["cc-pvdz", "augmentation-cc-pvdz"]
    );
    assert_eq!(
        decompose_name("aug-cc-pvtz-ri"),
        vec!["cc-pvtz-ri", "augmentation-cc-pvtz-ri"]
    );
    assert_eq!(decompose_name("aug-cc-pvtz-cabs"), vec!["aug-cc-pvtz-cabs"]);
    assert_eq!(decompose_name("cc-pvdz"), vec!["cc-pvdz"]);
    assert_eq!(decompose_name("aug-pcseg-1"), vec!["aug-pcseg-1"]);
}

#[test]
fn test_library_new_rejects_missing_directory() {
    let err = BasisLibrary::new(format!("{ROOT}/tests/no-such-directory")).unwrap_err();
    assert!(matches!(err, BasisError::Configuration(_)));
    let err = BasisLibrary::new(format!("{ROOT}/tests/basis/cc-pvdz.g94")).unwrap_err();
    assert!(matches!(err, BasisError::Configuration(_)));
}

#[test]
fn test_library_load_components_in_order() {
    let library = BasisLibrary::new(format!("{ROOT}/tests/basis")).unwrap();
    let components = library.load("aug-cc-pVDZ").unwrap();
    assert_eq!(
        components.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        vec!["cc-pvdz", "augmentation-cc-pvdz"]
    );
    assert!(components[0].path.ends_with("cc-pvdz.g94"));
    assert!(components[1].path.ends_with("augmentation-cc-pvdz.g94"));
    assert_eq!(components[0].templates.get(8).len(), 6);
    assert_eq!(components[1].templates.get(8).len(), 3);
}

#[test]
fn test_library_load_missing_component() {
    let library = BasisLibrary::new(format!("{ROOT}/tests/basis")).unwrap();
    let err = library.load("def2-svp").unwrap_err();
    assert!(matches!(err, BasisError::Io { .. }));
    assert!(err.to_string().contains("def2-svp.g94"));
}

#[test]
#[serial]
fn test_library_from_env() {
    env::set_var(DATA_PATH_ENV, format!("{ROOT}/tests/basis"));
    let library = BasisLibrary::from_env().unwrap();
    assert_eq!(library.data_path(), Path::new(&format!("{ROOT}/tests/basis")));

    env::set_var(DATA_PATH_ENV, format!("{ROOT}/tests/no-such-directory"));
    assert!(matches!(
        BasisLibrary::from_env(),
        Err(BasisError::Configuration(_))
    ));

    env::remove_var(DATA_PATH_ENV);
    let library = BasisLibrary::from_env().unwrap();
    assert_eq!(library.data_path(), BasisLibrary::default_data_path());
}
