//! Angular momentum labels.

use phf::phf_map;


/// Alphabetical labels of angular momenta in the Gaussian convention. After `I`, the letters `J`
/// and `L` are skipped, as are `P` and `S` which already label lower angular momenta.
pub static ANGMOM_LABELS: [&str; 20] = [
    "S", "P", "D", "F", "G", "H", "I", "K", "M", "N", "O", "Q", "R", "T", "U", "V", "W", "X", "Y",
    "Z",
];

/// Indices of alphabetical labels of angular momenta.
pub static ANGMOM_INDICES: phf::Map<&'static str, u32> = phf_map! {
    "S" => 0,
    "P" => 1,
    "D" => 2,
    "F" => 3,
    "G" => 4,
    "H" => 5,
    "I" => 6,
    "K" => 7,
    "M" => 8,
    "N" => 9,
    "O" => 10,
    "Q" => 11,
    "R" => 12,
    "T" => 13,
    "U" => 14,
    "V" => 15,
    "W" => 16,
    "X" => 17,
    "Y" => 18,
    "Z" => 19,
};

/// Converts a single-letter angular momentum label (case-insensitive) to its $`l`$ value.
///
/// # Arguments
///
/// * `label` - The angular momentum label, *e.g.* `d` or `F`.
///
/// # Returns
///
/// The $`l`$ value, or `None` if `label` is not a recognised single-letter label.
pub fn angmom_from_label(label: &str) -> Option<u32> {
    if label.chars().count() != 1 {
        return None;
    }
    ANGMOM_INDICES.get(label.to_uppercase().as_str()).copied()
}

/// Converts an $`l`$ value to its alphabetical label, falling back to the number itself for
/// values beyond the tabulated labels.
pub fn angmom_label(l: u32) -> String {
    usize::try_from(l)
        .ok()
        .and_then(|l| ANGMOM_LABELS.get(l))
        .map(|label| label.to_string())
        .unwrap_or_else(|| l.to_string())
}
