//! Reading and writing of configuration files, and formatted output.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{self, format_err};
use serde::de::DeserializeOwned;
use serde_yaml;

pub(crate) mod format;


/// Reads a YAML configuration file and deserialises it into an appropriate structure.
///
/// # Arguments
///
/// * `name` - The name of the file to be read in (with its `.yml` or `.yaml` extension).
///
/// # Returns
///
/// A `Result` containing the structure deserialised from the read-in file.
pub fn read_yaml<T, P: AsRef<Path>>(name: P) -> Result<T, anyhow::Error>
where
    T: DeserializeOwned,
{
    let file = File::open(&name).map_err(|err| {
        format_err!("Unable to open {}: {err}.", name.as_ref().display())
    })?;
    let mut reader = BufReader::new(file);
    serde_yaml::from_reader(&mut reader).map_err(|err| format_err!(err))
}
