//! Errors raised while locating, parsing, and assembling basis sets.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Enumerated type for errors encountered while constructing basis sets.
#[derive(Debug)]
pub enum BasisError {
    /// Variant for an unusable basis-library location. The associated string describes the
    /// problem.
    Configuration(String),

    /// Variant for a library file that cannot be read.
    Io {
        /// The path of the file.
        path: PathBuf,

        /// The underlying I/O error.
        source: io::Error,
    },

    /// Variant for malformed contents in a library file.
    DataFormat {
        /// The path (or display name) of the offending file.
        path: PathBuf,

        /// A description of the problem including the offending token.
        message: String,
    },

    /// Variant for an element that has no shells in a basis-set component.
    MissingData {
        /// The path of the component file.
        path: PathBuf,

        /// The name of the component.
        component: String,

        /// The atomic number of the element without shells.
        atomic_number: u32,
    },
}

impl BasisError {
    /// Constructs a [`BasisError::DataFormat`] error for a file.
    pub(crate) fn data_format<P: Into<PathBuf>, S: Into<String>>(path: P, message: S) -> Self {
        BasisError::DataFormat {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for BasisError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BasisError::Configuration(msg) => write!(f, "Basis configuration error: {msg}"),
            BasisError::Io { path, source } => {
                write!(f, "Unable to read basis file {}: {source}", path.display())
            }
            BasisError::DataFormat { path, message } => {
                write!(f, "Invalid basis data in {}: {message}", path.display())
            }
            BasisError::MissingData {
                path,
                component,
                atomic_number,
            } => write!(
                f,
                "Basis component `{component}` in {} has no shells for atomic number \
                {atomic_number}",
                path.display()
            ),
        }
    }
}

impl Error for BasisError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BasisError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
