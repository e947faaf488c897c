//! Error types for the configuration phase.
//!
//! All errors here are fatal to the configuration step they occur in: callers are
//! expected to discard the partially configured object rather than repair it.

use thiserror::Error;

use crate::quadrature::CellType;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Sequencing error: an operation requiring a native engine handle was invoked
    /// before the handle was created.
    #[error("native handle for {component} has not been created")]
    HandleNotCreated { component: &'static str },

    /// The auxiliary field schema omits a state variable required by the
    /// constitutive law.
    #[error("material '{material}': auxiliary field schema is missing required subfield '{subfield}'")]
    MissingSubfield { material: String, subfield: String },

    #[error("auxiliary field schema declares duplicate subfield '{name}'")]
    DuplicateSubfield { name: String },

    #[error("auxiliary field schema must declare at least one subfield")]
    EmptySchema,

    /// The property database cannot supply a required parameter for a mesh region.
    #[error("property database '{database}' has no value for parameter '{parameter}' in region {region}")]
    UnresolvedParameter {
        database: String,
        region: i32,
        parameter: String,
    },

    /// The property database does not expose a dataset implied by the chosen options.
    #[error("property database '{database}' does not provide dataset '{dataset}'")]
    MissingDataset { database: String, dataset: String },

    #[error("unsupported quadrature rule: {cell:?} of degree {degree}")]
    UnsupportedQuadrature { cell: CellType, degree: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
