//! Auxiliary field schemas.
//!
//! An auxiliary field carries per-cell state the constitutive law reads and
//! writes during time stepping. The schema is an ordered list of subfields;
//! the engine lays out storage in declaration order, so the order here is
//! load-bearing.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Discretization space for an auxiliary subfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionSpace {
    Polynomial,
    Point,
}

impl Default for FunctionSpace {
    fn default() -> Self {
        FunctionSpace::Polynomial
    }
}

/// One named subfield of the auxiliary field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuxSubfield {
    pub name: String,
    pub components: usize,
    #[serde(default = "default_basis_order")]
    pub basis_order: u32,
    #[serde(default)]
    pub function_space: FunctionSpace,
}

fn default_basis_order() -> u32 {
    1
}

impl AuxSubfield {
    pub fn scalar(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            components: 1,
            basis_order: 1,
            function_space: FunctionSpace::default(),
        }
    }

    pub fn tensor(name: impl Into<String>, components: usize) -> Self {
        Self {
            name: name.into(),
            components,
            basis_order: 1,
            function_space: FunctionSpace::default(),
        }
    }
}

/// Ordered, duplicate-free collection of auxiliary subfields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuxiliaryFieldSchema {
    subfields: Vec<AuxSubfield>,
}

impl AuxiliaryFieldSchema {
    /// Build a schema, rejecting empty input and repeated subfield names.
    pub fn new(subfields: Vec<AuxSubfield>) -> Result<Self, ConfigurationError> {
        if subfields.is_empty() {
            return Err(ConfigurationError::EmptySchema);
        }
        let mut seen = BTreeSet::new();
        for subfield in &subfields {
            if !seen.insert(subfield.name.as_str()) {
                return Err(ConfigurationError::DuplicateSubfield {
                    name: subfield.name.clone(),
                });
            }
        }
        Ok(Self { subfields })
    }

    pub fn len(&self) -> usize {
        self.subfields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subfields.is_empty()
    }

    pub fn subfields(&self) -> &[AuxSubfield] {
        &self.subfields
    }

    pub fn contains(&self, name: &str) -> bool {
        self.subfields.iter().any(|s| s.name == name)
    }

    /// Subfield names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.subfields.iter().map(|s| s.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_preserves_declaration_order() {
        let schema = AuxiliaryFieldSchema::new(vec![
            AuxSubfield::tensor("total_strain", 4),
            AuxSubfield::tensor("stress", 4),
            AuxSubfield::tensor("viscous_strain_1", 4),
        ])
        .unwrap();
        let names: Vec<_> = schema.names().collect();
        assert_eq!(names, vec!["total_strain", "stress", "viscous_strain_1"]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = AuxiliaryFieldSchema::new(vec![
            AuxSubfield::tensor("stress", 4),
            AuxSubfield::tensor("stress", 4),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::DuplicateSubfield {
                name: "stress".to_string()
            }
        );
    }

    #[test]
    fn empty_schema_is_rejected() {
        assert_eq!(
            AuxiliaryFieldSchema::new(Vec::new()).unwrap_err(),
            ConfigurationError::EmptySchema
        );
    }

    #[test]
    fn subfield_defaults_apply_on_deserialization() {
        let subfield: AuxSubfield =
            serde_json::from_str(r#"{ "name": "stress", "components": 4 }"#).unwrap();
        assert_eq!(subfield.basis_order, 1);
        assert_eq!(subfield.function_space, FunctionSpace::Polynomial);
    }
}
