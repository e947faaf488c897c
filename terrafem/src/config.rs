//! JSON-backed material configuration.
//!
//! The configuration layer deserializes a material description, remembers for
//! each top-level property whether it came from the file or from a default,
//! and builds the runtime material from it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::NativeMaterial;
use crate::error::ConfigurationError;
use crate::materials::{
    AuxSubfield, AuxiliaryFieldSchema, GeneralizedMaxwellLaw, GeneralizedMaxwellMaterial,
    MaterialOptions,
};
use crate::properties::RegionValueDatabase;
use crate::quadrature::{CellType, GaussQuadrature};

/// Where a configuration value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueOrigin {
    Default,
    ConfigurationFile,
}

impl ValueOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueOrigin::Default => "default",
            ValueOrigin::ConfigurationFile => "configuration file",
        }
    }
}

/// Quadrature settings for the material's integration operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadratureConfig {
    pub cell: CellType,
    #[serde(default = "default_degree")]
    pub degree: u32,
}

fn default_degree() -> u32 {
    2
}

impl QuadratureConfig {
    pub fn build(&self) -> GaussQuadrature {
        GaussQuadrature::new(self.cell, self.degree)
    }
}

/// Top-level properties whose provenance is tracked.
const KNOWN_PROPERTIES: &[&str] = &[
    "id",
    "label",
    "use_inertia",
    "use_body_force",
    "use_reference_state",
    "maxwell_elements",
];

/// One material block of a configuration file.
#[derive(Debug, Deserialize)]
pub struct MaterialConfig {
    pub id: i32,
    pub label: String,
    #[serde(default)]
    pub use_inertia: bool,
    #[serde(default)]
    pub use_body_force: bool,
    #[serde(default)]
    pub use_reference_state: bool,
    #[serde(default = "default_maxwell_elements")]
    pub maxwell_elements: usize,
    pub db_properties: RegionValueDatabase,
    /// Empty means "derive the schema from the constitutive law".
    #[serde(default)]
    pub auxiliary_subfields: Vec<AuxSubfield>,
    pub quadrature: QuadratureConfig,
    #[serde(skip)]
    origins: BTreeMap<String, ValueOrigin>,
}

fn default_maxwell_elements() -> usize {
    1
}

impl MaterialConfig {
    pub fn from_json_str(input: &str) -> Result<Self, ConfigurationError> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| ConfigurationError::InvalidConfiguration(e.to_string()))?;
        Self::from_json(value)
    }

    pub fn from_json(value: Value) -> Result<Self, ConfigurationError> {
        let mut config: MaterialConfig = serde_json::from_value(value.clone())
            .map_err(|e| ConfigurationError::InvalidConfiguration(e.to_string()))?;
        if let Value::Object(map) = &value {
            for &property in KNOWN_PROPERTIES {
                let origin = if map.contains_key(property) {
                    ValueOrigin::ConfigurationFile
                } else {
                    ValueOrigin::Default
                };
                config.origins.insert(property.to_string(), origin);
            }
        }
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        if self.label.is_empty() {
            return Err(ConfigurationError::InvalidConfiguration(
                "material label must not be empty".to_string(),
            ));
        }
        if self.maxwell_elements == 0 {
            return Err(ConfigurationError::InvalidConfiguration(
                "maxwell_elements must be at least 1".to_string(),
            ));
        }
        for subfield in &self.auxiliary_subfields {
            if subfield.components == 0 {
                return Err(ConfigurationError::InvalidConfiguration(format!(
                    "auxiliary subfield '{}' must have at least one component",
                    subfield.name
                )));
            }
        }
        Ok(())
    }

    /// Provenance of a tracked top-level property.
    pub fn origin(&self, property: &str) -> ValueOrigin {
        self.origins
            .get(property)
            .copied()
            .unwrap_or(ValueOrigin::Default)
    }

    pub fn options(&self) -> MaterialOptions {
        MaterialOptions {
            use_inertia: self.use_inertia,
            use_body_force: self.use_body_force,
            use_reference_state: self.use_reference_state,
        }
    }

    /// Build the runtime material and hand it the engine-side object.
    pub fn build(
        &self,
        native: Box<dyn NativeMaterial>,
    ) -> Result<GeneralizedMaxwellMaterial, ConfigurationError> {
        let law = GeneralizedMaxwellLaw::new(self.maxwell_elements)?;
        let mut material = GeneralizedMaxwellMaterial::new(
            self.id,
            self.label.clone(),
            law,
            self.options(),
            Box::new(self.db_properties.clone()),
        );
        if !self.auxiliary_subfields.is_empty() {
            let schema = AuxiliaryFieldSchema::new(self.auxiliary_subfields.clone())?;
            material = material.with_schema(schema);
        }
        material.install_native(native);
        Ok(material)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "id": 3,
        "label": "viscoelastic crust",
        "db_properties": {
            "label": "crust properties",
            "datasets": [],
            "regions": {}
        },
        "quadrature": { "cell": "tri3" }
    }"#;

    #[test]
    fn defaults_apply_and_are_tracked() {
        let config = MaterialConfig::from_json_str(MINIMAL).unwrap();
        assert!(!config.use_inertia);
        assert_eq!(config.maxwell_elements, 1);
        assert_eq!(config.quadrature.degree, 2);
        assert_eq!(config.origin("id"), ValueOrigin::ConfigurationFile);
        assert_eq!(config.origin("use_inertia"), ValueOrigin::Default);
        assert_eq!(config.origin("maxwell_elements"), ValueOrigin::Default);
    }

    #[test]
    fn explicit_flags_come_from_the_file() {
        let config = MaterialConfig::from_json_str(
            r#"{
                "id": 1,
                "label": "mantle",
                "use_body_force": true,
                "maxwell_elements": 2,
                "db_properties": { "label": "db", "datasets": [], "regions": {} },
                "quadrature": { "cell": "quad4", "degree": 3 }
            }"#,
        )
        .unwrap();
        assert!(config.use_body_force);
        assert_eq!(
            config.origin("use_body_force"),
            ValueOrigin::ConfigurationFile
        );
        assert_eq!(
            config.origin("maxwell_elements"),
            ValueOrigin::ConfigurationFile
        );
    }

    #[test]
    fn zero_maxwell_elements_is_rejected() {
        let err = MaterialConfig::from_json_str(
            r#"{
                "id": 1,
                "label": "mantle",
                "maxwell_elements": 0,
                "db_properties": { "label": "db", "datasets": [], "regions": {} },
                "quadrature": { "cell": "tri3" }
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidConfiguration(_)));
    }
}
