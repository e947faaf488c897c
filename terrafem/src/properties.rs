//! Property databases supplying spatially varying material parameters.
//!
//! A property database is shared, read-only, across all materials bound to the same
//! simulation. Lookups are keyed by mesh region id and parameter name; a failed
//! lookup is propagated, never retried.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

pub trait PropertyDatabase {
    /// Descriptive label, used in error messages and reports.
    fn label(&self) -> &str;

    /// Look up a named parameter for the given mesh region.
    fn query(&self, region: i32, parameter: &str) -> Result<f64, ConfigurationError>;

    /// Whether this database provides a named dataset, e.g. a reference
    /// stress/strain state.
    fn has_dataset(&self, dataset: &str) -> bool;
}

/// Property database backed by per-region value tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionValueDatabase {
    pub label: String,
    /// Names of auxiliary datasets this database can serve in addition to scalar
    /// parameters (e.g. "reference_stress").
    #[serde(default)]
    pub datasets: Vec<String>,
    #[serde(default)]
    pub regions: BTreeMap<i32, BTreeMap<String, f64>>,
}

impl RegionValueDatabase {
    pub fn new<S: Into<String>>(label: S) -> Self {
        Self {
            label: label.into(),
            datasets: Vec::new(),
            regions: BTreeMap::new(),
        }
    }

    pub fn with_value<S: Into<String>>(mut self, region: i32, parameter: S, value: f64) -> Self {
        self.set_value(region, parameter, value);
        self
    }

    pub fn with_dataset<S: Into<String>>(mut self, dataset: S) -> Self {
        self.datasets.push(dataset.into());
        self
    }

    pub fn set_value<S: Into<String>>(&mut self, region: i32, parameter: S, value: f64) {
        self.regions
            .entry(region)
            .or_insert_with(BTreeMap::new)
            .insert(parameter.into(), value);
    }

    pub fn num_regions(&self) -> usize {
        self.regions.len()
    }
}

impl PropertyDatabase for RegionValueDatabase {
    fn label(&self) -> &str {
        &self.label
    }

    fn query(&self, region: i32, parameter: &str) -> Result<f64, ConfigurationError> {
        self.regions
            .get(&region)
            .and_then(|values| values.get(parameter))
            .copied()
            .ok_or_else(|| ConfigurationError::UnresolvedParameter {
                database: self.label.clone(),
                region,
                parameter: parameter.to_string(),
            })
    }

    fn has_dataset(&self, dataset: &str) -> bool {
        self.datasets.iter().any(|d| d == dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_returns_stored_value() {
        let db = RegionValueDatabase::new("crust properties")
            .with_value(3, "density", 2700.0)
            .with_value(3, "shear_modulus", 3.0e10);
        assert_eq!(db.query(3, "density"), Ok(2700.0));
        assert_eq!(db.query(3, "shear_modulus"), Ok(3.0e10));
    }

    #[test]
    fn missing_parameter_reports_region_and_name() {
        let db = RegionValueDatabase::new("crust properties").with_value(3, "density", 2700.0);
        let err = db.query(7, "density").unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnresolvedParameter {
                database: "crust properties".to_string(),
                region: 7,
                parameter: "density".to_string(),
            }
        );
    }

    #[test]
    fn datasets_are_enumerable() {
        let db = RegionValueDatabase::new("db")
            .with_dataset("reference_stress")
            .with_dataset("reference_strain");
        assert!(db.has_dataset("reference_stress"));
        assert!(!db.has_dataset("initial_temperature"));
    }

    #[test]
    fn deserializes_from_json() {
        let json = r#"{
            "label": "mantle",
            "datasets": ["reference_stress"],
            "regions": { "2": { "density": 3300.0 } }
        }"#;
        let db: RegionValueDatabase = serde_json::from_str(json).unwrap();
        assert_eq!(db.label, "mantle");
        assert_eq!(db.query(2, "density"), Ok(3300.0));
        assert!(db.has_dataset("reference_stress"));
    }
}
