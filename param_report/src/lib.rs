//! Read-only snapshots of configured object graphs.
//!
//! Any configuration type that wants to appear in a reproducibility report implements
//! [`Reportable`], which makes its properties and nested facilities enumerable without
//! any runtime reflection. [`collect`] walks such a graph and produces a nested
//! `serde_json::Value` keyed by property/facility name, suitable for writing next to
//! simulation output so that a run can be reproduced later.

use std::io::Write;

use serde_json::{json, Map, Value};
use thiserror::Error;

/// Placeholder used when a property carries no description metadata.
pub const NO_DESCRIPTION: &str = "No description available.";

/// Property names that are never included in a report (help/meta machinery).
pub const OMITTED_PROPERTIES: &[&str] = &[
    "help",
    "help-components",
    "help-persistence",
    "help-properties",
    "typos",
];

/// Facility names that are never included in a report (infrastructure only).
pub const OMITTED_FACILITIES: &[&str] = &["weaver"];

/// Error type used by the crate.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to serialize parameter report: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write parameter report: {0}")]
    Io(#[from] std::io::Error),
}

/// Snapshot of a single configurable property: its current value, type, optional
/// description and the location it was set from.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyEntry {
    pub value: Value,
    pub type_name: &'static str,
    pub description: Option<&'static str>,
    pub set_from: String,
}

impl PropertyEntry {
    pub fn new<V, S>(value: V, type_name: &'static str, set_from: S) -> Self
    where
        V: Into<Value>,
        S: Into<String>,
    {
        Self {
            value: value.into(),
            type_name,
            description: None,
            set_from: set_from.into(),
        }
    }

    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

/// Capability of enumerating one's own properties and nested configuration facilities.
///
/// Implementors return properties and facilities in any order; [`collect`] sorts
/// entries by name so that reports are deterministic.
pub trait Reportable {
    /// Instance name of this component (e.g. a material label).
    fn component_name(&self) -> String;

    /// Type name of this component.
    fn class_name(&self) -> &'static str;

    /// Enumerate own properties.
    fn properties(&self) -> Vec<(String, PropertyEntry)>;

    /// Enumerate own nested facilities.
    fn facilities(&self) -> Vec<(&str, &dyn Reportable)> {
        Vec::new()
    }
}

fn property_to_json(entry: &PropertyEntry) -> Value {
    json!({
        "value": entry.value,
        "type": entry.type_name,
        "description": entry.description.unwrap_or(NO_DESCRIPTION),
        "setFrom": entry.set_from,
    })
}

fn collect_component(component: &dyn Reportable) -> Value {
    let mut properties: Vec<_> = component
        .properties()
        .into_iter()
        .filter(|(name, _)| !OMITTED_PROPERTIES.contains(&name.as_str()))
        .collect();
    properties.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut property_map = Map::new();
    for (name, entry) in &properties {
        property_map.insert(name.clone(), property_to_json(entry));
    }

    let mut facilities: Vec<_> = component
        .facilities()
        .into_iter()
        .filter(|(name, _)| !OMITTED_FACILITIES.contains(name))
        .collect();
    facilities.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut facility_map = Map::new();
    for (name, facility) in facilities {
        facility_map.insert(name.to_string(), collect_component(facility));
    }

    json!({
        "name": component.component_name(),
        "class": component.class_name(),
        "properties": Value::Object(property_map),
        "components": Value::Object(facility_map),
    })
}

/// Collect a full report for the given application object and its nested facilities.
pub fn collect(application: &dyn Reportable) -> Value {
    json!({
        "timestamp": chrono::Local::now().to_rfc3339(),
        "application": collect_component(application),
    })
}

/// Serialize a report as a pretty-printed `String` of JSON.
pub fn to_string_pretty(application: &dyn Reportable) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(&collect(application))?)
}

/// Serialize a report as pretty-printed JSON into the IO stream.
pub fn write_report<W: Write>(mut writer: W, application: &dyn Reportable) -> Result<(), ReportError> {
    let report = to_string_pretty(application)?;
    writer.write_all(report.as_bytes())?;
    Ok(())
}
