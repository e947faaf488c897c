//! Parameter reporting.
//!
//! Wires the configuration types into `param_report` so that a full material
//! setup can be dumped as one nested JSON document, with each value annotated
//! with its type, description and provenance.

use param_report::{PropertyEntry, Reportable};

use crate::config::{MaterialConfig, QuadratureConfig};
use crate::materials::AuxSubfield;
use crate::properties::RegionValueDatabase;

impl Reportable for MaterialConfig {
    fn component_name(&self) -> String {
        self.label.clone()
    }

    fn class_name(&self) -> &'static str {
        "MaterialConfig"
    }

    fn properties(&self) -> Vec<(String, PropertyEntry)> {
        vec![
            (
                "id".to_string(),
                PropertyEntry::new(self.id, "int", self.origin("id").as_str())
                    .with_description("Identifier of the mesh region this material occupies."),
            ),
            (
                "label".to_string(),
                PropertyEntry::new(self.label.clone(), "str", self.origin("label").as_str())
                    .with_description("Human-readable name used in diagnostics."),
            ),
            (
                "use_inertia".to_string(),
                PropertyEntry::new(
                    self.use_inertia,
                    "bool",
                    self.origin("use_inertia").as_str(),
                )
                .with_description("Include inertial term in the momentum balance."),
            ),
            (
                "use_body_force".to_string(),
                PropertyEntry::new(
                    self.use_body_force,
                    "bool",
                    self.origin("use_body_force").as_str(),
                )
                .with_description("Include body force term in the momentum balance."),
            ),
            (
                "use_reference_state".to_string(),
                PropertyEntry::new(
                    self.use_reference_state,
                    "bool",
                    self.origin("use_reference_state").as_str(),
                )
                .with_description("Formulate the problem relative to a reference stress state."),
            ),
            (
                "maxwell_elements".to_string(),
                PropertyEntry::new(
                    self.maxwell_elements as u64,
                    "int",
                    self.origin("maxwell_elements").as_str(),
                )
                .with_description("Number of Maxwell elements in the viscoelastic rheology."),
            ),
        ]
    }

    fn facilities(&self) -> Vec<(&str, &dyn Reportable)> {
        let mut facilities: Vec<(&str, &dyn Reportable)> = vec![
            ("db_properties", &self.db_properties),
            ("quadrature", &self.quadrature),
        ];
        for subfield in &self.auxiliary_subfields {
            facilities.push((subfield.name.as_str(), subfield));
        }
        facilities
    }
}

impl Reportable for RegionValueDatabase {
    fn component_name(&self) -> String {
        self.label.clone()
    }

    fn class_name(&self) -> &'static str {
        "RegionValueDatabase"
    }

    fn properties(&self) -> Vec<(String, PropertyEntry)> {
        vec![
            (
                "label".to_string(),
                PropertyEntry::new(self.label.clone(), "str", "configuration file")
                    .with_description("Name of this property database."),
            ),
            (
                "datasets".to_string(),
                PropertyEntry::new(self.datasets.clone(), "list", "configuration file")
                    .with_description("Named datasets available beyond scalar parameters."),
            ),
            (
                "regions".to_string(),
                PropertyEntry::new(self.num_regions() as u64, "int", "configuration file")
                    .with_description("Number of mesh regions with tabulated values."),
            ),
        ]
    }
}

impl Reportable for QuadratureConfig {
    fn component_name(&self) -> String {
        format!("{:?}", self.cell).to_lowercase()
    }

    fn class_name(&self) -> &'static str {
        "QuadratureConfig"
    }

    fn properties(&self) -> Vec<(String, PropertyEntry)> {
        vec![
            (
                "cell".to_string(),
                PropertyEntry::new(
                    format!("{:?}", self.cell).to_lowercase(),
                    "str",
                    "configuration file",
                )
                .with_description("Reference cell the rule is tabulated on."),
            ),
            (
                "degree".to_string(),
                PropertyEntry::new(u64::from(self.degree), "int", "configuration file")
                    .with_description("Highest polynomial degree integrated exactly."),
            ),
        ]
    }
}

impl Reportable for AuxSubfield {
    fn component_name(&self) -> String {
        self.name.clone()
    }

    fn class_name(&self) -> &'static str {
        "AuxSubfield"
    }

    fn properties(&self) -> Vec<(String, PropertyEntry)> {
        vec![
            (
                "components".to_string(),
                PropertyEntry::new(self.components as u64, "int", "configuration file")
                    .with_description("Number of components per evaluation point."),
            ),
            (
                "basis_order".to_string(),
                PropertyEntry::new(u64::from(self.basis_order), "int", "configuration file")
                    .with_description("Polynomial order of the subfield's basis."),
            ),
            // The function space has no user-facing documentation yet.
            (
                "function_space".to_string(),
                PropertyEntry::new(
                    format!("{:?}", self.function_space).to_lowercase(),
                    "str",
                    "configuration file",
                ),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use param_report::{collect, NO_DESCRIPTION};

    fn sample_config() -> MaterialConfig {
        MaterialConfig::from_json_str(
            r#"{
                "id": 5,
                "label": "viscoelastic layer",
                "use_inertia": true,
                "db_properties": { "label": "layer db", "datasets": [], "regions": {} },
                "auxiliary_subfields": [
                    { "name": "total_strain", "components": 4 }
                ],
                "quadrature": { "cell": "tri3", "degree": 2 }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn report_nests_components_under_the_material() {
        let config = sample_config();
        let report = collect(&config);
        let app = &report["application"];
        assert_eq!(app["name"], "viscoelastic layer");
        assert_eq!(
            app["properties"]["use_inertia"]["setFrom"],
            "configuration file"
        );
        assert_eq!(app["properties"]["maxwell_elements"]["setFrom"], "default");
        assert!(app["components"]["db_properties"].is_object());
        assert!(app["components"]["quadrature"].is_object());
        assert!(app["components"]["total_strain"].is_object());
    }

    #[test]
    fn undocumented_properties_get_the_placeholder() {
        let config = sample_config();
        let report = collect(&config);
        let function_space = &report["application"]["components"]["total_strain"]["properties"]
            ["function_space"];
        assert_eq!(function_space["description"], NO_DESCRIPTION);
    }
}
