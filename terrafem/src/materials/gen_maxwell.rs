//! Isotropic linear generalized Maxwell viscoelasticity, plane strain.
//!
//! The rheology is an elastic spring in parallel with `k` Maxwell elements.
//! Besides total strain and stress, each element contributes one viscous
//! strain subfield and two parameters (a shear modulus ratio and a Maxwell
//! relaxation time), so both the schema and the parameter list scale with `k`.

use std::rc::Rc;

use log::info;

use crate::engine::{NativeHandle, NativeMaterial};
use crate::error::ConfigurationError;
use crate::mesh::Mesh;
use crate::properties::PropertyDatabase;

use super::{
    AuxSubfield, AuxiliaryFieldSchema, ConstitutiveLaw, MaterialBase, MaterialOptions,
};

/// Components of a symmetric rank-2 tensor under plane strain
/// (xx, yy, zz, xy).
const TENSOR_COMPONENTS: usize = 4;

/// Generalized Maxwell law with a configurable number of Maxwell elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralizedMaxwellLaw {
    num_elements: usize,
}

impl GeneralizedMaxwellLaw {
    pub fn new(num_elements: usize) -> Result<Self, ConfigurationError> {
        if num_elements == 0 {
            return Err(ConfigurationError::InvalidConfiguration(
                "a generalized Maxwell material needs at least one Maxwell element".to_string(),
            ));
        }
        Ok(Self { num_elements })
    }

    pub fn num_elements(&self) -> usize {
        self.num_elements
    }

    /// Name of the viscous strain subfield for element `i` (1-based).
    pub fn viscous_strain_name(i: usize) -> String {
        format!("viscous_strain_{}", i)
    }
}

impl ConstitutiveLaw for GeneralizedMaxwellLaw {
    fn name(&self) -> &'static str {
        "isotropic_linear_gen_maxwell"
    }

    fn required_subfields(&self) -> Vec<String> {
        let mut names = vec!["total_strain".to_string(), "stress".to_string()];
        for i in 1..=self.num_elements {
            names.push(Self::viscous_strain_name(i));
        }
        names
    }

    fn required_parameters(&self) -> Vec<String> {
        let mut parameters = vec![
            "density".to_string(),
            "shear_modulus".to_string(),
            "bulk_modulus".to_string(),
        ];
        for i in 1..=self.num_elements {
            parameters.push(format!("shear_modulus_ratio_{}", i));
            parameters.push(format!("maxwell_time_{}", i));
        }
        parameters
    }

    fn required_datasets(&self, options: &MaterialOptions) -> Vec<String> {
        if options.use_reference_state {
            vec!["reference_stress".to_string(), "reference_strain".to_string()]
        } else {
            Vec::new()
        }
    }

    fn default_schema(&self) -> AuxiliaryFieldSchema {
        let subfields = self
            .required_subfields()
            .into_iter()
            .map(|name| AuxSubfield::tensor(name, TENSOR_COMPONENTS))
            .collect();
        // Names come from required_subfields, which never repeats.
        AuxiliaryFieldSchema::new(subfields).expect("default schema is non-empty and unique")
    }
}

/// A generalized Maxwell material bound to one mesh region.
pub struct GeneralizedMaxwellMaterial {
    base: MaterialBase,
    law: GeneralizedMaxwellLaw,
    native: NativeHandle<dyn NativeMaterial>,
}

impl GeneralizedMaxwellMaterial {
    pub fn new(
        id: i32,
        label: impl Into<String>,
        law: GeneralizedMaxwellLaw,
        options: MaterialOptions,
        properties: Box<dyn PropertyDatabase>,
    ) -> Self {
        let schema = law.default_schema();
        Self {
            base: MaterialBase::new(id, label, options, schema, properties),
            law,
            native: NativeHandle::vacant("material"),
        }
    }

    /// Replace the default schema, e.g. to raise basis orders or add
    /// law-external subfields.
    pub fn with_schema(mut self, schema: AuxiliaryFieldSchema) -> Self {
        self.base.set_schema(schema);
        self
    }

    pub fn install_native(&mut self, native: Box<dyn NativeMaterial>) {
        self.native.install(native);
    }

    pub fn id(&self) -> i32 {
        self.base.id()
    }

    pub fn label(&self) -> &str {
        self.base.label()
    }

    pub fn options(&self) -> MaterialOptions {
        self.base.options()
    }

    pub fn schema(&self) -> &AuxiliaryFieldSchema {
        self.base.schema()
    }

    pub fn law(&self) -> &GeneralizedMaxwellLaw {
        &self.law
    }

    pub fn mesh(&self) -> Option<Rc<Mesh>> {
        self.base.mesh()
    }

    pub fn native(&self) -> Result<&dyn NativeMaterial, ConfigurationError> {
        self.native.get()
    }

    /// Configure the engine-side material object from this material's state.
    ///
    /// Fails with the sequencing error before touching any other state when
    /// the native handle has not been installed. Safe to call again after a
    /// failure once the cause is fixed.
    pub fn preinitialize(&mut self, mesh: &Rc<Mesh>) -> Result<(), ConfigurationError> {
        info!(
            "Performing minimal initialization of material '{}' (id {})",
            self.base.label(),
            self.base.id()
        );
        let native = self.native.get_mut()?;
        self.base.preinitialize(mesh, &self.law, native)?;

        let options = self.base.options();
        native.set_use_inertia(options.use_inertia);
        native.set_use_body_force(options.use_body_force);
        native.set_use_reference_state(options.use_reference_state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn law_rejects_zero_elements() {
        assert!(GeneralizedMaxwellLaw::new(0).is_err());
    }

    #[test]
    fn subfields_scale_with_element_count() {
        let law = GeneralizedMaxwellLaw::new(3).unwrap();
        assert_eq!(
            law.required_subfields(),
            vec![
                "total_strain",
                "stress",
                "viscous_strain_1",
                "viscous_strain_2",
                "viscous_strain_3"
            ]
        );
        assert_eq!(law.default_schema().len(), 5);
    }

    #[test]
    fn parameters_include_per_element_pairs() {
        let law = GeneralizedMaxwellLaw::new(2).unwrap();
        let parameters = law.required_parameters();
        assert!(parameters.contains(&"shear_modulus_ratio_2".to_string()));
        assert!(parameters.contains(&"maxwell_time_1".to_string()));
        assert_eq!(parameters.len(), 3 + 2 * 2);
    }

    #[test]
    fn reference_state_datasets_depend_on_option() {
        let law = GeneralizedMaxwellLaw::new(1).unwrap();
        assert!(law.required_datasets(&MaterialOptions::default()).is_empty());
        let options = MaterialOptions {
            use_reference_state: true,
            ..Default::default()
        };
        assert_eq!(
            law.required_datasets(&options),
            vec!["reference_stress", "reference_strain"]
        );
    }
}
