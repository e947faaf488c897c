//! Material configuration.
//!
//! A material pairs a constitutive law with a mesh region, a property
//! database and an auxiliary field schema, and drives the engine-side material
//! object through preinitialization. The law is a trait seam: it declares what
//! subfields, parameters and datasets it needs, and the shared base checks
//! those requirements before anything is forwarded to the engine.

mod aux_fields;
mod gen_maxwell;

pub use self::aux_fields::{AuxSubfield, AuxiliaryFieldSchema, FunctionSpace};
pub use self::gen_maxwell::{GeneralizedMaxwellLaw, GeneralizedMaxwellMaterial};

use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use crate::engine::NativeMaterial;
use crate::error::ConfigurationError;
use crate::mesh::Mesh;
use crate::properties::PropertyDatabase;

/// Formulation switches shared by every material.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialOptions {
    #[serde(default)]
    pub use_inertia: bool,
    #[serde(default)]
    pub use_body_force: bool,
    #[serde(default)]
    pub use_reference_state: bool,
}

/// Requirements a constitutive law imposes on its material's configuration.
pub trait ConstitutiveLaw {
    fn name(&self) -> &'static str;

    /// Subfields the auxiliary field schema must provide, in the order the
    /// law's kernels expect them.
    fn required_subfields(&self) -> Vec<String>;

    /// Parameters the property database must resolve for the material region.
    fn required_parameters(&self) -> Vec<String>;

    /// Datasets the property database must carry under the given options.
    fn required_datasets(&self, options: &MaterialOptions) -> Vec<String>;

    fn default_schema(&self) -> AuxiliaryFieldSchema;
}

/// State and behavior shared by all material types.
pub struct MaterialBase {
    id: i32,
    label: String,
    options: MaterialOptions,
    schema: AuxiliaryFieldSchema,
    properties: Box<dyn PropertyDatabase>,
    mesh: Option<Weak<Mesh>>,
}

impl MaterialBase {
    pub fn new(
        id: i32,
        label: impl Into<String>,
        options: MaterialOptions,
        schema: AuxiliaryFieldSchema,
        properties: Box<dyn PropertyDatabase>,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            options,
            schema,
            properties,
            mesh: None,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn options(&self) -> MaterialOptions {
        self.options
    }

    pub fn schema(&self) -> &AuxiliaryFieldSchema {
        &self.schema
    }

    pub fn set_schema(&mut self, schema: AuxiliaryFieldSchema) {
        self.schema = schema;
    }

    pub fn properties(&self) -> &dyn PropertyDatabase {
        self.properties.as_ref()
    }

    /// The bound mesh, if it is still alive.
    pub fn mesh(&self) -> Option<Rc<Mesh>> {
        self.mesh.as_ref().and_then(Weak::upgrade)
    }

    /// Shared preinitialization: bind the mesh, validate the schema against
    /// the law, check reference-state datasets, then push the schema and the
    /// resolved parameters into the engine.
    pub(crate) fn preinitialize(
        &mut self,
        mesh: &Rc<Mesh>,
        law: &dyn ConstitutiveLaw,
        native: &mut dyn NativeMaterial,
    ) -> Result<(), ConfigurationError> {
        self.mesh = Some(Rc::downgrade(mesh));

        for required in law.required_subfields() {
            if !self.schema.contains(&required) {
                return Err(ConfigurationError::MissingSubfield {
                    material: self.label.clone(),
                    subfield: required,
                });
            }
        }

        for dataset in law.required_datasets(&self.options) {
            if !self.properties.has_dataset(&dataset) {
                return Err(ConfigurationError::MissingDataset {
                    database: self.properties.label().to_string(),
                    dataset,
                });
            }
        }

        native.install_schema(&self.schema)?;
        native.populate_properties(
            mesh,
            self.id,
            &law.required_parameters(),
            self.properties.as_ref(),
        )?;
        Ok(())
    }
}
