//! Boundary to the native assembly/solve engine.
//!
//! The engine itself (shape functions, stress kernels, solvers, distributed
//! execution) lives outside this crate. This module defines the operations its
//! opaque objects must accept during configuration, the [`NativeHandle`] wrapper
//! whose absence is the designated "not ready" state, and in-memory reference
//! implementations that make the configuration contract executable in tests.

use std::collections::BTreeMap;

use log::debug;

use crate::error::ConfigurationError;
use crate::materials::{AuxiliaryFieldSchema, MaterialOptions};
use crate::mesh::Mesh;
use crate::properties::PropertyDatabase;
use crate::quadrature::{CellType, GaussQuadrature};

/// Operations the engine's material object must accept before discretization.
pub trait NativeMaterial {
    fn set_use_inertia(&mut self, flag: bool);
    fn set_use_body_force(&mut self, flag: bool);
    fn set_use_reference_state(&mut self, flag: bool);

    /// Install the auxiliary field schema; the engine lays out per-cell state
    /// storage from it.
    fn install_schema(&mut self, schema: &AuxiliaryFieldSchema) -> Result<(), ConfigurationError>;

    /// Resolve the required parameters for the material's mesh region from the
    /// property database. Lookup failures are propagated unchanged.
    fn populate_properties(
        &mut self,
        mesh: &Mesh,
        material_id: i32,
        parameters: &[String],
        database: &dyn PropertyDatabase,
    ) -> Result<(), ConfigurationError>;

    /// Current option state, as forwarded by the configuration layer.
    fn options(&self) -> MaterialOptions;
}

/// Operations the engine's integration operator must accept.
pub trait NativeIntegrator {
    /// Receive an initialized quadrature rule.
    fn bind_quadrature(&mut self, quadrature: &GaussQuadrature) -> Result<(), ConfigurationError>;
}

/// Owning wrapper around an opaque engine object.
///
/// The handle starts vacant; a concrete material/integrator installs the engine
/// object before preinitialization. Accessing a vacant handle yields the
/// sequencing error, which is the sole precondition this layer checks directly.
pub struct NativeHandle<T: ?Sized> {
    component: &'static str,
    inner: Option<Box<T>>,
}

impl<T: ?Sized> NativeHandle<T> {
    pub fn vacant(component: &'static str) -> Self {
        Self {
            component,
            inner: None,
        }
    }

    pub fn install(&mut self, handle: Box<T>) {
        self.inner = Some(handle);
    }

    pub fn is_created(&self) -> bool {
        self.inner.is_some()
    }

    pub fn get(&self) -> Result<&T, ConfigurationError> {
        self.inner
            .as_deref()
            .ok_or(ConfigurationError::HandleNotCreated {
                component: self.component,
            })
    }

    pub fn get_mut(&mut self) -> Result<&mut T, ConfigurationError> {
        let component = self.component;
        self.inner
            .as_deref_mut()
            .ok_or(ConfigurationError::HandleNotCreated { component })
    }

    pub fn release(&mut self) {
        self.inner = None;
    }
}

/// Placement of one auxiliary subfield within per-cell state storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubfieldLayout {
    pub name: String,
    pub offset: usize,
    pub components: usize,
}

/// In-memory stand-in for the engine's material object.
///
/// Records forwarded options, computes the auxiliary storage layout from the
/// installed schema and resolves all required parameters eagerly, so that the
/// configuration scenarios are observable without the real engine.
#[derive(Debug, Default)]
pub struct InMemoryMaterialEngine {
    options: MaterialOptions,
    layout: Vec<SubfieldLayout>,
    stride: usize,
    region_values: BTreeMap<i32, BTreeMap<String, f64>>,
}

impl InMemoryMaterialEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage layout computed from the installed schema, in declaration order.
    pub fn layout(&self) -> &[SubfieldLayout] {
        &self.layout
    }

    /// Number of state values tracked per cell.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn resolved_values(&self) -> &BTreeMap<i32, BTreeMap<String, f64>> {
        &self.region_values
    }
}

impl NativeMaterial for InMemoryMaterialEngine {
    fn set_use_inertia(&mut self, flag: bool) {
        self.options.use_inertia = flag;
    }

    fn set_use_body_force(&mut self, flag: bool) {
        self.options.use_body_force = flag;
    }

    fn set_use_reference_state(&mut self, flag: bool) {
        self.options.use_reference_state = flag;
    }

    fn install_schema(&mut self, schema: &AuxiliaryFieldSchema) -> Result<(), ConfigurationError> {
        let mut offset = 0;
        self.layout.clear();
        for subfield in schema.subfields() {
            self.layout.push(SubfieldLayout {
                name: subfield.name.clone(),
                offset,
                components: subfield.components,
            });
            offset += subfield.components;
        }
        self.stride = offset;
        debug!(
            "Laid out {} auxiliary subfields ({} values per cell)",
            self.layout.len(),
            self.stride
        );
        Ok(())
    }

    fn populate_properties(
        &mut self,
        mesh: &Mesh,
        material_id: i32,
        parameters: &[String],
        database: &dyn PropertyDatabase,
    ) -> Result<(), ConfigurationError> {
        if !mesh.has_region(material_id) {
            return Err(ConfigurationError::InvalidConfiguration(format!(
                "material id {} matches no cells in the bound mesh",
                material_id
            )));
        }
        let values = self.region_values.entry(material_id).or_default();
        for parameter in parameters {
            let value = database.query(material_id, parameter)?;
            values.insert(parameter.clone(), value);
        }
        debug!(
            "Resolved {} parameters for region {} ({} cells)",
            parameters.len(),
            material_id,
            mesh.cells_in_region(material_id)
        );
        Ok(())
    }

    fn options(&self) -> MaterialOptions {
        self.options
    }
}

/// In-memory stand-in for the engine's integration operator.
#[derive(Debug, Default)]
pub struct InMemoryIntegratorEngine {
    bound_cell: Option<CellType>,
    bound_points: usize,
}

impl InMemoryIntegratorEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bound_cell(&self) -> Option<CellType> {
        self.bound_cell
    }

    pub fn bound_points(&self) -> usize {
        self.bound_points
    }
}

impl NativeIntegrator for InMemoryIntegratorEngine {
    fn bind_quadrature(&mut self, quadrature: &GaussQuadrature) -> Result<(), ConfigurationError> {
        if !quadrature.is_initialized() {
            return Err(ConfigurationError::InvalidConfiguration(
                "quadrature must be initialized before it can be bound".to_string(),
            ));
        }
        self.bound_cell = Some(quadrature.cell());
        self.bound_points = quadrature.num_points();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::AuxSubfield;
    use crate::properties::RegionValueDatabase;

    #[test]
    fn vacant_handle_yields_sequencing_error() {
        let handle: NativeHandle<dyn NativeMaterial> = NativeHandle::vacant("material");
        assert!(!handle.is_created());
        assert_eq!(
            handle.get().err(),
            Some(ConfigurationError::HandleNotCreated {
                component: "material"
            })
        );
    }

    #[test]
    fn released_handle_is_vacant_again() {
        let mut handle: NativeHandle<dyn NativeMaterial> = NativeHandle::vacant("material");
        handle.install(Box::new(InMemoryMaterialEngine::new()));
        assert!(handle.is_created());
        assert!(handle.get().is_ok());

        handle.release();
        assert!(!handle.is_created());
        assert_eq!(
            handle.get_mut().err(),
            Some(ConfigurationError::HandleNotCreated {
                component: "material"
            })
        );
    }

    #[test]
    fn schema_installation_computes_offsets() {
        let schema = AuxiliaryFieldSchema::new(vec![
            AuxSubfield::tensor("total_strain", 4),
            AuxSubfield::tensor("stress", 4),
            AuxSubfield::scalar("damage"),
        ])
        .unwrap();

        let mut engine = InMemoryMaterialEngine::new();
        engine.install_schema(&schema).unwrap();

        assert_eq!(engine.stride(), 9);
        assert_eq!(engine.layout()[0].offset, 0);
        assert_eq!(engine.layout()[1].offset, 4);
        assert_eq!(engine.layout()[2].offset, 8);
        assert_eq!(engine.layout()[2].components, 1);
    }

    #[test]
    fn populate_properties_propagates_lookup_failure() {
        let mesh = Mesh::single_region(2, 4, 7);
        let db = RegionValueDatabase::new("db").with_value(7, "density", 2700.0);
        let mut engine = InMemoryMaterialEngine::new();
        let parameters = vec!["density".to_string(), "shear_modulus".to_string()];

        let err = engine
            .populate_properties(&mesh, 7, &parameters, &db)
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnresolvedParameter {
                database: "db".to_string(),
                region: 7,
                parameter: "shear_modulus".to_string(),
            }
        );
    }

    #[test]
    fn integrator_engine_rejects_uninitialized_quadrature() {
        let rule = GaussQuadrature::new(CellType::Tri3, 2);
        let mut engine = InMemoryIntegratorEngine::new();
        assert!(engine.bind_quadrature(&rule).is_err());
    }
}
