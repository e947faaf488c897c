//! Integrator lifecycle.

use std::rc::{Rc, Weak};

use log::info;

use crate::engine::{NativeHandle, NativeIntegrator};
use crate::error::ConfigurationError;
use crate::mesh::Mesh;
use crate::quadrature::GaussQuadrature;

/// Configuration-side view of one integration operator.
///
/// Holds the mesh and quadrature rule the operator will use, and forwards the
/// rule to the engine once it has been tabulated. Mesh and quadrature
/// assignments are last-write-wins; only quadrature initialization requires
/// the native handle to exist.
pub struct Integrator {
    mesh: Option<Weak<Mesh>>,
    quadrature: Option<GaussQuadrature>,
    native: NativeHandle<dyn NativeIntegrator>,
}

impl Integrator {
    pub fn new() -> Self {
        Self {
            mesh: None,
            quadrature: None,
            native: NativeHandle::vacant("integrator"),
        }
    }

    pub fn with_native(native: Box<dyn NativeIntegrator>) -> Self {
        let mut integrator = Self::new();
        integrator.native.install(native);
        integrator
    }

    pub fn install_native(&mut self, native: Box<dyn NativeIntegrator>) {
        self.native.install(native);
    }

    pub fn has_native(&self) -> bool {
        self.native.is_created()
    }

    /// Record the mesh this integrator operates on. Repeated calls replace
    /// the previous association.
    pub fn set_mesh(&mut self, mesh: &Rc<Mesh>) {
        self.mesh = Some(Rc::downgrade(mesh));
    }

    pub fn mesh(&self) -> Option<Rc<Mesh>> {
        self.mesh.as_ref().and_then(Weak::upgrade)
    }

    /// Tabulate the given quadrature rule, hand it to the engine and keep it.
    ///
    /// Fails with the sequencing error before any state changes when the
    /// native handle is absent; a previously stored rule and the mesh binding
    /// survive the failure. Calling again replaces the stored rule.
    pub fn init_quadrature(
        &mut self,
        mut quadrature: GaussQuadrature,
    ) -> Result<(), ConfigurationError> {
        let native = self.native.get_mut()?;
        info!(
            "Initializing {:?} quadrature of degree {}",
            quadrature.cell(),
            quadrature.degree()
        );
        quadrature.initialize()?;
        native.bind_quadrature(&quadrature)?;
        self.quadrature = Some(quadrature);
        Ok(())
    }

    pub fn quadrature(&self) -> Option<&GaussQuadrature> {
        self.quadrature.as_ref()
    }
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new()
    }
}
