//! Configuration and lifecycle orchestration for finite element simulations of
//! quasi-static crustal deformation.
//!
//! The crate covers the setup phase only: it parses material configuration,
//! validates auxiliary field schemas and property databases against the chosen
//! constitutive law, tabulates quadrature rules and drives the engine-side
//! objects through their preinitialization sequence. Assembly and solving are
//! the engine's business and live behind the traits in [`engine`].

pub extern crate nalgebra;

pub mod config;
pub mod engine;
pub mod error;
pub mod integrator;
pub mod materials;
pub mod mesh;
pub mod properties;
pub mod quadrature;
pub mod report;

pub use crate::error::ConfigurationError;
