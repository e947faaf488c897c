//! Gauss quadrature rules over reference cells.
//!
//! A [`GaussQuadrature`] is configured with a cell type and a polynomial degree and
//! holds no tabulated data until [`GaussQuadrature::initialize`] runs. Initialization
//! is what the owning integrator triggers once its native handle exists.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellType {
    Line2,
    Tri3,
    Quad4,
    Tet4,
    Hex8,
}

impl CellType {
    pub fn dimension(&self) -> usize {
        match self {
            CellType::Line2 => 1,
            CellType::Tri3 | CellType::Quad4 => 2,
            CellType::Tet4 | CellType::Hex8 => 3,
        }
    }

    /// Measure (length/area/volume) of the reference cell.
    pub fn reference_measure(&self) -> f64 {
        match self {
            CellType::Line2 => 2.0,
            CellType::Tri3 => 0.5,
            CellType::Quad4 => 4.0,
            CellType::Tet4 => 1.0 / 6.0,
            CellType::Hex8 => 8.0,
        }
    }
}

/// Gauss quadrature rule for a reference cell.
///
/// Tensor-product cells use the reference domain [-1, 1]^d, simplex cells the unit
/// simplex. Points are stored as 3D coordinates with unused components zero.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussQuadrature {
    cell: CellType,
    degree: u32,
    points: Vec<Point3<f64>>,
    weights: Vec<f64>,
    initialized: bool,
}

impl GaussQuadrature {
    pub fn new(cell: CellType, degree: u32) -> Self {
        Self {
            cell,
            degree,
            points: Vec::new(),
            weights: Vec::new(),
            initialized: false,
        }
    }

    pub fn cell(&self) -> CellType {
        self.cell
    }

    pub fn degree(&self) -> u32 {
        self.degree
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Integration points in reference coordinates. Empty before initialization.
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Integration weights. Empty before initialization.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Tabulate points and weights for the configured cell and degree.
    ///
    /// Fails for degrees the tabulated rules cannot integrate exactly.
    pub fn initialize(&mut self) -> Result<(), ConfigurationError> {
        let (points, weights) = tabulate_rule(self.cell, self.degree)?;
        self.points = points;
        self.weights = weights;
        self.initialized = true;
        Ok(())
    }
}

fn tabulate_rule(
    cell: CellType,
    degree: u32,
) -> Result<(Vec<Point3<f64>>, Vec<f64>), ConfigurationError> {
    let unsupported = || ConfigurationError::UnsupportedQuadrature { cell, degree };
    match cell {
        CellType::Line2 => {
            let (abscissae, weights) = gauss_legendre_1d(degree).ok_or_else(unsupported)?;
            let points = abscissae.iter().map(|&x| Point3::new(x, 0.0, 0.0)).collect();
            Ok((points, weights))
        }
        CellType::Quad4 => {
            let (abscissae, weights_1d) = gauss_legendre_1d(degree).ok_or_else(unsupported)?;
            let mut points = Vec::new();
            let mut weights = Vec::new();
            for (&y, &wy) in abscissae.iter().zip(&weights_1d) {
                for (&x, &wx) in abscissae.iter().zip(&weights_1d) {
                    points.push(Point3::new(x, y, 0.0));
                    weights.push(wx * wy);
                }
            }
            Ok((points, weights))
        }
        CellType::Hex8 => {
            let (abscissae, weights_1d) = gauss_legendre_1d(degree).ok_or_else(unsupported)?;
            let mut points = Vec::new();
            let mut weights = Vec::new();
            for (&z, &wz) in abscissae.iter().zip(&weights_1d) {
                for (&y, &wy) in abscissae.iter().zip(&weights_1d) {
                    for (&x, &wx) in abscissae.iter().zip(&weights_1d) {
                        points.push(Point3::new(x, y, z));
                        weights.push(wx * wy * wz);
                    }
                }
            }
            Ok((points, weights))
        }
        CellType::Tri3 => match degree {
            0 | 1 => Ok((
                vec![Point3::new(1.0 / 3.0, 1.0 / 3.0, 0.0)],
                vec![0.5],
            )),
            2 => {
                // Three-point midpoint-class rule, exact for quadratics.
                let a = 1.0 / 6.0;
                let b = 2.0 / 3.0;
                Ok((
                    vec![
                        Point3::new(a, a, 0.0),
                        Point3::new(b, a, 0.0),
                        Point3::new(a, b, 0.0),
                    ],
                    vec![1.0 / 6.0; 3],
                ))
            }
            _ => Err(unsupported()),
        },
        CellType::Tet4 => match degree {
            0 | 1 => Ok((vec![Point3::new(0.25, 0.25, 0.25)], vec![1.0 / 6.0])),
            2 => {
                // Four-point symmetric rule, exact for quadratics.
                let a = 0.5854101966249685; // (5 + 3 sqrt(5)) / 20
                let b = 0.1381966011250105; // (5 - sqrt(5)) / 20
                Ok((
                    vec![
                        Point3::new(a, b, b),
                        Point3::new(b, a, b),
                        Point3::new(b, b, a),
                        Point3::new(b, b, b),
                    ],
                    vec![1.0 / 24.0; 4],
                ))
            }
            _ => Err(unsupported()),
        },
    }
}

/// 1D Gauss-Legendre abscissae/weights on [-1, 1] for the requested polynomial degree.
fn gauss_legendre_1d(degree: u32) -> Option<(Vec<f64>, Vec<f64>)> {
    let sqrt_1_3 = 1.0 / 3.0_f64.sqrt();
    let sqrt_3_5 = (3.0 / 5.0_f64).sqrt();
    match degree {
        0 | 1 => Some((vec![0.0], vec![2.0])),
        2 | 3 => Some((vec![-sqrt_1_3, sqrt_1_3], vec![1.0, 1.0])),
        4 | 5 => Some((
            vec![-sqrt_3_5, 0.0, sqrt_3_5],
            vec![5.0 / 9.0, 8.0 / 9.0, 5.0 / 9.0],
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supported_rules() -> Vec<GaussQuadrature> {
        let mut rules = Vec::new();
        for &cell in &[CellType::Line2, CellType::Quad4, CellType::Hex8] {
            for degree in 1..=5 {
                rules.push(GaussQuadrature::new(cell, degree));
            }
        }
        for &cell in &[CellType::Tri3, CellType::Tet4] {
            for degree in 1..=2 {
                rules.push(GaussQuadrature::new(cell, degree));
            }
        }
        rules
    }

    #[test]
    fn weights_sum_to_reference_measure() {
        for mut rule in supported_rules() {
            rule.initialize().unwrap();
            let sum: f64 = rule.weights().iter().sum();
            let expected = rule.cell().reference_measure();
            assert!(
                (sum - expected).abs() < 1e-14,
                "{:?} degree {}: {} != {}",
                rule.cell(),
                rule.degree(),
                sum,
                expected
            );
        }
    }

    #[test]
    fn uninitialized_rule_has_no_points() {
        let rule = GaussQuadrature::new(CellType::Tet4, 2);
        assert!(!rule.is_initialized());
        assert_eq!(rule.num_points(), 0);
        assert!(rule.weights().is_empty());
    }

    #[test]
    fn unsupported_degree_is_rejected() {
        let mut rule = GaussQuadrature::new(CellType::Tet4, 4);
        assert_eq!(
            rule.initialize(),
            Err(ConfigurationError::UnsupportedQuadrature {
                cell: CellType::Tet4,
                degree: 4,
            })
        );
        assert!(!rule.is_initialized());
    }

    #[test]
    fn tet_rule_integrates_quadratics_exactly() {
        // int x^2 over the unit tetrahedron = 1/60.
        let mut rule = GaussQuadrature::new(CellType::Tet4, 2);
        rule.initialize().unwrap();
        let integral: f64 = rule
            .points()
            .iter()
            .zip(rule.weights())
            .map(|(p, w)| p.x * p.x * w)
            .sum();
        assert!((integral - 1.0 / 60.0).abs() < 1e-14);
    }

    #[test]
    fn quad_rule_integrates_quadratics_exactly() {
        // int x^2 over [-1, 1]^2 = 4/3.
        let mut rule = GaussQuadrature::new(CellType::Quad4, 2);
        rule.initialize().unwrap();
        let integral: f64 = rule
            .points()
            .iter()
            .zip(rule.weights())
            .map(|(p, w)| p.x * p.x * w)
            .sum();
        assert!((integral - 4.0 / 3.0).abs() < 1e-14);
    }
}
