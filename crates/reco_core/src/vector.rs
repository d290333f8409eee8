//! Cartesian/spherical vector helpers used by cell geometry.
//!
//! Positions and directions are `nalgebra::Vector3<f32>`. Angles follow the
//! collider convention: `phi` is the azimuth around the beam (z) axis and
//! `theta` the polar angle from +z.

use nalgebra::Vector3;

use crate::status::{StatusCode, StatusResult};

/// Three-vector in detector coordinates (mm).
pub type CartesianVector = Vector3<f32>;

/// Unit vector in the direction of `vector`; a zero-length vector is rejected.
pub fn unit_vector(vector: &CartesianVector) -> StatusResult<CartesianVector> {
    vector
        .try_normalize(f32::EPSILON)
        .ok_or(StatusCode::InvalidParameter)
}

/// Polar angle for a pseudorapidity value.
pub fn theta_from_pseudorapidity(eta: f32) -> f32 {
    2.0 * (-eta).exp().atan()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalCoordinates {
    pub radius: f32,
    pub phi: f32,
    pub theta: f32,
}

impl SphericalCoordinates {
    /// Fails `InvalidParameter` for the origin, where the angles are undefined.
    pub fn from_cartesian(vector: &CartesianVector) -> StatusResult<Self> {
        let radius = vector.norm();
        if radius < f32::EPSILON {
            return Err(StatusCode::InvalidParameter);
        }
        Ok(Self {
            radius,
            phi: vector.y.atan2(vector.x),
            theta: (vector.z / radius).clamp(-1.0, 1.0).acos(),
        })
    }

    /// Pseudorapidity of the polar angle, `-ln(tan(theta / 2))`.
    pub fn pseudorapidity(&self) -> f32 {
        -(self.theta / 2.0).tan().ln()
    }
}

/// Cartesian point for spherical `(radius, phi, theta)`.
pub fn spherical_to_cartesian(radius: f32, phi: f32, theta: f32) -> CartesianVector {
    let sin_theta = theta.sin();
    CartesianVector::new(
        radius * sin_theta * phi.cos(),
        radius * sin_theta * phi.sin(),
        radius * theta.cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn spherical_coordinates_of_transverse_point() {
        let coords = SphericalCoordinates::from_cartesian(&CartesianVector::new(0.0, 10.0, 0.0))
            .expect("non-zero vector");
        assert!((coords.radius - 10.0).abs() < 1e-5);
        assert!((coords.phi - FRAC_PI_2).abs() < 1e-6);
        assert!((coords.theta - FRAC_PI_2).abs() < 1e-6);
        assert!(coords.pseudorapidity().abs() < 1e-6);
    }

    #[test]
    fn origin_has_no_spherical_coordinates() {
        assert_eq!(
            SphericalCoordinates::from_cartesian(&CartesianVector::zeros()),
            Err(StatusCode::InvalidParameter)
        );
    }

    #[test]
    fn pseudorapidity_round_trips_through_theta() {
        let theta = theta_from_pseudorapidity(1.2);
        let coords = SphericalCoordinates {
            radius: 1.0,
            phi: 0.0,
            theta,
        };
        assert!((coords.pseudorapidity() - 1.2).abs() < 1e-5);
    }

    #[test]
    fn zero_vector_has_no_direction() {
        assert_eq!(
            unit_vector(&CartesianVector::zeros()),
            Err(StatusCode::InvalidParameter)
        );
        let unit = unit_vector(&CartesianVector::new(3.0, 0.0, 4.0)).expect("unit");
        assert!((unit.norm() - 1.0).abs() < 1e-6);
    }
}
