//! Cell length scale and cell corners for the rectangular and pointing cell models.

use crate::calo_hit::CaloHit;
use crate::status::{StatusCode, StatusResult};
use crate::types::{CellGeometry, HitRegion};
use crate::vector::{
    spherical_to_cartesian, theta_from_pseudorapidity, CartesianVector, SphericalCoordinates,
};

/// Eight vertices bounding a cell volume.
pub type CellCorners = [CartesianVector; 8];

/// Polar-angle bounds of a pseudorapidity window `central_eta ± eta_width / 2`.
///
/// Returned as `(theta at eta_min, theta at eta_max)`; since theta falls as eta
/// rises, the first value is the larger angle.
fn theta_window(central_eta: f32, eta_width: f32) -> (f32, f32) {
    let eta_min = central_eta - eta_width / 2.0;
    let eta_max = central_eta + eta_width / 2.0;
    (
        theta_from_pseudorapidity(eta_min),
        theta_from_pseudorapidity(eta_max),
    )
}

pub(super) fn cell_length_scale(
    cell_geometry: CellGeometry,
    position: &CartesianVector,
    cell_size0: f32,
    cell_size1: f32,
) -> StatusResult<f32> {
    match cell_geometry {
        CellGeometry::Rectangular => Ok((cell_size0 * cell_size1).sqrt()),
        CellGeometry::Pointing => {
            let spherical = SphericalCoordinates::from_cartesian(position)?;
            let (theta_min, theta_max) = theta_window(spherical.pseudorapidity(), cell_size0);
            let radius = spherical.radius;
            Ok((radius * cell_size1 * radius * (theta_max - theta_min))
                .abs()
                .sqrt())
        }
        CellGeometry::Other(_) => Err(StatusCode::InvalidParameter),
    }
}

/// Radius multiplier at a polar-angle bound, so that the frustum mid-surface
/// passes through the hit position.
fn radius_scale(hit_region: HitRegion, theta: f32, theta_bound: f32) -> f32 {
    let (value, bound) = match hit_region {
        HitRegion::Barrel => (theta.sin(), theta_bound.sin()),
        HitRegion::Endcap => (theta.cos(), theta_bound.cos()),
    };
    if bound.abs() > f32::EPSILON {
        (value / bound).abs()
    } else {
        1.0
    }
}

fn rectangular_cell_corners(hit: &CaloHit) -> CellCorners {
    let position = hit.position_vector();
    let normal = *hit.cell_normal_vector();
    let dir_u = match hit.hit_region() {
        HitRegion::Barrel => CartesianVector::z(),
        HitRegion::Endcap => CartesianVector::y(),
    };
    let dir_v = normal.cross(&dir_u);

    let u = dir_u * (hit.cell_size0() / 2.0);
    let v = dir_v * (hit.cell_size1() / 2.0);
    let n = normal * (hit.cell_thickness() / 2.0);

    [
        position - u - v - n,
        position + u - v - n,
        position + u + v - n,
        position - u + v - n,
        position - u - v + n,
        position + u - v + n,
        position + u + v + n,
        position - u + v + n,
    ]
}

fn pointing_cell_corners(hit: &CaloHit) -> StatusResult<CellCorners> {
    let spherical = SphericalCoordinates::from_cartesian(hit.position_vector())?;
    let central_eta = spherical.pseudorapidity();
    let SphericalCoordinates { radius, phi, theta } = spherical;

    let r_min = radius - hit.cell_thickness() / 2.0;
    let r_max = radius + hit.cell_thickness() / 2.0;
    let phi_min = phi - hit.cell_size1() / 2.0;
    let phi_max = phi + hit.cell_size1() / 2.0;
    let (theta_min, theta_max) = theta_window(central_eta, hit.cell_size0());

    let theta_min_scale = radius_scale(hit.hit_region(), theta, theta_min);
    let theta_max_scale = radius_scale(hit.hit_region(), theta, theta_max);

    let corners_at = |r: f32| {
        let r_at_theta_min = theta_min_scale * r;
        let r_at_theta_max = theta_max_scale * r;
        [
            spherical_to_cartesian(r_at_theta_min, phi_min, theta_min),
            spherical_to_cartesian(r_at_theta_max, phi_min, theta_max),
            spherical_to_cartesian(r_at_theta_max, phi_max, theta_max),
            spherical_to_cartesian(r_at_theta_min, phi_max, theta_min),
        ]
    };
    let [c0, c1, c2, c3] = corners_at(r_min);
    let [c4, c5, c6, c7] = corners_at(r_max);

    Ok([c0, c1, c2, c3, c4, c5, c6, c7])
}

impl CaloHit {
    /// The eight corners of the cell volume, recomputed on every call.
    ///
    /// The first four corners lie on the inner face (towards `-normal` or the
    /// smaller radius), the last four on the outer face, in matching order.
    pub fn cell_corners(&self) -> StatusResult<CellCorners> {
        match self.cell_geometry() {
            CellGeometry::Rectangular => Ok(rectangular_cell_corners(self)),
            CellGeometry::Pointing => pointing_cell_corners(self),
            CellGeometry::Other(_) => Err(StatusCode::InvalidParameter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{pointing_hit_parameters, rectangular_hit_parameters};

    fn transverse_radius(point: &CartesianVector) -> f32 {
        (point.x * point.x + point.y * point.y).sqrt()
    }

    #[test]
    fn barrel_rectangular_corners_surround_position() {
        let parameters = rectangular_hit_parameters()
            .with_position(CartesianVector::new(100.0, 0.0, 0.0))
            .with_cell_normal(CartesianVector::new(1.0, 0.0, 0.0))
            .with_cell(CellGeometry::Rectangular, 2.0, 8.0)
            .with_cell_thickness(4.0);
        let hit = CaloHit::new(&parameters).expect("valid hit");
        let corners = hit.cell_corners().expect("corners");

        // u = z, v = x cross z = -y
        assert_eq!(corners[0], CartesianVector::new(98.0, 4.0, -1.0));
        assert_eq!(corners[6], CartesianVector::new(102.0, -4.0, 1.0));

        let centroid = corners
            .iter()
            .fold(CartesianVector::zeros(), |sum, corner| sum + corner)
            / 8.0;
        assert!((centroid - hit.position_vector()).norm() < 1e-4);
    }

    #[test]
    fn endcap_rectangular_cells_use_transverse_axis() {
        let parameters = rectangular_hit_parameters()
            .with_position(CartesianVector::new(0.0, 0.0, 2000.0))
            .with_cell_normal(CartesianVector::new(0.0, 0.0, 1.0))
            .with_hit_kind(crate::types::HitType::Ecal, HitRegion::Endcap)
            .with_cell(CellGeometry::Rectangular, 10.0, 6.0)
            .with_cell_thickness(2.0);
        let hit = CaloHit::new(&parameters).expect("valid hit");
        let corners = hit.cell_corners().expect("corners");

        // u = y, v = z cross y = -x
        assert_eq!(corners[0], CartesianVector::new(3.0, -5.0, 1999.0));
        assert_eq!(corners[6], CartesianVector::new(-3.0, 5.0, 2001.0));
    }

    #[test]
    fn pointing_cell_length_scale_matches_small_angle_limit() {
        let hit = CaloHit::new(&pointing_hit_parameters()).expect("valid hit");
        // At eta = 0, dtheta ~ deta so the scale is ~ r * sqrt(size0 * size1) = 10.
        assert!((hit.cell_length_scale() - 10.0).abs() < 1e-2);
    }

    #[test]
    fn pointing_barrel_corners_sit_on_radial_bounds() {
        let hit = CaloHit::new(&pointing_hit_parameters()).expect("valid hit");
        let corners = hit.cell_corners().expect("corners");
        let r_min = 1000.0 - hit.cell_thickness() / 2.0;
        let r_max = 1000.0 + hit.cell_thickness() / 2.0;

        for corner in &corners[..4] {
            assert!((transverse_radius(corner) - r_min).abs() < 1e-2);
        }
        for corner in &corners[4..] {
            assert!((transverse_radius(corner) - r_max).abs() < 1e-2);
        }
    }

    #[test]
    fn pointing_endcap_corners_sit_on_z_bounds() {
        let parameters = pointing_hit_parameters()
            .with_position(CartesianVector::new(300.0, 0.0, 3000.0))
            .with_hit_kind(crate::types::HitType::Ecal, HitRegion::Endcap);
        let hit = CaloHit::new(&parameters).expect("valid hit");
        let corners = hit.cell_corners().expect("corners");
        let radius = hit.position_vector().norm();
        let z_min = (radius - hit.cell_thickness() / 2.0) * 3000.0 / radius;
        let z_max = (radius + hit.cell_thickness() / 2.0) * 3000.0 / radius;

        for corner in &corners[..4] {
            assert!((corner.z - z_min).abs() < 1e-1);
        }
        for corner in &corners[4..] {
            assert!((corner.z - z_max).abs() < 1e-1);
        }
    }

    #[test]
    fn radius_scale_falls_back_to_unity_near_zero() {
        let theta = 0.3;
        assert_eq!(radius_scale(HitRegion::Barrel, theta, 0.0), 1.0);
        assert_eq!(
            radius_scale(HitRegion::Endcap, theta, std::f32::consts::FRAC_PI_2),
            1.0
        );
    }
}
