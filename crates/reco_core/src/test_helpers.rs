//! Test helpers for common hit and geometry fixtures.
//!
//! Shared by unit tests, integration tests and benches so every test builds hits
//! from the same detector description.

use crate::calo_hit::{CaloHit, CaloHitParameters};
use crate::geometry::{LayerParameters, SubDetectorParameters};
use crate::types::{CellGeometry, HitRegion, HitType, ParentAddress, SubDetectorType};
use crate::vector::CartesianVector;

/// Radius (mm) of the barrel calorimeter face used by the fixtures.
pub const TEST_BARREL_RADIUS: f32 = 1800.0;

/// Fully populated parameters for a 10 x 10 mm rectangular ECAL barrel cell.
pub fn rectangular_hit_parameters() -> CaloHitParameters {
    CaloHitParameters::default()
        .with_position(CartesianVector::new(0.0, TEST_BARREL_RADIUS, 100.0))
        .with_expected_direction(CartesianVector::new(0.0, TEST_BARREL_RADIUS, 100.0))
        .with_cell_normal(CartesianVector::new(0.0, 1.0, 0.0))
        .with_cell(CellGeometry::Rectangular, 10.0, 10.0)
        .with_cell_thickness(5.0)
        .with_cell_material(1.0, 0.1)
        .with_time(0.0)
        .with_energies(1.0, 1.0, 1.0, 1.0)
        .with_is_digital(false)
        .with_hit_kind(HitType::Ecal, HitRegion::Barrel)
        .with_layer(1, false)
        .with_parent_address(ParentAddress(0))
}

/// Fully populated parameters for a projective barrel cell at r = 1000 mm, eta = 0.
pub fn pointing_hit_parameters() -> CaloHitParameters {
    rectangular_hit_parameters()
        .with_position(CartesianVector::new(0.0, 1000.0, 0.0))
        .with_expected_direction(CartesianVector::new(0.0, 1.0, 0.0))
        .with_cell(CellGeometry::Pointing, 0.01, 0.01)
}

/// A rectangular barrel hit with the given input energy.
///
/// # Panics
///
/// Panics if the fixture parameters are invalid (should never happen).
pub fn test_calo_hit(input_energy: f32) -> CaloHit {
    let parameters = rectangular_hit_parameters().with_energies(
        input_energy,
        input_energy * 2.0,
        input_energy,
        input_energy * 1.2,
    );
    CaloHit::new(&parameters).expect("fixture hit parameters should be valid")
}

/// A rectangular barrel hit already assigned to `pseudo_layer`.
///
/// # Panics
///
/// Panics if `pseudo_layer` is zero.
pub fn test_calo_hit_in_layer(pseudo_layer: u32) -> CaloHit {
    let mut hit = test_calo_hit(1.0);
    hit.set_pseudo_layer(pseudo_layer)
        .expect("fixture pseudolayer should be nonzero");
    hit
}

/// A sub-detector description with `n_layers` evenly spaced layers.
pub fn test_sub_detector_parameters(
    name: &str,
    sub_detector_type: SubDetectorType,
    n_layers: u32,
) -> SubDetectorParameters {
    let layers = (0..n_layers)
        .map(|layer| LayerParameters {
            closest_distance_to_ip: TEST_BARREL_RADIUS + 5.0 * layer as f32,
            n_radiation_lengths: 0.6,
            n_interaction_lengths: 0.02,
        })
        .collect();

    SubDetectorParameters::default()
        .with_name(name)
        .with_type(sub_detector_type)
        .with_inner_boundary(TEST_BARREL_RADIUS, 0.0, 0.0, 8)
        .with_outer_boundary(TEST_BARREL_RADIUS + 200.0, 2400.0, 0.0, 8)
        .with_is_mirrored_in_z(true)
        .with_layers(layers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_hits_are_valid() {
        let hit = test_calo_hit(2.0);
        assert_eq!(hit.input_energy(), 2.0);
        assert_eq!(hit.cell_length_scale(), 10.0);
        assert_eq!(test_calo_hit_in_layer(4).pseudo_layer(), 4);
    }

    #[test]
    fn sub_detector_fixture_has_consistent_layers() {
        let parameters = test_sub_detector_parameters("ECalBarrel", SubDetectorType::EcalBarrel, 3);
        assert_eq!(parameters.n_layers.get(), Ok(3));
        assert_eq!(parameters.layer_parameters.len(), 3);
    }
}
