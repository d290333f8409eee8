use serde::{Deserialize, Serialize};

use crate::calo_hit::CaloHit;
use crate::types::{CellGeometry, HitRegion, HitType, InputValue, ParentAddress};
use crate::vector::CartesianVector;

/// Parameters describing one energy deposit, filled in by the caller before construction.
///
/// Every slot is required; an unset slot makes construction fail `NotInitialized`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaloHitParameters {
    pub position_vector: InputValue<CartesianVector>,
    pub expected_direction: InputValue<CartesianVector>,
    pub cell_normal_vector: InputValue<CartesianVector>,
    pub cell_geometry: InputValue<CellGeometry>,
    /// Rectangular: first in-plane length. Pointing: pseudorapidity width.
    pub cell_size0: InputValue<f32>,
    /// Rectangular: second in-plane length. Pointing: azimuthal width.
    pub cell_size1: InputValue<f32>,
    pub cell_thickness: InputValue<f32>,
    pub n_cell_radiation_lengths: InputValue<f32>,
    pub n_cell_interaction_lengths: InputValue<f32>,
    pub time: InputValue<f32>,
    pub input_energy: InputValue<f32>,
    pub mip_equivalent_energy: InputValue<f32>,
    pub electromagnetic_energy: InputValue<f32>,
    pub hadronic_energy: InputValue<f32>,
    pub is_digital: InputValue<bool>,
    pub hit_type: InputValue<HitType>,
    pub hit_region: InputValue<HitRegion>,
    pub layer: InputValue<u32>,
    pub is_in_outer_sampling_layer: InputValue<bool>,
    pub parent_address: InputValue<ParentAddress>,
}

impl CaloHitParameters {
    pub fn with_position(mut self, position: CartesianVector) -> Self {
        self.position_vector.set(position);
        self
    }

    pub fn with_expected_direction(mut self, direction: CartesianVector) -> Self {
        self.expected_direction.set(direction);
        self
    }

    pub fn with_cell_normal(mut self, normal: CartesianVector) -> Self {
        self.cell_normal_vector.set(normal);
        self
    }

    /// Cell shape and its two in-plane sizes.
    pub fn with_cell(mut self, geometry: CellGeometry, size0: f32, size1: f32) -> Self {
        self.cell_geometry.set(geometry);
        self.cell_size0.set(size0);
        self.cell_size1.set(size1);
        self
    }

    pub fn with_cell_thickness(mut self, thickness: f32) -> Self {
        self.cell_thickness.set(thickness);
        self
    }

    /// Radiation and interaction lengths of material in the cell.
    pub fn with_cell_material(mut self, n_radiation_lengths: f32, n_interaction_lengths: f32) -> Self {
        self.n_cell_radiation_lengths.set(n_radiation_lengths);
        self.n_cell_interaction_lengths.set(n_interaction_lengths);
        self
    }

    pub fn with_time(mut self, time: f32) -> Self {
        self.time.set(time);
        self
    }

    /// Set all four energy-like quantities.
    pub fn with_energies(
        mut self,
        input: f32,
        mip_equivalent: f32,
        electromagnetic: f32,
        hadronic: f32,
    ) -> Self {
        self.input_energy.set(input);
        self.mip_equivalent_energy.set(mip_equivalent);
        self.electromagnetic_energy.set(electromagnetic);
        self.hadronic_energy.set(hadronic);
        self
    }

    pub fn with_is_digital(mut self, is_digital: bool) -> Self {
        self.is_digital.set(is_digital);
        self
    }

    /// Readout type and detector region.
    pub fn with_hit_kind(mut self, hit_type: HitType, hit_region: HitRegion) -> Self {
        self.hit_type.set(hit_type);
        self.hit_region.set(hit_region);
        self
    }

    pub fn with_layer(mut self, layer: u32, is_in_outer_sampling_layer: bool) -> Self {
        self.layer.set(layer);
        self.is_in_outer_sampling_layer.set(is_in_outer_sampling_layer);
        self
    }

    pub fn with_parent_address(mut self, parent_address: ParentAddress) -> Self {
        self.parent_address.set(parent_address);
        self
    }
}

/// Parameters for a weighted fragment of an existing hit.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaloHitFragmentParameters<'a> {
    pub original_calo_hit: Option<&'a CaloHit>,
    pub weight: InputValue<f32>,
}

impl<'a> CaloHitFragmentParameters<'a> {
    pub fn new(original_calo_hit: &'a CaloHit, weight: f32) -> Self {
        Self {
            original_calo_hit: Some(original_calo_hit),
            weight: InputValue::new(weight),
        }
    }
}

/// Optional overrides for the mutable classification flags of a hit.
///
/// Fields left as `None` are not touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaloHitMetadata {
    pub is_possible_mip: Option<bool>,
    pub is_isolated: Option<bool>,
}

impl CaloHitMetadata {
    pub fn with_possible_mip(mut self, is_possible_mip: bool) -> Self {
        self.is_possible_mip = Some(is_possible_mip);
        self
    }

    pub fn with_isolated(mut self, is_isolated: bool) -> Self {
        self.is_isolated = Some(is_isolated);
        self
    }
}
