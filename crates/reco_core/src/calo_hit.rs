//! Calorimeter hit entity: an energy deposit in one detector cell.
//!
//! A [`CaloHit`] is built either from [`CaloHitParameters`] (a primary hit) or from
//! [`CaloHitFragmentParameters`] (a weighted fragment of an existing hit). Both paths
//! go through the same private initializer. Hits are `bevy_ecs` components: the
//! host `World` owns them, everything in this crate refers to them by `Entity`.

mod geometry;
mod params;

use std::collections::HashMap;
use std::fmt;

use bevy_ecs::prelude::{Component, Entity};

use crate::factory::{DefaultObjectFactory, FromParameters};
use crate::status::{StatusCode, StatusResult};
use crate::types::{CellGeometry, HitRegion, HitType, ParentAddress};
use crate::vector::{unit_vector, CartesianVector};

pub use geometry::CellCorners;
pub use params::{CaloHitFragmentParameters, CaloHitMetadata, CaloHitParameters};

/// Contribution weight of each simulated particle (by entity) to a hit.
pub type McParticleWeightMap = HashMap<Entity, f32>;

/// Factory for primary hits.
pub type CaloHitFactory = DefaultObjectFactory<CaloHitParameters, CaloHit>;

/// Factory for weighted fragments of an existing hit.
pub type CaloHitFragmentFactory<'a> = DefaultObjectFactory<CaloHitFragmentParameters<'a>, CaloHit>;

/// Pseudolayer value meaning "not yet assigned".
pub const UNSET_PSEUDO_LAYER: u32 = 0;

/// Geometry and readout description; fixed for the lifetime of the hit and shared by fragments.
#[derive(Debug, Clone, PartialEq)]
struct HitCell {
    position_vector: CartesianVector,
    expected_direction: CartesianVector,
    cell_normal_vector: CartesianVector,
    cell_geometry: CellGeometry,
    cell_size0: f32,
    cell_size1: f32,
    cell_thickness: f32,
    n_cell_radiation_lengths: f32,
    n_cell_interaction_lengths: f32,
    time: f32,
    is_digital: bool,
    hit_type: HitType,
    hit_region: HitRegion,
    layer: u32,
    is_in_outer_sampling_layer: bool,
    parent_address: ParentAddress,
    cell_length_scale: f32,
}

impl HitCell {
    fn from_parameters(parameters: &CaloHitParameters) -> StatusResult<Self> {
        let position_vector = parameters.position_vector.get()?;
        let cell_geometry = parameters.cell_geometry.get()?;
        let cell_size0 = parameters.cell_size0.get()?;
        let cell_size1 = parameters.cell_size1.get()?;
        let cell_length_scale =
            geometry::cell_length_scale(cell_geometry, &position_vector, cell_size0, cell_size1)?;

        Ok(Self {
            position_vector,
            expected_direction: unit_vector(parameters.expected_direction.get_ref()?)?,
            cell_normal_vector: unit_vector(parameters.cell_normal_vector.get_ref()?)?,
            cell_geometry,
            cell_size0,
            cell_size1,
            cell_thickness: parameters.cell_thickness.get()?,
            n_cell_radiation_lengths: parameters.n_cell_radiation_lengths.get()?,
            n_cell_interaction_lengths: parameters.n_cell_interaction_lengths.get()?,
            time: parameters.time.get()?,
            is_digital: parameters.is_digital.get()?,
            hit_type: parameters.hit_type.get()?,
            hit_region: parameters.hit_region.get()?,
            layer: parameters.layer.get()?,
            is_in_outer_sampling_layer: parameters.is_in_outer_sampling_layer.get()?,
            parent_address: parameters.parent_address.get()?,
            cell_length_scale,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct HitEnergies {
    input: f32,
    mip_equivalent: f32,
    electromagnetic: f32,
    hadronic: f32,
}

impl HitEnergies {
    fn from_parameters(parameters: &CaloHitParameters) -> StatusResult<Self> {
        Ok(Self {
            input: parameters.input_energy.get()?,
            mip_equivalent: parameters.mip_equivalent_energy.get()?,
            electromagnetic: parameters.electromagnetic_energy.get()?,
            hadronic: parameters.hadronic_energy.get()?,
        })
    }

    fn scaled(self, weight: f32) -> Self {
        Self {
            input: weight * self.input,
            mip_equivalent: weight * self.mip_equivalent,
            electromagnetic: weight * self.electromagnetic,
            hadronic: weight * self.hadronic,
        }
    }
}

/// Reconstruction-time state, mutable after construction.
#[derive(Debug, Clone, PartialEq)]
struct HitState {
    pseudo_layer: u32,
    is_possible_mip: bool,
    is_isolated: bool,
    is_available: bool,
    weight: f32,
    mc_particle_weights: McParticleWeightMap,
}

impl Default for HitState {
    fn default() -> Self {
        Self {
            pseudo_layer: UNSET_PSEUDO_LAYER,
            is_possible_mip: false,
            is_isolated: false,
            is_available: true,
            weight: 1.0,
            mc_particle_weights: McParticleWeightMap::new(),
        }
    }
}

impl HitState {
    fn fragment(&self, weight: f32) -> Self {
        Self {
            weight: weight * self.weight,
            mc_particle_weights: self
                .mc_particle_weights
                .iter()
                .map(|(particle, contribution)| (*particle, contribution * weight))
                .collect(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Component)]
pub struct CaloHit {
    cell: HitCell,
    energies: HitEnergies,
    state: HitState,
}

impl CaloHit {
    /// Build a primary hit. Every parameter slot must be set.
    pub fn new(parameters: &CaloHitParameters) -> StatusResult<Self> {
        let cell = HitCell::from_parameters(parameters)?;
        let energies = HitEnergies::from_parameters(parameters)?;
        Ok(Self::from_parts(cell, energies, HitState::default()))
    }

    /// Build a fragment carrying `weight` of `original`'s energy.
    ///
    /// Geometry is copied verbatim; energies, the cumulative weight and every
    /// particle contribution are multiplied by `weight`.
    pub fn fragment(original: &CaloHit, weight: f32) -> Self {
        Self::from_parts(
            original.cell.clone(),
            original.energies.scaled(weight),
            original.state.fragment(weight),
        )
    }

    fn from_parts(cell: HitCell, energies: HitEnergies, state: HitState) -> Self {
        Self {
            cell,
            energies,
            state,
        }
    }

    pub fn position_vector(&self) -> &CartesianVector {
        &self.cell.position_vector
    }

    /// Unit vector.
    pub fn expected_direction(&self) -> &CartesianVector {
        &self.cell.expected_direction
    }

    /// Unit vector.
    pub fn cell_normal_vector(&self) -> &CartesianVector {
        &self.cell.cell_normal_vector
    }

    pub fn cell_geometry(&self) -> CellGeometry {
        self.cell.cell_geometry
    }

    pub fn cell_size0(&self) -> f32 {
        self.cell.cell_size0
    }

    pub fn cell_size1(&self) -> f32 {
        self.cell.cell_size1
    }

    pub fn cell_thickness(&self) -> f32 {
        self.cell.cell_thickness
    }

    pub fn n_cell_radiation_lengths(&self) -> f32 {
        self.cell.n_cell_radiation_lengths
    }

    pub fn n_cell_interaction_lengths(&self) -> f32 {
        self.cell.n_cell_interaction_lengths
    }

    pub fn time(&self) -> f32 {
        self.cell.time
    }

    pub fn input_energy(&self) -> f32 {
        self.energies.input
    }

    pub fn mip_equivalent_energy(&self) -> f32 {
        self.energies.mip_equivalent
    }

    pub fn electromagnetic_energy(&self) -> f32 {
        self.energies.electromagnetic
    }

    pub fn hadronic_energy(&self) -> f32 {
        self.energies.hadronic
    }

    pub fn is_digital(&self) -> bool {
        self.cell.is_digital
    }

    pub fn hit_type(&self) -> HitType {
        self.cell.hit_type
    }

    pub fn hit_region(&self) -> HitRegion {
        self.cell.hit_region
    }

    pub fn layer(&self) -> u32 {
        self.cell.layer
    }

    pub fn is_in_outer_sampling_layer(&self) -> bool {
        self.cell.is_in_outer_sampling_layer
    }

    pub fn parent_address(&self) -> ParentAddress {
        self.cell.parent_address
    }

    /// Typical cell length, computed once at construction.
    pub fn cell_length_scale(&self) -> f32 {
        self.cell.cell_length_scale
    }

    /// Depth coordinate; [`UNSET_PSEUDO_LAYER`] until assigned.
    pub fn pseudo_layer(&self) -> u32 {
        self.state.pseudo_layer
    }

    pub fn is_possible_mip(&self) -> bool {
        self.state.is_possible_mip
    }

    pub fn is_isolated(&self) -> bool {
        self.state.is_isolated
    }

    pub fn is_available(&self) -> bool {
        self.state.is_available
    }

    /// Product of all fragment weights applied since the primary hit.
    pub fn weight(&self) -> f32 {
        self.state.weight
    }

    pub fn mc_particle_weights(&self) -> &McParticleWeightMap {
        &self.state.mc_particle_weights
    }

    /// Assign the depth coordinate.
    ///
    /// Zero is the "unset" sentinel and is rejected with `NotInitialized`, leaving
    /// the coordinate unset. Assigning more than once is not part of the contract:
    /// the last value wins.
    pub fn set_pseudo_layer(&mut self, pseudo_layer: u32) -> StatusResult<()> {
        if pseudo_layer == UNSET_PSEUDO_LAYER {
            return Err(StatusCode::NotInitialized);
        }
        self.state.pseudo_layer = pseudo_layer;
        Ok(())
    }

    pub fn alter_metadata(&mut self, metadata: &CaloHitMetadata) {
        if let Some(is_possible_mip) = metadata.is_possible_mip {
            self.state.is_possible_mip = is_possible_mip;
        }
        if let Some(is_isolated) = metadata.is_isolated {
            self.state.is_isolated = is_isolated;
        }
    }

    pub fn set_is_available(&mut self, is_available: bool) {
        self.state.is_available = is_available;
    }

    pub fn set_mc_particle_weights(&mut self, mc_particle_weights: McParticleWeightMap) {
        self.state.mc_particle_weights = mc_particle_weights;
    }

    pub fn remove_mc_particles(&mut self) {
        self.state.mc_particle_weights.clear();
    }
}

impl FromParameters<CaloHitParameters> for CaloHit {
    fn from_parameters(parameters: &CaloHitParameters) -> StatusResult<Self> {
        Self::new(parameters)
    }
}

impl<'a> FromParameters<CaloHitFragmentParameters<'a>> for CaloHit {
    fn from_parameters(parameters: &CaloHitFragmentParameters<'a>) -> StatusResult<Self> {
        let original = parameters
            .original_calo_hit
            .ok_or(StatusCode::NotInitialized)?;
        Ok(Self::fragment(original, parameters.weight.get()?))
    }
}

impl fmt::Display for CaloHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let position = self.position_vector();
        write!(
            f,
            "CaloHit: position ({}, {}, {}) energy {}",
            position.x,
            position.y,
            position.z,
            self.input_energy()
        )
    }
}
