//! Detector gaps: regions between sub-detector volumes without active material.

use serde::{Deserialize, Serialize};

use crate::factory::{DefaultObjectFactory, FromParameters};
use crate::status::StatusResult;
use crate::types::{InputValue, LineGapType};
use crate::vector::CartesianVector;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineGapParameters {
    pub line_gap_type: InputValue<LineGapType>,
    pub line_start_x: InputValue<f32>,
    pub line_end_x: InputValue<f32>,
    pub line_start_z: InputValue<f32>,
    pub line_end_z: InputValue<f32>,
}

impl LineGapParameters {
    pub fn new(line_gap_type: LineGapType, start_x: f32, end_x: f32, start_z: f32, end_z: f32) -> Self {
        Self {
            line_gap_type: line_gap_type.into(),
            line_start_x: start_x.into(),
            line_end_x: end_x.into(),
            line_start_z: start_z.into(),
            line_end_z: end_z.into(),
        }
    }
}

/// Gap along a line in the x-z plane (e.g. dead wires in a TPC view).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineGap {
    pub line_gap_type: LineGapType,
    pub line_start_x: f32,
    pub line_end_x: f32,
    pub line_start_z: f32,
    pub line_end_z: f32,
}

impl FromParameters<LineGapParameters> for LineGap {
    fn from_parameters(parameters: &LineGapParameters) -> StatusResult<Self> {
        Ok(Self {
            line_gap_type: parameters.line_gap_type.get()?,
            line_start_x: parameters.line_start_x.get()?,
            line_end_x: parameters.line_end_x.get()?,
            line_start_z: parameters.line_start_z.get()?,
            line_end_z: parameters.line_end_z.get()?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxGapParameters {
    pub vertex: InputValue<CartesianVector>,
    pub side1: InputValue<CartesianVector>,
    pub side2: InputValue<CartesianVector>,
    pub side3: InputValue<CartesianVector>,
}

impl BoxGapParameters {
    pub fn new(
        vertex: CartesianVector,
        side1: CartesianVector,
        side2: CartesianVector,
        side3: CartesianVector,
    ) -> Self {
        Self {
            vertex: vertex.into(),
            side1: side1.into(),
            side2: side2.into(),
            side3: side3.into(),
        }
    }
}

/// Parallelepiped spanned from `vertex` by three side vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxGap {
    pub vertex: CartesianVector,
    pub side1: CartesianVector,
    pub side2: CartesianVector,
    pub side3: CartesianVector,
}

impl FromParameters<BoxGapParameters> for BoxGap {
    fn from_parameters(parameters: &BoxGapParameters) -> StatusResult<Self> {
        Ok(Self {
            vertex: parameters.vertex.get()?,
            side1: parameters.side1.get()?,
            side2: parameters.side2.get()?,
            side3: parameters.side3.get()?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcentricGapParameters {
    pub min_z_coordinate: InputValue<f32>,
    pub max_z_coordinate: InputValue<f32>,
    pub inner_r_coordinate: InputValue<f32>,
    pub inner_phi_coordinate: InputValue<f32>,
    pub inner_symmetry_order: InputValue<u32>,
    pub outer_r_coordinate: InputValue<f32>,
    pub outer_phi_coordinate: InputValue<f32>,
    pub outer_symmetry_order: InputValue<u32>,
}

/// Gap between two concentric polygonal (or cylindrical) surfaces over a z range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConcentricGap {
    pub min_z_coordinate: f32,
    pub max_z_coordinate: f32,
    pub inner_r_coordinate: f32,
    pub inner_phi_coordinate: f32,
    pub inner_symmetry_order: u32,
    pub outer_r_coordinate: f32,
    pub outer_phi_coordinate: f32,
    pub outer_symmetry_order: u32,
}

impl FromParameters<ConcentricGapParameters> for ConcentricGap {
    fn from_parameters(parameters: &ConcentricGapParameters) -> StatusResult<Self> {
        Ok(Self {
            min_z_coordinate: parameters.min_z_coordinate.get()?,
            max_z_coordinate: parameters.max_z_coordinate.get()?,
            inner_r_coordinate: parameters.inner_r_coordinate.get()?,
            inner_phi_coordinate: parameters.inner_phi_coordinate.get()?,
            inner_symmetry_order: parameters.inner_symmetry_order.get()?,
            outer_r_coordinate: parameters.outer_r_coordinate.get()?,
            outer_phi_coordinate: parameters.outer_phi_coordinate.get()?,
            outer_symmetry_order: parameters.outer_symmetry_order.get()?,
        })
    }
}

/// Any of the three gap shapes, as held by the geometry registry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetectorGap {
    Line(LineGap),
    Box(BoxGap),
    Concentric(ConcentricGap),
}

impl From<LineGap> for DetectorGap {
    fn from(gap: LineGap) -> Self {
        DetectorGap::Line(gap)
    }
}

impl From<BoxGap> for DetectorGap {
    fn from(gap: BoxGap) -> Self {
        DetectorGap::Box(gap)
    }
}

impl From<ConcentricGap> for DetectorGap {
    fn from(gap: ConcentricGap) -> Self {
        DetectorGap::Concentric(gap)
    }
}

pub type LineGapFactory = DefaultObjectFactory<LineGapParameters, LineGap>;
pub type BoxGapFactory = DefaultObjectFactory<BoxGapParameters, BoxGap>;
pub type ConcentricGapFactory = DefaultObjectFactory<ConcentricGapParameters, ConcentricGap>;
