use serde::{Deserialize, Serialize};

use crate::factory::{DefaultObjectFactory, FromParameters};
use crate::status::{StatusCode, StatusResult};
use crate::types::{InputValue, SubDetectorType};

/// Per-layer material description.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerParameters {
    pub closest_distance_to_ip: f32,
    pub n_radiation_lengths: f32,
    pub n_interaction_lengths: f32,
}

/// Description of a sub-detector, filled in by the caller before registration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubDetectorParameters {
    pub sub_detector_name: InputValue<String>,
    pub sub_detector_type: InputValue<SubDetectorType>,
    pub inner_r_coordinate: InputValue<f32>,
    pub inner_z_coordinate: InputValue<f32>,
    pub inner_phi_coordinate: InputValue<f32>,
    pub inner_symmetry_order: InputValue<u32>,
    pub outer_r_coordinate: InputValue<f32>,
    pub outer_z_coordinate: InputValue<f32>,
    pub outer_phi_coordinate: InputValue<f32>,
    pub outer_symmetry_order: InputValue<u32>,
    pub is_mirrored_in_z: InputValue<bool>,
    pub n_layers: InputValue<u32>,
    /// One entry per layer; must match `n_layers`.
    pub layer_parameters: Vec<LayerParameters>,
}

impl SubDetectorParameters {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.sub_detector_name.set(name.into());
        self
    }

    pub fn with_type(mut self, sub_detector_type: SubDetectorType) -> Self {
        self.sub_detector_type.set(sub_detector_type);
        self
    }

    /// Inner boundary: r, z, phi offset and polygon symmetry order (0 = cylinder).
    pub fn with_inner_boundary(mut self, r: f32, z: f32, phi: f32, symmetry_order: u32) -> Self {
        self.inner_r_coordinate.set(r);
        self.inner_z_coordinate.set(z);
        self.inner_phi_coordinate.set(phi);
        self.inner_symmetry_order.set(symmetry_order);
        self
    }

    /// Outer boundary: r, z, phi offset and polygon symmetry order (0 = cylinder).
    pub fn with_outer_boundary(mut self, r: f32, z: f32, phi: f32, symmetry_order: u32) -> Self {
        self.outer_r_coordinate.set(r);
        self.outer_z_coordinate.set(z);
        self.outer_phi_coordinate.set(phi);
        self.outer_symmetry_order.set(symmetry_order);
        self
    }

    pub fn with_is_mirrored_in_z(mut self, is_mirrored_in_z: bool) -> Self {
        self.is_mirrored_in_z.set(is_mirrored_in_z);
        self
    }

    /// Set the layer list and the matching layer count.
    pub fn with_layers(mut self, layers: Vec<LayerParameters>) -> Self {
        self.n_layers.set(layers.len() as u32);
        self.layer_parameters = layers;
        self
    }
}

/// A named, typed detector component.
#[derive(Debug, PartialEq)]
pub struct SubDetector {
    name: String,
    sub_detector_type: SubDetectorType,
    inner_r_coordinate: f32,
    inner_z_coordinate: f32,
    inner_phi_coordinate: f32,
    inner_symmetry_order: u32,
    outer_r_coordinate: f32,
    outer_z_coordinate: f32,
    outer_phi_coordinate: f32,
    outer_symmetry_order: u32,
    is_mirrored_in_z: bool,
    layers: Vec<LayerParameters>,
}

impl SubDetector {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sub_detector_type(&self) -> SubDetectorType {
        self.sub_detector_type
    }

    pub fn inner_r_coordinate(&self) -> f32 {
        self.inner_r_coordinate
    }

    pub fn inner_z_coordinate(&self) -> f32 {
        self.inner_z_coordinate
    }

    pub fn inner_phi_coordinate(&self) -> f32 {
        self.inner_phi_coordinate
    }

    pub fn inner_symmetry_order(&self) -> u32 {
        self.inner_symmetry_order
    }

    pub fn outer_r_coordinate(&self) -> f32 {
        self.outer_r_coordinate
    }

    pub fn outer_z_coordinate(&self) -> f32 {
        self.outer_z_coordinate
    }

    pub fn outer_phi_coordinate(&self) -> f32 {
        self.outer_phi_coordinate
    }

    pub fn outer_symmetry_order(&self) -> u32 {
        self.outer_symmetry_order
    }

    pub fn is_mirrored_in_z(&self) -> bool {
        self.is_mirrored_in_z
    }

    pub fn n_layers(&self) -> u32 {
        self.layers.len() as u32
    }

    pub fn layers(&self) -> &[LayerParameters] {
        &self.layers
    }
}

impl FromParameters<SubDetectorParameters> for SubDetector {
    fn from_parameters(parameters: &SubDetectorParameters) -> StatusResult<Self> {
        let n_layers = parameters.n_layers.get()?;
        if n_layers as usize != parameters.layer_parameters.len() {
            return Err(StatusCode::InvalidParameter);
        }

        Ok(Self {
            name: parameters.sub_detector_name.get()?,
            sub_detector_type: parameters.sub_detector_type.get()?,
            inner_r_coordinate: parameters.inner_r_coordinate.get()?,
            inner_z_coordinate: parameters.inner_z_coordinate.get()?,
            inner_phi_coordinate: parameters.inner_phi_coordinate.get()?,
            inner_symmetry_order: parameters.inner_symmetry_order.get()?,
            outer_r_coordinate: parameters.outer_r_coordinate.get()?,
            outer_z_coordinate: parameters.outer_z_coordinate.get()?,
            outer_phi_coordinate: parameters.outer_phi_coordinate.get()?,
            outer_symmetry_order: parameters.outer_symmetry_order.get()?,
            is_mirrored_in_z: parameters.is_mirrored_in_z.get()?,
            layers: parameters.layer_parameters.clone(),
        })
    }
}

pub type SubDetectorFactory = DefaultObjectFactory<SubDetectorParameters, SubDetector>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::ObjectFactory;
    use crate::test_helpers::test_sub_detector_parameters;

    #[test]
    fn builds_from_complete_parameters() {
        let factory = SubDetectorFactory::new();
        let sub_detector = factory
            .create(&test_sub_detector_parameters("HCalBarrel", SubDetectorType::HcalBarrel, 4))
            .expect("valid sub detector");
        assert_eq!(sub_detector.name(), "HCalBarrel");
        assert_eq!(sub_detector.sub_detector_type(), SubDetectorType::HcalBarrel);
        assert_eq!(sub_detector.n_layers(), 4);
        assert!(sub_detector.is_mirrored_in_z());
        assert!(sub_detector.layers()[1].closest_distance_to_ip > sub_detector.layers()[0].closest_distance_to_ip);
    }

    #[test]
    fn layer_count_mismatch_is_invalid() {
        let mut parameters = test_sub_detector_parameters("Yoke", SubDetectorType::MuonBarrel, 2);
        parameters.n_layers.set(3);
        assert_eq!(
            SubDetector::from_parameters(&parameters),
            Err(StatusCode::InvalidParameter)
        );
    }

    #[test]
    fn missing_name_is_not_initialized() {
        let mut parameters = test_sub_detector_parameters("Coil", SubDetectorType::Coil, 0);
        parameters.sub_detector_name = InputValue::default();
        assert_eq!(
            SubDetector::from_parameters(&parameters),
            Err(StatusCode::NotInitialized)
        );
    }
}
