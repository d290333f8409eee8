pub mod calo_hit;
pub mod factory;
pub mod geometry;
pub mod pseudo_layer;
pub mod status;
pub mod systems;
pub mod types;
pub mod vector;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
