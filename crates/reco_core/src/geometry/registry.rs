//! Geometry registry: the single owner of sub-detectors, gaps and the
//! hit-type granularity policy for one detector configuration.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use bevy_ecs::prelude::Resource;
use tracing::{debug, warn};

use crate::factory::ObjectFactory;
use crate::geometry::gap::DetectorGap;
use crate::geometry::sub_detector::{SubDetector, SubDetectorParameters};
use crate::status::{StatusCode, StatusResult};
use crate::types::{Granularity, HitType, SubDetectorType};

/// Built-in granularity for the core hit types.
///
/// Applied once when a registry is created; hit types outside this set must be
/// registered with [`GeometryRegistry::set_hit_type_granularity`].
pub fn default_hit_type_granularities() -> HashMap<HitType, Granularity> {
    HashMap::from([
        (HitType::Tracker, Granularity::VeryFine),
        (HitType::Ecal, Granularity::Fine),
        (HitType::Hcal, Granularity::Coarse),
        (HitType::Muon, Granularity::VeryCoarse),
        (HitType::TpcViewU, Granularity::VeryFine),
        (HitType::TpcViewV, Granularity::VeryFine),
        (HitType::TpcViewW, Granularity::VeryFine),
        (HitType::Tpc3d, Granularity::VeryFine),
    ])
}

#[derive(Debug, Resource)]
pub struct GeometryRegistry {
    /// Owned sub-detectors keyed by their unique name.
    sub_detectors: HashMap<String, SubDetector>,
    /// Type tag → names of every sub-detector with that tag.
    sub_detector_names_by_type: HashMap<SubDetectorType, Vec<String>>,
    detector_gaps: Vec<DetectorGap>,
    hit_type_granularities: HashMap<HitType, Granularity>,
}

impl Default for GeometryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryRegistry {
    /// Empty registry with the default granularity policy.
    pub fn new() -> Self {
        Self {
            sub_detectors: HashMap::new(),
            sub_detector_names_by_type: HashMap::new(),
            detector_gaps: Vec::new(),
            hit_type_granularities: default_hit_type_granularities(),
        }
    }

    /// Build a sub-detector with `factory` and take ownership of it.
    ///
    /// Factory failures are returned unchanged. A name that is already registered
    /// fails with `Failure`; the new instance is dropped and the first one kept.
    pub fn create_sub_detector<F>(
        &mut self,
        parameters: &SubDetectorParameters,
        factory: &F,
    ) -> StatusResult<()>
    where
        F: ObjectFactory<SubDetectorParameters, Object = SubDetector>,
    {
        let sub_detector = factory.create(parameters).map_err(|status| {
            warn!(%status, "failed to create sub detector");
            status
        })?;

        match self.sub_detectors.entry(sub_detector.name().to_string()) {
            Entry::Occupied(entry) => {
                warn!(name = entry.key().as_str(), "sub detector name already registered");
                Err(StatusCode::Failure)
            }
            Entry::Vacant(entry) => {
                debug!(
                    name = entry.key().as_str(),
                    sub_detector_type = ?sub_detector.sub_detector_type(),
                    "registered sub detector"
                );
                self.sub_detector_names_by_type
                    .entry(sub_detector.sub_detector_type())
                    .or_default()
                    .push(entry.key().clone());
                entry.insert(sub_detector);
                Ok(())
            }
        }
    }

    /// Build a gap of any shape with `factory` and take ownership of it.
    pub fn create_gap<P, F>(&mut self, parameters: &P, factory: &F) -> StatusResult<()>
    where
        F: ObjectFactory<P>,
        F::Object: Into<DetectorGap>,
    {
        let gap = factory.create(parameters).map_err(|status| {
            warn!(%status, "failed to create detector gap");
            status
        })?;
        self.detector_gaps.push(gap.into());
        Ok(())
    }

    pub fn sub_detector(&self, name: &str) -> StatusResult<&SubDetector> {
        self.sub_detectors.get(name).ok_or(StatusCode::NotFound)
    }

    /// The single sub-detector of `sub_detector_type`.
    ///
    /// Fails `NotFound` if none is registered and `OutOfRange` if the type is
    /// shared by more than one sub-detector.
    pub fn sub_detector_by_type(&self, sub_detector_type: SubDetectorType) -> StatusResult<&SubDetector> {
        match self
            .sub_detector_names_by_type
            .get(&sub_detector_type)
            .map(Vec::as_slice)
        {
            None | Some([]) => Err(StatusCode::NotFound),
            Some([name]) => self.sub_detector(name),
            Some(_) => Err(StatusCode::OutOfRange),
        }
    }

    pub fn sub_detectors(&self) -> impl Iterator<Item = &SubDetector> {
        self.sub_detectors.values()
    }

    pub fn n_sub_detectors(&self) -> usize {
        self.sub_detectors.len()
    }

    pub fn detector_gaps(&self) -> &[DetectorGap] {
        &self.detector_gaps
    }

    pub fn hit_type_granularity(&self, hit_type: HitType) -> StatusResult<Granularity> {
        self.hit_type_granularities
            .get(&hit_type)
            .copied()
            .ok_or_else(|| {
                warn!(?hit_type, "hit type must be registered with a granularity before use");
                StatusCode::NotFound
            })
    }

    pub fn set_hit_type_granularity(&mut self, hit_type: HitType, granularity: Granularity) {
        self.hit_type_granularities.insert(hit_type, granularity);
    }

    /// Drop every sub-detector and gap and clear the granularity policy.
    ///
    /// The policy is left empty; defaults are only present on a fresh registry.
    pub fn erase_all_content(&mut self) {
        self.sub_detectors.clear();
        self.sub_detector_names_by_type.clear();
        self.detector_gaps.clear();
        self.hit_type_granularities.clear();
        debug!("erased all geometry content");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::gap::{ConcentricGapFactory, ConcentricGapParameters, LineGapFactory, LineGapParameters};
    use crate::geometry::sub_detector::SubDetectorFactory;
    use crate::test_helpers::test_sub_detector_parameters;
    use crate::types::LineGapType;

    #[test]
    fn default_policy_covers_core_hit_types() {
        let registry = GeometryRegistry::new();
        assert_eq!(registry.hit_type_granularity(HitType::Ecal), Ok(Granularity::Fine));
        assert_eq!(registry.hit_type_granularity(HitType::Hcal), Ok(Granularity::Coarse));
        assert_eq!(registry.hit_type_granularity(HitType::Muon), Ok(Granularity::VeryCoarse));
        assert_eq!(registry.hit_type_granularity(HitType::Tpc3d), Ok(Granularity::VeryFine));
        assert_eq!(
            registry.hit_type_granularity(HitType::Other(99)),
            Err(StatusCode::NotFound)
        );
    }

    #[test]
    fn granularity_override_is_an_upsert() {
        let mut registry = GeometryRegistry::new();
        registry.set_hit_type_granularity(HitType::Ecal, Granularity::Coarse);
        registry.set_hit_type_granularity(HitType::Other(5), Granularity::Fine);
        assert_eq!(registry.hit_type_granularity(HitType::Ecal), Ok(Granularity::Coarse));
        assert_eq!(registry.hit_type_granularity(HitType::Other(5)), Ok(Granularity::Fine));
    }

    #[test]
    fn factory_failure_leaves_registry_untouched() {
        let mut registry = GeometryRegistry::new();
        let mut parameters = test_sub_detector_parameters("ECal", SubDetectorType::EcalBarrel, 2);
        parameters.n_layers.set(5);
        assert_eq!(
            registry.create_sub_detector(&parameters, &SubDetectorFactory::new()),
            Err(StatusCode::InvalidParameter)
        );
        assert_eq!(registry.n_sub_detectors(), 0);
        assert_eq!(
            registry.sub_detector_by_type(SubDetectorType::EcalBarrel).map(|_| ()),
            Err(StatusCode::NotFound)
        );
    }

    #[test]
    fn gaps_of_every_shape_share_one_collection() {
        let mut registry = GeometryRegistry::new();
        registry
            .create_gap(
                &LineGapParameters::new(LineGapType::TpcDriftGap, 0.0, 0.0, -10.0, 10.0),
                &LineGapFactory::new(),
            )
            .expect("line gap");
        assert_eq!(
            registry.create_gap(&ConcentricGapParameters::default(), &ConcentricGapFactory::new()),
            Err(StatusCode::NotInitialized)
        );
        assert_eq!(registry.detector_gaps().len(), 1);
    }

    #[test]
    fn erase_all_content_empties_policy() {
        let mut registry = GeometryRegistry::new();
        registry
            .create_sub_detector(
                &test_sub_detector_parameters("ECal", SubDetectorType::EcalBarrel, 1),
                &SubDetectorFactory::new(),
            )
            .expect("sub detector");
        registry.erase_all_content();

        assert_eq!(registry.n_sub_detectors(), 0);
        assert!(registry.detector_gaps().is_empty());
        assert_eq!(registry.sub_detector("ECal").map(|_| ()), Err(StatusCode::NotFound));
        assert_eq!(
            registry.hit_type_granularity(HitType::Ecal),
            Err(StatusCode::NotFound)
        );
    }
}
