//! Detector geometry: sub-detector and gap descriptors plus the registry that owns them.

pub mod gap;
pub mod registry;
pub mod sub_detector;

pub use gap::{
    BoxGap, BoxGapFactory, BoxGapParameters, ConcentricGap, ConcentricGapFactory,
    ConcentricGapParameters, DetectorGap, LineGap, LineGapFactory, LineGapParameters,
};
pub use registry::{default_hit_type_granularities, GeometryRegistry};
pub use sub_detector::{LayerParameters, SubDetector, SubDetectorFactory, SubDetectorParameters};
