//! Shared tags and the progressively populated parameter slot.

use serde::{Deserialize, Serialize};

use crate::status::{StatusCode, StatusResult};

/// Kind of detector readout that produced a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitType {
    Tracker,
    Ecal,
    Hcal,
    Muon,
    TpcViewU,
    TpcViewV,
    TpcViewW,
    Tpc3d,
    /// Experiment-specific hit type; must be given a granularity explicitly.
    Other(u32),
}

/// Detector region; selects axes and trig ratios in cell geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitRegion {
    Barrel,
    Endcap,
}

/// Cell shape model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellGeometry {
    /// Flat cell: size0/size1 are lengths.
    Rectangular,
    /// Projective cell: size0 is a pseudorapidity width, size1 an azimuthal width.
    Pointing,
    /// Unsupported shape tag. Hits using it cannot be constructed.
    Other(u32),
}

/// Coarseness classification used by downstream clustering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    VeryFine,
    Fine,
    Coarse,
    VeryCoarse,
}

/// Type tag of a sub-detector. Several sub-detectors may share one tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubDetectorType {
    InnerTracker,
    EcalBarrel,
    EcalEndcap,
    HcalBarrel,
    HcalEndcap,
    Coil,
    MuonBarrel,
    MuonEndcap,
    Other(u32),
}

/// Readout context of a line gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineGapType {
    TpcWireGapViewU,
    TpcWireGapViewV,
    TpcWireGapViewW,
    TpcDriftGap,
}

/// Opaque back-reference to the host's source record for a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ParentAddress(pub u64);

/// A parameter slot that starts unset and is filled in by the caller.
///
/// Reading an unset slot fails with [`StatusCode::NotInitialized`], which is how
/// construction reports a descriptor the caller forgot to complete.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputValue<T>(Option<T>);

impl<T> InputValue<T> {
    pub fn new(value: T) -> Self {
        Self(Some(value))
    }

    pub fn set(&mut self, value: T) {
        self.0 = Some(value);
    }

    pub fn is_initialized(&self) -> bool {
        self.0.is_some()
    }

    /// Borrow the value, or fail `NotInitialized`.
    pub fn get_ref(&self) -> StatusResult<&T> {
        self.0.as_ref().ok_or(StatusCode::NotInitialized)
    }
}

impl<T: Clone> InputValue<T> {
    /// Copy the value out, or fail `NotInitialized`.
    pub fn get(&self) -> StatusResult<T> {
        self.get_ref().cloned()
    }
}

impl<T> Default for InputValue<T> {
    fn default() -> Self {
        Self(None)
    }
}

impl<T> From<T> for InputValue<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}
