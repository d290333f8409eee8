//! Pseudolayer index: hits grouped by depth coordinate.
//!
//! [`OrderedCaloHitList`] maps each pseudolayer (ascending) to the set of hit
//! entities assigned to it. It holds `Entity` handles only: hits are owned by the
//! host `World`, and dropping or resetting the index frees nothing but the
//! per-layer sets.
//!
//! Bulk operations are not atomic. Bulk adds stop at the first failure and keep
//! what was inserted before it; bulk removes skip hits that are not present.

use std::collections::{BTreeMap, HashSet};

use bevy_ecs::prelude::Entity;
use tracing::{debug, error};

use crate::calo_hit::CaloHit;
use crate::status::{StatusCode, StatusResult};

/// Unordered, duplicate-free set of hit handles.
pub type CaloHitList = HashSet<Entity>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedCaloHitList {
    /// Never contains an empty set.
    layers: BTreeMap<u32, CaloHitList>,
}

impl OrderedCaloHitList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `hit` into `pseudo_layer`, creating the layer if needed.
    ///
    /// Fails `AlreadyPresent` if the hit is already in that layer.
    pub fn add(&mut self, hit: Entity, pseudo_layer: u32) -> StatusResult<()> {
        if self.layers.entry(pseudo_layer).or_default().insert(hit) {
            Ok(())
        } else {
            Err(StatusCode::AlreadyPresent)
        }
    }

    /// Remove `hit` from `pseudo_layer`; the layer goes away once it is empty.
    pub fn remove(&mut self, hit: Entity, pseudo_layer: u32) -> StatusResult<()> {
        let hits = self
            .layers
            .get_mut(&pseudo_layer)
            .ok_or(StatusCode::NotFound)?;
        if !hits.remove(&hit) {
            return Err(StatusCode::NotFound);
        }
        if hits.is_empty() {
            self.layers.remove(&pseudo_layer);
        }
        Ok(())
    }

    /// Add each hit under its own pseudolayer. Stops at the first failure.
    pub fn add_hits<'a, I>(&mut self, hits: I) -> StatusResult<()>
    where
        I: IntoIterator<Item = (Entity, &'a CaloHit)>,
    {
        for (entity, hit) in hits {
            self.add(entity, hit.pseudo_layer())?;
        }
        Ok(())
    }

    /// Remove each hit from its own pseudolayer, skipping hits that are not indexed.
    pub fn remove_hits<'a, I>(&mut self, hits: I) -> StatusResult<()>
    where
        I: IntoIterator<Item = (Entity, &'a CaloHit)>,
    {
        for (entity, hit) in hits {
            tolerate_not_found(self.remove(entity, hit.pseudo_layer()))?;
        }
        Ok(())
    }

    /// Add every (layer, hit) of `other`. Stops at the first failure.
    pub fn add_list(&mut self, other: &OrderedCaloHitList) -> StatusResult<()> {
        for (pseudo_layer, hits) in other.iter() {
            for hit in hits {
                self.add(*hit, pseudo_layer)?;
            }
        }
        Ok(())
    }

    /// Remove every (layer, hit) of `other`, skipping pairs that are not indexed here.
    pub fn remove_list(&mut self, other: &OrderedCaloHitList) -> StatusResult<()> {
        for (pseudo_layer, hits) in other.iter() {
            for hit in hits {
                tolerate_not_found(self.remove(*hit, pseudo_layer))?;
            }
        }
        Ok(())
    }

    /// Replace the contents with those of `other`.
    pub fn assign_from(&mut self, other: &OrderedCaloHitList) -> StatusResult<()> {
        if !self.is_empty() {
            self.reset()?;
        }
        self.add_list(other)
    }

    pub fn calo_hits_in_pseudo_layer(&self, pseudo_layer: u32) -> StatusResult<&CaloHitList> {
        self.layers.get(&pseudo_layer).ok_or(StatusCode::NotFound)
    }

    /// Number of hits in `pseudo_layer`; zero for a layer that is not present.
    pub fn n_calo_hits_in_pseudo_layer(&self, pseudo_layer: u32) -> usize {
        self.layers.get(&pseudo_layer).map_or(0, HashSet::len)
    }

    /// Drop every layer set. Referenced hits are untouched.
    pub fn reset(&mut self) -> StatusResult<()> {
        self.layers.clear();
        if !self.layers.is_empty() {
            error!(n_layers = self.layers.len(), "pseudolayer index not empty after reset");
            return Err(StatusCode::Failure);
        }
        debug!("pseudolayer index reset");
        Ok(())
    }

    /// All indexed hits across every layer.
    pub fn calo_hit_list(&self) -> CaloHitList {
        self.layers.values().flatten().copied().collect()
    }

    pub fn contains(&self, hit: Entity, pseudo_layer: u32) -> bool {
        self.layers
            .get(&pseudo_layer)
            .is_some_and(|hits| hits.contains(&hit))
    }

    /// Layers in ascending order with their hits.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &CaloHitList)> {
        self.layers.iter().map(|(pseudo_layer, hits)| (*pseudo_layer, hits))
    }

    /// Innermost populated pseudolayer.
    pub fn inner_pseudo_layer(&self) -> Option<u32> {
        self.layers.keys().next().copied()
    }

    /// Outermost populated pseudolayer.
    pub fn outer_pseudo_layer(&self) -> Option<u32> {
        self.layers.keys().next_back().copied()
    }

    /// Number of populated layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

fn tolerate_not_found(result: StatusResult<()>) -> StatusResult<()> {
    match result {
        Err(StatusCode::NotFound) => Ok(()),
        other => other,
    }
}
