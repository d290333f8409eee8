//! Event pseudolayer sync system: keeps a pseudolayer index over the `CaloHit`
//! components of a `World`.
//!
//! Hits enter the index once their pseudolayer is assigned, move when it changes,
//! and leave when the component is removed or the entity despawned.

use std::collections::HashMap;

use bevy_ecs::prelude::{Changed, Entity, Query, RemovedComponents, ResMut, Resource};
use tracing::warn;

use crate::calo_hit::{CaloHit, UNSET_PSEUDO_LAYER};
use crate::pseudo_layer::OrderedCaloHitList;
use crate::status::StatusResult;

/// Pseudolayer index for the current event, plus the layer each hit was filed under.
#[derive(Debug, Default, Resource)]
pub struct EventPseudoLayers {
    ordered_calo_hits: OrderedCaloHitList,
    /// Reverse mapping: hit entity → indexed pseudolayer (for removals).
    hit_layers: HashMap<Entity, u32>,
}

impl EventPseudoLayers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ordered_calo_hits(&self) -> &OrderedCaloHitList {
        &self.ordered_calo_hits
    }

    /// Pseudolayer `hit` is currently indexed under.
    pub fn indexed_pseudo_layer(&self, hit: Entity) -> Option<u32> {
        self.hit_layers.get(&hit).copied()
    }

    /// File `hit` under `pseudo_layer`, moving it if it was indexed elsewhere.
    pub fn index(&mut self, hit: Entity, pseudo_layer: u32) -> StatusResult<()> {
        match self.hit_layers.get(&hit).copied() {
            Some(current) if current == pseudo_layer => return Ok(()),
            Some(current) => self.ordered_calo_hits.remove(hit, current)?,
            None => {}
        }
        self.ordered_calo_hits.add(hit, pseudo_layer)?;
        self.hit_layers.insert(hit, pseudo_layer);
        Ok(())
    }

    /// Drop `hit` from the index if present.
    pub fn forget(&mut self, hit: Entity) -> StatusResult<()> {
        match self.hit_layers.remove(&hit) {
            Some(pseudo_layer) => self.ordered_calo_hits.remove(hit, pseudo_layer),
            None => Ok(()),
        }
    }

    /// Clear the index between events.
    pub fn reset(&mut self) -> StatusResult<()> {
        self.hit_layers.clear();
        self.ordered_calo_hits.reset()
    }
}

/// Updates [`EventPseudoLayers`] from added, changed and removed `CaloHit` components.
/// Only runs if the resource exists.
pub fn sync_event_pseudo_layers_system(
    event_layers: Option<ResMut<EventPseudoLayers>>,
    changed_hits: Query<(Entity, &CaloHit), Changed<CaloHit>>,
    mut removed_hits: RemovedComponents<CaloHit>,
) {
    let Some(mut event_layers) = event_layers else {
        return;
    };

    for entity in removed_hits.read() {
        if let Err(status) = event_layers.forget(entity) {
            warn!(?entity, %status, "failed to drop removed hit from pseudolayer index");
        }
    }

    for (entity, hit) in changed_hits.iter() {
        let pseudo_layer = hit.pseudo_layer();
        if pseudo_layer == UNSET_PSEUDO_LAYER {
            continue;
        }
        if let Err(status) = event_layers.index(entity, pseudo_layer) {
            warn!(?entity, pseudo_layer, %status, "failed to index hit by pseudolayer");
        }
    }
}

/// Clears the event index; schedule it between events.
pub fn reset_event_pseudo_layers_system(event_layers: Option<ResMut<EventPseudoLayers>>) {
    let Some(mut event_layers) = event_layers else {
        return;
    };
    if let Err(status) = event_layers.reset() {
        warn!(%status, "failed to reset event pseudolayer index");
    }
}
