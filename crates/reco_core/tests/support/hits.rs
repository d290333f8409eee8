use bevy_ecs::prelude::{Entity, World};
use reco_core::calo_hit::CaloHit;
use reco_core::pseudo_layer::OrderedCaloHitList;
use reco_core::test_helpers::{test_calo_hit, test_calo_hit_in_layer};

/// Spawn a hit with an assigned pseudolayer into `world`.
pub fn spawn_hit_in_layer(world: &mut World, pseudo_layer: u32) -> Entity {
    world.spawn(test_calo_hit_in_layer(pseudo_layer)).id()
}

/// Spawn a hit whose pseudolayer has not been assigned yet.
pub fn spawn_unassigned_hit(world: &mut World, input_energy: f32) -> Entity {
    world.spawn(test_calo_hit(input_energy)).id()
}

/// Build an index holding `count` fresh handles in each of `layers`.
///
/// Handles are numbered from `first_index` so independent lists never share hits.
pub fn list_with_layers(first_index: u32, layers: &[u32], count: u32) -> OrderedCaloHitList {
    let mut list = OrderedCaloHitList::new();
    let mut next = first_index;
    for layer in layers {
        for _ in 0..count {
            list.add(Entity::from_raw(next), *layer)
                .expect("fresh handle cannot already be present");
            next += 1;
        }
    }
    list
}

/// All `(Entity, &CaloHit)` pairs of a world, the shape bulk index operations take.
pub fn world_hits(world: &mut World) -> Vec<(Entity, &CaloHit)> {
    let mut query = world.query::<(Entity, &CaloHit)>();
    query.iter(world).collect()
}
