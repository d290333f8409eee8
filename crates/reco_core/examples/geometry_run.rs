//! Register a small barrel detector, build a handful of hits and print their
//! pseudolayer ordering.
//!
//! Run with: cargo run -p reco_core --example geometry_run

use bevy_ecs::prelude::World;
use bevy_ecs::schedule::Schedule;
use reco_core::calo_hit::CaloHit;
use reco_core::geometry::{GeometryRegistry, SubDetectorFactory};
use reco_core::status::StatusResult;
use reco_core::systems::{sync_event_pseudo_layers_system, EventPseudoLayers};
use reco_core::test_helpers::{rectangular_hit_parameters, test_sub_detector_parameters};
use reco_core::types::{HitType, SubDetectorType};
use reco_core::vector::CartesianVector;

fn main() -> StatusResult<()> {
    const LAYER_PITCH_MM: f32 = 5.0;
    const N_LAYERS: u32 = 20;

    let mut registry = GeometryRegistry::new();
    let factory = SubDetectorFactory::new();
    registry.create_sub_detector(
        &test_sub_detector_parameters("ECalBarrel", SubDetectorType::EcalBarrel, N_LAYERS),
        &factory,
    )?;
    registry.create_sub_detector(
        &test_sub_detector_parameters("HCalBarrel", SubDetectorType::HcalBarrel, N_LAYERS),
        &factory,
    )?;

    let ecal = registry.sub_detector_by_type(SubDetectorType::EcalBarrel)?;
    let inner_radius = ecal.layers()[0].closest_distance_to_ip;

    let mut world = World::new();
    world.insert_resource(registry);
    world.insert_resource(EventPseudoLayers::new());

    for layer in 1..=N_LAYERS {
        let radius = inner_radius + LAYER_PITCH_MM * (layer - 1) as f32;
        let position = CartesianVector::new(0.0, radius, 10.0 * layer as f32);
        let mut hit = CaloHit::new(
            &rectangular_hit_parameters()
                .with_position(position)
                .with_expected_direction(position)
                .with_layer(layer, layer == N_LAYERS),
        )?;
        hit.set_pseudo_layer(layer)?;
        world.spawn(hit);
    }

    let mut schedule = Schedule::default();
    schedule.add_systems(sync_event_pseudo_layers_system);
    schedule.run(&mut world);

    let granularity = world
        .resource::<GeometryRegistry>()
        .hit_type_granularity(HitType::Ecal)?;
    let ordered = world.resource::<EventPseudoLayers>().ordered_calo_hits();

    println!(
        "--- Geometry run ({} sub detectors, ECal granularity {:?}) ---",
        world.resource::<GeometryRegistry>().n_sub_detectors(),
        granularity
    );
    println!("Indexed hits: {}", ordered.calo_hit_list().len());
    for (pseudo_layer, hits) in ordered.iter() {
        for entity in hits {
            if let Some(hit) = world.get::<CaloHit>(*entity) {
                println!("  pseudolayer {:>2}  {}", pseudo_layer, hit);
            }
        }
    }
    Ok(())
}
