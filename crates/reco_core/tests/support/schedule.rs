use bevy_ecs::prelude::World;
use bevy_ecs::schedule::Schedule;
use reco_core::systems::{reset_event_pseudo_layers_system, sync_event_pseudo_layers_system};

/// Owns the sync and reset schedules so tests can step a world between edits.
pub struct SyncRunner {
    sync: Schedule,
    reset: Schedule,
}

impl Default for SyncRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncRunner {
    pub fn new() -> Self {
        let mut sync = Schedule::default();
        sync.add_systems(sync_event_pseudo_layers_system);
        let mut reset = Schedule::default();
        reset.add_systems(reset_event_pseudo_layers_system);
        Self { sync, reset }
    }

    /// Run the sync system once.
    pub fn sync(&mut self, world: &mut World) {
        self.sync.run(world);
    }

    /// Run the between-events reset once.
    pub fn reset(&mut self, world: &mut World) {
        self.reset.run(world);
    }
}
