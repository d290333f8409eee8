pub mod pseudo_layer_sync;

pub use pseudo_layer_sync::{
    reset_event_pseudo_layers_system, sync_event_pseudo_layers_system, EventPseudoLayers,
};
