//! Ember rendering adapter.
//!
//! Keeps one [`EmberNode`] entity per live ember in the controller's pool.
//! Nodes whose ember left the pool (expired, or cleared by `stop`) are
//! despawned; new pool entries get a node.

use bevy_ecs::prelude::*;
use rustc_hash::FxHashSet;

use crate::components::ember::EmberNode;
use crate::resources::emberpool::EmberId;
use crate::resources::hearth::HearthFire;

/// Mirror the ember pool onto `EmberNode` entities.
pub fn sync_ember_nodes(
    hearth: Res<HearthFire>,
    nodes: Query<(Entity, &EmberNode)>,
    mut commands: Commands,
) {
    let pool = hearth.pool();
    let mut shown: FxHashSet<EmberId> = FxHashSet::default();

    for (entity, node) in nodes.iter() {
        if pool.contains(node.id()) {
            shown.insert(node.id());
        } else {
            // try_despawn: the node may already be gone.
            commands.entity(entity).try_despawn();
        }
    }

    for ember in pool.iter() {
        if !shown.contains(&ember.id) {
            commands.spawn(EmberNode::new(*ember));
        }
    }
}
