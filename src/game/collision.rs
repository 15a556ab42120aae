//! Collision Queries
//!
//! Rectangle queries against map objects, NPC rosters and players.
//! Results come back in roster / registry order.

use crate::core::rect::{overlaps, Rect};
use crate::game::npc::Npc;
use crate::game::object::GameObject;
use crate::game::world::WorldState;

/// Check if `rect` overlaps any non-collectable object.
pub fn is_blocked(objects: &[GameObject], rect: &Rect) -> bool {
    objects
        .iter()
        .any(|obj| !obj.collectable && overlaps(rect, &obj.rect()))
}

/// Indices of pickups touched by `rect`, ascending.
pub fn touched_pickups(objects: &[GameObject], rect: &Rect) -> Vec<usize> {
    objects
        .iter()
        .enumerate()
        .filter(|(_, obj)| obj.is_pickup() && overlaps(rect, &obj.rect()))
        .map(|(i, _)| i)
        .collect()
}

/// Roster indices of live NPCs overlapping `rect`.
pub fn npcs_hit(npcs: &[Npc], rect: &Rect) -> Vec<usize> {
    npcs.iter()
        .enumerate()
        .filter(|(_, npc)| !npc.is_dead() && overlaps(rect, &npc.rect()))
        .map(|(i, _)| i)
        .collect()
}

/// Names of players on `map_index` overlapping `rect`, except `exclude`.
pub fn players_hit(world: &WorldState, map_index: usize, rect: &Rect, exclude: &str) -> Vec<String> {
    world
        .players_on(map_index)
        .filter(|p| p.name != exclude && overlaps(rect, &p.rect()))
        .map(|p| p.name.clone())
        .collect()
}
