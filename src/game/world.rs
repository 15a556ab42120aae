//! World State
//!
//! Maps, live NPC rosters and the player registry.
//! Uses BTreeMap for deterministic iteration order.

use std::collections::BTreeMap;

use crate::core::vec2::Vec2;
use crate::game::map::{StaticMap, WorldLayout};
use crate::game::npc::Npc;
use crate::game::object::GameObject;
use crate::game::player::Player;
use crate::network::protocol::Snapshot;

/// Everything the simulation and the relay share.
///
/// `maps` and `npcs` are parallel: `npcs[i]` is the roster of `maps[i]`.
/// Indexing with an out-of-range map index panics; map indices of the
/// local player are kept valid by the movement rules.
#[derive(Clone, Debug)]
pub struct WorldState {
    /// Maps in travel order
    pub maps: Vec<StaticMap>,

    /// Live NPCs per map
    pub npcs: Vec<Vec<Npc>>,

    /// Player registry keyed by name
    pub players: BTreeMap<String, Player>,
}

impl WorldState {
    /// Build a world from a layout, spawning every NPC of the spawn tables.
    pub fn new(layout: WorldLayout) -> Self {
        let WorldLayout { maps, npc_spawns } = layout;
        let mut npcs: Vec<Vec<Npc>> = npc_spawns
            .into_iter()
            .map(|spawns| {
                spawns
                    .into_iter()
                    .enumerate()
                    .map(|(slot, spawn)| Npc::new(spawn, slot))
                    .collect()
            })
            .collect();
        npcs.resize_with(maps.len(), Vec::new);

        Self {
            maps,
            npcs,
            players: BTreeMap::new(),
        }
    }

    /// The default four-map world.
    pub fn default_world() -> Self {
        Self::new(WorldLayout::standard())
    }

    /// Number of maps.
    #[inline]
    pub fn map_count(&self) -> usize {
        self.maps.len()
    }

    /// Objects on a map.
    pub fn objects_on(&self, map_index: usize) -> &[GameObject] {
        &self.maps[map_index].objects
    }

    /// Live NPCs on a map.
    pub fn npcs_on(&self, map_index: usize) -> &[Npc] {
        &self.npcs[map_index]
    }

    /// Players whose map index is `map_index`.
    pub fn players_on(&self, map_index: usize) -> impl Iterator<Item = &Player> + '_ {
        self.players.values().filter(move |p| p.map_index == map_index)
    }

    /// Get a player by name.
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.get(name)
    }

    /// Get a mutable player by name.
    pub fn player_mut(&mut self, name: &str) -> Option<&mut Player> {
        self.players.get_mut(name)
    }

    /// Insert a player, replacing any entry with the same name.
    pub fn insert_player(&mut self, player: Player) {
        self.players.insert(player.name.clone(), player);
    }

    /// Insert-or-update from a snapshot. Returns true if the entry is new.
    pub fn upsert_player(&mut self, snapshot: &Snapshot) -> bool {
        match self.players.get_mut(&snapshot.name) {
            Some(existing) => {
                snapshot.apply_to(existing);
                false
            }
            None => {
                self.insert_player(snapshot.to_player());
                true
            }
        }
    }

    /// Merge a snapshot unless it describes the local player.
    ///
    /// Returns whether the registry was touched.
    pub fn merge_snapshot(&mut self, local_name: &str, snapshot: &Snapshot) -> bool {
        if snapshot.name == local_name {
            return false;
        }
        self.upsert_player(snapshot);
        true
    }

    /// Remove a player from the registry.
    pub fn remove_player(&mut self, name: &str) -> Option<Player> {
        self.players.remove(name)
    }

    /// Remove an object from a map, returning it.
    pub fn remove_object(&mut self, map_index: usize, object_index: usize) -> GameObject {
        self.maps[map_index].objects.remove(object_index)
    }

    /// Add a fresh NPC to a map's roster.
    pub fn spawn_npc(&mut self, map_index: usize, spawn: Vec2, slot: usize) {
        self.npcs[map_index].push(Npc::new(spawn, slot));
    }
}

impl Default for WorldState {
    fn default() -> Self {
        Self::default_world()
    }
}
