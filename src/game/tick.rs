//! Simulation Tick
//!
//! Advances the local player's view of the world by one frame. Only the
//! local player and the NPCs on its map are simulated; remote players
//! change only when their snapshots arrive, apart from their local hit
//! markers which fade every tick.

use crate::core::vec2::Vec2;
use crate::game::combat::melee_attack;
use crate::game::effect;
use crate::game::events::{GameEvent, GameEventData};
use crate::game::input::InputFrame;
use crate::game::map::MapBounds;
use crate::game::movement::{cross_map_edge, move_player};
use crate::game::world::WorldState;

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Tick number that was simulated
    pub tick: u64,
    /// Events generated this tick
    pub events: Vec<GameEvent>,
    /// Whether an attack this tick hit any NPC
    pub npc_hit: bool,
}

/// Configuration for the simulation.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Map width
    pub map_width: f32,
    /// Map height
    pub map_height: f32,
    /// Player displacement per held key per tick
    pub player_speed: f32,
    /// Ticks between an NPC's death and its replacement
    pub respawn_delay_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            map_width: 800.0,
            map_height: 600.0,
            player_speed: 5.0,
            respawn_delay_ticks: 600, // 10 seconds at 60 Hz
        }
    }
}

impl SimConfig {
    /// Playable bounds.
    pub fn bounds(&self) -> MapBounds {
        MapBounds::new(self.map_width, self.map_height)
    }
}

/// A scheduled NPC replacement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RespawnRequest {
    /// Tick at or after which the NPC returns
    pub due_tick: u64,
    /// Map of the roster
    pub map_index: usize,
    /// Roster slot being refilled
    pub slot: usize,
    /// Where the replacement appears
    pub spawn: Vec2,
}

/// Tick driver. Owns the tick counter and pending NPC respawns.
#[derive(Debug, Default)]
pub struct Simulation {
    /// Configuration
    pub config: SimConfig,
    tick: u64,
    respawns: Vec<RespawnRequest>,
}

impl Simulation {
    /// Create a simulation at tick 0.
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            tick: 0,
            respawns: Vec::new(),
        }
    }

    /// Number of ticks simulated so far.
    #[inline]
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Pending respawn requests.
    pub fn pending_respawns(&self) -> &[RespawnRequest] {
        &self.respawns
    }

    /// Run one simulation tick for local player `local`.
    ///
    /// Order: movement, timers, map crossing, death, remote hit markers,
    /// dead NPC sweep on every map, NPCs on the local map, due respawns on
    /// every map, then the attack.
    pub fn tick(&mut self, world: &mut WorldState, local: &str, input: InputFrame) -> TickResult {
        self.tick += 1;
        let mut data = Vec::new();
        let mut npc_hit = false;

        if world.players.contains_key(local) {
            self.update_local_player(world, local, input, &mut data);
        }
        fade_remote_effects(world, local);
        self.sweep_dead_npcs(world, &mut data);
        if world.players.contains_key(local) {
            self.update_npcs(world, local, &mut data);
        }
        self.process_respawns(world, &mut data);
        if input.attack_pressed() {
            npc_hit = melee_attack(world, local, &mut data);
        }

        TickResult {
            tick: self.tick,
            events: data.into_iter().map(|d| GameEvent::new(self.tick, d)).collect(),
            npc_hit,
        }
    }

    fn update_local_player(
        &self,
        world: &mut WorldState,
        local: &str,
        input: InputFrame,
        events: &mut Vec<GameEventData>,
    ) {
        let bounds = self.config.bounds();
        let speed = self.config.player_speed;

        let mut moving = false;
        for delta in input.displacements(speed) {
            move_player(world, local, delta, &bounds, events);
            moving = true;
        }

        let map_count = world.map_count();
        let Some(player) = world.player_mut(local) else {
            return;
        };
        player.moving = moving;
        player.update_timers();

        if let Some(event) = cross_map_edge(player, map_count, &bounds, speed) {
            events.push(event);
        }

        if player.is_dead() {
            let spawn = bounds.spawn_point();
            player.respawn(spawn);
            events.push(GameEventData::PlayerRespawned {
                player: player.name.clone(),
                position: spawn,
            });
        }
    }

    /// Remove dead NPCs from every roster and schedule their replacements.
    fn sweep_dead_npcs(&mut self, world: &mut WorldState, events: &mut Vec<GameEventData>) {
        for (map_index, roster) in world.npcs.iter_mut().enumerate() {
            let mut i = 0;
            while i < roster.len() {
                if roster[i].is_dead() {
                    let npc = roster.remove(i);
                    self.schedule_respawn(map_index, npc.slot, npc.spawn, events);
                } else {
                    i += 1;
                }
            }
        }
    }

    /// Let the NPCs on the local player's map chase and strike.
    fn update_npcs(&mut self, world: &mut WorldState, local: &str, events: &mut Vec<GameEventData>) {
        let Some(player) = world.players.get_mut(local) else {
            return;
        };
        let map_index = player.map_index;

        for npc in world.npcs[map_index].iter_mut() {
            npc.pursue(player.position);
            if let Some(damage) = npc.strike(player) {
                events.push(GameEventData::NpcStruck {
                    map_index,
                    slot: npc.slot,
                    victim: player.name.clone(),
                    damage,
                });
            }
        }
    }

    fn schedule_respawn(&mut self, map_index: usize, slot: usize, spawn: Vec2, events: &mut Vec<GameEventData>) {
        let pending = self
            .respawns
            .iter()
            .any(|r| r.map_index == map_index && r.slot == slot);
        if pending {
            return;
        }

        let due_tick = self.tick + self.config.respawn_delay_ticks;
        self.respawns.push(RespawnRequest { due_tick, map_index, slot, spawn });
        events.push(GameEventData::NpcDied { map_index, slot, respawn_tick: due_tick });
    }

    fn process_respawns(&mut self, world: &mut WorldState, events: &mut Vec<GameEventData>) {
        let now = self.tick;
        let (due, waiting): (Vec<_>, Vec<_>) = self.respawns.drain(..).partition(|r| now >= r.due_tick);
        self.respawns = waiting;

        for request in due {
            world.spawn_npc(request.map_index, request.spawn, request.slot);
            events.push(GameEventData::NpcRespawned {
                map_index: request.map_index,
                slot: request.slot,
                position: request.spawn,
            });
        }
    }
}

/// Hit markers on remote players. The local player's marker fades with its
/// other timers.
fn fade_remote_effects(world: &mut WorldState, local: &str) {
    for player in world.players.values_mut() {
        if player.name != local {
            effect::decay(&mut player.hit_effect);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
