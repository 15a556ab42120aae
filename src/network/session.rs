//! Game Session
//!
//! The local participant: owns the simulation, publishes the local player's
//! snapshot into the relay after every tick, and exposes read-only views
//! for the rendering collaborator.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::game::events::GameEvent;
use crate::game::input::InputFrame;
use crate::game::npc::Npc;
use crate::game::object::GameObject;
use crate::game::player::{Cosmetic, Player};
use crate::game::progression::Quest;
use crate::game::tick::{SimConfig, Simulation, TickResult};
use crate::game::world::WorldState;
use crate::network::protocol::Snapshot;
use crate::network::relay::{ConnectionId, Origin, RelayHub};

/// World shared between the session and the relay's connection handlers.
pub type SharedWorld = Arc<RwLock<WorldState>>;

/// Local player panel data.
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    /// Health
    pub health: u32,
    /// Coins held
    pub coins: u32,
    /// Level
    pub level: u32,
    /// Experience
    pub experience: u32,
    /// Inventory in pickup order
    pub inventory: Vec<String>,
    /// Equipped item
    pub holding_item: Option<String>,
    /// Cosmetic slots
    pub clothes: BTreeMap<String, Option<String>>,
    /// Quests
    pub quests: Vec<Quest>,
}

/// Everything needed to draw the local player's map.
#[derive(Debug, Clone)]
pub struct WorldView {
    /// Map the local player is on
    pub map_index: usize,
    /// Its display name
    pub map_name: String,
    /// Objects on that map
    pub objects: Vec<GameObject>,
    /// Live NPCs on that map
    pub npcs: Vec<Npc>,
    /// Every player on that map, local included
    pub players: Vec<Player>,
    /// Local player panel
    pub hud: Hud,
}

/// The local participant.
pub struct GameSession {
    world: SharedWorld,
    hub: Arc<RelayHub>,
    simulation: Simulation,
    local_name: String,
}

impl GameSession {
    /// Put the local player into the world at the spawn point.
    pub async fn join(
        world: SharedWorld,
        hub: Arc<RelayHub>,
        config: SimConfig,
        name: &str,
        color: [u8; 3],
    ) -> Self {
        let spawn = config.bounds().spawn_point();
        world.write().await.insert_player(Player::new(name, spawn, color));
        info!("{} joined at ({}, {})", name, spawn.x, spawn.y);

        Self {
            world,
            hub,
            simulation: Simulation::new(config),
            local_name: name.to_string(),
        }
    }

    /// Local player name.
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Shared world handle.
    pub fn world(&self) -> &SharedWorld {
        &self.world
    }

    /// Ticks simulated so far.
    pub fn current_tick(&self) -> u64 {
        self.simulation.current_tick()
    }

    /// Advance one frame and publish the result.
    pub async fn tick(&mut self, input: InputFrame) -> TickResult {
        let result = {
            let mut world = self.world.write().await;
            self.simulation.tick(&mut world, &self.local_name, input)
        };

        for event in &result.events {
            log_event(event);
        }
        self.publish().await;
        result
    }

    /// Current wire snapshot of the local player.
    pub async fn snapshot_for_replication(&self) -> Option<Snapshot> {
        let world = self.world.read().await;
        world.player(&self.local_name).map(Snapshot::from_player)
    }

    /// Push the local snapshot into the relay. Returns how many
    /// connections it was queued on.
    pub async fn publish(&self) -> usize {
        let Some(snapshot) = self.snapshot_for_replication().await else {
            return 0;
        };
        match snapshot.to_json() {
            Ok(line) => self.hub.broadcast(Origin::Local, &line).await,
            Err(e) => {
                warn!("Failed to encode local snapshot: {}", e);
                0
            }
        }
    }

    /// Merge a decoded remote snapshot. Snapshots of the local player are
    /// ignored.
    pub async fn apply_inbound_snapshot(&self, snapshot: &Snapshot) -> bool {
        self.world.write().await.merge_snapshot(&self.local_name, snapshot)
    }

    /// Drop a relay connection from the fan-out set.
    pub async fn on_peer_disconnected(&self, id: ConnectionId) -> bool {
        self.hub.remove(id).await
    }

    /// Set the local chat message.
    pub async fn say(&self, text: &str) {
        if let Some(player) = self.world.write().await.player_mut(&self.local_name) {
            player.say(text);
        }
    }

    /// Buy a cosmetic for the local player.
    pub async fn buy(&self, cosmetic: Cosmetic) -> bool {
        match self.world.write().await.player_mut(&self.local_name) {
            Some(player) => player.buy(cosmetic),
            None => false,
        }
    }

    /// Read-only view of the local player's map.
    pub async fn view(&self) -> Option<WorldView> {
        let world = self.world.read().await;
        let local = world.player(&self.local_name)?;
        let map_index = local.map_index;

        Some(WorldView {
            map_index,
            map_name: world.maps[map_index].name.clone(),
            objects: world.objects_on(map_index).to_vec(),
            npcs: world.npcs_on(map_index).iter().filter(|n| !n.is_dead()).cloned().collect(),
            players: world.players_on(map_index).cloned().collect(),
            hud: Hud {
                health: local.health,
                coins: local.coins,
                level: local.level,
                experience: local.experience,
                inventory: local.inventory.clone(),
                holding_item: local.holding_item.clone(),
                clothes: local.clothes.clone(),
                quests: local.quests.clone(),
            },
        })
    }
}

fn log_event(event: &GameEvent) {
    if event.is_notable() {
        info!(tick = event.tick, "{:?}", event.data);
    } else {
        debug!(tick = event.tick, "{:?}", event.data);
    }
}

// =============================================================================
// TESTS
// =============================================================================
