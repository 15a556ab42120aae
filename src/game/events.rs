//! Game Events
//!
//! Events produced while simulating a tick. They are returned to the
//! caller for UI feedback and logging; nothing in the simulation reads them.

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;

/// Game event data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEventData {
    /// Player picked up an object
    ItemCollected {
        /// Collector
        player: String,
        /// Inventory name of the item
        item: String,
        /// Map the item was on
        map_index: usize,
    },

    /// Quest goal reached and reward paid out
    QuestCompleted {
        /// Quest owner
        player: String,
        /// Quest text
        description: String,
        /// Coins paid
        reward: u32,
    },

    /// Player advanced one level
    LevelUp {
        /// Who leveled
        player: String,
        /// New level
        level: u32,
    },

    /// Player walked off a map edge onto a neighboring map
    MapChanged {
        /// Traveler
        player: String,
        /// Map left
        from: usize,
        /// Map entered
        to: usize,
    },

    /// Player hit another player with a melee attack
    PlayerHit {
        /// Swinging player
        attacker: String,
        /// Player hit
        victim: String,
        /// Damage dealt
        damage: u32,
    },

    /// Player hit an NPC with a melee attack
    NpcHit {
        /// Swinging player
        attacker: String,
        /// Map of the NPC
        map_index: usize,
        /// Roster slot of the NPC
        slot: usize,
        /// Damage dealt
        damage: u32,
    },

    /// NPC hit a player on contact
    NpcStruck {
        /// Map of the NPC
        map_index: usize,
        /// Roster slot of the NPC
        slot: usize,
        /// Player hit
        victim: String,
        /// Damage dealt
        damage: u32,
    },

    /// Dead NPC removed from its roster, replacement scheduled
    NpcDied {
        /// Map of the roster
        map_index: usize,
        /// Slot left empty
        slot: usize,
        /// Tick the replacement is due
        respawn_tick: u64,
    },

    /// Replacement NPC entered its roster
    NpcRespawned {
        /// Map of the roster
        map_index: usize,
        /// Slot refilled
        slot: usize,
        /// Spawn position
        position: Vec2,
    },

    /// Player health reached zero and was reset at the spawn point
    PlayerRespawned {
        /// Who died
        player: String,
        /// Spawn position
        position: Vec2,
    },
}

/// A game event stamped with the tick that produced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when event occurred
    pub tick: u64,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(tick: u64, data: GameEventData) -> Self {
        Self { tick, data }
    }

    /// Whether this event should be surfaced at info level.
    pub fn is_notable(&self) -> bool {
        matches!(
            self.data,
            GameEventData::QuestCompleted { .. }
                | GameEventData::LevelUp { .. }
                | GameEventData::MapChanged { .. }
                | GameEventData::NpcDied { .. }
                | GameEventData::NpcRespawned { .. }
                | GameEventData::PlayerRespawned { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notable_events() {
        let level = GameEvent::new(3, GameEventData::LevelUp { player: "ada".into(), level: 2 });
        let pickup = GameEvent::new(
            3,
            GameEventData::ItemCollected { player: "ada".into(), item: "coin".into(), map_index: 0 },
        );

        assert!(level.is_notable());
        assert!(!pickup.is_notable());
    }

    #[test]
    fn test_event_json() {
        let event = GameEvent::new(
            42,
            GameEventData::NpcDied { map_index: 1, slot: 0, respawn_tick: 642 },
        );
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("NpcDied"));

        let parsed: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }
}
