//! Protocol Messages
//!
//! Wire format for the snapshot relay. One message is one complete player
//! snapshot encoded as a single JSON object on its own line.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;
use crate::game::player::Player;
use crate::game::progression::Quest;

// =============================================================================
// SNAPSHOT
// =============================================================================

/// A player's replicated state.
///
/// Field names are the wire names. Unknown fields are ignored; a missing
/// `holding_item` means nothing is equipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Identity key
    pub name: String,
    /// Anchor X
    pub x: f32,
    /// Anchor Y
    pub y: f32,
    /// Color red channel
    pub r: u8,
    /// Color green channel
    pub g: u8,
    /// Color blue channel
    pub b: u8,
    /// Chat message
    pub message: String,
    /// Remaining chat display ticks
    pub message_timer: u32,
    /// Map the player is on
    pub map_index: usize,
    /// Coins held
    pub coins: u32,
    /// Item identifiers in pickup order
    pub inventory: Vec<String>,
    /// Quest list
    pub quests: Vec<Quest>,
    /// Cosmetic slot name to item id
    pub clothes: BTreeMap<String, Option<String>>,
    /// Equipped item
    pub holding_item: Option<String>,
    /// Melee cooldown remaining
    pub attack_timer: u32,
    /// Health
    pub health: u32,
    /// Experience
    pub experience: u32,
    /// Level
    pub level: u32,
}

impl Snapshot {
    /// Project a player onto the wire format.
    pub fn from_player(player: &Player) -> Self {
        let [r, g, b] = player.color;
        Self {
            name: player.name.clone(),
            x: player.position.x,
            y: player.position.y,
            r,
            g,
            b,
            message: player.message.clone(),
            message_timer: player.message_timer,
            map_index: player.map_index,
            coins: player.coins,
            inventory: player.inventory.clone(),
            quests: player.quests.clone(),
            clothes: player.clothes.clone(),
            holding_item: player.holding_item.clone(),
            attack_timer: player.attack_timer,
            health: player.health,
            experience: player.experience,
            level: player.level,
        }
    }

    /// Build a new registry entry from this snapshot.
    pub fn to_player(&self) -> Player {
        let mut player = Player::new(&self.name, self.position(), [self.r, self.g, self.b]);
        self.apply_to(&mut player);
        player
    }

    /// Overwrite the replicated fields of an existing entry.
    ///
    /// Name and color are identity and stay as first seen. Local-only state
    /// (facing, hit effect) is left alone.
    pub fn apply_to(&self, player: &mut Player) {
        player.position = self.position();
        player.message = self.message.clone();
        player.message_timer = self.message_timer;
        player.map_index = self.map_index;
        player.coins = self.coins;
        player.inventory = self.inventory.clone();
        player.quests = self.quests.clone();
        player.clothes = self.clothes.clone();
        player.holding_item = self.holding_item.clone();
        player.attack_timer = self.attack_timer;
        player.health = self.health;
        player.experience = self.experience;
        player.level = self.level;
    }

    /// Anchor position.
    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Serialize to a single JSON line (without the trailing newline).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from one JSON line.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s.trim_end())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_player() -> Player {
        let mut p = Player::new("ada", Vec2::new(120.0, 410.0), [200, 10, 30]);
        p.coins = 3;
        p.inventory = vec!["coin".into(), "sword".into()];
        p.holding_item = Some("sword".into());
        p.say("hi");
        p
    }

    #[test]
    fn test_wire_field_names() {
        let json = Snapshot::from_player(&sample_player()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        for field in [
            "name", "x", "y", "r", "g", "b", "message", "message_timer", "map_index",
            "coins", "inventory", "quests", "clothes", "holding_item", "attack_timer",
            "health", "experience", "level",
        ] {
            assert!(value.get(field).is_some(), "missing field {}", field);
        }
        assert_eq!(value["quests"][0]["description"], "Collect 5 coins");
        assert_eq!(value["clothes"]["hat"], serde_json::Value::Null);
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_decode_from_foreign_line() {
        let line = r#"{"name":"bob","x":10,"y":320.5,"r":1,"g":2,"b":3,"message":"","message_timer":0,"map_index":2,"coins":7,"inventory":["coin"],"quests":[{"description":"Collect 5 coins","reward":50,"completed":true}],"clothes":{"hat":"red_hat","shirt":null},"holding_item":null,"attack_timer":0,"health":80,"experience":55,"level":2}"#;

        let snapshot = Snapshot::from_json(line).unwrap();
        assert_eq!(snapshot.name, "bob");
        assert_eq!(snapshot.position(), Vec2::new(10.0, 320.5));
        assert_eq!(snapshot.map_index, 2);
        assert!(snapshot.quests[0].completed);
        assert_eq!(snapshot.clothes["hat"], Some("red_hat".to_string()));

        let player = snapshot.to_player();
        assert_eq!(player.color, [1, 2, 3]);
        assert_eq!(player.health, 80);
        assert_eq!(player.level, 2);
    }

    #[test]
    fn test_malformed_lines_rejected() {
        assert!(Snapshot::from_json("not json").is_err());
        assert!(Snapshot::from_json(r#"{"name":"bob"}"#).is_err());
        assert!(Snapshot::from_json(r#"{"name":"bob","x":"left"}"#).is_err());
    }

    #[test]
    fn test_apply_keeps_identity() {
        let mut existing = Player::new("ada", Vec2::ZERO, [9, 9, 9]);
        let mut snapshot = Snapshot::from_player(&sample_player());
        snapshot.r = 0;
        snapshot.apply_to(&mut existing);

        assert_eq!(existing.color, [9, 9, 9]);
        assert_eq!(existing.position, Vec2::new(120.0, 410.0));
        assert_eq!(existing.coins, 3);
        assert_eq!(existing.message, "hi");
    }
}
