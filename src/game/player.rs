//! Player State
//!
//! A player is keyed by name. The local player is simulated here; remote
//! players are copies of whatever their owners last replicated.

use std::collections::BTreeMap;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::game::effect::{self, HitEffect};
use crate::game::object::ObjectKind;
use crate::game::progression::Quest;

// =============================================================================
// FACING
// =============================================================================

/// Horizontal facing, used for melee direction and NPC animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    /// Facing left (-X)
    Left,
    /// Facing right (+X)
    #[default]
    Right,
}

impl Facing {
    /// Facing implied by a horizontal delta; `None` when there is none.
    pub fn from_dx(dx: f32) -> Option<Self> {
        if dx > 0.0 {
            Some(Facing::Right)
        } else if dx < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

// =============================================================================
// COSMETICS
// =============================================================================

/// Purchasable cosmetic items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cosmetic {
    /// Red hat, 10 coins
    Hat,
    /// Red shirt, 15 coins
    Shirt,
}

impl Cosmetic {
    /// Slot the item occupies.
    pub fn slot(self) -> &'static str {
        match self {
            Cosmetic::Hat => "hat",
            Cosmetic::Shirt => "shirt",
        }
    }

    /// Item identifier stored in the slot.
    pub fn item_id(self) -> &'static str {
        match self {
            Cosmetic::Hat => "red_hat",
            Cosmetic::Shirt => "red_shirt",
        }
    }

    /// Price in coins.
    pub fn price(self) -> u32 {
        match self {
            Cosmetic::Hat => 10,
            Cosmetic::Shirt => 15,
        }
    }
}

fn empty_clothes() -> BTreeMap<String, Option<String>> {
    [Cosmetic::Hat, Cosmetic::Shirt]
        .into_iter()
        .map(|c| (c.slot().to_string(), None))
        .collect()
}

// =============================================================================
// PLAYER
// =============================================================================

/// State of a single player.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    /// Unique name (registry key)
    pub name: String,

    /// Top-left anchor
    pub position: Vec2,

    /// Identity color (r, g, b)
    pub color: [u8; 3],

    /// Health in 0..=MAX_HEALTH
    pub health: u32,

    /// Coins held
    pub coins: u32,

    /// Collected item identifiers in pickup order
    pub inventory: Vec<String>,

    /// Equipped item, if any
    pub holding_item: Option<String>,

    /// Cosmetic slot name to item id
    pub clothes: BTreeMap<String, Option<String>>,

    /// Index of the map the player is on
    pub map_index: usize,

    /// Experience towards the next level
    pub experience: u32,

    /// Current level (starts at 1)
    pub level: u32,

    /// Active quests
    pub quests: Vec<Quest>,

    /// Outgoing chat message
    pub message: String,

    /// Ticks the chat message stays visible
    pub message_timer: u32,

    /// Melee cooldown remaining (0 = ready)
    pub attack_timer: u32,

    /// Last horizontal facing
    pub facing: Facing,

    /// Whether the player moved this tick
    pub moving: bool,

    /// Local hit marker
    #[serde(skip)]
    pub hit_effect: Option<HitEffect>,
}

impl Player {
    /// Maximum (and starting) health
    pub const MAX_HEALTH: u32 = 100;

    /// Collision box offset from the anchor
    pub const BOX_OFFSET: Vec2 = Vec2::new(5.0, 10.0);

    /// Collision box size
    pub const BOX_SIZE: Vec2 = Vec2::new(15.0, 50.0);

    /// Melee cooldown in ticks
    pub const ATTACK_COOLDOWN: u32 = 15;

    /// How long a chat message stays up, in ticks
    pub const MESSAGE_TICKS: u32 = 180;

    /// Create a fresh player.
    pub fn new(name: &str, position: Vec2, color: [u8; 3]) -> Self {
        Self {
            name: name.to_string(),
            position,
            color,
            health: Self::MAX_HEALTH,
            coins: 0,
            inventory: Vec::new(),
            holding_item: None,
            clothes: empty_clothes(),
            map_index: 0,
            experience: 0,
            level: 1,
            quests: vec![Quest::collect_coins()],
            message: String::new(),
            message_timer: 0,
            attack_timer: 0,
            facing: Facing::Right,
            moving: false,
            hit_effect: None,
        }
    }

    /// Random identity color, each channel in `0..255`.
    pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> [u8; 3] {
        [rng.gen_range(0..255), rng.gen_range(0..255), rng.gen_range(0..255)]
    }

    /// Collision box derived from the current position.
    pub fn rect(&self) -> Rect {
        Rect::at(self.position, Self::BOX_OFFSET, Self::BOX_SIZE.x, Self::BOX_SIZE.y)
    }

    /// Whether a weapon is in hand.
    pub fn has_weapon_equipped(&self) -> bool {
        self.holding_item.as_deref() == Some(ObjectKind::Weapon.item_name())
    }

    /// Apply damage, clamping at zero.
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Mark the player as just hit.
    pub fn mark_hit(&mut self) {
        self.hit_effect = Some(HitEffect::new(self.position + Vec2::new(10.0, 10.0)));
    }

    /// Whether the player has no health left.
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Per-tick timer upkeep.
    pub fn update_timers(&mut self) {
        self.attack_timer = self.attack_timer.saturating_sub(1);
        self.message_timer = self.message_timer.saturating_sub(1);
        effect::decay(&mut self.hit_effect);
    }

    /// Reset after death: full health at `spawn`, weapons lost.
    pub fn respawn(&mut self, spawn: Vec2) {
        let weapon = ObjectKind::Weapon.item_name();
        self.health = Self::MAX_HEALTH;
        self.position = spawn;
        self.inventory.retain(|item| item != weapon);
        self.holding_item = None;
    }

    /// Set the outgoing chat message.
    pub fn say(&mut self, text: &str) {
        self.message = text.to_string();
        self.message_timer = Self::MESSAGE_TICKS;
    }

    /// Buy a cosmetic. Returns false (and changes nothing) when short on coins.
    pub fn buy(&mut self, cosmetic: Cosmetic) -> bool {
        if self.coins < cosmetic.price() {
            return false;
        }
        self.coins -= cosmetic.price();
        self.clothes
            .insert(cosmetic.slot().to_string(), Some(cosmetic.item_id().to_string()));
        true
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn player() -> Player {
        Player::new("ada", Vec2::new(400.0, 500.0), [1, 2, 3])
    }

    #[test]
    fn test_new_player_defaults() {
        let p = player();
        assert_eq!(p.health, Player::MAX_HEALTH);
        assert_eq!(p.level, 1);
        assert_eq!(p.quests.len(), 1);
        assert_eq!(p.clothes.get("hat"), Some(&None));
        assert_eq!(p.clothes.get("shirt"), Some(&None));
    }

    #[test]
    fn test_random_color_stays_below_255() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let color = Player::random_color(&mut rng);
            assert!(color.iter().all(|&c| c < 255));
        }
    }

    #[test]
    fn test_rect_follows_position() {
        let mut p = player();
        assert_eq!(p.rect(), Rect::new(405.0, 510.0, 15.0, 50.0));

        p.position = Vec2::new(10.0, 320.0);
        assert_eq!(p.rect(), Rect::new(15.0, 330.0, 15.0, 50.0));
    }

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut p = player();
        p.take_damage(30);
        assert_eq!(p.health, 70);
        p.take_damage(1000);
        assert_eq!(p.health, 0);
        assert!(p.is_dead());
    }

    #[test]
    fn test_respawn_drops_weapons() {
        let mut p = player();
        p.inventory = vec!["coin".into(), "sword".into(), "sword".into()];
        p.holding_item = Some("sword".into());
        p.health = 0;

        p.respawn(Vec2::new(400.0, 500.0));

        assert_eq!(p.health, Player::MAX_HEALTH);
        assert_eq!(p.inventory, vec!["coin".to_string()]);
        assert!(!p.has_weapon_equipped());
    }

    #[test]
    fn test_timers_count_down() {
        let mut p = player();
        p.say("hello");
        p.attack_timer = 1;
        p.update_timers();
        assert_eq!(p.attack_timer, 0);
        assert_eq!(p.message_timer, Player::MESSAGE_TICKS - 1);

        p.update_timers();
        assert_eq!(p.attack_timer, 0);
    }

    #[test]
    fn test_buy_cosmetics() {
        let mut p = player();
        p.coins = 12;

        assert!(p.buy(Cosmetic::Hat));
        assert_eq!(p.coins, 2);
        assert_eq!(p.clothes.get("hat"), Some(&Some("red_hat".to_string())));

        assert!(!p.buy(Cosmetic::Shirt));
        assert_eq!(p.coins, 2);
        assert_eq!(p.clothes.get("shirt"), Some(&None));
    }

    #[test]
    fn test_facing_from_dx() {
        assert_eq!(Facing::from_dx(5.0), Some(Facing::Right));
        assert_eq!(Facing::from_dx(-5.0), Some(Facing::Left));
        assert_eq!(Facing::from_dx(0.0), None);
    }
}
