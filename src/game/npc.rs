//! NPC Behavior
//!
//! Monsters chase the local player in a straight line and strike on
//! contact. Obstacles are ignored while pursuing.

use serde::{Deserialize, Serialize};

use crate::core::rect::{overlaps, Rect};
use crate::core::vec2::Vec2;
use crate::game::effect::{self, HitEffect};
use crate::game::player::{Facing, Player};

/// NPC type tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NpcKind {
    /// Hostile monster
    #[default]
    Monster,
}

/// A live NPC in a map roster.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Npc {
    /// Top-left anchor
    pub position: Vec2,

    /// Type tag
    pub kind: NpcKind,

    /// Health in 0..=MAX_HEALTH
    pub health: u32,

    /// Strike cooldown remaining
    pub attack_timer: u32,

    /// Attack animation frames remaining
    pub attack_anim: u32,

    /// Facing, from the last pursuit step
    pub facing: Facing,

    /// Where this NPC (and its replacement) spawns
    pub spawn: Vec2,

    /// Roster slot in the map's spawn table
    pub slot: usize,

    /// Local hit marker
    #[serde(skip)]
    pub hit_effect: Option<HitEffect>,
}

impl Npc {
    /// Side length of the square collision box
    pub const SIZE: f32 = 30.0;

    /// Full health
    pub const MAX_HEALTH: u32 = 50;

    /// Pursuit speed per tick
    pub const SPEED: f32 = 2.0;

    /// Distance at or below which pursuit stops
    pub const AGGRO_RANGE: f32 = 30.0;

    /// Contact damage
    pub const ATTACK_DAMAGE: u32 = 10;

    /// Ticks between strikes
    pub const ATTACK_COOLDOWN: u32 = 60;

    /// Attack animation length in ticks
    pub const ATTACK_ANIM: u32 = 10;

    /// Spawn a fresh monster at `spawn` for roster `slot`.
    pub fn new(spawn: Vec2, slot: usize) -> Self {
        Self {
            position: spawn,
            kind: NpcKind::Monster,
            health: Self::MAX_HEALTH,
            attack_timer: 0,
            attack_anim: 0,
            facing: Facing::Right,
            spawn,
            slot,
            hit_effect: None,
        }
    }

    /// Collision box derived from the current position.
    pub fn rect(&self) -> Rect {
        Rect::at(self.position, Vec2::ZERO, Self::SIZE, Self::SIZE)
    }

    /// Whether health has reached zero.
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Apply damage, clamping at zero.
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Mark the NPC as just hit.
    pub fn mark_hit(&mut self) {
        self.hit_effect = Some(HitEffect::new(self.position + Vec2::new(15.0, 15.0)));
    }

    /// One pursuit step toward `target`.
    ///
    /// Outside the aggro range the NPC closes in at [`Npc::SPEED`]; inside
    /// it, a ready NPC winds up its attack animation instead.
    pub fn pursue(&mut self, target: Vec2) {
        if self.is_dead() {
            return;
        }

        let delta = target - self.position;
        self.facing = if delta.x > 0.0 { Facing::Right } else { Facing::Left };

        let dist = delta.length();
        if dist > Self::AGGRO_RANGE {
            self.position = self.position + delta.normalize().scale(Self::SPEED);
        } else if self.attack_timer == 0 {
            self.attack_anim = Self::ATTACK_ANIM;
        }

        effect::decay(&mut self.hit_effect);
    }

    /// Contact strike against `player`, then cooldown upkeep.
    ///
    /// Returns the damage dealt, if any.
    pub fn strike(&mut self, player: &mut Player) -> Option<u32> {
        if self.is_dead() {
            return None;
        }

        let mut dealt = None;
        if self.attack_timer == 0 && overlaps(&self.rect(), &player.rect()) {
            player.take_damage(Self::ATTACK_DAMAGE);
            player.mark_hit();
            self.attack_timer = Self::ATTACK_COOLDOWN;
            self.attack_anim = Self::ATTACK_ANIM;
            dealt = Some(Self::ATTACK_DAMAGE);
        }

        self.attack_timer = self.attack_timer.saturating_sub(1);
        self.attack_anim = self.attack_anim.saturating_sub(1);
        dealt
    }
}
