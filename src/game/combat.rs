//! Melee Combat
//!
//! A sword swing hits every other player and every live NPC on the
//! attacker's map whose box overlaps the swing rectangle.

use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::game::collision;
use crate::game::events::GameEventData;
use crate::game::npc::NpcKind;
use crate::game::player::{Facing, Player};
use crate::game::progression::check_level_up;
use crate::game::world::WorldState;

/// Damage of one swing.
pub const MELEE_DAMAGE: u32 = 25;

/// Experience per monster hit.
pub const HIT_EXPERIENCE: u32 = 5;

/// Extra experience when the hit kills.
pub const KILL_EXPERIENCE: u32 = 20;

const SWING_WIDTH: f32 = 40.0;
const SWING_HEIGHT: f32 = 60.0;

/// Swing rectangle in front of the player.
pub fn melee_hitbox(player: &Player) -> Rect {
    let offset = match player.facing {
        Facing::Right => Vec2::new(20.0, -10.0),
        Facing::Left => Vec2::new(-SWING_WIDTH, -10.0),
    };
    Rect::at(player.position, offset, SWING_WIDTH, SWING_HEIGHT)
}

/// Swing the attacker's weapon.
///
/// Does nothing unless a weapon is equipped and the cooldown is over.
/// Returns whether any NPC was hit.
pub fn melee_attack(world: &mut WorldState, attacker: &str, events: &mut Vec<GameEventData>) -> bool {
    let Some(player) = world.players.get_mut(attacker) else {
        return false;
    };
    if !player.has_weapon_equipped() || player.attack_timer != 0 {
        return false;
    }
    player.attack_timer = Player::ATTACK_COOLDOWN;
    let map_index = player.map_index;
    let hitbox = melee_hitbox(player);

    for name in collision::players_hit(world, map_index, &hitbox, attacker) {
        if let Some(victim) = world.players.get_mut(&name) {
            victim.take_damage(MELEE_DAMAGE);
            victim.mark_hit();
        }
        events.push(GameEventData::PlayerHit {
            attacker: attacker.to_string(),
            victim: name,
            damage: MELEE_DAMAGE,
        });
    }

    let struck = collision::npcs_hit(&world.npcs[map_index], &hitbox);
    let mut rewards = Vec::with_capacity(struck.len());
    for &index in &struck {
        let npc = &mut world.npcs[map_index][index];
        npc.take_damage(MELEE_DAMAGE);
        npc.mark_hit();
        events.push(GameEventData::NpcHit {
            attacker: attacker.to_string(),
            map_index,
            slot: npc.slot,
            damage: MELEE_DAMAGE,
        });
        rewards.push((npc.kind, npc.is_dead()));
    }

    if let Some(player) = world.players.get_mut(attacker) {
        for (kind, killed) in rewards {
            if kind == NpcKind::Monster {
                player.experience = player.experience.saturating_add(HIT_EXPERIENCE);
            }
            if killed {
                player.experience = player.experience.saturating_add(KILL_EXPERIENCE);
                check_level_up(player, events);
            }
        }
    }

    !struck.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::map::{Palette, StaticMap, WorldLayout};
    use crate::game::npc::Npc;

    fn arena(npc_at: Vec<Vec2>) -> WorldState {
        let palette = Palette { sky: 0, ground: 0 };
        let mut world = WorldState::new(WorldLayout {
            maps: vec![
                StaticMap::new("a", palette, Vec::new()),
                StaticMap::new("b", palette, Vec::new()),
            ],
            npc_spawns: vec![npc_at, Vec::new()],
        });
        let mut ada = Player::new("ada", Vec2::new(100.0, 400.0), [0, 0, 0]);
        ada.holding_item = Some("sword".into());
        world.insert_player(ada);
        world
    }

    #[test]
    fn test_hitbox_follows_facing() {
        let mut p = Player::new("ada", Vec2::new(100.0, 400.0), [0, 0, 0]);
        assert_eq!(melee_hitbox(&p), Rect::new(120.0, 390.0, 40.0, 60.0));
        p.facing = Facing::Left;
        assert_eq!(melee_hitbox(&p), Rect::new(60.0, 390.0, 40.0, 60.0));
    }

    #[test]
    fn test_no_weapon_no_swing() {
        let mut world = arena(vec![Vec2::new(130.0, 400.0)]);
        if let Some(p) = world.player_mut("ada") {
            p.holding_item = None;
        }
        let mut events = Vec::new();
        assert!(!melee_attack(&mut world, "ada", &mut events));
        assert_eq!(world.npcs_on(0)[0].health, Npc::MAX_HEALTH);
        assert_eq!(world.players["ada"].attack_timer, 0);
    }

    #[test]
    fn test_cooldown_blocks_second_swing() {
        let mut world = arena(vec![Vec2::new(130.0, 400.0)]);
        let mut events = Vec::new();

        assert!(melee_attack(&mut world, "ada", &mut events));
        assert_eq!(world.players["ada"].attack_timer, Player::ATTACK_COOLDOWN);
        assert!(!melee_attack(&mut world, "ada", &mut events));
        assert_eq!(world.npcs_on(0)[0].health, Npc::MAX_HEALTH - MELEE_DAMAGE);
    }

    #[test]
    fn test_kill_grants_bonus() {
        let mut world = arena(vec![Vec2::new(130.0, 400.0)]);
        let mut events = Vec::new();

        melee_attack(&mut world, "ada", &mut events);
        assert_eq!(world.players["ada"].experience, HIT_EXPERIENCE);

        if let Some(p) = world.player_mut("ada") {
            p.attack_timer = 0;
        }
        melee_attack(&mut world, "ada", &mut events);
        let npc = &world.npcs_on(0)[0];
        assert_eq!(npc.health, 0);
        assert!(npc.hit_effect.is_some());
        assert_eq!(
            world.players["ada"].experience,
            2 * HIT_EXPERIENCE + KILL_EXPERIENCE
        );
    }

    #[test]
    fn test_kill_can_level_up() {
        let mut world = arena(vec![Vec2::new(130.0, 400.0)]);
        world.npcs[0][0].health = 10;
        if let Some(p) = world.player_mut("ada") {
            p.experience = 90;
        }
        let mut events = Vec::new();

        melee_attack(&mut world, "ada", &mut events);
        let ada = &world.players["ada"];
        assert_eq!(ada.level, 2);
        assert_eq!(ada.experience, 15);
        assert!(events.iter().any(|e| matches!(e, GameEventData::LevelUp { level: 2, .. })));
    }

    #[test]
    fn test_players_on_same_map_take_damage() {
        let mut world = arena(Vec::new());
        world.insert_player(Player::new("bob", Vec2::new(130.0, 400.0), [0, 0, 0]));
        let mut elsewhere = Player::new("cy", Vec2::new(130.0, 400.0), [0, 0, 0]);
        elsewhere.map_index = 1;
        world.insert_player(elsewhere);
        let mut events = Vec::new();

        assert!(!melee_attack(&mut world, "ada", &mut events));
        assert_eq!(world.players["bob"].health, 75);
        assert!(world.players["bob"].hit_effect.is_some());
        assert_eq!(world.players["cy"].health, 100);
        assert_eq!(world.players["ada"].health, 100);
    }

    #[test]
    fn test_dead_npcs_are_not_hit_again() {
        let mut world = arena(vec![Vec2::new(130.0, 400.0)]);
        world.npcs[0][0].health = 0;
        let mut events = Vec::new();
        assert!(!melee_attack(&mut world, "ada", &mut events));
        assert_eq!(world.players["ada"].experience, 0);
    }
}
