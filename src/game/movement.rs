//! Movement Resolution
//!
//! Moves the local player one displacement at a time. A move is rejected
//! as a whole when it leaves the walkable band or runs into solid scenery;
//! otherwise every pickup it touches is collected and the move applies.

use crate::core::vec2::Vec2;
use crate::game::collision;
use crate::game::events::GameEventData;
use crate::game::map::MapBounds;
use crate::game::object::{GameObject, ObjectKind};
use crate::game::player::{Facing, Player};
use crate::game::progression::check_quests;
use crate::game::world::WorldState;

/// What happened to a requested displacement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Position updated
    Moved,
    /// Rejected by solid scenery
    Blocked,
    /// Rejected by the map bounds
    OutOfBounds,
    /// No such player in the registry
    UnknownPlayer,
}

/// Try to move player `name` by `delta`.
///
/// Horizontal input turns the player even when the move is rejected.
pub fn move_player(
    world: &mut WorldState,
    name: &str,
    delta: Vec2,
    bounds: &MapBounds,
    events: &mut Vec<GameEventData>,
) -> MoveOutcome {
    let Some(player) = world.players.get_mut(name) else {
        return MoveOutcome::UnknownPlayer;
    };
    if let Some(facing) = Facing::from_dx(delta.x) {
        player.facing = facing;
    }

    let map_index = player.map_index;
    let target = player.position + delta;
    let rect = player.rect().translated(delta.x, delta.y);

    if !bounds.allows(target, Player::BOX_SIZE) {
        return MoveOutcome::OutOfBounds;
    }

    let objects = world.objects_on(map_index);
    if collision::is_blocked(objects, &rect) {
        return MoveOutcome::Blocked;
    }

    // Remove back to front so earlier indices stay valid
    let touched = collision::touched_pickups(objects, &rect);
    let mut collected: Vec<GameObject> = touched
        .into_iter()
        .rev()
        .map(|i| world.remove_object(map_index, i))
        .collect();
    collected.reverse();

    let Some(player) = world.players.get_mut(name) else {
        return MoveOutcome::UnknownPlayer;
    };
    for object in collected {
        collect(player, object.kind, map_index, events);
    }
    player.position = target;
    MoveOutcome::Moved
}

fn collect(player: &mut Player, kind: ObjectKind, map_index: usize, events: &mut Vec<GameEventData>) {
    let item = kind.item_name().to_string();
    player.inventory.push(item.clone());
    match kind {
        ObjectKind::Weapon => player.holding_item = Some(item.clone()),
        ObjectKind::Coin => player.coins = player.coins.saturating_add(1),
        _ => {}
    }
    events.push(GameEventData::ItemCollected {
        player: player.name.clone(),
        item,
        map_index,
    });
    check_quests(player, events);
}

/// Carry the player onto a neighboring map when standing on an edge.
///
/// Arrival points sit one step inside the opposite edge so the player does
/// not bounce straight back on the next tick.
pub fn cross_map_edge(
    player: &mut Player,
    map_count: usize,
    bounds: &MapBounds,
    step: f32,
) -> Option<GameEventData> {
    let from = player.map_index;
    let right_edge = bounds.right_edge();

    if player.position.x <= 0.0 && from > 0 {
        player.map_index = from - 1;
        player.position.x = right_edge - step;
    } else if player.position.x >= right_edge && from + 1 < map_count {
        player.map_index = from + 1;
        player.position.x = step;
    } else {
        return None;
    }

    Some(GameEventData::MapChanged {
        player: player.name.clone(),
        from,
        to: player.map_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::map::{Palette, StaticMap, WorldLayout};

    const SPEED: f32 = 5.0;

    fn world_with(objects: Vec<GameObject>, at: Vec2) -> WorldState {
        let palette = Palette { sky: 0, ground: 0 };
        let layout = WorldLayout {
            maps: vec![
                StaticMap::new("a", palette, objects),
                StaticMap::new("b", palette, Vec::new()),
            ],
            npc_spawns: vec![Vec::new(), Vec::new()],
        };
        let mut world = WorldState::new(layout);
        world.insert_player(Player::new("ada", at, [0, 0, 0]));
        world
    }

    fn step(world: &mut WorldState, delta: Vec2) -> (MoveOutcome, Vec<GameEventData>) {
        let mut events = Vec::new();
        let outcome = move_player(world, "ada", delta, &MapBounds::default(), &mut events);
        (outcome, events)
    }

    fn position(world: &WorldState) -> Vec2 {
        world.players["ada"].position
    }

    #[test]
    fn test_free_move() {
        let mut world = world_with(Vec::new(), Vec2::new(400.0, 400.0));
        let (outcome, _) = step(&mut world, Vec2::new(SPEED, 0.0));
        assert_eq!(outcome, MoveOutcome::Moved);
        assert_eq!(position(&world), Vec2::new(405.0, 400.0));
    }

    #[test]
    fn test_blocked_move_leaves_position() {
        // Barrier box (100..140, 400..420); player box at x=80 spans 85..100
        let mut world = world_with(
            vec![GameObject::new(100.0, 400.0, ObjectKind::Barrier)],
            Vec2::new(80.0, 380.0),
        );
        let before = position(&world);

        for delta in [Vec2::new(SPEED, 0.0), Vec2::new(10.0, 0.0), Vec2::new(20.0, 5.0)] {
            let (outcome, events) = step(&mut world, delta);
            assert_eq!(outcome, MoveOutcome::Blocked);
            assert!(events.is_empty());
            assert_eq!(position(&world), before);
        }
    }

    #[test]
    fn test_edge_contact_is_not_a_block() {
        // Player box right edge lands exactly on the barrier's left edge
        let mut world = world_with(
            vec![GameObject::new(100.0, 400.0, ObjectKind::Barrier)],
            Vec2::new(75.0, 380.0),
        );
        let (outcome, _) = step(&mut world, Vec2::new(SPEED, 0.0));
        assert_eq!(outcome, MoveOutcome::Moved);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut world = world_with(Vec::new(), Vec2::new(400.0, 300.0));
        let (outcome, _) = step(&mut world, Vec2::new(0.0, -SPEED));
        assert_eq!(outcome, MoveOutcome::OutOfBounds);
        assert_eq!(position(&world), Vec2::new(400.0, 300.0));

        let mut world = world_with(Vec::new(), Vec2::new(2.0, 400.0));
        let (outcome, _) = step(&mut world, Vec2::new(-SPEED, 0.0));
        assert_eq!(outcome, MoveOutcome::OutOfBounds);
        assert_eq!(world.players["ada"].facing, Facing::Left);
    }

    #[test]
    fn test_coin_pickup() {
        // Coin box (100..110, 420..430) is entered by the player box
        let mut world = world_with(
            vec![GameObject::new(100.0, 420.0, ObjectKind::Coin)],
            Vec2::new(85.0, 400.0),
        );

        let (outcome, events) = step(&mut world, Vec2::new(SPEED, 0.0));
        assert_eq!(outcome, MoveOutcome::Moved);
        assert_eq!(world.players["ada"].coins, 1);
        assert_eq!(world.players["ada"].inventory, vec!["coin".to_string()]);
        assert!(world.objects_on(0).is_empty());
        assert_eq!(
            events,
            vec![GameEventData::ItemCollected { player: "ada".into(), item: "coin".into(), map_index: 0 }]
        );

        // Nothing left to pick up on the way back
        let (_, events) = step(&mut world, Vec2::new(-SPEED, 0.0));
        let (_, more) = step(&mut world, Vec2::new(SPEED, 0.0));
        assert!(events.is_empty() && more.is_empty());
        assert_eq!(world.players["ada"].coins, 1);
    }

    #[test]
    fn test_weapon_pickup_equips() {
        let mut world = world_with(
            vec![GameObject::new(100.0, 420.0, ObjectKind::Weapon)],
            Vec2::new(85.0, 400.0),
        );
        step(&mut world, Vec2::new(SPEED, 0.0));
        assert!(world.players["ada"].has_weapon_equipped());
        assert_eq!(world.players["ada"].coins, 0);
    }

    #[test]
    fn test_fifth_coin_completes_quest() {
        let mut world = world_with(
            vec![GameObject::new(100.0, 420.0, ObjectKind::Coin)],
            Vec2::new(85.0, 400.0),
        );
        if let Some(p) = world.player_mut("ada") {
            p.coins = 4;
        }

        let (_, events) = step(&mut world, Vec2::new(SPEED, 0.0));
        let ada = &world.players["ada"];
        assert!(ada.quests[0].completed);
        assert_eq!(ada.coins, 5 + 50);
        assert_eq!(ada.experience, 50);
        assert!(events.iter().any(|e| matches!(e, GameEventData::QuestCompleted { .. })));
    }

    #[test]
    fn test_unknown_player() {
        let mut world = world_with(Vec::new(), Vec2::new(400.0, 400.0));
        let mut events = Vec::new();
        let outcome = move_player(&mut world, "nobody", Vec2::new(SPEED, 0.0), &MapBounds::default(), &mut events);
        assert_eq!(outcome, MoveOutcome::UnknownPlayer);
    }

    #[test]
    fn test_cross_right_then_left() {
        let bounds = MapBounds::default();
        let mut player = Player::new("ada", Vec2::new(780.0, 400.0), [0, 0, 0]);

        let event = cross_map_edge(&mut player, 2, &bounds, SPEED);
        assert_eq!(event, Some(GameEventData::MapChanged { player: "ada".into(), from: 0, to: 1 }));
        assert_eq!(player.position.x, SPEED);
        // Arrival point does not trigger the reverse crossing
        assert_eq!(cross_map_edge(&mut player, 2, &bounds, SPEED), None);

        player.position.x = 0.0;
        cross_map_edge(&mut player, 2, &bounds, SPEED);
        assert_eq!(player.map_index, 0);
        assert_eq!(player.position.x, 775.0);
        assert_eq!(cross_map_edge(&mut player, 2, &bounds, SPEED), None);
    }

    #[test]
    fn test_no_crossing_past_world_ends() {
        let bounds = MapBounds::default();
        let mut player = Player::new("ada", Vec2::new(0.0, 400.0), [0, 0, 0]);
        assert_eq!(cross_map_edge(&mut player, 2, &bounds, SPEED), None);

        player.map_index = 1;
        player.position.x = 785.0;
        assert_eq!(cross_map_edge(&mut player, 2, &bounds, SPEED), None);
        assert_eq!(player.map_index, 1);
    }
}
