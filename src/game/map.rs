//! Map Layouts
//!
//! Static maps, the playable bounds shared by every map, and the default
//! four-map world with its NPC spawn tables.

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;
use crate::game::object::{GameObject, ObjectKind};

/// Background colors as packed ARGB. The simulation never reads them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Upper half of the screen
    pub sky: u32,
    /// Lower half of the screen
    pub ground: u32,
}

const SKY_BLUE: u32 = 0xff_87ceeb;
const GRASS_GREEN: u32 = 0xff_228b22;
const DEEP_BLUE: u32 = 0xff_00008b;
const SAND: u32 = 0xff_f5deb3;
const FOREST_GREEN: u32 = 0xff_006400;

/// A map: identity, palette and its object list.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StaticMap {
    /// Display name
    pub name: String,
    /// Background palette
    pub palette: Palette,
    /// Objects in placement order. Picked-up objects are removed.
    pub objects: Vec<GameObject>,
}

impl StaticMap {
    /// Create a map.
    pub fn new(name: &str, palette: Palette, objects: Vec<GameObject>) -> Self {
        Self {
            name: name.to_string(),
            palette,
            objects,
        }
    }
}

/// Screen-sized playable area. Walking is restricted to the lower half.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapBounds {
    /// Map width
    pub width: f32,
    /// Map height
    pub height: f32,
}

impl MapBounds {
    /// Create bounds.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Check whether a body of `size` anchored at `position` stays inside
    /// the walkable band.
    pub fn allows(&self, position: Vec2, size: Vec2) -> bool {
        position.x >= 0.0
            && position.x + size.x <= self.width
            && position.y >= self.height / 2.0
            && position.y + size.y <= self.height
    }

    /// Spawn point used on join and after death.
    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height - 100.0)
    }

    /// X coordinate at or past which the right map edge is crossed.
    pub fn right_edge(&self) -> f32 {
        self.width - 20.0
    }
}

impl Default for MapBounds {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Maps plus the NPC spawn table of each map (parallel arrays).
#[derive(Clone, Debug)]
pub struct WorldLayout {
    /// Maps in travel order, left to right
    pub maps: Vec<StaticMap>,
    /// Spawn coordinates per map; the index within a map is the NPC slot
    pub npc_spawns: Vec<Vec<Vec2>>,
}

impl WorldLayout {
    /// The default four-map world.
    pub fn standard() -> Self {
        let maps = vec![
            StaticMap::new(
                "Park",
                Palette { sky: SKY_BLUE, ground: GRASS_GREEN },
                vec![
                    GameObject::new(100.0, 400.0, ObjectKind::Barrier),
                    GameObject::new(600.0, 300.0, ObjectKind::Barrier),
                    GameObject::new(300.0, 350.0, ObjectKind::Tree),
                    GameObject::new(500.0, 500.0, ObjectKind::Tree),
                    GameObject::new(200.0, 300.0, ObjectKind::Coin),
                    GameObject::new(400.0, 450.0, ObjectKind::Weapon),
                ],
            ),
            StaticMap::new(
                "Sea",
                Palette { sky: SKY_BLUE, ground: DEEP_BLUE },
                vec![
                    GameObject::new(200.0, 350.0, ObjectKind::Barrier),
                    GameObject::new(400.0, 250.0, ObjectKind::Vehicle),
                    GameObject::new(600.0, 450.0, ObjectKind::Vehicle),
                    GameObject::new(300.0, 400.0, ObjectKind::Coin),
                    GameObject::new(500.0, 350.0, ObjectKind::Weapon),
                ],
            ),
            StaticMap::new(
                "Desert",
                Palette { sky: SKY_BLUE, ground: SAND },
                vec![
                    GameObject::new(200.0, 350.0, ObjectKind::Barrier),
                    GameObject::new(400.0, 250.0, ObjectKind::Tree),
                    GameObject::new(600.0, 450.0, ObjectKind::Coin),
                    GameObject::new(300.0, 400.0, ObjectKind::Weapon),
                ],
            ),
            StaticMap::new(
                "Forest",
                Palette { sky: SKY_BLUE, ground: FOREST_GREEN },
                vec![
                    GameObject::new(100.0, 400.0, ObjectKind::Tree),
                    GameObject::new(600.0, 300.0, ObjectKind::Tree),
                    GameObject::new(300.0, 200.0, ObjectKind::Tree),
                    GameObject::new(500.0, 500.0, ObjectKind::Coin),
                    GameObject::new(400.0, 450.0, ObjectKind::Weapon),
                ],
            ),
        ];

        let npc_spawns = vec![
            vec![Vec2::new(300.0, 400.0), Vec2::new(500.0, 350.0)],
            vec![Vec2::new(400.0, 400.0)],
            vec![Vec2::new(600.0, 300.0), Vec2::new(200.0, 500.0)],
            vec![Vec2::new(300.0, 300.0), Vec2::new(500.0, 400.0)],
        ];

        Self { maps, npc_spawns }
    }
}

impl Default for WorldLayout {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_layout_is_parallel() {
        let layout = WorldLayout::standard();
        assert_eq!(layout.maps.len(), 4);
        assert_eq!(layout.maps.len(), layout.npc_spawns.len());
        assert_eq!(layout.maps[0].name, "Park");
    }

    #[test]
    fn test_bounds_walkable_band() {
        let bounds = MapBounds::default();
        let body = Vec2::new(15.0, 50.0);

        assert!(bounds.allows(Vec2::new(0.0, 300.0), body));
        assert!(bounds.allows(Vec2::new(785.0, 550.0), body));
        assert!(!bounds.allows(Vec2::new(-1.0, 400.0), body));
        assert!(!bounds.allows(Vec2::new(786.0, 400.0), body));
        assert!(!bounds.allows(Vec2::new(100.0, 299.0), body));
        assert!(!bounds.allows(Vec2::new(100.0, 551.0), body));
    }

    #[test]
    fn test_spawn_point_is_walkable() {
        let bounds = MapBounds::default();
        assert_eq!(bounds.spawn_point(), Vec2::new(400.0, 500.0));
        assert!(bounds.allows(bounds.spawn_point(), Vec2::new(15.0, 50.0)));
    }
}
