//! Static Map Objects
//!
//! Every object on a map is a kind tag plus a position. The kind alone
//! decides the collision box; how an object looks is the renderer's concern.

use serde::{Deserialize, Serialize};

use crate::core::rect::Rect;
use crate::core::vec2::Vec2;

/// Kind of map object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// Bench-like barrier
    Barrier,
    /// Tree (trunk is the only solid part)
    Tree,
    /// Large building
    Structure,
    /// Currency pickup
    Coin,
    /// Weapon pickup
    Weapon,
    /// Parked vehicle
    Vehicle,
}

impl ObjectKind {
    /// Item identifier used in inventories and on the wire.
    pub fn item_name(self) -> &'static str {
        match self {
            ObjectKind::Barrier => "bank",
            ObjectKind::Tree => "tree",
            ObjectKind::Structure => "mall",
            ObjectKind::Coin => "coin",
            ObjectKind::Weapon => "sword",
            ObjectKind::Vehicle => "car",
        }
    }

    /// Whether objects of this kind are picked up on contact by default.
    pub fn is_pickup(self) -> bool {
        matches!(self, ObjectKind::Coin | ObjectKind::Weapon)
    }

    /// Collision box as (offset from position, width, height).
    fn hitbox(self) -> (Vec2, f32, f32) {
        match self {
            ObjectKind::Barrier => (Vec2::ZERO, 40.0, 20.0),
            ObjectKind::Tree => (Vec2::new(15.0, 20.0), 20.0, 40.0),
            ObjectKind::Structure => (Vec2::ZERO, 100.0, 60.0),
            ObjectKind::Coin => (Vec2::ZERO, 10.0, 10.0),
            ObjectKind::Weapon => (Vec2::ZERO, 20.0, 10.0),
            ObjectKind::Vehicle => (Vec2::ZERO, 50.0, 30.0),
        }
    }
}

/// An object placed on a map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    /// Anchor position
    pub position: Vec2,
    /// Object kind
    pub kind: ObjectKind,
    /// Collectable objects never block movement
    pub collectable: bool,
}

impl GameObject {
    /// Create an object whose collectable flag follows its kind.
    pub fn new(x: f32, y: f32, kind: ObjectKind) -> Self {
        Self {
            position: Vec2::new(x, y),
            kind,
            collectable: kind.is_pickup(),
        }
    }

    /// Collision box derived from position and kind.
    pub fn rect(&self) -> Rect {
        let (offset, w, h) = self.kind.hitbox();
        Rect::at(self.position, offset, w, h)
    }

    /// Whether touching this object picks it up.
    pub fn is_pickup(&self) -> bool {
        self.collectable && self.kind.is_pickup()
    }
}
