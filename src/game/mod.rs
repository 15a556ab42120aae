//! Game Logic Module
//!
//! Everything that happens inside one frame of the shared world.
//!
//! ## Module Structure
//!
//! - `input`: Held-key frames and their displacements
//! - `object`: Static map objects and their collision boxes
//! - `map`: Map layouts, bounds and the default world
//! - `world`: Maps, NPC rosters and the player registry
//! - `player` / `npc`: Entity state and per-entity rules
//! - `collision`: Rectangle queries against the world
//! - `movement`: Move resolution, pickups and map crossing
//! - `combat`: Melee attacks
//! - `progression`: Quests and leveling
//! - `tick`: The per-frame simulation driver
//! - `events`: Game events for UI feedback and logs

pub mod input;
pub mod object;
pub mod map;
pub mod world;
pub mod player;
pub mod npc;
pub mod effect;
pub mod collision;
pub mod movement;
pub mod combat;
pub mod progression;
pub mod tick;
pub mod events;

// Re-export key types
pub use input::InputFrame;
pub use map::{MapBounds, StaticMap, WorldLayout};
pub use object::{GameObject, ObjectKind};
pub use player::{Cosmetic, Facing, Player};
pub use npc::{Npc, NpcKind};
pub use progression::Quest;
pub use world::WorldState;
pub use tick::{SimConfig, Simulation, TickResult};
pub use events::{GameEvent, GameEventData};
