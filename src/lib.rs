//! # Stickies
//!
//! Shared-world multiplayer simulation. Every running instance is both a
//! snapshot relay and a participant: it simulates its own player and the
//! NPCs around it, publishes its player's state through the relay, and
//! merges whatever peers report.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         STICKIES                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Primitives                                │
//! │  ├── vec2.rs     - 2D vector                                 │
//! │  └── rect.rs     - Axis-aligned rectangles and overlap       │
//! │                                                              │
//! │  game/           - Simulation                                │
//! │  ├── world.rs    - Maps, NPC rosters, player registry        │
//! │  ├── movement.rs - Moves, pickups, map crossing              │
//! │  ├── combat.rs   - Melee attacks                             │
//! │  ├── npc.rs      - Pursuit and contact strikes               │
//! │  ├── progression.rs - Quests and leveling                    │
//! │  └── tick.rs     - Per-frame driver and NPC respawns         │
//! │                                                              │
//! │  network/        - Replication                               │
//! │  ├── relay.rs    - Fan-out set                               │
//! │  ├── server.rs   - TCP accept loop and peer handlers         │
//! │  ├── protocol.rs - Snapshot wire format                      │
//! │  └── session.rs  - Local participant and render views        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Replication
//!
//! Local and remote snapshots take the same path: each line enters the
//! [`RelayHub`](network::RelayHub) and is queued on every connection except
//! the one it arrived on. Remote state is trusted as reported.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod network;

// Re-export commonly used types
pub use crate::core::rect::{overlaps, Rect};
pub use crate::core::vec2::Vec2;
pub use game::{InputFrame, Player, SimConfig, Simulation, WorldState};
pub use network::{GameSession, RelayConfig, RelayHub, RelayServer, Snapshot};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate (Hz)
pub const TICK_RATE: u32 = 60;
