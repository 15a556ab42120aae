//! Network Layer
//!
//! Line-delimited snapshot relay over TCP.
//! This layer is **non-deterministic** - all game logic runs through `game/`.

pub mod protocol;
pub mod relay;
pub mod session;
pub mod server;

pub use protocol::Snapshot;
pub use relay::{ConnectionId, Origin, RelayHub};
pub use session::{GameSession, Hud, SharedWorld, WorldView};
pub use server::{RelayConfig, RelayError, RelayServer};
