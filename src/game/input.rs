//! Input Capture
//!
//! One frame of held keys, packed into flag bits. The external input
//! collaborator fills it; the simulation turns it into displacements.

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;

/// Held-key state for a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Action flags (packed bits):
    /// - Bit 0: left held
    /// - Bit 1: right held
    /// - Bit 2: up held
    /// - Bit 3: down held
    /// - Bit 4: attack triggered this frame
    pub flags: u8,
}

impl InputFrame {
    /// Left flag bit
    pub const FLAG_LEFT: u8 = 0x01;

    /// Right flag bit
    pub const FLAG_RIGHT: u8 = 0x02;

    /// Up flag bit
    pub const FLAG_UP: u8 = 0x04;

    /// Down flag bit
    pub const FLAG_DOWN: u8 = 0x08;

    /// Attack flag bit
    pub const FLAG_ATTACK: u8 = 0x10;

    /// Create an idle frame.
    pub const fn new() -> Self {
        Self { flags: 0 }
    }

    /// Create a frame from raw flags.
    pub const fn from_flags(flags: u8) -> Self {
        Self { flags }
    }

    #[inline]
    fn held(&self, flag: u8) -> bool {
        self.flags & flag != 0
    }

    /// Check if attack was triggered this frame.
    #[inline]
    pub fn attack_pressed(&self) -> bool {
        self.held(Self::FLAG_ATTACK)
    }

    /// Check if this is an idle frame (no input).
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.flags == 0
    }

    /// Set or clear a flag.
    #[inline]
    pub fn set(&mut self, flag: u8, pressed: bool) {
        if pressed {
            self.flags |= flag;
        } else {
            self.flags &= !flag;
        }
    }

    /// Requested displacements for this frame.
    ///
    /// Each held direction is its own move, applied in the order left,
    /// right, up, down. Holding opposite keys yields both moves.
    pub fn displacements(&self, speed: f32) -> impl Iterator<Item = Vec2> + '_ {
        [
            (Self::FLAG_LEFT, Vec2::new(-speed, 0.0)),
            (Self::FLAG_RIGHT, Vec2::new(speed, 0.0)),
            (Self::FLAG_UP, Vec2::new(0.0, -speed)),
            (Self::FLAG_DOWN, Vec2::new(0.0, speed)),
        ]
        .into_iter()
        .filter(move |(flag, _)| self.held(*flag))
        .map(|(_, delta)| delta)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_frame() {
        let frame = InputFrame::new();
        assert!(frame.is_idle());
        assert!(!frame.attack_pressed());
        assert_eq!(frame.displacements(5.0).count(), 0);
    }

    #[test]
    fn test_displacement_order() {
        let frame = InputFrame::from_flags(
            InputFrame::FLAG_DOWN | InputFrame::FLAG_LEFT | InputFrame::FLAG_RIGHT,
        );
        let moves: Vec<Vec2> = frame.displacements(5.0).collect();
        assert_eq!(
            moves,
            vec![Vec2::new(-5.0, 0.0), Vec2::new(5.0, 0.0), Vec2::new(0.0, 5.0)]
        );
    }

    #[test]
    fn test_set_flags() {
        let mut frame = InputFrame::new();
        frame.set(InputFrame::FLAG_ATTACK, true);
        assert!(frame.attack_pressed());
        frame.set(InputFrame::FLAG_ATTACK, false);
        assert!(frame.is_idle());
    }
}
