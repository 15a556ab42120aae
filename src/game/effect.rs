//! Transient hit effects.

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;

/// Short-lived marker left on whatever was just hit. Local only, never
/// replicated.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HitEffect {
    /// Where the effect is anchored
    pub position: Vec2,
    /// Ticks until the effect expires
    pub ticks_remaining: u32,
}

impl HitEffect {
    /// Lifetime in ticks (one second at 60 Hz).
    pub const DURATION_TICKS: u32 = 60;

    /// Start a new effect.
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            ticks_remaining: Self::DURATION_TICKS,
        }
    }

    /// Whether the effect is still visible.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.ticks_remaining > 0
    }
}

/// Advance an optional effect by one tick, clearing it once expired.
pub fn decay(effect: &mut Option<HitEffect>) {
    if let Some(fx) = effect {
        fx.ticks_remaining = fx.ticks_remaining.saturating_sub(1);
        if !fx.is_active() {
            *effect = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_expires() {
        let mut effect = Some(HitEffect::new(Vec2::new(10.0, 10.0)));
        for _ in 0..HitEffect::DURATION_TICKS - 1 {
            decay(&mut effect);
        }
        assert!(effect.is_some());

        decay(&mut effect);
        assert!(effect.is_none());

        decay(&mut effect);
        assert!(effect.is_none());
    }
}
