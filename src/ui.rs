//! End-of-round overlay text
//!
//! Text rendering itself belongs to the host; this module only decides
//! what to say and where the centered overlay box goes.

use crate::sim::GamePhase;

/// Overlay box size in pixels
pub const OVERLAY_WIDTH: f32 = 300.0;
pub const OVERLAY_HEIGHT: f32 = 85.0;

/// Message shown for the current phase, if any
pub fn overlay_message(phase: GamePhase) -> Option<&'static str> {
    match phase {
        GamePhase::Playing => None,
        GamePhase::GameOver => Some("Game Over!"),
        GamePhase::Win => Some("*You Win!*"),
    }
}

/// Top-left corner of the overlay box, centered in the viewport
pub fn overlay_position(viewport_width: f32, viewport_height: f32) -> (f32, f32) {
    (
        (viewport_width - OVERLAY_WIDTH) / 2.0,
        (viewport_height - OVERLAY_HEIGHT) / 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_per_phase() {
        assert_eq!(overlay_message(GamePhase::Playing), None);
        assert_eq!(overlay_message(GamePhase::GameOver), Some("Game Over!"));
        assert_eq!(overlay_message(GamePhase::Win), Some("*You Win!*"));
    }

    #[test]
    fn test_overlay_centered() {
        let (x, y) = overlay_position(800.0, 600.0);
        assert_eq!(x, 250.0);
        assert_eq!(y, 257.5);
    }
}
