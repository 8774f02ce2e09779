//! Gameplay domain plugins: arena, player, weapons, enemies, combat, HUD.

pub mod arena;
pub mod combat;
pub mod enemies;
pub mod hud;
pub mod player;
pub mod weapons;

use bevy::prelude::*;

// === Shared Components ===

/// Current and maximum hit points.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    #[must_use]
    pub const fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Fraction of health remaining, in `[0, 1]`.
    #[must_use]
    pub fn ratio(&self) -> f32 {
        (self.current / self.max).clamp(0.0, 1.0)
    }

    /// Restores hit points, capped at the maximum.
    pub fn heal(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }
}

// === Cursor Lock ===

/// Whether the window has captured the mouse.
///
/// The capture handshake lives in the player input module; everything
/// else reads this resource. Player input and physics only advance while
/// the cursor is captured.
#[derive(Resource, Debug, Default, Reflect)]
#[reflect(Resource)]
pub struct CursorLock {
    pub locked: bool,
}

/// Run condition: the cursor is currently captured.
pub fn cursor_locked(lock: Res<CursorLock>) -> bool {
    lock.locked
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Health>()
        .register_type::<CursorLock>()
        .init_resource::<CursorLock>();

    app.add_plugins((
        arena::plugin,
        player::plugin,
        weapons::plugin,
        enemies::plugin,
        combat::plugin,
        hud::plugin,
    ));
}
