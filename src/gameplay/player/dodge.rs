//! Dodge dash: a cooldown-gated burst of speed with damage mitigation.

use bevy::prelude::*;

use super::{MovementFlags, Player, Stamina, Velocity, movement};
use crate::gameplay::cursor_locked;
use crate::{GameSet, gameplay_running};

/// Stamina cost of one dodge.
pub const DODGE_COST: f32 = 30.0;

/// Minimum seconds between dodges.
pub const DODGE_COOLDOWN: f32 = 1.0;

/// How long the dash (and its damage mitigation) lasts.
pub const DODGE_DURATION: f32 = 0.3;

/// Magnitude of the instantaneous velocity kick. Split across both
/// axes on a diagonal dodge.
pub const DODGE_IMPULSE: f32 = 20.0;

// === Components ===

/// Dodge bookkeeping: the cooldown clock and the active-dash window.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Dodge {
    /// Timestamp of the last successful dodge, seconds of game time.
    last_dodge_at: f32,
    active: Option<Timer>,
}

impl Default for Dodge {
    fn default() -> Self {
        Self {
            last_dodge_at: f32::NEG_INFINITY,
            active: None,
        }
    }
}

impl Dodge {
    /// True while the dash window (and its damage mitigation) is open.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Advances the dash window; expiring closes it.
    pub fn tick(&mut self, delta: std::time::Duration) {
        if let Some(timer) = self.active.as_mut() {
            timer.tick(delta);
            if timer.is_finished() {
                self.active = None;
            }
        }
    }

    /// Attempts a dodge at game time `now`: requires the cooldown to
    /// have elapsed and enough stamina. On success, consumes stamina,
    /// opens the dash window, and kicks the velocity along every held
    /// movement axis. Returns whether the dodge fired.
    pub fn attempt(
        &mut self,
        now: f32,
        stamina: &mut Stamina,
        velocity: &mut Vec3,
        flags: &MovementFlags,
    ) -> bool {
        if now - self.last_dodge_at < DODGE_COOLDOWN || stamina.current < DODGE_COST {
            return false;
        }

        self.last_dodge_at = now;
        stamina.drain(DODGE_COST);
        self.active = Some(Timer::from_seconds(DODGE_DURATION, TimerMode::Once));

        // Same negated accumulation convention as regular movement.
        let direction = movement::input_direction(flags);
        velocity.x -= direction.x * DODGE_IMPULSE;
        velocity.z -= direction.z * DODGE_IMPULSE;
        true
    }

    #[cfg(test)]
    pub fn activate_for_test(&mut self) {
        self.active = Some(Timer::from_seconds(DODGE_DURATION, TimerMode::Once));
    }
}

// === Systems ===

/// E triggers a dodge attempt. Runs in `GameSet::Input`.
fn trigger_dodge(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    query: Single<(&mut Dodge, &mut Stamina, &mut Velocity, &MovementFlags), With<Player>>,
) {
    if !keyboard.just_pressed(KeyCode::KeyE) {
        return;
    }
    let (mut dodge, mut stamina, mut velocity, flags) = query.into_inner();
    dodge.attempt(time.elapsed_secs(), &mut stamina, &mut velocity.0, flags);
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        trigger_dodge
            .in_set(GameSet::Input)
            .run_if(gameplay_running.and(cursor_locked)),
    );
}
