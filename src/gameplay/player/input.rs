//! Keyboard/mouse wiring: movement flags, jump, mouse look, cursor lock.

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

use super::{JUMP_VELOCITY, Player, Velocity};
use crate::gameplay::{CursorLock, cursor_locked};
use crate::{GameSet, GameState, gameplay_running};

/// Radians of view rotation per pixel of mouse travel.
const MOUSE_SENSITIVITY: f32 = 0.002;

/// Pitch clamp just short of straight up/down.
const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

// === Components ===

/// Held movement keys plus jump availability, sampled once per frame.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct MovementFlags {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub sprinting: bool,
    pub can_jump: bool,
}

impl Default for MovementFlags {
    fn default() -> Self {
        Self {
            forward: false,
            backward: false,
            left: false,
            right: false,
            sprinting: false,
            can_jump: true,
        }
    }
}

impl MovementFlags {
    /// True when any directional key is held.
    #[must_use]
    pub const fn moving(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

/// First-person view angles. Kept separate from the transform so pitch
/// clamping never has to round-trip through a quaternion.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct LookAngles {
    pub yaw: f32,
    pub pitch: f32,
}

// === Systems ===

/// Click captures the cursor; Escape releases it. Only the capture
/// state lives here — the window side effect is applied separately.
fn track_cursor_lock(
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut lock: ResMut<CursorLock>,
) {
    if !lock.locked && mouse.just_pressed(MouseButton::Left) {
        lock.locked = true;
    }
    if lock.locked && keyboard.just_pressed(KeyCode::Escape) {
        lock.locked = false;
    }
}

/// Pushes the capture state to the OS window.
fn apply_cursor_lock(
    lock: Res<CursorLock>,
    mut cursor: Single<&mut CursorOptions, With<PrimaryWindow>>,
) {
    if !lock.is_changed() {
        return;
    }
    if lock.locked {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    } else {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
    }
}

/// Samples held keys into [`MovementFlags`] and fires the jump impulse.
///
/// Jumping adds straight upward velocity and is single-shot: `can_jump`
/// only returns once the ground clamp sees the player land.
fn read_movement_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    query: Single<(&mut MovementFlags, &mut Velocity), With<Player>>,
) {
    let (mut flags, mut velocity) = query.into_inner();

    flags.forward = keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp);
    flags.backward = keyboard.pressed(KeyCode::KeyS);
    flags.left = keyboard.pressed(KeyCode::KeyA);
    flags.right = keyboard.pressed(KeyCode::KeyD);
    flags.sprinting = keyboard.pressed(KeyCode::ShiftLeft);

    if keyboard.just_pressed(KeyCode::Space) && flags.can_jump {
        velocity.0.y += JUMP_VELOCITY;
        flags.can_jump = false;
    }
}

/// Applies accumulated mouse motion to the view angles and rebuilds the
/// camera rotation (yaw about Y, then pitch about X).
fn look_around(
    motion: Res<AccumulatedMouseMotion>,
    query: Single<(&mut LookAngles, &mut Transform), With<Player>>,
) {
    let delta = motion.delta;
    if delta == Vec2::ZERO {
        return;
    }

    let (mut angles, mut transform) = query.into_inner();
    angles.yaw -= delta.x * MOUSE_SENSITIVITY;
    angles.pitch = (angles.pitch - delta.y * MOUSE_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    transform.rotation = Quat::from_euler(EulerRot::YXZ, angles.yaw, angles.pitch, 0.0);
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (
            track_cursor_lock,
            apply_cursor_lock,
            (read_movement_input, look_around).run_if(cursor_locked),
        )
            .chain()
            .in_set(GameSet::Input)
            .run_if(gameplay_running),
    );

    // Release the capture when the round ends, whatever ended it.
    app.add_systems(OnExit(GameState::InGame), release_cursor);
}

fn release_cursor(mut lock: ResMut<CursorLock>) {
    lock.locked = false;
}
