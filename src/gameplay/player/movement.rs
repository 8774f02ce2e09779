//! Hand-integrated player movement: damping, gravity, input
//! acceleration, and the ground clamp.
//!
//! Coordinate convention quirk, preserved deliberately: horizontal
//! velocity is accumulated with a *negated* sign
//! (`velocity -= direction * speed * delta`) and the integration step
//! negates again when projecting onto the camera's right/forward axes.
//! Flipping either sign alone inverts the controls.

use bevy::prelude::*;

use super::{
    BASE_SPEED, DAMPING, DODGE_SPEED, Dodge, EYE_HEIGHT, GRAVITY, MovementFlags, Player,
    SPRINT_MULTIPLIER, STAMINA_DRAIN_RATE, STAMINA_REGEN_RATE, Stamina, Velocity,
};

/// Builds the raw input direction from held keys: +z forward, +x right,
/// normalized so diagonals are not faster.
#[must_use]
pub fn input_direction(flags: &MovementFlags) -> Vec3 {
    let axis = |positive: bool, negative: bool| {
        f32::from(u8::from(positive)) - f32::from(u8::from(negative))
    };
    Vec3::new(
        axis(flags.right, flags.left),
        0.0,
        axis(flags.forward, flags.backward),
    )
    .normalize_or_zero()
}

/// Advances the velocity by one step: exponential horizontal damping,
/// constant gravity, then input acceleration (negated — see module
/// docs).
pub fn step_velocity(velocity: &mut Vec3, direction: Vec3, speed: f32, delta: f32) {
    velocity.x -= velocity.x * DAMPING * delta;
    velocity.z -= velocity.z * DAMPING * delta;
    velocity.y -= GRAVITY * delta;

    velocity.x -= direction.x * speed * delta;
    velocity.z -= direction.z * speed * delta;
}

/// Acceleration scale for this frame: dodge overrides base, sprint
/// multiplies while any stamina remains.
#[must_use]
pub fn frame_speed(flags: &MovementFlags, stamina: &Stamina, dodging: bool) -> f32 {
    let base = if dodging { DODGE_SPEED } else { BASE_SPEED };
    let multiplier = if flags.sprinting && stamina.current > 0.0 {
        SPRINT_MULTIPLIER
    } else {
        1.0
    };
    base * multiplier
}

/// Per-frame integration, in the order the simulation depends on:
/// stamina economy, velocity step, position integration along the view
/// axes, ground clamp. Runs in `GameSet::Movement`, only while the
/// cursor is captured.
pub(super) fn integrate_movement(
    time: Res<Time>,
    query: Single<
        (
            &mut Transform,
            &mut Velocity,
            &mut MovementFlags,
            &mut Stamina,
            &mut Dodge,
        ),
        With<Player>,
    >,
) {
    let delta = time.delta_secs();
    let (mut transform, mut velocity, mut flags, mut stamina, mut dodge) = query.into_inner();

    dodge.tick(time.delta());

    // Stamina: sprinting on the move drains, everything else recovers.
    if flags.sprinting && flags.moving() {
        stamina.drain(STAMINA_DRAIN_RATE * delta);
    } else {
        stamina.regen(STAMINA_REGEN_RATE * delta);
    }

    let direction = input_direction(&flags);
    let speed = frame_speed(&flags, &stamina, dodge.is_active());
    step_velocity(&mut velocity.0, direction, speed, delta);

    // Project onto the view's flattened right/forward axes. The double
    // negation (stored negative velocity, negated again here) yields
    // motion in the held direction.
    let flatten = |v: Vec3| Vec3::new(v.x, 0.0, v.z).normalize_or_zero();
    let forward = flatten(*transform.forward());
    let right = flatten(*transform.right());
    let step = right * (-velocity.0.x * delta) + forward * (-velocity.0.z * delta);
    transform.translation += step;
    transform.translation.y += velocity.0.y * delta;

    // Ground clamp: landing restores the jump.
    if transform.translation.y < EYE_HEIGHT {
        velocity.0.y = 0.0;
        transform.translation.y = EYE_HEIGHT;
        flags.can_jump = true;
    }
}


#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::gameplay::player::EYE_HEIGHT;

    fn create_movement_test_app() -> App {
        let mut app = crate::testing::create_test_app();
        app.add_systems(Update, integrate_movement);
        app.update(); // Initialize time
        app
    }

    fn spawn_integrating_player(app: &mut App, y: f32) -> Entity {
        app.world_mut()
            .spawn((
                Player,
                Transform::from_xyz(0.0, y, 0.0),
                Velocity::default(),
                MovementFlags::default(),
                Stamina::new(100.0),
                Dodge::default(),
            ))
            .id()
    }

    #[test]
    fn ground_clamp_restores_jump() {
        let mut app = create_movement_test_app();
        // Below the floor, as if mid-fall.
        let player = spawn_integrating_player(&mut app, EYE_HEIGHT - 0.5);
        app.world_mut().get_mut::<MovementFlags>(player).unwrap().can_jump = false;

        app.update();

        let transform = app.world().get::<Transform>(player).unwrap();
        assert!((transform.translation.y - EYE_HEIGHT).abs() < f32::EPSILON);
        let flags = app.world().get::<MovementFlags>(player).unwrap();
        assert!(flags.can_jump);
        let velocity = app.world().get::<Velocity>(player).unwrap();
        assert_eq!(velocity.0.y, 0.0);
    }

    #[test]
    fn stamina_never_leaves_bounds() {
        let mut app = create_movement_test_app();
        let player = spawn_integrating_player(&mut app, EYE_HEIGHT);
        {
            let mut flags = app.world_mut().get_mut::<MovementFlags>(player).unwrap();
            flags.sprinting = true;
            flags.forward = true;
        }

        for _ in 0..300 {
            app.update();
            let stamina = app.world().get::<Stamina>(player).unwrap();
            assert!(stamina.current >= 0.0);
            assert!(stamina.current <= stamina.max);
        }
    }
}
