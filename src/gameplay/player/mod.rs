//! Player controller: components, stat bookkeeping, and spawning.
//!
//! The player entity IS the first-person camera: one transform carries
//! the eye position and view rotation, exactly like the source material
//! this game descends from. Movement is hand-integrated in
//! [`movement`]; the collider exists for overlap tests only.

mod dodge;
mod input;
mod movement;

pub use dodge::Dodge;
pub use input::{LookAngles, MovementFlags};

use avian3d::prelude::*;
use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;

use crate::gameplay::{arena, Health};
use crate::third_party::CollisionLayer;
use crate::{GameSet, GameState, gameplay_running};

// === Constants ===

/// Camera height above the ground; also the floor the ground clamp
/// snaps to.
pub const EYE_HEIGHT: f32 = 2.0;

/// Base acceleration scale applied to held movement keys.
pub const BASE_SPEED: f32 = 400.0;

/// Acceleration scale while a dodge is active.
pub const DODGE_SPEED: f32 = 600.0;

/// Sprint acceleration multiplier (requires stamina).
pub const SPRINT_MULTIPLIER: f32 = 1.5;

/// Upward velocity granted by a jump.
pub const JUMP_VELOCITY: f32 = 350.0;

/// Downward acceleration. The x100 scale matches the world's unit
/// scale; "realistic" 9.8 floats like the moon here.
pub const GRAVITY: f32 = 9.8 * 100.0;

/// Horizontal velocity decay factor per second.
pub const DAMPING: f32 = 10.0;

pub const MAX_HEALTH: f32 = 100.0;
pub const MAX_STAMINA: f32 = 100.0;

/// Stamina drained per second of sprinting while moving.
pub const STAMINA_DRAIN_RATE: f32 = 20.0;

/// Stamina recovered per second when not sprinting.
pub const STAMINA_REGEN_RATE: f32 = 10.0;

/// Player body half-extents used for all overlap tests.
pub const BODY_HALF_EXTENTS: Vec3 = Vec3::new(1.0, 2.0, 1.0);

// === Components ===

/// Marker for the player entity.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Player;

/// Hand-integrated velocity. Not a physics-engine velocity: the
/// horizontal components are accumulated *negated* (see the movement
/// module docs) and only the movement system interprets them.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Velocity(pub Vec3);

/// Sprint/dodge resource pool.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Stamina {
    pub current: f32,
    pub max: f32,
}

impl Stamina {
    #[must_use]
    pub const fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Fraction of stamina remaining, in `[0, 1]`.
    #[must_use]
    pub fn ratio(&self) -> f32 {
        (self.current / self.max).clamp(0.0, 1.0)
    }

    pub fn drain(&mut self, amount: f32) {
        self.current = (self.current - amount).max(0.0);
    }

    pub fn regen(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }
}

/// Kill/bonus tally shown on the HUD.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Score(pub u32);

// === Operations ===

/// Applies incoming damage to the player, halved while a dodge is
/// active. Health never goes below zero. Returns `true` when health is
/// exhausted.
pub fn absorb_damage(health: &mut Health, dodge: &Dodge, amount: f32) -> bool {
    let amount = if dodge.is_active() { amount / 2.0 } else { amount };
    health.current = (health.current - amount).max(0.0);
    health.current <= 0.0
}

/// Adds to the player's score tally.
pub fn add_score(score: &mut Score, points: u32) {
    score.0 = score.0.saturating_add(points);
}

// === Systems ===

/// Spawns the player/camera entity at the arena edge, facing the center.
fn spawn_player(mut commands: Commands) {
    commands.spawn((
        Name::new("Player"),
        Player,
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 75.0_f32.to_radians(),
            ..default()
        }),
        DistanceFog {
            color: arena::FOG_COLOR,
            falloff: FogFalloff::Exponential {
                density: arena::FOG_DENSITY,
            },
            ..default()
        },
        Transform::from_xyz(0.0, EYE_HEIGHT, 30.0),
        Velocity::default(),
        MovementFlags::default(),
        LookAngles::default(),
        Dodge::default(),
        Health::new(MAX_HEALTH),
        Stamina::new(MAX_STAMINA),
        Score::default(),
        DespawnOnExit(GameState::InGame),
    ))
    .insert((
        Collider::cuboid(
            BODY_HALF_EXTENTS.x * 2.0,
            BODY_HALF_EXTENTS.y * 2.0,
            BODY_HALF_EXTENTS.z * 2.0,
        ),
        CollisionLayers::new(
            [CollisionLayer::Player],
            [CollisionLayer::Enemy, CollisionLayer::Obstacle],
        ),
    ));
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Player>()
        .register_type::<Velocity>()
        .register_type::<Stamina>()
        .register_type::<Score>()
        .register_type::<MovementFlags>()
        .register_type::<LookAngles>()
        .register_type::<Dodge>();

    app.add_systems(OnEnter(GameState::InGame), spawn_player);

    input::plugin(app);
    dodge::plugin(app);

    app.add_systems(
        Update,
        movement::integrate_movement
            .in_set(GameSet::Movement)
            .run_if(gameplay_running.and(crate::gameplay::cursor_locked)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stamina_drain_floors_at_zero() {
        let mut stamina = Stamina::new(MAX_STAMINA);
        stamina.drain(MAX_STAMINA + 50.0);
        assert_eq!(stamina.current, 0.0);
    }

    #[test]
    fn stamina_regen_caps_at_max() {
        let mut stamina = Stamina::new(MAX_STAMINA);
        stamina.current = 95.0;
        stamina.regen(100.0);
        assert_eq!(stamina.current, MAX_STAMINA);
    }

    #[test]
    fn absorb_damage_reduces_health() {
        let mut health = Health::new(MAX_HEALTH);
        let died = absorb_damage(&mut health, &Dodge::default(), 30.0);
        assert!(!died);
        assert_eq!(health.current, 70.0);
    }

    #[test]
    fn absorb_damage_halved_while_dodging() {
        let mut health = Health::new(MAX_HEALTH);
        let mut dodge = Dodge::default();
        dodge.activate_for_test();
        absorb_damage(&mut health, &dodge, 30.0);
        assert_eq!(health.current, MAX_HEALTH - 15.0);
    }

    #[test]
    fn absorb_damage_clamps_at_zero_and_reports_death() {
        let mut health = Health::new(MAX_HEALTH);
        let died = absorb_damage(&mut health, &Dodge::default(), 500.0);
        assert!(died);
        assert_eq!(health.current, 0.0);
    }

    #[test]
    fn score_accumulates() {
        let mut score = Score::default();
        add_score(&mut score, 100);
        add_score(&mut score, 50);
        assert_eq!(score.0, 150);
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::testing::{assert_entity_count, transition_to_ingame};

    #[test]
    fn player_spawned_on_enter_ingame() {
        let mut app = crate::testing::create_base_test_app();
        app.add_systems(OnEnter(GameState::InGame), spawn_player);
        transition_to_ingame(&mut app);

        assert_entity_count::<With<Player>>(&mut app, 1);
    }

    #[test]
    fn player_spawns_at_eye_height() {
        let mut app = crate::testing::create_base_test_app();
        app.add_systems(OnEnter(GameState::InGame), spawn_player);
        transition_to_ingame(&mut app);

        let mut query = app
            .world_mut()
            .query_filtered::<&Transform, With<Player>>();
        let transform = query.single(app.world()).unwrap();
        assert!((transform.translation.y - EYE_HEIGHT).abs() < f32::EPSILON);
    }
}
