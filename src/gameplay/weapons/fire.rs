//! Fire resolution: the forward raycast and the short-lived visuals.
//!
//! A shot is resolved with one ray from the eye along the view
//! direction. Hit detection is purely visual — the marker shows where
//! the ray landed; no damage is applied here.

use avian3d::prelude::*;
use bevy::prelude::*;

use super::{Arsenal, weapon_stats};
use crate::gameplay::player::Player;
use crate::theme::palette;
use crate::third_party::CollisionLayer;
use crate::GameState;

/// How long the muzzle flash light lives.
const MUZZLE_FLASH_SECS: f32 = 0.05;

/// How long the hit marker lives.
const HIT_MARKER_SECS: f32 = 0.1;

// === Components ===

/// Despawns the owning entity when the timer runs out. Owning the timer
/// on the entity means despawning the entity cancels the effect — there
/// is no detached callback to fire afterwards.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Lifetime(Timer);

impl Lifetime {
    #[must_use]
    pub fn new(seconds: f32) -> Self {
        Self(Timer::from_seconds(seconds, TimerMode::Once))
    }
}

/// Marker for the muzzle flash light.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct MuzzleFlash;

/// Marker for the impact puff at the raycast hit point.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct HitMarker;

// === Resources ===

/// Shared mesh and material handles for hit markers.
#[derive(Resource, Debug)]
pub struct FxAssets {
    pub marker_mesh: Handle<Mesh>,
    pub marker_material: Handle<StandardMaterial>,
}

// === Systems ===

pub(super) fn setup_fx_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(FxAssets {
        marker_mesh: meshes.add(Sphere::new(0.12)),
        marker_material: materials.add(StandardMaterial {
            base_color: palette::HIT_MARKER,
            emissive: palette::HIT_MARKER.to_linear(),
            unlit: true,
            ..default()
        }),
    });
}

/// Left click pulls the trigger. If the arsenal releases the shot, casts
/// a ray from the eye along the view direction against enemies and
/// arena geometry, spawning the flash always and the marker only on a
/// hit inside the weapon's range.
pub(super) fn fire_weapon(
    time: Res<Time>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut arsenal: ResMut<Arsenal>,
    spatial_query: SpatialQuery,
    assets: Res<FxAssets>,
    mut commands: Commands,
    camera: Single<&Transform, With<Player>>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    if !arsenal.fire(time.elapsed_secs()) {
        return;
    }

    let origin = camera.translation;
    let direction = camera.forward();

    commands.spawn((
        Name::new("Muzzle Flash"),
        MuzzleFlash,
        PointLight {
            color: palette::MUZZLE_FLASH,
            intensity: 100_000.0,
            range: 8.0,
            ..default()
        },
        Transform::from_translation(origin + *direction * 0.8),
        Lifetime::new(MUZZLE_FLASH_SECS),
        DespawnOnExit(GameState::InGame),
    ));

    let stats = weapon_stats(arsenal.current());
    let filter = SpatialQueryFilter::from_mask([CollisionLayer::Enemy, CollisionLayer::Obstacle]);
    if let Some(hit) = spatial_query.cast_ray(origin, direction, stats.range, true, &filter) {
        commands.spawn((
            Name::new("Hit Marker"),
            HitMarker,
            Mesh3d(assets.marker_mesh.clone()),
            MeshMaterial3d(assets.marker_material.clone()),
            Transform::from_translation(origin + *direction * hit.distance),
            Lifetime::new(HIT_MARKER_SECS),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

/// Ticks every lifetime and despawns the expired. Runs in
/// `GameSet::Effects`.
pub(super) fn despawn_expired(
    time: Res<Time>,
    mut commands: Commands,
    mut query: Query<(Entity, &mut Lifetime)>,
) {
    for (entity, mut lifetime) in &mut query {
        lifetime.0.tick(time.delta());
        if lifetime.0.is_finished() {
            commands.entity(entity).despawn();
        }
    }
}


#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::testing::transition_to_ingame;
    use crate::GameState;

    #[test]
    fn fx_assets_created_on_enter_ingame() {
        let mut app = crate::testing::create_base_test_app();
        app.init_resource::<Assets<Mesh>>();
        app.init_resource::<Assets<StandardMaterial>>();
        app.add_systems(OnEnter(GameState::InGame), setup_fx_assets);
        transition_to_ingame(&mut app);

        assert!(app.world().get_resource::<FxAssets>().is_some());
    }
}
