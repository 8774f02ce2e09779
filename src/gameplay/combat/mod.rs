//! Combat arbitration: contact damage, enemy strikes, hit feedback,
//! and death reporting.
//!
//! Two deliberate carry-overs from the source material, kept visible
//! rather than repaired: weapon fire never routes through [`strike`]
//! (hits are visual only), and dead enemies are reported but never
//! removed. Deaths surface as [`EnemyDied`] messages so wiring removal
//! later is one consumer away.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::gameplay::enemies::{AiState, Enemy, EnemyAssets, EnemyKind, enemy_params};
use crate::gameplay::player::{self, Dodge, EYE_HEIGHT, Player};
use crate::gameplay::{Health, arena::Obstacle};
use crate::third_party::colliders_overlap;
use crate::{GameSet, gameplay_running};

/// Health fraction at or below which a wounded enemy breaks off.
const RETREAT_HEALTH_FRACTION: f32 = 0.3;

/// Hit feedback flash duration.
const HIT_FLASH_SECS: f32 = 0.1;

// === Components ===

/// White-hot feedback flash on a struck enemy; reverted when the timer
/// runs out.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct HitFlash(Timer);

impl Default for HitFlash {
    fn default() -> Self {
        Self(Timer::from_seconds(HIT_FLASH_SECS, TimerMode::Once))
    }
}

/// Marks an enemy whose death has already been reported, so the report
/// fires once even though the body stays in the world.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Defeated;

// === Messages ===

/// An enemy ran out of health this frame.
#[derive(Message, Debug, Clone, Copy)]
pub struct EnemyDied {
    pub entity: Entity,
    pub kind: EnemyKind,
}

// === Operations ===

/// Applies damage to an enemy: health clamps at zero, and a badly
/// wounded enemy is forced straight into retreat (its machine
/// re-evaluates normally from there next frame). Returns `true` when
/// the enemy is out of health.
pub fn strike(health: &mut Health, state: &mut AiState, amount: f32) -> bool {
    health.current = (health.current - amount).max(0.0);
    if health.current <= health.max * RETREAT_HEALTH_FRACTION {
        *state = AiState::Retreat;
    }
    health.current <= 0.0
}

/// Swaps in the flash material and arms the revert timer on a struck
/// enemy.
pub fn apply_hit_flash(commands: &mut Commands, entity: Entity, assets: &EnemyAssets) {
    commands.entity(entity).insert((
        MeshMaterial3d(assets.flash_material.clone()),
        HitFlash::default(),
    ));
}

// === Systems ===

/// Continuous contact damage: every frame the player overlaps an enemy
/// that is mid-attack, the enemy's damage rating is applied scaled by
/// the frame delta. The attack clock plays no part here — the swing
/// cadence it records and this damage stream are separate bookkeeping.
/// Runs in `GameSet::Collision`.
fn contact_damage(
    time: Res<Time>,
    player: Single<(&Transform, &Collider, &mut Health, &Dodge), (With<Player>, Without<Enemy>)>,
    enemies: Query<(&Transform, &Collider, &AiState, &EnemyKind), With<Enemy>>,
) {
    let delta = time.delta_secs();
    let (player_transform, player_collider, mut health, dodge) = player.into_inner();

    for (enemy_transform, enemy_collider, state, kind) in &enemies {
        if *state != AiState::Attack {
            continue;
        }
        if !colliders_overlap(
            player_collider,
            player_transform.translation,
            enemy_collider,
            enemy_transform.translation,
        ) {
            continue;
        }

        let amount = enemy_params(*kind).damage * delta;
        if player::absorb_damage(&mut health, dodge, amount) {
            // No game-over flow yet: the fall is only reported.
            warn!("Player has fallen");
        }
    }
}

/// Crude unstick for arena geometry: overlapping an obstacle clamps the
/// player back up to eye height. No horizontal push-out. Runs in
/// `GameSet::Collision`.
fn unstick_from_obstacles(
    player: Single<(&mut Transform, &Collider), (With<Player>, Without<Obstacle>)>,
    obstacles: Query<(&Transform, &Collider), (With<Obstacle>, Without<Player>)>,
) {
    let (mut player_transform, player_collider) = player.into_inner();

    for (obstacle_transform, obstacle_collider) in &obstacles {
        if colliders_overlap(
            player_collider,
            player_transform.translation,
            obstacle_collider,
            obstacle_transform.translation,
        ) {
            player_transform.translation.y = player_transform.translation.y.max(EYE_HEIGHT);
        }
    }
}

/// Reverts the flash material once the timer runs out. Runs in
/// `GameSet::Effects`.
fn tick_hit_flashes(
    time: Res<Time>,
    mut commands: Commands,
    assets: Option<Res<EnemyAssets>>,
    mut query: Query<(Entity, &mut HitFlash, &EnemyKind)>,
) {
    let Some(assets) = assets else {
        return;
    };
    for (entity, mut flash, kind) in &mut query {
        flash.0.tick(time.delta());
        if flash.0.is_finished() {
            commands
                .entity(entity)
                .insert(MeshMaterial3d(assets.material(*kind)))
                .remove::<HitFlash>();
        }
    }
}

/// Reports each enemy death exactly once. The body is left standing —
/// nothing despawns it. Runs in `GameSet::Effects`.
fn detect_enemy_deaths(
    mut commands: Commands,
    mut deaths: MessageWriter<EnemyDied>,
    query: Query<(Entity, &Health, &EnemyKind), (With<Enemy>, Without<Defeated>)>,
) {
    for (entity, health, kind) in &query {
        if health.current <= 0.0 {
            commands.entity(entity).insert(Defeated);
            deaths.write(EnemyDied {
                entity,
                kind: *kind,
            });
        }
    }
}

/// The sole consumer of death reports, for now.
fn log_enemy_deaths(mut deaths: MessageReader<EnemyDied>) {
    for death in deaths.read() {
        info!("{} down", death.kind.display_name());
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<HitFlash>().register_type::<Defeated>();
    app.add_message::<EnemyDied>();

    app.add_systems(
        Update,
        (contact_damage, unstick_from_obstacles)
            .in_set(GameSet::Collision)
            .run_if(gameplay_running),
    );

    app.add_systems(
        Update,
        (tick_hit_flashes, (detect_enemy_deaths, log_enemy_deaths).chain())
            .in_set(GameSet::Effects)
            .run_if(gameplay_running),
    );
}
