//! Enemy spawning: the fixed opening garrison and the perimeter timer.

use bevy::prelude::*;
use rand::Rng;

use super::{EnemyAssets, EnemyKind, enemy_size, spawn_enemy};
use crate::{GameSet, GameState, gameplay_running};

// === Constants ===

/// Seconds between perimeter spawns.
pub const SPAWN_INTERVAL: f32 = 10.0;

/// Radius of the circle around the arena center that perimeter spawns
/// land on.
pub const SPAWN_RADIUS: f32 = 30.0;

/// Patrol radius handed to perimeter spawns.
const PERIMETER_PATROL_RADIUS: f32 = 5.0;

/// The opening garrison: one of each archetype at fixed positions with
/// its own patrol radius.
const INITIAL_SPAWNS: [(EnemyKind, f32, f32, f32); 3] = [
    (EnemyKind::Grunt, 15.0, 15.0, 5.0),
    (EnemyKind::Heavy, -15.0, -15.0, 3.0),
    (EnemyKind::Scout, 20.0, -20.0, 8.0),
];

// === Resources ===

/// Fixed-interval clock gating perimeter spawns.
///
/// Inserted on `OnEnter(GameState::InGame)`, reset each time the state
/// is entered.
#[derive(Resource, Debug, Reflect)]
#[reflect(Resource)]
pub struct EnemySpawnTimer(pub Timer);

impl Default for EnemySpawnTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(SPAWN_INTERVAL, TimerMode::Repeating))
    }
}

// === Systems ===

/// Reset (or insert) the spawn timer when entering `InGame`.
fn reset_enemy_spawn_timer(mut commands: Commands) {
    commands.insert_resource(EnemySpawnTimer::default());
}

/// Stands up the opening garrison.
fn spawn_initial_enemies(mut commands: Commands, assets: Res<EnemyAssets>) {
    for (kind, x, z, patrol_radius) in INITIAL_SPAWNS {
        let position = Vec3::new(x, enemy_size(kind).y / 2.0, z);
        spawn_enemy(&mut commands, kind, position, patrol_radius, &assets);
    }
}

/// Ticks the spawn clock; each expiry drops one random archetype at a
/// random angle on the perimeter circle. Runs in `GameSet::Spawning`.
fn tick_enemy_spawner(
    time: Res<Time>,
    mut spawn_timer: ResMut<EnemySpawnTimer>,
    assets: Res<EnemyAssets>,
    mut commands: Commands,
) {
    spawn_timer.0.tick(time.delta());
    if !spawn_timer.0.just_finished() {
        return;
    }

    let mut rng = rand::rng();
    let kind = EnemyKind::ALL[rng.random_range(0..EnemyKind::ALL.len())];
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    let position = Vec3::new(
        angle.cos() * SPAWN_RADIUS,
        enemy_size(kind).y / 2.0,
        angle.sin() * SPAWN_RADIUS,
    );

    spawn_enemy(
        &mut commands,
        kind,
        position,
        PERIMETER_PATROL_RADIUS,
        &assets,
    );
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<EnemySpawnTimer>();

    app.add_systems(
        OnEnter(GameState::InGame),
        (reset_enemy_spawn_timer, spawn_initial_enemies).after(super::setup_enemy_assets),
    );

    app.add_systems(
        Update,
        tick_enemy_spawner
            .in_set(GameSet::Spawning)
            .run_if(gameplay_running),
    );
}


#[cfg(test)]
mod integration_tests {
    use super::super::{AiState, AttackClock, Enemy, Health, PatrolRoute};
    use super::*;
    use crate::testing::{assert_entity_count, transition_to_ingame};
    use std::time::Duration;

    /// Create a test app with assets and the spawn plugin active.
    fn create_spawn_test_app() -> App {
        let mut app = crate::testing::create_base_test_app();
        app.init_resource::<Assets<Mesh>>();
        app.init_resource::<Assets<StandardMaterial>>();

        app.add_systems(OnEnter(GameState::InGame), super::super::setup_enemy_assets);
        plugin(&mut app);
        transition_to_ingame(&mut app);
        app
    }

    #[test]
    fn spawn_timer_resource_exists_after_entering_ingame() {
        let app = create_spawn_test_app();
        assert!(app.world().get_resource::<EnemySpawnTimer>().is_some());
    }

    #[test]
    fn opening_garrison_spawns_on_enter() {
        let mut app = create_spawn_test_app();
        assert_entity_count::<With<Enemy>>(&mut app, 3);
    }

    #[test]
    fn no_perimeter_spawn_before_the_interval() {
        let mut app = create_spawn_test_app();
        app.update();
        app.update();
        assert_entity_count::<With<Enemy>>(&mut app, 3);
    }

    /// Set elapsed to 1 nanosecond before the timer's duration so any
    /// positive wall-clock delta triggers `just_finished()`.
    fn nearly_expire_timer(app: &mut App) {
        let duration = app.world().resource::<EnemySpawnTimer>().0.duration();
        app.world_mut()
            .resource_mut::<EnemySpawnTimer>()
            .0
            .set_elapsed(duration - Duration::from_nanos(1));
    }

    #[test]
    fn perimeter_spawn_after_interval_expires() {
        let mut app = create_spawn_test_app();

        nearly_expire_timer(&mut app);
        app.update();
        assert_entity_count::<With<Enemy>>(&mut app, 4);
    }

    #[test]
    fn spawned_enemy_has_all_components() {
        let mut app = create_spawn_test_app();

        nearly_expire_timer(&mut app);
        app.update();

        assert_entity_count::<(With<Enemy>, With<EnemyKind>)>(&mut app, 4);
        assert_entity_count::<(With<Enemy>, With<Health>)>(&mut app, 4);
        assert_entity_count::<(With<Enemy>, With<AiState>)>(&mut app, 4);
        assert_entity_count::<(With<Enemy>, With<PatrolRoute>)>(&mut app, 4);
        assert_entity_count::<(With<Enemy>, With<AttackClock>)>(&mut app, 4);
        assert_entity_count::<(With<Enemy>, With<DespawnOnExit<GameState>>)>(&mut app, 4);
    }

    #[test]
    fn perimeter_spawns_land_on_the_spawn_circle() {
        let mut app = create_spawn_test_app();

        nearly_expire_timer(&mut app);
        app.update();

        let mut query = app
            .world_mut()
            .query_filtered::<(&Transform, &PatrolRoute), With<Enemy>>();
        let on_circle = query.iter(app.world()).any(|(transform, _)| {
            let flat = Vec2::new(transform.translation.x, transform.translation.z);
            (flat.length() - SPAWN_RADIUS).abs() < 0.5
        });
        assert!(on_circle, "no enemy found on the perimeter circle");
    }
}
