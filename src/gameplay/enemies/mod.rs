//! Enemy actors: archetype table, components, and the spawn archetype.

pub mod ai;
pub mod spawn;

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::gameplay::Health;
use crate::theme::palette;
use crate::third_party::CollisionLayer;
use crate::{GameSet, GameState, gameplay_running};

// === Archetypes ===

/// The three enemy archetypes.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
#[reflect(Component)]
pub enum EnemyKind {
    Grunt,
    Heavy,
    Scout,
}

impl EnemyKind {
    /// All archetypes, for iteration and random selection.
    pub const ALL: &[Self] = &[Self::Grunt, Self::Heavy, Self::Scout];

    /// Human-readable display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Grunt => "Grunt",
            Self::Heavy => "Heavy",
            Self::Scout => "Scout",
        }
    }
}

/// Behavior parameters for an archetype. All values are compile-time
/// constants.
#[derive(Debug, Clone, Copy)]
pub struct EnemyParams {
    pub max_health: f32,
    pub speed: f32,
    pub detection_range: f32,
    pub attack_range: f32,
    pub damage: f32,
    /// Seconds between recorded attacks.
    pub attack_cooldown: f32,
}

/// Look up parameters for an archetype.
#[must_use]
pub const fn enemy_params(kind: EnemyKind) -> EnemyParams {
    match kind {
        EnemyKind::Grunt => EnemyParams {
            max_health: 100.0,
            speed: 4.0,
            detection_range: 20.0,
            attack_range: 4.0,
            damage: 15.0,
            attack_cooldown: 1.0,
        },
        EnemyKind::Heavy => EnemyParams {
            max_health: 200.0,
            speed: 2.0,
            detection_range: 15.0,
            attack_range: 3.0,
            damage: 20.0,
            attack_cooldown: 2.0,
        },
        EnemyKind::Scout => EnemyParams {
            max_health: 50.0,
            speed: 8.0,
            detection_range: 25.0,
            attack_range: 5.0,
            damage: 10.0,
            attack_cooldown: 0.5,
        },
    }
}

/// Body dimensions for an archetype. Mesh and collider share them.
#[must_use]
pub const fn enemy_size(kind: EnemyKind) -> Vec3 {
    match kind {
        EnemyKind::Grunt => Vec3::new(1.5, 2.0, 1.5),
        EnemyKind::Heavy => Vec3::new(2.5, 2.5, 2.5),
        EnemyKind::Scout => Vec3::new(1.0, 1.8, 1.0),
    }
}

// === Components ===

/// Marker for enemy entities.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Enemy;

/// Behavior machine state. Transitions are evaluated once per update
/// from distance thresholds; see [`ai::next_state`].
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub enum AiState {
    /// Walking the patrol circle.
    #[default]
    Patrol,
    /// Closing on the player at a sprint.
    Chase,
    /// In range; swinging on a cooldown.
    Attack,
    /// Falling back toward the patrol origin.
    Retreat,
}

/// Four waypoints on a circle around the spawn point, visited
/// cyclically.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct PatrolRoute {
    pub points: [Vec3; 4],
    pub current: usize,
}

impl PatrolRoute {
    /// Builds the route: one waypoint per quarter turn at the given
    /// radius, on the spawn's ground height.
    #[must_use]
    pub fn circle(center: Vec3, radius: f32) -> Self {
        let mut points = [Vec3::ZERO; 4];
        for (i, point) in points.iter_mut().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let angle = i as f32 * std::f32::consts::FRAC_PI_2;
            *point = center + Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius);
        }
        Self { points, current: 0 }
    }

    /// The waypoint retreat falls back to.
    #[must_use]
    pub const fn origin(&self) -> Vec3 {
        self.points[0]
    }

    /// The waypoint currently being walked toward.
    #[must_use]
    pub const fn target(&self) -> Vec3 {
        self.points[self.current]
    }

    /// Moves on to the next waypoint, wrapping around.
    pub const fn advance(&mut self) {
        self.current = (self.current + 1) % 4;
    }
}

/// Timestamp of the last recorded attack, seconds of game time.
///
/// Contact damage is applied continuously elsewhere; this clock only
/// gates how often an attack is *recorded* while in range.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct AttackClock {
    pub last_attack_at: Option<f32>,
}

// === Resources ===

/// Shared mesh and material handles, one set per archetype, plus the
/// white-hot material swapped in while an enemy flashes from a hit.
#[derive(Resource, Debug)]
pub struct EnemyAssets {
    meshes: [Handle<Mesh>; 3],
    materials: [Handle<StandardMaterial>; 3],
    pub flash_material: Handle<StandardMaterial>,
}

impl EnemyAssets {
    #[must_use]
    pub fn mesh(&self, kind: EnemyKind) -> Handle<Mesh> {
        self.meshes[kind as usize].clone()
    }

    #[must_use]
    pub fn material(&self, kind: EnemyKind) -> Handle<StandardMaterial> {
        self.materials[kind as usize].clone()
    }
}

// === Spawning ===

/// Spawn an enemy entity with all required components.
/// Single source of truth for the enemy archetype.
pub fn spawn_enemy(
    commands: &mut Commands,
    kind: EnemyKind,
    position: Vec3,
    patrol_radius: f32,
    assets: &EnemyAssets,
) -> Entity {
    let params = enemy_params(kind);
    let size = enemy_size(kind);

    commands
        .spawn((
            Name::new(kind.display_name()),
            Enemy,
            kind,
            Health::new(params.max_health),
            AiState::default(),
            PatrolRoute::circle(position, patrol_radius),
            AttackClock::default(),
            Mesh3d(assets.mesh(kind)),
            MeshMaterial3d(assets.material(kind)),
            Transform::from_translation(position),
            Collider::cuboid(size.x, size.y, size.z),
            CollisionLayers::new(
                [CollisionLayer::Enemy],
                [CollisionLayer::Player, CollisionLayer::Obstacle],
            ),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

// === Systems ===

fn setup_enemy_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let kind_color = |kind| match kind {
        EnemyKind::Grunt => palette::GRUNT,
        EnemyKind::Heavy => palette::HEAVY,
        EnemyKind::Scout => palette::SCOUT,
    };

    let build_mesh = |meshes: &mut Assets<Mesh>, kind| {
        let size = enemy_size(kind);
        meshes.add(Cuboid::new(size.x, size.y, size.z))
    };

    commands.insert_resource(EnemyAssets {
        meshes: [
            build_mesh(&mut meshes, EnemyKind::Grunt),
            build_mesh(&mut meshes, EnemyKind::Heavy),
            build_mesh(&mut meshes, EnemyKind::Scout),
        ],
        materials: [
            materials.add(kind_color(EnemyKind::Grunt)),
            materials.add(kind_color(EnemyKind::Heavy)),
            materials.add(kind_color(EnemyKind::Scout)),
        ],
        flash_material: materials.add(StandardMaterial {
            base_color: palette::HIT_FLASH,
            emissive: palette::HIT_FLASH.to_linear(),
            ..default()
        }),
    });
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Enemy>()
        .register_type::<EnemyKind>()
        .register_type::<AiState>()
        .register_type::<PatrolRoute>()
        .register_type::<AttackClock>();

    app.add_systems(OnEnter(GameState::InGame), setup_enemy_assets);

    spawn::plugin(app);

    app.add_systems(
        Update,
        ai::update_enemies
            .in_set(GameSet::Ai)
            .run_if(gameplay_running),
    );
}
