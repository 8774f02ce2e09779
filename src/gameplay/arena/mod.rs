//! Static arena generation: ground, boundary walls, obstacles, lights, fog.
//!
//! Everything here is spawned once on entering `InGame` and never moves.
//! Obstacle colliders are the only collision surface the rest of the
//! game consults.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::theme::palette;
use crate::third_party::CollisionLayer;
use crate::GameState;

// === Constants ===

/// Side length of the square arena floor.
pub const ARENA_SIZE: f32 = 100.0;

/// Boundary wall height.
pub const WALL_HEIGHT: f32 = 10.0;

/// Boundary wall thickness.
pub const WALL_THICKNESS: f32 = 2.0;

/// Exponential fog density. Lives on the camera; the value is owned here
/// with the rest of the arena's atmosphere.
pub const FOG_DENSITY: f32 = 0.015;

/// Fog color, matching the night-sky clear color.
pub const FOG_COLOR: Color = Color::srgb(0.02, 0.02, 0.05);

/// Central raised platform: (center, full size).
const PLATFORM: (Vec3, Vec3) = (Vec3::new(0.0, 1.0, 0.0), Vec3::new(10.0, 2.0, 10.0));

/// Scattered cover boxes: (center, full size). Fixed layout, no
/// procedural generation.
const OBSTACLES: [(Vec3, Vec3); 6] = [
    (Vec3::new(20.0, 1.5, 10.0), Vec3::new(3.0, 3.0, 3.0)),
    (Vec3::new(-15.0, 1.5, 20.0), Vec3::new(3.0, 3.0, 3.0)),
    (Vec3::new(10.0, 2.0, -25.0), Vec3::new(4.0, 4.0, 4.0)),
    (Vec3::new(-25.0, 1.5, -10.0), Vec3::new(3.0, 3.0, 3.0)),
    (Vec3::new(30.0, 1.0, -15.0), Vec3::new(2.0, 2.0, 2.0)),
    (Vec3::new(-10.0, 2.0, -30.0), Vec3::new(4.0, 4.0, 4.0)),
];

/// Quadrant accent lights: (position, color).
const QUADRANT_LIGHTS: [(Vec3, Color); 4] = [
    (Vec3::new(40.0, 10.0, 40.0), palette::QUADRANT_NE),
    (Vec3::new(-40.0, 10.0, 40.0), palette::QUADRANT_NW),
    (Vec3::new(40.0, 10.0, -40.0), palette::QUADRANT_SE),
    (Vec3::new(-40.0, 10.0, -40.0), palette::QUADRANT_SW),
];

// === Components ===

/// Marker for solid arena geometry the player can be unstuck from:
/// boundary walls, the platform, and cover boxes. The ground plane is
/// raycastable but not an obstacle.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Obstacle;

// === Systems ===

/// Spawns the whole arena. Meshes and colliders share dimensions so the
/// visual and the collision volume never drift apart.
fn spawn_arena(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Ground plane
    commands.spawn((
        Name::new("Ground"),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(ARENA_SIZE, ARENA_SIZE))),
        MeshMaterial3d(materials.add(palette::GROUND)),
        Transform::IDENTITY,
        Collider::cuboid(ARENA_SIZE, 0.1, ARENA_SIZE),
        CollisionLayers::new([CollisionLayer::Obstacle], [CollisionLayer::Player]),
        DespawnOnExit(GameState::InGame),
    ));

    // Boundary walls enclosing the arena
    let half = ARENA_SIZE / 2.0;
    let wall_material = materials.add(palette::WALL);
    let wall_specs: [(&str, Vec3, Vec3); 4] = [
        (
            "North Wall",
            Vec3::new(0.0, WALL_HEIGHT / 2.0, -half),
            Vec3::new(ARENA_SIZE, WALL_HEIGHT, WALL_THICKNESS),
        ),
        (
            "South Wall",
            Vec3::new(0.0, WALL_HEIGHT / 2.0, half),
            Vec3::new(ARENA_SIZE, WALL_HEIGHT, WALL_THICKNESS),
        ),
        (
            "East Wall",
            Vec3::new(half, WALL_HEIGHT / 2.0, 0.0),
            Vec3::new(WALL_THICKNESS, WALL_HEIGHT, ARENA_SIZE),
        ),
        (
            "West Wall",
            Vec3::new(-half, WALL_HEIGHT / 2.0, 0.0),
            Vec3::new(WALL_THICKNESS, WALL_HEIGHT, ARENA_SIZE),
        ),
    ];
    for (name, center, size) in wall_specs {
        spawn_block(
            &mut commands,
            &mut meshes,
            wall_material.clone(),
            name,
            center,
            size,
        );
    }

    // Central platform + scattered cover
    let platform_material = materials.add(palette::PLATFORM);
    spawn_block(
        &mut commands,
        &mut meshes,
        platform_material,
        "Platform",
        PLATFORM.0,
        PLATFORM.1,
    );

    let obstacle_material = materials.add(palette::OBSTACLE);
    for (i, (center, size)) in OBSTACLES.into_iter().enumerate() {
        spawn_block(
            &mut commands,
            &mut meshes,
            obstacle_material.clone(),
            format!("Obstacle {i}"),
            center,
            size,
        );
    }

    spawn_lights(&mut commands);
}

/// Spawns one solid box with matching mesh and collider.
fn spawn_block(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: Handle<StandardMaterial>,
    name: impl Into<std::borrow::Cow<'static, str>>,
    center: Vec3,
    size: Vec3,
) {
    commands.spawn((
        Name::new(name),
        Obstacle,
        Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
        MeshMaterial3d(material),
        Transform::from_translation(center),
        Collider::cuboid(size.x, size.y, size.z),
        CollisionLayers::new(
            [CollisionLayer::Obstacle],
            [CollisionLayer::Player, CollisionLayer::Enemy],
        ),
        DespawnOnExit(GameState::InGame),
    ));
}

fn spawn_lights(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 150.0,
        ..default()
    });

    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(50.0, 100.0, 50.0).looking_at(Vec3::ZERO, Vec3::Y),
        DespawnOnExit(GameState::InGame),
    ));

    for (i, (position, color)) in QUADRANT_LIGHTS.into_iter().enumerate() {
        commands.spawn((
            Name::new(format!("Quadrant Light {i}")),
            PointLight {
                color,
                intensity: 2_000_000.0,
                range: 60.0,
                ..default()
            },
            Transform::from_translation(position),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Obstacle>();

    app.add_systems(OnEnter(GameState::InGame), spawn_arena);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obstacle_layout_stays_inside_the_walls() {
        let half = ARENA_SIZE / 2.0;
        for (center, size) in OBSTACLES {
            assert!(center.x.abs() + size.x / 2.0 < half);
            assert!(center.z.abs() + size.z / 2.0 < half);
        }
    }

    #[test]
    fn obstacles_rest_on_the_ground() {
        for (center, size) in OBSTACLES {
            assert!((center.y - size.y / 2.0).abs() < f32::EPSILON);
        }
    }
}
