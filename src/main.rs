//! Neon Arena entry point.

use bevy::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Neon Arena".to_string(),
                resolution: (1920, 1080).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(neon_arena::plugin)
        .run();
}
